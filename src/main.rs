#[cfg(feature = "ssr")]
use actix_web::HttpResponse;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use cauldronware::api::{
        add_deseo, create_order, create_product, create_review, create_user, delete_product,
        delete_review, delete_user, get_deseos, get_order, get_orders_for_user, get_product,
        get_products, get_reviews, get_user, get_users, remove_deseo, update_order_status,
        update_product,
    };
    use cauldronware::app::*;
    use cauldronware::db::Database;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    // Initialize the database
    let db_path = std::env::var("STORE_DB_PATH").unwrap_or_else(|_| "cauldronware.db".to_string());
    let db = Database::new(&db_path).unwrap();
    db.create_schema().await.unwrap(); // Ensure the schema is created
    let db = Arc::new(Mutex::new(db)); // Wrap the database in an Arc<Mutex<T>> for shared state
    println!("Schema created successfully!");

    // Load configuration
    let conf = get_configuration(None).await.unwrap();
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    println!("listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;
        let db = db.clone(); // Clone the Arc for each worker

        App::new()
            .app_data(web::Data::new(db.clone()))
            // Register custom API routes BEFORE Leptos server functions
            .service(
                web::scope("/api")
                    .route("/products", web::get().to(get_products))
                    .route("/products", web::post().to(create_product))
                    .route("/products/{id}", web::get().to(get_product))
                    .route("/products/{id}", web::put().to(update_product))
                    .route("/products/{id}", web::delete().to(delete_product))
                    .route("/products/{id}/reviews", web::get().to(get_reviews))
                    .route("/products/{id}/reviews", web::post().to(create_review))
                    .route("/reviews/{id}", web::delete().to(delete_review))
                    .route("/users", web::get().to(get_users))
                    .route("/users", web::post().to(create_user))
                    .route("/users/{id}", web::get().to(get_user))
                    .route("/users/{id}", web::delete().to(delete_user))
                    .route("/users/{id}/orders", web::get().to(get_orders_for_user))
                    .route("/users/{id}/deseos", web::get().to(get_deseos))
                    .route("/users/{id}/deseos", web::post().to(add_deseo))
                    .route(
                        "/users/{id}/deseos/{product_id}",
                        web::delete().to(remove_deseo),
                    )
                    .route("/orders", web::post().to(create_order))
                    .route("/orders/{id}", web::get().to(get_order))
                    .route("/orders/{id}/status", web::put().to(update_order_status)),
            )
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
            // Register URL routing
            .service(web::resource("/").route(web::get().to(index)))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
// Define the index handler
async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to Cauldronware!")
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use cauldronware::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
