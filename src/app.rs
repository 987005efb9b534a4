/// Main application entry point for Cauldronware.
/// Wires the catalog, cauldron, deseos and checkout components together
/// around a shared set of signals.
use crate::cart::Cauldron;
use crate::components::{
    cauldron_view::CauldronView, checkout_button::CheckoutButton, deseos_list::DeseosList,
    product_form::ProductForm, products_list::ProductsList, review_form::ReviewForm,
    reviews_list::ReviewsList,
};
use crate::currency::Currency;
use crate::models::deseo::Deseo;
use crate::models::order::Order;
use crate::models::product::Product;
use crate::models::review::Review;
use futures::future;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use serde_json::json;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;

// Until the login flow lands, everyone shops as the resident guest witch.
const GUEST_USER_ID: &str = "guest";

#[component]
pub fn App() -> impl IntoView {
    let cauldron = Cauldron::new();

    // Signals backing the storefront views.
    let (products, set_products) = create_signal(Vec::<Product>::new());
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (deseos, set_deseos) = create_signal(Vec::<Deseo>::new());
    let (selected_product, set_selected_product) = create_signal(None::<String>);
    let (last_order, set_last_order) = create_signal(None::<Order>);
    // Shared by the cauldron view (selector + totals) and checkout, so the
    // SDK charges in the currency the shopper is looking at.
    let (display_currency, set_display_currency) = create_signal(Currency::Eur);

    let fetch_products = move || async move {
        match Request::get("/api/products").send().await {
            Ok(response) => match response.json::<Vec<Product>>().await {
                Ok(list) => set_products.set(list),
                Err(e) => log!("[APP] Failed to decode products: {}", e),
            },
            Err(e) => log!("[APP] Failed to fetch products: {}", e),
        }
    };

    let fetch_deseos = move || async move {
        let url = format!("/api/users/{GUEST_USER_ID}/deseos");
        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<Deseo>>().await {
                Ok(list) => set_deseos.set(list),
                Err(e) => log!("[APP] Failed to decode deseos: {}", e),
            },
            Err(e) => log!("[APP] Failed to fetch deseos: {}", e),
        }
    };

    // Initial load, runs client-side only. Catalog and wishlist are
    // independent, so they load in parallel.
    create_effect(move |_| {
        spawn_local(async move {
            future::join(fetch_products(), fetch_deseos()).await;
        });
    });

    // Function to handle adding a new product to the catalog.
    let add_product = move |name: String, description: String, price: String, category: String| {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            price,
            image: String::new(),
            category,
        };
        spawn_local(async move {
            let request = match Request::post("/api/products").json(&product) {
                Ok(request) => request,
                Err(e) => {
                    log!("[APP] Failed to encode product: {}", e);
                    return;
                }
            };
            match request.send().await {
                Ok(response) if response.ok() => {
                    set_products.update(|products| products.push(product))
                }
                Ok(response) => log!("[APP] Product rejected with status {}", response.status()),
                Err(e) => log!("[APP] Failed to save product: {}", e),
            }
        });
    };

    // Pick a product and pull its reviews.
    let select_product = Callback::new(move |product_id: String| {
        set_selected_product.set(Some(product_id.clone()));
        spawn_local(async move {
            let url = format!("/api/products/{product_id}/reviews");
            match Request::get(&url).send().await {
                Ok(response) => match response.json::<Vec<Review>>().await {
                    Ok(list) => set_reviews.set(list),
                    Err(e) => log!("[APP] Failed to decode reviews: {}", e),
                },
                Err(e) => log!("[APP] Failed to fetch reviews: {}", e),
            }
        });
    });

    let submit_review = Callback::new(move |(content, rating): (String, u8)| {
        let Some(product_id) = selected_product.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let url = format!("/api/products/{product_id}/reviews");
            let body = json!({
                "user_id": GUEST_USER_ID,
                "rating": rating,
                "content": content,
            });
            let request = match Request::post(&url).json(&body) {
                Ok(request) => request,
                Err(e) => {
                    log!("[APP] Failed to encode review: {}", e);
                    return;
                }
            };
            match request.send().await {
                Ok(response) if response.ok() => match response.json::<Review>().await {
                    Ok(review) => set_reviews.update(|reviews| reviews.insert(0, review)),
                    Err(e) => log!("[APP] Failed to decode review: {}", e),
                },
                Ok(response) => log!("[APP] Review rejected with status {}", response.status()),
                Err(e) => log!("[APP] Failed to save review: {}", e),
            }
        });
    });

    let save_deseo = Callback::new(move |product_id: String| {
        spawn_local(async move {
            let url = format!("/api/users/{GUEST_USER_ID}/deseos");
            let body = json!({ "product_id": product_id });
            let request = match Request::post(&url).json(&body) {
                Ok(request) => request,
                Err(e) => {
                    log!("[APP] Failed to encode deseo: {}", e);
                    return;
                }
            };
            match request.send().await {
                Ok(response) if response.ok() => fetch_deseos().await,
                Ok(response) => log!("[APP] Deseo rejected with status {}", response.status()),
                Err(e) => log!("[APP] Failed to save deseo: {}", e),
            }
        });
    });

    let remove_deseo = Callback::new(move |product_id: String| {
        spawn_local(async move {
            let url = format!("/api/users/{GUEST_USER_ID}/deseos/{product_id}");
            match Request::delete(&url).send().await {
                Ok(response) if response.ok() => {
                    set_deseos.update(|deseos| deseos.retain(|d| d.product_id != product_id))
                }
                Ok(response) => log!("[APP] Deseo removal status {}", response.status()),
                Err(e) => log!("[APP] Failed to remove deseo: {}", e),
            }
        });
    });

    let deseo_to_cauldron = Callback::new(move |product_id: String| {
        let catalog = products.get_untracked();
        if let Some(product) = catalog.iter().find(|p| p.id == product_id) {
            cauldron.add(product);
        }
    });

    let on_paid = Callback::new(move |order: Order| {
        log!("[APP] Order {} paid", order.id);
        set_last_order.set(Some(order));
    });

    let checkout_ref = create_node_ref::<html::Div>();

    view! {
        <div>
            <h1>{ "Cauldronware" }</h1>
            // Form component for adding new products.
            <ProductForm on_submit=Box::new(add_product) />
            // Component to display the catalog.
            <ProductsList
                products=products
                cauldron=cauldron
                on_save_deseo=save_deseo
                on_select=select_product
            />
            // Reviews for the selected product.
            {move || selected_product.get().map(|_| view! {
                <div>
                    <ReviewsList reviews=reviews />
                    <ReviewForm on_submit=submit_review />
                </div>
            })}
            <DeseosList
                deseos=deseos
                products=products
                on_remove=remove_deseo
                on_to_cauldron=deseo_to_cauldron
            />
            <CauldronView
                cauldron=cauldron
                currency=display_currency
                set_currency=set_display_currency
            />
            <CheckoutButton
                cauldron=cauldron
                user_id=GUEST_USER_ID.to_string()
                currency=display_currency
                on_paid=on_paid
                node_ref=checkout_ref
            />
            {move || last_order.get().map(|order| view! {
                <p>{ format!("Order {} confirmed - total {}", order.id, order.total) }</p>
            })}
        </div>
    }
}
