#[cfg(feature = "ssr")]
use crate::currency::Currency;
#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::error::StoreError;
#[cfg(feature = "ssr")]
use crate::models::order::{OrderLine, OrderStatus};
#[cfg(feature = "ssr")]
use crate::models::product::Product;
#[cfg(feature = "ssr")]
use crate::models::user::User;
#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse, ResponseError};
#[cfg(feature = "ssr")]
use leptos::logging::log;
#[cfg(feature = "ssr")]
use std::sync::Arc;
#[cfg(feature = "ssr")]
use tokio::sync::Mutex;

#[cfg(feature = "ssr")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct ReviewRequest {
    pub user_id: String,
    pub rating: u8,
    pub content: String,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: String,
    pub currency: String,
    pub lines: Vec<OrderLine>,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct OrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct DeseoRequest {
    pub product_id: String,
}

#[cfg(feature = "ssr")]
fn fail(context: &str, err: StoreError) -> HttpResponse {
    log!("[API] {}: {}", context, err);
    err.error_response()
}

// ---- Products ----

#[cfg(feature = "ssr")]
pub async fn get_products(db: web::Data<Arc<Mutex<Database>>>) -> HttpResponse {
    let db = db.lock().await;
    match db.get_products().await {
        Ok(products) => {
            log!("[API] Returning {} products", products.len());
            HttpResponse::Ok().json(products)
        }
        Err(err) => fail("Failed to fetch products", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_product(
    db: web::Data<Arc<Mutex<Database>>>,
    product_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.get_product(&product_id).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => fail("Failed to fetch product", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn create_product(
    db: web::Data<Arc<Mutex<Database>>>,
    product: web::Json<Product>,
) -> HttpResponse {
    let db = db.lock().await;
    let product = product.into_inner();
    log!("[API] Received product request - ID: {}", product.id);

    match db.upsert_product(&product).await {
        Ok(_) => {
            log!("[API] Successfully saved product ID: {}", product.id);
            HttpResponse::Ok().json(product)
        }
        Err(err) => fail("Failed to save product", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn update_product(
    db: web::Data<Arc<Mutex<Database>>>,
    product_id: web::Path<String>,
    product: web::Json<Product>,
) -> HttpResponse {
    let db = db.lock().await;
    let mut product = product.into_inner();
    // The path wins over whatever id travels in the body
    product.id = product_id.into_inner();

    // Updating a product that was never created is a 404, not an insert
    if let Err(err) = db.get_product(&product.id).await {
        return fail("Failed to update product", err);
    }
    match db.upsert_product(&product).await {
        Ok(_) => HttpResponse::Ok().json(product),
        Err(err) => fail("Failed to update product", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn delete_product(
    db: web::Data<Arc<Mutex<Database>>>,
    product_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.delete_product(&product_id).await {
        Ok(_) => HttpResponse::Ok().body("Product deleted"),
        Err(err) => fail("Failed to delete product", err),
    }
}

// ---- Reviews ----

#[cfg(feature = "ssr")]
pub async fn get_reviews(
    db: web::Data<Arc<Mutex<Database>>>,
    product_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.get_reviews_for_product(&product_id).await {
        Ok(reviews) => {
            log!(
                "[API] Returning {} reviews for product {}",
                reviews.len(),
                product_id
            );
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => fail("Failed to fetch reviews", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn create_review(
    db: web::Data<Arc<Mutex<Database>>>,
    product_id: web::Path<String>,
    request: web::Json<ReviewRequest>,
) -> HttpResponse {
    let db = db.lock().await;
    log!(
        "[API] Received review request - product: {}, user: {}, rating: {}",
        product_id,
        request.user_id,
        request.rating
    );

    match db
        .insert_review(
            &product_id,
            &request.user_id,
            request.rating,
            &request.content,
        )
        .await
    {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => fail("Failed to save review", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn delete_review(
    db: web::Data<Arc<Mutex<Database>>>,
    review_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.delete_review(&review_id).await {
        Ok(_) => HttpResponse::Ok().body("Review deleted"),
        Err(err) => fail("Failed to delete review", err),
    }
}

// ---- Users ----

#[cfg(feature = "ssr")]
pub async fn get_users(db: web::Data<Arc<Mutex<Database>>>) -> HttpResponse {
    let db = db.lock().await;
    match db.get_users().await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(err) => fail("Failed to fetch users", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_user(
    db: web::Data<Arc<Mutex<Database>>>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.get_user(&user_id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => fail("Failed to fetch user", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn create_user(
    db: web::Data<Arc<Mutex<Database>>>,
    request: web::Json<UserRequest>,
) -> HttpResponse {
    let db = db.lock().await;
    let request = request.into_inner();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username,
        email: request.email,
        password_hash: request.password_hash,
    };
    log!("[API] Received user request - username: {}", user.username);

    match db.create_user(&user).await {
        Ok(_) => HttpResponse::Ok().json(user),
        Err(err) => fail("Failed to create user", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn delete_user(
    db: web::Data<Arc<Mutex<Database>>>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.delete_user(&user_id).await {
        Ok(_) => HttpResponse::Ok().body("User deleted"),
        Err(err) => fail("Failed to delete user", err),
    }
}

// ---- Orders ----

#[cfg(feature = "ssr")]
pub async fn create_order(
    db: web::Data<Arc<Mutex<Database>>>,
    request: web::Json<OrderRequest>,
) -> HttpResponse {
    let db = db.lock().await;
    let request = request.into_inner();
    log!(
        "[API] Received order request - user: {}, {} lines, currency: {}",
        request.user_id,
        request.lines.len(),
        request.currency
    );

    let currency = match Currency::from_code(&request.currency) {
        Some(currency) => currency,
        None => {
            return fail(
                "Failed to create order",
                StoreError::Validation(format!("unsupported currency {}", request.currency)),
            )
        }
    };

    match db
        .create_order(&request.user_id, &request.lines, currency)
        .await
    {
        Ok(order) => {
            log!("[API] Order {} created, total {}", order.id, order.total);
            HttpResponse::Ok().json(order)
        }
        Err(err) => fail("Failed to create order", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_order(
    db: web::Data<Arc<Mutex<Database>>>,
    order_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.get_order(&order_id).await {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => fail("Failed to fetch order", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_orders_for_user(
    db: web::Data<Arc<Mutex<Database>>>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.get_orders_for_user(&user_id).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(err) => fail("Failed to fetch orders", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn update_order_status(
    db: web::Data<Arc<Mutex<Database>>>,
    order_id: web::Path<String>,
    request: web::Json<OrderStatusRequest>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.update_order_status(&order_id, request.status).await {
        Ok(_) => HttpResponse::Ok().body("Order updated"),
        Err(err) => fail("Failed to update order", err),
    }
}

// ---- Deseos ----

#[cfg(feature = "ssr")]
pub async fn get_deseos(
    db: web::Data<Arc<Mutex<Database>>>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.get_deseos_for_user(&user_id).await {
        Ok(deseos) => HttpResponse::Ok().json(deseos),
        Err(err) => fail("Failed to fetch deseos", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn add_deseo(
    db: web::Data<Arc<Mutex<Database>>>,
    user_id: web::Path<String>,
    request: web::Json<DeseoRequest>,
) -> HttpResponse {
    let db = db.lock().await;
    match db.add_deseo(&user_id, &request.product_id).await {
        Ok(_) => HttpResponse::Ok().body("Deseo saved"),
        Err(err) => fail("Failed to save deseo", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn remove_deseo(
    db: web::Data<Arc<Mutex<Database>>>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_id, product_id) = path.into_inner();
    let db = db.lock().await;
    match db.remove_deseo(&user_id, &product_id).await {
        Ok(_) => HttpResponse::Ok().body("Deseo removed"),
        Err(err) => fail("Failed to remove deseo", err),
    }
}
