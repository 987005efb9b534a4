use serde::{Deserialize, Serialize};

/// A wishlist entry ("deseo"): a product a user saved to buy later.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Deseo {
    pub user_id: String,
    pub product_id: String,
    pub added_at: String, // RFC 3339 timestamp set by the server
}
