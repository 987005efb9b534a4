// src/models/review.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Review {
    pub id: String,         // Unique ID for the review
    pub product_id: String, // ID of the product the review is associated with
    pub user_id: String,    // ID of the user who submitted the review
    pub rating: u8,         // Star rating, 1 to 5
    pub content: String,    // Content of the review
    pub created_at: String, // RFC 3339 timestamp set by the server
}
