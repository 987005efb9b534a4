use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Product {
    pub id: String,          // Unique ID for the product
    pub name: String,        // Product name
    pub description: String, // Short description shown on the detail page
    pub price: String,       // Display price with currency marker, e.g. "12,50€" or "$14.99"
    pub image: String,       // Asset path for the product picture
    pub category: String,    // Shop section, e.g. "potions" or "amulets"
}
