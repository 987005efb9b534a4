use serde::{Deserialize, Serialize};

/// Lifecycle of an order as the payment flow advances.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// One purchased product inside an order. Name and unit price are
/// snapshots taken at checkout time, so later catalog edits do not
/// rewrite order history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: String, // Display price at checkout time, e.g. "12,50€"
    pub quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub total: String,    // Display total in the order's currency
    pub currency: String, // ISO code the total is expressed in: "EUR", "USD", "GBP"
    pub status: OrderStatus,
    pub created_at: String, // RFC 3339 timestamp set by the server
}
