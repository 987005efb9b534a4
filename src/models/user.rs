use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,            // Unique ID for the user
    pub username: String,      // Unique handle shown next to reviews
    pub email: String,         // Unique email
    pub password_hash: String, // Opaque hash, produced elsewhere
}
