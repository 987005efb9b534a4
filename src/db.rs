#[cfg(feature = "ssr")]
mod db_impl {
    use crate::currency::{self, Currency};
    use crate::error::StoreError;
    use crate::models::deseo::Deseo;
    use crate::models::order::{Order, OrderLine, OrderStatus};
    use crate::models::product::Product;
    use crate::models::review::Review;
    use crate::models::user::User;
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::Connection;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[cfg(test)]
    mod tests {
        use super::*;
        use uuid::Uuid;

        // Helper function to create test database
        async fn create_test_db() -> Database {
            log!("[TEST] Creating in-memory test database");
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            log!("[TEST] Database schema created");
            db
        }

        fn test_product(name: &str, price: &str) -> Product {
            Product {
                id: Uuid::new_v4().to_string(),
                name: name.into(),
                description: "A very potent brew".into(),
                price: price.into(),
                image: "assets/brew.png".into(),
                category: "potions".into(),
            }
        }

        fn test_user(username: &str) -> User {
            User {
                id: Uuid::new_v4().to_string(),
                username: username.into(),
                email: format!("{username}@coven.example"),
                password_hash: "hashed".into(),
            }
        }

        // Test database schema creation
        #[tokio::test]
        async fn test_schema_creation() {
            log!("[TEST] Starting test_schema_creation");
            let db = create_test_db().await;

            // Verify tables exist
            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

            assert!(tables.contains(&"products".to_string()));
            assert!(tables.contains(&"users".to_string()));
            assert!(tables.contains(&"reviews".to_string()));
            assert!(tables.contains(&"orders".to_string()));
            assert!(tables.contains(&"order_lines".to_string()));
            assert!(tables.contains(&"deseos".to_string()));
        }

        // Product lifecycle tests
        #[tokio::test]
        async fn test_full_product_lifecycle() {
            log!("[TEST] Starting test_full_product_lifecycle");
            let db = create_test_db().await;
            let product = test_product("Mandrake Elixir", "12,50€");

            // Test insertion
            log!("[TEST] Testing product insertion");
            db.upsert_product(&product).await.unwrap();
            let products = db.get_products().await.unwrap();
            assert_eq!(products.len(), 1);
            assert_eq!(products[0].name, "Mandrake Elixir");
            log!("[TEST] Product insertion - PASSED");

            // Test upsert update
            log!("[TEST] Testing product update");
            let mut updated = product.clone();
            updated.price = "14,00€".into();
            db.upsert_product(&updated).await.unwrap();
            let fetched = db.get_product(&product.id).await.unwrap();
            assert_eq!(fetched.price, "14,00€");
            log!("[TEST] Product update - PASSED");

            // Test deletion
            log!("[TEST] Testing product deletion");
            db.delete_product(&product.id).await.unwrap();
            assert!(matches!(
                db.get_product(&product.id).await,
                Err(StoreError::NotFound)
            ));
            log!("[TEST] Product deletion - PASSED");
        }

        #[tokio::test]
        async fn test_missing_product_is_not_found() {
            let db = create_test_db().await;
            assert!(matches!(
                db.get_product("no-such-id").await,
                Err(StoreError::NotFound)
            ));
            assert!(matches!(
                db.delete_product("no-such-id").await,
                Err(StoreError::NotFound)
            ));
        }

        // User uniqueness tests
        #[tokio::test]
        async fn test_duplicate_username_rejected() {
            log!("[TEST] Starting test_duplicate_username_rejected");
            let db = create_test_db().await;
            let user = test_user("morgana");
            db.create_user(&user).await.unwrap();

            let mut twin = test_user("morgana");
            twin.email = "other@coven.example".into();
            assert!(matches!(
                db.create_user(&twin).await,
                Err(StoreError::Conflict(_))
            ));
            log!("[TEST] Duplicate username rejection - PASSED");
        }

        // Review constraint tests
        #[tokio::test]
        async fn test_review_constraints() {
            log!("[TEST] Starting test_review_constraints");
            let db = create_test_db().await;
            let product = test_product("Black Salt", "4,00€");
            let user = test_user("circe");
            db.upsert_product(&product).await.unwrap();
            db.create_user(&user).await.unwrap();

            // Rating out of range
            for rating in [0u8, 6u8] {
                assert!(matches!(
                    db.insert_review(&product.id, &user.id, rating, "meh")
                        .await,
                    Err(StoreError::Validation(_))
                ));
            }
            log!("[TEST] Rating range check - PASSED");

            // Review against a missing product
            assert!(matches!(
                db.insert_review("no-such-product", &user.id, 4, "ok").await,
                Err(StoreError::NotFound)
            ));

            // Review from an unknown user fails validation, not as a duplicate
            assert!(matches!(
                db.insert_review(&product.id, "no-such-user", 4, "ok").await,
                Err(StoreError::Validation(_))
            ));

            // First review goes through
            let review = db
                .insert_review(&product.id, &user.id, 5, "Kept my hexes fresh")
                .await
                .unwrap();
            assert_eq!(review.rating, 5);

            // Second review from the same user is a duplicate
            assert!(matches!(
                db.insert_review(&product.id, &user.id, 3, "changed my mind")
                    .await,
                Err(StoreError::Conflict(_))
            ));
            log!("[TEST] Duplicate review rejection - PASSED");

            let reviews = db.get_reviews_for_product(&product.id).await.unwrap();
            assert_eq!(reviews.len(), 1);

            db.delete_review(&review.id).await.unwrap();
            assert!(db
                .get_reviews_for_product(&product.id)
                .await
                .unwrap()
                .is_empty());
        }

        // Order creation tests
        #[tokio::test]
        async fn test_order_total_recomputed() {
            log!("[TEST] Starting test_order_total_recomputed");
            let db = create_test_db().await;
            let user = test_user("baba");
            db.create_user(&user).await.unwrap();

            let lines = vec![
                OrderLine {
                    product_id: Uuid::new_v4().to_string(),
                    product_name: "Mandrake Elixir".into(),
                    unit_price: "10,00€".into(),
                    quantity: 2,
                },
                OrderLine {
                    product_id: Uuid::new_v4().to_string(),
                    product_name: "Imported Sage".into(),
                    unit_price: "$10.80".into(),
                    quantity: 1,
                },
            ];

            let order = db
                .create_order(&user.id, &lines, Currency::Eur)
                .await
                .unwrap();
            // 2 x 10,00€ plus $10.80 converted at the fixed rate.
            assert_eq!(order.total, "30,00€");
            assert_eq!(order.status, OrderStatus::Pending);
            log!("[TEST] Total recomputation - PASSED");

            let fetched = db.get_order(&order.id).await.unwrap();
            assert_eq!(fetched.lines.len(), 2);
            assert_eq!(fetched.total, order.total);

            let for_user = db.get_orders_for_user(&user.id).await.unwrap();
            assert_eq!(for_user.len(), 1);

            db.update_order_status(&order.id, OrderStatus::Paid)
                .await
                .unwrap();
            let paid = db.get_order(&order.id).await.unwrap();
            assert_eq!(paid.status, OrderStatus::Paid);
        }

        #[tokio::test]
        async fn test_order_validation() {
            let db = create_test_db().await;
            let user = test_user("hekate");
            db.create_user(&user).await.unwrap();

            // Empty orders are rejected
            assert!(matches!(
                db.create_order(&user.id, &[], Currency::Eur).await,
                Err(StoreError::Validation(_))
            ));

            // Zero quantities are rejected
            let lines = vec![OrderLine {
                product_id: Uuid::new_v4().to_string(),
                product_name: "Nothing".into(),
                unit_price: "1,00€".into(),
                quantity: 0,
            }];
            assert!(matches!(
                db.create_order(&user.id, &lines, Currency::Eur).await,
                Err(StoreError::Validation(_))
            ));

            // Unparseable prices are rejected
            let lines = vec![OrderLine {
                product_id: Uuid::new_v4().to_string(),
                product_name: "Mystery".into(),
                unit_price: "three beans".into(),
                quantity: 1,
            }];
            assert!(matches!(
                db.create_order(&user.id, &lines, Currency::Eur).await,
                Err(StoreError::Validation(_))
            ));
        }

        // Wishlist tests
        #[tokio::test]
        async fn test_deseo_idempotency() {
            log!("[TEST] Starting test_deseo_idempotency");
            let db = create_test_db().await;
            let user = test_user("yaga");
            let product = test_product("Crow Feather", "2,00€");
            db.create_user(&user).await.unwrap();
            db.upsert_product(&product).await.unwrap();

            db.add_deseo(&user.id, &product.id).await.unwrap();
            // Saving the same product twice keeps a single row
            db.add_deseo(&user.id, &product.id).await.unwrap();

            let deseos = db.get_deseos_for_user(&user.id).await.unwrap();
            assert_eq!(deseos.len(), 1);
            assert_eq!(deseos[0].product_id, product.id);
            log!("[TEST] Deseo idempotency - PASSED");

            db.remove_deseo(&user.id, &product.id).await.unwrap();
            assert!(db.get_deseos_for_user(&user.id).await.unwrap().is_empty());
            assert!(matches!(
                db.remove_deseo(&user.id, &product.id).await,
                Err(StoreError::NotFound)
            ));
        }
    }

    // Define a struct to represent a database connection
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }

    fn now_rfc3339() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, rusqlite::Error> {
            let conn = Connection::open(db_path)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;

            // 1. Users table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    username TEXT NOT NULL UNIQUE,
                    email TEXT NOT NULL UNIQUE,
                    password_hash TEXT NOT NULL
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating users table: {}", e);
                e
            })?;

            // 2. Products table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS products (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    price TEXT NOT NULL,
                    image TEXT NOT NULL DEFAULT '',
                    category TEXT NOT NULL DEFAULT ''
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating products table: {}", e);
                e
            })?;

            // 3. Reviews table, one review per user and product
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    product_id TEXT NOT NULL,
                    user_id TEXT NOT NULL,
                    rating INTEGER NOT NULL,
                    content TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL,
                    UNIQUE (product_id, user_id),
                    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating reviews table: {}", e);
                e
            })?;

            // 4. Orders table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS orders (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    total TEXT NOT NULL,
                    currency TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'pending',
                    created_at TEXT NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating orders table: {}", e);
                e
            })?;

            // 5. Order lines with name/price snapshots
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS order_lines (
                    order_id TEXT NOT NULL,
                    product_id TEXT NOT NULL,
                    product_name TEXT NOT NULL,
                    unit_price TEXT NOT NULL,
                    quantity INTEGER NOT NULL,
                    PRIMARY KEY (order_id, product_id),
                    FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating order_lines table: {}", e);
                e
            })?;

            // 6. Wishlist table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS deseos (
                    user_id TEXT NOT NULL,
                    product_id TEXT NOT NULL,
                    added_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, product_id),
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating deseos table: {}", e);
                e
            })?;
            Ok(())
        }

        // ---- Products ----

        // Insert a product, or update it in place when the id already exists
        pub async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            log!("[DB] Upserting product {}", product.id);
            conn.execute(
                "INSERT INTO products (id, name, description, price, image, category)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    price = excluded.price,
                    image = excluded.image,
                    category = excluded.category",
                rusqlite::params![
                    &product.id,
                    &product.name,
                    &product.description,
                    &product.price,
                    &product.image,
                    &product.category
                ],
            )?;
            Ok(())
        }

        pub async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, description, price, image, category
                 FROM products ORDER BY name ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    price: row.get(3)?,
                    image: row.get(4)?,
                    category: row.get(5)?,
                })
            })?;

            let mut products = Vec::new();
            for row in rows {
                products.push(row?);
            }
            logging::log!("Fetched {} products from the database", products.len());
            Ok(products)
        }

        pub async fn get_product(&self, product_id: &str) -> Result<Product, StoreError> {
            let conn = self.conn.lock().await;
            match conn.query_row(
                "SELECT id, name, description, price, image, category
                 FROM products WHERE id = ?",
                [product_id],
                |row| {
                    Ok(Product {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        price: row.get(3)?,
                        image: row.get(4)?,
                        category: row.get(5)?,
                    })
                },
            ) {
                Ok(product) => Ok(product),
                Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound),
                Err(e) => Err(e.into()),
            }
        }

        pub async fn delete_product(&self, product_id: &str) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute("DELETE FROM products WHERE id = ?", [product_id])?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            logging::log!("Product deleted: {}", product_id);
            Ok(())
        }

        // ---- Users ----

        pub async fn create_user(&self, user: &User) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO users (id, username, email, password_hash) VALUES (?, ?, ?, ?)",
                rusqlite::params![&user.id, &user.username, &user.email, &user.password_hash],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict("username or email already taken".into())
                } else {
                    e.into()
                }
            })?;
            logging::log!("User created: {}", user.username);
            Ok(())
        }

        pub async fn get_users(&self) -> Result<Vec<User>, StoreError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT id, username, email, password_hash FROM users ORDER BY username")?;
            let rows = stmt.query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    password_hash: row.get(3)?,
                })
            })?;

            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        }

        pub async fn get_user(&self, user_id: &str) -> Result<User, StoreError> {
            let conn = self.conn.lock().await;
            match conn.query_row(
                "SELECT id, username, email, password_hash FROM users WHERE id = ?",
                [user_id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                    })
                },
            ) {
                Ok(user) => Ok(user),
                Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound),
                Err(e) => Err(e.into()),
            }
        }

        pub async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute("DELETE FROM users WHERE id = ?", [user_id])?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            logging::log!("User deleted: {}", user_id);
            Ok(())
        }

        // ---- Reviews ----

        // Insert a review after checking the rating range, that the product
        // exists, and that this user has not reviewed it before
        pub async fn insert_review(
            &self,
            product_id: &str,
            user_id: &str,
            rating: u8,
            content: &str,
        ) -> Result<Review, StoreError> {
            if !(1..=5).contains(&rating) {
                return Err(StoreError::Validation(
                    "rating must be between 1 and 5".into(),
                ));
            }

            let conn = self.conn.lock().await;

            let product_exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)",
                [product_id],
                |row| row.get(0),
            )?;
            if !product_exists {
                return Err(StoreError::NotFound);
            }

            // Checked up front so an unknown reviewer does not surface as a
            // duplicate-review conflict when the FK trips
            let user_exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
                [user_id],
                |row| row.get(0),
            )?;
            if !user_exists {
                return Err(StoreError::Validation("unknown user".into()));
            }

            let review = Review {
                id: uuid::Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                user_id: user_id.to_string(),
                rating,
                content: content.to_string(),
                created_at: now_rfc3339(),
            };

            conn.execute(
                "INSERT INTO reviews (id, product_id, user_id, rating, content, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    &review.id,
                    &review.product_id,
                    &review.user_id,
                    review.rating,
                    &review.content,
                    &review.created_at
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict("user already reviewed this product".into())
                } else {
                    e.into()
                }
            })?;

            log!("[DB] Review {} stored for product {}", review.id, product_id);
            Ok(review)
        }

        pub async fn get_reviews_for_product(
            &self,
            product_id: &str,
        ) -> Result<Vec<Review>, StoreError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, product_id, user_id, rating, content, created_at
                 FROM reviews WHERE product_id = ? ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map([product_id], |row| {
                Ok(Review {
                    id: row.get(0)?,
                    product_id: row.get(1)?,
                    user_id: row.get(2)?,
                    rating: row.get(3)?,
                    content: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;

            let mut reviews = Vec::new();
            for row in rows {
                reviews.push(row?);
            }
            Ok(reviews)
        }

        pub async fn delete_review(&self, review_id: &str) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute("DELETE FROM reviews WHERE id = ?", [review_id])?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        }

        // ---- Orders ----

        // Create an order and its lines in one transaction. The total is
        // recomputed here from the line snapshots; whatever the client
        // showed is advisory only.
        pub async fn create_order(
            &self,
            user_id: &str,
            lines: &[OrderLine],
            currency: Currency,
        ) -> Result<Order, StoreError> {
            if lines.is_empty() {
                return Err(StoreError::Validation("order has no lines".into()));
            }
            if lines.iter().any(|line| line.quantity == 0) {
                return Err(StoreError::Validation(
                    "line quantities must be positive".into(),
                ));
            }

            let total_cents = currency::total_in(
                lines
                    .iter()
                    .map(|line| (line.unit_price.as_str(), line.quantity)),
                currency,
            )
            .ok_or_else(|| StoreError::Validation("unparseable line price".into()))?;
            let total = currency::format_price(total_cents, currency);

            let mut conn = self.conn.lock().await;

            let user_exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
                [user_id],
                |row| row.get(0),
            )?;
            if !user_exists {
                return Err(StoreError::Validation("unknown user".into()));
            }

            let order = Order {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                lines: lines.to_vec(),
                total,
                currency: currency.code().to_string(),
                status: OrderStatus::Pending,
                created_at: now_rfc3339(),
            };

            log!("[DB] Starting transaction for order {}", order.id);
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO orders (id, user_id, total, currency, status, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    &order.id,
                    &order.user_id,
                    &order.total,
                    &order.currency,
                    order.status.as_str(),
                    &order.created_at
                ],
            )?;
            for line in &order.lines {
                tx.execute(
                    "INSERT INTO order_lines (order_id, product_id, product_name, unit_price, quantity)
                     VALUES (?, ?, ?, ?, ?)
                     ON CONFLICT(order_id, product_id) DO UPDATE SET
                        quantity = quantity + excluded.quantity",
                    rusqlite::params![
                        &order.id,
                        &line.product_id,
                        &line.product_name,
                        &line.unit_price,
                        line.quantity
                    ],
                )?;
            }
            tx.commit()?;
            log!("[DB] Order {} committed, total {}", order.id, order.total);

            Ok(order)
        }

        fn order_lines(
            conn: &Connection,
            order_id: &str,
        ) -> Result<Vec<OrderLine>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT product_id, product_name, unit_price, quantity
                 FROM order_lines WHERE order_id = ?",
            )?;
            let rows = stmt.query_map([order_id], |row| {
                Ok(OrderLine {
                    product_id: row.get(0)?,
                    product_name: row.get(1)?,
                    unit_price: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?;
            rows.collect()
        }

        fn order_from_row(row: &rusqlite::Row<'_>) -> Result<Order, rusqlite::Error> {
            let status_raw: String = row.get(4)?;
            Ok(Order {
                id: row.get(0)?,
                user_id: row.get(1)?,
                lines: Vec::new(),
                total: row.get(2)?,
                currency: row.get(3)?,
                status: OrderStatus::parse(&status_raw).unwrap_or(OrderStatus::Pending),
                created_at: row.get(5)?,
            })
        }

        pub async fn get_order(&self, order_id: &str) -> Result<Order, StoreError> {
            let conn = self.conn.lock().await;
            let mut order = match conn.query_row(
                "SELECT id, user_id, total, currency, status, created_at
                 FROM orders WHERE id = ?",
                [order_id],
                Self::order_from_row,
            ) {
                Ok(order) => order,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StoreError::NotFound),
                Err(e) => return Err(e.into()),
            };
            order.lines = Self::order_lines(&conn, order_id)?;
            Ok(order)
        }

        pub async fn get_orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, user_id, total, currency, status, created_at
                 FROM orders WHERE user_id = ? ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map([user_id], Self::order_from_row)?;

            let mut orders = Vec::new();
            for row in rows {
                orders.push(row?);
            }
            for order in &mut orders {
                order.lines = Self::order_lines(&conn, &order.id)?;
            }
            Ok(orders)
        }

        pub async fn update_order_status(
            &self,
            order_id: &str,
            status: OrderStatus,
        ) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            let updated = conn.execute(
                "UPDATE orders SET status = ? WHERE id = ?",
                rusqlite::params![status.as_str(), order_id],
            )?;
            if updated == 0 {
                return Err(StoreError::NotFound);
            }
            log!("[DB] Order {} moved to {}", order_id, status.as_str());
            Ok(())
        }

        // ---- Deseos (wishlist) ----

        // Saving the same product twice is a no-op
        pub async fn add_deseo(&self, user_id: &str, product_id: &str) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;

            let product_exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)",
                [product_id],
                |row| row.get(0),
            )?;
            if !product_exists {
                return Err(StoreError::NotFound);
            }

            conn.execute(
                "INSERT OR IGNORE INTO deseos (user_id, product_id, added_at) VALUES (?, ?, ?)",
                rusqlite::params![user_id, product_id, now_rfc3339()],
            )?;
            Ok(())
        }

        pub async fn get_deseos_for_user(&self, user_id: &str) -> Result<Vec<Deseo>, StoreError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT user_id, product_id, added_at
                 FROM deseos WHERE user_id = ? ORDER BY added_at DESC",
            )?;
            let rows = stmt.query_map([user_id], |row| {
                Ok(Deseo {
                    user_id: row.get(0)?,
                    product_id: row.get(1)?,
                    added_at: row.get(2)?,
                })
            })?;

            let mut deseos = Vec::new();
            for row in rows {
                deseos.push(row?);
            }
            Ok(deseos)
        }

        pub async fn remove_deseo(
            &self,
            user_id: &str,
            product_id: &str,
        ) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            let deleted = conn.execute(
                "DELETE FROM deseos WHERE user_id = ? AND product_id = ?",
                rusqlite::params![user_id, product_id],
            )?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
