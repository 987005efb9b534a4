#[cfg(feature = "ssr")]
mod error_impl {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};
    use thiserror::Error;

    /// Failures surfaced by the store API. Every handler funnels into the
    /// same status mapping: missing rows give 404, validation problems and
    /// duplicates give 400, anything from the database gives 500 with the
    /// raw error text as the body.
    #[derive(Error, Debug)]
    pub enum StoreError {
        #[error("not found")]
        NotFound,

        #[error("{0}")]
        Validation(String),

        #[error("{0}")]
        Conflict(String),

        #[error("Database error: {0}")]
        Database(#[from] rusqlite::Error),
    }

    impl StoreError {
        pub fn status(&self) -> StatusCode {
            match self {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Validation(_) | StoreError::Conflict(_) => StatusCode::BAD_REQUEST,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl ResponseError for StoreError {
        fn status_code(&self) -> StatusCode {
            self.status()
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status()).body(self.to_string())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_status_mapping() {
            assert_eq!(StoreError::NotFound.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                StoreError::Validation("rating must be between 1 and 5".into()).status(),
                StatusCode::BAD_REQUEST
            );
            assert_eq!(
                StoreError::Conflict("user already reviewed this product".into()).status(),
                StatusCode::BAD_REQUEST
            );
            assert_eq!(
                StoreError::Database(rusqlite::Error::QueryReturnedNoRows).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }

        #[test]
        fn test_body_is_raw_message() {
            let err = StoreError::Validation("quantity must be positive".into());
            assert_eq!(err.to_string(), "quantity must be positive");
        }
    }
}

#[cfg(feature = "ssr")]
pub use error_impl::StoreError;
