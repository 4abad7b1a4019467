use thiserror::Error;

pub type Result<T> = std::result::Result<T, AmbitError>;

#[derive(Debug, Error)]
pub enum AmbitError {
    #[error("No explicit binding for key: {key}")]
    NotBound { key: String },

    #[error("No ambient container is in scope")]
    NoAmbientContainer,

    #[error("Invalid value for {var}: {message}")]
    InvalidConfig { var: String, message: String },
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AmbitError {
    fn into_response(self) -> axum::response::Response {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            self.to_string(),
        )
            .into_response()
    }
}
