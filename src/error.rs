#[derive(thiserror::Error, Debug)]
pub enum BigQueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Authentication error (error: {0})")]
    YupAuthError(#[from] yup_oauth2::Error),
    #[error("Failed to read credentials (error: {0})")]
    CredentialsError(#[from] std::io::Error),
    #[error("Request to google api error (error: {0})")]
    ApiRequestError(#[from] reqwest::Error),
    #[error("Google api returned status {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Json error (error: {0})")]
    JsonError(#[from] serde_json::Error),
}

impl BigQueryError {
    /// Whether resubmitting the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            BigQueryError::ApiRequestError(err) => err.is_timeout() || err.is_connect(),
            BigQueryError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses() {
        let err = |status| BigQueryError::ApiError {
            status,
            message: "boom".into(),
        };
        assert!(err(429).is_transient());
        assert!(err(503).is_transient());
        assert!(!err(400).is_transient());
        assert!(!err(404).is_transient());
        assert!(!BigQueryError::InvalidArgument("empty".into()).is_transient());
        assert!(!BigQueryError::JsonError(serde_json::from_str::<u8>("x").unwrap_err()).is_transient());
    }
}
