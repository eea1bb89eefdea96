use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid event type: {0}. Must be one of: email_click, landing_click, conversion, unsubscribe")]
    InvalidEventType(String),
}
