use serde::Serialize;

/// Crate-wide error type. Every fallible function returns `Result<T, HubError>`.
/// Serializes as `{ error, kind }` so dashboard consumers get structured errors.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("All backend candidates failed: {0}")]
    Unreachable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl Serialize for HubError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("HubError", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field(
            "kind",
            match self {
                HubError::Http(_) => "http",
                HubError::Serde(_) => "serde",
                HubError::Backend { .. } => "backend",
                HubError::Unreachable(_) => "unreachable",
                HubError::Validation(_) => "validation",
                HubError::Internal(_) => "internal",
            },
        )?;
        s.end()
    }
}
