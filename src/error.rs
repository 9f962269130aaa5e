/// Error returned when loading or validating a [`crate::config::BoardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The raw text is not valid JSON for the config shape.
    #[error("failed to parse board config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field has a value the board cannot work with.
    #[error("invalid board config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}
