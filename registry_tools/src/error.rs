use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Registry request failed: {0}")]
    RequestError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
}
