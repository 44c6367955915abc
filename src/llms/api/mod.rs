// Internal modules
mod client;
mod config;
mod error;

// Public modules
pub mod deepseek;

// Public exports
pub use config::{ApiConfig, LlmApiConfigTrait};
pub use error::{ApiError, ClientError};
