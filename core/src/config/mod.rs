//! Configuration loading and types.

pub mod load;
pub mod types;

pub use load::{authorize_hint, load_default, load_from, CONFIG_FILE};
pub use load::{ENV_API_KEY, ENV_BASE_URL, ENV_SEPARATOR};
pub use types::{AppConfig, LoggingConfig, SegmentationConfig, ServiceConfig};
