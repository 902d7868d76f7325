use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub segmentation: SegmentationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            segmentation: SegmentationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// API root including the version prefix, e.g. "http://kb.local/v1".
    #[serde(default = "default_service_base_url")]
    pub base_url: String,

    /// Bearer token. Empty means unconfigured, which is fatal at client
    /// construction.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_service_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_service_base_url() -> String {
    "http://localhost/v1".to_string()
}

fn default_service_timeout_ms() -> u64 {
    30_000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_service_base_url(),
            api_key: "".to_string(),
            timeout_ms: default_service_timeout_ms(),
        }
    }
}

/// How the service chunks pushed text into segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Chunk boundary marker inside the card text.
    #[serde(default = "default_segmentation_separator")]
    pub separator: String,

    #[serde(default = "default_segmentation_max_tokens")]
    pub max_tokens: u32,
}

fn default_segmentation_separator() -> String {
    "\n\n------------\n\n".to_string()
}

fn default_segmentation_max_tokens() -> u32 {
    1000
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            separator: default_segmentation_separator(),
            max_tokens: default_segmentation_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "firedrop_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
