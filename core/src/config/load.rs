use std::path::Path;

use super::types::AppConfig;
use crate::error::ConfigError;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "firedrop.toml";

pub const ENV_BASE_URL: &str = "FIREDROP_BASE_URL";
pub const ENV_API_KEY: &str = "FIREDROP_API_KEY";
pub const ENV_SEPARATOR: &str = "FIREDROP_SEPARATOR";

/// Parse a config file. Missing sections fall back to defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let display = path.display().to_string();
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// Load `./firedrop.toml` when present, otherwise defaults, then apply
/// environment overrides on top.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let local = Path::new(CONFIG_FILE);
    let mut cfg = if local.exists() {
        load_from(local)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (highest priority)
    if let Ok(v) = std::env::var(ENV_BASE_URL) {
        if !v.trim().is_empty() {
            cfg.service.base_url = v;
        }
    }
    if let Ok(v) = std::env::var(ENV_API_KEY) {
        if !v.trim().is_empty() {
            cfg.service.api_key = v;
        }
    }
    // A separator may legitimately be whitespace, so only skip empty values.
    if let Ok(v) = std::env::var(ENV_SEPARATOR) {
        if !v.is_empty() {
            cfg.segmentation.separator = v;
        }
    }

    Ok(cfg)
}

/// Where to authorize an API key for the service behind `base_url`:
/// the dataset console on the same host.
pub fn authorize_hint(base_url: &str) -> String {
    match reqwest::Url::parse(base_url) {
        Ok(url) => format!(
            "{}/datasets?category=api",
            url.origin().ascii_serialization()
        ),
        Err(_) => base_url.trim_end_matches('/').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn load_from_reads_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
            [service]
            base_url = "http://kb.local/v1/"
            api_key = "dataset-xyz"
            timeout_ms = 5000

            [segmentation]
            separator = "\n===\n"
            max_tokens = 800

            [logging]
            level = "debug"
            "#
        )
        .unwrap();

        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.service.base_url, "http://kb.local/v1/");
        assert_eq!(cfg.service.api_key, "dataset-xyz");
        assert_eq!(cfg.service.timeout_ms, 5000);
        assert_eq!(cfg.segmentation.separator, "\n===\n");
        assert_eq!(cfg.segmentation.max_tokens, 800);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn load_from_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[service\nbase_url = 1").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_win_over_defaults() {
        // The only test touching FIREDROP_* variables, so no races with
        // parallel tests.
        std::env::set_var(ENV_BASE_URL, "http://override.local/v1");
        std::env::set_var(ENV_API_KEY, "from-env");
        std::env::set_var(ENV_SEPARATOR, "\n\n");
        let cfg = load_default().unwrap();
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_SEPARATOR);

        assert_eq!(cfg.service.base_url, "http://override.local/v1");
        assert_eq!(cfg.service.api_key, "from-env");
        assert_eq!(cfg.segmentation.separator, "\n\n");
    }

    #[test]
    fn authorize_hint_strips_api_path() {
        assert_eq!(
            authorize_hint("http://192.168.1.180/v1"),
            "http://192.168.1.180/datasets?category=api"
        );
        assert_eq!(
            authorize_hint("https://kb.example.com:8443/v1/"),
            "https://kb.example.com:8443/datasets?category=api"
        );
    }

    #[test]
    fn authorize_hint_falls_back_on_unparsable_url() {
        assert_eq!(authorize_hint("not a url/"), "not a url");
    }
}
