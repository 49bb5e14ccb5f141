//! Configuration parsing – reads a KEY=VALUE file, then lets
//! `ALMANBAR_`-prefixed environment variables override any key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::i18n::Lang;

/// Prefix for environment overrides (`ALMANBAR_BACKEND_URL=...`).
const ENV_PREFIX: &str = "ALMANBAR_";

/// Settings for reaching the hosted backend and serving content.
#[derive(Debug, Clone)]
pub struct Config {
    // ── backend ──────────────────────────────────────────────────────
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub backend_url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    pub storage_bucket: String,
    /// `None` leaves requests without a timeout.
    pub request_timeout: Option<Duration>,

    // ── content ──────────────────────────────────────────────────────
    pub cache_ttl: Duration,
    pub default_lang: Lang,
}

impl Config {
    /// Default config path.
    pub fn default_path() -> PathBuf {
        std::env::var_os("ALMANBAR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/etc/almanbar/almanbar.conf"))
    }
}

/// Load the config file (if it exists) and apply environment overrides.
///
/// A missing file is fine as long as the environment supplies the
/// required keys; an unreadable one is an error.
pub fn load(path: &Path) -> Result<Config> {
    let mut map = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config: {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        parse_conf(&text)
    } else {
        info!("No config file at {}, using environment only", path.display());
        HashMap::new()
    };

    apply_env_overrides(&mut map, std::env::vars());
    from_map(&map)
}

/// Build a [`Config`] from already-merged keys.
fn from_map(map: &HashMap<String, String>) -> Result<Config> {
    let get = |key: &str| -> Option<String> { map.get(key).cloned().filter(|v| !v.is_empty()) };
    let get_u64 = |key: &str| -> Result<Option<u64>> {
        get(key)
            .map(|v| v.parse().with_context(|| format!("{key} must be a number, got {v:?}")))
            .transpose()
    };

    let Some(backend_url) = get("BACKEND_URL") else {
        bail!("BACKEND_URL is not set");
    };
    let Some(anon_key) = get("BACKEND_ANON_KEY") else {
        bail!("BACKEND_ANON_KEY is not set");
    };

    let default_lang = match get("DEFAULT_LANG") {
        Some(code) => Lang::from_code(&code)
            .with_context(|| format!("DEFAULT_LANG must be 'ar' or 'en', got {code:?}"))?,
        None => Lang::default(),
    };

    Ok(Config {
        backend_url: backend_url.trim_end_matches('/').to_string(),
        anon_key,
        storage_bucket: get("STORAGE_BUCKET").unwrap_or_else(|| "uploads".into()),
        request_timeout: get_u64("REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs),
        cache_ttl: Duration::from_secs(get_u64("CACHE_TTL_SECS")?.unwrap_or(60)),
        default_lang,
    })
}

/// Copy `ALMANBAR_<KEY>` variables over the file's keys.
fn apply_env_overrides(
    map: &mut HashMap<String, String>,
    vars: impl IntoIterator<Item = (String, String)>,
) {
    for (name, value) in vars {
        if let Some(key) = name.strip_prefix(ENV_PREFIX) {
            if key != "CONFIG" {
                map.insert(key.to_string(), value);
            }
        }
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, val)| (key.trim().to_string(), val.trim().trim_matches('"').to_string()))
        .collect()
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# hosted project
BACKEND_URL="https://demo.supabase.co/"
BACKEND_ANON_KEY=anon-123
CACHE_TTL_SECS=5
"#;

    #[test]
    fn test_parse_conf() {
        let map = parse_conf(SAMPLE);
        assert_eq!(map["BACKEND_URL"], "https://demo.supabase.co/");
        assert_eq!(map["BACKEND_ANON_KEY"], "anon-123");
        assert!(!map.contains_key("# hosted project"));
    }

    #[test]
    fn test_defaults_and_trailing_slash() {
        let config = from_map(&parse_conf(SAMPLE)).unwrap();
        assert_eq!(config.backend_url, "https://demo.supabase.co");
        assert_eq!(config.storage_bucket, "uploads");
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.default_lang, Lang::Ar);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut map = parse_conf(SAMPLE);
        apply_env_overrides(
            &mut map,
            [
                ("ALMANBAR_STORAGE_BUCKET".to_string(), "media".to_string()),
                ("ALMANBAR_DEFAULT_LANG".to_string(), "en".to_string()),
                ("ALMANBAR_CONFIG".to_string(), "/tmp/x.conf".to_string()),
                ("PATH".to_string(), "/usr/bin".to_string()),
            ],
        );
        let config = from_map(&map).unwrap();
        assert_eq!(config.storage_bucket, "media");
        assert_eq!(config.default_lang, Lang::En);
        assert!(!map.contains_key("PATH"));
        assert!(!map.contains_key("CONFIG"));
    }

    #[test]
    fn test_missing_required_key() {
        let map = parse_conf("BACKEND_URL=https://demo.supabase.co\n");
        let err = from_map(&map).unwrap_err();
        assert!(err.to_string().contains("BACKEND_ANON_KEY"));
    }

    #[test]
    fn test_bad_number_is_reported() {
        let mut map = parse_conf(SAMPLE);
        map.insert("REQUEST_TIMEOUT_SECS".into(), "soon".into());
        assert!(from_map(&map).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("almanbar_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("almanbar.conf");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = load(&path).unwrap();
        assert!(!config.anon_key.is_empty());
        assert!(config.backend_url.starts_with("https://"));
    }
}
