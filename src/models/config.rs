//! Configuration model loaded from external sources.

use std::collections::HashMap;

use serde::Deserialize;

/// Complete configuration consumed by validators, controllers and navigation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
    pub errors: ErrorConfig,
    pub navigation: NavigationConfig,
    pub labels: LabelsConfig,
}

/// Location of the REST backend.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Bounds applied to page size query parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaginationConfig {
    pub min_size: u64,
    pub max_size: u64,
    pub default_size: u64,
    /// Number of page buttons shown by pagination controls.
    pub max_visible_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            min_size: 1,
            max_size: 100,
            default_size: 10,
            max_visible_pages: 5,
        }
    }
}

/// Keys into [`ErrorMessages`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    Network,
    Timeout,
    Server,
    NotFound,
    Generic,
}

/// Human-readable messages shown instead of raw errors.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ErrorMessages {
    pub network: String,
    pub timeout: String,
    pub server: String,
    pub not_found: String,
    pub generic: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            network: "Impossible de contacter le serveur".to_string(),
            timeout: "Le serveur met trop de temps à répondre".to_string(),
            server: "Erreur interne du serveur".to_string(),
            not_found: "Ressource introuvable".to_string(),
            generic: "Une erreur inattendue est survenue".to_string(),
        }
    }
}

impl ErrorMessages {
    pub fn get(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::Network => &self.network,
            MessageKey::Timeout => &self.timeout,
            MessageKey::Server => &self.server,
            MessageKey::NotFound => &self.not_found,
            MessageKey::Generic => &self.generic,
        }
    }
}

/// Error messages plus per-status message keys and alert levels.
///
/// Status codes are stored as strings so the maps can be read from YAML and
/// environment sources without custom key deserialization.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ErrorConfig {
    pub messages: ErrorMessages,
    pub colors: HashMap<String, String>,
    pub map: HashMap<String, MessageKey>,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        let colors = [
            ("400", "warning"),
            ("401", "warning"),
            ("403", "warning"),
            ("404", "info"),
            ("408", "warning"),
            ("500", "danger"),
            ("502", "danger"),
            ("503", "danger"),
        ]
        .into_iter()
        .map(|(code, color)| (code.to_string(), color.to_string()))
        .collect();

        let map = [
            ("0", MessageKey::Network),
            ("404", MessageKey::NotFound),
            ("408", MessageKey::Timeout),
            ("500", MessageKey::Server),
            ("502", MessageKey::Server),
            ("503", MessageKey::Server),
            ("504", MessageKey::Timeout),
        ]
        .into_iter()
        .map(|(code, key)| (code.to_string(), key))
        .collect();

        Self {
            messages: ErrorMessages::default(),
            colors,
            map,
        }
    }
}

impl ErrorConfig {
    /// Message configured for the status code, or the generic one.
    pub fn message_for(&self, code: u16) -> &str {
        let key = self
            .map
            .get(&code.to_string())
            .copied()
            .unwrap_or(MessageKey::Generic);
        self.messages.get(key)
    }

    /// Alert level configured for the status code, `"danger"` otherwise.
    pub fn color_for(&self, code: u16) -> &str {
        self.colors
            .get(&code.to_string())
            .map(String::as_str)
            .unwrap_or("danger")
    }
}

/// Rules applied to query parameters when switching routes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    pub reset_page_on_navigate: bool,
    /// Route path mapped to the query parameters dropped when navigating to it.
    pub ignored_params: HashMap<String, Vec<String>>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let ignored_params = [("/artists", "search"), ("/events", "search")]
            .into_iter()
            .map(|(route, param)| (route.to_string(), vec![param.to_string()]))
            .collect();

        Self {
            reset_page_on_navigate: true,
            ignored_params,
        }
    }
}

impl NavigationConfig {
    pub fn ignored_for(&self, route: &str) -> &[String] {
        self.ignored_params
            .get(route)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Placeholder labels substituted for missing entity names.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelsConfig {
    pub unknown_artist: String,
    pub untitled_event: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            unknown_artist: "Artiste inconnu(e)".to_string(),
            untitled_event: "Événement sans titre".to_string(),
        }
    }
}

#[cfg(feature = "client")]
impl AppConfig {
    /// Loads configuration from an optional YAML file layered with `APP__*`
    /// environment variables, falling back to defaults for missing keys.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_for_uses_mapped_key() {
        let errors = ErrorConfig::default();

        assert_eq!(errors.message_for(404), "Ressource introuvable");
        assert_eq!(errors.message_for(503), "Erreur interne du serveur");
        assert_eq!(errors.message_for(0), "Impossible de contacter le serveur");
    }

    #[test]
    fn message_for_unknown_code_is_generic() {
        let errors = ErrorConfig::default();

        assert_eq!(errors.message_for(418), "Une erreur inattendue est survenue");
    }

    #[test]
    fn color_for_falls_back_to_danger() {
        let errors = ErrorConfig::default();

        assert_eq!(errors.color_for(404), "info");
        assert_eq!(errors.color_for(401), "warning");
        assert_eq!(errors.color_for(999), "danger");
    }

    #[test]
    fn ignored_for_unknown_route_is_empty() {
        let navigation = NavigationConfig::default();

        assert_eq!(navigation.ignored_for("/artists"), ["search".to_string()]);
        assert!(navigation.ignored_for("/settings").is_empty());
    }

    #[cfg(feature = "client")]
    #[test]
    fn load_merges_file_over_defaults() {
        use std::io::Write;

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.yaml");
        let mut file = std::fs::File::create(&path).expect("config file");
        writeln!(
            file,
            "pagination:\n  max_size: 50\nlabels:\n  unknown_artist: Unknown artist"
        )
        .expect("write config");

        let config = AppConfig::load(path.to_str().expect("utf-8 path")).expect("load config");

        assert_eq!(config.pagination.max_size, 50);
        assert_eq!(config.pagination.min_size, 1);
        assert_eq!(config.labels.unknown_artist, "Unknown artist");
        assert_eq!(config.labels.untitled_event, "Événement sans titre");
    }

    #[cfg(feature = "client")]
    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.yaml");

        let config = AppConfig::load(path.to_str().expect("utf-8 path")).expect("load config");

        assert_eq!(config.pagination, PaginationConfig::default());
    }
}
