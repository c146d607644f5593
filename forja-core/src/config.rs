//! Backend location and endpoint construction.

use crate::image::resolve_image_url;

/// Origin used when no backend URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Where the factory API lives.
///
/// Built once at the top of the application and handed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    origin: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl BackendConfig {
    /// Trailing slashes are stripped; a blank origin falls back to the default.
    #[must_use]
    pub fn new(origin: impl AsRef<str>) -> Self {
        let origin = origin.as_ref().trim().trim_end_matches('/');
        if origin.is_empty() {
            return Self {
                origin: DEFAULT_BACKEND_URL.to_string(),
            };
        }
        Self {
            origin: origin.to_string(),
        }
    }

    /// Build from an optional setting such as an environment variable.
    #[must_use]
    pub fn from_setting(setting: Option<&str>) -> Self {
        setting.map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn factories_url(&self) -> String {
        format!("{}/api/factories", self.origin)
    }

    #[must_use]
    pub fn create_url(&self, kind: &str) -> String {
        format!("{}/api/create/{}", self.origin, kind.trim())
    }

    #[must_use]
    pub fn info_url(&self, kind: &str) -> String {
        format!("{}/api/character/{}/info", self.origin, kind.trim())
    }

    #[must_use]
    pub fn delete_url(&self, kind: &str) -> String {
        format!("{}/api/pool/delete/{}", self.origin, kind.trim())
    }

    /// Resolve an image path from a character against this backend.
    #[must_use]
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        resolve_image_url(&self.origin, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_api_layout() {
        let cfg = BackendConfig::new("http://localhost:5000/");
        assert_eq!(cfg.origin(), "http://localhost:5000");
        assert_eq!(cfg.factories_url(), "http://localhost:5000/api/factories");
        assert_eq!(cfg.create_url("elfo"), "http://localhost:5000/api/create/elfo");
        assert_eq!(
            cfg.info_url(" orco "),
            "http://localhost:5000/api/character/orco/info"
        );
        assert_eq!(
            cfg.delete_url("enanos"),
            "http://localhost:5000/api/pool/delete/enanos"
        );
    }

    #[test]
    fn missing_or_blank_setting_uses_default_origin() {
        assert_eq!(BackendConfig::from_setting(None).origin(), DEFAULT_BACKEND_URL);
        assert_eq!(BackendConfig::from_setting(Some(" ")).origin(), DEFAULT_BACKEND_URL);
        assert_eq!(
            BackendConfig::from_setting(Some("https://api.forja.example")).origin(),
            "https://api.forja.example"
        );
    }

    #[test]
    fn image_url_uses_configured_origin() {
        let cfg = BackendConfig::new("https://api.forja.example//");
        assert_eq!(
            cfg.image_url(Some("/images/characters/elfo.png")).as_deref(),
            Some("https://api.forja.example/images/characters/elfo.png")
        );
        assert_eq!(cfg.image_url(None), None);
    }
}
