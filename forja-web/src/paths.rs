//! Deployment-dependent locations: router base path and backend origin.
use forja_core::BackendConfig;

/// Base path for the router (e.g., `/forja` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Backend configuration baked in at compile time.
///
/// `FORJA_BACKEND_URL` selects the factory API origin; without it the local
/// development server is used.
#[must_use]
pub fn backend_config() -> BackendConfig {
    BackendConfig::from_setting(option_env!("FORJA_BACKEND_URL"))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}
