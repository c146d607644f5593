//! Transport abstraction and the API operations built on it.

use crate::config::BackendConfig;
use crate::envelope::{
    HttpReply, coerce_race_list, interpret_create, interpret_delete, interpret_info,
};
use crate::error::{Action, ForgeError};
use crate::model::{Character, RaceInfo};

/// Trait for abstracting HTTP access to the factory API.
/// Platform-specific implementations should provide this
///
/// Implementations report transport problems (no connection, aborted request,
/// body that is not JSON) as errors and hand every received reply back as an
/// [`HttpReply`], whatever its status.
#[async_trait::async_trait(?Send)]
pub trait FactoryBackend {
    /// Issue a GET and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Transport`], [`ForgeError::Decode`] or [`ForgeError::Cancelled`].
    async fn get_json(&self, url: &str) -> Result<HttpReply, ForgeError>;

    /// Issue a DELETE with a JSON content type and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Transport`], [`ForgeError::Decode`] or [`ForgeError::Cancelled`].
    async fn delete_json(&self, url: &str) -> Result<HttpReply, ForgeError>;
}

fn require_race(kind: &str, action: Action) -> Result<&str, ForgeError> {
    let kind = kind.trim();
    if kind.is_empty() {
        return Err(ForgeError::NoRaceSelected(action));
    }
    Ok(kind)
}

/// Fetch the race identifiers served at `endpoint`.
///
/// # Errors
///
/// Transport and decode failures only; unexpected shapes become an empty list.
pub async fn load_races<B>(backend: &B, endpoint: &str) -> Result<Vec<String>, ForgeError>
where
    B: FactoryBackend + ?Sized,
{
    let reply = backend.get_json(endpoint).await?;
    let races = coerce_race_list(&reply.body);
    log::debug!("loaded {} races from {endpoint}", races.len());
    Ok(races)
}

/// Ask the backend to create a character of race `kind`.
///
/// # Errors
///
/// [`ForgeError::NoRaceSelected`] before any request when `kind` is blank,
/// otherwise transport failures or the envelope's failure.
pub async fn create_character<B>(
    backend: &B,
    config: &BackendConfig,
    kind: &str,
) -> Result<Character, ForgeError>
where
    B: FactoryBackend + ?Sized,
{
    let kind = require_race(kind, Action::Create)?;
    let reply = backend.get_json(&config.create_url(kind)).await?;
    interpret_create(&reply)
}

/// Fetch informational metadata about race `kind`.
///
/// # Errors
///
/// As [`create_character`], with the info endpoint's failure rules.
pub async fn fetch_race_info<B>(
    backend: &B,
    config: &BackendConfig,
    kind: &str,
) -> Result<RaceInfo, ForgeError>
where
    B: FactoryBackend + ?Sized,
{
    let kind = require_race(kind, Action::Info)?;
    let reply = backend.get_json(&config.info_url(kind)).await?;
    interpret_info(&reply)
}

/// Delete the factory of race `kind`; returns the success message.
///
/// # Errors
///
/// As [`create_character`], with the deletion success rule.
pub async fn delete_factory<B>(
    backend: &B,
    config: &BackendConfig,
    kind: &str,
) -> Result<String, ForgeError>
where
    B: FactoryBackend + ?Sized,
{
    let kind = require_race(kind, Action::Delete)?;
    let reply = backend.delete_json(&config.delete_url(kind)).await?;
    interpret_delete(&reply)
}
