use std::time::Duration;

use forja_core::{FactoryBackend, ForgeError, HttpReply};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Native [`FactoryBackend`] used to exercise a live factory API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("forja-tester/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

fn transport(err: &reqwest::Error) -> ForgeError {
    ForgeError::Transport(err.to_string())
}

async fn into_reply(response: reqwest::Response) -> Result<HttpReply, ForgeError> {
    let status = response.status().as_u16();
    let body = response
        .json::<Value>()
        .await
        .map_err(|err| ForgeError::Decode(err.to_string()))?;
    log::debug!("HTTP {status}: {body}");
    Ok(HttpReply::new(status, body))
}

#[async_trait::async_trait(?Send)]
impl FactoryBackend for HttpBackend {
    async fn get_json(&self, url: &str) -> Result<HttpReply, ForgeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport(&err))?;
        into_reply(response).await
    }

    async fn delete_json(&self, url: &str) -> Result<HttpReply, ForgeError> {
        let response = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| transport(&err))?;
        into_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_backend_is_transport_error() {
        let backend = HttpBackend::new(Duration::from_millis(500)).expect("client");
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        let err = rt
            .block_on(backend.get_json("http://127.0.0.1:9/api/factories"))
            .expect_err("nothing listens on the discard port");
        assert!(matches!(err, ForgeError::Transport(_)));
    }
}
