use forja_core::{ForgeError, HttpReply};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, DomException, Headers, Request, RequestInit, Response, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Failure of a browser fetch before a JSON reply was available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),
    #[error("request aborted")]
    Aborted,
    #[error("{0}")]
    NotJson(String),
}

impl FetchError {
    /// Classify a rejected browser promise.
    #[must_use]
    pub fn from_js(value: &JsValue) -> Self {
        let aborted = value
            .dyn_ref::<DomException>()
            .is_some_and(|err| err.name() == "AbortError");
        if aborted {
            Self::Aborted
        } else {
            Self::Network(js_error_message(value))
        }
    }
}

impl From<FetchError> for ForgeError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(message) => Self::Transport(message),
            FetchError::Aborted => Self::Cancelled,
            FetchError::NotJson(message) => Self::Decode(message),
        }
    }
}

/// GET `url` and parse the body as JSON, whatever the status.
///
/// # Errors
/// Returns an error if the request fails, is aborted through `signal`, or the body is not JSON.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn get_json(url: &str, signal: Option<&AbortSignal>) -> Result<HttpReply, FetchError> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_signal(signal);
    send_json(url, &init).await
}

/// DELETE `url` with a JSON content type and parse the reply body as JSON.
///
/// # Errors
/// Returns an error if the request fails, is aborted through `signal`, or the body is not JSON.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn delete_json(
    url: &str,
    signal: Option<&AbortSignal>,
) -> Result<HttpReply, FetchError> {
    let headers = Headers::new().map_err(|err| FetchError::from_js(&err))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|err| FetchError::from_js(&err))?;
    let init = RequestInit::new();
    init.set_method("DELETE");
    init.set_headers(&headers);
    init.set_signal(signal);
    send_json(url, &init).await
}

#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
async fn send_json(url: &str, init: &RequestInit) -> Result<HttpReply, FetchError> {
    let request =
        Request::new_with_str_and_init(url, init).map_err(|err| FetchError::from_js(&err))?;
    let response: Response = JsFuture::from(window().fetch_with_request(&request))
        .await
        .and_then(|value| value.dyn_into::<Response>())
        .map_err(|err| FetchError::from_js(&err))?;
    let text = response.text().map_err(|err| FetchError::from_js(&err))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|err| FetchError::from_js(&err))?
        .as_string()
        .unwrap_or_default();
    let body = serde_json::from_str(&text).map_err(|err| FetchError::NotJson(err.to_string()))?;
    Ok(HttpReply::new(response.status(), body))
}
