//! Browser implementation of the factory API transport.

use forja_core::{FactoryBackend, ForgeError, HttpReply};
use web_sys::{AbortController, AbortSignal};

use crate::dom;

/// Fetch-based [`FactoryBackend`]; requests stop when the attached signal aborts.
#[derive(Clone, Debug, Default)]
pub struct BrowserBackend {
    signal: Option<AbortSignal>,
}

impl BrowserBackend {
    #[must_use]
    pub const fn new(signal: Option<AbortSignal>) -> Self {
        Self { signal }
    }
}

#[async_trait::async_trait(?Send)]
impl FactoryBackend for BrowserBackend {
    async fn get_json(&self, url: &str) -> Result<HttpReply, ForgeError> {
        Ok(dom::get_json(url, self.signal.as_ref()).await?)
    }

    async fn delete_json(&self, url: &str) -> Result<HttpReply, ForgeError> {
        Ok(dom::delete_json(url, self.signal.as_ref()).await?)
    }
}

/// The abort handle of a component's latest request.
#[derive(Debug, Default)]
pub struct AbortSlot {
    current: Option<AbortController>,
}

impl AbortSlot {
    /// Abort whatever is in flight and hand out a backend bound to a fresh signal.
    pub fn renew(&mut self) -> BrowserBackend {
        self.abort();
        match AbortController::new() {
            Ok(controller) => {
                let signal = controller.signal();
                self.current = Some(controller);
                BrowserBackend::new(Some(signal))
            }
            Err(err) => {
                log::warn!(
                    "requests cannot be aborted: {}",
                    dom::js_error_message(&err)
                );
                BrowserBackend::default()
            }
        }
    }

    pub fn abort(&mut self) {
        if let Some(controller) = self.current.take() {
            controller.abort();
        }
    }
}
