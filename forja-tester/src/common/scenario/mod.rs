use anyhow::Result;
use forja_core::{BackendConfig, FactoryBackend};
use thirtyfour::prelude::*;

pub mod contract;
pub mod smoke;

/// Everything an API scenario needs to talk to the factory backend.
pub struct ApiCtx<'a> {
    pub backend: &'a dyn FactoryBackend,
    pub config: &'a BackendConfig,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub base_url: String,
    pub verbose: bool,
}

// API contract scenario
#[async_trait::async_trait(?Send)]
pub trait ApiScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()>;
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx) -> Result<()>;
}

// Combined scenario that can run against the API, the browser, or both
pub trait CombinedScenario: ApiScenario + BrowserScenario {
    fn name(&self) -> &'static str;

    /// Scenarios that remove backend state only run when explicitly allowed.
    fn destructive(&self) -> bool {
        false
    }

    fn supports_browser(&self) -> bool {
        false
    }
}

/// Canonical key for a scenario name or alias, case-insensitively.
pub fn canonical_key(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "smoke" => Some("smoke"),
        "factories" | "race-list" => Some("factories"),
        "create-all" | "create" => Some("create-all"),
        "race-info" | "info" => Some("race-info"),
        "unknown-race" | "unknown" => Some("unknown-race"),
        "delete-factory" | "delete" => Some("delete-factory"),
        _ => None,
    }
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match canonical_key(name)? {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "factories" => Some(Box::new(contract::FactoriesScenario)),
        "create-all" => Some(Box::new(contract::CreateAllScenario)),
        "race-info" => Some(Box::new(contract::RaceInfoScenario)),
        "unknown-race" => Some(Box::new(contract::UnknownRaceScenario)),
        "delete-factory" => Some(Box::new(contract::DeleteFactoryScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("factories", "Race List Contract"),
        ("create-all", "Create Every Race"),
        ("race-info", "Race Info Contract"),
        ("unknown-race", "Unknown Race Rejection"),
        ("delete-factory", "Delete Factory (destructive)"),
    ]
}

/// Scenario keys that "all" expands to; destructive ones are never included.
pub const NON_DESTRUCTIVE: [&str; 5] = [
    "smoke",
    "factories",
    "create-all",
    "race-info",
    "unknown-race",
];

#[cfg(test)]
pub(crate) mod stub {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use forja_core::{FactoryBackend, ForgeError, HttpReply};
    use serde_json::Value;

    /// Replays canned replies in order and records the requested URLs.
    #[derive(Default)]
    pub struct StubBackend {
        replies: RefCell<VecDeque<Result<HttpReply, ForgeError>>>,
        pub requests: RefCell<Vec<(&'static str, String)>>,
    }

    impl StubBackend {
        pub fn reply(self, status: u16, body: Value) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(HttpReply::new(status, body)));
            self
        }

        pub fn fail(self, err: ForgeError) -> Self {
            self.replies.borrow_mut().push_back(Err(err));
            self
        }

        fn next(&self, method: &'static str, url: &str) -> Result<HttpReply, ForgeError> {
            self.requests.borrow_mut().push((method, url.to_string()));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ForgeError::Transport("no scripted reply".into())))
        }
    }

    #[async_trait::async_trait(?Send)]
    impl FactoryBackend for StubBackend {
        async fn get_json(&self, url: &str) -> Result<HttpReply, ForgeError> {
            self.next("GET", url)
        }

        async fn delete_json(&self, url: &str) -> Result<HttpReply, ForgeError> {
            self.next("DELETE", url)
        }
    }
}
