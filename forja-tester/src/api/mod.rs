pub mod client;
pub mod reports;
pub mod tester;

pub use client::HttpBackend;
pub use tester::{ApiTester, ScenarioResult};
