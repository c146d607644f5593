use anyhow::{Context, Result, ensure};
use forja_core::{PartKind, create_character, load_races};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{ApiCtx, ApiScenario, BrowserScenario, CombinedScenario, ScenarioCtx};

const CARD_POLL_ATTEMPTS: usize = 20;
const CARD_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct SmokeScenario;

#[async_trait::async_trait(?Send)]
impl ApiScenario for SmokeScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()> {
        let races = load_races(ctx.backend, &ctx.config.factories_url())
            .await
            .context("listing factories")?;
        let Some(first) = races.first() else {
            anyhow::bail!("backend serves no factories");
        };

        let character = create_character(ctx.backend, ctx.config, first)
            .await
            .with_context(|| format!("creating a {first}"))?;
        ensure!(
            character.part(PartKind::Body).is_some(),
            "created {first} has no body"
        );

        if ctx.verbose {
            println!(
                "  🎲 Created a {first} with {} parts",
                character.parts().len()
            );
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx) -> Result<()> {
        driver.goto(&ctx.base_url).await?;

        let _select = driver
            .find(By::Css("#character-select"))
            .await
            .context("race selector did not render")?;

        let option = driver
            .find(By::Css("#character-select option:nth-child(2)"))
            .await
            .context("no races were offered")?;
        let race = option.value().await?.unwrap_or_default();
        option.click().await?;
        if ctx.verbose {
            println!("  🏰 Selected race '{race}'");
        }

        driver.find(By::Css("#create-btn")).await?.click().await?;
        if ctx.verbose {
            println!("  🖱️  Clicked create");
        }

        let mut cards = Vec::new();
        for _ in 0..CARD_POLL_ATTEMPTS {
            cards = driver.find_all(By::Css(".character-card")).await?;
            if !cards.is_empty() {
                break;
            }
            tokio::time::sleep(CARD_POLL_INTERVAL).await;
        }
        ensure!(!cards.is_empty(), "no character cards appeared for '{race}'");

        if let Ok(banner) = driver.find(By::Css(".error-banner")).await {
            anyhow::bail!("error banner shown: {}", banner.text().await?);
        }

        if ctx.verbose {
            println!("  🃏 {} cards rendered", cards.len());
        }
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn name(&self) -> &'static str {
        "Smoke Test"
    }

    fn supports_browser(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scenario::stub::StubBackend;
    use forja_core::BackendConfig;
    use serde_json::json;

    #[test]
    fn smoke_creates_the_first_race() {
        let backend = StubBackend::default()
            .reply(200, json!(["enano", "elfo"]))
            .reply(
                201,
                json!({ "status": "created", "character": { "cuerpo": { "especie": "Enano" } } }),
            );
        let config = BackendConfig::new("http://forja.test");
        let ctx = ApiCtx {
            backend: &backend,
            config: &config,
            verbose: false,
        };
        tokio_test::block_on(SmokeScenario.run_api(&ctx)).expect("smoke passes");
        assert_eq!(
            backend.requests.borrow()[1].1,
            "http://forja.test/api/create/enano"
        );
    }

    #[test]
    fn smoke_reports_backend_rejection() {
        let backend = StubBackend::default()
            .reply(200, json!(["enano"]))
            .reply(
                503,
                json!({ "error": "busy", "message": "Fábrica ocupada, intenta de nuevo" }),
            );
        let config = BackendConfig::new("http://forja.test");
        let ctx = ApiCtx {
            backend: &backend,
            config: &config,
            verbose: false,
        };
        let err = tokio_test::block_on(SmokeScenario.run_api(&ctx)).expect_err("busy");
        assert!(format!("{err:#}").contains("Fábrica ocupada"));
    }
}
