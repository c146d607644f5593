//! API contract scenarios: each one checks a single endpoint against the
//! envelope rules the web client relies on.

use anyhow::{Context, Result, ensure};
use forja_core::{
    ApiEnvelope, create_character, delete_factory, fetch_race_info, interpret_create, load_races,
};
use rand::Rng;
use thirtyfour::prelude::*;

use super::{ApiCtx, ApiScenario, BrowserScenario, CombinedScenario, ScenarioCtx};

const API_ONLY: &str = "Browser testing not implemented for this API scenario";

async fn races(ctx: &ApiCtx<'_>) -> Result<Vec<String>> {
    let races = load_races(ctx.backend, &ctx.config.factories_url())
        .await
        .context("listing factories")?;
    ensure!(!races.is_empty(), "backend serves no factories");
    Ok(races)
}

macro_rules! api_only {
    ($scenario:ty) => {
        #[async_trait::async_trait]
        impl BrowserScenario for $scenario {
            async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx) -> Result<()> {
                anyhow::bail!(API_ONLY)
            }
        }
    };
}

pub struct FactoriesScenario;

#[async_trait::async_trait(?Send)]
impl ApiScenario for FactoriesScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()> {
        let races = races(ctx).await?;
        ensure!(
            races.iter().all(|race| !race.trim().is_empty()),
            "race list contains blank identifiers: {races:?}"
        );
        if ctx.verbose {
            println!("  🏰 Factories: {}", races.join(", "));
        }
        Ok(())
    }
}

api_only!(FactoriesScenario);

impl CombinedScenario for FactoriesScenario {
    fn name(&self) -> &'static str {
        "Race List Contract"
    }
}

pub struct CreateAllScenario;

#[async_trait::async_trait(?Send)]
impl ApiScenario for CreateAllScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()> {
        for race in races(ctx).await? {
            let character = create_character(ctx.backend, ctx.config, &race)
                .await
                .with_context(|| format!("creating a {race}"))?;
            ensure!(
                character.is_complete(),
                "{race} character is missing parts: {character:?}"
            );
            for part in character.parts() {
                if let Some(path) = part.image() {
                    ensure!(
                        ctx.config.image_url(Some(path)).is_some(),
                        "{race} {:?} image does not resolve",
                        part.kind()
                    );
                }
            }
            if ctx.verbose {
                println!("  🎲 Created a complete {race}");
            }
        }
        Ok(())
    }
}

api_only!(CreateAllScenario);

impl CombinedScenario for CreateAllScenario {
    fn name(&self) -> &'static str {
        "Create Every Race"
    }
}

pub struct RaceInfoScenario;

#[async_trait::async_trait(?Send)]
impl ApiScenario for RaceInfoScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()> {
        for race in races(ctx).await? {
            let info = fetch_race_info(ctx.backend, ctx.config, &race)
                .await
                .with_context(|| format!("fetching info for {race}"))?;
            ensure!(
                !info.character.is_empty(),
                "info for {race} describes no parts"
            );
            if ctx.verbose {
                println!(
                    "  📜 {race}: {} parts described",
                    info.character.parts().len()
                );
            }
        }
        Ok(())
    }
}

api_only!(RaceInfoScenario);

impl CombinedScenario for RaceInfoScenario {
    fn name(&self) -> &'static str {
        "Race Info Contract"
    }
}

pub struct UnknownRaceScenario;

#[async_trait::async_trait(?Send)]
impl ApiScenario for UnknownRaceScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()> {
        let suffix: u32 = rand::thread_rng().r#gen();
        let kind = format!("inexistente-{suffix:08x}");
        let reply = ctx
            .backend
            .get_json(&ctx.config.create_url(&kind))
            .await
            .with_context(|| format!("requesting unknown race {kind}"))?;
        let envelope = ApiEnvelope::from_body(&reply.body)?;
        ensure!(
            envelope.has_error(),
            "unknown race {kind} should report an error, got {}",
            reply.body
        );
        ensure!(
            interpret_create(&reply).is_err(),
            "unknown race {kind} must not yield a character"
        );
        if ctx.verbose {
            println!("  🚫 {kind} rejected with HTTP {}", reply.status);
        }
        Ok(())
    }
}

api_only!(UnknownRaceScenario);

impl CombinedScenario for UnknownRaceScenario {
    fn name(&self) -> &'static str {
        "Unknown Race Rejection"
    }
}

pub struct DeleteFactoryScenario;

#[async_trait::async_trait(?Send)]
impl ApiScenario for DeleteFactoryScenario {
    async fn run_api(&self, ctx: &ApiCtx<'_>) -> Result<()> {
        let before = races(ctx).await?;
        let Some(victim) = before.last() else {
            anyhow::bail!("no factory to delete");
        };
        let message = delete_factory(ctx.backend, ctx.config, victim)
            .await
            .with_context(|| format!("deleting the {victim} factory"))?;
        if ctx.verbose {
            println!("  🗑️  {message}");
        }
        let after = load_races(ctx.backend, &ctx.config.factories_url()).await?;
        ensure!(
            !after.contains(victim),
            "{victim} is still listed after deletion"
        );
        Ok(())
    }
}

api_only!(DeleteFactoryScenario);

impl CombinedScenario for DeleteFactoryScenario {
    fn name(&self) -> &'static str {
        "Delete Factory"
    }

    fn destructive(&self) -> bool {
        true
    }
}
