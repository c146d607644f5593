mod api;
mod browser;
mod common;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use forja_core::{BackendConfig, DEFAULT_BACKEND_URL};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use api::{ApiTester, HttpBackend, ScenarioResult};
use browser::{BrowserConfig, BrowserKind, new_session};
use common::scenario::{
    ApiCtx, NON_DESTRUCTIVE, ScenarioCtx, canonical_key, get_scenario, list_scenarios,
};
use common::{artifacts_dir, capture_artifacts, split_csv};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// API contract checks against the factory backend (fast, no browser)
    Api,
    /// Browser automation against the deployed client (slow, captures screenshots)
    Browser,
    /// Run both API and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "forja-tester", version)]
#[command(about = "Automated QA for Forja - factory API contract checks and browser automation")]
struct Args {
    /// Test mode: api (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Api)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, "all" for every non-destructive one)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario (api mode only)
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Allow scenarios that delete factories on the backend
    #[arg(long)]
    allow_destructive: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Origin of the factory backend
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// Per-request timeout against the backend, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// URL the web client is served from
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,

    /// Artifacts directory for screenshots and logs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);

    let mut all_results = run_api_scenarios(&args, &scenarios).await?;
    all_results.extend(run_browser_scenarios(&args, &scenarios).await);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "⚒️  Forja Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = Vec::new();
    for name in split_csv(scenarios_arg) {
        let batch = if name.eq_ignore_ascii_case("all") {
            NON_DESTRUCTIVE.iter().map(ToString::to_string).collect()
        } else {
            // Unknown names stay as typed so the run reports them
            vec![canonical_key(&name).map_or(name, str::to_string)]
        };
        for scenario in batch {
            if !scenarios.contains(&scenario) {
                scenarios.push(scenario);
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn scenario_artifacts_dir(args: &Args, kind: BrowserKind, scenario: &str) -> String {
    artifacts_dir(&args.artifacts_dir, kind.label(), scenario)
}

async fn run_api_scenarios(args: &Args, scenarios: &[String]) -> Result<Vec<ScenarioResult>> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Api | TestMode::Both) {
        return Ok(results);
    }

    println!("{}", "🔌 Running API Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let backend = HttpBackend::new(Duration::from_secs(args.timeout_secs))
        .context("preparing the HTTP client")?;
    let config = BackendConfig::new(&args.backend_url);
    let ctx = ApiCtx {
        backend: &backend,
        config: &config,
        verbose: args.verbose,
    };
    let tester = ApiTester::new(args.verbose);

    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        if scenario.destructive() && !args.allow_destructive {
            eprintln!(
                "⚠️  Skipping destructive scenario {} (pass --allow-destructive)",
                scenario_name.yellow()
            );
            continue;
        }
        let result = tester
            .run_scenario(scenario.as_ref(), &ctx, args.iterations)
            .await;
        results.push(result);
    }

    Ok(results)
}

async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return results;
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let cfg = build_browser_config(args);

        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {kind:?}: {e}");
                continue;
            }
        };

        results.extend(run_browser_scenarios_for_driver(args, scenarios, kind, &driver).await);
        let _ = driver.quit().await;
    }

    results
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    let ctx = ScenarioCtx {
        base_url: args.base_url.clone(),
        verbose: args.verbose,
    };
    let label = kind.label();

    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        if !scenario.supports_browser() {
            eprintln!(
                "⚠️  Scenario {} has no browser test implementation",
                scenario_name.yellow()
            );
            continue;
        }

        let scenario_start = Instant::now();
        let outcome = scenario.run_browser(driver, &ctx).await;
        let duration = scenario_start.elapsed();
        let name = format!("{} [{label}]", scenario.name());

        match outcome {
            Ok(()) => {
                println!("✅ [{}] {} - {:?}", label.green(), scenario_name, duration);
                results.push(ScenarioResult::from_runs(name, 1, Vec::new(), vec![duration]));
            }
            Err(e) => {
                eprintln!(
                    "❌ [{}] {} - {:?}: {:#}",
                    label.red(),
                    scenario_name,
                    duration,
                    e
                );
                let dir = scenario_artifacts_dir(args, kind, scenario_name);
                if let Err(capture_err) = capture_artifacts(driver, &dir, &e).await {
                    log::warn!("could not capture artifacts in {dir}: {capture_err:#}");
                }
                results.push(ScenarioResult::from_runs(
                    name,
                    1,
                    vec![format!("{e:#}")],
                    Vec::new(),
                ));
            }
        }
    }

    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                api::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Forja Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                api::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                api::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    let duration = start_time.elapsed();
    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Api,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            iterations: 1,
            allow_destructive: false,
            report: "json".to_string(),
            verbose: false,
            output: None,
            backend_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            browsers: "chrome".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            artifacts_dir: "target/test-artifacts".to_string(),
            hub: None,
            headless: HeadlessMode::Headless,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "forja-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn expands_all_to_non_destructive_scenarios() {
        let expanded = expand_scenarios("all,smoke");
        assert_eq!(expanded.len(), NON_DESTRUCTIVE.len());
        assert!(expanded.contains(&"race-info".to_string()));
        assert!(!expanded.contains(&"delete-factory".to_string()));
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("delete-factory,smoke,smoke");
        assert_eq!(
            expanded,
            vec!["delete-factory".to_string(), "smoke".to_string()]
        );
    }

    #[test]
    fn aliases_collapse_onto_one_run() {
        let expanded = expand_scenarios("create,create-all,info,CREATE");
        assert_eq!(
            expanded,
            vec!["create-all".to_string(), "race-info".to_string()]
        );
        let expanded = expand_scenarios("unknown,all");
        assert_eq!(expanded.len(), NON_DESTRUCTIVE.len());
        assert_eq!(expanded[0], "unknown-race");
        let expanded = expand_scenarios("mystery,smoke");
        assert_eq!(expanded, vec!["mystery".to_string(), "smoke".to_string()]);
    }

    #[test]
    fn api_scenarios_skip_in_browser_mode() {
        let args = Args {
            mode: TestMode::Browser,
            ..base_args()
        };
        let results = tokio_test::block_on(run_api_scenarios(&args, &["smoke".to_string()]))
            .expect("no client needed");
        assert!(results.is_empty());
    }

    #[test]
    fn destructive_scenarios_need_opt_in() {
        let args = base_args();
        let results = tokio_test::block_on(run_api_scenarios(
            &args,
            &["delete-factory".to_string(), "no-such-scenario".to_string()],
        ))
        .expect("nothing runs");
        assert!(results.is_empty());
    }

    #[test]
    fn unreachable_backend_fails_the_scenario() {
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        let results = rt
            .block_on(run_api_scenarios(&base_args(), &["factories".to_string()]))
            .expect("scenario ran");
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(results[0].failures[0].contains("listing factories"));
    }

    #[test]
    fn browser_mode_with_unknown_browser_yields_nothing() {
        let args = Args {
            mode: TestMode::Browser,
            browsers: "netscape".to_string(),
            ..base_args()
        };
        let results =
            tokio_test::block_on(run_browser_scenarios(&args, &["smoke".to_string()]));
        assert!(results.is_empty());
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = temp_path("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).expect("report");
        let content = std::fs::read_to_string(temp).expect("read report");
        assert!(content.contains("[]"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn write_reports_renders_markdown_results() {
        let temp = temp_path("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        let results = vec![ScenarioResult::from_runs(
            "Smoke Test",
            1,
            Vec::new(),
            vec![Duration::from_millis(5)],
        )];
        write_reports(&args, &results, Instant::now()).expect("report");
        let content = std::fs::read_to_string(temp).expect("read report");
        assert!(content.contains("### ✅ Smoke Test"));
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_path("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).expect("list"));
        let content = std::fs::read_to_string(temp).expect("read list");
        assert!(content.contains("Available scenarios:"));
        assert!(content.contains("delete-factory"));
    }

    #[test]
    fn maybe_list_scenarios_is_noop_by_default() {
        assert!(!maybe_list_scenarios(&base_args()).expect("noop"));
    }
}
