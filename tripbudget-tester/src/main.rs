mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thirtyfour::WebDriver;
use tripbudget_core::Catalog;

use browser::{BrowserConfig, BrowserKind, TestBridge, new_session};
use common::scenario::{ScenarioCtx, get_scenario, list_scenarios};
use common::{artifacts_dir, capture_artifacts, split_csv};
use logic::{LogicTester, ScenarioResult, load_catalog, resolve_seeds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Planner logic against file-backed storage, no browser needed
    Logic,
    /// WebDriver runs against a served planner page
    Browser,
    /// Logic first, then browser
    Both,
}

impl TestMode {
    const fn runs_logic(self) -> bool {
        matches!(self, Self::Logic | Self::Both)
    }

    const fn runs_browser(self) -> bool {
        matches!(self, Self::Browser | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    Headless,
    Windowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

impl ReportFormat {
    /// Render the logic results. Browser runs report as they go.
    fn render(self, out: &mut dyn Write, results: &[ScenarioResult], elapsed: Duration) -> Result<()> {
        match self {
            Self::Json => logic::reports::generate_json_report(out, results),
            Self::Markdown if results.is_empty() => {
                writeln!(out, "# Tripbudget Logic Test Results\n\n_No scenarios executed._")?;
                Ok(())
            }
            Self::Markdown => logic::reports::generate_markdown_report(out, results),
            Self::Console => {
                if results.is_empty() {
                    writeln!(out, "No logic scenarios executed.")?;
                } else {
                    logic::reports::generate_console_report(out, results, elapsed)?;
                }
                writeln!(out, "\n🏁 Total time: {elapsed:?}")?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tripbudget-tester", version)]
#[command(about = "Checks the trip planner: itinerary rules in-process, the page over WebDriver")]
struct Args {
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Comma-separated scenario keys, or `all`
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// Print the scenario keys and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Comma-separated seeds; each picks a trip from the catalog
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Logic iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Catalog JSON to plan against instead of the page's `data.json`
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    /// Comma-separated: chrome, edge, firefox, safari
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Planner page; `?test=1` turns on the page's test bridge
    #[arg(long, default_value = "http://localhost:8080/planner.html?test=1")]
    base_url: String,

    /// Where failed browser runs leave screenshots and storage dumps
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Selenium Grid URL; local drivers are used when absent
    #[arg(long)]
    hub: Option<String>,

    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

/// Everything one invocation produced.
#[derive(Debug, Default)]
struct RunOutcome {
    logic: Vec<ScenarioResult>,
    browser_failures: usize,
}

impl RunOutcome {
    fn passed(&self) -> bool {
        self.browser_failures == 0 && self.logic.iter().all(|r| r.passed)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        let mut out = open_output(args.output.as_deref())?;
        write_scenario_list(&mut *out)?;
        return out.flush().context("flushing scenario list");
    }

    let started = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    let catalog = Arc::new(
        load_catalog(args.catalog.as_deref()).context("loading destination catalog")?,
    );
    println!(
        "{} {} mode, {} scenario(s), seeds {:?}, {} destinations",
        "🧳 tripbudget-tester:".bright_cyan().bold(),
        format!("{:?}", args.mode).to_lowercase(),
        scenarios.len(),
        seeds,
        catalog.len()
    );

    let outcome = RunOutcome {
        logic: run_logic_scenarios(&args, &scenarios, &seeds, &catalog),
        browser_failures: run_browser_scenarios(&args, &scenarios, &seeds, &catalog).await?,
    };

    let mut out = open_output(args.output.as_deref())?;
    args.report.render(&mut *out, &outcome.logic, started.elapsed())?;
    out.flush().context("flushing report")?;

    if !outcome.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn write_scenario_list(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(out, "  {key:18} - {description}")?;
    }
    Ok(())
}

/// Split the scenario list; `all` pulls in every registered key not already named.
fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let requested = split_csv(scenarios_arg);
    let wants_all = requested.iter().any(|s| s == "all");
    let mut scenarios: Vec<String> = requested.into_iter().filter(|s| s != "all").collect();
    if wants_all {
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: matches!(args.headless, HeadlessMode::Headless),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    catalog: &Arc<Catalog>,
) -> Vec<ScenarioResult> {
    if !args.mode.runs_logic() {
        return Vec::new();
    }
    println!("{}", "🧠 Itinerary logic".bright_yellow().bold());

    // Each process gets its own scratch area for file-backed storage.
    let workdir = std::env::temp_dir().join(format!("tripbudget-tester-{}", std::process::id()));
    let tester = LogicTester::new(Arc::clone(catalog), &workdir, args.verbose);

    let mut results = Vec::new();
    for name in scenarios {
        match get_scenario(name).and_then(|s| s.as_logic_scenario()) {
            Some(scenario) => results.extend(tester.run_scenario(&scenario, seeds, args.iterations)),
            None => eprintln!("⚠️  No logic scenario named {}", name.yellow()),
        }
    }

    if let Err(err) = std::fs::remove_dir_all(&workdir) {
        log::debug!("scratch dir {} not removed: {err}", workdir.display());
    }
    results
}

/// Returns how many browser scenario runs failed.
async fn run_browser_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    catalog: &Catalog,
) -> Result<usize> {
    if !args.mode.runs_browser() {
        return Ok(0);
    }
    println!("{}", "🌐 Planner page".bright_blue().bold());

    let kinds: Vec<BrowserKind> = split_csv(&args.browsers)
        .iter()
        .filter_map(|name| {
            let kind = BrowserKind::parse(name);
            if kind.is_none() {
                eprintln!("⚠️  Unknown browser: {}", name.yellow());
            }
            kind
        })
        .collect();

    let config = build_browser_config(args);
    let mut failures = 0;
    for kind in kinds {
        let driver = match new_session(kind, &config).await {
            Ok(driver) => driver,
            Err(err) => {
                eprintln!("❌ {} session did not start: {err}", kind.label());
                failures += 1;
                continue;
            }
        };
        failures += run_on_driver(args, scenarios, seeds, catalog, kind, &driver).await;
        if let Err(err) = driver.quit().await {
            log::warn!("{} session did not close cleanly: {err}", kind.label());
        }
    }
    Ok(failures)
}

async fn run_on_driver(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    catalog: &Catalog,
    kind: BrowserKind,
    driver: &WebDriver,
) -> usize {
    let mut failures = 0;
    for name in scenarios {
        let Some(scenario) = get_scenario(name) else {
            continue;
        };
        for &seed in seeds {
            let ctx = ScenarioCtx {
                base_url: args.base_url.clone(),
                seed,
                catalog,
                bridge: TestBridge::new(driver),
                verbose: args.verbose,
            };
            let run_started = Instant::now();
            let outcome = scenario.run_browser(driver, &ctx).await;
            let tag = format!("[{} seed {seed}] {name}", kind.label());
            match outcome {
                Ok(()) => println!("✅ {tag} in {:?}", run_started.elapsed()),
                Err(err) => {
                    failures += 1;
                    eprintln!("❌ {tag}: {err:#}");
                    let dir = artifacts_dir(&args.artifacts_dir, kind.label(), name, seed);
                    match capture_artifacts(driver, &dir, &err).await {
                        Ok(()) => eprintln!("   artifacts in {}", dir.display()),
                        Err(capture_err) => {
                            log::warn!("no artifacts for {tag}: {capture_err:#}");
                        }
                    }
                }
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::try_parse_from(["tripbudget-tester", "--iterations", "1"]).unwrap()
    }

    fn temp(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tripbudget-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(load_catalog(None).unwrap())
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "Smoke Test".to_string(),
            seed: 1337,
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["spent 0 after add, expected 750".to_string()]
            },
            average_duration: Duration::from_millis(10),
            performance_data: vec![Duration::from_millis(10)],
        }
    }

    fn render(format: ReportFormat, results: &[ScenarioResult]) -> String {
        let mut buf = Vec::new();
        format
            .render(&mut buf, results, Duration::from_millis(5))
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn defaults_run_smoke_logic_once_per_seed() {
        let args = base_args();
        assert_eq!(args.mode, TestMode::Logic);
        assert_eq!(args.scenarios, "smoke");
        assert_eq!(args.report, ReportFormat::Console);
        assert!(args.base_url.ends_with("?test=1"));
    }

    #[test]
    fn all_keyword_appends_missing_scenarios() {
        let expanded = expand_scenarios("ledger,all");
        assert_eq!(expanded[0], "ledger");
        assert_eq!(expanded.len(), list_scenarios().len());
        assert!(expanded.contains(&"reload-no-seed".to_string()));
    }

    #[test]
    fn named_scenarios_keep_their_order() {
        assert_eq!(expand_scenarios("seeding, smoke"), vec!["seeding", "smoke"]);
    }

    #[test]
    fn mode_flags_select_runners() {
        assert!(TestMode::Logic.runs_logic() && !TestMode::Logic.runs_browser());
        assert!(!TestMode::Browser.runs_logic() && TestMode::Browser.runs_browser());
        assert!(TestMode::Both.runs_logic() && TestMode::Both.runs_browser());
    }

    #[test]
    fn browser_mode_skips_logic() {
        let args = Args {
            mode: TestMode::Browser,
            ..base_args()
        };
        assert!(run_logic_scenarios(&args, &["smoke".to_string()], &[42], &catalog()).is_empty());
    }

    #[test]
    fn logic_results_cover_every_seed_and_skip_unknown_names() {
        let scenarios = vec!["smoke".to_string(), "seeding".to_string(), "nope".to_string()];
        let results = run_logic_scenarios(&base_args(), &scenarios, &[1, 2], &catalog());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed), "{results:#?}");
    }

    #[test]
    fn outcome_fails_on_any_browser_failure() {
        let mut outcome = RunOutcome {
            logic: vec![sample_result(true)],
            browser_failures: 0,
        };
        assert!(outcome.passed());
        outcome.browser_failures = 1;
        assert!(!outcome.passed());
        outcome.browser_failures = 0;
        outcome.logic.push(sample_result(false));
        assert!(!outcome.passed());
    }

    #[test]
    fn empty_json_report_is_an_empty_array() {
        assert_eq!(render(ReportFormat::Json, &[]).trim(), "[]");
    }

    #[test]
    fn json_report_names_scenarios() {
        assert!(render(ReportFormat::Json, &[sample_result(true)]).contains("\"scenario_name\""));
    }

    #[test]
    fn markdown_report_notes_empty_runs() {
        assert!(render(ReportFormat::Markdown, &[]).contains("No scenarios executed"));
    }

    #[test]
    fn console_report_lists_failures_and_total_time() {
        let text = render(ReportFormat::Console, &[sample_result(false)]);
        assert!(text.contains("Smoke Test"));
        assert!(text.contains("Total time"));
    }

    #[test]
    fn report_file_is_written_through_output() {
        let path = temp("report.json");
        let mut out = open_output(Some(path.as_path())).unwrap();
        ReportFormat::Json
            .render(&mut *out, &[sample_result(true)], Duration::ZERO)
            .unwrap();
        out.flush().unwrap();
        drop(out);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Smoke Test"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn scenario_list_names_every_key() {
        let mut buf = Vec::new();
        write_scenario_list(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Available scenarios"));
        for (key, _) in list_scenarios() {
            assert!(text.contains(key), "{key} missing");
        }
    }

    #[test]
    fn browser_config_follows_flags() {
        let args = Args {
            headless: HeadlessMode::Windowed,
            hub: Some("http://grid.local:4444".to_string()),
            ..base_args()
        };
        let cfg = build_browser_config(&args);
        assert!(!cfg.headless);
        assert_eq!(cfg.remote_hub.as_deref(), Some("http://grid.local:4444"));
    }

    #[test]
    fn logic_mode_never_starts_browsers() {
        let failures = tokio_test::block_on(run_browser_scenarios(
            &base_args(),
            &["smoke".to_string()],
            &[42],
            &catalog(),
        ))
        .unwrap();
        assert_eq!(failures, 0);
    }

    #[test]
    fn unknown_browsers_are_skipped() {
        let args = Args {
            mode: TestMode::Browser,
            browsers: "netscape".to_string(),
            ..base_args()
        };
        let failures = tokio_test::block_on(run_browser_scenarios(
            &args,
            &["smoke".to_string()],
            &[42],
            &catalog(),
        ))
        .unwrap();
        assert_eq!(failures, 0);
    }
}
