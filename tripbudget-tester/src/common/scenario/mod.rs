use anyhow::Result;
use thirtyfour::prelude::*;
use tripbudget_core::Catalog;

use crate::browser::TestBridge;
use crate::logic::LogicCtx;

pub mod ledger;
pub mod planner;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub catalog: &'a Catalog,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

pub type LogicCheck = fn(&LogicCtx<'_>) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }

    /// Directory-safe form of the name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect()
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// A scenario with only a logic check.
#[derive(Clone)]
pub struct LogicScenario {
    name: &'static str,
    check: LogicCheck,
}

impl LogicScenario {
    pub const fn new(name: &'static str, check: LogicCheck) -> Self {
        Self { name, check }
    }
}

#[async_trait::async_trait]
impl BrowserScenario for LogicScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("Browser testing not implemented for {}", self.name)
    }
}

impl CombinedScenario for LogicScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(self.name, self.check))
    }
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    let scenario: Box<dyn CombinedScenario + Send + Sync> = match name.to_lowercase().as_str() {
        "smoke" => Box::new(smoke::SmokeScenario),
        "seeding" | "seed" => Box::new(LogicScenario::new(
            "Itinerary Seeding",
            planner::seeding_check,
        )),
        "add-remove" | "ledger-basics" => Box::new(LogicScenario::new(
            "Add and Remove Items",
            planner::add_remove_check,
        )),
        "invalid-input" | "invalid" => Box::new(LogicScenario::new(
            "Invalid Form Input",
            planner::invalid_input_check,
        )),
        "day-progress" | "days" => Box::new(LogicScenario::new(
            "Day Progress Clamping",
            planner::day_progress_check,
        )),
        "reload-no-seed" | "reload" => Box::new(LogicScenario::new(
            "Reload Keeps Itinerary",
            planner::reload_check,
        )),
        "catalog-failure" | "catalog" => Box::new(LogicScenario::new(
            "Catalog Failure",
            planner::catalog_failure_check,
        )),
        "ledger" | "ledger-random" => Box::new(LogicScenario::new(
            "Randomized Ledger",
            ledger::random_ledger_check,
        )),
        _ => return None,
    };
    Some(scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("seeding", "Itinerary Seeding"),
        ("add-remove", "Add and Remove Items"),
        ("invalid-input", "Invalid Form Input"),
        ("day-progress", "Day Progress Clamping"),
        ("reload-no-seed", "Reload Keeps Itinerary"),
        ("catalog-failure", "Catalog Failure"),
        ("ledger", "Randomized Ledger"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, description) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("{key} missing"));
            let logic = scenario.as_logic_scenario().expect("logic check");
            assert_eq!(logic.name, description);
        }
    }

    #[test]
    fn unknown_scenario_is_none() {
        assert!(get_scenario("boss-fight").is_none());
    }

    #[test]
    fn slug_is_directory_safe() {
        let scenario = TestScenario::new("Add and Remove Items", |_| Ok(()));
        assert_eq!(scenario.slug(), "add-and-remove-items");
    }
}
