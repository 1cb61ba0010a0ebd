//! Failure artifacts for browser runs and small CLI helpers.
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

/// Every planner slot in `localStorage`, keyed by slot name, as raw text.
const PLANNER_SLOTS_JS: &str = r"
const slots = {};
for (let i = 0; i < localStorage.length; i++) {
  const key = localStorage.key(i);
  if (key === 'tripDetails' || key.startsWith('itineraryItems_')) {
    slots[key] = localStorage.getItem(key);
  }
}
return slots;";

const BRIDGE_STATE_JS: &str =
    "return window.__tripbudgetTest ? window.__tripbudgetTest.state() : null";

/// `<base>/<scenario>/seed-<seed>/<browser>-<timestamp>`
pub fn artifacts_dir(base: &str, browser: &str, scenario: &str, seed: u64) -> PathBuf {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    Path::new(base)
        .join(scenario)
        .join(format!("seed-{seed}"))
        .join(format!("{browser}-{ts}"))
}

/// What the planner held when a scenario failed. Written as `planner.json`.
#[derive(Debug, Serialize)]
struct PlannerDump {
    error: String,
    bridge: Value,
    slots: Map<String, Value>,
}

impl PlannerDump {
    fn new(err: &anyhow::Error, bridge: Option<Value>, raw_slots: Option<Value>) -> Self {
        let slots = match raw_slots {
            Some(Value::Object(slots)) => slots
                .into_iter()
                .map(|(key, value)| (key, parse_slot(value)))
                .collect(),
            _ => Map::new(),
        };
        Self {
            error: format!("{err:#}"),
            bridge: bridge.unwrap_or(Value::Null),
            slots,
        }
    }
}

/// Slots hold JSON text; unreadable text is kept as the string it was.
fn parse_slot(value: Value) -> Value {
    value
        .as_str()
        .and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or(value)
}

/// Save the bridge state, planner slots, a screenshot and the page source into `dir`.
pub async fn capture_artifacts(driver: &WebDriver, dir: &Path, err: &anyhow::Error) -> Result<()> {
    let bridge = run_script(driver, BRIDGE_STATE_JS).await;
    let slots = run_script(driver, PLANNER_SLOTS_JS).await;
    let dump = PlannerDump::new(err, bridge, slots);
    let screenshot = driver.screenshot_as_png().await.ok();
    let page = driver.source().await.ok();
    write_dump(dir, &dump, screenshot.as_deref(), page.as_deref())
}

async fn run_script(driver: &WebDriver, script: &str) -> Option<Value> {
    match driver.execute(script, Vec::new()).await {
        Ok(ret) => Some(ret.json().clone()),
        Err(err) => {
            log::debug!("artifact script failed: {err}");
            None
        }
    }
}

fn write_dump(
    dir: &Path,
    dump: &PlannerDump,
    screenshot: Option<&[u8]>,
    page: Option<&str>,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    fs::write(dir.join("planner.json"), serde_json::to_vec_pretty(dump)?)
        .context("writing planner.json")?;
    if let Some(png) = screenshot {
        fs::write(dir.join("screenshot.png"), png).context("writing screenshot")?;
    }
    if let Some(html) = page {
        fs::write(dir.join("page.html"), html).context("writing page source")?;
    }
    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
