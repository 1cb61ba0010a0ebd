use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;

/// Snapshot returned by `window.__tripbudgetTest.state()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    pub destination: Option<String>,
    pub budget: Option<f64>,
    pub spent: Option<i64>,
    pub remaining: Option<f64>,
    pub item_count: Option<usize>,
    pub day_label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__tripbudgetTest", vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("__tripbudgetTest is not available. Did you pass ?test=1 in the base URL?");
        }
        Ok(())
    }

    pub async fn state(&self) -> Result<PlannerState> {
        let result = self
            .driver
            .execute("return window.__tripbudgetTest.state()", vec![])
            .await?;
        let value = result.json().clone();
        if value.is_null() {
            bail!("planner has no loaded trip");
        }
        serde_json::from_value(value).context("parsing planner state")
    }

    /// Clear the itinerary slot and reload so the planner seeds again.
    pub async fn reset(&self) -> Result<()> {
        self.driver
            .execute("window.__tripbudgetTest.reset()", vec![])
            .await?;
        Ok(())
    }

    pub async fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.driver
            .execute(
                "window.localStorage.setItem(arguments[0], arguments[1])",
                vec![key.into(), value.into()],
            )
            .await?;
        Ok(())
    }

    pub async fn clear_slot(&self, key: &str) -> Result<()> {
        self.driver
            .execute(
                "window.localStorage.removeItem(arguments[0])",
                vec![key.into()],
            )
            .await?;
        Ok(())
    }

    /// Set a form field's value and fire `input` so the page state sees it.
    pub async fn type_into(&self, id: &str, value: &str) -> Result<()> {
        let found = self
            .driver
            .execute(
                "const el = document.getElementById(arguments[0]);\
                 if (!el) { return false; }\
                 el.value = arguments[1];\
                 el.dispatchEvent(new Event('input', { bubbles: true }));\
                 return true;",
                vec![id.into(), value.into()],
            )
            .await?;
        if !found.json().as_bool().unwrap_or(false) {
            bail!("no form field #{id}");
        }
        Ok(())
    }
}
