use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;
use tripbudget_core::{TRIP_DETAILS_KEY, itinerary_key};

use super::planner::{STAMP, open_session, trip_for_seed};
use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use crate::logic::LogicCtx;

pub struct SmokeScenario;

/// Cost typed into the form by both halves of the smoke test.
const SMOKE_COST: i64 = 750;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
        let trip_json = serde_json::to_string(&trip)?;

        driver.goto(&ctx.base_url).await?;
        ctx.bridge.clear_slot(&itinerary_key(&trip.destination)).await?;
        ctx.bridge.write_slot(TRIP_DETAILS_KEY, &trip_json).await?;
        driver.refresh().await?;

        let title = driver
            .find(By::Id("trip-destination-title"))
            .await
            .context("planner did not render")?
            .text()
            .await?;
        let expected_title = format!("Your Trip to {}", trip.destination);
        ensure!(title == expected_title, "title {title:?}, expected {expected_title:?}");

        ctx.bridge.ensure_available().await?;
        let before = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  🌐 Planner loaded for {}: {before:?}", trip.destination);
        }
        ensure!(
            before.destination.as_deref() == Some(trip.destination.as_str())
                && before
                    .budget
                    .is_some_and(|b| (b - trip.budget).abs() < f64::EPSILON),
            "bridge reports a different trip: {before:?}"
        );
        let spent_before = before.spent.unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let expected_remaining = trip.budget - spent_before as f64;
        ensure!(
            before
                .remaining
                .is_some_and(|r| (r - expected_remaining).abs() < 0.01),
            "remaining {:?}, expected {expected_remaining}",
            before.remaining
        );
        ensure!(
            before
                .day_label
                .as_deref()
                .is_some_and(|label| label.starts_with("Day ")),
            "day label {:?}",
            before.day_label
        );

        let date = trip.start_date.format("%Y-%m-%d").to_string();
        ctx.bridge.type_into("place-name", "Smoke test dinner").await?;
        ctx.bridge.type_into("item-date", &date).await?;
        ctx.bridge.type_into("item-cost", &SMOKE_COST.to_string()).await?;
        driver.find(By::Id("add-item-btn")).await?.click().await?;
        if ctx.verbose {
            println!("  🖱️  Submitted {SMOKE_COST} on {date}");
        }

        tokio::time::sleep(Duration::from_millis(300)).await;

        let after = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  📊 Final state: {after:?}");
        }
        let expected_spent = before.spent.unwrap_or(0) + SMOKE_COST;
        ensure!(
            after.spent == Some(expected_spent),
            "spent {:?}, expected {expected_spent}",
            after.spent
        );
        ensure!(
            after.item_count == before.item_count.map(|n| n + 1),
            "item count {:?} after add, was {:?}",
            after.item_count,
            before.item_count
        );

        ctx.bridge.reset().await?;
        tokio::time::sleep(Duration::from_millis(500)).await;
        driver.find(By::Id("trip-destination-title")).await?;
        let reseeded = ctx.bridge.state().await?;
        ensure!(
            reseeded.item_count == before.item_count && reseeded.spent == before.spent,
            "reset did not restore the seeded plan: {reseeded:?}"
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke Test", smoke_check))
    }
}

fn smoke_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("smoke");
    let mut session = open_session(ctx, &storage, &trip)?;

    ensure!(
        session.title() == format!("Your Trip to {}", trip.destination),
        "title {:?}",
        session.title()
    );
    let summary = session.summary();
    ensure!(
        (summary.budget - trip.budget).abs() < f64::EPSILON,
        "budget {} != {}",
        summary.budget,
        trip.budget
    );

    let before = summary.spent;
    let form = tripbudget_core::ItemForm {
        place: "Smoke test dinner".into(),
        date: trip.start_date.format("%Y-%m-%d").to_string(),
        cost: SMOKE_COST.to_string(),
        notes: String::new(),
    };
    session.add(&form, STAMP + 1)?;
    let after = session.summary();
    ensure!(
        after.spent == before + SMOKE_COST,
        "spent {} after add, expected {}",
        after.spent,
        before + SMOKE_COST
    );
    ensure!(
        after.progress_label().ends_with("% Spent"),
        "label {}",
        after.progress_label()
    );
    Ok(())
}
