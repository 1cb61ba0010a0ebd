use chrono::NaiveDate;
use serde::Serialize;
use tripbudget_core::{KeyValueStorage, PlannerSession};

/// What `__tripbudgetTest.state()` reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BridgeState {
    pub destination: String,
    pub budget: f64,
    pub spent: i64,
    pub remaining: f64,
    pub item_count: usize,
    pub day_label: String,
}

pub(super) fn snapshot<S: KeyValueStorage>(
    session: &PlannerSession<S>,
    today: NaiveDate,
) -> BridgeState {
    let summary = session.summary();
    BridgeState {
        destination: session.trip().destination.clone(),
        budget: summary.budget,
        spent: summary.spent,
        remaining: summary.remaining,
        item_count: session.store().len(),
        day_label: session.day_progress(today).label(),
    }
}
