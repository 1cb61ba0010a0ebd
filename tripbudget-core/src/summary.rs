//! Derived totals and progress. Always recomputed from the current items.
use crate::format::fmt_currency;
use crate::model::{ItineraryItem, TripDetails};
use chrono::NaiveDate;

/// Budget figures for the summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub budget: f64,
    pub spent: i64,
    pub remaining: f64,
    /// Unclamped share of the budget spent, in percent.
    pub percent_spent: f64,
    /// Progress bar width, clamped to 100.
    pub bar_percent: f64,
    /// Switches the bar to the warning color.
    pub over_budget: bool,
    /// Switches the remaining figure from `remaining` to `spent` styling.
    pub remaining_negative: bool,
}

impl BudgetSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(trip: &TripDetails, items: &[ItineraryItem]) -> Self {
        let spent: i64 = items.iter().map(|item| item.cost).sum();
        let spent_f = spent as f64;
        let remaining = trip.budget - spent_f;
        let percent_spent = if trip.budget > 0.0 {
            spent_f / trip.budget * 100.0
        } else if spent > 0 {
            f64::INFINITY
        } else {
            0.0
        };
        Self {
            budget: trip.budget,
            spent,
            remaining,
            percent_spent,
            bar_percent: percent_spent.min(100.0),
            over_budget: percent_spent > 100.0,
            remaining_negative: remaining < 0.0,
        }
    }

    /// `"<n>% Spent"` from the clamped percentage.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}% Spent", self.bar_percent.round())
    }

    #[must_use]
    pub fn budget_text(&self) -> String {
        fmt_currency(self.budget)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spent_text(&self) -> String {
        fmt_currency(self.spent as f64)
    }

    #[must_use]
    pub fn remaining_text(&self) -> String {
        fmt_currency(self.remaining)
    }

    #[must_use]
    pub const fn remaining_class(&self) -> &'static str {
        if self.remaining_negative {
            "spent"
        } else {
            "remaining"
        }
    }
}

/// Which day of the trip today is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayProgress {
    pub elapsed: u32,
    pub duration: u32,
    pub percent: f64,
}

impl DayProgress {
    /// Calendar days since the start, plus one, clamped to `[1, duration]`.
    #[must_use]
    pub fn compute(trip: &TripDetails, today: NaiveDate) -> Self {
        let duration = trip.duration;
        let raw = today
            .signed_duration_since(trip.start_date)
            .num_days()
            .saturating_add(1);
        let mut elapsed = raw.max(1);
        if elapsed > i64::from(duration) {
            elapsed = i64::from(duration);
        }
        let elapsed = u32::try_from(elapsed).unwrap_or(0);
        let percent = if duration == 0 {
            0.0
        } else {
            f64::from(elapsed) / f64::from(duration) * 100.0
        };
        Self {
            elapsed,
            duration,
            percent,
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Day {} of {}", self.elapsed, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(budget: f64, duration: u32) -> TripDetails {
        TripDetails {
            destination: "Goa".into(),
            budget,
            start_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            duration,
        }
    }

    fn item(id: i64, cost: i64) -> ItineraryItem {
        ItineraryItem {
            id,
            place: format!("Place {id}"),
            date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            cost,
            notes: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn summary_sums_costs() {
        let summary = BudgetSummary::compute(&trip(10_000.0, 3), &[item(1, 2_500), item(2, 500)]);
        assert_eq!(summary.spent, 3_000);
        assert!((summary.remaining - 7_000.0).abs() < f64::EPSILON);
        assert!((summary.bar_percent - 30.0).abs() < 1e-9);
        assert!(!summary.over_budget);
        assert_eq!(summary.progress_label(), "30% Spent");
        assert_eq!(summary.spent_text(), "₹3,000");
        assert_eq!(summary.remaining_text(), "₹7,000");
        assert_eq!(summary.remaining_class(), "remaining");
    }

    #[test]
    fn over_budget_clamps_bar_and_flags_warning() {
        let summary = BudgetSummary::compute(&trip(1_000.0, 1), &[item(1, 1_500)]);
        assert!((summary.percent_spent - 150.0).abs() < 1e-9);
        assert!((summary.bar_percent - 100.0).abs() < f64::EPSILON);
        assert!(summary.over_budget);
        assert!(summary.remaining_negative);
        assert_eq!(summary.remaining_class(), "spent");
        assert_eq!(summary.progress_label(), "100% Spent");
        assert_eq!(summary.remaining_text(), "₹-500");
    }

    #[test]
    fn exactly_on_budget_is_not_over() {
        let summary = BudgetSummary::compute(&trip(1_000.0, 1), &[item(1, 1_000)]);
        assert!(!summary.over_budget);
        assert!(!summary.remaining_negative);
    }

    #[test]
    fn zero_budget_handles_empty_and_spent() {
        let empty = BudgetSummary::compute(&trip(0.0, 1), &[]);
        assert_eq!(empty.progress_label(), "0% Spent");
        assert!(!empty.over_budget);
        let spent = BudgetSummary::compute(&trip(0.0, 1), &[item(1, 5)]);
        assert!(spent.over_budget);
        assert_eq!(spent.progress_label(), "100% Spent");
    }

    #[test]
    fn day_progress_counts_from_start() {
        let trip = trip(1.0, 5);
        let progress = DayProgress::compute(&trip, day(2026, 12, 22));
        assert_eq!(progress.elapsed, 3);
        assert_eq!(progress.label(), "Day 3 of 5");
        assert!((progress.percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn day_progress_clamps_to_trip_window() {
        let trip = trip(1.0, 5);
        assert_eq!(DayProgress::compute(&trip, day(2020, 1, 1)).elapsed, 1);
        assert_eq!(DayProgress::compute(&trip, day(2026, 12, 20)).elapsed, 1);
        assert_eq!(DayProgress::compute(&trip, day(2026, 12, 24)).elapsed, 5);
        assert_eq!(DayProgress::compute(&trip, day(2031, 6, 1)).elapsed, 5);
    }

    #[test]
    fn zero_day_trip_reports_nothing() {
        let progress = DayProgress::compute(&trip(1.0, 0), day(2026, 12, 21));
        assert_eq!(progress.elapsed, 0);
        assert!(progress.percent.abs() < f64::EPSILON);
    }
}
