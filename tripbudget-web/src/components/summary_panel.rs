use crate::components::progress_bar::ProgressBar;
use tripbudget_core::{BudgetSummary, DayProgress};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub summary: BudgetSummary,
    pub days: DayProgress,
}

/// Budget figures with the spend and day progress bars.
#[function_component(SummaryPanel)]
pub fn summary_panel(p: &Props) -> Html {
    let summary = &p.summary;
    html! {
        <section class="panel summary">
            <div class="summary-grid">
                <div>
                    <h4>{ "Total Budget" }</h4>
                    <p id="total-budget">{ summary.budget_text() }</p>
                </div>
                <div>
                    <h4>{ "Amount Spent" }</h4>
                    <p id="amount-spent">{ summary.spent_text() }</p>
                </div>
                <div>
                    <h4>{ "Remaining" }</h4>
                    <p id="budget-remaining" class={summary.remaining_class()}>
                        { summary.remaining_text() }
                    </p>
                </div>
            </div>
            <ProgressBar
                id="budget-progress-bar"
                text_id="budget-progress-text"
                percent={summary.bar_percent}
                label={summary.progress_label()}
                warning={summary.over_budget}
            />
            <ProgressBar
                id="days-progress-bar"
                text_id="days-progress-text"
                percent={p.days.percent}
                label={p.days.label()}
            />
        </section>
    }
}
