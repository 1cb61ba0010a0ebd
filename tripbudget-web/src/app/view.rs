use crate::app::handlers::AppHandlers;
use crate::app::state::{AppState, BootStatus};
use crate::components::item_form::ItemEntry;
use crate::components::itinerary_list::ItineraryList;
use crate::components::suggestion_list::SuggestionList;
use crate::components::summary_panel::SummaryPanel;
use chrono::NaiveDate;
use tripbudget_core::{ItemForm, ItineraryItem, KeyValueStorage, PlannerSession};
use yew::prelude::*;

pub fn render_app(state: &AppState, handlers: &AppHandlers) -> Html {
    match (*state.status, (*state.session).as_ref()) {
        (BootStatus::Ready, Some(session)) => {
            render_planner(session, &state.form, *state.today, handlers)
        }
        (BootStatus::Failed, _) => html! {
            <main class="planner"><p class="status">{ "Trip unavailable." }</p></main>
        },
        _ => html! {
            <main class="planner"><p class="status">{ "Loading your trip\u{2026}" }</p></main>
        },
    }
}

pub fn render_planner<S: KeyValueStorage>(
    session: &PlannerSession<S>,
    form: &ItemForm,
    today: NaiveDate,
    handlers: &AppHandlers,
) -> Html {
    let items: Vec<ItineraryItem> = session.sorted_items().into_iter().cloned().collect();
    html! {
        <main class="planner">
            <h1 id="trip-destination-title">{ session.title() }</h1>
            <SummaryPanel summary={session.summary()} days={session.day_progress(today)} />
            <ItemEntry
                form={form.clone()}
                on_edit={handlers.edit_form.clone()}
                on_submit={handlers.add_item.clone()}
            />
            <ItineraryList {items} on_remove={handlers.remove_item.clone()} />
            <SuggestionList
                places={session.suggestions().to_vec()}
                on_pick={handlers.pick_suggestion.clone()}
            />
        </main>
    }
}
