use crate::app::state::AppState;
use crate::dom;
use tripbudget_core::{
    FormField, ItemForm, ItineraryChange, ItineraryCommand, KeyValueStorage, Place,
    PlannerSession, StoreError,
};
use yew::prelude::*;

pub const REMOVE_PROMPT: &str = "Are you sure you want to remove this item?";
/// Field focused after a suggestion fills the form.
pub const NOTES_FIELD_ID: &str = "item-notes";

#[derive(Clone)]
pub struct AppHandlers {
    pub add_item: Callback<()>,
    pub remove_item: Callback<i64>,
    pub pick_suggestion: Callback<Place>,
    pub edit_form: Callback<(FormField, String)>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            add_item: build_add_item(state),
            remove_item: build_remove_item(state),
            pick_suggestion: build_pick_suggestion(state),
            edit_form: build_edit_form(state),
        }
    }
}

/// Run a command against a copy of the session. The copy is returned only
/// when the command went through, so a failed write leaves the view as it was.
pub(crate) fn run_command<S: KeyValueStorage + Clone>(
    session: &PlannerSession<S>,
    command: &ItineraryCommand,
    stamp: i64,
) -> Result<(PlannerSession<S>, ItineraryChange), StoreError> {
    let mut next = session.clone();
    let change = next.apply(command, stamp)?;
    Ok((next, change))
}

fn report_failure(err: &StoreError) {
    match err {
        StoreError::Rejected(rejected) => dom::alert(rejected.user_message()),
        StoreError::Storage(storage) => log::error!("could not save itinerary: {storage}"),
    }
}

fn build_add_item(state: &AppState) -> Callback<()> {
    let session_handle = state.session.clone();
    let form_handle = state.form.clone();
    Callback::from(move |()| {
        let Some(session) = (*session_handle).as_ref() else {
            return;
        };
        let command = ItineraryCommand::Add((*form_handle).clone());
        match run_command(session, &command, dom::now_millis()) {
            Ok((next, _)) => {
                session_handle.set(Some(next));
                form_handle.set(ItemForm::default());
            }
            Err(err) => report_failure(&err),
        }
    })
}

fn build_remove_item(state: &AppState) -> Callback<i64> {
    let session_handle = state.session.clone();
    Callback::from(move |id: i64| {
        let Some(session) = (*session_handle).as_ref() else {
            return;
        };
        if !dom::confirm(REMOVE_PROMPT) {
            return;
        }
        match run_command(session, &ItineraryCommand::Remove(id), 0) {
            Ok((next, ItineraryChange::Removed(_))) => session_handle.set(Some(next)),
            Ok(_) => {}
            Err(err) => report_failure(&err),
        }
    })
}

fn build_pick_suggestion(state: &AppState) -> Callback<Place> {
    let form_handle = state.form.clone();
    Callback::from(move |place: Place| {
        let mut form = (*form_handle).clone();
        form.prefill(&place);
        form_handle.set(form);
        dom::focus_element(NOTES_FIELD_ID);
    })
}

fn build_edit_form(state: &AppState) -> Callback<(FormField, String)> {
    let form_handle = state.form.clone();
    Callback::from(move |(field, value): (FormField, String)| {
        let mut form = (*form_handle).clone();
        form.set(field, value);
        form_handle.set(form);
    })
}
