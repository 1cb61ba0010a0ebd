use crate::storage::BrowserStorage;
use chrono::NaiveDate;
use tripbudget_core::{ItemForm, PlannerSession};
use yew::prelude::*;

/// Where startup stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStatus {
    Loading,
    Ready,
    /// Startup stopped; the user has already been alerted.
    Failed,
}

#[derive(Clone)]
pub struct AppState {
    pub status: UseStateHandle<BootStatus>,
    pub session: UseStateHandle<Option<PlannerSession<BrowserStorage>>>,
    pub form: UseStateHandle<ItemForm>,
    pub today: UseStateHandle<NaiveDate>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        status: use_state(|| BootStatus::Loading),
        session: use_state(|| None::<PlannerSession<BrowserStorage>>),
        form: use_state(ItemForm::default),
        today: use_state(crate::dom::today),
    }
}

impl AppState {
    #[must_use]
    pub fn ready(&self) -> bool {
        *self.status == BootStatus::Ready && self.session.is_some()
    }
}
