#[cfg(any(target_arch = "wasm32", test))]
use crate::app::state::BootStatus;
use crate::app::state::AppState;
#[cfg(any(target_arch = "wasm32", test))]
use crate::storage::BrowserStorage;
#[cfg(any(target_arch = "wasm32", test))]
use tripbudget_core::{
    Catalog, CatalogError, KeyValueStorage, PlannerError, PlannerSession, bootstrap,
};
use yew::prelude::*;

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone)]
struct BootstrapHandles {
    status: UseStateHandle<BootStatus>,
    session: UseStateHandle<Option<PlannerSession<BrowserStorage>>>,
}

#[cfg(any(target_arch = "wasm32", test))]
fn handles_from_state(app_state: &AppState) -> BootstrapHandles {
    BootstrapHandles {
        status: app_state.status.clone(),
        session: app_state.session.clone(),
    }
}

/// Turn a catalog fetch result into a session. A catalog failure returns
/// before `localStorage` is read.
#[cfg(any(target_arch = "wasm32", test))]
fn open_session<S: KeyValueStorage>(
    loaded: Result<Catalog, CatalogError>,
    storage: S,
    stamp: i64,
) -> Result<PlannerSession<S>, PlannerError> {
    let catalog = loaded?;
    bootstrap(storage, &catalog, stamp)
}

#[cfg(any(target_arch = "wasm32", test))]
fn finish_bootstrap(
    handles: &BootstrapHandles,
    outcome: Result<PlannerSession<BrowserStorage>, PlannerError>,
) {
    match outcome {
        Ok(session) => {
            handles.session.set(Some(session));
            handles.status.set(BootStatus::Ready);
        }
        Err(PlannerError::NoTrip) => {
            log::warn!("no trip stored, returning to {}", crate::LANDING_PAGE);
            crate::dom::alert(PlannerError::NoTrip.user_message());
            handles.status.set(BootStatus::Failed);
            crate::dom::redirect(crate::LANDING_PAGE);
        }
        Err(err) => {
            log::error!("startup failed: {err}");
            crate::dom::alert(err.user_message());
            handles.status.set(BootStatus::Failed);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let handles = handles_from_state(app_state);

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let loaded = crate::catalog::fetch_catalog(crate::catalog::CATALOG_URL).await;
            let outcome = open_session(loaded, BrowserStorage, crate::dom::now_millis());
            finish_bootstrap(&handles, outcome);
        });
        || {}
    });
}

/// Outside a browser there is nothing to load; the page stays in `Loading`.
#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let _ = app_state;
}
