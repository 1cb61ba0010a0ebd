use super::shared::{BridgeState, snapshot};
use crate::app::state::AppState;
use crate::dom;
use crate::storage::BrowserStorage;
use std::cell::RefCell;
use std::rc::Rc;
use tripbudget_core::{KeyValueStorage, itinerary_key};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

struct BridgeBindings {
    _state: Closure<dyn FnMut() -> JsValue>,
    _reset: Closure<dyn FnMut()>,
}

impl BridgeBindings {
    fn keep(&self) {
        let _ = (&self._state, &self._reset);
    }
}

fn test_mode_enabled() -> bool {
    dom::query_param("test").as_deref() == Some("1")
}

/// Clear the trip's itinerary slot and reload so startup seeds again.
fn reset_itinerary(latest: &RefCell<Option<BridgeState>>) {
    let Some(destination) = latest.borrow().as_ref().map(|s| s.destination.clone()) else {
        return;
    };
    if let Err(err) = BrowserStorage.remove_item(&itinerary_key(&destination)) {
        log::warn!("bridge reset failed: {err}");
        return;
    }
    dom::reload();
}

fn install(window: &web_sys::Window, bindings: &BridgeBindings) {
    let bridge = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("state"),
        bindings._state.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("reset"),
        bindings._reset.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(window, &JsValue::from_str("__tripbudgetTest"), &bridge);
}

#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let latest = use_mut_ref(|| None::<BridgeState>);

    // Closures read the latest render's snapshot, not the one they were built with.
    *latest.borrow_mut() = (*app_state.session)
        .as_ref()
        .map(|session| snapshot(session, *app_state.today));

    use_effect_with((), move |()| {
        if test_mode_enabled() {
            if let Some(window) = dom::window() {
                let state_latest = Rc::clone(&latest);
                let state_fn = Closure::wrap(Box::new(move || {
                    state_latest
                        .borrow()
                        .as_ref()
                        .and_then(|state| serde_wasm_bindgen::to_value(state).ok())
                        .unwrap_or(JsValue::NULL)
                }) as Box<dyn FnMut() -> JsValue>);

                let reset_latest = Rc::clone(&latest);
                let reset = Closure::wrap(Box::new(move || {
                    reset_itinerary(&reset_latest);
                }) as Box<dyn FnMut()>);

                let bindings = BridgeBindings {
                    _state: state_fn,
                    _reset: reset,
                };
                install(&window, &bindings);
                bindings.keep();
                *bridge_handle.borrow_mut() = Some(bindings);
                log::info!("test bridge installed");
            }
        }
        || {}
    });
}
