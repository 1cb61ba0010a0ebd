use yew::prelude::*;

pub mod bootstrap;
pub mod handlers;
pub mod state;
pub mod test_bridge;
pub mod view;

pub use handlers::AppHandlers;
pub use state::{AppState, BootStatus};

#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);
    test_bridge::use_test_bridge(&app_state);

    let handlers = AppHandlers::new(&app_state);
    view::render_app(&app_state, &handlers)
}

#[cfg(test)]
mod tests {
    use super::App;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn app_starts_in_loading_state() {
        let html = block_on(LocalServerRenderer::<App>::new().render());
        assert!(html.contains("Loading your trip"));
    }
}
