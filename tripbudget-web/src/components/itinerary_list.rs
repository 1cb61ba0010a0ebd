use tripbudget_core::{ItineraryItem, fmt_cost, fmt_long_date};
use yew::prelude::*;

pub const EMPTY_ITINERARY: &str = "Your itinerary is empty. Add an item to get started!";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Items in display order.
    pub items: Vec<ItineraryItem>,
    #[prop_or_default]
    pub on_remove: Callback<i64>,
}

#[function_component(ItineraryList)]
pub fn itinerary_list(p: &Props) -> Html {
    let body = if p.items.is_empty() {
        html! { <p class="empty-state">{ EMPTY_ITINERARY }</p> }
    } else {
        p.items
            .iter()
            .map(|item| render_item(item, &p.on_remove))
            .collect::<Html>()
    };
    html! {
        <section class="panel">
            <h3>{ "Itinerary" }</h3>
            <div id="itinerary-list">{ body }</div>
        </section>
    }
}

fn render_item(item: &ItineraryItem, on_remove: &Callback<i64>) -> Html {
    let id = item.id;
    let onclick = on_remove.reform(move |_: MouseEvent| id);
    html! {
        <div class="itinerary-item" key={id.to_string()}>
            <div class="item-header">
                <div class="item-place-date">
                    <h3>{ item.place.clone() }</h3>
                    <span>{ fmt_long_date(item.date) }</span>
                </div>
                <div class="item-actions">
                    <span class="item-cost">{ fmt_cost(item.cost) }</span>
                    <button class="remove-item-btn" data-id={id.to_string()} title="Remove item" {onclick}>
                        { "\u{d7}" }
                    </button>
                </div>
            </div>
            <div class="item-notes"><p>{ item.notes.clone() }</p></div>
        </div>
    }
}
