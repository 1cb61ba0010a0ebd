use tripbudget_core::Place;
use tripbudget_core::format::CURRENCY_SYMBOL;
use yew::prelude::*;

pub const NO_SUGGESTIONS: &str = "No suggestions available for this city yet.";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub places: Vec<Place>,
    /// Fired with the card's place when its add button is pressed.
    #[prop_or_default]
    pub on_pick: Callback<Place>,
}

#[function_component(SuggestionList)]
pub fn suggestion_list(p: &Props) -> Html {
    let body = if p.places.is_empty() {
        html! { <p class="empty-state">{ NO_SUGGESTIONS }</p> }
    } else {
        html! {
            <div class="suggestions">
                { for p.places.iter().map(|place| render_card(place, &p.on_pick)) }
            </div>
        }
    };
    html! {
        <section class="panel">
            <h3>{ "Suggestions" }</h3>
            <div id="suggestions-container">{ body }</div>
        </section>
    }
}

fn render_card(place: &Place, on_pick: &Callback<Place>) -> Html {
    let picked = place.clone();
    let onclick = on_pick.reform(move |_: MouseEvent| picked.clone());
    html! {
        <div class="suggestion-card">
            <h4>{ place.name.clone() }{ " " }<span class="place-type">{ place.kind.clone() }</span></h4>
            <p>{ place.description.clone() }</p>
            <div class="suggestion-footer">
                <span>{ "Est. Cost: " }<b>{ format!("{CURRENCY_SYMBOL}{}", place.cost_text()) }</b></span>
                <button
                    class="add-suggestion-btn"
                    data-name={place.name.clone()}
                    data-cost={place.cost_text()}
                    {onclick}
                >
                    { "Add" }
                </button>
            </div>
        </div>
    }
}
