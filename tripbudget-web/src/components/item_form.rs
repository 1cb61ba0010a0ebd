//! Entry form for a new itinerary item. Field values live in app state.
use tripbudget_core::{FormField, ItemForm};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub form: ItemForm,
    #[prop_or_default]
    pub on_edit: Callback<(FormField, String)>,
    #[prop_or_default]
    pub on_submit: Callback<()>,
}

fn input_edit(on_edit: &Callback<(FormField, String)>, field: FormField) -> Callback<InputEvent> {
    on_edit.reform(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        (field, input.value())
    })
}

#[function_component(ItemEntry)]
pub fn item_entry(p: &Props) -> Html {
    let on_notes = p.on_edit.reform(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        (FormField::Notes, area.value())
    });
    let onclick = p.on_submit.reform(|_: MouseEvent| ());
    html! {
        <section class="panel item-form">
            <h3>{ "Add to Itinerary" }</h3>
            <input
                id="place-name"
                type="text"
                placeholder="Place or activity"
                value={p.form.place.clone()}
                oninput={input_edit(&p.on_edit, FormField::Place)}
            />
            <input
                id="item-date"
                type="date"
                value={p.form.date.clone()}
                oninput={input_edit(&p.on_edit, FormField::Date)}
            />
            <input
                id="item-cost"
                type="number"
                placeholder="Cost"
                value={p.form.cost.clone()}
                oninput={input_edit(&p.on_edit, FormField::Cost)}
            />
            <textarea
                id="item-notes"
                placeholder="Notes"
                value={p.form.notes.clone()}
                oninput={on_notes}
            />
            <button id="add-item-btn" type="button" {onclick}>{ "Add Item" }</button>
        </section>
    }
}
