use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub id: AttrValue,
    pub text_id: AttrValue,
    /// Bar width in percent; callers clamp it.
    pub percent: f64,
    pub label: AttrValue,
    #[prop_or_default]
    pub warning: bool,
}

#[function_component(ProgressBar)]
pub fn progress_bar(p: &Props) -> Html {
    let class = classes!("progress-bar", p.warning.then_some("over-budget"));
    let style = format!("width: {}%", p.percent);
    html! {
        <div class="progress-wrap">
            <div class="progress">
                <div id={p.id.clone()} {class} {style}></div>
            </div>
            <span id={p.text_id.clone()} class="progress-text">{ p.label.clone() }</span>
        </div>
    }
}
