/// Reusable UI components

use crate::selector::{Choices, PLACEHOLDER_VALUE};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReleaseSelectProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub choices: Choices,
    #[prop_or_default]
    pub selected: Option<String>,
    /// No handler means the control is inert
    #[prop_or_default]
    pub onchange: Option<Callback<String>>,
}

/// A `<select>` whose first entry is a hidden placeholder
#[function_component(ReleaseSelect)]
pub fn release_select(props: &ReleaseSelectProps) -> Html {
    let onchange = props.onchange.clone().map(|callback| {
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                callback.emit(select.value());
            }
        })
    });

    let nothing_selected = props.selected.is_none();

    html! {
        <div class="select-group">
            <label for={props.id.clone()} class="select-label">{props.label.clone()}</label>
            <select id={props.id.clone()} class="release-select" {onchange}>
                <option value={PLACEHOLDER_VALUE} disabled={true} hidden={true} selected={nothing_selected}>
                    {props.choices.placeholder}
                </option>
                {for props.choices.options.iter().map(|option| html! {
                    <option
                        key={option.value.clone()}
                        value={option.value.clone()}
                        selected={props.selected.as_deref() == Some(option.value.as_str())}
                    >
                        {&option.label}
                    </option>
                })}
            </select>
        </div>
    }
}
