/// Popup UI: cascading platform, channel and version selection

use crate::host::BrowserStorage;
use crate::message::Message;
use crate::selector::{Selection, SelectorContext};
use crate::storage::load_releases;
use crate::ui::components::ReleaseSelect;
use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn sendMessage(message: JsValue) -> Result<JsValue, JsValue>;

    fn closePopup();
}

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Loaded(SelectorContext),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);

    // Read the stored snapshot once on open
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let releases = match load_releases(&BrowserStorage).await {
                    Ok(releases) => releases,
                    Err(e) => {
                        log::warn!("{}", e);
                        None
                    }
                };
                state.set(PopupState::Loaded(SelectorContext::from_releases(releases)));
            });
            || ()
        });
    }

    let body = match &*state {
        PopupState::Loading => html! {
            <div class="loading-text-center">
                <Spinner />
            </div>
        },
        PopupState::Loaded(context) => selector_view(&state, context),
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Firefox Release Notes"}</h1>
            {body}
        </div>
    }
}

/// Change handlers exist only for interactive controls of a ready selection
fn selector_view(state: &UseStateHandle<PopupState>, context: &SelectorContext) -> Html {
    let view = context.view();
    let selection = match context {
        SelectorContext::Ready(selection) => Some(selection),
        SelectorContext::NoData => None,
    };

    // Apply a change to a copy of the selection and store it back
    let handler = |interactive: bool, apply: fn(&mut Selection, &str)| {
        let selection = selection.filter(|_| interactive)?.clone();
        let state = state.clone();
        Some(Callback::from(move |value: String| {
            let mut next = selection.clone();
            apply(&mut next, &value);
            state.set(PopupState::Loaded(SelectorContext::Ready(next)));
        }))
    };

    let on_submit = selection.cloned().map(|selection| {
        Callback::from(move |_: MouseEvent| {
            match selection.submit() {
                Some(Ok(url)) => open_release_notes(url.to_string()),
                Some(Err(e)) => log::warn!("{}", e),
                None => {}
            }
        })
    });

    html! {
        <div class="flex-column-gap">
            <ReleaseSelect
                id="select-platform"
                label="Platform"
                choices={view.platform.choices.clone()}
                selected={view.platform.selected.clone()}
                onchange={handler(view.platform.interactive, Selection::choose_platform)}
            />
            <ReleaseSelect
                id="select-channel"
                label="Channel"
                choices={view.channel.choices.clone()}
                selected={view.channel.selected.clone()}
                onchange={handler(view.channel.interactive, Selection::choose_channel)}
            />
            <ReleaseSelect
                id="select-version"
                label="Version"
                choices={view.version.choices.clone()}
                selected={view.version.selected.clone()}
                onchange={handler(view.version.interactive, Selection::choose_version)}
            />
            if let (true, Some(on_submit)) = (view.submit_visible, on_submit) {
                <Button onclick={on_submit} variant={ButtonVariant::Primary} block={true}>
                    {"View Release Notes"}
                </Button>
            }
        </div>
    }
}

// Helper functions

/// Ask the background page to open the URL, then close the popup
fn open_release_notes(url: String) {
    spawn_local(async move {
        let message = Message::OpenTab { url };

        match serde_wasm_bindgen::to_value(&message) {
            Ok(message_js) => {
                if let Err(e) = sendMessage(message_js).await {
                    log::warn!("Failed to send openTab: {:?}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize message: {:?}", e),
        }

        closePopup();
    });
}
