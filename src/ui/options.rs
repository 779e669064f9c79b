/// Options page: which menu entries to show and how runs behave

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::browser::{message, BrowserHost};
use crate::config::{
    load_config, save_config, UniqConfig, KEY_CLOSE_PINNED, KEY_MENU_ITEM, KEY_NOTIFICATION,
};
use crate::tab_data::KeyType;

const KEY_SAVE: &str = "save";

#[derive(Clone, PartialEq)]
enum PageState {
    Loading,
    Idle,
    Saved,
    Error(String),
}

fn label(key: &str) -> String {
    message(key, &[])
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| PageState::Loading);
    let config = use_state(UniqConfig::default);

    // Load settings on mount
    {
        let state = state.clone();
        let config = config.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_config(&BrowserHost).await {
                    Ok(loaded) => {
                        config.set(loaded);
                        state.set(PageState::Idle);
                    }
                    Err(e) => {
                        state.set(PageState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_toggle_key = {
        let config = config.clone();
        let state = state.clone();
        move |key_type: KeyType| {
            let config = config.clone();
            let state = state.clone();
            Callback::from(move |e: Event| {
                if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                    let mut new_config = (*config).clone();
                    new_config.set_menu_item(key_type, input.checked());
                    config.set(new_config);
                    state.set(PageState::Idle);
                }
            })
        }
    };

    let on_toggle_flag = {
        let config = config.clone();
        let state = state.clone();
        move |apply: fn(&mut UniqConfig, bool)| {
            let config = config.clone();
            let state = state.clone();
            Callback::from(move |e: Event| {
                if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                    let mut new_config = (*config).clone();
                    apply(&mut new_config, input.checked());
                    config.set(new_config);
                    state.set(PageState::Idle);
                }
            })
        }
    };

    let on_save = {
        let config = config.clone();
        let state = state.clone();

        Callback::from(move |_| {
            let config = (*config).clone();
            let state = state.clone();

            spawn_local(async move {
                match save_config(&BrowserHost, &config).await {
                    Ok(()) => state.set(PageState::Saved),
                    Err(e) => state.set(PageState::Error(format!("Failed to save: {}", e))),
                }
            });
        })
    };

    let is_loading = matches!(*state, PageState::Loading);

    html! {
        <div class="padding-20">
            if is_loading {
                <Spinner />
            }

            <h2 class="options-title">{label(KEY_MENU_ITEM)}</h2>
            <ul class="options-list">
                {for KeyType::ALL.iter().map(|key_type| html! {
                    <li>
                        <label>
                            <input
                                type="checkbox"
                                id={key_type.as_str()}
                                checked={config.menu_item.contains(key_type)}
                                onchange={on_toggle_key(*key_type)}
                            />
                            {format!(" {} ", label(key_type.as_str()))}
                        </label>
                    </li>
                })}
            </ul>

            <label>
                <input
                    type="checkbox"
                    id={KEY_NOTIFICATION}
                    checked={config.notification}
                    onchange={on_toggle_flag(|c, checked| c.notification = checked)}
                />
                {format!(" {} ", label(KEY_NOTIFICATION))}
            </label>
            <br />
            <label>
                <input
                    type="checkbox"
                    id={KEY_CLOSE_PINNED}
                    checked={config.close_pinned}
                    onchange={on_toggle_flag(|c, checked| c.close_pinned = checked)}
                />
                {format!(" {} ", label(KEY_CLOSE_PINNED))}
            </label>

            <div class="message-top-margin">
                <Button onclick={on_save} disabled={is_loading} variant={ButtonVariant::Primary}>
                    {label(KEY_SAVE)}
                </Button>
            </div>

            {match &*state {
                PageState::Saved => html! {
                    <Alert r#type={AlertType::Success} title={"Saved"} inline={true}>
                    </Alert>
                },
                PageState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                PageState::Loading | PageState::Idle => html! {}
            }}
        </div>
    }
}
