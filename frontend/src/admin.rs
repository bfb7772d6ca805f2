use web_sys::HtmlInputElement;
use yew::prelude::*;
use shared::validation::{MAX_PROJECT_NAME_LENGTH, normalize_reset_names};
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_reset: Callback<Vec<String>>,
    pub busy: bool,
}

/// Two project-name inputs and a two-step reset.
#[function_component(AdminPanel)]
pub fn admin_panel(props: &Props) -> Html {
    let names = use_state(|| vec![String::new(), String::new()]);
    let confirming = use_state(|| false);

    let name_input = |index: usize| {
        let names = names.clone();
        let confirming = confirming.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*names).clone();
            next[index] = e.target_unchecked_into::<HtmlInputElement>().value();
            names.set(next);
            confirming.set(false);
        })
    };

    let validation = normalize_reset_names(&names);
    let on_request = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(true))
    };
    let on_cancel = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(false))
    };
    let on_confirm = {
        let on_reset = props.on_reset.clone();
        let confirming = confirming.clone();
        let names = validation.clone().ok();
        Callback::from(move |_| {
            if let Some(names) = names.clone() {
                on_reset.emit(names);
            }
            confirming.set(false);
        })
    };

    html! {
        <div class={CARD}>
            <h2 class={HEADING_SM}>{"Admin: reset vote"}</h2>
            <p class={combine_classes(TEXT_MUTED, "mb-4")}>
                {"Archives all submissions, clears every voter's status and starts a new vote between two projects."}
            </p>
            <div class={SPACE_Y_BASE}>
                {for (0..2).map(|index| html! {
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL}>{format!("Project {}", index + 1)}</label>
                        <input
                            type="text"
                            maxlength={MAX_PROJECT_NAME_LENGTH.to_string()}
                            class={INPUT_BASE}
                            value={names[index].clone()}
                            oninput={name_input(index)}
                        />
                    </div>
                })}
            </div>
            {if let Err(e) = &validation {
                html! { <p class="text-sm text-red-500 font-semibold mt-2">{e.to_string()}</p> }
            } else { html! {} }}
            <div class="flex gap-4 mt-6">
                {if *confirming {
                    html! {
                        <>
                            <button type="button" disabled={props.busy} onclick={on_confirm}
                                class={classes!(button(BUTTON_DANGER), "flex-1")}>
                                {"Confirm reset"}
                            </button>
                            <button type="button" onclick={on_cancel}
                                class={classes!(button(BUTTON_SECONDARY), "flex-1")}>
                                {"Cancel"}
                            </button>
                        </>
                    }
                } else {
                    html! {
                        <button type="button" disabled={props.busy || validation.is_err()} onclick={on_request}
                            class={classes!(button(BUTTON_DANGER), "flex-1")}>
                            {"Reset votes"}
                        </button>
                    }
                }}
            </div>
        </div>
    }
}
