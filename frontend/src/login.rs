use web_sys::HtmlInputElement;
use yew::prelude::*;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_login: Callback<String>,
    pub on_view_results: Callback<()>,
    pub busy: bool,
}

#[function_component(LoginForm)]
pub fn login_form(props: &Props) -> Html {
    let code = use_state(String::new);

    let oninput = {
        let code = code.clone();
        Callback::from(move |e: InputEvent| {
            code.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onsubmit = {
        let code = code.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_login.emit((*code).clone());
        })
    };

    let on_view_results = {
        let cb = props.on_view_results.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class={CARD}>
            <form class={SPACE_Y_LG} {onsubmit}>
                <div class={INPUT_GROUP}>
                    <label class={TEXT_LABEL} for="login-code">{"Enter your code"}</label>
                    <input
                        id="login-code"
                        type="password"
                        autocomplete="off"
                        class={INPUT_BASE}
                        value={(*code).clone()}
                        {oninput}
                    />
                </div>
                <div class="flex flex-col sm:flex-row gap-4">
                    <button
                        type="submit"
                        disabled={props.busy || code.trim().is_empty()}
                        class={classes!(button(BUTTON_PRIMARY), "flex-1")}
                    >
                        {"Log in"}
                    </button>
                    <button
                        type="button"
                        disabled={props.busy}
                        onclick={on_view_results}
                        class={classes!(button(BUTTON_SECONDARY), "flex-1")}
                    >
                        {"View Results"}
                    </button>
                </div>
            </form>
        </div>
    }
}
