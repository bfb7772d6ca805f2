use web_sys::HtmlInputElement;
use yew::prelude::*;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub project_names: Vec<String>,
    pub allocation: Vec<u32>,
    pub points_limit: u32,
    pub busy: bool,
    pub on_change: Callback<(usize, u32)>,
    pub on_submit: Callback<()>,
}

#[function_component(AllocationForm)]
pub fn allocation_form(props: &Props) -> Html {
    let total: u32 = props.allocation.iter().sum();
    let complete = total == props.points_limit;

    let on_submit = {
        let cb = props.on_submit.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class={SPACE_Y_LG}>
            <div class={SPACE_Y_BASE}>
                {for props.project_names.iter().enumerate().map(|(index, name)| {
                    let value = props.allocation.get(index).copied().unwrap_or(0);
                    let on_change = props.on_change.clone();
                    let onchange = Callback::from(move |e: Event| {
                        let input = e.target_unchecked_into::<HtmlInputElement>();
                        let points = input.value().parse::<u32>().unwrap_or(0);
                        on_change.emit((index, points));
                    });

                    html! {
                        <div class={CARD_SECTION}>
                            <div class={FLEX_BETWEEN}>
                                <label class={combine_classes(TEXT_LABEL, "break-words")} for={format!("slider-{}", index)}>
                                    {name}
                                </label>
                                <span class="text-2xl font-bold text-gray-200 w-12 text-right">{value}</span>
                            </div>
                            <input
                                id={format!("slider-{}", index)}
                                type="range"
                                min="0"
                                max={props.points_limit.to_string()}
                                step="1"
                                class={SLIDER}
                                value={value.to_string()}
                                disabled={props.busy}
                                {onchange}
                            />
                        </div>
                    }
                })}
            </div>

            <p class={classes!("text-lg", "text-gray-200", if complete { "text-green-300" } else { "" })}>
                <strong>{"Total allocated: "}</strong>
                {format!("{} / {}", total, props.points_limit)}
            </p>

            <button
                type="button"
                disabled={props.busy}
                onclick={on_submit}
                class={classes!(button(BUTTON_SUCCESS), "w-full", "py-3", "text-lg")}
            >
                {"✅ Submit and Show Results"}
            </button>
        </div>
    }
}
