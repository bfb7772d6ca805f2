use yew::prelude::*;
use shared::models::{ProjectTotal, VoteResults};
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub results: Option<VoteResults>,
    pub submitted: bool,
    pub on_reload: Callback<()>,
}

fn bar_width(points: u64, max: u64) -> String {
    let percent = if max == 0 { 0.0 } else { points as f64 * 100.0 / max as f64 };
    format!("width: {:.1}%", percent)
}

fn render_bar(total: &ProjectTotal, max: u64) -> Html {
    html! {
        <div class="space-y-1">
            <div class={FLEX_BETWEEN}>
                <span class="text-gray-200 break-words pr-4">{&total.name}</span>
                <span class="font-bold text-gray-100">{total.points}</span>
            </div>
            <div class={BAR_TRACK}>
                <div class={BAR_FILL} style={bar_width(total.points, max)} />
            </div>
        </div>
    }
}

fn render_submissions(results: &VoteResults) -> Html {
    html! {
        <details class="mt-6">
            <summary class="cursor-pointer text-gray-300">{"📄 See all submissions"}</summary>
            <div class="overflow-x-auto mt-3">
                <table class="min-w-full text-sm text-gray-300">
                    <thead>
                        <tr>
                            <th class={TABLE_CELL}>{"#"}</th>
                            {for results.project_names.iter().map(|name| html! {
                                <th class={TABLE_CELL}>{name}</th>
                            })}
                        </tr>
                    </thead>
                    <tbody>
                        {for results.submissions.iter().enumerate().map(|(i, row)| html! {
                            <tr>
                                <td class={TABLE_CELL}>{i}</td>
                                {for row.iter().map(|v| html! { <td class={TABLE_CELL}>{v}</td> })}
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
        </details>
    }
}

#[function_component(ResultsView)]
pub fn results_view(props: &Props) -> Html {
    let on_reload = {
        let cb = props.on_reload.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let body = match &props.results {
        None => html! {
            <div class="flex justify-center p-8">
                <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading results..."}</div>
            </div>
        },
        Some(results) if results.total_votes == 0 => html! {
            <div class={alert_style("info")}>{"No votes submitted yet."}</div>
        },
        Some(results) => {
            let max = results.max_points();
            html! {
                <div>
                    <h2 class={HEADING_MD}>{"📊 Aggregated Results"}</h2>
                    <p class={combine_classes(TEXT_MUTED, "mb-4")}>
                        {format!("{} submissions", results.total_votes)}
                    </p>
                    <div class={SPACE_Y_BASE}>
                        {for results.totals.iter().map(|t| render_bar(t, max))}
                    </div>
                    {render_submissions(results)}
                </div>
            }
        }
    };

    html! {
        <div class={CARD}>
            {if props.submitted {
                html! { <div class={alert_style("success")}>{"✅ Your vote has been submitted."}</div> }
            } else { html! {} }}
            {body}
            <div class="mt-6 flex justify-center">
                <button type="button" onclick={on_reload} class={button(BUTTON_PRIMARY)}>
                    {"Reload data"}
                </button>
            </div>
        </div>
    }
}
