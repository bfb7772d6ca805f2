use yew::prelude::*;
use yew_router::prelude::*;

mod admin;
mod allocation;
mod api;
mod ballot;
mod config;
mod login;
mod results;
mod styles;

use crate::{ballot::BallotPage, styles::*};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[not_found]
    #[at("/404")] NotFound,
}

#[function_component(Navigation)]
fn navigation() -> Html {
    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center">
                <Link<Route> to={Route::Home} classes={classes!(
                    "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
                    "transition-colors", "duration-200", "ease-in-out",
                    "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400"
                )}>
                    {"Make a Change Vote"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    html! {
        <div class={CONTAINER}>
            <div class={alert_style("error")}>
                <p>{"Page not found."}</p>
                <Link<Route> to={Route::Home} classes={classes!(button(BUTTON_PRIMARY), "mt-4", "inline-block")}>
                    {"Return Home"}
                </Link<Route>>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class={BG_PAGE}>
                <Navigation />
                <div class="pt-16">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <BallotPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
