use yew::prelude::*;
use gloo_timers::callback::Timeout;
use shared::models::{AllocationUpdate, SessionState, SessionView, VoteResults};
use crate::{
    admin::AdminPanel,
    allocation::AllocationForm,
    api,
    config::CONFIG,
    login::LoginForm,
    results::ResultsView,
    styles::*,
};

pub enum Msg {
    SessionLoaded(Result<SessionView, String>),
    Login(String),
    ViewResults,
    SetPoints(usize, u32),
    AllocationUpdated(Result<AllocationUpdate, String>),
    Submit,
    ReloadResults,
    ResultsLoaded(Result<VoteResults, String>),
    AdminReset(Vec<String>),
    DismissNotice,
}

/// Whole voting page; what it shows follows the server-side session state.
pub struct BallotPage {
    view: Option<SessionView>,
    results: Option<VoteResults>,
    error: Option<String>,
    notice: Option<String>,
    notice_timeout: Option<Timeout>,
    busy: bool,
}

impl BallotPage {
    fn request(&mut self, ctx: &Context<Self>, fut: impl std::future::Future<Output = Msg> + 'static) {
        self.busy = true;
        ctx.link().send_future(fut);
    }

    fn show_notice(&mut self, ctx: &Context<Self>, notice: String) {
        self.notice = Some(notice);
        let link = ctx.link().clone();
        self.notice_timeout = Some(Timeout::new(CONFIG.notice_timeout_ms, move || {
            link.send_message(Msg::DismissNotice);
        }));
    }

    fn apply_view(&mut self, ctx: &Context<Self>, view: SessionView) {
        if view.state.can_view_results() {
            ctx.link().send_future(async { Msg::ResultsLoaded(api::fetch_results().await) });
        } else {
            self.results = None;
        }
        self.view = Some(view);
    }
}

impl Component for BallotPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_future(async { Msg::SessionLoaded(api::fetch_session().await) });
        Self {
            view: None,
            results: None,
            error: None,
            notice: None,
            notice_timeout: None,
            busy: true,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionLoaded(result) => {
                self.busy = false;
                match result {
                    Ok(view) => {
                        self.error = None;
                        self.apply_view(ctx, view);
                    }
                    Err(error) => self.error = Some(error),
                }
                true
            }
            Msg::Login(code) => {
                self.request(ctx, async move { Msg::SessionLoaded(api::login(code).await) });
                true
            }
            Msg::ViewResults => {
                self.request(ctx, async { Msg::SessionLoaded(api::view_results().await) });
                true
            }
            Msg::SetPoints(index, value) => {
                self.request(ctx, async move {
                    Msg::AllocationUpdated(api::change_allocation(index, value).await)
                });
                true
            }
            Msg::AllocationUpdated(result) => {
                self.busy = false;
                match result {
                    Ok(update) => {
                        self.error = None;
                        if let Some(view) = self.view.as_mut() {
                            view.allocation = update.allocation;
                            view.total = update.total;
                        }
                        if let Some(notice) = update.notice {
                            self.show_notice(ctx, notice.to_string());
                        }
                    }
                    Err(error) => self.error = Some(error),
                }
                true
            }
            Msg::Submit => {
                if self.busy {
                    return false;
                }
                self.request(ctx, async { Msg::SessionLoaded(api::submit().await) });
                true
            }
            Msg::ReloadResults => {
                ctx.link().send_future(async { Msg::ResultsLoaded(api::fetch_results().await) });
                false
            }
            Msg::ResultsLoaded(result) => {
                match result {
                    Ok(results) => self.results = Some(results),
                    Err(error) => self.error = Some(error),
                }
                true
            }
            Msg::AdminReset(names) => {
                self.request(ctx, async move { Msg::SessionLoaded(api::admin_reset(names).await) });
                true
            }
            Msg::DismissNotice => {
                self.notice = None;
                self.notice_timeout = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(view) = &self.view else {
            return html! {
                <div class={CONTAINER}>
                    {self.render_error()}
                    <div class="flex items-center justify-center p-8">
                        <div class="animate-spin rounded-full h-12 w-12 border-4 border-blue-500 border-t-transparent"/>
                    </div>
                </div>
            };
        };

        let on_reload = link.callback(|_| Msg::ReloadResults);
        let page = match view.state {
            SessionState::AwaitingLogin => html! {
                <LoginForm
                    on_login={link.callback(Msg::Login)}
                    on_view_results={link.callback(|_| Msg::ViewResults)}
                    busy={self.busy}
                />
            },
            SessionState::Voting => html! {
                <div class={CARD}>
                    <AllocationForm
                        project_names={view.project_names.clone()}
                        allocation={view.allocation.clone()}
                        points_limit={view.points_limit}
                        busy={self.busy}
                        on_change={link.callback(|(index, value): (usize, u32)| Msg::SetPoints(index, value))}
                        on_submit={link.callback(|_| Msg::Submit)}
                    />
                </div>
            },
            SessionState::Submitted | SessionState::ResultsOnly => html! {
                <ResultsView
                    results={self.results.clone()}
                    submitted={view.state == SessionState::Submitted}
                    {on_reload}
                />
            },
            SessionState::Admin => html! {
                <>
                    <AdminPanel on_reset={link.callback(Msg::AdminReset)} busy={self.busy} />
                    <ResultsView results={self.results.clone()} submitted={false} {on_reload} />
                </>
            },
        };

        html! {
            <div class={CONTAINER_SM}>
                <h1 class={HEADING_LG}>
                    {format!("🗳️ Allocate {} Points Across {} Projects", view.points_limit, view.project_names.len())}
                </h1>
                {if let Some(label) = &view.label {
                    html! { <p class={combine_classes(TEXT_MUTED, "text-center mb-4")}>{format!("Signed in as {}", label)}</p> }
                } else { html! {} }}
                {if let Some(notice) = &self.notice {
                    html! { <div class={alert_style("warning")}>{notice}</div> }
                } else { html! {} }}
                {self.render_error()}
                {page}
            </div>
        }
    }
}

impl BallotPage {
    fn render_error(&self) -> Html {
        match &self.error {
            Some(error) => html! { <div class={alert_style("error")}>{error}</div> },
            None => html! {},
        }
    }
}
