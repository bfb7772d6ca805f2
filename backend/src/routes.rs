use std::sync::{Mutex, MutexGuard};
use rocket::{State, get, post, fs::NamedFile, http::{CookieJar, Status}, serde::json::Json};
use tracing::{error, debug, instrument};
use shared::models::*;
use crate::{
    controller::Controller,
    error::ApiError,
    session::SessionRegistry,
};

pub struct AppState {
    pub sessions: SessionRegistry,
    pub controller: Mutex<Controller>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            controller: Mutex::new(controller),
        }
    }

    fn controller(&self) -> Result<MutexGuard<'_, Controller>, ApiError> {
        self.controller.lock().map_err(|_| {
            error!("Failed to acquire controller lock");
            ApiError::Internal("controller lock poisoned".into())
        })
    }
}

#[get("/session")]
pub async fn get_session(state: &State<AppState>, cookies: &CookieJar<'_>) -> Result<Json<SessionView>, ApiError> {
    state.sessions.with_session(cookies, |session| {
        state.controller()?.view(session)
    }).map(Json)
}

#[instrument(skip(state, cookies, request))]
#[post("/login", format = "json", data = "<request>")]
pub async fn login(
    state: &State<AppState>,
    cookies: &CookieJar<'_>,
    request: Json<LoginRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let code = request.into_inner().code;
    state.sessions.with_session(cookies, |session| {
        state.controller()?.login(session, &code)
    }).map(Json)
}

#[post("/view-results")]
pub async fn view_results(state: &State<AppState>, cookies: &CookieJar<'_>) -> Result<Json<SessionView>, ApiError> {
    state.sessions.with_session(cookies, |session| {
        state.controller()?.view_results(session)
    }).map(Json)
}

#[post("/allocation", format = "json", data = "<request>")]
pub async fn change_allocation(
    state: &State<AppState>,
    cookies: &CookieJar<'_>,
    request: Json<AllocationRequest>,
) -> Result<Json<AllocationUpdate>, ApiError> {
    let AllocationRequest { index, value } = request.into_inner();
    debug!("Allocation change: project {} -> {}", index, value);
    state.sessions.with_session(cookies, |session| {
        state.controller()?.change_allocation(session, index, value)
    }).map(Json)
}

#[instrument(skip(state, cookies))]
#[post("/submit")]
pub async fn submit(state: &State<AppState>, cookies: &CookieJar<'_>) -> Result<Json<SessionView>, ApiError> {
    state.sessions.with_session(cookies, |session| {
        state.controller()?.submit(session)
    }).map(Json)
}

#[get("/results")]
pub async fn results(state: &State<AppState>, cookies: &CookieJar<'_>) -> Result<Json<VoteResults>, ApiError> {
    state.sessions.with_session(cookies, |session| {
        state.controller()?.results(session)
    }).map(Json)
}

#[instrument(skip(state, cookies, request))]
#[post("/admin/reset", format = "json", data = "<request>")]
pub async fn admin_reset(
    state: &State<AppState>,
    cookies: &CookieJar<'_>,
    request: Json<AdminResetRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let names = request.into_inner().project_names;
    state.sessions.with_session(cookies, |session| {
        state.controller()?.admin_reset(session, &names)
    }).map(Json)
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

pub struct StaticDir(pub std::path::PathBuf);

#[get("/<path..>", rank = 20)]
pub async fn spa_handler(path: std::path::PathBuf, static_dir: &State<StaticDir>) -> Option<NamedFile> {
    let file_path = static_dir.0.join(&path);
    if file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        NamedFile::open(static_dir.0.join("index.html")).await.ok()
    }
}
