use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{ErrorResponse, models::*};
use crate::config::CONFIG;

fn url(path: &str) -> String {
    format!("{}{}", CONFIG.api_base_url, path)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response.json::<T>().await
            .map_err(|e| format!("Failed to parse response: {}", e));
    }

    match response.json::<ErrorResponse>().await {
        Ok(error) => Err(error.error),
        Err(_) => Err(format!("Request failed ({})", response.status())),
    }
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&url(path))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    decode(response).await
}

async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: Option<&B>) -> Result<T, String> {
    let request = Request::post(&url(path));
    let response = match body {
        Some(body) => request.json(body).map_err(|e| e.to_string())?.send().await,
        None => request.send().await,
    }
    .map_err(|e| e.to_string())?;
    decode(response).await
}

pub async fn fetch_session() -> Result<SessionView, String> {
    get("/session").await
}

pub async fn login(code: String) -> Result<SessionView, String> {
    post("/login", Some(&LoginRequest { code })).await
}

pub async fn view_results() -> Result<SessionView, String> {
    post::<(), _>("/view-results", None).await
}

pub async fn change_allocation(index: usize, value: u32) -> Result<AllocationUpdate, String> {
    post("/allocation", Some(&AllocationRequest { index, value })).await
}

pub async fn submit() -> Result<SessionView, String> {
    post::<(), _>("/submit", None).await
}

pub async fn fetch_results() -> Result<VoteResults, String> {
    get("/results").await
}

pub async fn admin_reset(project_names: Vec<String>) -> Result<SessionView, String> {
    post("/admin/reset", Some(&AdminResetRequest { project_names })).await
}
