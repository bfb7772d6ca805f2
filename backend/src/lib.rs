pub mod catchers;
pub mod config;
pub mod controller;
pub mod cors;
pub mod error;
pub mod routes;
pub mod session;
pub mod store;

use rocket::{Build, Rocket, catchers, figment::Figment, routes};
use tracing::info;
use crate::{
    catchers::{bad_request, forbidden, internal_error, not_found, unprocessable},
    config::AppConfig,
    controller::Controller,
    cors::Cors,
    error::StoreError,
    routes::*,
};

pub use shared::{models::*, error::*};

/// Opens the stores and assembles the server; nothing is listening until launch.
pub fn build(figment: Figment, config: AppConfig) -> Result<Rocket<Build>, StoreError> {
    let controller = Controller::open(&config)?;

    let mut rocket = rocket::custom(figment)
        .manage(AppState::new(controller))
        .manage(StaticDir(config.static_dir.clone()))
        .mount(
            "/api",
            routes![
                get_session,
                login,
                view_results,
                change_allocation,
                submit,
                results,
                admin_reset,
                all_options
            ],
        )
        .mount("/", routes![spa_handler])
        .register(
            "/",
            catchers![
                forbidden,
                bad_request,
                unprocessable,
                internal_error,
                not_found
            ],
        );

    if let Some(origin) = config.cors_origin {
        info!("🌐 CORS enabled for {}", origin);
        rocket = rocket.attach(Cors::new(origin));
    }

    Ok(rocket)
}

#[cfg(test)]
mod tests;
