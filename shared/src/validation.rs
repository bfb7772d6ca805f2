use std::collections::HashSet;
use crate::models::{Config, RESULTS_ONLY_CODE};

pub const MAX_PROJECT_NAME_LENGTH: usize = 40;
pub const MIN_POINTS: u32 = 1;
pub const RESET_PROJECT_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one project is required")]
    NoProjects,
    #[error("Exactly {RESET_PROJECT_COUNT} project names are required, got {0}")]
    WrongProjectCount(usize),
    #[error("Empty project name")]
    EmptyProjectName,
    #[error("Project name exceeds maximum length of {MAX_PROJECT_NAME_LENGTH}: {0}")]
    ProjectNameTooLong(String),
    #[error("Duplicate project: {0}")]
    DuplicateProject(String),
    #[error("Points must be at least {MIN_POINTS}")]
    PointsTooLow,
    #[error("Admin code must not be empty")]
    EmptyAdminCode,
    #[error("Admin code collides with a login code: {0}")]
    AdminCodeCollision(String),
}

pub fn validate_project_names(names: &[String]) -> Result<(), ValidationError> {
    if names.is_empty() { return Err(ValidationError::NoProjects); }

    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() { return Err(ValidationError::EmptyProjectName); }
        if name.chars().count() > MAX_PROJECT_NAME_LENGTH {
            return Err(ValidationError::ProjectNameTooLong(name.clone()));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ValidationError::DuplicateProject(name.clone()));
        }
    }
    Ok(())
}

pub fn validate_config(config: &Config) -> Result<(), ValidationError> {
    validate_project_names(&config.project_names)?;
    if config.points < MIN_POINTS { return Err(ValidationError::PointsTooLow); }

    if let Some(admin) = &config.admin {
        if admin.is_empty() { return Err(ValidationError::EmptyAdminCode); }
        if admin == RESULTS_ONLY_CODE || config.logins.contains_key(admin) {
            return Err(ValidationError::AdminCodeCollision(admin.clone()));
        }
    }
    Ok(())
}

/// Trims the admin-supplied names and checks them as a replacement project list.
pub fn normalize_reset_names(names: &[String]) -> Result<Vec<String>, ValidationError> {
    if names.len() != RESET_PROJECT_COUNT {
        return Err(ValidationError::WrongProjectCount(names.len()));
    }
    let trimmed: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
    validate_project_names(&trimmed)?;
    Ok(trimmed)
}
