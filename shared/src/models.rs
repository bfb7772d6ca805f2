use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use crate::allocation::ClampNotice;

pub const RESULTS_ONLY_CODE: &str = "results_only";
pub const RESULTS_ONLY_LABEL: &str = "View Results";

/// Points used for the projects an admin reset installs.
pub const RESET_POINTS: u32 = 1;

pub type Logins = BTreeMap<String, LoginEntry>;

/// Stored on disk as `[label, has_voted]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, bool)", into = "(String, bool)")]
pub struct LoginEntry {
    pub label: String,
    pub has_voted: bool,
}

impl LoginEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), has_voted: false }
    }

    pub fn results_viewer() -> Self {
        Self { label: RESULTS_ONLY_LABEL.to_string(), has_voted: true }
    }
}

impl From<(String, bool)> for LoginEntry {
    fn from((label, has_voted): (String, bool)) -> Self {
        Self { label, has_voted }
    }
}

impl From<LoginEntry> for (String, bool) {
    fn from(entry: LoginEntry) -> Self {
        (entry.label, entry.has_voted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub project_names: Vec<String>,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(default)]
    pub logins: Logins,
}

impl Config {
    pub fn project_count(&self) -> usize {
        self.project_names.len()
    }

    pub fn is_admin_code(&self, code: &str) -> bool {
        self.admin.as_deref() == Some(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    AwaitingLogin,
    Voting,
    ResultsOnly,
    Submitted,
    Admin,
}

impl SessionState {
    pub fn can_view_results(self) -> bool {
        matches!(self, SessionState::ResultsOnly | SessionState::Submitted | SessionState::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub state: SessionState,
    pub label: Option<String>,
    pub project_names: Vec<String>,
    pub points_limit: u32,
    pub allocation: Vec<u32>,
    pub total: u32,
    pub admin_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationUpdate {
    pub allocation: Vec<u32>,
    pub total: u32,
    pub notice: Option<ClampNotice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotal {
    pub name: String,
    pub points: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResults {
    pub project_names: Vec<String>,
    pub totals: Vec<ProjectTotal>,
    pub submissions: Vec<Vec<u32>>,
    pub total_votes: usize,
}

impl VoteResults {
    pub fn from_rows(project_names: Vec<String>, submissions: Vec<Vec<u32>>) -> Self {
        let totals = project_names.iter()
            .enumerate()
            .map(|(i, name)| ProjectTotal {
                name: name.clone(),
                points: submissions.iter()
                    .filter_map(|row| row.get(i))
                    .map(|&v| u64::from(v))
                    .sum(),
            })
            .collect();

        Self {
            total_votes: submissions.len(),
            project_names,
            totals,
            submissions,
        }
    }

    pub fn max_points(&self) -> u64 {
        self.totals.iter().map(|t| t.points).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub index: usize,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResetRequest {
    pub project_names: Vec<String>,
}
