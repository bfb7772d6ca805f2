use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Project index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Per-project point distribution for one session, in project order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(Vec<u32>);

impl Allocation {
    pub fn zeroed(projects: usize) -> Self {
        Self(vec![0; projects])
    }

    pub fn values(&self) -> &[u32] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn other_total(&self, index: usize) -> u32 {
        self.0.iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, v)| v)
            .sum()
    }

    /// Clamps `new_value` against the budget left by the other projects and stores the result.
    pub fn apply(&mut self, index: usize, new_value: u32, points_limit: u32) -> Result<Clamp, AllocationError> {
        let clamp = clamp_change(index, new_value, self, points_limit)?;
        self.0[index] = clamp.value;
        Ok(clamp)
    }
}

impl From<Vec<u32>> for Allocation {
    fn from(values: Vec<u32>) -> Self { Self(values) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampNotice {
    pub index: usize,
    pub attempted: u32,
    pub value: u32,
    pub points_limit: u32,
}

impl fmt::Display for ClampNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total exceeds {}. Reducing Project {} to {}.",
            self.points_limit,
            self.index + 1,
            self.value
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamp {
    pub value: u32,
    pub notice: Option<ClampNotice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitDecision {
    Accepted,
    RejectedTotalMismatch { actual: u32 },
}

pub fn clamp_change(
    index: usize,
    new_value: u32,
    current: &Allocation,
    points_limit: u32,
) -> Result<Clamp, AllocationError> {
    if index >= current.len() {
        return Err(AllocationError::IndexOutOfRange { index, len: current.len() });
    }

    let max_allowed = points_limit.saturating_sub(current.other_total(index));
    if new_value > max_allowed {
        Ok(Clamp {
            value: max_allowed,
            notice: Some(ClampNotice {
                index,
                attempted: new_value,
                value: max_allowed,
                points_limit,
            }),
        })
    } else {
        Ok(Clamp { value: new_value, notice: None })
    }
}

pub fn check_submission(allocation: &Allocation, points_limit: u32) -> SubmitDecision {
    match allocation.total() {
        total if total == points_limit => SubmitDecision::Accepted,
        actual => SubmitDecision::RejectedTotalMismatch { actual },
    }
}
