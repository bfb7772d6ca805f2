pub mod allocation;
pub mod error;
pub mod models;
pub mod validation;

pub use allocation::{Allocation, AllocationError, Clamp, ClampNotice, SubmitDecision, check_submission, clamp_change};
pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
pub use validation::*;
