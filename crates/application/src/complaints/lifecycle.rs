//! Status transition rules for the complaint lifecycle.
//!
//! Each mutating operation accepts only a fixed subset of statuses; the
//! subsets are validated here before any row is touched so an invalid
//! transition never leaves a partial write.

use crate::{AppError, AppResult};
use fixdesk_core::{ComplaintStatus, ReviewStatus};

/// Statuses the assigned technician may set while working a complaint.
pub const TECHNICIAN_SETTABLE: &[ComplaintStatus] = &[
    ComplaintStatus::InProgress,
    ComplaintStatus::Resolved,
    ComplaintStatus::PendingReview,
];

/// Statuses a supervisor or admin may finalize to. `Assigned` is reached
/// only through assignment and `Pending Review` only through the
/// technician path.
pub const FINAL_STATUSES: &[ComplaintStatus] = &[
    ComplaintStatus::Pending,
    ComplaintStatus::InProgress,
    ComplaintStatus::Resolved,
    ComplaintStatus::Closed,
    ComplaintStatus::Rejected,
];

/// Statuses the admin escape hatch may write directly.
pub const ADMIN_SETTABLE: &[ComplaintStatus] = &[
    ComplaintStatus::Pending,
    ComplaintStatus::Assigned,
    ComplaintStatus::InProgress,
    ComplaintStatus::Resolved,
    ComplaintStatus::Closed,
    ComplaintStatus::Rejected,
];

/// Review verdicts a supervisor may record.
pub const REVIEW_DECISIONS: &[ReviewStatus] = &[
    ReviewStatus::Approved,
    ReviewStatus::Rejected,
    ReviewStatus::PendingReview,
];

pub fn parse_technician_status(s: &str) -> AppResult<ComplaintStatus> {
    ComplaintStatus::parse(s)
        .filter(|status| TECHNICIAN_SETTABLE.contains(status))
        .ok_or_else(|| AppError::Validation("Invalid status provided".to_string()))
}

pub fn parse_final_status(s: &str) -> AppResult<ComplaintStatus> {
    ComplaintStatus::parse(s)
        .filter(|status| FINAL_STATUSES.contains(status))
        .ok_or_else(|| AppError::Validation("Invalid final status".to_string()))
}

pub fn parse_admin_status(s: &str) -> AppResult<ComplaintStatus> {
    ComplaintStatus::parse(s)
        .filter(|status| ADMIN_SETTABLE.contains(status))
        .ok_or_else(|| AppError::Validation("Invalid status value".to_string()))
}

pub fn parse_review_decision(s: &str) -> AppResult<ReviewStatus> {
    ReviewStatus::parse(s)
        .filter(|status| REVIEW_DECISIONS.contains(status))
        .ok_or_else(|| AppError::Validation("Invalid supervisor review status".to_string()))
}
