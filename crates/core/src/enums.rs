//! String-valued enums shared by the entities and the API surface.
//!
//! The stored and serialized forms are the exact strings clients see, so
//! parsing is deliberately case-sensitive: "pending" is not a status and
//! "Admin" is not a role.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    #[serde(rename = "user")]
    User,
    #[sea_orm(string_value = "technician")]
    #[serde(rename = "technician")]
    Technician,
    #[sea_orm(string_value = "supervisor")]
    #[serde(rename = "supervisor")]
    Supervisor,
    #[sea_orm(string_value = "admin")]
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Technician => "technician",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "technician" => Some(Role::Technician),
            "supervisor" => Some(Role::Supervisor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Lifecycle state of a complaint. "Pending Review" is only reachable
/// through the technician update path; supervisors and admins always set
/// one of the other six.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    #[sea_orm(string_value = "Assigned")]
    #[serde(rename = "Assigned")]
    Assigned,
    #[sea_orm(string_value = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Resolved")]
    #[serde(rename = "Resolved")]
    Resolved,
    #[sea_orm(string_value = "Closed")]
    #[serde(rename = "Closed")]
    Closed,
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Pending Review")]
    #[serde(rename = "Pending Review")]
    PendingReview,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Assigned => "Assigned",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Closed => "Closed",
            ComplaintStatus::Rejected => "Rejected",
            ComplaintStatus::PendingReview => "Pending Review",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ComplaintStatus::Pending),
            "Assigned" => Some(ComplaintStatus::Assigned),
            "In Progress" => Some(ComplaintStatus::InProgress),
            "Resolved" => Some(ComplaintStatus::Resolved),
            "Closed" => Some(ComplaintStatus::Closed),
            "Rejected" => Some(ComplaintStatus::Rejected),
            "Pending Review" => Some(ComplaintStatus::PendingReview),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReviewStatus {
    #[sea_orm(string_value = "N/A")]
    #[serde(rename = "N/A")]
    NotApplicable,
    #[sea_orm(string_value = "Pending Review")]
    #[serde(rename = "Pending Review")]
    PendingReview,
    #[sea_orm(string_value = "Approved")]
    #[serde(rename = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::NotApplicable => "N/A",
            ReviewStatus::PendingReview => "Pending Review",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "N/A" => Some(ReviewStatus::NotApplicable),
            "Pending Review" => Some(ReviewStatus::PendingReview),
            "Approved" => Some(ReviewStatus::Approved),
            "Rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}
