pub mod assign_complaint;
pub mod dtos;
pub mod list_complaints;
pub mod list_technicians;
pub mod report;
pub mod review_complaint;
