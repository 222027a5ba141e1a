pub mod dtos;
pub mod list_assigned;
pub mod update_complaint;
