pub mod create_complaint;
pub mod dtos;
pub mod lifecycle;
pub mod list_own;
pub mod track_complaint;
