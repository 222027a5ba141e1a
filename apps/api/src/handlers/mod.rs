pub mod admin;
pub mod auth;
pub mod complaints;
pub mod error_handler;
pub mod health;
pub mod supervisor;
pub mod technician;
