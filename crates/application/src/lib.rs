pub mod access;
pub mod admin;
pub mod auth;
pub mod complaints;
pub mod error;
mod lookup;
pub mod supervisor;
pub mod technician;

pub use access::Identity;
pub use error::{AppError, AppResult};
