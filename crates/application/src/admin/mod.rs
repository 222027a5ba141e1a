pub mod complaints;
pub mod users;
