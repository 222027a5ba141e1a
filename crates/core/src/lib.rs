pub mod entities;
pub mod enums;

pub use enums::{ComplaintStatus, ReviewStatus, Role};
