//! Small helpers shared by services and controllers.

pub mod code;
pub mod export;
pub mod password;
pub mod time;
