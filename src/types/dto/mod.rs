// Request and response payloads
pub mod common;
pub mod fitness;
pub mod roster;
pub mod section;
pub mod user;
