// Shared helpers for unit tests
pub mod utils;
