pub mod context;
pub mod fitness;
pub mod roster;
pub mod section;
pub mod user;

pub use context::{RequestContext, RequestId, RequestSource};
