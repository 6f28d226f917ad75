// Stores layer - Data access and repository pattern
//
// Every method takes the connection to run on, so the same query works on the
// pool or inside a transaction the caller owns.
pub mod anthro_store;
pub mod performance_store;
pub mod roster_store;
pub mod section_store;
pub mod user_store;

pub use anthro_store::AnthroStore;
pub use performance_store::PerformanceStore;
pub use roster_store::RosterStore;
pub use section_store::SectionStore;
pub use user_store::UserStore;

/// True when the database rejected a write on a unique index
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    err.to_string().contains("UNIQUE")
}
