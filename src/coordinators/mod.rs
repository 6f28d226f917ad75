// Coordinators layer - Workflow orchestration
//
// Coordinators compose guard, validation and store operations for specific API
// endpoints. They own transaction boundaries and contain no business rules.

pub mod fitness_coordinator;
pub mod performance_coordinator;
pub mod roster_coordinator;
pub mod section_coordinator;
pub mod user_coordinator;

pub use fitness_coordinator::FitnessCoordinator;
pub use performance_coordinator::PerformanceCoordinator;
pub use roster_coordinator::RosterCoordinator;
pub use section_coordinator::SectionCoordinator;
pub use user_coordinator::UserCoordinator;

use sea_orm::DatabaseTransaction;

use crate::config::{commit_transaction, rollback_transaction};
use crate::errors::InternalError;
use crate::types::internal::roster::BatchOutcome;

/// Commit a committed batch, roll back a rejected one
pub(crate) async fn settle_batch<S, R>(
    txn: DatabaseTransaction,
    outcome: BatchOutcome<S, R>,
) -> Result<BatchOutcome<S, R>, InternalError> {
    match &outcome {
        BatchOutcome::Committed(_) => commit_transaction(txn).await?,
        BatchOutcome::Rejected(_) => rollback_transaction(txn).await?,
    }

    Ok(outcome)
}
