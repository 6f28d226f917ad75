use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::BootstrapSettings;
use crate::providers::CryptoProvider;
use crate::stores::{AnthroStore, PerformanceStore, RosterStore, SectionStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ├─ db (DatabaseConnection)
///   ├─ section_store / roster_store / user_store
///   ├─ anthro_store / performance_store
///   └─ crypto_provider (keyed with the password pepper)
///   ↓ wrapped in Arc<AppData>
///   ├─ SectionCoordinator::new(app_data)
///   ├─ RosterCoordinator::new(app_data)
///   ├─ UserCoordinator::new(app_data)
///   ├─ FitnessCoordinator::new(app_data)
///   └─ PerformanceCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub section_store: Arc<SectionStore>,
    pub roster_store: Arc<RosterStore>,
    pub user_store: Arc<UserStore>,
    pub anthro_store: Arc<AnthroStore>,
    pub performance_store: Arc<PerformanceStore>,
    pub crypto_provider: Arc<CryptoProvider>,
}

impl AppData {
    /// Database should be connected and migrated before calling this
    pub fn init(db: DatabaseConnection, settings: &BootstrapSettings) -> Self {
        Self::with_pepper(db, settings.password_pepper().to_string())
    }

    /// Build without `BootstrapSettings`; used by tests
    pub fn with_pepper(db: DatabaseConnection, password_pepper: String) -> Self {
        tracing::debug!("Creating stores and providers");

        Self {
            db,
            section_store: Arc::new(SectionStore::new()),
            roster_store: Arc::new(RosterStore::new()),
            user_store: Arc::new(UserStore::new()),
            anthro_store: Arc::new(AnthroStore::new()),
            performance_store: Arc::new(PerformanceStore::new()),
            crypto_provider: Arc::new(CryptoProvider::new(password_pepper)),
        }
    }
}
