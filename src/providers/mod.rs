// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. Database-touching providers take the connection
// (pool or transaction) from the caller.

pub mod academic_calendar;
pub mod crypto_provider;
pub mod csv_provider;
pub mod guard_provider;
pub mod roster_provider;
pub mod validation_provider;

pub use academic_calendar::AcademicCalendar;
pub use crypto_provider::CryptoProvider;
pub use csv_provider::{CsvParse, CsvProvider, CsvRowHandler, RosterCsvHandler, SectionCsvHandler, UserCsvHandler};
pub use guard_provider::GuardProvider;
pub use roster_provider::RosterProvider;
pub use validation_provider::ValidationProvider;
