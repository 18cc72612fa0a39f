pub mod error;
pub mod handlers;
pub mod household_handlers;
pub mod repository;
pub mod router;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use repository::{DataRepository, FileDataRepository, HouseholdRecord};
pub use router::create_router;
pub use server::run_server;
pub use state::AppState;
