// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod state;
pub mod watch;

pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
