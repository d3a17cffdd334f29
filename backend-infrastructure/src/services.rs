pub mod health_service;
pub mod nhl_api;

pub use health_service::*;
pub use nhl_api::*;
