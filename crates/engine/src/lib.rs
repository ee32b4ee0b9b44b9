//! Core engine for the Borsello expense tracker.
//!
//! The engine owns the persistence layer (users, per-user configuration,
//! categories, expenses) and the pure computation on top of it: statistics
//! aggregation and keyboard pagination. The bot crate talks to the engine
//! through `Engine` and never touches the database directly.

pub use error::EngineError;
pub use ops::Engine;
pub use ops::EngineBuilder;
pub use service::ServiceError;
pub use statistics::{ALL_CATEGORIES_ID, Period, StatisticsRequest, StatsPage};

pub mod categories;
pub mod expenses;
pub mod pagination;
pub mod statistics;
pub mod user_configs;
pub mod users;

mod error;
mod ops;
mod service;

type ResultEngine<T> = Result<T, EngineError>;
