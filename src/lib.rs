pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{FixedClock, JsonFileStore, MemoryStore, SystemClock};
pub use core::engine::ReservationEngine;
pub use core::reservation_writer::SlotPolicy;
pub use utils::error::{ReservationError, Result};
