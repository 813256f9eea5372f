//! # HabitHub Core Library
//!
//! This library provides the core business logic for the HabitHub
//! habit tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Evaluator**: A pure period-evaluation engine; callers feed it a
//!   user snapshot and a clock reading, it settles every elapsed
//!   period boundary and hands back the new snapshot plus events
//! - **Storage**: SQLite-based account storage and TOML-based
//!   configuration
//! - **Store**: The mutate-evaluate-persist write path every habit,
//!   friend, and achievement operation goes through
//!
//! ## Key Components
//!
//! - [`Evaluator`]: Period-evaluation engine
//! - [`UserStore`]: Mutation layer over accounts and evaluation
//! - [`Database`]: Account and session persistence
//! - [`Config`]: Application configuration management

pub mod accounts;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod habit;
pub mod import;
pub mod storage;
pub mod store;
pub mod user;

pub use accounts::AccountStore;
pub use config::Config;
pub use error::{AccountError, ConfigError, CoreError, ImportError, Result, StorageError};
pub use evaluator::{CompressedPeriods, Evaluation, Evaluator, Timing};
pub use events::EvaluationEvent;
pub use habit::{Habit, HabitCollections, HabitKind, HabitStatus, Period};
pub use import::{parse_import, HabitImport, ImportedHabit};
pub use storage::{data_dir, Database};
pub use store::{NewHabit, UserStore};
pub use user::{Achievement, Friend, User};
