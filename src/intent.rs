//! Intents dataset: types, loading and the auxiliary table data.
//!
//! # Architecture
//!
//! - [`Intent`]: one labeled category with example patterns and replies
//! - [`IntentSet`]: the loaded intents indexed by tag
//! - [`TrainingExample`]: one (pattern, tag) pair fed to the classifier
//! - [`store`]: soft-failing loaders for the intents JSON
//! - [`table`]: soft-failing loader for the auxiliary `table` JSON

pub mod store;
pub mod table;
pub mod types;

pub use store::{load_intents, parse_intents, try_load_intents, try_parse_intents};
pub use table::{Table, TableRow, load_table, parse_table, try_load_table};
pub use types::{Intent, IntentSet, TrainingExample};
