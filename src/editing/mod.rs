//! Editing model: state, transactions, attribute resolution and commands

pub mod commands;
pub mod resolve;
mod transaction;

pub use commands::Dispatch;
pub use resolve::{resolve, SessionDefaults, SystemDefaults};
pub use transaction::{EditorState, PageAttribute, Step, Transaction};
