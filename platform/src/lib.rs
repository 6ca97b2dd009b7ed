//! Platform capability snapshot for Ascend NPUs.
//!
//! Tiling entry points receive a [`PlatformBudget`] explicitly; nothing in
//! the workspace reads platform state from a process-wide singleton.

pub mod budget;
pub mod error;


pub use budget::{PlatformBudget, Soc};
pub use error::{Error, Result};
