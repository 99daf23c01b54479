//! State Management
//!
//! Global application state and the browser session store.

pub mod global;
pub mod storage;

pub use global::{expect_state, provide_global_state, GlobalState};
pub use storage::LocalStorageStore;
