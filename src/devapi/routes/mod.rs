//! Dev API Routes
//!
//! Route handlers, one module per collection.

pub mod auth;
pub mod health;
pub mod incidents;
pub mod patients;
pub mod requests;
pub mod trackings;
