//! Hooktrace Library
//!
//! Turns flat lists of webhook deliveries for a pull request into
//! correlated, classified event timelines.

pub mod config;
pub mod error;
pub mod models;
pub mod poll;
pub mod services;
pub mod session;
pub mod source;
