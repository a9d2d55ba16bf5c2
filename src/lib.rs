//! Library crate for airline-customer-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, key handling and request dispatch (`app`)
//! - REST client for the customer backend (`api`)
//! - Customer record and form model (`customer`)
//! - Command-line configuration (`config`) and log setup (`logging`)
//! - Error and result types (`error`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `customer-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod customer;
pub mod error;
pub mod logging;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{ApiError, DynError, Result};
