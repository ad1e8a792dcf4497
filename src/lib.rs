//! healthdesk - Doctor verification workflow and patient health summary service
//!
//! Doctors register with three credential documents and wait for an
//! administrator to verify or reject them; the doctor dashboard stays
//! locked until they are verified. Patients read an aggregated summary of
//! their medications, appointments, allergies and recent health metrics.
//!
//! - [`core`] - Domain models, port traits and services
//! - [`adapters`] - Local JSON store and credential file storage
//! - [`api`] - HTTP-agnostic handlers
//! - [`server`] - Routing and the `tiny_http` adapter

#![deny(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod server;
