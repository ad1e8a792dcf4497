//! Core domain logic for healthdesk
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`DoctorProfile`, `Credential`, `Session`, health records)
//! - `services/` - Workflow, registration, gate and summary orchestration
//! - `ports/` - Trait definitions for the managed store

pub mod models;
pub mod ports;
pub mod services;
