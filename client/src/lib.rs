//! Gym Tracker client library
//!
//! Exposes the client modules for the binary and for integration tests.
//!
//! ## Layers
//!
//! - `api`: the operation contract and its mock and server backends
//! - `repositories`: the locally persisted mock data
//! - `services`: dashboard, workout session and training editing
//! - `storage`: key-value substrate shared by the mock store and the session

pub mod api;
pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod storage;
