// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for GridWatch crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory slot store fake with fault injection
//! - [`observe`] - Recording observer for store notifications

pub mod config;
pub mod observe;

pub use config::InMemoryConfigStore;
pub use observe::Recorder;
