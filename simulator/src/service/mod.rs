//! Scheduled APR simulation.
//!
//! One task owns the `AprManager`, its repeating timer and the upstream pool
//! receiver. Upstream changes and timer fires are handled in the same select
//! loop, so a re-seed and a tick never interleave.
//!
//! Data flow:
//! provider → watch channel → AprService task → PoolViewStore → renderer

pub mod runner;

pub use runner::{AprServiceHandle, spawn_apr_service};
