//! waste-router core
//!
//! Partitions waste bins that need collection into spatial clusters and
//! builds a depot-to-depot visiting order for each cluster.

pub mod traits;
pub mod geometry;
pub mod model;
pub mod config;
pub mod error;
pub mod cluster;
pub mod router;
pub mod stats;
pub mod fleet;
pub mod pipeline;

pub use error::{Error, Result};
