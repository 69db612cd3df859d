//! Test fixtures for waste-router.
//!
//! Provides hand-laid bin layouts with known clustering and routing
//! outcomes, plus small helpers shared by the integration suites.

#![allow(dead_code)]

pub mod layouts;

pub use layouts::*;
