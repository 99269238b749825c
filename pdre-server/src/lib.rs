//! Permissible recreational load server.
//!
//! Computes how many visitors a protected area and each of its tourism
//! objects can absorb over a period: base capacity from geometry and
//! visit timing, potential capacity after correction factors, and
//! permissible capacity after the management factor.

pub mod aggregate;
pub mod calculator;
pub mod config;
pub mod domain;
pub mod formula;
pub mod job;
pub mod logging;
pub mod store;
pub mod web;
