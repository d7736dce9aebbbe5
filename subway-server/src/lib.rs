//! Subway network server.
//!
//! Manages subway lines, each a chain of stations joined by
//! distance-bearing sections, and keeps every chain a single simple path
//! as sections are added and removed.

pub mod config;
pub mod domain;
pub mod service;
pub mod store;
pub mod topology;
pub mod web;
