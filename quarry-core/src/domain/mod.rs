//! Core domain types
//!
//! This module contains the domain structures used across Quarry clients.
//! These types represent job entities as the service reports them.

pub mod job;
