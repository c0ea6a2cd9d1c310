//! Quarry Core
//!
//! Core types and abstractions shared by Quarry clients.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job identity, state, description)
//! - DTOs: Data transfer objects for communication with the job service

pub mod domain;
pub mod dto;
