//! Data Transfer Objects for the job service API
//!
//! This module contains the request and response shapes exchanged with the
//! Quarry job service, plus the structured call options forwarded with
//! remote operations.

pub mod job;
