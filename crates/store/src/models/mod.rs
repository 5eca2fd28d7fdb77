//! Job entity model and DTOs.

pub mod job;
