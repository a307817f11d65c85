// src/db/models/mod.rs

//! Data models for CarbonTrack database entities

mod emission;

pub use emission::{DEFAULT_OWNER, EmissionRecord, NewEmission};
