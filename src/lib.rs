// src/lib.rs — Library root for ChicLens

pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
