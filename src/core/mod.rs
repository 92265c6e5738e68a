// src/core/mod.rs

pub mod brands;
pub mod download;
pub mod prompts;
pub mod session;
pub mod types;
pub mod workflow;
