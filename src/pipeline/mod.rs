// src/pipeline/mod.rs

pub mod filters;
pub mod readers;
pub mod trimmers;
pub mod writers;
