// src/handlers/mod.rs
pub mod analyze;
pub mod content;
pub mod trends;
