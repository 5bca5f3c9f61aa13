// src/models/mod.rs
pub mod analysis;
pub mod content;
pub mod trends;
