// src/agent/mod.rs
pub mod content_agent;
pub mod trend_agent;
