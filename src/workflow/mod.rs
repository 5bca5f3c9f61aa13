// Workflow orchestration - linear stage graph with per-stage fallbacks
pub mod state;
pub mod graph;
pub mod executor;
pub mod content_workflow;

pub use content_workflow::{ContentWorkflow, RunOptions, WorkflowInfo};
pub use state::{WorkflowResult, WorkflowState};
