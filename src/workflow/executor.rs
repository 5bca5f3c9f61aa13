// Executor - walks the graph from its entry point, isolating each stage
use super::state::{WorkflowState, WorkflowStage};
use super::graph::StateGraph;
use crate::error::WorkflowError;
use tracing::{info, warn};

/// Workflow executor
pub struct WorkflowExecutor {
    graph: StateGraph,
}

impl WorkflowExecutor {
    pub fn new(mut graph: StateGraph) -> Result<Self, WorkflowError> {
        if !graph.is_compiled() {
            graph.compile()?;
        }
        Ok(Self { graph })
    }

    /// Run every stage once, in order. A failing stage has its fallback applied
    /// and the walk continues; only graph-level problems return an error.
    pub async fn run(&self, mut state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        let mut current_node = self
            .graph
            .get_entry_point()
            .cloned()
            .ok_or(WorkflowError::NoEntryPoint)?;

        let mut step = 0;
        loop {
            step += 1;
            let node = self
                .graph
                .get_node(&current_node)
                .ok_or_else(|| WorkflowError::UnknownNode(current_node.clone()))?;

            info!("📍 Step {}: executing node '{}' ({})", step, node.id, node.description);

            let update = match node.stage.run(&state).await {
                Ok(update) => update,
                Err(e) => {
                    warn!("⚠️ Node '{}' failed, applying fallback: {}", node.id, e);
                    let fallback = node.stage.fallback(&state, &e);
                    state.record_failure(&node.id, e.to_string());
                    fallback
                }
            };
            state.apply_update(update);

            match self.graph.get_next_node(&current_node) {
                Some(next) => current_node = next.clone(),
                None => break,
            }
        }

        state.stage = WorkflowStage::Done;
        info!("🏁 Workflow finished after {} steps ({} fallbacks)", step, state.failures.len());
        Ok(state)
    }
}
