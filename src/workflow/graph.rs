// StateGraph - named stages joined by fixed edges
use super::state::{WorkflowState, StateUpdate};
use crate::error::{StageError, WorkflowError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use async_trait::async_trait;

/// One pipeline stage. `run` may fail; `fallback` picks the substitute output.
#[async_trait]
pub trait Stage: Send + Sync {
    async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, StageError>;

    fn fallback(&self, state: &WorkflowState, error: &StageError) -> StateUpdate;
}

/// Graph node
pub struct Node {
    pub id: String,
    pub stage: Arc<dyn Stage>,
    pub description: String,
}

/// StateGraph - linear workflow graph, acyclic once compiled
pub struct StateGraph {
    nodes: HashMap<String, Node>,
    /// node_id -> next node_id; nodes without an edge lead to END
    edges: HashMap<String, String>,
    entry_point: Option<String>,
    compiled: bool,
}

impl StateGraph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry_point: None,
            compiled: false,
        }
    }

    pub fn add_node(&mut self, id: String, stage: Arc<dyn Stage>, description: String) -> &mut Self {
        let node = Node {
            id: id.clone(),
            stage,
            description,
        };
        self.nodes.insert(id, node);
        self.compiled = false;
        self
    }

    pub fn add_edge(&mut self, from: String, to: String) -> &mut Self {
        self.edges.insert(from, to);
        self.compiled = false;
        self
    }

    pub fn set_entry_point(&mut self, node_id: String) -> &mut Self {
        self.entry_point = Some(node_id);
        self.compiled = false;
        self
    }

    /// Validate entry point, edge targets and acyclicity
    pub fn compile(&mut self) -> Result<(), WorkflowError> {
        let entry = self.entry_point.as_ref().ok_or(WorkflowError::NoEntryPoint)?;
        if !self.nodes.contains_key(entry) {
            return Err(WorkflowError::UnknownNode(entry.clone()));
        }

        for (from, to) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(WorkflowError::UnknownNode(from.clone()));
            }
            if !self.nodes.contains_key(to) {
                return Err(WorkflowError::UnknownNode(to.clone()));
            }
        }

        // Each node has at most one outgoing edge, so following the chain
        // from every node finds any cycle.
        for start in self.nodes.keys() {
            let mut seen = HashSet::new();
            let mut current = start.as_str();
            while let Some(next) = self.edges.get(current) {
                if !seen.insert(current) {
                    return Err(WorkflowError::Cycle(current.to_string()));
                }
                current = next.as_str();
            }
        }

        self.compiled = true;
        tracing::info!("StateGraph compiled: {} nodes, {} edges", self.nodes.len(), self.edges.len());
        Ok(())
    }

    pub fn get_next_node(&self, current_node: &str) -> Option<&String> {
        self.edges.get(current_node)
    }

    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_entry_point(&self) -> Option<&String> {
        self.entry_point.as_ref()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Node ids in execution order, starting at the entry point
    pub fn ordered_node_ids(&self) -> Vec<String> {
        let mut ordered = Vec::new();
        let mut current = self.entry_point.clone();
        while let Some(id) = current {
            if ordered.contains(&id) || !self.nodes.contains_key(&id) {
                break;
            }
            current = self.edges.get(&id).cloned();
            ordered.push(id);
        }
        ordered
    }

    /// Human-readable flow, e.g. "a -> b -> END"
    pub fn describe_flow(&self) -> String {
        let mut parts = self.ordered_node_ids();
        parts.push("END".to_string());
        parts.join(" -> ")
    }
}

impl Default for StateGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for StateGraph
pub struct StateGraphBuilder {
    graph: StateGraph,
}

impl StateGraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: StateGraph::new(),
        }
    }

    pub fn add_node(mut self, id: &str, stage: Arc<dyn Stage>, description: &str) -> Self {
        self.graph.add_node(id.to_string(), stage, description.to_string());
        self
    }

    pub fn add_edge(mut self, from: &str, to: &str) -> Self {
        self.graph.add_edge(from.to_string(), to.to_string());
        self
    }

    pub fn set_entry_point(mut self, node_id: &str) -> Self {
        self.graph.set_entry_point(node_id.to_string());
        self
    }

    pub fn build(mut self) -> Result<StateGraph, WorkflowError> {
        self.graph.compile()?;
        Ok(self.graph)
    }
}

impl Default for StateGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Stage that appends its name to the trend list, or fails with a fixed error.
    pub(crate) struct TagStage {
        pub tag: &'static str,
        pub fail_with: Option<StageError>,
    }

    #[async_trait]
    impl Stage for TagStage {
        async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, StageError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut trends = state.trends.clone();
            trends.push(self.tag.to_string());
            Ok(StateUpdate::new().with_trends(trends))
        }

        fn fallback(&self, _state: &WorkflowState, _error: &StageError) -> StateUpdate {
            StateUpdate::new().with_trends(vec![format!("{}-fallback", self.tag)])
        }
    }

    pub(crate) fn tag(tag: &'static str) -> Arc<dyn Stage> {
        Arc::new(TagStage { tag, fail_with: None })
    }

    #[test]
    fn test_linear_graph_compiles() {
        let graph = StateGraphBuilder::new()
            .add_node("a", tag("a"), "first")
            .add_node("b", tag("b"), "second")
            .set_entry_point("a")
            .add_edge("a", "b")
            .build()
            .unwrap();

        assert!(graph.is_compiled());
        assert_eq!(graph.ordered_node_ids(), vec!["a", "b"]);
        assert_eq!(graph.describe_flow(), "a -> b -> END");
    }

    #[test]
    fn test_node_keeps_description() {
        let graph = StateGraphBuilder::new()
            .add_node("a", tag("a"), "Collect trends")
            .set_entry_point("a")
            .build()
            .unwrap();

        let node = graph.get_node("a").unwrap();
        assert_eq!(node.id, "a");
        assert_eq!(node.description, "Collect trends");
        assert!(graph.get_node("missing").is_none());
    }

    #[test]
    fn test_missing_entry_point() {
        let result = StateGraphBuilder::new().add_node("a", tag("a"), "").build();
        assert_eq!(result.err(), Some(WorkflowError::NoEntryPoint));
    }

    #[test]
    fn test_edge_to_unknown_node() {
        let result = StateGraphBuilder::new()
            .add_node("a", tag("a"), "")
            .set_entry_point("a")
            .add_edge("a", "ghost")
            .build();
        assert_eq!(result.err(), Some(WorkflowError::UnknownNode("ghost".into())));
    }

    #[test]
    fn test_cycle_rejected() {
        let result = StateGraphBuilder::new()
            .add_node("a", tag("a"), "")
            .add_node("b", tag("b"), "")
            .set_entry_point("a")
            .add_edge("a", "b")
            .add_edge("b", "a")
            .build();
        assert!(matches!(result.err(), Some(WorkflowError::Cycle(_))));
    }
}
