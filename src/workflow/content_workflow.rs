// Content generation workflow: trend_agent -> content_agent -> END

use super::executor::WorkflowExecutor;
use super::graph::{Stage, StateGraph, StateGraphBuilder};
use super::state::{StateUpdate, WorkflowResult, WorkflowStage, WorkflowState};
use crate::agent::content_agent::ContentAgent;
use crate::agent::trend_agent::TrendAgent;
use crate::error::{StageError, WorkflowError, ERROR_SENTINEL};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const TREND_NODE: &str = "trend_agent";
pub const CONTENT_NODE: &str = "content_agent";

/// Per-run options
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Force (or forbid) the live trend source. `None` lets the prompt decide.
    pub use_real_trends: Option<bool>,
}

/// Trend stage
pub struct TrendNode {
    agent: Arc<TrendAgent>,
    use_real_trends: Option<bool>,
}

#[async_trait]
impl Stage for TrendNode {
    async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, StageError> {
        let use_real = self
            .use_real_trends
            .unwrap_or_else(|| TrendAgent::wants_live_trends(&state.prompt));
        let trends = self.agent.try_trends(use_real).await?;
        tracing::info!("Trend stage produced {} trends (live: {})", trends.len(), use_real);

        Ok(StateUpdate::new()
            .with_trends(trends)
            .with_stage(WorkflowStage::ContentStage))
    }

    fn fallback(&self, _state: &WorkflowState, _error: &StageError) -> StateUpdate {
        StateUpdate::new()
            .with_trends(TrendAgent::fallback_trends())
            .with_stage(WorkflowStage::ContentStage)
    }
}

/// Content stage
pub struct ContentNode {
    agent: Arc<ContentAgent>,
}

#[async_trait]
impl Stage for ContentNode {
    async fn run(&self, state: &WorkflowState) -> Result<StateUpdate, StageError> {
        if state.prompt.is_empty() {
            return Err(StageError::MissingPrompt);
        }

        let content = self
            .agent
            .try_generate(&state.prompt, &state.trends, &state.context)
            .await?;
        Ok(StateUpdate::new().with_content(content))
    }

    /// Model failures get the template; anything else becomes error content.
    fn fallback(&self, state: &WorkflowState, error: &StageError) -> StateUpdate {
        let content = match error {
            StageError::Model(_) => {
                ContentAgent::template_content(&state.prompt, &state.trends, &state.context)
            }
            _ => failure_content(error),
        };
        StateUpdate::new().with_content(content)
    }
}

fn failure_content(reason: impl std::fmt::Display) -> String {
    format!("{} Content generation failed - {}", ERROR_SENTINEL, reason)
}

/// Build the two-stage graph
pub fn build_content_workflow(
    trend_agent: Arc<TrendAgent>,
    content_agent: Arc<ContentAgent>,
    options: RunOptions,
) -> Result<StateGraph, WorkflowError> {
    let trend_node = Arc::new(TrendNode {
        agent: trend_agent,
        use_real_trends: options.use_real_trends,
    });
    let content_node = Arc::new(ContentNode { agent: content_agent });

    StateGraphBuilder::new()
        .add_node(TREND_NODE, trend_node, "Collect marketing trends")
        .add_node(CONTENT_NODE, content_node, "Generate marketing copy")
        .set_entry_point(TREND_NODE)
        .add_edge(TREND_NODE, CONTENT_NODE)
        .build()
}

/// Structure description served by the workflow-info endpoint
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowInfo {
    pub nodes: Vec<String>,
    pub flow: String,
    pub state_schema: BTreeMap<&'static str, &'static str>,
}

/// Entry point used by the HTTP layer
pub struct ContentWorkflow {
    trend_agent: Arc<TrendAgent>,
    content_agent: Arc<ContentAgent>,
}

impl ContentWorkflow {
    pub fn new(trend_agent: Arc<TrendAgent>, content_agent: Arc<ContentAgent>) -> Self {
        tracing::info!("Content generation workflow ready");
        Self {
            trend_agent,
            content_agent,
        }
    }

    pub fn has_model(&self) -> bool {
        self.content_agent.has_model()
    }

    /// Run the pipeline for one request. Always returns a result; failures show
    /// up as error-prefixed content.
    pub async fn run(&self, prompt: &str, context: &str, options: RunOptions) -> WorkflowResult {
        let preview: String = prompt.chars().take(50).collect();
        tracing::info!("Starting content workflow for prompt: {}...", preview);

        let outcome = match build_content_workflow(
            self.trend_agent.clone(),
            self.content_agent.clone(),
            options,
        )
        .and_then(WorkflowExecutor::new)
        {
            Ok(executor) => executor.run(WorkflowState::new(prompt, context)).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(mut state) => {
                if state.content.trim().is_empty() {
                    tracing::warn!("No content generated, using error content");
                    state.content = format!("{} Content generation failed. Please try again.", ERROR_SENTINEL);
                }
                tracing::info!("Content workflow completed ({} chars)", state.content.len());
                WorkflowResult::from(state)
            }
            Err(e) => {
                tracing::error!("Content workflow failed: {}", e);
                WorkflowResult {
                    content: failure_content(&e),
                    image_url: None,
                    trends_used: TrendAgent::fallback_trends(),
                    prompt: prompt.to_string(),
                    context_processed: false,
                }
            }
        }
    }

    pub fn workflow_info(&self) -> WorkflowInfo {
        let flow = match build_content_workflow(
            self.trend_agent.clone(),
            self.content_agent.clone(),
            RunOptions::default(),
        ) {
            Ok(graph) => (graph.ordered_node_ids(), graph.describe_flow()),
            Err(e) => {
                tracing::error!("Failed to build workflow for description: {}", e);
                (Vec::new(), "END".to_string())
            }
        };

        WorkflowInfo {
            nodes: flow.0,
            flow: flow.1,
            state_schema: BTreeMap::from([
                ("prompt", "str"),
                ("trends", "list[str]"),
                ("context", "str"),
                ("content", "str"),
                ("image_url", "str | None"),
            ]),
        }
    }
}
