// WorkflowState - the per-request record threaded through the pipeline
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Position of a run in the linear pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStage {
    TrendStage,
    ContentStage,
    Done,
}

/// A stage whose collaborator failed and whose fallback was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageFailure {
    pub node: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// WorkflowState - created fresh per request, mutated in place by each stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub prompt: String,
    pub trends: Vec<String>,
    /// Text extracted from an uploaded file, empty when none
    pub context: String,
    pub content: String,
    pub image_url: Option<String>,

    pub stage: WorkflowStage,
    pub failures: Vec<StageFailure>,
}

impl WorkflowState {
    pub fn new(prompt: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            trends: Vec::new(),
            context: context.into(),
            content: String::new(),
            image_url: None,
            stage: WorkflowStage::TrendStage,
            failures: Vec::new(),
        }
    }

    /// Apply a stage's output. Only fields present in the update are replaced.
    pub fn apply_update(&mut self, update: StateUpdate) {
        if let Some(trends) = update.trends {
            self.trends = trends;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(stage) = update.stage {
            self.stage = stage;
        }
    }

    pub fn record_failure(&mut self, node: &str, message: String) {
        self.failures.push(StageFailure {
            node: node.to_string(),
            message,
            timestamp: Utc::now(),
        });
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.stage == WorkflowStage::Done
    }
}

/// Output of one stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub trends: Option<Vec<String>>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub stage: Option<WorkflowStage>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trends(mut self, trends: Vec<String>) -> Self {
        self.trends = Some(trends);
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_stage(mut self, stage: WorkflowStage) -> Self {
        self.stage = Some(stage);
        self
    }
}

/// Terminal view of a run, handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub content: String,
    pub image_url: Option<String>,
    pub trends_used: Vec<String>,
    pub prompt: String,
    pub context_processed: bool,
}

impl From<WorkflowState> for WorkflowResult {
    fn from(state: WorkflowState) -> Self {
        let context_processed = state.has_context();
        Self {
            content: state.content,
            image_url: state.image_url,
            trends_used: state.trends,
            prompt: state.prompt,
            context_processed,
        }
    }
}
