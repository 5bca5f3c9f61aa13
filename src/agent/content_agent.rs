// Content agent - turns prompt, trends and uploaded context into marketing copy.
// Without a model, or when the model call fails, a fixed template is filled in.

use crate::error::StageError;
use crate::openai_client::OpenAiClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Present in every templated (model-free) output.
pub const TEMPLATE_MARKER: &str = "*This content was generated using our marketing content generator.";

/// How many trends are woven into the templated output.
pub const TEMPLATE_TREND_COUNT: usize = 5;

pub(crate) const NO_CONTEXT_HINT: &str =
    "No additional context provided. Consider uploading relevant files for more targeted content.";

/// Text completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, String>;
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, String> {
        self.generate_text(prompt).await
    }
}

pub struct ContentAgent {
    model: Option<Arc<dyn LanguageModel>>,
}

impl ContentAgent {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        if model.is_none() {
            tracing::warn!("Language model not configured, content generation will use the template");
        }
        Self { model }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Fallible model call. Errors are meant to be absorbed by the caller.
    pub async fn try_generate(&self, prompt: &str, trends: &[String], context: &str) -> Result<String, StageError> {
        let Some(model) = &self.model else {
            return Ok(Self::template_content(prompt, trends, context));
        };

        let request = Self::build_model_prompt(prompt, trends, context);
        let content = model.complete(&request).await.map_err(StageError::Model)?;
        if content.trim().is_empty() {
            return Err(StageError::Model("empty completion".to_string()));
        }

        tracing::info!("✍️ Content generated by language model ({} chars)", content.len());
        Ok(content)
    }

    /// Never fails: model errors degrade to the template.
    pub async fn generate(&self, prompt: &str, trends: &[String], context: &str) -> String {
        match self.try_generate(prompt, trends, context).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Content generation failed ({}), using template", e);
                Self::template_content(prompt, trends, context)
            }
        }
    }

    pub fn build_model_prompt(prompt: &str, trends: &[String], context: &str) -> String {
        let trend_lines = if trends.is_empty() {
            "- (none)".to_string()
        } else {
            trends.iter().map(|t| format!("- {}", t)).collect::<Vec<_>>().join("\n")
        };
        let context = if context.trim().is_empty() {
            "No additional context provided."
        } else {
            context
        };

        format!(
            r#"You are an expert marketing content creator. Generate engaging, professional marketing content based on the following:

PROMPT: {prompt}

CURRENT MARKETING TRENDS:
{trend_lines}

ADDITIONAL CONTEXT:
{context}

INSTRUCTIONS:
- Create compelling, actionable marketing content
- Use professional but engaging language
- Weave in the trends above where they fit the audience
- Include specific examples and actionable tips
- Structure the content with clear headings and bullet points

Generate the content now:"#
        )
    }

    /// Deterministic template used when no model output is available.
    pub fn template_content(prompt: &str, trends: &[String], context: &str) -> String {
        let trend_bullets = trends
            .iter()
            .take(TEMPLATE_TREND_COUNT)
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n");
        let trend_section = if trend_bullets.is_empty() {
            "- Monitor your market for emerging opportunities".to_string()
        } else {
            trend_bullets
        };
        let context = if context.trim().is_empty() { NO_CONTEXT_HINT } else { context };

        let content = format!(
            r#"# Marketing Content: {prompt}

## Overview
Based on your request for "{prompt}", here's a comprehensive marketing strategy.

## Trending Opportunities
{trend_section}

## Strategic Recommendations
1. **Content Strategy**: Develop content that addresses your target audience
2. **Audience Engagement**: Focus on customer engagement and value delivery
3. **Channel Optimization**: Leverage digital channels effectively

## Action Items
- Create compelling content around your key message
- Implement best practices in your marketing
- Monitor performance and adjust strategy based on results

## Additional Context
{context}

---
{TEMPLATE_MARKER} For more personalized content, configure an OpenAI API key.*"#
        );

        tracing::info!("Template content generated ({} chars)", content.len());
        content
    }
}
