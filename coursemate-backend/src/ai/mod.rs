//! AI bridge to a local language model.
//!
//! Stateless request/response: each call sends one prompt and waits for the
//! whole answer. Callers treat every [`AiError`] as feature-scoped.

pub mod ollama_client;

use async_trait::async_trait;
use strum::{AsRefStr, EnumIter, EnumString};

use crate::error::AiError;
use crate::models::TemplateKind;

pub use ollama_client::OllamaClient;

/// What a generation request is for. Each kind carries its own system
/// prompt and sampling temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum PromptKind {
    Summarize,
    TagSuggest,
    TemplateFill,
    Qa,
}

impl PromptKind {
    pub fn system_prompt(self) -> &'static str {
        match self {
            PromptKind::Summarize => {
                "You are a helpful study assistant. Summarize the text into: \
                 1) Key points (bulleted) 2) Concepts 3) Action items if any. Keep it concise."
            }
            PromptKind::TagSuggest => {
                "Extract concise hashtags from the text. Return a comma-separated list of tokens \
                 like #math, #algebra. Avoid duplicates, keep 3-8 most relevant."
            }
            PromptKind::TemplateFill => {
                "You design note templates for students. Output a plain text template with \
                 labelled sections and bullets where helpful."
            }
            PromptKind::Qa => {
                "You are a helpful assistant answering questions using the provided context. \
                 Cite relevant parts briefly and be concise."
            }
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            PromptKind::Summarize | PromptKind::TagSuggest => 0.2,
            PromptKind::TemplateFill | PromptKind::Qa => 0.3,
        }
    }
}

/// User prompts sent alongside each kind's system prompt.
pub mod prompts {
    use super::TemplateKind;

    pub fn summarize(text: &str) -> String {
        format!("Summarize the following note:\n\n{}\n\nProvide structured output.", text)
    }

    pub fn tag_suggest(text: &str) -> String {
        format!("Extract hashtags from:\n\n{}\n\nReturn only the list.", text)
    }

    pub fn template_fill(kind: TemplateKind, request: &str) -> String {
        let sections = match kind {
            TemplateKind::Study => "sections like Topic, Key Points, Examples, and Summary",
            TemplateKind::Planner => {
                "Date, Priorities, Schedule (time blocks), Tasks with [ ] checkboxes, and Notes"
            }
        };
        format!(
            "Create a {} template tailored to: '{}'. Include {}. \
             Only output the template structure, no commentary.",
            kind.as_ref(),
            request,
            sections
        )
    }

    pub fn qa(context: &str, question: &str) -> String {
        format!("Context:\n{}\n\nQuestion: {}\n\nAnswer:", context, question)
    }
}

/// The seam between domain operations and whatever model server is running.
#[async_trait]
pub trait AiBridge: Send + Sync {
    /// Whether the service answers at all. Never errors.
    async fn is_available(&self) -> bool;

    /// Run one non-streaming generation and return the raw model text.
    async fn generate(&self, kind: PromptKind, input: &str, model: &str) -> Result<String, AiError>;

    /// Installed model names, best-effort. Empty when the service is unreachable.
    async fn list_models(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_prompt_kind_names() {
        let names: Vec<String> = PromptKind::iter().map(|k| k.as_ref().to_string()).collect();
        assert_eq!(names, vec!["summarize", "tag-suggest", "template-fill", "qa"]);
        assert_eq!("tag-suggest".parse::<PromptKind>().unwrap(), PromptKind::TagSuggest);
    }

    #[test]
    fn test_template_prompt_mentions_kind() {
        let prompt = prompts::template_fill(TemplateKind::Planner, "weekly calculus review");
        assert!(prompt.starts_with("Create a planner template tailored to: 'weekly calculus review'"));
        assert!(prompt.contains("[ ] checkboxes"));
    }
}
