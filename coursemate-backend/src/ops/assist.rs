//! AI-assisted operations. They read from the store but never mutate it;
//! callers decide whether to apply what the model suggests.

use crate::ai::{prompts, AiBridge, PromptKind};
use crate::error::{AssistError, StoreError};
use crate::models::{Note, TemplateKind};
use crate::notes::tags::sanitize_tag_list;
use crate::store::DataStore;

type AssistResult<T> = Result<T, AssistError>;

impl DataStore {
    pub async fn summarize_note(&self, bridge: &dyn AiBridge, note_id: &str) -> AssistResult<String> {
        let note = self.note_with_content(note_id)?;
        let answer = bridge
            .generate(PromptKind::Summarize, &prompts::summarize(&note.content), self.ai_model())
            .await?;
        Ok(answer.trim().to_string())
    }

    /// Ask the model for hashtags and canonicalize its answer. A blank note
    /// yields no tags without a model call.
    pub async fn suggest_tags(&self, bridge: &dyn AiBridge, note_id: &str) -> AssistResult<Vec<String>> {
        let (_, note) = self
            .find_note(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;
        if note.content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let answer = bridge
            .generate(PromptKind::TagSuggest, &prompts::tag_suggest(&note.content), self.ai_model())
            .await?;
        Ok(sanitize_tag_list(&answer))
    }

    /// Answer a question using the note's content as context.
    pub async fn answer_question(
        &self,
        bridge: &dyn AiBridge,
        note_id: &str,
        question: &str,
    ) -> AssistResult<String> {
        let (_, note) = self
            .find_note(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;
        let question = question.trim();
        if question.is_empty() {
            return Err(StoreError::validation("question cannot be empty").into());
        }
        let answer = bridge
            .generate(PromptKind::Qa, &prompts::qa(&note.content, question), self.ai_model())
            .await?;
        Ok(answer.trim().to_string())
    }

    /// Draft a template body from a free-text description.
    pub async fn generate_template_text(
        &self,
        bridge: &dyn AiBridge,
        kind: TemplateKind,
        request: &str,
    ) -> AssistResult<String> {
        let request = request.trim();
        if request.is_empty() {
            return Err(StoreError::validation("template description cannot be empty").into());
        }
        let answer = bridge
            .generate(PromptKind::TemplateFill, &prompts::template_fill(kind, request), self.ai_model())
            .await?;
        Ok(answer.trim().to_string())
    }

    fn ai_model(&self) -> &str {
        &self.data().settings.ai_model
    }

    fn note_with_content(&self, note_id: &str) -> Result<&Note, StoreError> {
        let (_, note) = self
            .find_note(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;
        if note.content.trim().is_empty() {
            return Err(StoreError::validation("note has no content to summarize"));
        }
        Ok(note)
    }
}
