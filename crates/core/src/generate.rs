//! Slide-outline generation through the chat capability.

use crate::chat::ChatCompletion;
use crate::error::GenerationError;
use crate::json::extract_json;
use crate::normalize::SchemaNormalizer;
use crate::types::PresentationSpec;
use serde_json::Value;

/// System prompt fixing the six-slide JSON schema.
pub const OUTLINE_PROMPT: &str = r#"
You are a presentation creation assistant. Create detailed, professional PowerPoint slides based on the user's prompt.
Return ONLY a JSON object with the following structure:
{
  "title": "<Presentation Title>",
  "slides": [
    {
      "title": "<Slide Title>",
      "type": "title_slide",
      "content": "<Main title content>",
      "subtitle": "<Optional subtitle>"
    },
    {
      "title": "<Slide Title>",
      "type": "bullet_points",
      "points": ["<Point 1>", "<Point 2>", "<Point 3>", "<Point 4>"]
    },
    {
      "title": "<Slide Title>",
      "type": "section_header",
      "content": "<Section title or transition slide content>"
    },
    {
      "title": "<Slide Title>",
      "type": "content_slide",
      "paragraphs": ["<Paragraph 1>", "<Paragraph 2>"]
    },
    {
      "title": "<Slide Title>",
      "type": "bullet_points",
      "points": ["<Point 1>", "<Point 2>", "<Point 3>", "<Point 4>"]
    },
    {
      "title": "<Slide Conclusion Title>",
      "type": "conclusion_slide",
      "content": "<Conclusion content>",
      "key_takeaway": "<Key takeaway message>"
    }
  ]
}
You MUST create EXACTLY 6 slides following this pattern:
1. Title slide with presentation title and subtitle
2. Introduction slide with 4 bullet points
3. One key concept slide with a section header
4. Content slide with 2 paragraphs of information
5. Details slide with 4 key bullet points
6. Conclusion slide with summary and key takeaway

Ensure content is distributed evenly and symmetrically across all slides. Make the presentation visually balanced.
Do not include any text outside the JSON structure.
The prompt may be in any language, but your response should be in the same language as the prompt.
"#;

/// Turns a topic into a normalized six-slide outline with one model call.
#[derive(Debug, Clone, Default)]
pub struct ContentGenerator {
    normalizer: SchemaNormalizer,
}

impl ContentGenerator {
    pub fn new(normalizer: SchemaNormalizer) -> Self {
        Self { normalizer }
    }

    /// Ask the model for an outline of `topic`.
    ///
    /// Exactly one remote call is made; nothing is retried.
    pub fn generate<C: ChatCompletion + ?Sized>(
        &self,
        chat: &C,
        topic: &str,
    ) -> Result<PresentationSpec, GenerationError> {
        log::debug!("Requesting slide outline for {:?}", topic);
        let output = chat.prompt(OUTLINE_PROMPT, topic)?;
        self.parse_output(output.trim())
    }

    /// Extract, parse and normalize raw model output.
    pub fn parse_output(&self, output: &str) -> Result<PresentationSpec, GenerationError> {
        let json = extract_json(output).ok_or(GenerationError::NoJsonFound)?;
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| GenerationError::MalformedJson(e.to_string()))?;
        self.normalizer.normalize(&raw)
    }
}
