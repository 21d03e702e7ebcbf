use crate::domain::synthesis::{ProviderError, SynthesisError};
use crate::infrastructure::repositories::TextGenerationRepository;
use std::sync::Arc;

fn proofread_prompt(text: &str) -> String {
    format!(
        "You are a professional proofreader. Correct any spelling or grammar mistakes in the text provided below.\n\
         IMPORTANT:\n\
         1. Preserve all markers in parentheses like (happy), (laughing), or (reverb: high). DO NOT modify or remove them.\n\
         2. Maintain the overall tone and meaning.\n\
         3. Return ONLY the corrected text, no explanations.\n\n\
         TEXT TO CORRECT:\n{}",
        text
    )
}

/// Spelling and grammar pass over a script, markers untouched
pub struct ProofreadService {
    text_repo: Arc<dyn TextGenerationRepository>,
    max_chars: usize,
}

impl ProofreadService {
    pub fn new(text_repo: Arc<dyn TextGenerationRepository>, max_chars: usize) -> Self {
        Self {
            text_repo,
            max_chars,
        }
    }

    pub async fn proofread(&self, text: &str) -> Result<String, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::Invalid("Text cannot be empty".to_string()));
        }

        let corrected = self
            .text_repo
            .generate_text(&proofread_prompt(text), None)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Proofreading failed");
                SynthesisError::Provider(ProviderError::Transport(
                    "Could not check spelling. Please try again.".to_string(),
                ))
            })?
            .unwrap_or_else(|| text.to_string());

        let corrected_chars = corrected.chars().count();
        if corrected_chars > self.max_chars {
            tracing::warn!(
                corrected_chars,
                max_chars = self.max_chars,
                "Proofread text truncated"
            );
            return Ok(corrected.chars().take(self.max_chars).collect());
        }
        Ok(corrected)
    }
}
