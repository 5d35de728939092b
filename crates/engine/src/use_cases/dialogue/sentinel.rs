//! Display text for degraded replies.

use crate::infrastructure::ports::InferenceError;

/// Marks a reply that reports a failure instead of coming from the model.
pub const SENTINEL_PREFIX: &str = "\u{26a0}\u{fe0f} ";

pub const UNEXPECTED_FORMAT: &str =
    "\u{26a0}\u{fe0f} Unexpected response format from LLM service.";
pub const EMPTY_RESPONSE: &str = "\u{26a0}\u{fe0f} Empty response from LLM service.";

pub fn is_sentinel(reply: &str) -> bool {
    reply.starts_with(SENTINEL_PREFIX)
}

/// One fixed message per failure kind.
pub fn inference_sentinel(error: &InferenceError) -> String {
    let message = match error {
        InferenceError::Timeout => "LLM service timeout. Please try again.".to_string(),
        InferenceError::Connection(_) => {
            "Cannot connect to LLM service. Please check if Ollama is running.".to_string()
        }
        InferenceError::OutOfMemory => {
            "Insufficient memory for model. Try restarting Ollama or using a smaller model."
                .to_string()
        }
        InferenceError::ProcessCrashed => {
            "Model process crashed. Please restart Ollama service.".to_string()
        }
        InferenceError::Internal => "LLM service internal error. Check Ollama logs.".to_string(),
        InferenceError::ModelNotFound { model } => format!(
            "Model not found. Please check if {model} is installed (ollama pull {model})."
        ),
        InferenceError::Status(code) => format!("LLM service error (status {code})."),
        InferenceError::Transport(_) => "Connection error to LLM service.".to_string(),
        InferenceError::Unexpected(_) => "Unexpected error occurred.".to_string(),
    };
    format!("{SENTINEL_PREFIX}{message}")
}
