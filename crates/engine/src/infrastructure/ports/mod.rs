//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Text generation (could swap Ollama -> any HTTP backend)
//! - Sentiment classification (could swap the lexicon for a real model)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{BuildRepo, InteractionRepo, PlayerRepo, ScriptSessionRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{InferencePort, SentimentPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockBuildRepo, MockInteractionRepo, MockPlayerRepo, MockScriptSessionRepo};

#[cfg(test)]
pub use external::{MockInferencePort, MockSentimentPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{InferenceError, RepoError};
