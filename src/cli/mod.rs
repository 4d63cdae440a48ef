//! Terminal adapters around the prediction store
//!
//! Nothing here holds state of its own: the prompter wraps an input/output
//! pair, the display functions render strings, and the interactive flows
//! collect fields and call into [`crate::store::PredictionStore`].

pub mod display;
pub mod interactive;
pub mod prompt;

pub use interactive::{interactive_add, interactive_evaluate};
pub use prompt::Prompter;
