//! invigil-console — terminal collaborators for invigil.
//!
//! Implements the `Respondent` and `SessionObserver` traits for an
//! interactive terminal, plus question authoring over any `BufRead`
//! and scripted stand-ins for tests.

pub mod author;
pub mod render;
pub mod respondent;
pub mod scripted;

pub use author::ConsoleAuthor;
pub use render::ConsolePresenter;
pub use respondent::ConsoleRespondent;
pub use scripted::{RecordingObserver, ScriptedRespondent};
