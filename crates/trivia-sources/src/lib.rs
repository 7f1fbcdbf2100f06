//! trivia-sources — Question source implementations.
//!
//! Implements the `QuestionSource` trait for the built-in sample quiz and for
//! TOML question set files, and loads the trivia configuration that picks
//! between them.

pub mod builtin;
pub mod config;
pub mod error;
pub mod file;
pub mod mock;

pub use builtin::BuiltinSource;
pub use config::{create_source, load_config, SourceConfig, TriviaConfig};
pub use error::SourceError;
pub use file::FileSource;
pub use mock::MockSource;
