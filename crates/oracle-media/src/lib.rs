//! Optional page dressing: background photos and spoken narration.
//!
//! Nothing in here can fail an analysis; every error degrades to "no image"
//! or "not speaking".

pub mod images;
pub mod speech;

pub use images::{BackgroundResolver, ImageError};
pub use speech::{strip_markdown, CommandBackend, NarrationPlayer, SpeechBackend, SpeechError, Utterance};
