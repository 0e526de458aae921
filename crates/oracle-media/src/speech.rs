//! Narration playback.
//!
//! A [`NarrationPlayer`] owns at most one running [`Utterance`]. Starting a new
//! one, changing the narrative, or dropping the player cancels the old one.

use std::process::{Child, Command, Stdio};
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech is disabled (no command configured)")]
    Disabled,

    #[error("Failed to start speech command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can start speaking a piece of text.
pub trait SpeechBackend: Send + Sync {
    fn speak(&self, text: &str) -> Result<Box<dyn Utterance>, SpeechError>;
}

/// A single in-flight speech. Must stop producing audio once cancelled.
pub trait Utterance: Send {
    fn is_finished(&mut self) -> bool;
    fn cancel(&mut self);
}

/// Remove markdown punctuation and collapse whitespace so the synthesizer
/// doesn't read out "asterisk asterisk".
pub fn strip_markdown(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| match c {
            '*' | '#' | '_' | '`' | '>' | '~' => ' ',
            other => other,
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Speaks by spawning an external TTS program (`espeak`, `say`, ...) with the
/// text as its last argument.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    command: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl CommandBackend {
    /// `--` keeps a narrative that starts with a dash from being read as options.
    fn command_for(&self, text: &str) -> Command {
        let mut command = Command::new(&self.command);
        command.args(&self.args).arg("--").arg(text);
        command
    }
}

impl SpeechBackend for CommandBackend {
    fn speak(&self, text: &str) -> Result<Box<dyn Utterance>, SpeechError> {
        if self.command.trim().is_empty() {
            return Err(SpeechError::Disabled);
        }

        let child = self
            .command_for(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        tracing::debug!("Speech process started (pid {})", child.id());
        Ok(Box::new(ChildUtterance { child }))
    }
}

struct ChildUtterance {
    child: Child,
}

impl Utterance for ChildUtterance {
    fn is_finished(&mut self) -> bool {
        // An error here means the process is gone or unreachable
        !matches!(self.child.try_wait(), Ok(None))
    }

    fn cancel(&mut self) {
        if self.is_finished() {
            return;
        }
        if let Err(e) = self.child.kill() {
            tracing::debug!("Failed to stop speech process: {}", e);
        }
        let _ = self.child.wait();
    }
}

impl Drop for ChildUtterance {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Plays narratives through a [`SpeechBackend`], releasing speech on change or drop.
pub struct NarrationPlayer {
    backend: Arc<dyn SpeechBackend>,
    current: Option<Box<dyn Utterance>>,
    playing_text: Option<String>,
}

impl NarrationPlayer {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            current: None,
            playing_text: None,
        }
    }

    /// True while an utterance is still running.
    pub fn is_speaking(&mut self) -> bool {
        let finished = self.current.as_mut().map(|u| u.is_finished()).unwrap_or(true);
        if finished {
            self.current = None;
            self.playing_text = None;
        }
        !finished
    }

    /// Start speaking `narrative`, cancelling whatever is playing.
    ///
    /// Returns whether speech actually started; failures are logged, never raised.
    pub fn play(&mut self, narrative: &str) -> bool {
        self.stop();

        let text = strip_markdown(narrative);
        if text.is_empty() {
            return false;
        }

        match self.backend.speak(&text) {
            Ok(utterance) => {
                self.current = Some(utterance);
                self.playing_text = Some(narrative.to_string());
                true
            }
            Err(e) => {
                tracing::warn!("Narration unavailable: {}", e);
                false
            }
        }
    }

    /// Stop if speaking, otherwise start. Returns the new speaking state.
    pub fn toggle(&mut self, narrative: &str) -> bool {
        if self.is_speaking() {
            self.stop();
            false
        } else {
            self.play(narrative)
        }
    }

    pub fn stop(&mut self) {
        if let Some(mut utterance) = self.current.take() {
            utterance.cancel();
            tracing::debug!("Narration stopped");
        }
        self.playing_text = None;
    }

    /// Cancel playback if the narrative being spoken is no longer current.
    pub fn on_narrative_changed(&mut self, narrative: Option<&str>) {
        if self.playing_text.as_deref() != narrative {
            self.stop();
        }
    }
}

impl Drop for NarrationPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
