//! Immutable dashboard record.
//!
//! Every transition returns a new [`DashboardState`]; nothing is mutated in
//! place. The alert level is never stored, it is recomputed from the current
//! snapshot and narrative.

use oracle_environment::{EnvironmentSnapshot, Place};
use oracle_narrator::RiskNarrative;
use oracle_news::NewsDigest;

use crate::alert::{classify, AlertLevel};
use crate::cycle::CycleReport;
use crate::error::AnalysisError;
use crate::story::StoryMode;

/// Transient presentation flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub loading: bool,
    pub error: Option<String>,
    pub story: StoryMode,
    pub speaking: bool,
    pub background_image_url: Option<String>,
}

impl UiState {
    pub fn errored(&self) -> bool {
        self.error.is_some()
    }
}

/// The one branch of the main panel that is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Loading,
    Errored(&'a str),
    Narrative(&'a RiskNarrative),
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    place: Place,
    snapshot: Option<EnvironmentSnapshot>,
    narrative: Option<RiskNarrative>,
    news: Option<NewsDigest>,
    ui: UiState,
}

impl DashboardState {
    pub fn new(place: Place) -> Self {
        Self {
            place,
            ..Self::default()
        }
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn snapshot(&self) -> Option<&EnvironmentSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn narrative(&self) -> Option<&RiskNarrative> {
        self.narrative.as_ref()
    }

    pub fn news(&self) -> Option<&NewsDigest> {
        self.news.as_ref()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn alert_level(&self) -> AlertLevel {
        classify(
            self.snapshot.as_ref().map(|s| s.air_quality_index),
            self.narrative.as_ref().map(RiskNarrative::as_str),
        )
    }

    /// Loading wins over errors, errors over content.
    pub fn view(&self) -> View<'_> {
        if self.ui.loading {
            View::Loading
        } else if let Some(message) = &self.ui.error {
            View::Errored(message)
        } else if let Some(narrative) = &self.narrative {
            View::Narrative(narrative)
        } else {
            View::Empty
        }
    }

    pub fn with_place(self, place: Place) -> Self {
        Self { place, ..self }
    }

    /// Mark a fetch as in flight and clear any previous error.
    pub fn begin_fetch(self) -> Self {
        Self {
            ui: UiState {
                loading: true,
                error: None,
                ..self.ui
            },
            ..self
        }
    }

    /// Publish fresh environment readings while the rest of the cycle is
    /// still running. The fetch stays in flight and the previous narrative
    /// and news are dropped, so the badge follows the new air quality.
    pub fn with_snapshot(self, snapshot: EnvironmentSnapshot, background_image_url: Option<String>) -> Self {
        Self {
            snapshot: Some(snapshot),
            narrative: None,
            news: None,
            ui: UiState {
                background_image_url,
                ..self.ui
            },
            ..self
        }
    }

    /// Replace the data with the outcome of a cycle.
    ///
    /// A failure clears every fetched field so stale data is never shown next
    /// to the error.
    pub fn complete(self, outcome: Result<CycleReport, AnalysisError>) -> Self {
        match outcome {
            Ok(report) => Self {
                place: report.place,
                snapshot: Some(report.snapshot),
                narrative: report.narrative,
                news: report.news,
                ui: UiState {
                    loading: false,
                    error: None,
                    background_image_url: report.background_image_url,
                    ..self.ui
                },
            },
            Err(e) => {
                tracing::error!("Analysis failed ({}): {}", e.kind(), e);
                Self {
                    place: self.place,
                    snapshot: None,
                    narrative: None,
                    news: None,
                    ui: UiState {
                        loading: false,
                        error: Some(e.user_message()),
                        background_image_url: None,
                        ..self.ui
                    },
                }
            }
        }
    }

    pub fn with_story(self, story: StoryMode) -> Self {
        Self {
            ui: UiState { story, ..self.ui },
            ..self
        }
    }

    pub fn with_speaking(self, speaking: bool) -> Self {
        Self {
            ui: UiState { speaking, ..self.ui },
            ..self
        }
    }
}
