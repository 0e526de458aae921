//! One analysis cycle: fetch the environment, resolve a background, optionally
//! gather news, then ask the narrator for a forecast.
//!
//! Steps run strictly in sequence. Environment, news and narrator failures
//! abort the cycle; the background image never does.

use chrono::NaiveDate;
use oracle_environment::{EnvironmentSnapshot, OpenWeatherClient, Place};
use oracle_media::BackgroundResolver;
use oracle_narrator::{GeminiClient, RiskNarrative};
use oracle_news::{NewsClient, NewsDigest};
use tracing::instrument;

use crate::alert::{classify, AlertLevel};
use crate::error::AnalysisError;
use crate::prompt::{environment_prompt, news_prompt};
use crate::season::Season;

/// Which data the narrator prompt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Environment,
    News,
}

/// Everything one successful cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub place: Place,
    pub snapshot: EnvironmentSnapshot,
    pub narrative: Option<RiskNarrative>,
    pub news: Option<NewsDigest>,
    pub background_image_url: Option<String>,
}

impl CycleReport {
    pub fn alert_level(&self) -> AlertLevel {
        classify(
            Some(self.snapshot.air_quality_index),
            self.narrative.as_ref().map(RiskNarrative::as_str),
        )
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisCycle {
    environment: OpenWeatherClient,
    narrator: GeminiClient,
    news: Option<NewsClient>,
    images: Option<BackgroundResolver>,
}

impl AnalysisCycle {
    pub fn new(environment: OpenWeatherClient, narrator: GeminiClient) -> Self {
        Self {
            environment,
            narrator,
            news: None,
            images: None,
        }
    }

    /// Switch to the news-based prompt.
    pub fn with_news(mut self, news: NewsClient) -> Self {
        self.news = Some(news);
        self
    }

    pub fn with_images(mut self, images: BackgroundResolver) -> Self {
        self.images = Some(images);
        self
    }

    pub fn mode(&self) -> AnalysisMode {
        if self.news.is_some() {
            AnalysisMode::News
        } else {
            AnalysisMode::Environment
        }
    }

    /// Run the whole chain for `place`. `today` selects the season and the
    /// news window.
    pub async fn run(&self, place: &Place, today: NaiveDate) -> Result<CycleReport, AnalysisError> {
        self.run_observed(place, today, |_, _| {}).await
    }

    /// Like [`run`](Self::run), but hands the environment snapshot and
    /// background to `on_environment` as soon as they are known, before news
    /// and the narrator are queried.
    #[instrument(skip(self, on_environment), fields(mode = ?self.mode()), level = "info")]
    pub async fn run_observed<F>(
        &self,
        place: &Place,
        today: NaiveDate,
        on_environment: F,
    ) -> Result<CycleReport, AnalysisError>
    where
        F: FnOnce(&EnvironmentSnapshot, Option<&str>),
    {
        let snapshot = self.environment.fetch_snapshot(place).await?;

        let background_image_url = match &self.images {
            Some(images) => images.resolve(&place.city, &snapshot.weather_description).await,
            None => None,
        };

        on_environment(&snapshot, background_image_url.as_deref());

        let season = Season::for_date(today);

        let (prompt, news) = match &self.news {
            Some(client) => {
                let digest = client.health_news(place, today).await?;
                if digest.is_empty() {
                    tracing::info!("No recent health news for {}, skipping narrative", place);
                    return Ok(CycleReport {
                        place: place.clone(),
                        snapshot,
                        narrative: None,
                        news: Some(digest),
                        background_image_url,
                    });
                }
                (news_prompt(&digest, place, season), Some(digest))
            }
            None => (environment_prompt(&snapshot, place, season), None),
        };

        let narrative = self.narrator.narrate(&prompt).await?;

        let report = CycleReport {
            place: place.clone(),
            snapshot,
            narrative: Some(narrative),
            news,
            background_image_url,
        };
        tracing::info!("Analysis for {} complete: {}", place, report.alert_level());
        Ok(report)
    }
}
