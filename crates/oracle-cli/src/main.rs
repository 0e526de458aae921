mod commands;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use oracle_analysis::{AnalysisCycle, DashboardState, Session, StoryMode};
use oracle_core::{App, Config};
use oracle_environment::{OpenWeatherClient, Place};
use oracle_media::{BackgroundResolver, CommandBackend, NarrationPlayer};
use oracle_narrator::GeminiClient;
use oracle_news::NewsClient;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{Command, HELP};

/// Forecast disease-outbreak risk for a place from its weather, air quality
/// and recent health news.
#[derive(Debug, Parser)]
#[command(name = "oracle", version, about)]
struct Args {
    /// City to analyze
    #[arg(default_value = "Delhi")]
    city: String,

    /// Region or country of the city
    #[arg(default_value = "India")]
    region: String,

    /// Build the forecast from recent health news instead of readings
    #[arg(long)]
    news: bool,

    /// Read the forecast aloud once it arrives
    #[arg(long)]
    speak: bool,

    /// Start with the onboarding walkthrough
    #[arg(long)]
    story: bool,

    /// Skip the background photo lookup
    #[arg(long)]
    no_image: bool,
}

fn build_cycle(config: &Config, args: &Args) -> Result<AnalysisCycle> {
    let timeout = Duration::from_secs(config.http.timeout_secs);

    let environment =
        OpenWeatherClient::with_base_url(&config.weather.api_key, &config.weather.base_url, timeout)
            .context("Failed to create weather client")?;
    let narrator = GeminiClient::with_base_url(
        &config.narrator.api_key,
        &config.narrator.base_url,
        &config.narrator.model,
        timeout,
    )
    .context("Failed to create narrator client")?;

    let mut cycle = AnalysisCycle::new(environment, narrator);

    if args.news {
        let news = NewsClient::with_base_url(&config.news.api_key, &config.news.base_url, timeout)
            .context("Failed to create news client")?
            .with_page_size(config.news.page_size as usize);
        cycle = cycle.with_news(news);
    }

    if config.images.enabled && !args.no_image {
        let images =
            BackgroundResolver::with_base_url(&config.images.api_key, &config.images.base_url, timeout)
                .context("Failed to create image client")?;
        cycle = cycle.with_images(images);
    }

    Ok(cycle)
}

/// Keep the player in step with the state: stop stale speech and mirror the
/// speaking flag.
fn sync_player(session: &Session, player: &mut NarrationPlayer) -> DashboardState {
    let state = session.snapshot();
    player.on_narrative_changed(state.narrative().map(|n| n.as_str()));
    let speaking = player.is_speaking();
    session.update(|s| s.with_speaking(speaking))
}

fn toggle_speech(session: &Session, player: &mut NarrationPlayer) -> DashboardState {
    let state = session.snapshot();
    match state.narrative() {
        Some(narrative) => {
            let speaking = player.toggle(narrative.as_str());
            session.update(|s| s.with_speaking(speaking))
        }
        None => {
            println!("Nothing to read yet.");
            state
        }
    }
}

async fn refresh(session: &Session, player: &mut NarrationPlayer) -> DashboardState {
    let today = Local::now().date_naive();
    session
        .refresh_with(today, |state| print!("{}", render::dashboard(state)))
        .await;
    sync_player(session, player)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    oracle_core::init()?;

    let mut app = App::new()?;
    for warning in app.warnings() {
        tracing::warn!("Config: {}", warning);
    }

    let config = app.shared_config();
    let cycle = build_cycle(&config, &args)?;
    tracing::info!("Outbreak Oracle started ({:?} mode)", cycle.mode());

    let session = Session::new(cycle, Place::new(args.city.clone(), args.region.clone()));
    if args.story {
        session.update(|s| s.with_story(StoryMode::start()));
    }

    let backend = CommandBackend::new(config.speech.command.clone(), config.speech.args.clone());
    let mut player = NarrationPlayer::new(Arc::new(backend));

    let mut state = refresh(&session, &mut player).await;
    if args.speak {
        state = toggle_speech(&session, &mut player);
    }
    print!("{}", render::dashboard(&state));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout()).context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        state = match command {
            Command::City(city) => {
                session.update(|s| {
                    let place = s.place().clone().with_city(city);
                    s.with_place(place)
                });
                refresh(&session, &mut player).await
            }
            Command::Region(region) => {
                session.update(|s| {
                    let place = s.place().clone().with_region(region);
                    s.with_place(place)
                });
                refresh(&session, &mut player).await
            }
            Command::Predict => refresh(&session, &mut player).await,
            Command::Speak => toggle_speech(&session, &mut player),
            Command::Story => session.update(|s| s.with_story(StoryMode::start())),
            Command::Next => session.update(|s| {
                let story = s.ui().story.next();
                s.with_story(story)
            }),
            Command::Back => session.update(|s| {
                let story = s.ui().story.previous();
                s.with_story(story)
            }),
            Command::Skip => session.update(|s| s.with_story(StoryMode::default())),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        };

        print!("{}", render::dashboard(&state));
    }

    player.stop();
    app.shutdown()?;
    tracing::info!("Outbreak Oracle stopped");

    Ok(())
}
