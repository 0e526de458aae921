//! Plain-text dashboard rendering for the terminal.

use std::fmt::Write;

use oracle_analysis::{AlertLevel, DashboardState, View};
use oracle_environment::EnvironmentSnapshot;
use oracle_news::NewsDigest;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn ansi(color: &str) -> &'static str {
    match color {
        "red" => "\x1b[31m",
        "yellow" => "\x1b[33m",
        "green" => "\x1b[32m",
        _ => "",
    }
}

pub fn alert_badge(level: AlertLevel) -> String {
    format!("{}{}[ {} ]{}", BOLD, ansi(level.color()), level.label(), RESET)
}

fn environment_cards(out: &mut String, snapshot: &EnvironmentSnapshot) {
    let _ = writeln!(out, "  Temperature  {:.1}°C", snapshot.temperature_c);
    let _ = writeln!(out, "  Humidity     {:.0}%", snapshot.humidity_pct);
    let _ = writeln!(out, "  Pressure     {:.0} hPa", snapshot.pressure_hpa);
    let _ = writeln!(out, "  Weather      {}", snapshot.weather_description);
    let _ = writeln!(
        out,
        "  Air quality  {} ({})  PM2.5 {:.1} μg/m³  CO {:.1} μg/m³",
        snapshot.air_quality_index,
        snapshot.air_quality_label(),
        snapshot.pm2_5,
        snapshot.co
    );
}

fn news_list(out: &mut String, digest: &NewsDigest) {
    let _ = writeln!(out, "{}Recent health news{}", BOLD, RESET);
    if digest.is_empty() {
        let _ = writeln!(out, "  No recent outbreak news found.");
        return;
    }
    for article in digest.displayed() {
        let _ = writeln!(
            out,
            "  - {} {}({}, {}){}",
            article.title,
            DIM,
            article.source_name,
            article.published_at.format("%Y-%m-%d"),
            RESET
        );
        if let Some(description) = &article.description {
            let _ = writeln!(out, "    {}", description);
        }
        let _ = writeln!(out, "    {}{}{}", DIM, article.url, RESET);
    }
}

/// Render the whole dashboard as one block of text.
pub fn dashboard(state: &DashboardState) -> String {
    let mut out = String::new();
    let ui = state.ui();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}Outbreak Oracle{}  {}  {}",
        BOLD,
        RESET,
        state.place(),
        alert_badge(state.alert_level())
    );
    if let Some(url) = &ui.background_image_url {
        let _ = writeln!(out, "{}Background: {}{}", DIM, url, RESET);
    }
    let _ = writeln!(out);

    if let Some(snapshot) = state.snapshot() {
        environment_cards(&mut out, snapshot);
        let _ = writeln!(out);
    }

    if let Some(digest) = state.news() {
        news_list(&mut out, digest);
        let _ = writeln!(out);
    }

    match state.view() {
        View::Loading => {
            let _ = writeln!(out, "Analyzing outbreak risk...");
        }
        View::Errored(message) => {
            let _ = writeln!(out, "{}Error:{} {}", ansi("red"), RESET, message);
        }
        View::Narrative(narrative) => {
            let _ = writeln!(out, "{}Forecast{}", BOLD, RESET);
            let _ = writeln!(out, "{}", narrative);
        }
        View::Empty => {
            let _ = writeln!(out, "No forecast yet. Type `predict` to run one.");
        }
    }

    if ui.speaking {
        let _ = writeln!(out, "{}(speaking, type `speak` to stop){}", DIM, RESET);
    }

    if let Some(step) = ui.story.current_step() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}Walkthrough {}/{}{}  {}",
            BOLD,
            ui.story.step_index() + 1,
            oracle_analysis::STORY_STEPS.len(),
            RESET,
            step
        );
        let _ = writeln!(out, "{}next / back / skip{}", DIM, RESET);
    }

    out
}
