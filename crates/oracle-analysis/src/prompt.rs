//! Prompt templates for the narrator.
//!
//! Both templates request the same five numbered sections in the same order,
//! and ask for "Risk Level: High|Moderate|Low" lines so the alert classifier
//! has a stable target.

use std::fmt::Write;

use oracle_environment::{EnvironmentSnapshot, Place};
use oracle_news::NewsDigest;

use crate::season::Season;

const ANALYSIS_SECTIONS: &str = "\
Please provide a comprehensive analysis including:
1. Most likely diseases/health risks for this location and season
2. Risk level assessment (High, Moderate, Low) for each potential outbreak, written as \"Risk Level: <High|Moderate|Low>\"
3. Environmental factors contributing to disease risks
4. Preventive measures and health recommendations
5. Vulnerable populations to watch out for

Format your response clearly with proper headings and bullet points.";

/// Prompt built from environmental readings.
pub fn environment_prompt(snapshot: &EnvironmentSnapshot, place: &Place, season: Season) -> String {
    format!(
        "You are a health expert and epidemiologist. Based on the following environmental \
and geographical data, predict potential disease outbreaks for {place}:

Environmental Data:
- Temperature: {temp}°C
- Humidity: {humidity}%
- Weather: {weather}
- Air Quality Index: {aqi} (1=Good, 5=Hazardous)
- PM2.5: {pm25} μg/m³
- CO: {co} μg/m³
- Current Season: {season}
- Location: {place}

{sections}",
        place = place,
        temp = snapshot.temperature_c,
        humidity = snapshot.humidity_pct,
        weather = snapshot.weather_description,
        aqi = snapshot.air_quality_index,
        pm25 = snapshot.pm2_5,
        co = snapshot.co,
        season = season,
        sections = ANALYSIS_SECTIONS,
    )
}

/// Prompt built from a digest of recent news articles.
pub fn news_prompt(digest: &NewsDigest, place: &Place, season: Season) -> String {
    let mut articles = String::new();
    for (i, article) in digest.articles().iter().enumerate() {
        let _ = writeln!(
            articles,
            "{}. {} ({}, {})",
            i + 1,
            article.title,
            article.source_name,
            article.published_at.format("%Y-%m-%d")
        );
        if let Some(description) = &article.description {
            let _ = writeln!(articles, "   {}", description);
        }
    }

    format!(
        "You are a health expert and epidemiologist. Based on the following recent news \
reports, predict potential disease outbreaks for {place}:

Recent Health News:
{articles}
- Current Season: {season}
- Location: {place}

{sections}",
        place = place,
        articles = articles,
        season = season,
        sections = ANALYSIS_SECTIONS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use oracle_environment::Coordinates;
    use oracle_news::NewsArticle;

    fn snapshot() -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            temperature_c: 30.0,
            humidity_pct: 40.0,
            pressure_hpa: 1008.0,
            weather_description: "haze".into(),
            air_quality_index: 4,
            pm2_5: 120.5,
            co: 0.8,
            coordinates: Coordinates { lat: 28.6, lon: 77.2 },
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_environment_prompt_embeds_all_metrics() {
        let prompt = environment_prompt(&snapshot(), &Place::new("Delhi", "India"), Season::Autumn);
        assert!(prompt.contains("Delhi, India"));
        assert!(prompt.contains("Temperature: 30°C"));
        assert!(prompt.contains("Humidity: 40%"));
        assert!(prompt.contains("Weather: haze"));
        assert!(prompt.contains("Air Quality Index: 4 (1=Good, 5=Hazardous)"));
        assert!(prompt.contains("PM2.5: 120.5"));
        assert!(prompt.contains("Current Season: Autumn"));
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = environment_prompt(&snapshot(), &Place::default(), Season::Winter);
        let positions: Vec<usize> = ["1. Most likely", "2. Risk level", "3. Environmental", "4. Preventive", "5. Vulnerable"]
            .iter()
            .map(|s| prompt.find(s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_news_prompt_lists_articles() {
        let digest = NewsDigest::new(vec![NewsArticle {
            title: "Dengue cases climb".into(),
            source_name: "City Times".into(),
            published_at: Utc.with_ymd_and_hms(2026, 10, 15, 8, 0, 0).unwrap(),
            description: Some("Hospitals report a surge".into()),
            url: "https://news.example/dengue".into(),
        }]);
        let prompt = news_prompt(&digest, &Place::default(), Season::Autumn);
        assert!(prompt.contains("1. Dengue cases climb (City Times, 2026-10-15)"));
        assert!(prompt.contains("Hospitals report a surge"));
        assert!(!prompt.contains("Air Quality Index"));
        assert!(prompt.contains("5. Vulnerable populations"));
    }
}
