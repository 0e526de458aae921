use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Meteorological season, northern-hemisphere month buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Mar–May Spring, Jun–Aug Summer, Sep–Nov Autumn, everything else Winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Season for the local calendar date on this machine
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_has_exactly_one_season() {
        let expected = [
            Season::Winter, Season::Winter, Season::Spring, Season::Spring,
            Season::Spring, Season::Summer, Season::Summer, Season::Summer,
            Season::Autumn, Season::Autumn, Season::Autumn, Season::Winter,
        ];
        for (i, season) in expected.iter().enumerate() {
            assert_eq!(Season::from_month(i as u32 + 1), *season, "month {}", i + 1);
        }
    }

    #[test]
    fn test_buckets_are_three_months_each() {
        for season in [Season::Winter, Season::Spring, Season::Summer, Season::Autumn] {
            let count = (1..=12).filter(|m| Season::from_month(*m) == season).count();
            assert_eq!(count, 3, "{}", season);
        }
    }

    #[test]
    fn test_for_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(Season::for_date(date), Season::Autumn);
        let date = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        assert_eq!(Season::for_date(date), Season::Winter);
    }
}
