//! Onboarding walkthrough shown on top of the dashboard.

use serde::{Deserialize, Serialize};

/// Walkthrough steps, in display order.
pub const STORY_STEPS: &[&str] = &[
    "Pick a place. Type `city <name>` or `region <name>` and the forecast re-runs for it.",
    "Read the environment cards: temperature, humidity, weather and the air quality index from 1 (good) to 5 (hazardous).",
    "The badge summarizes the outbreak risk. It follows the narrative first and falls back to air quality.",
    "The narrative is a generated outbreak forecast for the place and season. Treat it as guidance, not diagnosis.",
    "Type `speak` to hear the narrative read aloud, and `speak` again to stop.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryMode {
    active: bool,
    step: usize,
}

impl StoryMode {
    pub fn start() -> Self {
        Self { active: true, step: 0 }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    /// Text of the current step, if the walkthrough is running.
    pub fn current_step(&self) -> Option<&'static str> {
        if self.active {
            STORY_STEPS.get(self.step).copied()
        } else {
            None
        }
    }

    /// Advance one step; moving past the last step ends the walkthrough.
    pub fn next(self) -> Self {
        if !self.active {
            return self;
        }
        if self.step + 1 >= STORY_STEPS.len() {
            Self::default()
        } else {
            Self {
                active: true,
                step: self.step + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        Self {
            step: self.step.saturating_sub(1),
            ..self
        }
    }

    pub fn skip(self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_at_first_step() {
        let story = StoryMode::start();
        assert!(story.is_active());
        assert_eq!(story.step_index(), 0);
        assert_eq!(story.current_step(), Some(STORY_STEPS[0]));
    }

    #[test]
    fn test_next_past_last_step_deactivates() {
        let mut story = StoryMode::start();
        for _ in 1..STORY_STEPS.len() {
            story = story.next();
            assert!(story.is_active());
        }
        assert_eq!(story.step_index(), STORY_STEPS.len() - 1);

        let story = story.next();
        assert!(!story.is_active());
        assert_eq!(story.current_step(), None);
    }

    #[test]
    fn test_previous_saturates() {
        let story = StoryMode::start().previous();
        assert_eq!(story.step_index(), 0);
        assert!(story.is_active());

        let story = StoryMode::start().next().next().previous();
        assert_eq!(story.step_index(), 1);
    }

    #[test]
    fn test_skip_and_inactive_next() {
        let story = StoryMode::start().next().skip();
        assert!(!story.is_active());
        assert_eq!(story.next(), story);
    }
}
