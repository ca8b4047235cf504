use tracing::debug;

// Before any dash the cooldown reads as long since elapsed
const NEVER_DASHED: f32 = -999.0;
const DEFAULT_DASH_COOLDOWN: f32 = 1.0;

/// Receives score deltas from collectibles
pub trait ScoreSink {
    fn add_score(&mut self, amount: u32);
}

/// Told when a dash starts so cooldown progress can be displayed
pub trait CooldownSink {
    fn start_dash_cooldown(&mut self, duration: f32, now: f32);
}

/// Write-only text widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextWidget {
    pub text: String,
}

/// Write-only slider, value in [0, 1]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderWidget {
    pub value: f32,
}

/// Score and dash cooldown state, projected onto whichever HUD widgets are
/// bound. Unbound widgets are simply skipped.
#[derive(Debug, Clone)]
pub struct GameManager {
    pub score_text: Option<TextWidget>,
    pub dash_cooldown_slider: Option<SliderWidget>,
    score: u32,
    last_dash_time: f32,
    dash_cooldown: f32,
}

impl GameManager {
    pub fn new(score_text: Option<TextWidget>, dash_cooldown_slider: Option<SliderWidget>) -> Self {
        let mut manager = Self {
            score_text,
            dash_cooldown_slider,
            score: 0,
            last_dash_time: NEVER_DASHED,
            dash_cooldown: DEFAULT_DASH_COOLDOWN,
        };
        manager.update_score_text();
        manager
    }

    /// Manager with both HUD widgets bound
    pub fn with_hud() -> Self {
        Self::new(Some(TextWidget::default()), Some(SliderWidget::default()))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score += amount;
        self.update_score_text();
    }

    pub fn start_dash_cooldown(&mut self, duration: f32, now: f32) {
        self.dash_cooldown = duration;
        self.last_dash_time = now;
        debug!(duration, now, "dash cooldown started");
    }

    /// Fraction of the cooldown that has elapsed at `now`, in [0, 1].
    pub fn cooldown_progress(&self, now: f32) -> f32 {
        if self.dash_cooldown <= 0.0 {
            return 1.0;
        }
        ((now - self.last_dash_time) / self.dash_cooldown).clamp(0.0, 1.0)
    }

    /// Per-tick refresh of the cooldown slider
    pub fn update(&mut self, now: f32) {
        let progress = self.cooldown_progress(now);
        if let Some(slider) = self.dash_cooldown_slider.as_mut() {
            slider.value = progress;
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.last_dash_time = NEVER_DASHED;
        self.dash_cooldown = DEFAULT_DASH_COOLDOWN;
        self.update_score_text();
        self.update(0.0);
    }

    fn update_score_text(&mut self) {
        if let Some(text) = self.score_text.as_mut() {
            text.text = format!("Score: {}", self.score);
        }
    }
}

impl ScoreSink for GameManager {
    fn add_score(&mut self, amount: u32) {
        GameManager::add_score(self, amount);
    }
}

impl CooldownSink for GameManager {
    fn start_dash_cooldown(&mut self, duration: f32, now: f32) {
        GameManager::start_dash_cooldown(self, duration, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_score_updates_text() {
        let mut manager = GameManager::with_hud();
        assert_eq!(manager.score_text.as_ref().unwrap().text, "Score: 0");

        manager.add_score(1);
        manager.add_score(5);

        assert_eq!(manager.score(), 6);
        assert_eq!(manager.score_text.as_ref().unwrap().text, "Score: 6");
    }

    #[test]
    fn test_missing_widgets_are_skipped() {
        let mut manager = GameManager::new(None, None);
        manager.add_score(3);
        manager.start_dash_cooldown(1.0, 2.0);
        manager.update(2.5);

        assert_eq!(manager.score(), 3);
        assert!(manager.score_text.is_none());
        assert!(manager.dash_cooldown_slider.is_none());
    }

    #[test]
    fn test_cooldown_full_before_first_dash() {
        let mut manager = GameManager::with_hud();
        manager.update(0.0);
        assert_eq!(manager.dash_cooldown_slider.as_ref().unwrap().value, 1.0);
    }

    #[test]
    fn test_cooldown_progress_is_monotonic_and_clamped() {
        let mut manager = GameManager::with_hud();
        manager.start_dash_cooldown(1.0, 10.0);

        let mut previous = -1.0;
        for i in 0..200 {
            let now = 10.0 + i as f32 * 0.01;
            manager.update(now);
            let value = manager.dash_cooldown_slider.as_ref().unwrap().value;
            assert!((0.0..=1.0).contains(&value));
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(previous, 1.0);

        // Clock earlier than the dash never produces a negative value
        assert_eq!(manager.cooldown_progress(9.0), 0.0);
    }

    #[test]
    fn test_cooldown_midway() {
        let mut manager = GameManager::with_hud();
        manager.start_dash_cooldown(2.0, 4.0);
        manager.update(5.0);
        let value = manager.dash_cooldown_slider.as_ref().unwrap().value;
        assert!((value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_cooldown_reads_full() {
        let mut manager = GameManager::with_hud();
        manager.start_dash_cooldown(0.0, 3.0);
        assert_eq!(manager.cooldown_progress(3.0), 1.0);
    }

    #[test]
    fn test_reset_clears_score_and_cooldown() {
        let mut manager = GameManager::with_hud();
        manager.add_score(4);
        manager.start_dash_cooldown(1.0, 0.0);
        manager.reset();

        assert_eq!(manager.score(), 0);
        assert_eq!(manager.score_text.as_ref().unwrap().text, "Score: 0");
        assert_eq!(manager.dash_cooldown_slider.as_ref().unwrap().value, 1.0);
    }
}
