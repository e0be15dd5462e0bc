//! Session configuration.

use crate::theme::Theme;

/// Configuration for a [`Context`](crate::context::Context) and its frame pump.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frame rate cap. `None` renders as fast as input and deadlines demand.
    pub max_fps: Option<u32>,
    /// Screen units per logical unit.
    pub scale: f32,
    /// Maximum number of widgets installed in one frame.
    pub arena_capacity: usize,
    /// Initial theme.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_fps: Some(60),
            scale: 1.0,
            arena_capacity: 4096,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame rate cap (builder). `0` removes the cap.
    pub fn with_max_fps(mut self, fps: u32) -> Self {
        self.max_fps = (fps > 0).then_some(fps);
        self
    }

    /// Set the scale (builder). Non-positive values are ignored.
    pub fn with_scale(mut self, scale: f32) -> Self {
        if scale > 0.0 {
            self.scale = scale;
        }
        self
    }

    /// Set the per-frame widget limit (builder).
    pub fn with_arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }

    /// Set the initial theme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = Config::new();
        assert_eq!(config.max_fps, Some(60));
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.arena_capacity, 4096);
        assert_eq!(config.theme.name, "dark");
    }

    #[test]
    fn config_builder() {
        let config = Config::new()
            .with_max_fps(30)
            .with_scale(2.0)
            .with_arena_capacity(16)
            .with_theme(Theme::light());
        assert_eq!(config.max_fps, Some(30));
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.arena_capacity, 16);
        assert_eq!(config.theme.name, "light");
    }

    #[test]
    fn zero_fps_means_uncapped_and_bad_scale_is_ignored() {
        let config = Config::new().with_max_fps(0).with_scale(-1.0);
        assert_eq!(config.max_fps, None);
        assert_eq!(config.scale, 1.0);
    }
}
