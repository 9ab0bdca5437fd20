/// Playback clock for one animation on one instance.
#[derive(Clone, Copy, Debug)]
pub struct Playback {
    pub time: f32,
    pub enabled: bool,
    pub looping: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            enabled: false,
            looping: false,
        }
    }

    /// Advance the clock. Looping playback wraps on `duration`; non-looping
    /// playback accumulates and leaves handling the end of the clip to the
    /// caller.
    pub fn add_time(&mut self, delta: f32, duration: f32) {
        if !self.enabled {
            return;
        }

        self.time += delta;
        if self.looping && duration > 0.0 {
            self.time = self.time.rem_euclid(duration);
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_playback_does_not_advance() {
        let mut playback = Playback::new();
        playback.add_time(1.0, 8.0);
        assert_eq!(playback.time, 0.0);
    }

    #[test]
    fn looping_playback_wraps_on_duration() {
        let mut playback = Playback {
            enabled: true,
            looping: true,
            ..Playback::new()
        };

        playback.add_time(9.5, 8.0);
        assert!((playback.time - 1.5).abs() < 1e-5);
    }

    #[test]
    fn non_looping_playback_accumulates_past_duration() {
        let mut playback = Playback {
            enabled: true,
            ..Playback::new()
        };

        playback.add_time(9.5, 8.0);
        assert_eq!(playback.time, 9.5);
    }
}
