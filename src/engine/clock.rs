use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Seconds count broken into clock components. Minutes and hours are
/// floored; the residual seconds are rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeParts {
    pub fn from_secs(secs: f64) -> Self {
        let hours = (secs / 3_600.0).floor();
        let remainder = secs % 3_600.0;
        let minutes = (remainder / 60.0).floor();
        let seconds = (remainder % 60.0).ceil();

        Self {
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Replay clock for one day of rentals. Owned by the playback engine;
/// all state is explicit here, nothing lives in globals.
///
/// `position_secs` counts simulated seconds since the start of the
/// replay window. The window begins `start_offset_secs` after midnight
/// of `date` and covers `window_secs` of the day.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    date: NaiveDate,
    start_offset_secs: f64,
    window_secs: f64,
    speedup: f64,
    position_secs: f64,
    playing: bool,
}

impl PlaybackClock {
    pub fn new(date: NaiveDate, start_offset_secs: f64, window_secs: f64, speedup: f64) -> Self {
        Self {
            date,
            start_offset_secs,
            window_secs,
            speedup,
            position_secs: 0.0,
            playing: false,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Fraction of the replay window already covered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.window_secs <= 0.0 {
            return 0.0;
        }
        self.position_secs / self.window_secs
    }

    pub fn seek_to(&mut self, position_secs: f64) {
        self.position_secs = position_secs.clamp(0.0, self.window_secs);
    }

    /// Advances the clock by one wall-clock tick. Paused clocks stay
    /// put; a clock reaching the end of the window pauses itself.
    pub fn advance(&mut self, wall_dt: Duration) {
        if !self.playing {
            return;
        }

        self.position_secs += wall_dt.as_secs_f64() * self.speedup;
        if self.position_secs >= self.window_secs {
            self.position_secs = self.window_secs;
            self.playing = false;
        }
    }

    /// The simulated instant the clock currently points at.
    pub fn current_time(&self) -> DateTime<Utc> {
        let midnight = self.date.and_time(NaiveTime::MIN).and_utc();
        let elapsed_ms = ((self.start_offset_secs + self.position_secs) * 1_000.0) as i64;
        midnight + chrono::Duration::milliseconds(elapsed_ms)
    }

    /// Simulated time of day, for status displays and logs.
    pub fn time_of_day(&self) -> TimeParts {
        TimeParts::from_secs(self.start_offset_secs + self.position_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{PlaybackClock, TimeParts};

    fn clock() -> PlaybackClock {
        let date = NaiveDate::from_ymd_opt(2011, 5, 18).unwrap();
        // Window starts at 4:30, covers the rest of the day, and replays
        // the day in two minutes of wall time.
        PlaybackClock::new(date, 4.5 * 3_600.0, 24.0 * 3_600.0, 720.0)
    }

    #[test]
    fn decomposes_seconds_into_clock_parts() {
        let parts = TimeParts::from_secs(2.0 * 3_600.0 + 5.0 * 60.0 + 30.0);
        assert_eq!(
            parts,
            TimeParts {
                hours: 2,
                minutes: 5,
                seconds: 30
            }
        );
        assert_eq!(parts.to_string(), "2:05:30");
    }

    #[test]
    fn fractional_seconds_round_up() {
        let parts = TimeParts::from_secs(61.2);
        assert_eq!(parts.minutes, 1);
        assert_eq!(parts.seconds, 2);
    }

    #[test]
    fn new_clock_is_paused_at_the_window_start() {
        let clock = clock();
        assert!(!clock.is_playing());
        assert_eq!(clock.position_secs(), 0.0);
        let start = Utc.with_ymd_and_hms(2011, 5, 18, 4, 30, 0).unwrap();
        assert_eq!(clock.current_time(), start);
    }

    #[test]
    fn advance_is_a_no_op_while_paused() {
        let mut clock = clock();
        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.position_secs(), 0.0);
    }

    #[test]
    fn advance_scales_wall_time_by_the_speedup() {
        let mut clock = clock();
        clock.play();
        clock.advance(Duration::from_secs(1));
        assert!((clock.position_secs() - 720.0).abs() < 1e-9);
    }

    #[test]
    fn clock_pauses_at_the_end_of_the_window() {
        let mut clock = clock();
        clock.play();
        clock.advance(Duration::from_secs(1_000));
        assert!(!clock.is_playing());
        assert_eq!(clock.position_secs(), 24.0 * 3_600.0);
    }

    #[test]
    fn seek_clamps_into_the_window() {
        let mut clock = clock();
        clock.seek_to(-5.0);
        assert_eq!(clock.position_secs(), 0.0);
        clock.seek_to(1e9);
        assert_eq!(clock.position_secs(), 24.0 * 3_600.0);
    }

    #[test]
    fn time_of_day_includes_the_start_offset() {
        let mut clock = clock();
        clock.seek_to(1_800.0);
        let parts = clock.time_of_day();
        assert_eq!((parts.hours, parts.minutes), (5, 0));
    }
}
