// src/screen/clock.rs
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Number of frames averaged by [`FrameClock::fps`].
const FPS_SAMPLES: usize = 10;

/// Frame timer owned by the host. The host ticks it once per frame; games read
/// the measured frame rate through the screen context.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Cell<Option<Instant>>,
    last_frame: Cell<Duration>,
    samples: RefCell<VecDeque<Duration>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Ends the current frame. Sleeps so frames are at least `1 / limit_fps`
    /// seconds apart (`0` disables the cap) and returns the frame duration in
    /// seconds.
    pub fn tick(&self, limit_fps: u32) -> f32 {
        match self.last_tick.get() {
            Some(last) if limit_fps > 0 => {
                let target = Duration::from_secs_f64(1.0 / limit_fps as f64);
                let elapsed = last.elapsed();
                if elapsed < target {
                    std::thread::sleep(target - elapsed);
                }
            }
            _ => {}
        }
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&self, now: Instant) -> f32 {
        let frame = match self.last_tick.replace(Some(now)) {
            Some(last) => {
                let frame = now.saturating_duration_since(last);
                let mut samples = self.samples.borrow_mut();
                if samples.len() == FPS_SAMPLES {
                    samples.pop_front();
                }
                samples.push_back(frame);
                frame
            }
            None => Duration::ZERO,
        };
        self.last_frame.set(frame);
        log::trace!("frame took {:?}", frame);
        frame.as_secs_f32()
    }

    /// Duration of the previous frame in seconds.
    pub fn last_frame_seconds(&self) -> f32 {
        self.last_frame.get().as_secs_f32()
    }

    /// Average frame rate over the last few frames, `0.0` until measured.
    pub fn fps(&self) -> f32 {
        let samples = self.samples.borrow();
        let total: Duration = samples.iter().sum();
        if samples.is_empty() || total.is_zero() {
            return 0.0;
        }
        samples.len() as f32 / total.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_no_duration() {
        let clock = FrameClock::new();
        assert_eq!(clock.tick_at(Instant::now()), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn fps_averages_recent_frames() {
        let clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        for i in 1..=4 {
            clock.tick_at(start + Duration::from_millis(20 * i));
        }
        assert!((clock.last_frame_seconds() - 0.02).abs() < 1e-6);
        assert!((clock.fps() - 50.0).abs() < 0.01, "{}", clock.fps());
    }

    #[test]
    fn only_the_last_samples_count() {
        let clock = FrameClock::new();
        let mut now = Instant::now();
        clock.tick_at(now);
        for _ in 0..20 {
            now += Duration::from_millis(100);
            clock.tick_at(now);
        }
        for _ in 0..FPS_SAMPLES {
            now += Duration::from_millis(10);
            clock.tick_at(now);
        }
        assert!((clock.fps() - 100.0).abs() < 0.01, "{}", clock.fps());
    }

    #[test]
    fn tick_caps_the_frame_rate() {
        let clock = FrameClock::new();
        clock.tick(0);
        let dt = clock.tick(50);
        assert!(dt >= 0.019, "dt was {dt}");
    }
}
