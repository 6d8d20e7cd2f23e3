//! Selector wheel: equal slices per venue, an eased spin, and winner lookup.
//!
//! Angles are radians, measured clockwise in screen space from the positive
//! x-axis. The wheel is rotated by the animation; the pointer stays fixed.

use std::{
    f64::consts::{FRAC_PI_2, TAU},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use rand::Rng;
use shared::domain::Venue;
use tracing::{debug, info};

use crate::{
    error::WheelError,
    render::{announce_winner, WinnerAnnouncement},
};

pub const FULL_TURNS: f64 = 5.0;
pub const SPIN_DURATION: Duration = Duration::from_millis(5000);
/// Fixed angle the pointer reads the wheel at.
pub const POINTER_ANGLE: f64 = FRAC_PI_2;

pub const PALETTE: [[u8; 3]; 10] = [
    [0xFF, 0x6B, 0x6B],
    [0x4E, 0xCD, 0xC4],
    [0x45, 0xB7, 0xD1],
    [0x96, 0xCE, 0xB4],
    [0xFF, 0xEE, 0xAD],
    [0xD4, 0xA5, 0xA5],
    [0x9B, 0x9B, 0x9B],
    [0xA8, 0xE6, 0xCF],
    [0xFF, 0xD3, 0xB6],
    [0xFF, 0x8B, 0x94],
];

/// Monotonic time source, as an offset from an arbitrary fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

/// Uniform values in `[0, 1)`.
pub trait SpinRandom {
    fn next_unit(&mut self) -> f64;
}

pub struct ThreadRandom;

impl SpinRandom for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always yields the same value; pins the random part of a spin.
pub struct FixedRandom(pub f64);

impl SpinRandom for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

pub fn total_rotation(unit: f64) -> f64 {
    TAU * FULL_TURNS + unit * TAU + FRAC_PI_2
}

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Rendered rotation `elapsed` into a spin of `total` radians.
pub fn rotation_at(total: f64, elapsed: Duration, duration: Duration) -> f64 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    };
    total * ease_out_cubic(progress)
}

pub fn slice_angle(count: usize) -> f64 {
    TAU / count as f64
}

/// Index of the slice under the pointer once the wheel has turned by
/// `total_rotation`. `count` must be non-zero.
pub fn winning_index(total_rotation: f64, count: usize) -> usize {
    let normalized = (-total_rotation + POINTER_ANGLE).rem_euclid(TAU);
    let index = (normalized / slice_angle(count)).floor() as usize;
    index.min(count - 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub label: String,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPhase {
    Idle,
    Spinning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WheelState {
    Idle,
    Spinning {
        started_at: Duration,
        total_rotation: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinOutcome {
    Started { total_rotation: f64 },
    AlreadySpinning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub index: usize,
    pub venue: Venue,
    pub announcement: WinnerAnnouncement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelFrame {
    pub rotation: f64,
    pub finished: Option<SpinResult>,
}

pub struct SelectorWheel<C: Clock> {
    clock: C,
    duration: Duration,
    venues: Vec<Venue>,
    state: WheelState,
    rotation: f64,
}

impl<C: Clock> SelectorWheel<C> {
    pub fn new(clock: C) -> Self {
        Self::with_duration(clock, SPIN_DURATION)
    }

    pub fn with_duration(clock: C, duration: Duration) -> Self {
        Self {
            clock,
            duration,
            venues: Vec::new(),
            state: WheelState::Idle,
            rotation: 0.0,
        }
    }

    /// Takes a private copy of `venues`; later changes to the caller's list
    /// never reach a spin in progress.
    pub fn load(&mut self, venues: &[Venue]) -> Result<(), WheelError> {
        if self.is_spinning() {
            return Err(WheelError::Busy);
        }
        self.venues = venues.to_vec();
        self.rotation = 0.0;
        debug!(slices = self.venues.len(), "wheel loaded");
        Ok(())
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn phase(&self) -> WheelPhase {
        match self.state {
            WheelState::Idle => WheelPhase::Idle,
            WheelState::Spinning { .. } => WheelPhase::Spinning,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.phase() == WheelPhase::Spinning
    }

    /// Rotation as of the last [`tick`](Self::tick).
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn slices(&self) -> Vec<Slice> {
        let arc = slice_angle(self.venues.len());
        self.venues
            .iter()
            .enumerate()
            .map(|(index, venue)| Slice {
                index,
                start_angle: index as f64 * arc,
                end_angle: (index + 1) as f64 * arc,
                label: venue.display_name().to_string(),
                color: PALETTE[index % PALETTE.len()],
            })
            .collect()
    }

    /// Starts a spin. Asking again while one is running changes nothing.
    pub fn spin(&mut self, random: &mut dyn SpinRandom) -> Result<SpinOutcome, WheelError> {
        if self.venues.is_empty() {
            return Err(WheelError::NoVenues);
        }
        if self.is_spinning() {
            return Ok(SpinOutcome::AlreadySpinning);
        }

        let total = total_rotation(random.next_unit());
        self.state = WheelState::Spinning {
            started_at: self.clock.now(),
            total_rotation: total,
        };
        self.rotation = 0.0;
        info!(slices = self.venues.len(), total_rotation = total, "wheel spin started");
        Ok(SpinOutcome::Started {
            total_rotation: total,
        })
    }

    /// Samples the clock and advances the animation by one frame.
    pub fn tick(&mut self) -> WheelFrame {
        let WheelState::Spinning {
            started_at,
            total_rotation,
        } = self.state
        else {
            return WheelFrame {
                rotation: self.rotation,
                finished: None,
            };
        };

        let elapsed = self.clock.now().saturating_sub(started_at);
        self.rotation = rotation_at(total_rotation, elapsed, self.duration);
        if elapsed < self.duration {
            return WheelFrame {
                rotation: self.rotation,
                finished: None,
            };
        }

        self.state = WheelState::Idle;
        self.rotation = total_rotation;
        let index = winning_index(total_rotation, self.venues.len());
        let venue = self.venues[index].clone();
        info!(index, venue = %venue.id, "wheel stopped");

        WheelFrame {
            rotation: self.rotation,
            finished: Some(SpinResult {
                index,
                announcement: announce_winner(&venue),
                venue,
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/wheel_tests.rs"]
mod tests;
