use crate::collab::Haptics;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEAD_ZONE: f64 = 18.0;
pub const DEFAULT_HUB_RATIO: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn on_circle(center: Point, radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// The circular control: a ring of `radius` around `center`, with a centre
/// button occupying the inner `hub_ratio` of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    pub center: Point,
    pub radius: f64,
    pub hub_ratio: f64,
}

impl Wheel {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            hub_ratio: DEFAULT_HUB_RATIO,
        }
    }

    pub fn with_hub_ratio(mut self, hub_ratio: f64) -> Self {
        self.hub_ratio = hub_ratio;
        self
    }

    pub fn hub_radius(&self) -> f64 {
        self.radius * self.hub_ratio
    }

    pub fn in_hub(&self, pointer: Point) -> bool {
        self.center.distance_to(pointer) < self.hub_radius()
    }

    pub fn contains(&self, pointer: Point) -> bool {
        self.center.distance_to(pointer) <= self.radius
    }

    /// Angle of `pointer` around the centre in degrees, `[0, 360)`. Screen
    /// coordinates grow downward, so increasing angles run clockwise.
    pub fn angle_of(&self, pointer: Point) -> f64 {
        let (dx, dy) = (pointer.x - self.center.x, pointer.y - self.center.y);
        normalize_degrees(dy.atan2(dx).to_degrees())
    }
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if d >= 360.0 { 0.0 } else { d }
}

/// Shortest signed distance from `from` to `to`, in `(-180, 180]`.
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub angle: Option<f64>,
    pub rotation: Option<Rotation>,
}

/// Compares one pointer sample against the previous one of the same gesture.
///
/// Samples in the hub or outside the ring carry no angle.
/// Sub-threshold deltas are not accumulated: every sample becomes the next
/// baseline whether or not it produced a rotation.
pub fn track(pointer: Point, wheel: &Wheel, last_angle: Option<f64>, threshold: f64) -> TrackSample {
    if wheel.in_hub(pointer) || !wheel.contains(pointer) {
        return TrackSample {
            angle: None,
            rotation: None,
        };
    }

    let angle = wheel.angle_of(pointer);
    let rotation = last_angle.and_then(|last| {
        let delta = angle_delta(last, angle);
        if delta.abs() < threshold {
            None
        } else if delta > 0.0 {
            Some(Rotation::Clockwise)
        } else {
            Some(Rotation::CounterClockwise)
        }
    });

    TrackSample {
        angle: Some(angle),
        rotation,
    }
}

#[derive(Debug, Clone)]
pub struct AngleTracker {
    threshold: f64,
    last_angle: Option<f64>,
}

impl Default for AngleTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DEAD_ZONE)
    }
}

impl AngleTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.abs(),
            last_angle: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold.abs();
    }

    pub fn last_angle(&self) -> Option<f64> {
        self.last_angle
    }

    pub fn on_pointer_move(
        &mut self,
        pointer: Point,
        wheel: &Wheel,
        haptics: &dyn Haptics,
    ) -> Option<Rotation> {
        let sample = track(pointer, wheel, self.last_angle, self.threshold);
        self.last_angle = sample.angle;
        if sample.rotation.is_some() {
            haptics.pulse();
        }
        sample.rotation
    }

    pub fn on_pointer_leave(&mut self) {
        self.last_angle = None;
    }
}
