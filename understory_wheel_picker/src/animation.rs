// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion curves used while the picker settles.
//!
//! - [`Spring`]: RK4-integrated spring, the default snap curve.
//! - [`Tween`]: fixed-duration eased interpolation, used for low-velocity
//!   approaches and as an alternative snap curve.
//! - [`ExponentialDecay`]: friction model used to project how far a fling
//!   would coast and to drive the high-velocity approach.
//!
//! All values are in scroll pixels and seconds.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Largest integration step; longer frames are subdivided.
const MAX_STEP: f64 = 1.0 / 120.0;

/// Configuration for a spring animation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Spring constant.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Simulated mass.
    pub mass: f64,
}

impl SpringConfig {
    /// Creates a spring configuration.
    #[must_use]
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring with damping expressed relative to critical damping.
    ///
    /// A ratio of `1.0` settles as fast as possible without overshoot.
    #[must_use]
    pub fn with_damping_ratio(stiffness: f64, damping_ratio: f64) -> Self {
        let mut config = Self::new(stiffness, 0.0, 1.0);
        config.damping = damping_ratio * config.critical_damping();
        config
    }

    /// Medium-low stiffness without overshoot; the default snap.
    #[must_use]
    pub fn medium_low() -> Self {
        Self::with_damping_ratio(400.0, 1.0)
    }

    /// A stiff, snappy spring.
    #[must_use]
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A wobbly spring with visible overshoot.
    #[must_use]
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Damping at which this spring stops overshooting.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Returns `true` if the spring overshoots its target before resting.
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::medium_low()
    }
}

/// A spring-based animator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Creates a spring at rest at `initial`.
    #[must_use]
    pub const fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is pulled towards.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Retargets the spring, keeping its current velocity.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Seeds the spring with an initial velocity.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Returns `true` once the spring is close enough to rest to snap onto its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        // Half a pixel off and under 5px/s is imperceptible.
        const EPSILON: f64 = 0.5;
        const VELOCITY_EPSILON: f64 = 5.0;

        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Once settled the spring lands exactly on its target.
    pub fn step(&mut self, dt: f64) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            if self.is_settled() {
                break;
            }
            let h = remaining.min(MAX_STEP);
            self.rk4(h);
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn rk4(&mut self, dt: f64) {
        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f64, v: f64) -> f64 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

/// Easing applied to tween progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start and end.
    Smoothstep,
    /// Fast start, slow end.
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

/// Duration and easing of a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TweenSpec {
    /// Duration in seconds.
    pub duration: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl TweenSpec {
    /// Creates a tween spec.
    #[must_use]
    pub const fn new(duration: f64, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(0.3, Easing::Linear)
    }
}

/// A running tween from one value to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    spec: TweenSpec,
    from: f64,
    to: f64,
    elapsed: f64,
}

impl Tween {
    /// Starts a tween from `from` to `to`.
    #[must_use]
    pub const fn new(spec: TweenSpec, from: f64, to: f64) -> Self {
        Self {
            spec,
            from,
            to,
            elapsed: 0.0,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }
        let t = self.elapsed / self.spec.duration;
        self.from + (self.to - self.from) * self.spec.easing.apply(t)
    }

    /// Average speed over the tween, in units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        if self.is_done() {
            0.0
        } else {
            (self.to - self.from) / self.spec.duration
        }
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.spec.duration <= 0.0 || self.elapsed >= self.spec.duration
    }

    /// Advances the tween by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        self.elapsed += dt.max(0.0);
    }
}

/// Friction-based deceleration: velocity decays as `v0 * e^(-friction * t)`.
///
/// The total coasting distance from velocity `v0` is `v0 / friction`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialDecay {
    /// Decay rate per second. Larger values stop sooner.
    pub friction: f64,
    /// Speed below which the motion counts as stopped, in units per second.
    pub rest_velocity: f64,
}

impl ExponentialDecay {
    /// Creates a decay model.
    #[must_use]
    pub const fn new(friction: f64, rest_velocity: f64) -> Self {
        Self {
            friction,
            rest_velocity,
        }
    }

    /// Signed distance a motion starting at `velocity` coasts before stopping.
    #[must_use]
    pub fn target_distance(&self, velocity: f64) -> f64 {
        if self.friction <= 0.0 || !velocity.is_finite() {
            return 0.0;
        }
        velocity / self.friction
    }

    /// Decays `velocity` over `dt` seconds and returns the distance covered.
    ///
    /// Uses an implicit step, so the summed distance over any frame pacing
    /// converges on [`Self::target_distance`].
    pub fn step(&self, velocity: &mut f64, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        *velocity /= 1.0 + self.friction.max(0.0) * dt;
        *velocity * dt
    }

    /// Returns `true` if `velocity` is slow enough to stop.
    #[must_use]
    pub fn is_at_rest(&self, velocity: f64) -> bool {
        velocity.abs() < self.rest_velocity
    }
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self::new(4.0, 1.0)
    }
}
