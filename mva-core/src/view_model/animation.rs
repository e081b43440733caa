//! Animated numeric counters.
//!
//! Every number the dashboard shows glides from its previous value to a new
//! target with a cubic ease-out. Each counter is its own small state machine:
//!
//! * `Idle`: the displayed value equals the target.
//! * `Animating { from, to, elapsed }`: interpolating towards `to`.
//!
//! A new target always re-enters `Animating` from the value *currently
//! displayed*, so an interrupted animation continues smoothly instead of
//! jumping back to where it started.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::calculations::common::round_whole;
use crate::models::{FiscalYear, ProjectionSet};

/// Length of one counter animation.
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(500);

/// Cubic ease-out: fast start, gentle landing. `t` is clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Animating {
        from: Decimal,
        to: Decimal,
        elapsed: Duration,
    },
}

/// One displayed number and its in-flight animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedNumber {
    displayed: Decimal,
    target: Decimal,
    duration: Duration,
    state: AnimationState,
}

impl AnimatedNumber {
    /// Starts idle, already showing `value`.
    pub fn new(
        value: Decimal,
        duration: Duration,
    ) -> Self {
        Self {
            displayed: value,
            target: value,
            duration,
            state: AnimationState::Idle,
        }
    }

    pub fn displayed(&self) -> Decimal {
        self.displayed
    }

    pub fn target(&self) -> Decimal {
        self.target
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// Points the counter at a new value.
    ///
    /// Re-targeting to the current target is a no-op. Otherwise any running
    /// animation is dropped and a new one starts from the displayed value.
    pub fn retarget(
        &mut self,
        to: Decimal,
    ) {
        if to == self.target {
            return;
        }
        self.target = to;

        if self.duration.is_zero() {
            self.displayed = to;
            self.state = AnimationState::Idle;
            return;
        }

        self.state = AnimationState::Animating {
            from: self.displayed,
            to,
            elapsed: Duration::ZERO,
        };
    }

    /// Advances the animation by one frame of length `dt`.
    pub fn tick(
        &mut self,
        dt: Duration,
    ) {
        let AnimationState::Animating { from, to, elapsed } = self.state else {
            return;
        };

        let elapsed = elapsed.saturating_add(dt);
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();

        if progress >= 1.0 {
            self.displayed = to;
            self.state = AnimationState::Idle;
            return;
        }

        let eased = Decimal::from_f64(ease_out_cubic(progress))
            .map(|e| e.round_dp(6))
            .unwrap_or(Decimal::ONE);
        self.displayed = round_whole(from + (to - from) * eased);
        self.state = AnimationState::Animating { from, to, elapsed };
    }
}

/// The animated fields of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCounters {
    pub base_price: AnimatedNumber,
    pub selected_price: AnimatedNumber,
    pub increment_2026: AnimatedNumber,
    pub increment_2027: AnimatedNumber,
    pub increment_2028: AnimatedNumber,
    pub total_increase: AnimatedNumber,
}

impl DisplayCounters {
    /// Counters that start idle at the values of `projection`.
    pub fn settled(
        projection: &ProjectionSet,
        selection: FiscalYear,
        duration: Duration,
    ) -> Self {
        let counter = |value| AnimatedNumber::new(value, duration);

        Self {
            base_price: counter(projection.base_price.value()),
            selected_price: counter(projection.price(selection)),
            increment_2026: counter(projection.increment(FiscalYear::Y2026)),
            increment_2027: counter(projection.increment(FiscalYear::Y2027)),
            increment_2028: counter(projection.increment(FiscalYear::Y2028)),
            total_increase: counter(projection.total_increase),
        }
    }

    /// Re-targets every counter at a freshly computed projection.
    pub fn publish(
        &mut self,
        projection: &ProjectionSet,
        selection: FiscalYear,
    ) {
        self.base_price.retarget(projection.base_price.value());
        self.selected_price.retarget(projection.price(selection));
        self.increment_2026
            .retarget(projection.increment(FiscalYear::Y2026));
        self.increment_2027
            .retarget(projection.increment(FiscalYear::Y2027));
        self.increment_2028
            .retarget(projection.increment(FiscalYear::Y2028));
        self.total_increase.retarget(projection.total_increase);
    }

    pub fn tick(
        &mut self,
        dt: Duration,
    ) {
        for counter in self.iter_mut() {
            counter.tick(dt);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.iter().all(|c| !c.is_animating())
    }

    fn iter(&self) -> impl Iterator<Item = &AnimatedNumber> {
        [
            &self.base_price,
            &self.selected_price,
            &self.increment_2026,
            &self.increment_2027,
            &self.increment_2028,
            &self.total_increase,
        ]
        .into_iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut AnimatedNumber> {
        [
            &mut self.base_price,
            &mut self.selected_price,
            &mut self.increment_2026,
            &mut self.increment_2027,
            &mut self.increment_2028,
            &mut self.total_increase,
        ]
        .into_iter()
    }
}
