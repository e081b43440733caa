//! Reactive view model for the calculator.
//!
//! [`ViewModel`] owns the only two pieces of mutable state: the base price
//! and the selected year. Writing the price recomputes the projection and
//! re-targets every animated counter before the call returns; changing the
//! selection only re-reads the existing projection.

pub mod animation;
pub mod input;
pub mod panels;

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::project;
use crate::models::{BasePrice, FiscalYear, ProjectionSet, YearProjection};

pub use animation::{AnimatedNumber, AnimationState, DEFAULT_ANIMATION, DisplayCounters};
pub use input::{InputError, SliderConfig};
pub use panels::{
    BarChart, BreakdownKind, BreakdownRow, ChartBar, DetailPanel, IncreaseTier, PresetMark,
    SliderView, Summary, YearCard,
};

/// Start-up values for a [`ViewModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModelOptions {
    pub initial_price: Decimal,
    pub initial_year: FiscalYear,
    pub animation: Duration,
    pub slider: SliderConfig,
}

impl Default for ViewModelOptions {
    fn default() -> Self {
        Self {
            initial_price: Decimal::from(500_000),
            initial_year: FiscalYear::Y2026,
            animation: DEFAULT_ANIMATION,
            slider: SliderConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    base_price: BasePrice,
    selection: FiscalYear,
    projection: ProjectionSet,
    slider: SliderConfig,
    counters: DisplayCounters,
    revision: u64,
}

impl ViewModel {
    /// Builds the view model with its first projection already computed.
    ///
    /// The initial price goes through the same input boundary as later
    /// writes.
    pub fn new(options: ViewModelOptions) -> Result<Self, InputError> {
        options.slider.validate()?;

        let base_price = BasePrice::new(options.slider.constrain(options.initial_price)?)?;
        let projection = project(base_price);
        let counters = DisplayCounters::settled(&projection, options.initial_year, options.animation);

        Ok(Self {
            base_price,
            selection: options.initial_year,
            projection,
            slider: options.slider,
            counters,
            revision: 0,
        })
    }

    // --- writes -------------------------------------------------------------

    /// Writes a new base price and recomputes the projection.
    ///
    /// Returns the price actually stored, after clamping and snapping.
    pub fn set_base_price(
        &mut self,
        raw: Decimal,
    ) -> Result<BasePrice, InputError> {
        let constrained = self.slider.constrain(raw)?;
        if constrained != raw {
            warn!(%raw, stored = %constrained, "price adjusted to slider range");
        }

        self.base_price = BasePrice::new(constrained)?;
        self.recompute();

        Ok(self.base_price)
    }

    /// Sets the base price to one of the preset marks.
    pub fn apply_preset(
        &mut self,
        value: Decimal,
    ) -> Result<BasePrice, InputError> {
        if !self.slider.is_mark(value) {
            return Err(InputError::UnknownPreset(value));
        }
        self.set_base_price(value)
    }

    /// Moves the price by `steps` slider steps (negative moves down).
    pub fn nudge(
        &mut self,
        steps: i64,
    ) -> Result<BasePrice, InputError> {
        let target = self.base_price.value() + self.slider.step * Decimal::from(steps);
        self.set_base_price(target.max(Decimal::ZERO))
    }

    /// Selects the year shown in the detail panel. Does not recompute.
    pub fn select_year(
        &mut self,
        year: FiscalYear,
    ) {
        self.selection = year;
        self.counters
            .selected_price
            .retarget(self.projection.price(year));
        debug!(%year, "selected year");
    }

    /// Advances every animated counter by one frame.
    pub fn tick(
        &mut self,
        dt: Duration,
    ) {
        self.counters.tick(dt);
    }

    fn recompute(&mut self) {
        self.projection = project(self.base_price);
        self.revision += 1;
        self.counters.publish(&self.projection, self.selection);

        debug!(
            base_price = %self.base_price,
            total_increase = %self.projection.total_increase,
            revision = self.revision,
            "recomputed projection"
        );
    }

    // --- reads --------------------------------------------------------------

    pub fn base_price(&self) -> BasePrice {
        self.base_price
    }

    pub fn selection(&self) -> FiscalYear {
        self.selection
    }

    pub fn projection(&self) -> &ProjectionSet {
        &self.projection
    }

    pub fn selected(&self) -> &YearProjection {
        self.projection.year(self.selection)
    }

    /// Number of recomputations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn counters(&self) -> &DisplayCounters {
        &self.counters
    }

    pub fn is_settled(&self) -> bool {
        self.counters.is_settled()
    }

    pub fn slider_config(&self) -> &SliderConfig {
        &self.slider
    }

    pub fn year_cards(&self) -> [YearCard; 4] {
        panels::year_cards(&self.projection, self.selection)
    }

    pub fn detail(&self) -> DetailPanel {
        panels::detail(&self.projection, self.selection)
    }

    pub fn chart(&self) -> BarChart {
        panels::chart(&self.projection)
    }

    pub fn summary(&self) -> Summary {
        panels::summary(&self.projection)
    }

    pub fn slider(&self) -> SliderView {
        panels::slider(&self.slider, self.base_price.value())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn view_model() -> ViewModel {
        ViewModel::new(ViewModelOptions::default()).unwrap()
    }

    fn settle(vm: &mut ViewModel) {
        for _ in 0..64 {
            vm.tick(Duration::from_millis(16));
        }
    }

    // =========================================================================
    // construction
    // =========================================================================

    #[test]
    fn new_uses_defaults() {
        let vm = view_model();

        assert_eq!(vm.base_price().value(), dec!(500000));
        assert_eq!(vm.selection(), FiscalYear::Y2026);
        assert_eq!(vm.revision(), 0);
        assert!(vm.is_settled());
        assert_eq!(vm.selected().price, dec!(550000));
    }

    #[test]
    fn new_constrains_initial_price() {
        let vm = ViewModel::new(ViewModelOptions {
            initial_price: dec!(10),
            ..ViewModelOptions::default()
        })
        .unwrap();

        assert_eq!(vm.base_price().value(), dec!(200000));
    }

    #[test]
    fn new_rejects_invalid_slider() {
        let result = ViewModel::new(ViewModelOptions {
            slider: SliderConfig {
                step: dec!(0),
                ..SliderConfig::default()
            },
            ..ViewModelOptions::default()
        });

        assert!(matches!(result, Err(InputError::InvalidSlider(_))));
    }

    // =========================================================================
    // price writes
    // =========================================================================

    #[test]
    fn set_base_price_recomputes_projection() {
        let mut vm = view_model();

        vm.set_base_price(dec!(300000)).unwrap();

        assert_eq!(vm.revision(), 1);
        assert_eq!(vm.projection().total_increase, dec!(75000));
        assert_eq!(vm.projection().price(FiscalYear::Y2028), dec!(375000));
    }

    #[test]
    fn set_base_price_returns_stored_value() {
        let mut vm = view_model();

        let stored = vm.set_base_price(dec!(2500000)).unwrap();

        assert_eq!(stored.value(), dec!(2000000));
        assert_eq!(vm.base_price(), stored);
    }

    #[test]
    fn set_base_price_rejects_negative_without_side_effects() {
        let mut vm = view_model();

        let result = vm.set_base_price(dec!(-1));

        assert_eq!(result, Err(InputError::Negative(dec!(-1))));
        assert_eq!(vm.revision(), 0);
        assert_eq!(vm.base_price().value(), dec!(500000));
    }

    #[test]
    fn set_base_price_starts_counter_animations() {
        let mut vm = view_model();

        vm.set_base_price(dec!(1000000)).unwrap();

        assert!(!vm.is_settled());
        assert_eq!(vm.counters().base_price.displayed(), dec!(500000));
        assert_eq!(vm.counters().base_price.target(), dec!(1000000));
    }

    #[test]
    fn counters_settle_on_true_values() {
        let mut vm = view_model();
        vm.set_base_price(dec!(300000)).unwrap();

        settle(&mut vm);

        let counters = vm.counters();
        assert!(vm.is_settled());
        assert_eq!(counters.base_price.displayed(), dec!(300000));
        assert_eq!(counters.selected_price.displayed(), dec!(300000));
        assert_eq!(counters.increment_2026.displayed(), dec!(0));
        assert_eq!(counters.increment_2027.displayed(), dec!(37500));
        assert_eq!(counters.total_increase.displayed(), dec!(75000));
    }

    #[test]
    fn rapid_writes_restart_from_displayed_value() {
        let mut vm = view_model();
        vm.set_base_price(dec!(2000000)).unwrap();
        vm.tick(Duration::from_millis(100));
        let shown = vm.counters().base_price.displayed();

        vm.set_base_price(dec!(1000000)).unwrap();

        assert_eq!(
            vm.counters().base_price.state(),
            AnimationState::Animating {
                from: shown,
                to: dec!(1000000),
                elapsed: Duration::ZERO,
            }
        );
    }

    #[test]
    fn apply_preset_accepts_marks_only() {
        let mut vm = view_model();

        assert_eq!(vm.apply_preset(dec!(1500000)).unwrap().value(), dec!(1500000));
        assert_eq!(
            vm.apply_preset(dec!(1234567)),
            Err(InputError::UnknownPreset(dec!(1234567)))
        );
        assert_eq!(vm.revision(), 1);
    }

    #[test]
    fn nudge_moves_by_slider_steps() {
        let mut vm = view_model();

        vm.nudge(2).unwrap();
        assert_eq!(vm.base_price().value(), dec!(510000));

        vm.nudge(-3).unwrap();
        assert_eq!(vm.base_price().value(), dec!(495000));
    }

    #[test]
    fn nudge_stops_at_bounds() {
        let mut vm = view_model();
        vm.apply_preset(dec!(200000)).unwrap();

        vm.nudge(-1000).unwrap();

        assert_eq!(vm.base_price().value(), dec!(200000));
    }

    // =========================================================================
    // selection
    // =========================================================================

    #[test]
    fn select_year_does_not_recompute() {
        let mut vm = view_model();
        let before = vm.projection().clone();

        vm.select_year(FiscalYear::Y2028);

        assert_eq!(vm.revision(), 0);
        assert_eq!(vm.projection(), &before);
        assert_eq!(vm.selected().year, FiscalYear::Y2028);
    }

    #[test]
    fn select_year_animates_only_selected_price() {
        let mut vm = view_model();

        vm.select_year(FiscalYear::Y2028);

        let counters = vm.counters();
        assert!(counters.selected_price.is_animating());
        assert_eq!(counters.selected_price.target(), dec!(625000));
        assert!(!counters.base_price.is_animating());
        assert!(!counters.total_increase.is_animating());
    }

    #[test]
    fn selection_survives_price_changes() {
        let mut vm = view_model();
        vm.select_year(FiscalYear::Y2027);

        vm.set_base_price(dec!(300000)).unwrap();
        settle(&mut vm);

        assert_eq!(vm.detail().year, FiscalYear::Y2027);
        assert_eq!(vm.counters().selected_price.displayed(), dec!(337500));
    }

    // =========================================================================
    // derived views
    // =========================================================================

    #[test]
    fn derived_views_follow_current_state() {
        let mut vm = view_model();
        vm.set_base_price(dec!(1000000)).unwrap();
        vm.select_year(FiscalYear::Y2027);

        assert!(vm.year_cards()[2].active);
        assert_eq!(vm.detail().total_from_base, Some(dec!(87500)));
        assert_eq!(vm.chart().scale, dec!(1181250));
        assert_eq!(vm.summary().total, dec!(125000));
        assert!(vm.slider().marks.iter().any(|m| m.active && m.value == dec!(1000000)));
    }
}
