// --- File: config.rs ---
use crate::animal::Color;
use crate::constants::*;
use crate::error::SimulationError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub lifespan: u32,
    pub reproductive_age: u32,
    pub initial_population: usize,
    pub initial_color: Color,
    // Selection threshold is random_int(0, 180) * divider
    pub selection_aggression_divider: i64,
    // Soft ceiling: each animal dies if population >= random_int(limit / 1.5, limit)
    pub population_limit: u32,
    pub position_spread: f32,
    pub color_mutation_amount: f32,
    pub tick_delay: Duration,
    // When set, offspring join the collection as soon as they are born: they
    // count towards the overpopulation check of animals processed later in the
    // same tick and get their own first tick immediately.
    pub offspring_join_current_tick: bool,
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lifespan: LIFESPAN,
            reproductive_age: REPRODUCTIVE_AGE,
            initial_population: INITIAL_POPULATION_COUNT,
            initial_color: Color::new(INITIAL_HUE, INITIAL_SATURATION, INITIAL_LIGHTNESS),
            selection_aggression_divider: SELECTION_AGGRESSION_DIVIDER,
            population_limit: POPULATION_LIMIT,
            position_spread: POSITION_SPREAD,
            color_mutation_amount: COLOR_MUTATION_AMOUNT,
            tick_delay: Duration::from_millis(TIME_STEP_DELAY_MS),
            offspring_join_current_tick: false,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reads overrides from `CHROMALIFE_POPULATION` and `CHROMALIFE_SEED`.
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("CHROMALIFE_POPULATION") {
            match raw.trim().parse::<usize>() {
                Ok(count) => config.initial_population = count,
                Err(err) => log::warn!("Ignoring CHROMALIFE_POPULATION={raw:?}: {err}"),
            }
        }
        if let Ok(raw) = std::env::var("CHROMALIFE_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.rng_seed = Some(seed),
                Err(err) => log::warn!("Ignoring CHROMALIFE_SEED={raw:?}: {err}"),
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.lifespan == 0 {
            return Err(SimulationError::InvalidConfig("lifespan must be non-zero"));
        }
        if self.population_limit == 0 {
            return Err(SimulationError::InvalidConfig(
                "population_limit must be non-zero",
            ));
        }
        if self.selection_aggression_divider <= 0 {
            return Err(SimulationError::InvalidConfig(
                "selection_aggression_divider must be positive",
            ));
        }
        if !self.position_spread.is_finite() || self.position_spread < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "position_spread must be finite and non-negative",
            ));
        }
        if !self.color_mutation_amount.is_finite() || self.color_mutation_amount < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "color_mutation_amount must be finite and non-negative",
            ));
        }
        // Offspring hues are drawn from the integers in [h - mutation, h + mutation]
        let hue = self.initial_color.h() as f64;
        let mutation = self.color_mutation_amount as f64;
        if (hue - mutation).ceil() > (hue + mutation).floor() {
            return Err(SimulationError::InvalidConfig(
                "color_mutation_amount leaves no whole hue around initial_color",
            ));
        }
        if self.tick_delay.is_zero() {
            return Err(SimulationError::InvalidConfig("tick_delay must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lifespan, 10);
        assert_eq!(config.reproductive_age, 5);
        assert_eq!(config.tick_delay, Duration::from_millis(100));
        assert_eq!(config.initial_color.h(), 0.0);
    }

    #[test]
    fn rejects_bad_values() {
        let config = SimulationConfig {
            lifespan: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));

        let config = SimulationConfig {
            position_spread: f32::NAN,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            selection_aggression_divider: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_ranges_that_cannot_produce_offspring() {
        for (spread, mutation) in [(f32::INFINITY, 10.0), (5.0, f32::INFINITY), (f32::NEG_INFINITY, 10.0)] {
            let config = SimulationConfig {
                position_spread: spread,
                color_mutation_amount: mutation,
                ..SimulationConfig::default()
            };
            assert!(config.validate().is_err(), "spread {spread} mutation {mutation}");
        }

        let fractional_hue = SimulationConfig {
            initial_color: Color::new(10.5, 1.0, 0.5),
            color_mutation_amount: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            fractional_hue.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));

        // Half a degree either way reaches a whole hue again
        let reachable = SimulationConfig {
            color_mutation_amount: 0.5,
            ..fractional_hue.clone()
        };
        assert!(reachable.validate().is_ok());

        let whole_hue = SimulationConfig {
            initial_color: Color::new(10.0, 1.0, 0.5),
            color_mutation_amount: 0.0,
            position_spread: 0.0,
            ..SimulationConfig::default()
        };
        assert!(whole_hue.validate().is_ok());
    }
}
// --- End of File: config.rs ---
