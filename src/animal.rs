// --- File: animal.rs ---
use crate::config::SimulationConfig;
use crate::constants::{HUE_CENTER, HUE_MAX};
use crate::error::SimulationError;
use crate::utils::{hsl_to_rgba, random_int};
use glam::{Vec2, Vec4};
use rand::Rng;
use std::fmt;
use winit::dpi::PhysicalSize;

/// Hue/saturation/lightness color. Hue is degrees in `[0, 360]`, saturation and
/// lightness are fractions in `[0, 1]`. All three are clamped on construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    h: f32,
    s: f32,
    l: f32,
}

fn clamp_or_zero(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

impl Color {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: clamp_or_zero(h, HUE_MAX),
            s: clamp_or_zero(s, 1.0),
            l: clamp_or_zero(l, 1.0),
        }
    }

    /// Same saturation and lightness, different hue.
    pub fn with_hue(&self, h: f32) -> Self {
        Self::new(h, self.s, self.l)
    }

    pub fn h(&self) -> f32 {
        self.h
    }
    pub fn s(&self) -> f32 {
        self.s
    }
    pub fn l(&self) -> f32 {
        self.l
    }

    /// `hsl(H, S%, L%)`, the form the status and debug output use.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// sRGB-encoded, alpha 1.
    pub fn to_rgba(&self) -> Vec4 {
        hsl_to_rgba(self.h, self.s, self.l)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s * 100.0, self.l * 100.0)
    }
}

/// A point inside the render surface. Clamped once, against the bounds given
/// at construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position(Vec2);

impl Position {
    pub fn new(x: f32, y: f32, bounds: PhysicalSize<u32>) -> Self {
        Self(Vec2::new(
            clamp_or_zero(x, bounds.width as f32),
            clamp_or_zero(y, bounds.height as f32),
        ))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }
    pub fn y(&self) -> f32 {
        self.0.y
    }
    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeathCause {
    Selection,
    OldAge,
    Overpopulation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Survived,
    Died(DeathCause),
    Reproduced([Animal; 2]),
    // advance_tick on an animal that was already dead
    AlreadyDead,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    position: Position,
    color: Color,
    lifespan: u32,
    reproductive_age: u32,
    age: u32,
    is_alive: bool,
}

impl Animal {
    pub fn new(position: Position, color: Color, lifespan: u32, reproductive_age: u32) -> Self {
        Self {
            position,
            color,
            lifespan,
            reproductive_age,
            age: 0,
            is_alive: true,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn color(&self) -> &Color {
        &self.color
    }
    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }
    pub fn reproductive_age(&self) -> u32 {
        self.reproductive_age
    }
    pub fn age(&self) -> u32 {
        self.age
    }
    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    /// Ages the animal by one tick and applies the mortality and reproduction
    /// rules.
    ///
    /// `population` is the live population the overpopulation check compares
    /// against. Offspring are returned, never inserted; the caller owns the
    /// collection.
    pub fn advance_tick<R: Rng + ?Sized>(
        &mut self,
        population: usize,
        config: &SimulationConfig,
        bounds: PhysicalSize<u32>,
        rng: &mut R,
    ) -> Result<TickOutcome, SimulationError> {
        if !self.is_alive {
            return Ok(TickOutcome::AlreadyDead);
        }
        self.age += 1;

        if let Some(cause) = self.death_cause(population, config, rng)? {
            self.is_alive = false;
            return Ok(TickOutcome::Died(cause));
        }

        if self.age == self.reproductive_age {
            let offspring = [
                self.spawn_offspring(config, bounds, rng)?,
                self.spawn_offspring(config, bounds, rng)?,
            ];
            return Ok(TickOutcome::Reproduced(offspring));
        }
        Ok(TickOutcome::Survived)
    }

    // Checks short-circuit in order, so later random draws are skipped once
    // a cause fires.
    fn death_cause<R: Rng + ?Sized>(
        &self,
        population: usize,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<Option<DeathCause>, SimulationError> {
        // Hues far below the center are selected against
        let threshold = random_int(rng, 0.0, HUE_CENTER as f64)?
            .saturating_mul(config.selection_aggression_divider);
        if (HUE_CENTER - self.color.h) as f64 >= threshold as f64 {
            return Ok(Some(DeathCause::Selection));
        }

        if self.age >= self.lifespan {
            return Ok(Some(DeathCause::OldAge));
        }

        let limit = config.population_limit as f64;
        let cap = random_int(rng, limit / 1.5, limit)?;
        if population as i64 >= cap {
            return Ok(Some(DeathCause::Overpopulation));
        }
        Ok(None)
    }

    fn spawn_offspring<R: Rng + ?Sized>(
        &self,
        config: &SimulationConfig,
        bounds: PhysicalSize<u32>,
        rng: &mut R,
    ) -> Result<Animal, SimulationError> {
        let spread = config.position_spread as f64;
        let (px, py) = (self.position.x() as f64, self.position.y() as f64);
        let x = random_int(rng, px - spread, px + spread)?;
        let y = random_int(rng, py - spread, py + spread)?;

        let mutation = config.color_mutation_amount as f64;
        let hue = self.color.h as f64;
        let new_hue = random_int(rng, hue - mutation, hue + mutation)?;

        Ok(Animal::new(
            Position::new(x as f32, y as f32, bounds),
            self.color.with_hue(new_hue as f32),
            self.lifespan,
            self.reproductive_age,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: PhysicalSize<u32> = PhysicalSize {
        width: 200,
        height: 100,
    };

    // Hue 360 sits 180 degrees past the center and is never selected against.
    fn hardy_color() -> Color {
        Color::new(360.0, 1.0, 0.5)
    }

    fn animal_at(x: f32, y: f32, color: Color, lifespan: u32, reproductive_age: u32) -> Animal {
        Animal::new(Position::new(x, y, BOUNDS), color, lifespan, reproductive_age)
    }

    #[test]
    fn color_clamps_every_channel() {
        let low = Color::new(-45.0, -0.5, -1.0);
        assert_eq!((low.h(), low.s(), low.l()), (0.0, 0.0, 0.0));
        let high = Color::new(725.0, 1.5, 3.0);
        assert_eq!((high.h(), high.s(), high.l()), (360.0, 1.0, 1.0));
        let nan = Color::new(f32::NAN, 0.3, 0.4);
        assert_eq!(nan.h(), 0.0);
        for h in [-1e9, -1.0, 0.0, 12.5, 359.9, 360.0, 361.0, 1e9] {
            let color = Color::new(h, 0.5, 0.5);
            assert!((0.0..=360.0).contains(&color.h()));
        }
    }

    #[test]
    fn color_display_string() {
        assert_eq!(Color::new(0.0, 1.0, 0.5).to_display_string(), "hsl(0, 100%, 50%)");
        assert_eq!(Color::new(210.0, 0.25, 0.75).to_string(), "hsl(210, 25%, 75%)");
    }

    #[test]
    fn position_clamps_to_bounds() {
        let p = Position::new(-5.0, 500.0, BOUNDS);
        assert_eq!((p.x(), p.y()), (0.0, 100.0));
        let p = Position::new(200.0, 0.0, BOUNDS);
        assert_eq!((p.x(), p.y()), (200.0, 0.0));
        let p = Position::new(17.5, 42.0, BOUNDS);
        assert_eq!((p.x(), p.y()), (17.5, 42.0));
    }

    #[test]
    fn old_animals_always_die() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for hue in [0.0, 90.0, 180.0, 360.0] {
            for _ in 0..200 {
                let mut animal = animal_at(10.0, 10.0, Color::new(hue, 1.0, 0.5), 1, 5);
                let outcome = animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap();
                assert!(matches!(outcome, TickOutcome::Died(_)));
                assert!(!animal.is_alive());
                assert_eq!(animal.age(), 1);
            }
        }
    }

    #[test]
    fn old_age_cause_when_selection_cannot_fire() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(12);
        let mut animal = animal_at(10.0, 10.0, hardy_color(), 3, 0);
        for _ in 0..2 {
            assert_eq!(
                animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
                TickOutcome::Survived
            );
        }
        assert_eq!(
            animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
            TickOutcome::Died(DeathCause::OldAge)
        );
    }

    #[test]
    fn strongest_selection_kills_red() {
        let config = SimulationConfig {
            selection_aggression_divider: 1,
            ..SimulationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..100 {
            let mut animal = animal_at(10.0, 10.0, Color::new(0.0, 1.0, 0.5), 10, 5);
            assert_eq!(
                animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
                TickOutcome::Died(DeathCause::Selection)
            );
        }
    }

    #[test]
    fn huge_divider_saturates_instead_of_overflowing() {
        let config = SimulationConfig {
            selection_aggression_divider: i64::MAX,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
        let mut rng = StdRng::seed_from_u64(19);
        let mut survivors = 0;
        for _ in 0..200 {
            let mut animal = animal_at(10.0, 10.0, Color::new(0.0, 1.0, 0.5), 10, 5);
            match animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap() {
                TickOutcome::Survived => survivors += 1,
                TickOutcome::Died(DeathCause::Selection) => {}
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        // Only a zero draw keeps the threshold low enough to select red
        assert!(survivors > 150);
    }

    #[test]
    fn population_at_limit_always_overpopulates() {
        let config = SimulationConfig::default();
        let limit = config.population_limit as usize;
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..100 {
            let mut animal = animal_at(10.0, 10.0, hardy_color(), 10, 5);
            assert_eq!(
                animal.advance_tick(limit, &config, BOUNDS, &mut rng).unwrap(),
                TickOutcome::Died(DeathCause::Overpopulation)
            );
        }
    }

    #[test]
    fn reproduces_exactly_once_with_two_offspring() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(15);
        let mut parent = animal_at(100.0, 50.0, hardy_color(), 10, 2);

        assert_eq!(
            parent.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
            TickOutcome::Survived
        );
        let offspring = match parent.advance_tick(1, &config, BOUNDS, &mut rng).unwrap() {
            TickOutcome::Reproduced(offspring) => offspring,
            other => panic!("expected reproduction, got {other:?}"),
        };
        assert!(parent.is_alive());
        for child in &offspring {
            assert_eq!(child.age(), 0);
            assert!(child.is_alive());
            assert_eq!(child.lifespan(), 10);
            assert_eq!(child.reproductive_age(), 2);
            assert!((95.0..=105.0).contains(&child.position().x()));
            assert!((45.0..=55.0).contains(&child.position().y()));
            assert!((350.0..=360.0).contains(&child.color().h()));
            assert_eq!(child.color().s(), 1.0);
            assert_eq!(child.color().l(), 0.5);
        }

        for _ in 3..10 {
            assert_eq!(
                parent.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
                TickOutcome::Survived
            );
        }
        assert_eq!(
            parent.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
            TickOutcome::Died(DeathCause::OldAge)
        );
    }

    #[test]
    fn offspring_are_clamped_at_the_corner() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(16);
        for _ in 0..50 {
            let mut parent = animal_at(0.0, 100.0, hardy_color(), 10, 1);
            if let TickOutcome::Reproduced(offspring) =
                parent.advance_tick(1, &config, BOUNDS, &mut rng).unwrap()
            {
                for child in &offspring {
                    assert!((0.0..=5.0).contains(&child.position().x()));
                    assert!((95.0..=100.0).contains(&child.position().y()));
                }
            } else {
                panic!("hardy parent should reproduce");
            }
        }
    }

    #[test]
    fn reproductive_age_zero_never_fires() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        let mut animal = animal_at(10.0, 10.0, hardy_color(), 4, 0);
        for _ in 0..3 {
            assert_eq!(
                animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
                TickOutcome::Survived
            );
        }
    }

    #[test]
    fn dead_animals_do_not_age() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(18);
        let mut animal = animal_at(10.0, 10.0, hardy_color(), 1, 5);
        animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap();
        assert_eq!(
            animal.advance_tick(1, &config, BOUNDS, &mut rng).unwrap(),
            TickOutcome::AlreadyDead
        );
        assert_eq!(animal.age(), 1);
    }

    #[test]
    fn fractional_parent_with_no_spread_is_an_invalid_range() {
        let config = SimulationConfig {
            position_spread: 0.0,
            ..SimulationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(19);
        let mut parent = animal_at(10.5, 10.0, hardy_color(), 10, 1);
        assert!(matches!(
            parent.advance_tick(1, &config, BOUNDS, &mut rng),
            Err(SimulationError::InvalidRange { .. })
        ));
    }
}
// --- End of File: animal.rs ---
