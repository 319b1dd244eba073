// --- File: simulation.rs ---
use crate::animal::{Animal, Color, DeathCause, Position, TickOutcome};
use crate::config::SimulationConfig;
use crate::constants::*;
use crate::error::SimulationError;
use crate::utils::random_int;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::Duration;
use winit::dpi::PhysicalSize;

// --- GPU Data Structure ---
// This struct MUST match the layout of `InstanceInput` in shader.wgsl
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AnimalGpuData {
    pub world_position: [f32; 2],
    pub radius: f32,
    pub _padding1: f32,
    pub color: [f32; 4],
}

impl AnimalGpuData {
    pub fn new(position: &Position, color: &Color) -> Self {
        Self {
            world_position: position.as_vec2().to_array(),
            radius: ANIMAL_RADIUS,
            _padding1: 0.0,
            color: color.to_rgba().to_array(),
        }
    }
}

/// Receives one frame of draw calls per tick.
pub trait RenderSink {
    fn clear(&mut self);
    fn draw(&mut self, position: &Position, color: &Color);
}

pub type SimRng = StdRng;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, `start` not called yet.
    Idle,
    Running,
    /// The population reached zero. Only `start` or `restart` leave this state.
    Extinct,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub time: u64,
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickStatus {
    Advanced(TickReport),
    Paused,
    Idle,
    Extinct,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    pub total_births: usize,
    pub deaths_by_selection: usize,
    pub deaths_by_old_age: usize,
    pub deaths_by_overpopulation: usize,
    pub peak_population: usize,
    pub population_history: VecDeque<usize>,
}

impl SimulationStats {
    fn record_death(&mut self, cause: DeathCause) {
        match cause {
            DeathCause::Selection => self.deaths_by_selection += 1,
            DeathCause::OldAge => self.deaths_by_old_age += 1,
            DeathCause::Overpopulation => self.deaths_by_overpopulation += 1,
        }
    }

    fn record_population(&mut self, population: usize) {
        self.peak_population = self.peak_population.max(population);
        self.population_history.push_back(population);
        // Keep history buffer manageable
        while self.population_history.len() > POPULATION_HISTORY_LEN {
            self.population_history.pop_front();
        }
    }

    pub fn total_deaths(&self) -> usize {
        self.deaths_by_selection + self.deaths_by_old_age + self.deaths_by_overpopulation
    }
}

pub struct SimulationState {
    animals: Vec<Animal>,
    time: u64,
    rng: SimRng,
    bounds: PhysicalSize<u32>,
    phase: Phase,
    is_paused: bool,
    config: SimulationConfig,
    stats: SimulationStats,
    // Reused between ticks
    staging: Vec<Animal>,
    offspring_buffer: Vec<Animal>,
}

impl SimulationState {
    /// `bounds` is the render surface size, read once. Positions are clamped
    /// against it for the lifetime of this simulation.
    pub fn new(bounds: PhysicalSize<u32>, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            animals: Vec::new(),
            time: 0,
            rng: Self::seeded_rng(&config),
            bounds,
            phase: Phase::Idle,
            is_paused: false,
            config,
            stats: SimulationStats::default(),
            staging: Vec::new(),
            offspring_buffer: Vec::new(),
        })
    }

    fn seeded_rng(config: &SimulationConfig) -> SimRng {
        match config.rng_seed {
            Some(seed) => SimRng::seed_from_u64(seed),
            None => SimRng::from_entropy(),
        }
    }

    /// Replaces the population with `initial_count` animals at uniformly random
    /// positions and starts ticking. Fails without touching any state when
    /// `initial_count` is zero.
    pub fn start(&mut self, initial_count: usize) -> Result<(), SimulationError> {
        if initial_count == 0 {
            return Err(SimulationError::InvalidPopulation(initial_count));
        }
        let width = self.bounds.width as f64;
        let height = self.bounds.height as f64;
        let mut animals = Vec::with_capacity(initial_count);
        for _ in 0..initial_count {
            let x = random_int(&mut self.rng, 0.0, width)?;
            let y = random_int(&mut self.rng, 0.0, height)?;
            animals.push(Animal::new(
                Position::new(x as f32, y as f32, self.bounds),
                self.config.initial_color,
                self.config.lifespan,
                self.config.reproductive_age,
            ));
        }

        self.animals = animals;
        self.offspring_buffer.clear();
        self.time = 0;
        self.stats = SimulationStats::default();
        self.stats.record_population(initial_count);
        self.phase = Phase::Running;
        self.is_paused = false;
        log::info!(
            "Started simulation with {} animals on a {}x{} surface",
            initial_count,
            self.bounds.width,
            self.bounds.height
        );
        Ok(())
    }

    /// Reseeds (from `rng_seed` when configured) and starts over with the
    /// configured initial population.
    pub fn restart(&mut self) -> Result<(), SimulationError> {
        log::info!("Restarting simulation...");
        self.rng = Self::seeded_rng(&self.config);
        self.start(self.config.initial_population)
    }

    /// Advances every animal by one tick, draws the survivors into `sink` and
    /// drops the dead.
    ///
    /// A tick on an idle, paused or extinct simulation does nothing. The first
    /// tick that finds the population empty moves the simulation to
    /// [`Phase::Extinct`] and leaves `time` unchanged.
    ///
    /// The pass runs on a staged copy of the population and RNG. An animal
    /// whose coordinates or hue make an empty random range fails the whole
    /// tick: the error is returned and neither the population, the RNG, the
    /// statistics, `time` nor `sink` are touched.
    pub fn tick<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<TickStatus, SimulationError> {
        match self.phase {
            Phase::Idle => return Ok(TickStatus::Idle),
            Phase::Extinct => return Ok(TickStatus::Extinct),
            Phase::Running => {}
        }
        if self.is_paused {
            return Ok(TickStatus::Paused);
        }

        if self.animals.is_empty() {
            sink.clear();
            self.phase = Phase::Extinct;
            log::info!(
                "Population extinct at time {} (peak {})",
                self.time,
                self.stats.peak_population
            );
            return Ok(TickStatus::Extinct);
        }

        self.staging.clear();
        self.staging.extend_from_slice(&self.animals);
        let mut rng = self.rng.clone();
        let tally = advance_population(
            &mut self.staging,
            &mut self.offspring_buffer,
            &self.config,
            self.bounds,
            &mut rng,
        )?;

        // Commit
        std::mem::swap(&mut self.animals, &mut self.staging);
        self.rng = rng;
        self.time += 1;
        self.stats.total_births += tally.births;
        for cause in &tally.deaths {
            self.stats.record_death(*cause);
        }
        self.stats.record_population(self.animals.len());

        // Survivors keep their order and newborns follow, so this is also
        // the order the pass met them in.
        sink.clear();
        for animal in &self.animals {
            sink.draw(animal.position(), animal.color());
        }

        let report = TickReport {
            time: self.time,
            population: self.animals.len(),
            births: tally.births,
            deaths: tally.deaths.len(),
        };
        log::debug!(
            "tick {}: population {} (+{} / -{})",
            report.time,
            report.population,
            report.births,
            report.deaths
        );
        if self.time % STATUS_LOG_INTERVAL == 0 {
            log::info!(
                "Time: {} Animals: {} (peak {}, births {}, deaths {})",
                self.time,
                self.animals.len(),
                self.stats.peak_population,
                self.stats.total_births,
                self.stats.total_deaths()
            );
        }
        Ok(TickStatus::Advanced(report))
    }

    /// Counts animals within `radius` of `(x, y)` on either axis. This is an
    /// axis-wise OR, not a euclidean distance: an animal in the same column or
    /// the same row band counts. The boundary is inclusive.
    pub fn count_near(&self, x: f32, y: f32, radius: f32) -> usize {
        self.animals
            .iter()
            .filter(|animal| {
                let position = animal.position();
                (position.x() - x).abs() <= radius || (position.y() - y).abs() <= radius
            })
            .count()
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        log::info!(
            "Simulation {}",
            if self.is_paused { "Paused" } else { "Resumed" }
        );
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn time(&self) -> u64 {
        self.time
    }
    pub fn population(&self) -> usize {
        self.animals.len()
    }
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }
    pub fn bounds(&self) -> PhysicalSize<u32> {
        self.bounds
    }

    #[cfg(test)]
    pub(crate) fn insert_animal(&mut self, animal: Animal) {
        self.animals.push(animal);
    }
}

#[derive(Debug, Default)]
struct PassTally {
    births: usize,
    deaths: Vec<DeathCause>,
}

/// One tick over `animals`, leaving only the living with newborns appended.
///
/// Each animal sees the population as it was when the pass began, unless
/// `offspring_join_current_tick` is set: then newborns are pushed straight
/// onto `animals`, count towards later overpopulation checks and are ticked
/// in this same pass.
fn advance_population(
    animals: &mut Vec<Animal>,
    offspring: &mut Vec<Animal>,
    config: &SimulationConfig,
    bounds: PhysicalSize<u32>,
    rng: &mut SimRng,
) -> Result<PassTally, SimulationError> {
    let start_population = animals.len();
    let join_current_tick = config.offspring_join_current_tick;
    offspring.clear();
    let mut tally = PassTally::default();

    // Index loop: in join_current_tick mode the collection grows while walked
    let mut i = 0;
    while i < animals.len() {
        let population = if join_current_tick {
            animals.len()
        } else {
            start_population
        };
        match animals[i].advance_tick(population, config, bounds, rng)? {
            TickOutcome::Died(cause) => tally.deaths.push(cause),
            TickOutcome::Reproduced(children) => {
                tally.births += children.len();
                if join_current_tick {
                    animals.extend(children);
                } else {
                    offspring.extend(children);
                }
            }
            TickOutcome::Survived | TickOutcome::AlreadyDead => {}
        }
        i += 1;
    }

    animals.retain(Animal::is_alive);
    animals.append(offspring);
    Ok(tally)
}

/// Fixed-delay clock. Converts elapsed wall time into a whole number of due
/// ticks, carrying the remainder over to the next frame.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tick_delay: Duration,
    accumulator: Duration,
    speed_multiplier: f32,
}

impl TickScheduler {
    pub fn new(tick_delay: Duration) -> Self {
        Self {
            tick_delay,
            accumulator: Duration::ZERO,
            speed_multiplier: INITIAL_SPEED_MULTIPLIER,
        }
    }

    /// At most `MAX_TICKS_PER_FRAME` ticks are returned; any larger backlog is
    /// dropped so a stalled frame does not trigger a burst of catch-up ticks.
    pub fn due_ticks(&mut self, elapsed: Duration) -> u32 {
        let scaled_nanos = (elapsed.as_nanos() as f64 * self.speed_multiplier as f64).round();
        self.accumulator += Duration::from_nanos(scaled_nanos as u64);
        let mut ticks = 0;
        while self.accumulator >= self.tick_delay && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_delay;
            ticks += 1;
        }
        if self.accumulator >= self.tick_delay {
            log::debug!("Dropping {:?} of tick backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    pub fn adjust_speed(&mut self, increase: bool) {
        self.speed_multiplier = if increase {
            (self.speed_multiplier * SPEED_ADJUST_FACTOR).min(MAX_SPEED_MULTIPLIER)
        } else {
            (self.speed_multiplier / SPEED_ADJUST_FACTOR).max(MIN_SPEED_MULTIPLIER)
        };
        log::info!("Speed Multiplier: {:.2}", self.speed_multiplier);
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }
}

// --- End of File: simulation.rs ---
