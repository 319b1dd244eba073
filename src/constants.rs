// --- File: constants.rs ---
// --- Global Simulation Constants ---
pub const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
pub const ANIMAL_RADIUS: f32 = 2.0;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

// --- Animal defaults ---
pub const LIFESPAN: u32 = 10;
pub const REPRODUCTIVE_AGE: u32 = 5;
pub const INITIAL_POPULATION_COUNT: usize = 9000;
// Initial color, pure red: hsl(0, 100%, 50%)
pub const INITIAL_HUE: f32 = 0.0;
pub const INITIAL_SATURATION: f32 = 1.0;
pub const INITIAL_LIGHTNESS: f32 = 0.5;

// --- Selection rules ---
// Higher value = less aggressive natural selection
pub const SELECTION_AGGRESSION_DIVIDER: i64 = 7;
pub const POPULATION_LIMIT: u32 = 30_000;
pub const POSITION_SPREAD: f32 = 5.0;
pub const COLOR_MUTATION_AMOUNT: f32 = 10.0;
pub const HUE_MAX: f32 = 360.0;
pub const HUE_CENTER: f32 = 180.0;

// --- Timing ---
pub const TIME_STEP_DELAY_MS: u64 = 100;
pub const MAX_TICKS_PER_FRAME: u32 = 5;
pub const INITIAL_SPEED_MULTIPLIER: f32 = 1.0;
pub const MIN_SPEED_MULTIPLIER: f32 = 0.25;
pub const MAX_SPEED_MULTIPLIER: f32 = 16.0;
pub const SPEED_ADJUST_FACTOR: f32 = 2.0;

// --- Reporting ---
pub const STATUS_LOG_INTERVAL: u64 = 50;
pub const POPULATION_HISTORY_LEN: usize = 1000;

// --- End of File: constants.rs ---
