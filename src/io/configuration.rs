//! Algorithm constants and runtime configuration defaults

// Backtracking policy
/// Rollback budget is `width * height / ROLLBACK_BUDGET_DIVISOR`
pub const ROLLBACK_BUDGET_DIVISOR: usize = 4;
/// Consecutive failures after which the older snapshot is restored
pub const DEEP_ROLLBACK_THRESHOLD: usize = 5;

// Selection
/// Upper bound of the uniform tie-break added to domain sizes
pub const SELECTION_JITTER: f64 = 0.5;
/// Tie-break scale used with the weighted entropy heuristic
pub const ENTROPY_JITTER: f64 = 1e-3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default output width and height
pub const DEFAULT_OUTPUT_SIZE: usize = 50;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to animation filenames
pub const ANIMATION_SUFFIX: &str = "_animation";
/// Default number of steps between captured animation frames
pub const DEFAULT_FRAME_EVERY: usize = 10;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 40;
/// Multiplier applied to the delay of the final frame
pub const FINAL_FRAME_HOLD: u32 = 25;
