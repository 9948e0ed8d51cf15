//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Simulation control ---

/// Minimum speed multiplier accepted by SetSpeed.
pub const SPEED_MIN: f32 = 0.25;

/// Maximum speed multiplier accepted by SetSpeed.
pub const SPEED_MAX: f32 = 4.0;

// --- Combat ---

/// Distance at which a projectile is considered to have reached its
/// target (world units).
pub const PROJECTILE_HIT_RADIUS: f32 = 1.0;

/// Fire rate used when a tower spec carries a non-positive fire rate
/// (shots per second).
pub const FIRE_RATE_FALLBACK: f32 = 1.0;

// --- Economy ---

/// Fraction of the purchase cost refunded when a tower is sold.
pub const SELL_REFUND_FRACTION: f32 = 0.5;

// --- Progression ---

/// Skill points awarded for each completed wave.
pub const SKILL_POINTS_PER_WAVE: u32 = 1;

// --- Enemy behavior ---

/// Maximum path-progress regression applied to each enemy spawned by a
/// split-on-death, so children re-walk a short stretch instead of
/// stacking on the parent's exact spot.
pub const SPLIT_PROGRESS_OFFSET_MAX: f32 = 0.05;

// --- Visual markers ---

/// Lifetime of transient visual markers (ticks). Half a second.
pub const MARKER_LIFETIME_TICKS: u64 = 30;
