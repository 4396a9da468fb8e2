//! Simulation constants and tuning parameters.

/// Largest sub-step the engine integrates in one go (seconds).
pub const MAX_STEP_SECS: f64 = 1.0 / 30.0;

/// Largest wall-clock frame delta the frame clock will report (seconds).
/// Anything longer (a backgrounded tab, a debugger stop) is clamped.
pub const MAX_FRAME_DELTA_SECS: f64 = 0.25;

/// Remaining time below which the match timer counts as expired.
pub const TIMER_EPSILON: f64 = 1e-6;

// --- Arena ---

/// Arena width (x axis).
pub const ARENA_WIDTH: f64 = 18.0;

/// Arena length from the player baseline (y = 0) to the enemy baseline.
pub const ARENA_HEIGHT: f64 = 32.0;

/// Depth of each side's deployment band measured from its own baseline.
pub const DEPLOY_ZONE_DEPTH: f64 = 14.0;

/// x coordinate of the centre lane, used as the fallback approach point.
pub const LANE_CENTER_X: f64 = ARENA_WIDTH / 2.0;

/// Left and right lane x coordinates (cosmetic; movement is not lane-bound).
pub const LANE_X: [f64; 3] = [3.5, LANE_CENTER_X, 14.5];

// --- Towers ---

/// King tower position relative to its own baseline: (x, depth).
pub const KING_TOWER_OFFSET: (f64, f64) = (LANE_CENTER_X, 2.5);

/// Princess tower positions relative to their own baseline.
pub const PRINCESS_TOWER_OFFSETS: [(f64, f64); 2] = [(3.5, 5.5), (14.5, 5.5)];

pub const KING_TOWER_HP: i32 = 2400;
pub const KING_TOWER_DAMAGE: i32 = 50;
pub const KING_TOWER_ATTACK_SPEED: f64 = 1.0;
pub const KING_TOWER_RANGE: f64 = 7.0;

pub const PRINCESS_TOWER_HP: i32 = 1400;
pub const PRINCESS_TOWER_DAMAGE: i32 = 50;
pub const PRINCESS_TOWER_ATTACK_SPEED: f64 = 1.25;
pub const PRINCESS_TOWER_RANGE: f64 = 7.5;

/// Aggregate tower health percentage for a side at match start.
pub const FULL_TOWER_HEALTH_PCT: f64 = 100.0;

// --- Economy ---

/// Coin cap.
pub const MAX_COINS: f64 = 10.0;

/// Coins each side starts with.
pub const STARTING_COINS: f64 = 5.0;

/// Seconds to regenerate one coin.
pub const COIN_REGEN_INTERVAL_SECS: f64 = 2.8;

/// Tolerance applied when reading whole coins from the fractional pool.
pub const COIN_EPSILON: f64 = 1e-9;

// --- Hand ---

/// Cards held in hand.
pub const DEFAULT_HAND_SIZE: usize = 4;

/// Delay between playing a card and its replacement arriving in hand.
pub const HAND_REFILL_DELAY_SECS: f64 = 1.0;

// --- Default unit stats for cards that omit them ---

pub const DEFAULT_UNIT_HP: i32 = 300;
pub const DEFAULT_UNIT_DAMAGE: i32 = 60;
pub const DEFAULT_UNIT_ATTACK_SPEED: f64 = 1.0;
pub const DEFAULT_UNIT_RANGE: f64 = 1.2;
pub const DEFAULT_UNIT_SPEED: f64 = 1.0;

// --- Match ---

/// Default match length (seconds).
pub const MATCH_DURATION_SECS: f64 = 180.0;

// --- Opponent AI ---

/// Seconds between opponent decision windows.
pub const AI_DECISION_INTERVAL_SECS: f64 = 1.0;

/// Chance the opponent acts in a decision window, per difficulty.
pub const AI_ACT_CHANCE_EASY: f64 = 0.30;
pub const AI_ACT_CHANCE_NORMAL: f64 = 0.50;
pub const AI_ACT_CHANCE_HARD: f64 = 0.70;
pub const AI_ACT_CHANCE_EXPERT: f64 = 0.85;
pub const AI_ACT_CHANCE_LEGENDARY: f64 = 0.95;
