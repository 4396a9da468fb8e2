//! Coin pool: continuous regeneration, capped, spent atomically.

use royale_core::config::EconomyConfig;
use royale_core::constants::COIN_EPSILON;

/// One side's coin balance. The amount is fractional internally and
/// always stays within `[0, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinPool {
    amount: f64,
    max: f64,
    regen_interval_secs: f64,
}

impl CoinPool {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            amount: config.starting_coins.clamp(0.0, config.max_coins),
            max: config.max_coins,
            regen_interval_secs: config.regen_interval_secs,
        }
    }

    /// Exact fractional balance.
    pub fn current(&self) -> f64 {
        self.amount
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whole coins available, tolerant of accumulated rounding.
    pub fn whole(&self) -> u32 {
        (self.amount + COIN_EPSILON).floor() as u32
    }

    /// Progress toward the next coin in `[0, 1)`; zero when full.
    pub fn regen_progress(&self) -> f64 {
        if self.amount + COIN_EPSILON >= self.max {
            return 0.0;
        }
        (self.amount - self.whole() as f64).max(0.0)
    }

    /// Accrue `dt / regen_interval` coins, up to the cap.
    pub fn regenerate(&mut self, dt: f64) {
        self.amount = (self.amount + dt / self.regen_interval_secs).min(self.max);
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.amount + COIN_EPSILON >= cost as f64
    }

    /// Spend `cost` coins if the balance covers it. Returns whether it did.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.amount = (self.amount - cost as f64).max(0.0);
        true
    }

    /// Empty the pool (used when a match is discarded).
    pub fn drain(&mut self) {
        self.amount = 0.0;
    }
}
