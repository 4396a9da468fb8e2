//! Per-side match state: coins, hand, and tower losses.

use royale_core::config::MatchConfig;
use royale_core::constants::FULL_TOWER_HEALTH_PCT;
use royale_core::enums::{Team, TowerKind};

use crate::deck::Hand;
use crate::economy::CoinPool;
use crate::world_setup::tower_count;

#[derive(Debug, Clone)]
pub struct SideState {
    pub team: Team,
    pub coins: CoinPool,
    pub hand: Hand,
    pub towers_total: u32,
    pub towers_lost: u32,
    pub king_lost: bool,
}

impl SideState {
    pub fn new(team: Team, config: &MatchConfig) -> Self {
        let deck = match team {
            Team::Player => &config.player_deck,
            Team::Enemy => &config.enemy_deck,
        };
        Self {
            team,
            coins: CoinPool::new(&config.economy),
            hand: Hand::new(deck, config.initial_hand_size, config.hand_refill_delay_secs),
            towers_total: tower_count(config.tower_layout),
            towers_lost: 0,
            king_lost: false,
        }
    }

    /// Aggregate tower health. Each lost tower removes `100 / towers_total`.
    pub fn health_pct(&self) -> f64 {
        if self.towers_total == 0 {
            return 0.0;
        }
        let share = FULL_TOWER_HEALTH_PCT / self.towers_total as f64;
        let remaining = self.towers_total.saturating_sub(self.towers_lost);
        if remaining == 0 {
            0.0
        } else {
            FULL_TOWER_HEALTH_PCT - share * self.towers_lost as f64
        }
    }

    pub fn record_tower_loss(&mut self, kind: TowerKind) {
        self.towers_lost = (self.towers_lost + 1).min(self.towers_total);
        if kind == TowerKind::King {
            self.king_lost = true;
        }
    }

    /// A side is beaten once its king falls or its aggregate health hits zero.
    pub fn is_defeated(&self) -> bool {
        self.king_lost || self.towers_lost >= self.towers_total
    }

    /// Advance coin regeneration and scheduled hand draws.
    pub fn regenerate(&mut self, dt: f64) {
        self.coins.regenerate(dt);
        self.hand.tick(dt);
    }

    /// Drop all resources (used when a match is discarded).
    pub fn discard(&mut self) {
        self.coins.drain();
        self.hand.clear();
    }
}

/// Both sides of the match.
#[derive(Debug, Clone)]
pub struct Sides {
    pub player: SideState,
    pub enemy: SideState,
}

impl Sides {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            player: SideState::new(Team::Player, config),
            enemy: SideState::new(Team::Enemy, config),
        }
    }

    pub fn get(&self, team: Team) -> &SideState {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut SideState {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
        }
    }
}
