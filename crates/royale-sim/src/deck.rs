//! Hand and draw cycle.
//!
//! The hand holds at most `capacity` cards. Playing a card sends it to the
//! back of the draw queue and schedules a replacement draw after the refill
//! delay, so the hand never grows past its capacity.

use std::collections::VecDeque;

use royale_core::cards::{Card, CardId};

#[derive(Debug, Clone)]
pub struct Hand {
    capacity: usize,
    cards: Vec<Card>,
    queue: VecDeque<Card>,
    /// Remaining seconds for each scheduled draw, oldest first.
    pending_draws: VecDeque<f64>,
    refill_delay_secs: f64,
}

impl Hand {
    /// Deal the first `capacity` cards of `deck` into the hand; the rest wait in the queue.
    pub fn new(deck: &[Card], capacity: usize, refill_delay_secs: f64) -> Self {
        let split = capacity.min(deck.len());
        Self {
            capacity,
            cards: deck[..split].to_vec(),
            queue: deck[split..].iter().cloned().collect(),
            pending_draws: VecDeque::new(),
            refill_delay_secs,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The card that the next draw will bring into the hand.
    pub fn next_card(&self) -> Option<&Card> {
        self.queue.front()
    }

    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Number of draws waiting for their delay to elapse.
    pub fn pending_draws(&self) -> usize {
        self.pending_draws.len()
    }

    /// Remove a card from the hand, cycle it to the back of the queue and
    /// schedule its replacement.
    pub fn play(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        let card = self.cards.remove(index);
        self.queue.push_back(card.clone());
        if self.refill_delay_secs <= 0.0 {
            self.draw();
        } else {
            self.pending_draws.push_back(self.refill_delay_secs);
        }
        Some(card)
    }

    /// Count down scheduled draws and deliver the ones that are due.
    pub fn tick(&mut self, dt: f64) {
        for remaining in self.pending_draws.iter_mut() {
            *remaining -= dt;
        }
        while self.pending_draws.front().is_some_and(|r| *r <= 0.0) {
            self.pending_draws.pop_front();
            self.draw();
        }
    }

    /// Drop every card (used when a match is discarded).
    pub fn clear(&mut self) {
        self.cards.clear();
        self.queue.clear();
        self.pending_draws.clear();
    }

    fn draw(&mut self) {
        if self.cards.len() >= self.capacity {
            return;
        }
        if let Some(card) = self.queue.pop_front() {
            self.cards.push(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_core::cards::standard_deck;

    #[test]
    fn test_initial_deal() {
        let hand = Hand::new(&standard_deck(), 4, 1.0);
        let ids: Vec<u32> = hand.cards().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(hand.next_card().map(|c| c.id), Some(CardId(5)));
    }

    #[test]
    fn test_play_schedules_delayed_draw() {
        let mut hand = Hand::new(&standard_deck(), 4, 1.0);
        let played = hand.play(CardId(2)).expect("card 2 is in hand");
        assert_eq!(played.name, "Archers");
        assert_eq!(hand.cards().len(), 3);
        assert_eq!(hand.pending_draws(), 1);

        hand.tick(0.5);
        assert_eq!(hand.cards().len(), 3, "draw should wait for the full delay");

        hand.tick(0.5);
        assert_eq!(hand.cards().len(), 4);
        assert_eq!(hand.cards()[3].id, CardId(5));
        assert_eq!(hand.pending_draws(), 0);
    }

    #[test]
    fn test_played_card_cycles_to_back() {
        let deck = standard_deck();
        let mut hand = Hand::new(&deck[..5], 4, 0.0);
        hand.play(CardId(1));
        // Queue was [5]; after playing 1 it is [5, 1] and 5 is drawn at once.
        assert_eq!(hand.cards().last().map(|c| c.id), Some(CardId(5)));
        assert_eq!(hand.next_card().map(|c| c.id), Some(CardId(1)));
    }

    #[test]
    fn test_playing_missing_card_is_noop() {
        let mut hand = Hand::new(&standard_deck(), 4, 1.0);
        assert!(hand.play(CardId(8)).is_none());
        assert_eq!(hand.cards().len(), 4);
        assert_eq!(hand.pending_draws(), 0);
    }

    #[test]
    fn test_hand_never_exceeds_capacity() {
        let mut hand = Hand::new(&standard_deck(), 4, 0.3);
        for _ in 0..20 {
            if let Some(id) = hand.cards().first().map(|c| c.id) {
                hand.play(id);
            }
            hand.tick(0.1);
            assert!(hand.cards().len() <= hand.capacity());
        }
        hand.tick(1.0);
        assert_eq!(hand.cards().len(), 4);
    }
}
