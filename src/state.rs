// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ColorScheme;
use crate::config::RegenerationPolicy;
use crate::config::RemovalPolicy;
use crate::config::SorterConfig;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::color::Color;
use crate::types::color::palette_color;

/// The authoritative ordered card list.
///
/// Every operation is total: out-of-range indices and malformed reorder
/// requests leave the snapshot unchanged. No operation ever unpins a card
/// except `reset`, which discards the whole list.
pub struct CardListState {
    config: SorterConfig,
    cards: Vec<Card>,
    next_id: u64,
    locked: bool,
    dragging: Option<CardId>,
    rng: ChaCha8Rng,
}

impl CardListState {
    pub fn new(config: SorterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut state = Self {
            config,
            cards: Vec::new(),
            next_id: 0,
            locked: false,
            dragging: None,
            rng,
        };
        state.cards = state.initial_cards();
        state
    }

    /// The current ordered snapshot.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn generation_locked(&self) -> bool {
        self.locked
    }

    fn initial_cards(&mut self) -> Vec<Card> {
        let capacity = self.config.capacity as u32;
        (1..=capacity).map(|value| self.fresh_card(value)).collect()
    }

    fn fresh_card(&mut self, value: u32) -> Card {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        let color = match self.config.color_scheme {
            ColorScheme::Random => Color::from_hue(self.rng.gen_range(0..360)),
            ColorScheme::Palette14 => palette_color(value),
        };
        Card {
            id,
            value,
            color,
            pinned: false,
            recommendation: true,
        }
    }

    /// Values keep visually increasing: a fresh card is always labelled one
    /// past the current maximum.
    fn next_value(&self) -> u32 {
        self.cards.iter().map(|card| card.value).max().unwrap_or(0) + 1
    }

    fn pin_at(&mut self, index: usize) {
        let card = &mut self.cards[index];
        if card.pinned {
            return;
        }
        card.pinned = true;
        if self.config.pin_clears_recommendation {
            card.recommendation = false;
        }
    }

    /// Move the card at `from` so it ends up at `to`. No-op when either
    /// index is out of range. An explicit move counts as an implicit like
    /// when `move_implies_pin` is configured.
    pub fn move_card(&mut self, from: usize, to: usize) {
        if from >= self.cards.len() || to >= self.cards.len() || from == to {
            return;
        }
        let card = self.cards.remove(from);
        self.cards.insert(to, card);
        if self.config.move_implies_pin {
            self.pin_at(to);
        }
    }

    /// Replace the list with a full permutation of itself, as produced by a
    /// free-form drag. Anything that is not a permutation of the current ids
    /// is ignored. The card being dragged (reported via `drag_started`)
    /// transitions to pinned; every other card's pin state is untouched.
    pub fn reorder(&mut self, new_order: &[CardId]) {
        if new_order.len() != self.cards.len() {
            return;
        }
        let mut remaining = self.cards.clone();
        let mut reordered: Vec<Card> = Vec::with_capacity(new_order.len());
        for id in new_order {
            match remaining.iter().position(|card| card.id == *id) {
                Some(position) => reordered.push(remaining.swap_remove(position)),
                None => return,
            }
        }
        self.cards = reordered;
        if let Some(dragged) = self.dragging {
            if let Some(index) = self.cards.iter().position(|card| card.id == dragged) {
                self.pin_at(index);
            }
        }
    }

    pub fn drag_started(&mut self, id: CardId) {
        self.dragging = Some(id);
    }

    pub fn drag_ended(&mut self) {
        self.dragging = None;
    }

    /// Like the card at `index`. No-op when out of range or already pinned;
    /// never unpins.
    pub fn pin_card(&mut self, index: usize) {
        if index >= self.cards.len() {
            return;
        }
        self.pin_at(index);
    }

    /// Remove the card at `index`. Under the auto-replace policy, and while
    /// generation is unlocked, a fresh card is appended so the list stays at
    /// capacity.
    pub fn remove_card(&mut self, index: usize) {
        if index >= self.cards.len() {
            return;
        }
        self.cards.remove(index);
        if self.config.removal_policy == RemovalPolicy::AutoReplace && !self.locked {
            let value = self.next_value();
            let card = self.fresh_card(value);
            self.cards.push(card);
        }
    }

    /// Replace unpinned cards per the configured regeneration policy.
    /// Pinned cards are never touched.
    pub fn regenerate_unpinned(&mut self) {
        match self.config.regeneration_policy {
            RegenerationPolicy::SingleHighest => self.regenerate_single_highest(),
            RegenerationPolicy::RandomSubset => self.regenerate_random_subset(),
            RegenerationPolicy::TopUp => self.top_up(),
        }
    }

    fn regenerate_single_highest(&mut self) {
        let target = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.pinned)
            .max_by_key(|(_, card)| card.value)
            .map(|(index, _)| index);
        let Some(index) = target else {
            return;
        };
        let value = self.next_value();
        self.cards[index] = self.fresh_card(value);
        self.pin_at(index);
    }

    fn regenerate_random_subset(&mut self) {
        let unpinned: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.pinned)
            .map(|(index, _)| index)
            .collect();
        if unpinned.is_empty() {
            return;
        }
        let mut selected: Vec<usize> = unpinned
            .iter()
            .copied()
            .filter(|_| self.rng.gen_bool(0.5))
            .collect();
        // The replaced subset must be non-empty.
        if selected.is_empty() {
            let pick = self.rng.gen_range(0..unpinned.len());
            selected.push(unpinned[pick]);
        }
        for index in selected {
            let value = self.next_value();
            self.cards[index] = self.fresh_card(value);
        }
        // Re-sort the unpinned cards by value across the unpinned slots;
        // pinned cards keep their original slots.
        let slots: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.pinned)
            .map(|(index, _)| index)
            .collect();
        let mut unpinned_cards: Vec<Card> =
            slots.iter().map(|&slot| self.cards[slot].clone()).collect();
        unpinned_cards.sort_by_key(|card| card.value);
        for (slot, card) in slots.into_iter().zip(unpinned_cards) {
            self.cards[slot] = card;
        }
    }

    fn top_up(&mut self) {
        if self.locked {
            return;
        }
        while self.cards.len() < self.config.capacity {
            let value = self.next_value();
            let card = self.fresh_card(value);
            self.cards.push(card);
        }
    }

    /// Replace the entire list with a freshly initialized one, discarding
    /// all pin state and releasing the generation lock. Ids are still never
    /// reused.
    pub fn reset(&mut self) {
        self.dragging = None;
        self.locked = false;
        self.cards = self.initial_cards();
    }

    /// While locked, removal never auto-replaces and top-up is suppressed.
    /// Unlocking tops the list back up to capacity.
    pub fn set_generation_locked(&mut self, locked: bool) {
        if self.locked == locked {
            return;
        }
        self.locked = locked;
        if !locked {
            self.top_up();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn test_config() -> SorterConfig {
        SorterConfig {
            seed: Some(42),
            ..SorterConfig::default()
        }
    }

    fn ids(state: &CardListState) -> Vec<CardId> {
        state.cards().iter().map(|card| card.id).collect()
    }

    fn assert_unique_ids(state: &CardListState) {
        let ids: HashSet<CardId> = state.cards().iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), state.cards().len());
    }

    #[test]
    fn test_initialize() {
        let state = CardListState::new(test_config());
        assert_eq!(state.cards().len(), 4);
        assert_unique_ids(&state);
        let values: Vec<u32> = state.cards().iter().map(|card| card.value).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
        for card in state.cards() {
            assert!(!card.pinned);
            assert!(card.recommendation);
        }
    }

    #[test]
    fn test_initialize_respects_capacity() {
        let config = SorterConfig {
            capacity: 7,
            ..test_config()
        };
        let state = CardListState::new(config);
        assert_eq!(state.cards().len(), 7);
    }

    #[test]
    fn test_palette_colors_are_deterministic() {
        let a = CardListState::new(test_config());
        let b = CardListState::new(test_config());
        for (x, y) in a.cards().iter().zip(b.cards()) {
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_random_colors_are_seeded() {
        let config = SorterConfig {
            color_scheme: ColorScheme::Random,
            ..test_config()
        };
        let a = CardListState::new(config.clone());
        let b = CardListState::new(config);
        for (x, y) in a.cards().iter().zip(b.cards()) {
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_move_card() {
        let mut state = CardListState::new(test_config());
        let before = ids(&state);
        state.move_card(0, 2);
        let after = ids(&state);
        assert_eq!(after, vec![before[1], before[2], before[0], before[3]]);
        // Identities are untouched, only positions change.
        assert_unique_ids(&state);
    }

    #[test]
    fn test_move_card_out_of_range_is_a_no_op() {
        let mut state = CardListState::new(test_config());
        let before = state.cards().to_vec();
        state.move_card(0, 4);
        assert_eq!(state.cards(), &before[..]);
        state.move_card(9, 0);
        assert_eq!(state.cards(), &before[..]);
    }

    #[test]
    fn test_move_card_does_not_pin_by_default() {
        let mut state = CardListState::new(test_config());
        state.move_card(0, 3);
        assert!(state.cards().iter().all(|card| !card.pinned));
    }

    #[test]
    fn test_move_implies_pin() {
        let config = SorterConfig {
            move_implies_pin: true,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        state.move_card(0, 2);
        assert!(state.cards()[2].pinned);
        let pinned = state.cards().iter().filter(|card| card.pinned).count();
        assert_eq!(pinned, 1);
    }

    #[test]
    fn test_pin_card() {
        let mut state = CardListState::new(test_config());
        state.pin_card(1);
        assert!(state.cards()[1].pinned);
        // Pinning does not touch the recommendation flag by default.
        assert!(state.cards()[1].recommendation);
        // Pinning again is a no-op, never an unpin.
        state.pin_card(1);
        assert!(state.cards()[1].pinned);
    }

    #[test]
    fn test_pin_card_out_of_range_is_a_no_op() {
        let mut state = CardListState::new(test_config());
        let before = state.cards().to_vec();
        state.pin_card(4);
        assert_eq!(state.cards(), &before[..]);
    }

    #[test]
    fn test_pin_clears_recommendation() {
        let config = SorterConfig {
            pin_clears_recommendation: true,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        state.pin_card(0);
        assert!(state.cards()[0].pinned);
        assert!(!state.cards()[0].recommendation);
    }

    #[test]
    fn test_remove_card_no_replace() {
        let mut state = CardListState::new(test_config());
        state.remove_card(1);
        assert_eq!(state.cards().len(), 3);
        let values: Vec<u32> = state.cards().iter().map(|card| card.value).collect();
        assert_eq!(values, vec![1, 3, 4]);
    }

    #[test]
    fn test_remove_card_auto_replace() {
        // Scenario: initialize(4), pin 0, remove 1 under auto-replace.
        let config = SorterConfig {
            removal_policy: RemovalPolicy::AutoReplace,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        state.pin_card(0);
        state.remove_card(1);
        assert_eq!(state.cards().len(), 4);
        assert!(state.cards()[0].pinned);
        let appended = state.cards().last().unwrap();
        assert!(!appended.pinned);
        assert!(appended.recommendation);
        assert_eq!(appended.value, 5);
        assert_unique_ids(&state);
    }

    #[test]
    fn test_remove_card_out_of_range_is_a_no_op() {
        let mut state = CardListState::new(test_config());
        let before = state.cards().to_vec();
        state.remove_card(4);
        assert_eq!(state.cards(), &before[..]);
    }

    #[test]
    fn test_generation_lock() {
        // Scenario: lock, remove three times, unlock: the list shrinks to
        // one card and refills to capacity.
        let config = SorterConfig {
            removal_policy: RemovalPolicy::AutoReplace,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        state.set_generation_locked(true);
        state.remove_card(0);
        state.remove_card(0);
        state.remove_card(0);
        assert_eq!(state.cards().len(), 1);
        state.set_generation_locked(false);
        assert_eq!(state.cards().len(), 4);
        assert_unique_ids(&state);
    }

    #[test]
    fn test_set_generation_locked_is_idempotent() {
        let mut state = CardListState::new(test_config());
        state.remove_card(0);
        state.set_generation_locked(false);
        // Already unlocked: no top-up happens.
        assert_eq!(state.cards().len(), 3);
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let mut state = CardListState::new(test_config());
        let before = ids(&state);
        let new_order = vec![before[3], before[1], before[2], before[0]];
        state.reorder(&new_order);
        assert_eq!(ids(&state), new_order);
        let before_set: HashSet<CardId> = before.into_iter().collect();
        let after_set: HashSet<CardId> = ids(&state).into_iter().collect();
        assert_eq!(before_set, after_set);
    }

    #[test]
    fn test_reorder_pins_only_the_dragged_card() {
        let mut state = CardListState::new(test_config());
        let before = ids(&state);
        state.drag_started(before[1]);
        state.reorder(&[before[3], before[1], before[2], before[0]]);
        state.drag_ended();
        for card in state.cards() {
            assert_eq!(card.pinned, card.id == before[1]);
        }
    }

    #[test]
    fn test_reorder_without_drag_pins_nothing() {
        let mut state = CardListState::new(test_config());
        let before = ids(&state);
        state.reorder(&[before[3], before[2], before[1], before[0]]);
        assert!(state.cards().iter().all(|card| !card.pinned));
    }

    #[test]
    fn test_reorder_rejects_non_permutations() {
        let mut state = CardListState::new(test_config());
        let before = state.cards().to_vec();
        let current = ids(&state);

        // Wrong length.
        state.reorder(&current[..3]);
        assert_eq!(state.cards(), &before[..]);

        // Unknown id.
        let mut unknown = current.clone();
        unknown[0] = CardId::new(999);
        state.reorder(&unknown);
        assert_eq!(state.cards(), &before[..]);

        // Duplicate id.
        let duplicated = vec![current[0], current[0], current[2], current[3]];
        state.reorder(&duplicated);
        assert_eq!(state.cards(), &before[..]);
    }

    #[test]
    fn test_regenerate_single_highest() {
        let config = SorterConfig {
            regeneration_policy: RegenerationPolicy::SingleHighest,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        state.pin_card(3);
        let before = ids(&state);
        state.regenerate_unpinned();
        // The highest unpinned value was 3, at index 2.
        let replacement = &state.cards()[2];
        assert_ne!(replacement.id, before[2]);
        assert!(replacement.pinned);
        assert_eq!(replacement.value, 5);
        // Everything else is untouched.
        assert_eq!(state.cards()[0].id, before[0]);
        assert_eq!(state.cards()[1].id, before[1]);
        assert_eq!(state.cards()[3].id, before[3]);
        assert_unique_ids(&state);
    }

    #[test]
    fn test_regenerate_with_all_cards_pinned_is_a_no_op() {
        let config = SorterConfig {
            regeneration_policy: RegenerationPolicy::SingleHighest,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        for index in 0..4 {
            state.pin_card(index);
        }
        let before = state.cards().to_vec();
        state.regenerate_unpinned();
        assert_eq!(state.cards(), &before[..]);
    }

    #[test]
    fn test_regenerate_random_subset() {
        let config = SorterConfig {
            regeneration_policy: RegenerationPolicy::RandomSubset,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        state.pin_card(1);
        let pinned_before = state.cards()[1].clone();
        let unpinned_before: HashSet<CardId> = state
            .cards()
            .iter()
            .filter(|card| !card.pinned)
            .map(|card| card.id)
            .collect();
        state.regenerate_unpinned();

        // The pinned card kept its slot and identity.
        assert_eq!(state.cards()[1], pinned_before);
        assert_eq!(state.cards().len(), 4);
        assert_unique_ids(&state);

        // At least one unpinned card was replaced.
        let unpinned_after: HashSet<CardId> = state
            .cards()
            .iter()
            .filter(|card| !card.pinned)
            .map(|card| card.id)
            .collect();
        assert!(unpinned_after.difference(&unpinned_before).count() >= 1);

        // Unpinned cards are sorted by value across the unpinned slots.
        let unpinned_values: Vec<u32> = state
            .cards()
            .iter()
            .filter(|card| !card.pinned)
            .map(|card| card.value)
            .collect();
        let mut sorted = unpinned_values.clone();
        sorted.sort();
        assert_eq!(unpinned_values, sorted);
    }

    #[test]
    fn test_regenerate_random_subset_repeated_keeps_ids_unique() {
        let config = SorterConfig {
            regeneration_policy: RegenerationPolicy::RandomSubset,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        let mut seen: HashSet<CardId> = ids(&state).into_iter().collect();
        for _ in 0..20 {
            state.regenerate_unpinned();
            assert_unique_ids(&state);
            for card in state.cards() {
                seen.insert(card.id);
            }
        }
        // Many distinct ids were generated, none colliding.
        assert!(seen.len() > 4);
    }

    #[test]
    fn test_regenerate_top_up() {
        let mut state = CardListState::new(test_config());
        state.remove_card(0);
        state.remove_card(0);
        assert_eq!(state.cards().len(), 2);
        state.regenerate_unpinned();
        assert_eq!(state.cards().len(), 4);
        assert_unique_ids(&state);
        // Fresh cards continue the value sequence.
        assert_eq!(state.cards()[2].value, 5);
        assert_eq!(state.cards()[3].value, 6);
    }

    #[test]
    fn test_regenerate_top_up_at_capacity_is_a_no_op() {
        let mut state = CardListState::new(test_config());
        let before = state.cards().to_vec();
        state.regenerate_unpinned();
        assert_eq!(state.cards(), &before[..]);
    }

    #[test]
    fn test_regenerate_top_up_respects_the_lock() {
        let mut state = CardListState::new(test_config());
        state.set_generation_locked(true);
        state.remove_card(0);
        state.regenerate_unpinned();
        assert_eq!(state.cards().len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut state = CardListState::new(test_config());
        let before: HashSet<CardId> = ids(&state).into_iter().collect();
        state.pin_card(0);
        state.pin_card(2);
        state.set_generation_locked(true);
        state.remove_card(1);
        state.reset();
        assert_eq!(state.cards().len(), 4);
        assert!(!state.generation_locked());
        for card in state.cards() {
            assert!(!card.pinned);
            assert!(card.recommendation);
        }
        // Ids are never reused, even across a reset.
        let after: HashSet<CardId> = ids(&state).into_iter().collect();
        assert!(before.is_disjoint(&after));
    }

    #[test]
    fn test_pin_state_is_monotonic_across_operations() {
        let config = SorterConfig {
            removal_policy: RemovalPolicy::AutoReplace,
            regeneration_policy: RegenerationPolicy::RandomSubset,
            move_implies_pin: true,
            ..test_config()
        };
        let mut state = CardListState::new(config);
        let mut pinned: HashSet<CardId> = HashSet::new();
        let mut observe = |state: &CardListState, pinned: &mut HashSet<CardId>| {
            for card in state.cards() {
                if pinned.contains(&card.id) {
                    assert!(card.pinned);
                }
                if card.pinned {
                    pinned.insert(card.id);
                }
            }
        };
        state.pin_card(0);
        observe(&state, &mut pinned);
        state.move_card(1, 3);
        observe(&state, &mut pinned);
        state.regenerate_unpinned();
        observe(&state, &mut pinned);
        state.remove_card(2);
        observe(&state, &mut pinned);
        let order: Vec<CardId> = ids(&state).into_iter().rev().collect();
        state.reorder(&order);
        observe(&state, &mut pinned);
        assert_unique_ids(&state);
    }
}
