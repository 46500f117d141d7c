use serde::Serialize;

use crate::deck::Card;

pub const BLACKJACK: u8 = 21;

/// Cards held by one participant. Order only matters for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total against `limit`, plus whether an Ace is still counted as 11.
    ///
    /// Every Ace starts at 11; while the sum is over `limit`, one Ace at a
    /// time drops to 1. Aces are never downgraded past what is needed.
    pub fn score_against(&self, limit: u8) -> (u8, bool) {
        let mut total: u8 = 0;
        let mut soft_aces = 0;

        for card in &self.cards {
            total = total.saturating_add(card.value());
            if card.rank.is_ace() {
                soft_aces += 1;
            }
        }

        while total > limit && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }

        (total, soft_aces > 0)
    }

    pub fn total(&self) -> u8 {
        self.score_against(BLACKJACK).0
    }

    pub fn is_soft(&self) -> bool {
        self.score_against(BLACKJACK).1
    }

    pub fn is_busted_against(&self, limit: u8) -> bool {
        self.score_against(limit).0 > limit
    }

    pub fn has_blackjack_against(&self, limit: u8) -> bool {
        self.score_against(limit).0 == limit
    }

    pub fn is_busted(&self) -> bool {
        self.is_busted_against(BLACKJACK)
    }

    pub fn has_blackjack(&self) -> bool {
        self.has_blackjack_against(BLACKJACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(codes: &[&str]) -> Hand {
        let mut hand = Hand::new();
        for code in codes {
            hand.add_card(code.parse().unwrap());
        }
        hand
    }

    #[test]
    fn plain_numbers_add_up() {
        assert_eq!(hand(&["10H", "5C"]).total(), 15);
    }

    #[test]
    fn ace_and_king_is_blackjack() {
        let h = hand(&["AS", "KD"]);
        assert_eq!(h.total(), 21);
        assert!(h.has_blackjack());
        assert!(h.is_soft());
    }

    #[test]
    fn two_aces_and_nine_keeps_one_soft() {
        let h = hand(&["AS", "AH", "9C"]);
        assert_eq!(h.total(), 21);
        assert!(h.is_soft());
    }

    #[test]
    fn three_aces_and_eight_downgrades_two() {
        let h = hand(&["AS", "AH", "AC", "8D"]);
        assert_eq!(h.total(), 21);
        assert!(h.has_blackjack());
    }

    #[test]
    fn all_aces_hard_when_needed() {
        let h = hand(&["AS", "AH", "KC", "QD"]);
        assert_eq!(h.total(), 22);
        assert!(h.is_busted());
        assert!(!h.is_soft());
    }

    #[test]
    fn faces_over_twenty_one_bust() {
        let h = hand(&["KS", "QH", "5C"]);
        assert_eq!(h.total(), 25);
        assert!(h.is_busted());
        assert!(!h.has_blackjack());
    }

    #[test]
    fn pair_of_aces_is_twelve() {
        assert_eq!(hand(&["AS", "AD"]).total(), 12);
    }

    #[test]
    fn lower_limit_downgrades_earlier() {
        let h = hand(&["AS", "5H"]);
        assert_eq!(h.score_against(21), (16, true));
        assert_eq!(h.score_against(15), (6, false));
    }

    #[test]
    fn predicates_follow_the_limit() {
        let h = hand(&["KS", "6H"]);
        assert!(h.has_blackjack_against(16));
        assert!(!h.has_blackjack());
        assert!(h.is_busted_against(15));
        assert!(!h.is_busted());

        let soft = hand(&["AS", "9C"]);
        assert!(!soft.is_busted_against(15));
        assert_eq!(soft.score_against(15), (10, false));
    }

    #[test]
    fn clear_empties_the_hand() {
        let mut h = hand(&["2C", "3C"]);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.total(), 0);
    }
}
