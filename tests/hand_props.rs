use proptest::prelude::*;

use blackjack_console::{Card, Hand, Rank, Suit};

fn any_card() -> impl Strategy<Value = Card> {
    (0..Rank::ALL.len(), 0..Suit::ALL.len()).prop_map(|(r, s)| Card::new(Rank::ALL[r], Suit::ALL[s]))
}

fn hand_of(cards: &[Card]) -> Hand {
    let mut hand = Hand::new();
    for card in cards {
        hand.add_card(*card);
    }
    hand
}

/// Best total by brute force: try every number of Aces counted as 1.
fn best_total(cards: &[Card]) -> u8 {
    let aces = cards.iter().filter(|c| c.rank == Rank::Ace).count() as u8;
    let soft: u8 = cards.iter().map(|c| c.value()).sum();
    (0..=aces)
        .map(|hard| soft - 10 * hard)
        .find(|total| *total <= 21)
        .unwrap_or(soft - 10 * aces)
}

proptest! {
    #[test]
    fn total_matches_brute_force(cards in prop::collection::vec(any_card(), 0..8)) {
        prop_assert_eq!(hand_of(&cards).total(), best_total(&cards));
    }

    #[test]
    fn order_does_not_change_the_total(cards in prop::collection::vec(any_card(), 0..8)) {
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(hand_of(&cards).total(), hand_of(&reversed).total());
    }

    #[test]
    fn soft_hands_never_bust(cards in prop::collection::vec(any_card(), 1..8)) {
        let hand = hand_of(&cards);
        if hand.is_soft() {
            prop_assert!(!hand.is_busted());
        }
        prop_assert_eq!(hand.is_busted(), hand.total() > 21);
        prop_assert_eq!(hand.has_blackjack(), hand.total() == 21);
    }
}
