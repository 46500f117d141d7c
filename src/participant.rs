use serde::Serialize;

use crate::deck::Card;
use crate::hand::Hand;

pub const DEALER_NAME: &str = "Dealer";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Seat {
    Player,
    Dealer,
}

/// Hand behaviour shared by the player and the dealer.
pub trait Participant {
    fn name(&self) -> &str;
    fn hand(&self) -> &Hand;
    fn hand_mut(&mut self) -> &mut Hand;

    fn add_card(&mut self, card: Card) {
        self.hand_mut().add_card(card);
    }

    fn total_against(&self, limit: u8) -> u8 {
        self.hand().score_against(limit).0
    }

    fn view(&self, limit: u8) -> HandView {
        HandView {
            name: self.name().to_string(),
            cards: self.hand().cards().to_vec(),
            total: self.total_against(limit),
        }
    }
}

/// Snapshot of a full hand for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandView {
    pub name: String,
    pub cards: Vec<Card>,
    pub total: u8,
}

#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            hand: Hand::new(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Participant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

/// The dealer's first card is the hole card; the second is the up-card.
#[derive(Clone, Debug, Default)]
pub struct Dealer {
    hand: Hand,
    hole_revealed: bool,
}

impl Dealer {
    pub fn new() -> Self {
        Dealer::default()
    }

    pub fn hole_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    pub fn reveal(&mut self) -> Option<Card> {
        self.hole_revealed = true;
        self.hole_card()
    }

    pub fn hide(&mut self) {
        self.hole_revealed = false;
    }

    /// What the player is allowed to see right now.
    pub fn visible_cards(&self) -> Vec<Card> {
        if self.hole_revealed {
            self.hand.cards().to_vec()
        } else {
            self.hand.cards().iter().skip(1).copied().collect()
        }
    }
}

impl Participant for Dealer {
    fn name(&self) -> &str {
        DEALER_NAME
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::BLACKJACK;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn dealer_hides_the_first_card_until_revealed() {
        let mut dealer = Dealer::new();
        dealer.add_card(card("9S"));
        dealer.add_card(card("4H"));

        assert_eq!(dealer.visible_cards(), vec![card("4H")]);

        assert_eq!(dealer.reveal(), Some(card("9S")));
        assert_eq!(dealer.visible_cards().len(), 2);

        dealer.hide();
        assert_eq!(dealer.visible_cards(), vec![card("4H")]);
    }

    #[test]
    fn view_reports_name_and_total() {
        let mut player = Player::new("Ada");
        player.add_card(card("KS"));
        player.add_card(card("7D"));

        let view = player.view(BLACKJACK);
        assert_eq!(view.name, "Ada");
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.total, 17);
    }

    #[test]
    fn dealer_name_is_fixed() {
        assert_eq!(Dealer::new().name(), "Dealer");
    }
}
