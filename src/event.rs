use std::fmt;

use serde::Serialize;

use crate::deck::Card;
use crate::participant::{HandView, Seat, DEALER_NAME};

const DIVIDER: &str = "------------------";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWins,
    DealerWins,
    Push,
    PlayerBusted,
}

impl Outcome {
    pub fn is_loss(self) -> bool {
        matches!(self, Outcome::DealerWins | Outcome::PlayerBusted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Prompt {
    PlayerName,
    HitOrStand,
    PlayAgain,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::PlayerName => f.write_str("Please enter your name."),
            Prompt::HitOrStand => f.write_str("Would you like to hit or stay? (h/s)"),
            Prompt::PlayAgain => write!(f, "{DIVIDER}\nWould you like to play another round? (y/n)"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub blackjacks: u32,
}

impl SessionSummary {
    pub fn record(&mut self, outcome: Outcome, player_blackjack: bool) {
        self.rounds += 1;
        match outcome {
            Outcome::PlayerWins => self.wins += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::DealerWins | Outcome::PlayerBusted => self.losses += 1,
        }
        if player_blackjack {
            self.blackjacks += 1;
        }
    }
}

/// Everything the engine wants shown to the player, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    RoundStarted { round: u32 },
    InitialHandsDealt { player: HandView, dealer_showing: Vec<Card> },
    TurnStarted { who: String, seat: Seat },
    CardDealt { who: String, card: Card },
    DealerHits,
    TotalReported { who: String, total: u8 },
    BlackjackAnnounced { who: String },
    BustAnnounced { who: String },
    PlayerStays { who: String },
    HoleCardRevealed { card: Card, hand: HandView },
    DealerStays { total: u8 },
    FinalTotals { player: String, player_total: u8, dealer_total: u8 },
    RoundResolved { player: String, outcome: Outcome },
    InvalidInput { prompt: Prompt },
    Farewell { summary: SessionSummary },
}

fn write_hand(f: &mut fmt::Formatter<'_>, view: &HandView) -> fmt::Result {
    writeln!(f, "----- {} -----", view.name)?;
    for card in &view.cards {
        writeln!(f, "=> {card}")?;
    }
    write!(f, "=> Total: {}", view.total)
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::RoundStarted { .. } => f.write_str("Dealing..."),
            GameEvent::InitialHandsDealt {
                player,
                dealer_showing,
            } => {
                writeln!(f, "{DIVIDER}")?;
                write_hand(f, player)?;
                writeln!(f)?;
                writeln!(f, "{DIVIDER}")?;
                writeln!(f, "----- {DEALER_NAME} -----")?;
                write!(f, "Showing:")?;
                for card in dealer_showing {
                    write!(f, "\n=> {card}")?;
                }
                Ok(())
            }
            GameEvent::TurnStarted { who, .. } => write!(f, "{DIVIDER}\n{who}'s Turn"),
            GameEvent::CardDealt { who, card } => write!(f, "{who} dealt the {card}"),
            GameEvent::DealerHits => write!(f, "{DIVIDER}\n{DEALER_NAME} hits"),
            GameEvent::TotalReported { who, total } => write!(f, "{who}'s total is now {total}"),
            GameEvent::BlackjackAnnounced { who } => write!(f, "{who} hit Blackjack!"),
            GameEvent::BustAnnounced { who } => write!(f, "{who} busted!"),
            GameEvent::PlayerStays { who } => write!(f, "{who} stays."),
            GameEvent::HoleCardRevealed { card, hand } => {
                writeln!(f, "{DEALER_NAME} flips the {card}")?;
                writeln!(f)?;
                write_hand(f, hand)
            }
            GameEvent::DealerStays { total } => write!(f, "{DEALER_NAME} stays at {total}"),
            GameEvent::FinalTotals {
                player,
                player_total,
                dealer_total,
            } => write!(
                f,
                "{DIVIDER}\n{player}'s total is {player_total}\n{DEALER_NAME}'s total is {dealer_total}"
            ),
            GameEvent::RoundResolved { player, outcome } => {
                if *outcome != Outcome::PlayerBusted {
                    writeln!(f, "{DIVIDER}")?;
                }
                match outcome {
                    Outcome::PlayerWins => write!(f, "{player} wins!"),
                    Outcome::DealerWins => write!(f, "{player} lost."),
                    Outcome::Push => f.write_str("It's a push."),
                    Outcome::PlayerBusted => write!(f, "{player} loses!"),
                }
            }
            GameEvent::InvalidInput { prompt } => match prompt {
                Prompt::PlayAgain => f.write_str("ERROR. Try again."),
                Prompt::PlayerName => f.write_str("Name can't be blank."),
                Prompt::HitOrStand => f.write_str("Error. Please enter valid response."),
            },
            GameEvent::Farewell { summary } => write!(
                f,
                "Thanks for playing!\n{} round(s): {} won, {} lost, {} pushed\n{DIVIDER}",
                summary.rounds, summary.wins, summary.losses, summary.pushes
            ),
        }
    }
}
