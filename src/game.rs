use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    deck::{Card, Deck},
    error::GameError,
    event::{GameEvent, Outcome, Prompt, SessionSummary},
    hand::BLACKJACK,
    io::{Decision, GameIo, Replay},
    participant::{Dealer, Participant, Player, Seat},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRules {
    pub blackjack: u8,
    pub dealer_stands_on: u8,
    /// A round that starts with fewer cards than this gets a fresh deck.
    pub reshuffle_below: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            blackjack: BLACKJACK,
            dealer_stands_on: 17,
            reshuffle_below: 15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    Setup,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolution,
    RoundEnd,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HandStatus {
    Live,
    Blackjack,
    Busted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnEnd {
    Stood,
    Blackjack,
    Busted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub outcome: Outcome,
    pub player_total: u8,
    pub dealer_total: u8,
    /// Two-card 21 straight off the deal.
    pub player_blackjack: bool,
    pub dealer_played: bool,
}

/// Bust on the dealer's side beats any standing player total; otherwise the
/// higher total wins and equal totals push. A busted player never gets here.
pub fn resolve_outcome(player_total: u8, dealer_total: u8, dealer_busted: bool) -> Outcome {
    if player_total == dealer_total {
        Outcome::Push
    } else if player_total < dealer_total {
        if dealer_busted {
            Outcome::PlayerWins
        } else {
            Outcome::DealerWins
        }
    } else {
        Outcome::PlayerWins
    }
}

pub struct BlackjackGame<R: Rng> {
    pub rules: GameRules,
    deck: Deck,
    player: Player,
    dealer: Dealer,
    rng: R,
    phase: Phase,
    round: u32,
}

impl<R: Rng> BlackjackGame<R> {
    pub fn new(rules: GameRules, mut rng: R) -> Self {
        let deck = Deck::new(&mut rng);
        BlackjackGame::with_deck(rules, rng, deck)
    }

    pub fn with_deck(rules: GameRules, rng: R, deck: Deck) -> Self {
        BlackjackGame {
            rules,
            deck,
            player: Player::new(String::new()),
            dealer: Dealer::new(),
            rng,
            phase: Phase::Setup,
            round: 0,
        }
    }

    /// Skip the name prompt.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player = Player::new(name);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn rounds_played(&self) -> u32 {
        self.round
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "phase change");
        self.phase = next;
    }

    fn seat(&self, seat: Seat) -> &dyn Participant {
        match seat {
            Seat::Player => &self.player,
            Seat::Dealer => &self.dealer,
        }
    }

    fn seat_mut(&mut self, seat: Seat) -> &mut dyn Participant {
        match seat {
            Seat::Player => &mut self.player,
            Seat::Dealer => &mut self.dealer,
        }
    }

    fn total(&self, seat: Seat) -> u8 {
        self.seat(seat).total_against(self.rules.blackjack)
    }

    fn name(&self, seat: Seat) -> String {
        self.seat(seat).name().to_string()
    }

    fn deal_to(&mut self, seat: Seat) -> Result<Card, GameError> {
        let card = self.deck.deal_one()?;
        debug!(?seat, %card, remaining = self.deck.size(), "dealt card");
        self.seat_mut(seat).add_card(card);
        Ok(card)
    }

    /// Deal one card and tell the table what it was and where the hand stands.
    fn hit(&mut self, seat: Seat, io: &mut dyn GameIo) -> Result<HandStatus, GameError> {
        let card = self.deal_to(seat)?;
        let who = self.name(seat);
        io.render(&GameEvent::CardDealt {
            who: who.clone(),
            card,
        })?;
        io.render(&GameEvent::TotalReported {
            who,
            total: self.total(seat),
        })?;
        self.announce(seat, io)
    }

    fn announce(&self, seat: Seat, io: &mut dyn GameIo) -> Result<HandStatus, GameError> {
        let hand = self.seat(seat).hand();
        let who = self.name(seat);
        if hand.has_blackjack_against(self.rules.blackjack) {
            io.render(&GameEvent::BlackjackAnnounced { who })?;
            Ok(HandStatus::Blackjack)
        } else if hand.is_busted_against(self.rules.blackjack) {
            io.render(&GameEvent::BustAnnounced { who })?;
            Ok(HandStatus::Busted)
        } else {
            Ok(HandStatus::Live)
        }
    }

    pub fn ensure_player_name(&mut self, io: &mut dyn GameIo) -> Result<(), GameError> {
        while !self.player.has_name() {
            let name = io.prompt_player_name()?;
            let name = name.trim();
            if name.is_empty() {
                warn!("blank player name");
                io.render(&GameEvent::InvalidInput {
                    prompt: Prompt::PlayerName,
                })?;
                continue;
            }
            self.player = Player::new(name);
        }
        Ok(())
    }

    /// Returns true when the deck was rebuilt.
    pub fn prepare_round(&mut self) -> bool {
        self.transition(Phase::Setup);
        let rebuilt = self.deck.size() < self.rules.reshuffle_below;
        if rebuilt {
            info!(
                remaining = self.deck.size(),
                threshold = self.rules.reshuffle_below,
                "deck running low, building a fresh one"
            );
            self.deck = Deck::new(&mut self.rng);
        }
        self.player.hand_mut().clear();
        self.dealer.hand_mut().clear();
        self.dealer.hide();
        rebuilt
    }

    /// Player, dealer, player, dealer.
    pub fn deal_initial(&mut self) -> Result<(), GameError> {
        self.transition(Phase::Dealing);
        for seat in [Seat::Player, Seat::Dealer, Seat::Player, Seat::Dealer] {
            self.deal_to(seat)?;
        }
        Ok(())
    }

    fn player_turn(&mut self, io: &mut dyn GameIo) -> Result<TurnEnd, GameError> {
        self.transition(Phase::PlayerTurn);
        io.render(&GameEvent::TurnStarted {
            who: self.name(Seat::Player),
            seat: Seat::Player,
        })?;

        let mut status = self.announce(Seat::Player, io)?;
        loop {
            match status {
                HandStatus::Busted => return Ok(TurnEnd::Busted),
                HandStatus::Blackjack => return Ok(TurnEnd::Blackjack),
                HandStatus::Live => {}
            }

            status = match io.prompt_hit_or_stand()? {
                Decision::Hit => self.hit(Seat::Player, io)?,
                Decision::Stand => {
                    io.render(&GameEvent::PlayerStays {
                        who: self.name(Seat::Player),
                    })?;
                    return Ok(TurnEnd::Stood);
                }
                Decision::Invalid => {
                    warn!("unrecognised hit/stand answer");
                    io.render(&GameEvent::InvalidInput {
                        prompt: Prompt::HitOrStand,
                    })?;
                    HandStatus::Live
                }
            };
        }
    }

    fn dealer_turn(&mut self, io: &mut dyn GameIo) -> Result<(), GameError> {
        self.transition(Phase::DealerTurn);
        io.render(&GameEvent::TurnStarted {
            who: self.name(Seat::Dealer),
            seat: Seat::Dealer,
        })?;
        if let Some(card) = self.dealer.reveal() {
            io.render(&GameEvent::HoleCardRevealed {
                card,
                hand: self.dealer.view(self.rules.blackjack),
            })?;
        }
        self.announce(Seat::Dealer, io)?;

        while self.total(Seat::Dealer) < self.rules.dealer_stands_on {
            io.render(&GameEvent::DealerHits)?;
            self.hit(Seat::Dealer, io)?;
        }

        let hand = self.dealer.hand();
        if !hand.is_busted_against(self.rules.blackjack)
            && !hand.has_blackjack_against(self.rules.blackjack)
        {
            io.render(&GameEvent::DealerStays {
                total: self.total(Seat::Dealer),
            })?;
        }
        Ok(())
    }

    fn resolve(&mut self, io: &mut dyn GameIo) -> Result<Outcome, GameError> {
        self.transition(Phase::Resolution);
        let player_total = self.total(Seat::Player);
        let dealer_total = self.total(Seat::Dealer);
        let dealer_busted = self.dealer.hand().is_busted_against(self.rules.blackjack);

        if !dealer_busted {
            io.render(&GameEvent::FinalTotals {
                player: self.name(Seat::Player),
                player_total,
                dealer_total,
            })?;
        }

        let outcome = resolve_outcome(player_total, dealer_total, dealer_busted);
        io.render(&GameEvent::RoundResolved {
            player: self.name(Seat::Player),
            outcome,
        })?;
        Ok(outcome)
    }

    /// One full round, from the deck check to the result. Does not ask about
    /// another round.
    pub fn play_round(&mut self, io: &mut dyn GameIo) -> Result<RoundReport, GameError> {
        self.ensure_player_name(io)?;
        self.prepare_round();
        self.round += 1;
        io.render(&GameEvent::RoundStarted { round: self.round })?;

        self.deal_initial()?;
        io.render(&GameEvent::InitialHandsDealt {
            player: self.player.view(self.rules.blackjack),
            dealer_showing: self.dealer.visible_cards(),
        })?;
        let player_blackjack = self.player.hand().has_blackjack_against(self.rules.blackjack);

        let turn_end = self.player_turn(io)?;
        debug!(?turn_end, "player done");

        let (outcome, dealer_played) = if turn_end == TurnEnd::Busted {
            let outcome = Outcome::PlayerBusted;
            io.render(&GameEvent::RoundResolved {
                player: self.name(Seat::Player),
                outcome,
            })?;
            (outcome, false)
        } else {
            self.dealer_turn(io)?;
            (self.resolve(io)?, true)
        };
        self.transition(Phase::RoundEnd);

        let report = RoundReport {
            outcome,
            player_total: self.total(Seat::Player),
            dealer_total: self.total(Seat::Dealer),
            player_blackjack,
            dealer_played,
        };
        info!(
            round = self.round,
            ?outcome,
            player_total = report.player_total,
            dealer_total = report.dealer_total,
            "round finished"
        );
        Ok(report)
    }

    pub fn ask_play_again(&mut self, io: &mut dyn GameIo) -> Result<bool, GameError> {
        loop {
            match io.prompt_play_again()? {
                Replay::Yes => return Ok(true),
                Replay::No => return Ok(false),
                Replay::Invalid => {
                    warn!("unrecognised play-again answer");
                    io.render(&GameEvent::InvalidInput {
                        prompt: Prompt::PlayAgain,
                    })?;
                }
            }
        }
    }

    /// Plays rounds until the player declines, then hands back the tally.
    pub fn run(&mut self, io: &mut dyn GameIo) -> Result<SessionSummary, GameError> {
        self.ensure_player_name(io)?;
        info!(player = self.player.name(), "session started");

        let mut summary = SessionSummary::default();
        loop {
            let report = self.play_round(io)?;
            summary.record(report.outcome, report.player_blackjack);

            if !self.ask_play_again(io)? {
                self.transition(Phase::Terminated);
                io.render(&GameEvent::Farewell { summary })?;
                info!(rounds = summary.rounds, wins = summary.wins, "session finished");
                return Ok(summary);
            }
        }
    }
}
