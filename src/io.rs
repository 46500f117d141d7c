use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::error::GameError;
use crate::event::{GameEvent, Prompt};
use crate::participant::Seat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
    Invalid,
}

impl Decision {
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "h" | "hit" => Decision::Hit,
            "s" | "stand" | "stay" => Decision::Stand,
            _ => Decision::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replay {
    Yes,
    No,
    Invalid,
}

impl Replay {
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Replay::Yes,
            "n" | "no" => Replay::No,
            _ => Replay::Invalid,
        }
    }
}

/// The boundary between the engine and whoever is sitting at the table.
pub trait GameIo {
    fn prompt_player_name(&mut self) -> Result<String, GameError>;
    fn prompt_hit_or_stand(&mut self) -> Result<Decision, GameError>;
    fn prompt_play_again(&mut self) -> Result<Replay, GameError>;
    fn render(&mut self, event: &GameEvent) -> Result<(), GameError>;
}

#[derive(Clone, Copy, Debug)]
pub struct DisplaySettings {
    pub pace: Duration,
    pub clear_screen: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            pace: Duration::ZERO,
            clear_screen: false,
        }
    }
}

/// Line-oriented terminal adapter.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
    settings: DisplaySettings,
}

impl ConsoleIo<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(settings: DisplaySettings) -> Self {
        ConsoleIo::new(io::stdin().lock(), io::stdout(), settings)
    }
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W, settings: DisplaySettings) -> Self {
        ConsoleIo {
            input,
            output,
            settings,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: Prompt) -> Result<String, GameError> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn pause(&mut self) -> Result<(), GameError> {
        self.output.flush()?;
        if !self.settings.pace.is_zero() {
            thread::sleep(self.settings.pace);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), GameError> {
        self.pause()?;
        if self.settings.clear_screen {
            write!(self.output, "\x1B[2J\x1B[1;1H")?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> GameIo for ConsoleIo<R, W> {
    fn prompt_player_name(&mut self) -> Result<String, GameError> {
        loop {
            let name = self.ask(Prompt::PlayerName)?;
            if !name.is_empty() {
                return Ok(name);
            }
        }
    }

    fn prompt_hit_or_stand(&mut self) -> Result<Decision, GameError> {
        Ok(Decision::parse(&self.ask(Prompt::HitOrStand)?))
    }

    fn prompt_play_again(&mut self) -> Result<Replay, GameError> {
        Ok(Replay::parse(&self.ask(Prompt::PlayAgain)?))
    }

    fn render(&mut self, event: &GameEvent) -> Result<(), GameError> {
        match event {
            GameEvent::RoundStarted { .. } => self.clear()?,
            GameEvent::TurnStarted {
                seat: Seat::Dealer,
                ..
            } => self.clear()?,
            GameEvent::DealerHits | GameEvent::FinalTotals { .. } => self.pause()?,
            GameEvent::Farewell { .. } => self.clear()?,
            _ => {}
        }
        writeln!(self.output, "{event}")?;
        Ok(())
    }
}

/// Answers come from a queue; every rendered event is kept. The name is
/// handed out once; asking again reports closed input.
pub struct ScriptedIo<'a> {
    name: Option<String>,
    answers: VecDeque<String>,
    pub events: Vec<GameEvent>,
    pub prompts: Vec<Prompt>,
    observer: Option<Box<dyn FnMut(&GameEvent) + 'a>>,
}

impl<'a> ScriptedIo<'a> {
    pub fn new<I, S>(name: impl Into<String>, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedIo {
            name: Some(name.into()),
            answers: answers.into_iter().map(Into::into).collect(),
            events: Vec::new(),
            prompts: Vec::new(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl FnMut(&GameEvent) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: Prompt) -> Result<String, GameError> {
        self.prompts.push(prompt);
        self.answers.pop_front().ok_or(GameError::InputClosed)
    }
}

impl GameIo for ScriptedIo<'_> {
    fn prompt_player_name(&mut self) -> Result<String, GameError> {
        self.prompts.push(Prompt::PlayerName);
        self.name.take().ok_or(GameError::InputClosed)
    }

    fn prompt_hit_or_stand(&mut self) -> Result<Decision, GameError> {
        Ok(Decision::parse(&self.next_answer(Prompt::HitOrStand)?))
    }

    fn prompt_play_again(&mut self) -> Result<Replay, GameError> {
        Ok(Replay::parse(&self.next_answer(Prompt::PlayAgain)?))
    }

    fn render(&mut self, event: &GameEvent) -> Result<(), GameError> {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
        self.events.push(event.clone());
        Ok(())
    }
}
