use std::io::BufRead;
use std::ops::Add;

use tracing::{debug, info};

use crate::error::Result;
use crate::foodweb::{FeedOutcome, FoodWeb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Feed(String),
    Exit,
}

impl Command {
    /// `None` for blank input, `Exit` for "exit" in any case, otherwise a feeding request.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            None
        } else if line.eq_ignore_ascii_case("exit") {
            Some(Command::Exit)
        } else {
            Some(Command::Feed(line.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Outcome(FeedOutcome),
    Exit,
}

/// Counts of feeding events by outcome over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub fed: usize,
    pub hungry: usize,
    pub ignored: usize,
}

impl From<&FeedOutcome> for Tally {
    fn from(outcome: &FeedOutcome) -> Self {
        match outcome {
            FeedOutcome::Fed { .. } => Tally { fed: 1, ..Tally::default() },
            FeedOutcome::InsufficientCalories { .. } => Tally { hungry: 1, ..Tally::default() },
            FeedOutcome::NotFound(_) | FeedOutcome::NoOp(_) | FeedOutcome::NoPrey(_) => {
                Tally { ignored: 1, ..Tally::default() }
            }
        }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Tally {
            fed: self.fed + rhs.fed,
            hungry: self.hungry + rhs.hungry,
            ignored: self.ignored + rhs.ignored,
        }
    }
}

impl Tally {
    pub fn total(&self) -> usize {
        self.fed + self.hungry + self.ignored
    }
}

/// A food web plus the feeding events applied to it. Lives for one simulation run.
#[derive(Debug)]
pub struct Session {
    web: FoodWeb,
    tally: Tally,
}

impl Session {
    pub fn new(web: FoodWeb) -> Session {
        Session { web, tally: Tally::default() }
    }

    pub fn web(&self) -> &FoodWeb {
        &self.web
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn into_web(self) -> FoodWeb {
        self.web
    }

    pub fn apply(&mut self, command: Command) -> Step {
        match command {
            Command::Exit => Step::Exit,
            Command::Feed(name) => {
                let outcome = self.web.feed(&name);
                debug!(%outcome, "feeding event");
                self.tally = self.tally + Tally::from(&outcome);
                Step::Outcome(outcome)
            }
        }
    }

    /// Applies commands read line by line until `exit` or end of input.
    pub fn run<R, F>(&mut self, reader: R, mut on_outcome: F) -> Result<Tally>
    where
        R: BufRead,
        F: FnMut(&FeedOutcome, &FoodWeb),
    {
        let start = self.tally;
        for line in reader.lines() {
            let Some(command) = Command::parse(&line?) else {
                continue;
            };
            match self.apply(command) {
                Step::Exit => {
                    info!("Exiting simulation.");
                    break;
                }
                Step::Outcome(outcome) => on_outcome(&outcome, &self.web),
            }
        }
        let applied = Tally {
            fed: self.tally.fed - start.fed,
            hungry: self.tally.hungry - start.hungry,
            ignored: self.tally.ignored - start.ignored,
        };
        Ok(applied)
    }
}
