//! The card table mini-game.
//!
//! A cut-down blackjack: cards are plain values 1–10, the dealer shows one
//! card and the player starts with two. The player hits or stands, and after
//! each round chooses whether to deal again.

use std::cmp::Ordering;

use crate::rng::DeterministicRng;

/// Highest total that does not bust.
pub const TARGET: u32 = 21;
/// The dealer keeps drawing while at or below this total.
pub const DEALER_STANDS_ABOVE: u32 = 16;
const CARD_FACES: u32 = 10;

/// Where the table is in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for `hit` or `stand`.
    Playing,
    /// Round over, waiting for `y` or `n`.
    AskAgain,
}

/// Result of feeding one input to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The player drew and the round goes on.
    Drew(Vec<String>),
    /// The round ended.
    RoundOver { player_won: bool, lines: Vec<String> },
    /// A fresh round was dealt.
    Dealt(Vec<String>),
    /// The player left the table.
    Leave,
    /// Input not valid in this phase; nothing changed.
    Rejected(String),
}

/// One game at the table, possibly spanning several rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blackjack {
    dealer: Vec<u32>,
    player: Vec<u32>,
    phase: Phase,
}

impl Blackjack {
    /// Sit down and deal the first round.
    pub fn deal(rng: &mut DeterministicRng) -> (Self, Vec<String>) {
        let mut table = Self {
            dealer: Vec::new(),
            player: Vec::new(),
            phase: Phase::Playing,
        };
        let lines = table.new_round(rng);
        (table, lines)
    }

    #[cfg(test)]
    pub(crate) const fn from_hands(dealer: Vec<u32>, player: Vec<u32>) -> Self {
        Self {
            dealer,
            player,
            phase: Phase::Playing,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_total(&self) -> u32 {
        self.player.iter().sum()
    }

    #[must_use]
    pub fn dealer_total(&self) -> u32 {
        self.dealer.iter().sum()
    }

    /// Apply one (already normalised) player input.
    pub fn play(&mut self, input: &str, rng: &mut DeterministicRng) -> Step {
        match (self.phase, input) {
            (Phase::Playing, "hit") => self.hit(rng),
            (Phase::Playing, "stand") => self.stand(rng),
            (Phase::Playing, _) => Step::Rejected("Say \"hit\" to draw or \"stand\" to hold.".into()),
            (Phase::AskAgain, "y") => Step::Dealt(self.new_round(rng)),
            (Phase::AskAgain, "n") => Step::Leave,
            (Phase::AskAgain, _) => Step::Rejected("Play again? y/n".into()),
        }
    }

    fn new_round(&mut self, rng: &mut DeterministicRng) -> Vec<String> {
        self.dealer = vec![rng.roll(CARD_FACES)];
        self.player = vec![rng.roll(CARD_FACES), rng.roll(CARD_FACES)];
        self.phase = Phase::Playing;
        vec![
            format!(
                "You have {} which adds up to {}.",
                hand(&self.player),
                self.player_total()
            ),
            format!("The dealer shows {}.", hand(&self.dealer)),
            "Say \"hit\" to draw or \"stand\" to hold.".to_string(),
        ]
    }

    fn hit(&mut self, rng: &mut DeterministicRng) -> Step {
        self.player.push(rng.roll(CARD_FACES));
        let total = self.player_total();
        let line = format!("You have {} which adds up to {total}.", hand(&self.player));
        match total.cmp(&TARGET) {
            Ordering::Greater => self.finish(false, vec![line, "Bust.".to_string()]),
            Ordering::Equal => self.finish(true, vec![line, "Twenty-one!".to_string()]),
            Ordering::Less => Step::Drew(vec![line]),
        }
    }

    fn stand(&mut self, rng: &mut DeterministicRng) -> Step {
        self.dealer.push(rng.roll(CARD_FACES));
        while self.dealer_total() <= DEALER_STANDS_ABOVE {
            self.dealer.push(rng.roll(CARD_FACES));
        }
        let dealer = self.dealer_total();
        let player = self.player_total();
        let player_won = dealer > TARGET || player >= dealer;

        let line = format!(
            "The dealer had {} ({dealer}), and you had {} ({player}).",
            hand(&self.dealer),
            hand(&self.player)
        );
        self.finish(player_won, vec![line])
    }

    fn finish(&mut self, player_won: bool, mut lines: Vec<String>) -> Step {
        self.phase = Phase::AskAgain;
        lines.push("Play again? y/n".to_string());
        tracing::debug!(
            player_won,
            player = self.player_total(),
            dealer = self.dealer_total(),
            "blackjack round over"
        );
        Step::RoundOver { player_won, lines }
    }
}

fn hand(cards: &[u32]) -> String {
    let faces: Vec<String> = cards.iter().map(u32::to_string).collect();
    format!("[{}]", faces.join(", "))
}
