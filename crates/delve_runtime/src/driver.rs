//! Wall-clock pacing.
//!
//! The game itself has no notion of time: ticks and combat rounds happen
//! when someone calls [`Game::tick`] and [`Game::run_round`]. The driver
//! owns the deadlines and calls them when they pass. Callers pass `now`
//! explicitly, so the pacing can be tested without sleeping.

use std::time::{Duration, Instant};

use delve_engine::RoundTicket;

use crate::config::GameConfig;
use crate::game::Game;

/// Deadlines for the next world tick and the next combat round.
#[derive(Clone, Debug)]
pub struct RealtimeDriver {
    tick_interval: Duration,
    round_interval: Duration,
    next_tick: Instant,
    round: Option<(RoundTicket, Instant)>,
}

impl RealtimeDriver {
    /// Creates a driver whose first tick is one interval after `now`.
    #[must_use]
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        Self {
            tick_interval: config.tick_interval,
            round_interval: config.round_interval,
            next_tick: now + config.tick_interval,
            round: None,
        }
    }

    /// Runs every deadline that has passed and returns the produced text.
    ///
    /// The driver learns about a fight only when it pumps, so a round is
    /// due one interval after the first pump that sees its ticket. Pump
    /// right after each command, as [`Repl`](crate::Repl) does, to time the
    /// first round from the command that started the fight. Later pumps
    /// never push a known deadline back. The same text is also emitted on
    /// the game's message bus.
    pub fn pump(&mut self, game: &mut Game, now: Instant) -> Vec<String> {
        let mut out = Vec::new();
        self.track_round(game, now);

        if let Some((ticket, due)) = self.round {
            if now >= due {
                self.round = None;
                out.extend(game.run_round(ticket));
                self.track_round(game, now);
            }
        }

        if now >= self.next_tick {
            out.extend(game.tick());
            // Missed ticks are dropped rather than replayed in a burst.
            self.next_tick = now + self.tick_interval;
        }
        out
    }

    /// Notices a new or vanished combat round.
    fn track_round(&mut self, game: &Game, now: Instant) {
        match (game.pending_round(), self.round) {
            (Some(ticket), Some((current, _))) if ticket == current => {}
            (Some(ticket), _) => self.round = Some((ticket, now + self.round_interval)),
            (None, _) => self.round = None,
        }
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        match self.round {
            Some((_, due)) => due.min(self.next_tick),
            None => self.next_tick,
        }
    }

    /// How long until something is due, zero if already overdue.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_deadline().saturating_duration_since(now)
    }
}
