//! Tournament controller.
//!
//! Owns the roster, the ledger and a seeded generator, hands out event
//! sessions, and writes their results back. Only one session is expected
//! to be live at a time; the controller does no locking.
//!
//! ```
//! use winterfest_logic::ai::AiMarksman;
//! use winterfest_logic::config::TournamentConfig;
//! use winterfest_logic::events::EventKind;
//! use winterfest_logic::tournament::Tournament;
//!
//! let mut t = Tournament::from_registration(TournamentConfig::default(), &["Ada"], &["NOR"], 7).unwrap();
//! for player in 0..t.roster().len() {
//!     t.play_ai_attempt(player, EventKind::Biathlon, &AiMarksman::new(0.8)).unwrap();
//! }
//! assert_eq!(t.standings().len(), 4);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::AiMarksman;
use crate::config::{ConfigError, TournamentConfig};
use crate::events::{rules_for, EventError, EventKind};
use crate::ledger::{LedgerError, TournamentLedger};
use crate::persistence::{SaveError, TournamentSnapshot};
use crate::ranking::{self, MedalCount, PlayerRanking};
use crate::roster::Roster;
use crate::session::EventSession;

#[derive(Debug)]
pub struct Tournament {
    config: TournamentConfig,
    roster: Roster,
    ledger: TournamentLedger,
    rng: StdRng,
}

impl Tournament {
    /// New tournament. A roster of the wrong size is rebuilt from its human
    /// entrants and re-padded to the configured player count.
    pub fn new(config: TournamentConfig, roster: Roster, seed: u64) -> Result<Self, TournamentError> {
        config.validate()?;
        let roster = if roster.len() == config.player_count {
            roster
        } else {
            let humans: Vec<_> = roster.entrants().iter().filter(|e| !e.is_ai).collect();
            let names: Vec<&str> = humans.iter().map(|e| e.name.as_str()).collect();
            let countries: Vec<&str> = humans.iter().map(|e| e.country.as_str()).collect();
            Roster::from_registration(&names, &countries, config.player_count)
        };
        let ledger = TournamentLedger::new(config.player_count, config.event_count, config.record_policy);
        log::info!(
            "tournament created: {} players ({} human), {} events, {:?}",
            config.player_count,
            roster.human_count(),
            config.event_count,
            config.record_policy
        );
        Ok(Self {
            config,
            roster,
            ledger,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_registration<S: AsRef<str>>(
        config: TournamentConfig,
        names: &[S],
        countries: &[S],
        seed: u64,
    ) -> Result<Self, TournamentError> {
        let roster = Roster::from_registration(names, countries, config.player_count);
        Self::new(config, roster, seed)
    }

    /// Resume from a snapshot. The generator is not part of the snapshot,
    /// so the caller supplies a fresh seed.
    pub fn from_snapshot(snapshot: TournamentSnapshot, seed: u64) -> Result<Self, TournamentError> {
        let snapshot = snapshot.check()?;
        Ok(Self {
            config: snapshot.config,
            roster: snapshot.roster,
            ledger: snapshot.ledger,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot::new(self.config.clone(), self.roster.clone(), self.ledger.clone())
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn ledger(&self) -> &TournamentLedger {
        &self.ledger
    }

    fn check_slot(&self, player: usize, kind: EventKind) -> Result<(), TournamentError> {
        if player >= self.config.player_count {
            return Err(LedgerError::PlayerOutOfRange {
                player,
                player_count: self.config.player_count,
            }
            .into());
        }
        if kind.index() >= self.config.event_count {
            return Err(LedgerError::EventOutOfRange {
                event: kind.index(),
                event_count: self.config.event_count,
            }
            .into());
        }
        Ok(())
    }

    /// Build and start a session for `player` in `kind`.
    pub fn start_attempt(&mut self, player: usize, kind: EventKind) -> Result<EventSession, TournamentError> {
        self.check_slot(player, kind)?;
        let rules = rules_for(kind, &self.config.session)?;
        let session_rng = StdRng::seed_from_u64(self.rng.gen());
        let mut session = EventSession::with_rng(rules, self.config.session.clone(), session_rng);
        session.start();
        log::debug!("{} starts {}", self.roster.name(player), kind);
        Ok(session)
    }

    /// Write a finished session's score into the ledger. Returns the score
    /// the ledger now holds for that cell.
    pub fn record_attempt(&mut self, player: usize, session: &EventSession) -> Result<u32, TournamentError> {
        let kind = session.kind();
        self.check_slot(player, kind)?;
        if !session.is_complete() {
            return Err(TournamentError::SessionIncomplete {
                kind,
                targets_remaining: session.targets_remaining(),
            });
        }
        let stored = self.ledger.record_result(player, kind.index(), session.score())?;
        log::info!(
            "{} ({}) scored {} in {}",
            self.roster.name(player),
            self.roster.country(player),
            session.score(),
            kind
        );
        Ok(stored)
    }

    /// Let `marksman` shoot a whole attempt for `player` and record it.
    pub fn play_ai_attempt(
        &mut self,
        player: usize,
        kind: EventKind,
        marksman: &AiMarksman,
    ) -> Result<u32, TournamentError> {
        let mut session = self.start_attempt(player, kind)?;
        marksman.play(&mut session, &mut self.rng);
        self.record_attempt(player, &session)
    }

    pub fn standings(&self) -> Vec<PlayerRanking> {
        ranking::standings(&self.ledger, self.config.player_count, self.config.event_count)
    }

    pub fn medal_table(&self) -> Vec<PlayerRanking> {
        ranking::medal_table(&self.ledger, self.config.player_count, self.config.event_count)
    }

    pub fn medals_for(&self, player: usize) -> MedalCount {
        ranking::medals_for(
            &self.ledger,
            player,
            self.config.player_count,
            self.config.event_count,
        )
    }
}

#[derive(Debug)]
pub enum TournamentError {
    Config(ConfigError),
    Ledger(LedgerError),
    Event(EventError),
    Save(SaveError),
    SessionIncomplete {
        kind: EventKind,
        targets_remaining: usize,
    },
}

impl From<ConfigError> for TournamentError {
    fn from(e: ConfigError) -> Self {
        TournamentError::Config(e)
    }
}

impl From<LedgerError> for TournamentError {
    fn from(e: LedgerError) -> Self {
        TournamentError::Ledger(e)
    }
}

impl From<EventError> for TournamentError {
    fn from(e: EventError) -> Self {
        TournamentError::Event(e)
    }
}

impl From<SaveError> for TournamentError {
    fn from(e: SaveError) -> Self {
        TournamentError::Save(e)
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Config(e) => write!(f, "Config error: {}", e),
            TournamentError::Ledger(e) => write!(f, "Ledger error: {}", e),
            TournamentError::Event(e) => write!(f, "Event error: {}", e),
            TournamentError::Save(e) => write!(f, "Snapshot error: {}", e),
            TournamentError::SessionIncomplete {
                kind,
                targets_remaining,
            } => write!(
                f,
                "{} session still has {} targets remaining",
                kind, targets_remaining
            ),
        }
    }
}

impl std::error::Error for TournamentError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::AngularSample;

    fn tournament() -> Tournament {
        Tournament::from_registration(TournamentConfig::default(), &["Ada", "Linus"], &["NOR", "FIN"], 11)
            .unwrap()
    }

    #[test]
    fn test_roster_padded() {
        let t = tournament();
        assert_eq!(t.roster().len(), 4);
        assert!(t.roster().is_ai(3));
    }

    #[test]
    fn test_short_roster_repadded() {
        let t = Tournament::new(TournamentConfig::default(), Roster::ai_only(1), 1).unwrap();
        assert_eq!(t.roster().len(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TournamentConfig {
            player_count: 0,
            ..TournamentConfig::default()
        };
        assert!(matches!(
            Tournament::new(config, Roster::default(), 1),
            Err(TournamentError::Config(ConfigError::ZeroCount("player_count")))
        ));
    }

    #[test]
    fn test_unsupported_event_rejected() {
        let mut t = tournament();
        assert!(matches!(
            t.start_attempt(0, EventKind::Curling),
            Err(TournamentError::Event(EventError::Unsupported(EventKind::Curling)))
        ));
    }

    #[test]
    fn test_player_out_of_range() {
        let mut t = tournament();
        assert!(matches!(
            t.start_attempt(4, EventKind::Biathlon),
            Err(TournamentError::Ledger(LedgerError::PlayerOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_event_beyond_calendar_rejected() {
        let config = TournamentConfig {
            event_count: 1,
            ..TournamentConfig::default()
        };
        let mut t = Tournament::new(config, Roster::ai_only(4), 1).unwrap();
        let mut session = t.start_attempt(0, EventKind::Biathlon).unwrap();
        AiMarksman::new(0.5).play(&mut session, &mut StdRng::seed_from_u64(1));
        assert!(t.record_attempt(0, &session).is_ok());
        assert!(matches!(
            t.start_attempt(0, EventKind::SkiJump),
            Err(TournamentError::Ledger(LedgerError::EventOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_incomplete_session_not_recorded() {
        let mut t = tournament();
        let session = t.start_attempt(0, EventKind::Biathlon).unwrap();
        assert!(matches!(
            t.record_attempt(0, &session),
            Err(TournamentError::SessionIncomplete {
                targets_remaining: 5,
                ..
            })
        ));
        assert_eq!(t.ledger().attempts_of(0, 0), 0);
    }

    #[test]
    fn test_manual_session_recorded() {
        let mut t = tournament();
        let mut session = t.start_attempt(1, EventKind::Biathlon).unwrap();
        while !session.is_complete() {
            session.observe_sample(AngularSample::ZERO);
            session.fire();
            session.advance();
        }
        let stored = t.record_attempt(1, &session).unwrap();
        assert_eq!(stored, session.score());
        assert_eq!(t.ledger().score_of(1, EventKind::Biathlon.index()), session.score());
        assert_eq!(t.ledger().attempts_of(1, 0), 1);
    }

    #[test]
    fn test_same_seed_same_tournament() {
        let run = || {
            let mut t = Tournament::new(TournamentConfig::default(), Roster::ai_only(4), 2024).unwrap();
            for p in 0..4 {
                t.play_ai_attempt(p, EventKind::Biathlon, &AiMarksman::new(0.6)).unwrap();
            }
            t.standings()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_snapshot_resume() {
        let mut t = tournament();
        t.play_ai_attempt(0, EventKind::Biathlon, &AiMarksman::new(0.9)).unwrap();
        let snap = t.snapshot();
        let resumed = Tournament::from_snapshot(snap, 5).unwrap();
        assert_eq!(resumed.ledger(), t.ledger());
        assert_eq!(resumed.roster(), t.roster());
        assert_eq!(resumed.standings(), t.standings());
    }

    #[test]
    fn test_inconsistent_snapshot_rejected() {
        let mut snap = tournament().snapshot();
        snap.ledger = TournamentLedger::new(2, 10, snap.config.record_policy);
        assert!(matches!(
            Tournament::from_snapshot(snap, 1),
            Err(TournamentError::Save(SaveError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_snapshot_with_diverging_policy_rejected() {
        let mut snap = tournament().snapshot();
        snap.config.record_policy = crate::config::RecordPolicy::KeepBest;
        assert!(matches!(
            Tournament::from_snapshot(snap, 1),
            Err(TournamentError::Save(SaveError::PolicyMismatch { .. }))
        ));
    }
}
