//! Tournament ledger: every player's score and attempt count per event.
//!
//! A dense `player_count × event_count` grid. Writes are validated against
//! the grid bounds; reads never fail and report 0 for empty or
//! out-of-range cells. Cells are never removed. What a second write to the
//! same cell keeps is decided by the ledger's [`RecordPolicy`].

use serde::{Deserialize, Serialize};

use crate::config::RecordPolicy;

/// One `(player, event)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerCell {
    pub score: u32,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentLedger {
    player_count: usize,
    event_count: usize,
    policy: RecordPolicy,
    cells: Vec<Option<LedgerCell>>,
}

impl TournamentLedger {
    pub fn new(player_count: usize, event_count: usize, policy: RecordPolicy) -> Self {
        Self {
            player_count,
            event_count,
            policy,
            cells: vec![None; player_count * event_count],
        }
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn policy(&self) -> RecordPolicy {
        self.policy
    }

    /// True when the cell grid matches the declared dimensions. Only a
    /// deserialized ledger can fail this.
    pub fn is_consistent(&self) -> bool {
        self.player_count
            .checked_mul(self.event_count)
            .is_some_and(|n| n == self.cells.len())
    }

    fn slot(&self, player: usize, event: usize) -> Result<usize, LedgerError> {
        if player >= self.player_count {
            return Err(LedgerError::PlayerOutOfRange {
                player,
                player_count: self.player_count,
            });
        }
        if event >= self.event_count {
            return Err(LedgerError::EventOutOfRange {
                event,
                event_count: self.event_count,
            });
        }
        Ok(player * self.event_count + event)
    }

    /// Record a finished attempt. The attempt counter always increments;
    /// the stored score follows the record policy. Returns the score now
    /// held in the cell.
    pub fn record_result(&mut self, player: usize, event: usize, score: u32) -> Result<u32, LedgerError> {
        let slot = self.slot(player, event).map_err(|e| {
            log::warn!("rejected ledger write: {}", e);
            e
        })?;
        let existing = self.cells.get(slot).copied().flatten();
        let stored = self.policy.resolve(existing.map(|c| c.score), score);
        let attempts = existing.map_or(0, |c| c.attempts).saturating_add(1);
        let cell = self.cells.get_mut(slot).ok_or(LedgerError::CellMissing { slot })?;
        *cell = Some(LedgerCell {
            score: stored,
            attempts,
        });
        log::info!(
            "ledger p{} e{}: recorded {} (kept {}, attempt {})",
            player,
            event,
            score,
            stored,
            attempts
        );
        Ok(stored)
    }

    pub fn cell(&self, player: usize, event: usize) -> Option<LedgerCell> {
        self.slot(player, event)
            .ok()
            .and_then(|i| self.cells.get(i).copied().flatten())
    }

    /// Score for a cell, 0 when absent.
    pub fn score_of(&self, player: usize, event: usize) -> u32 {
        self.cell(player, event).map_or(0, |c| c.score)
    }

    pub fn attempts_of(&self, player: usize, event: usize) -> u32 {
        self.cell(player, event).map_or(0, |c| c.attempts)
    }

    pub fn has_result(&self, player: usize, event: usize) -> bool {
        self.cell(player, event).is_some()
    }

    /// Sum of a player's scores over every event, saturating at `u32::MAX`.
    pub fn total_score(&self, player: usize) -> u32 {
        (0..self.event_count)
            .map(|e| self.score_of(player, e))
            .fold(0u32, u32::saturating_add)
    }

    /// Events the player has at least one recorded attempt in.
    pub fn events_completed(&self, player: usize) -> usize {
        (0..self.event_count)
            .filter(|&e| self.has_result(player, e))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    PlayerOutOfRange { player: usize, player_count: usize },
    EventOutOfRange { event: usize, event_count: usize },
    /// The grid is shorter than its dimensions claim.
    CellMissing { slot: usize },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::PlayerOutOfRange {
                player,
                player_count,
            } => write!(f, "Player {} out of range (0..{})", player, player_count),
            LedgerError::EventOutOfRange { event, event_count } => {
                write!(f, "Event {} out of range (0..{})", event, event_count)
            }
            LedgerError::CellMissing { slot } => write!(f, "Ledger cell {} missing", slot),
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_then_read_back() {
        let mut l = TournamentLedger::new(4, 10, RecordPolicy::Overwrite);
        l.record_result(2, 7, 345).unwrap();
        assert_eq!(l.score_of(2, 7), 345);
        assert_eq!(l.attempts_of(2, 7), 1);
    }

    #[test]
    fn test_absent_cells_default_to_zero() {
        let l = TournamentLedger::new(4, 10, RecordPolicy::Overwrite);
        assert_eq!(l.score_of(0, 0), 0);
        assert_eq!(l.attempts_of(3, 9), 0);
        assert_eq!(l.score_of(99, 99), 0);
        assert!(l.cell(0, 0).is_none());
    }

    #[test]
    fn test_out_of_range_writes_rejected() {
        let mut l = TournamentLedger::new(4, 10, RecordPolicy::Overwrite);
        assert_eq!(
            l.record_result(4, 0, 10),
            Err(LedgerError::PlayerOutOfRange {
                player: 4,
                player_count: 4
            })
        );
        assert_eq!(
            l.record_result(0, 10, 10),
            Err(LedgerError::EventOutOfRange {
                event: 10,
                event_count: 10
            })
        );
        assert_eq!(l.total_score(0), 0);
    }

    #[test]
    fn test_overwrite_policy_last_write_wins() {
        let mut l = TournamentLedger::new(2, 2, RecordPolicy::Overwrite);
        l.record_result(0, 0, 300).unwrap();
        assert_eq!(l.record_result(0, 0, 120).unwrap(), 120);
        assert_eq!(l.cell(0, 0), Some(LedgerCell { score: 120, attempts: 2 }));
    }

    #[test]
    fn test_keep_best_policy() {
        let mut l = TournamentLedger::new(2, 2, RecordPolicy::KeepBest);
        l.record_result(1, 1, 300).unwrap();
        l.record_result(1, 1, 120).unwrap();
        l.record_result(1, 1, 310).unwrap();
        assert_eq!(l.cell(1, 1), Some(LedgerCell { score: 310, attempts: 3 }));
    }

    #[test]
    fn test_keep_first_policy() {
        let mut l = TournamentLedger::new(2, 2, RecordPolicy::KeepFirst);
        l.record_result(1, 0, 50).unwrap();
        l.record_result(1, 0, 450).unwrap();
        assert_eq!(l.cell(1, 0), Some(LedgerCell { score: 50, attempts: 2 }));
    }

    #[test]
    fn test_totals_and_completed() {
        let mut l = TournamentLedger::new(2, 3, RecordPolicy::Overwrite);
        l.record_result(0, 0, 100).unwrap();
        l.record_result(0, 2, 50).unwrap();
        l.record_result(1, 1, 0).unwrap();
        assert_eq!(l.total_score(0), 150);
        assert_eq!(l.events_completed(0), 2);
        assert_eq!(l.total_score(1), 0);
        assert_eq!(l.events_completed(1), 1);
    }

    #[test]
    fn test_total_score_saturates() {
        let mut l = TournamentLedger::new(1, 2, RecordPolicy::Overwrite);
        l.record_result(0, 0, u32::MAX).unwrap();
        l.record_result(0, 1, 1).unwrap();
        assert_eq!(l.total_score(0), u32::MAX);
    }

    #[test]
    fn test_short_grid_reads_zero_and_rejects_writes() {
        let mut l = TournamentLedger::new(2, 2, RecordPolicy::Overwrite);
        l.cells.truncate(1);
        assert!(!l.is_consistent());
        assert_eq!(l.score_of(1, 1), 0);
        assert_eq!(l.total_score(1), 0);
        assert_eq!(
            l.record_result(1, 1, 10),
            Err(LedgerError::CellMissing { slot: 3 })
        );
        assert!(TournamentLedger::new(4, 10, RecordPolicy::KeepBest).is_consistent());
    }
}
