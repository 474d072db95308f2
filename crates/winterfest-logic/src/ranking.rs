//! Standings and medals, derived from the ledger on demand.
//!
//! Nothing here is stored; every call recomputes from the ledger.
//!
//! # Medal policy
//!
//! An event awards medals only once at least two players have a non-zero
//! score in it. Those scorers are ranked by score (ties broken by player
//! index) and the top three take gold, silver and bronze. A lone scorer
//! wins nothing: a podium of one is not a contest.

use serde::{Deserialize, Serialize};

use crate::constants::tournament::MIN_MEDAL_SCORERS;
use crate::ledger::TournamentLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MedalCount {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl MedalCount {
    pub fn total(&self) -> u32 {
        self.gold + self.silver + self.bronze
    }

    fn award(&mut self, place: usize) {
        match place {
            0 => self.gold += 1,
            1 => self.silver += 1,
            2 => self.bronze += 1,
            _ => {}
        }
    }
}

/// One row of the standings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub player: usize,
    pub total_score: u32,
    pub medals: MedalCount,
    pub events_completed: usize,
}

/// Players on the podium for `event`, best first. Empty when fewer than
/// two players scored.
pub fn event_podium(ledger: &TournamentLedger, event: usize, player_count: usize) -> Vec<usize> {
    let mut scorers: Vec<(usize, u32)> = (0..player_count)
        .map(|p| (p, ledger.score_of(p, event)))
        .filter(|&(_, score)| score > 0)
        .collect();
    if scorers.len() < MIN_MEDAL_SCORERS {
        return Vec::new();
    }
    // Stable: equal scores keep player order.
    scorers.sort_by(|a, b| b.1.cmp(&a.1));
    scorers.into_iter().take(3).map(|(p, _)| p).collect()
}

/// Medal tally for every player.
pub fn medal_counts(
    ledger: &TournamentLedger,
    player_count: usize,
    event_count: usize,
) -> Vec<MedalCount> {
    let mut counts = vec![MedalCount::default(); player_count];
    for event in 0..event_count {
        for (place, player) in event_podium(ledger, event, player_count)
            .into_iter()
            .enumerate()
        {
            counts[player].award(place);
        }
    }
    counts
}

/// Medal tally for one player.
pub fn medals_for(
    ledger: &TournamentLedger,
    player: usize,
    player_count: usize,
    event_count: usize,
) -> MedalCount {
    medal_counts(ledger, player_count, event_count)
        .get(player)
        .copied()
        .unwrap_or_default()
}

fn rankings(ledger: &TournamentLedger, player_count: usize, event_count: usize) -> Vec<PlayerRanking> {
    let medals = medal_counts(ledger, player_count, event_count);
    (0..player_count)
        .map(|player| PlayerRanking {
            player,
            total_score: ledger.total_score(player),
            medals: medals[player],
            events_completed: ledger.events_completed(player),
        })
        .collect()
}

/// Players sorted by total score, highest first. Ties keep player order.
pub fn standings(
    ledger: &TournamentLedger,
    player_count: usize,
    event_count: usize,
) -> Vec<PlayerRanking> {
    let mut rows = rankings(ledger, player_count, event_count);
    rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    rows
}

/// Olympic-style table: gold, then silver, then bronze, then total score.
/// Ties keep player order.
pub fn medal_table(
    ledger: &TournamentLedger,
    player_count: usize,
    event_count: usize,
) -> Vec<PlayerRanking> {
    let mut rows = rankings(ledger, player_count, event_count);
    rows.sort_by(|a, b| {
        (b.medals.gold, b.medals.silver, b.medals.bronze, b.total_score).cmp(&(
            a.medals.gold,
            a.medals.silver,
            a.medals.bronze,
            a.total_score,
        ))
    });
    rows
}
