//! Tournament snapshots carried between screens.
//!
//! Uses bincode for the compact blob handed from screen to screen, and
//! serde_json when a readable dump is wanted (debugging, the harness).
//! Loading checks the format version and that roster, ledger and config
//! agree on the player and event counts.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, RecordPolicy, TournamentConfig};
use crate::ledger::TournamentLedger;
use crate::roster::Roster;

/// Version number for the snapshot format (increment when format changes)
const SNAPSHOT_VERSION: u32 = 1;

/// Everything a screen needs to resume the tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub version: u32,
    pub config: TournamentConfig,
    pub roster: Roster,
    pub ledger: TournamentLedger,
}

impl TournamentSnapshot {
    pub fn new(config: TournamentConfig, roster: Roster, ledger: TournamentLedger) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            config,
            roster,
            ledger,
        }
    }

    /// Validate version and shape.
    pub(crate) fn check(self) -> Result<Self, SaveError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }
        self.config.validate()?;
        let players = self.config.player_count;
        let events = self.config.event_count;
        if self.roster.len() != players
            || self.ledger.player_count() != players
            || self.ledger.event_count() != events
            || !self.ledger.is_consistent()
        {
            return Err(SaveError::ShapeMismatch {
                players,
                events,
                roster: self.roster.len(),
                ledger: (self.ledger.player_count(), self.ledger.event_count()),
            });
        }
        if self.ledger.policy() != self.config.record_policy {
            return Err(SaveError::PolicyMismatch {
                config: self.config.record_policy,
                ledger: self.ledger.policy(),
            });
        }
        Ok(self)
    }
}

/// Write a snapshot as bincode.
pub fn save_snapshot<W: Write>(writer: W, snapshot: &TournamentSnapshot) -> Result<(), SaveError> {
    bincode::serialize_into(writer, snapshot)?;
    log::info!(
        "saved tournament snapshot ({} players, {} events)",
        snapshot.config.player_count,
        snapshot.config.event_count
    );
    Ok(())
}

/// Read and validate a bincode snapshot.
pub fn load_snapshot<R: Read>(reader: R) -> Result<TournamentSnapshot, SaveError> {
    let snapshot: TournamentSnapshot = bincode::deserialize_from(reader)?;
    let snapshot = snapshot.check()?;
    log::info!("loaded tournament snapshot v{}", snapshot.version);
    Ok(snapshot)
}

pub fn to_bytes(snapshot: &TournamentSnapshot) -> Result<Vec<u8>, SaveError> {
    let mut buf = Vec::new();
    save_snapshot(&mut buf, snapshot)?;
    Ok(buf)
}

pub fn from_bytes(bytes: &[u8]) -> Result<TournamentSnapshot, SaveError> {
    load_snapshot(bytes)
}

pub fn to_json(snapshot: &TournamentSnapshot) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> Result<TournamentSnapshot, SaveError> {
    let snapshot: TournamentSnapshot = serde_json::from_str(json)?;
    snapshot.check()
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch {
        expected: u32,
        found: u32,
    },
    Config(ConfigError),
    ShapeMismatch {
        players: usize,
        events: usize,
        roster: usize,
        ledger: (usize, usize),
    },
    PolicyMismatch {
        config: RecordPolicy,
        ledger: RecordPolicy,
    },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl From<ConfigError> for SaveError {
    fn from(e: ConfigError) -> Self {
        SaveError::Config(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::Config(e) => write!(f, "Invalid config in snapshot: {}", e),
            SaveError::ShapeMismatch {
                players,
                events,
                roster,
                ledger,
            } => write!(
                f,
                "Snapshot shape mismatch: config {}x{}, roster {}, ledger {}x{}",
                players, events, roster, ledger.0, ledger.1
            ),
            SaveError::PolicyMismatch { config, ledger } => write!(
                f,
                "Snapshot record policy mismatch: config {:?}, ledger {:?}",
                config, ledger
            ),
        }
    }
}

impl std::error::Error for SaveError {}
