//! Pure game logic for Winterfest.
//!
//! Everything that decides who wins lives here, independent of screens,
//! rendering, or sensor hardware. Functions take plain data and return
//! results, so the same code drives the app, the headless harness, and
//! the tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ai`] | Synthetic shooter for AI placeholder entrants |
//! | [`aim`] | Angular rate → normalized crosshair position |
//! | [`config`] | Session/tournament tuning, record policy |
//! | [`constants`] | Bounds, thresholds, ring values |
//! | [`events`] | Event catalogue and per-event rule sets |
//! | [`ledger`] | Per-player, per-event scores and attempts |
//! | [`persistence`] | Snapshot blob passed between screens |
//! | [`ranking`] | Standings, podiums, medal table |
//! | [`roster`] | Entrant names and countries, AI padding |
//! | [`scoring`] | Ring score × stability |
//! | [`sensor`] | Angular-rate samples |
//! | [`session`] | One attempt's aim → fire → cooldown state machine |
//! | [`stability`] | Ring-buffer steadiness filter |
//! | [`targets`] | Random target layouts |
//! | [`tournament`] | Controller tying sessions to the ledger |

pub mod ai;
pub mod aim;
pub mod config;
pub mod constants;
pub mod events;
pub mod ledger;
pub mod persistence;
pub mod ranking;
pub mod roster;
pub mod scoring;
pub mod sensor;
pub mod session;
pub mod stability;
pub mod targets;
pub mod tournament;
