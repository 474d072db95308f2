//! Registered entrants.
//!
//! Names and country labels come in as parallel lists from registration.
//! The roster is always padded to the configured player count with AI
//! placeholders, so every ledger row has an entrant behind it.

use serde::{Deserialize, Serialize};

use crate::constants::tournament::PLACEHOLDER_COUNTRY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub country: String,
    pub is_ai: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    entrants: Vec<Entrant>,
}

impl Roster {
    /// Build a roster of exactly `slots` entrants.
    ///
    /// Blank names become "Player n", blank or missing countries get the
    /// placeholder label, and unfilled slots become "AI 1", "AI 2", ….
    /// Registrations beyond `slots` are dropped.
    pub fn from_registration<S: AsRef<str>>(names: &[S], countries: &[S], slots: usize) -> Self {
        let mut entrants: Vec<Entrant> = names
            .iter()
            .take(slots)
            .enumerate()
            .map(|(i, name)| {
                let name = name.as_ref().trim();
                let country = countries
                    .get(i)
                    .map(|c| c.as_ref().trim())
                    .filter(|c| !c.is_empty())
                    .unwrap_or(PLACEHOLDER_COUNTRY);
                Entrant {
                    name: if name.is_empty() {
                        placeholder_name(i)
                    } else {
                        name.to_string()
                    },
                    country: country.to_string(),
                    is_ai: false,
                }
            })
            .collect();

        if names.len() > slots {
            log::warn!("{} registrations for {} slots, extras dropped", names.len(), slots);
        }

        let mut ai_number = 1;
        while entrants.len() < slots {
            entrants.push(Entrant {
                name: format!("AI {}", ai_number),
                country: PLACEHOLDER_COUNTRY.to_string(),
                is_ai: true,
            });
            ai_number += 1;
        }

        Self { entrants }
    }

    /// All-AI roster.
    pub fn ai_only(slots: usize) -> Self {
        Self::from_registration::<&str>(&[], &[], slots)
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn get(&self, player: usize) -> Option<&Entrant> {
        self.entrants.get(player)
    }

    /// Entrant name, or "Player n" for an unknown slot.
    pub fn name(&self, player: usize) -> String {
        self.get(player)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| placeholder_name(player))
    }

    pub fn country(&self, player: usize) -> &str {
        self.get(player)
            .map(|e| e.country.as_str())
            .unwrap_or(PLACEHOLDER_COUNTRY)
    }

    pub fn is_ai(&self, player: usize) -> bool {
        self.get(player).is_some_and(|e| e.is_ai)
    }

    pub fn human_count(&self) -> usize {
        self.entrants.iter().filter(|e| !e.is_ai).count()
    }
}

fn placeholder_name(player: usize) -> String {
    format!("Player {}", player + 1)
}
