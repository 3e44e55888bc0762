//! Board domain models: derived statistics, filter and sort configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::gifts::{Gift, GiftStatus};
use crate::people::Person;

/// Derived spending statistics for a single person.
///
/// `spent` sums the prices of gifts past the idea stage, `planned` sums
/// the prices of ideas, and `total_spent` is their sum. Unpriced gifts
/// contribute nothing to either bucket but still count in `gift_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStats {
    pub spent: Decimal,
    pub planned: Decimal,
    pub total_spent: Decimal,
    pub gift_count: usize,
}

/// A person together with their derived statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonWithStats {
    #[serde(flatten)]
    pub person: Person,
    #[serde(flatten)]
    pub stats: PersonStats,
}

/// Global totals across the whole board.
///
/// Money totals aggregate per-person stats, so gifts in the unassigned
/// lane do not contribute money; they do count toward `total_gifts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTotals {
    pub total_spent_real: Decimal,
    pub total_planned: Decimal,
    pub total_gifts: usize,
}

/// One person's column on the board, with their gifts newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLane {
    #[serde(flatten)]
    pub person: PersonWithStats,
    pub gifts: Vec<Gift>,
}

/// The grouped board: one lane per person plus the unassigned lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub lanes: Vec<BoardLane>,
    pub unassigned: Vec<Gift>,
    pub totals: BoardTotals,
}

/// Filter for the flat list view. All conditions are conjunctive; an
/// empty/absent condition always passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftFilter {
    /// Case-insensitive substring matched against name or description.
    pub search: String,
    pub person_id: Option<String>,
    pub status: Option<GiftStatus>,
}

/// Sort key for the flat list view.
///
/// `PersonName` is derived from the embedded person (empty string when
/// unassigned); the others are natural orderings of the gift's own fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Price,
    Status,
    CreatedAt,
    PersonName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current sort selection for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest gifts first, matching the default list ordering.
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// Header-click semantics: clicking the active key flips the
    /// direction, clicking a new key resets to ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}
