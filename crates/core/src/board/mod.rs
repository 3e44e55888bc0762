//! Board module - derived statistics, filtering, sorting, the grouped
//! board view, and the drag-and-drop reassignment state machine.
//!
//! Everything in here is computed from in-memory Person/Gift collections.
//! Nothing is persisted; the numbers are recomputable at any time from the
//! stored records, which stay the single source of truth.

mod board_model;
mod board_service;
pub mod dragdrop;
mod store;

#[cfg(test)]
mod board_service_tests;

pub use board_model::{
    BoardLane, BoardTotals, BoardView, GiftFilter, PersonStats, PersonWithStats, SortConfig,
    SortDirection, SortKey,
};
pub use board_service::{
    board_totals, build_board, compute_person_stats, filter_gifts, people_with_stats, sort_gifts,
};
pub use store::{BoardStore, FetchCycle};
