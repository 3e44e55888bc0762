//! Client-side view model for the board and list views.
//!
//! The store holds the last-received people and gifts snapshots, the
//! filter/sort selection, and the drag controller. Derived statistics are
//! recomputed from the snapshots on demand and are never authoritative:
//! the server recomputes the same numbers and a re-fetch replaces local
//! state wholesale.
//!
//! Fetches are generation-stamped. Each fetch cycle takes the next
//! generation before issuing its requests; a response arriving for a
//! superseded generation is discarded, so the displayed state always
//! reflects the most recent mutation rather than the most recently
//! arrived response.

use log::debug;

use super::board_model::{BoardView, GiftFilter, PersonWithStats, SortConfig, SortKey};
use super::board_service;
use super::dragdrop::{DragController, DropOutcome, DropTarget, Reconcile};
use crate::gifts::{Gift, GiftStatus, GiftWithPerson};
use crate::people::Person;

/// Token for one fetch cycle. Both responses of the cycle (people, gifts)
/// are ingested under the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchCycle(u64);

#[derive(Debug, Default)]
pub struct BoardStore {
    people: Vec<Person>,
    gifts: Vec<GiftWithPerson>,
    filter: GiftFilter,
    sort: SortConfig,
    drag: DragController,
    next_generation: u64,
    people_generation: u64,
    gifts_generation: u64,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- fetch / ingest ----

    /// Starts a fetch cycle. Responses must be ingested with the returned
    /// token; tokens from earlier cycles lose against later ones.
    pub fn begin_fetch(&mut self) -> FetchCycle {
        self.next_generation += 1;
        FetchCycle(self.next_generation)
    }

    /// Replaces the people snapshot. Returns false when the response
    /// belongs to a superseded cycle and was discarded.
    pub fn ingest_people(&mut self, cycle: FetchCycle, people: Vec<Person>) -> bool {
        if cycle.0 < self.people_generation {
            debug!(
                "Discarding stale people response (generation {} < {})",
                cycle.0, self.people_generation
            );
            return false;
        }
        self.people_generation = cycle.0;
        self.people = people;
        true
    }

    /// Replaces the gifts snapshot. Returns false when the response
    /// belongs to a superseded cycle and was discarded.
    pub fn ingest_gifts(&mut self, cycle: FetchCycle, gifts: Vec<GiftWithPerson>) -> bool {
        if cycle.0 < self.gifts_generation {
            debug!(
                "Discarding stale gifts response (generation {} < {})",
                cycle.0, self.gifts_generation
            );
            return false;
        }
        self.gifts_generation = cycle.0;
        self.gifts = gifts;
        true
    }

    // ---- derived views ----

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn gifts(&self) -> &[GiftWithPerson] {
        &self.gifts
    }

    fn bare_gifts(&self) -> Vec<Gift> {
        self.gifts.iter().map(|g| g.gift.clone()).collect()
    }

    /// People with stats recomputed from the current snapshots.
    pub fn people_with_stats(&self) -> Vec<PersonWithStats> {
        board_service::people_with_stats(&self.people, &self.bare_gifts())
    }

    /// The grouped board view.
    pub fn board(&self) -> BoardView {
        board_service::build_board(&self.people, &self.bare_gifts())
    }

    /// The flat list view: filter applied, then the stable sort.
    pub fn visible_gifts(&self) -> Vec<GiftWithPerson> {
        let mut visible = board_service::filter_gifts(&self.gifts, &self.filter);
        board_service::sort_gifts(&mut visible, &self.sort);
        visible
    }

    // ---- filter / sort ----

    pub fn filter(&self) -> &GiftFilter {
        &self.filter
    }

    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_person_filter(&mut self, person_id: Option<String>) {
        self.filter.person_id = person_id;
    }

    pub fn set_status_filter(&mut self, status: Option<GiftStatus>) {
        self.filter.status = status;
    }

    /// Header-click sorting: same key toggles direction, new key resets
    /// to ascending.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    // ---- drag and drop ----

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn drag_start(&mut self, gift_id: impl Into<String>) {
        self.drag.drag_start(gift_id);
    }

    pub fn drag_cancel(&mut self) {
        self.drag.drag_cancel();
    }

    /// Ends the active drag over a target. On a resolved reassignment the
    /// optimistic patch is applied to the local snapshot immediately; the
    /// caller must then persist the returned command and report back via
    /// [`BoardStore::resolve_reassign`].
    pub fn drop(&mut self, target: DropTarget) -> DropOutcome {
        let outcome = self.drag.drop(target, &self.gifts, &self.people);
        if let DropOutcome::Reassign(command) = &outcome {
            let new_person = self
                .people
                .iter()
                .find(|p| p.id == command.person_id)
                .cloned();
            if let Some(entry) = self.gifts.iter_mut().find(|g| g.gift.id == command.gift_id) {
                entry.gift.person_id = Some(command.person_id.clone());
                entry.person = new_person;
            }
        }
        outcome
    }

    /// Reports the outcome of the persisted reassignment command. The
    /// returned scope says what to re-fetch: on failure only gifts are
    /// re-fetched, which discards the optimistic patch; there is no other
    /// rollback.
    pub fn resolve_reassign(&mut self, success: bool) -> Option<Reconcile> {
        self.drag.resolve(success)
    }
}
