//! Pure computations over Person/Gift collections: statistics, the
//! grouped board, filtering, and sorting.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::board_model::{
    BoardLane, BoardTotals, BoardView, GiftFilter, PersonStats, PersonWithStats, SortConfig,
    SortDirection, SortKey,
};
use crate::gifts::{Gift, GiftStatus, GiftWithPerson};
use crate::people::Person;

/// Computes the spending statistics for one person from the full gift
/// collection.
pub fn compute_person_stats(person_id: &str, gifts: &[Gift]) -> PersonStats {
    let mut stats = PersonStats::default();
    for gift in gifts
        .iter()
        .filter(|g| g.person_id.as_deref() == Some(person_id))
    {
        stats.gift_count += 1;
        let price = gift.price.unwrap_or(Decimal::ZERO);
        if gift.status == GiftStatus::Idea {
            stats.planned += price;
        } else {
            stats.spent += price;
        }
    }
    stats.total_spent = stats.spent + stats.planned;
    stats
}

/// Attaches derived statistics to every person, preserving input order.
pub fn people_with_stats(people: &[Person], gifts: &[Gift]) -> Vec<PersonWithStats> {
    people
        .iter()
        .map(|person| PersonWithStats {
            person: person.clone(),
            stats: compute_person_stats(&person.id, gifts),
        })
        .collect()
}

/// Global totals. Money aggregates the per-person stats; the gift count
/// covers every gift including the unassigned lane.
pub fn board_totals(people: &[PersonWithStats], gifts: &[Gift]) -> BoardTotals {
    let mut totals = BoardTotals {
        total_gifts: gifts.len(),
        ..Default::default()
    };
    for p in people {
        totals.total_spent_real += p.stats.spent;
        totals.total_planned += p.stats.planned;
    }
    totals
}

/// Builds the grouped board view: one lane per person (input order, which
/// the repository keeps name-ascending) plus the unassigned lane, gifts
/// newest first within each lane.
pub fn build_board(people: &[Person], gifts: &[Gift]) -> BoardView {
    let with_stats = people_with_stats(people, gifts);
    let totals = board_totals(&with_stats, gifts);

    let lanes = with_stats
        .into_iter()
        .map(|person| {
            let mut lane_gifts: Vec<Gift> = gifts
                .iter()
                .filter(|g| g.person_id.as_deref() == Some(person.person.id.as_str()))
                .cloned()
                .collect();
            lane_gifts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            BoardLane {
                person,
                gifts: lane_gifts,
            }
        })
        .collect();

    let mut unassigned: Vec<Gift> = gifts
        .iter()
        .filter(|g| g.person_id.is_none())
        .cloned()
        .collect();
    unassigned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    BoardView {
        lanes,
        unassigned,
        totals,
    }
}

/// Applies the list-view filter. Conditions are conjunctive: search
/// matches name or description case-insensitively (empty search passes),
/// person and status must equal the filter when one is set.
pub fn filter_gifts(gifts: &[GiftWithPerson], filter: &GiftFilter) -> Vec<GiftWithPerson> {
    let needle = filter.search.to_lowercase();
    gifts
        .iter()
        .filter(|g| {
            let matches_search = needle.is_empty()
                || g.gift.name.to_lowercase().contains(&needle)
                || g.gift
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
            let matches_person = filter
                .person_id
                .as_ref()
                .is_none_or(|p| g.gift.person_id.as_ref() == Some(p));
            let matches_status = filter.status.is_none_or(|s| g.gift.status == s);
            matches_search && matches_person && matches_status
        })
        .cloned()
        .collect()
}

/// Sorts gifts in place by the configured key and direction.
///
/// The sort is stable, so equal keys keep their relative order from the
/// input sequence. Missing prices order below every priced gift.
pub fn sort_gifts(gifts: &mut [GiftWithPerson], config: &SortConfig) {
    gifts.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, config.key);
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &GiftWithPerson, b: &GiftWithPerson, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.gift.name.cmp(&b.gift.name),
        // Option<Decimal> orders None first, i.e. nulls sort as lowest.
        SortKey::Price => a.gift.price.cmp(&b.gift.price),
        SortKey::Status => a.gift.status.cmp(&b.gift.status),
        SortKey::CreatedAt => a.gift.created_at.cmp(&b.gift.created_at),
        SortKey::PersonName => a.person_name().cmp(b.person_name()),
    }
}
