//! Tests for the derived-statistics, filter, and sort engine.

#[cfg(test)]
mod tests {
    use crate::board::{
        board_totals, build_board, compute_person_stats, filter_gifts, people_with_stats,
        sort_gifts, GiftFilter, SortConfig, SortDirection, SortKey,
    };
    use crate::gifts::{Gift, GiftStatus, GiftWithPerson};
    use crate::people::Person;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(
            &format!("2024-12-01 10:{minute:02}:00"),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap()
    }

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn gift(
        id: &str,
        name: &str,
        price: Option<Decimal>,
        status: GiftStatus,
        owner: Option<&str>,
        minute: u32,
    ) -> Gift {
        Gift {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price,
            status,
            url: None,
            location: None,
            notes: None,
            person_id: owner.map(str::to_string),
            created_at: ts(minute),
            updated_at: ts(minute),
        }
    }

    fn with_person(gift: Gift, person: Option<Person>) -> GiftWithPerson {
        GiftWithPerson { gift, person }
    }

    // ==================== Statistics Tests ====================

    #[test]
    fn spent_plus_planned_equals_total_spent() {
        let gifts = vec![
            gift("g1", "Book", Some(dec!(300)), GiftStatus::Ordered, Some("p1"), 1),
            gift("g2", "Mug", Some(dec!(150)), GiftStatus::Given, Some("p1"), 2),
            gift("g3", "Drone", Some(dec!(2000)), GiftStatus::Idea, Some("p1"), 3),
            gift("g4", "Card", None, GiftStatus::Idea, Some("p1"), 4),
            gift("g5", "Hat", Some(dec!(99)), GiftStatus::Wrapped, Some("p2"), 5),
        ];

        let stats = compute_person_stats("p1", &gifts);
        assert_eq!(stats.spent, dec!(450), "spent sums only non-idea gifts");
        assert_eq!(stats.planned, dec!(2000), "planned sums only ideas");
        assert_eq!(stats.total_spent, stats.spent + stats.planned);
        assert_eq!(stats.gift_count, 4, "unpriced gifts still count");
    }

    #[test]
    fn unpriced_gifts_contribute_nothing_to_money() {
        let gifts = vec![
            gift("g1", "Card", None, GiftStatus::Given, Some("p1"), 1),
            gift("g2", "Note", None, GiftStatus::Idea, Some("p1"), 2),
        ];
        let stats = compute_person_stats("p1", &gifts);
        assert_eq!(stats.spent, Decimal::ZERO);
        assert_eq!(stats.planned, Decimal::ZERO);
        assert_eq!(stats.gift_count, 2);
    }

    #[test]
    fn totals_aggregate_people_and_count_unassigned() {
        let people = vec![person("p1", "Ada"), person("p2", "Bea")];
        let gifts = vec![
            gift("g1", "Book", Some(dec!(300)), GiftStatus::Ordered, Some("p1"), 1),
            gift("g2", "Drone", Some(dec!(2000)), GiftStatus::Idea, Some("p2"), 2),
            // Unassigned gifts count toward the total but not the money.
            gift("g3", "Puzzle", Some(dec!(500)), GiftStatus::Ordered, None, 3),
        ];

        let with_stats = people_with_stats(&people, &gifts);
        let totals = board_totals(&with_stats, &gifts);
        assert_eq!(totals.total_spent_real, dec!(300));
        assert_eq!(totals.total_planned, dec!(2000));
        assert_eq!(totals.total_gifts, 3);
    }

    #[test]
    fn board_groups_gifts_newest_first_per_lane() {
        let people = vec![person("p1", "Ada")];
        let gifts = vec![
            gift("old", "Book", None, GiftStatus::Idea, Some("p1"), 1),
            gift("new", "Mug", None, GiftStatus::Idea, Some("p1"), 9),
            gift("loose", "Puzzle", None, GiftStatus::Idea, None, 5),
        ];

        let board = build_board(&people, &gifts);
        assert_eq!(board.lanes.len(), 1);
        let ids: Vec<_> = board.lanes[0].gifts.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(board.unassigned.len(), 1);
        assert_eq!(board.unassigned[0].id, "loose");
    }

    // ==================== Filter Tests ====================

    #[test]
    fn filter_conditions_are_conjunctive() {
        let gifts = vec![
            with_person(
                gift("g1", "Svetr", None, GiftStatus::Idea, Some("p1"), 1),
                Some(person("p1", "Ada")),
            ),
            with_person(
                gift("g2", "Svetr", None, GiftStatus::Given, Some("p1"), 2),
                Some(person("p1", "Ada")),
            ),
        ];

        let filter = GiftFilter {
            search: "svetr".to_string(),
            person_id: None,
            status: Some(GiftStatus::Idea),
        };
        let matched = filter_gifts(&gifts, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].gift.id, "g1");
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let mut described = gift("g1", "Mug", None, GiftStatus::Idea, None, 1);
        described.description = Some("Hand-painted SVETR motif".to_string());
        let gifts = vec![
            with_person(described, None),
            with_person(gift("g2", "Hat", None, GiftStatus::Idea, None, 2), None),
        ];

        let filter = GiftFilter {
            search: "svetr".to_string(),
            ..Default::default()
        };
        let matched = filter_gifts(&gifts, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].gift.id, "g1");

        // Empty search passes everything.
        let all = filter_gifts(&gifts, &GiftFilter::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn person_filter_matches_owner() {
        let gifts = vec![
            with_person(gift("g1", "Mug", None, GiftStatus::Idea, Some("p1"), 1), None),
            with_person(gift("g2", "Hat", None, GiftStatus::Idea, Some("p2"), 2), None),
            with_person(gift("g3", "Pen", None, GiftStatus::Idea, None, 3), None),
        ];
        let filter = GiftFilter {
            person_id: Some("p1".to_string()),
            ..Default::default()
        };
        let matched = filter_gifts(&gifts, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].gift.id, "g1");
    }

    // ==================== Sort Tests ====================

    #[test]
    fn price_sort_is_deterministic_with_nulls_lowest() {
        let fixture = vec![
            with_person(
                gift("a", "A", Some(dec!(100)), GiftStatus::Idea, None, 1),
                None,
            ),
            with_person(gift("b", "B", None, GiftStatus::Idea, None, 2), None),
            with_person(
                gift("c", "C", Some(dec!(50)), GiftStatus::Idea, None, 3),
                None,
            ),
        ];

        let mut asc = fixture.clone();
        sort_gifts(
            &mut asc,
            &SortConfig {
                key: SortKey::Price,
                direction: SortDirection::Asc,
            },
        );
        let ids: Vec<_> = asc.iter().map(|g| g.gift.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let mut desc = fixture.clone();
        sort_gifts(
            &mut desc,
            &SortConfig {
                key: SortKey::Price,
                direction: SortDirection::Desc,
            },
        );
        let ids: Vec<_> = desc.iter().map(|g| g.gift.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn equal_keys_preserve_input_order() {
        let fixture = vec![
            with_person(
                gift("first", "Same", Some(dec!(10)), GiftStatus::Idea, None, 1),
                None,
            ),
            with_person(
                gift("second", "Same", Some(dec!(10)), GiftStatus::Idea, None, 2),
                None,
            ),
            with_person(
                gift("third", "Same", Some(dec!(10)), GiftStatus::Idea, None, 3),
                None,
            ),
        ];

        let mut sorted = fixture.clone();
        sort_gifts(
            &mut sorted,
            &SortConfig {
                key: SortKey::Price,
                direction: SortDirection::Asc,
            },
        );
        let ids: Vec<_> = sorted.iter().map(|g| g.gift.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn status_sorts_in_lifecycle_order() {
        let mut gifts = vec![
            with_person(gift("given", "A", None, GiftStatus::Given, None, 1), None),
            with_person(gift("idea", "B", None, GiftStatus::Idea, None, 2), None),
            with_person(gift("wrapped", "C", None, GiftStatus::Wrapped, None, 3), None),
        ];
        sort_gifts(
            &mut gifts,
            &SortConfig {
                key: SortKey::Status,
                direction: SortDirection::Asc,
            },
        );
        let ids: Vec<_> = gifts.iter().map(|g| g.gift.id.as_str()).collect();
        assert_eq!(ids, vec!["idea", "wrapped", "given"]);
    }

    #[test]
    fn person_name_sort_puts_unassigned_first_ascending() {
        let mut gifts = vec![
            with_person(
                gift("for-zoe", "A", None, GiftStatus::Idea, Some("pz"), 1),
                Some(person("pz", "Zoe")),
            ),
            with_person(gift("loose", "B", None, GiftStatus::Idea, None, 2), None),
            with_person(
                gift("for-ada", "C", None, GiftStatus::Idea, Some("pa"), 3),
                Some(person("pa", "Ada")),
            ),
        ];
        sort_gifts(
            &mut gifts,
            &SortConfig {
                key: SortKey::PersonName,
                direction: SortDirection::Asc,
            },
        );
        let ids: Vec<_> = gifts.iter().map(|g| g.gift.id.as_str()).collect();
        // Unassigned gifts sort with an empty person name, i.e. first.
        assert_eq!(ids, vec!["loose", "for-ada", "for-zoe"]);
    }

    #[test]
    fn created_at_sorts_chronologically() {
        let mut gifts = vec![
            with_person(gift("late", "A", None, GiftStatus::Idea, None, 30), None),
            with_person(gift("early", "B", None, GiftStatus::Idea, None, 5), None),
        ];
        sort_gifts(
            &mut gifts,
            &SortConfig {
                key: SortKey::CreatedAt,
                direction: SortDirection::Desc,
            },
        );
        let ids: Vec<_> = gifts.iter().map(|g| g.gift.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }
}
