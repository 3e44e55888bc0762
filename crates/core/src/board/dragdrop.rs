//! Drag-and-drop reassignment state machine.
//!
//! A drag gesture moves a gift between person lanes on the board. The
//! interaction has three states:
//!
//! - **Idle**: no drag in progress.
//! - **Dragging**: a gift is being dragged; its id drives the ghost
//!   overlay of the dragged item.
//! - **Reassigning**: the gift was dropped on a new owner and the
//!   reassignment command is in flight.
//!
//! Only one gesture is ever active: starting a new drag replaces the
//! previous one, so no two reassignment commands for the same gift can be
//! in flight from a single client.

use serde::{Deserialize, Serialize};

use crate::gifts::GiftWithPerson;
use crate::people::Person;

/// Current state of the drag interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A gift is being dragged.
    Dragging { gift_id: String },
    /// A reassignment command is in flight.
    Reassigning {
        gift_id: String,
        target_person_id: String,
    },
}

/// What the pointer was over when the gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A person's lane container.
    Person(String),
    /// Another gift inside some lane; the drop reassigns to that gift's
    /// owner.
    Gift(String),
}

/// The persistence command produced by a successful drop: a merge-patch
/// carrying only the new owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignCommand {
    pub gift_id: String,
    pub person_id: String,
}

/// Result of ending a drag over a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop target did not resolve to a person (unknown gift, gift
    /// without an owner, unknown person). Nothing happens.
    Ignored,
    /// The target person already owns the gift. No command is issued.
    NoOp,
    /// The gift moves; exactly one command must be persisted.
    Reassign(ReassignCommand),
}

/// How the caller should resynchronize after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Command persisted: re-fetch people (stats changed) and gifts.
    RefreshPeopleAndGifts,
    /// Command failed: re-fetch gifts to discard the optimistic patch.
    RefreshGifts,
}

/// The drag interaction controller.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The gift currently being dragged, if any. Drives the ghost overlay.
    pub fn active_gift(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { gift_id } => Some(gift_id),
            _ => None,
        }
    }

    /// Begins a drag. A drag already in progress is replaced; the
    /// interaction is exclusive by construction.
    pub fn drag_start(&mut self, gift_id: impl Into<String>) {
        self.state = DragState::Dragging {
            gift_id: gift_id.into(),
        };
    }

    /// Ends the drag without a valid drop target.
    pub fn drag_cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Ends the drag over a target, resolving it against the current
    /// collections.
    ///
    /// Dropping on a person lane targets that person; dropping on a gift
    /// targets that gift's owner; dropping on an unassigned gift is
    /// invalid. When the resolved target already owns the dragged gift no
    /// command is issued.
    pub fn drop(
        &mut self,
        target: DropTarget,
        gifts: &[GiftWithPerson],
        people: &[Person],
    ) -> DropOutcome {
        let gift_id = match &self.state {
            DragState::Dragging { gift_id } => gift_id.clone(),
            _ => return DropOutcome::Ignored,
        };
        self.state = DragState::Idle;

        let Some(dragged) = gifts.iter().find(|g| g.gift.id == gift_id) else {
            return DropOutcome::Ignored;
        };

        let target_person_id = match target {
            DropTarget::Person(person_id) => {
                if people.iter().any(|p| p.id == person_id) {
                    person_id
                } else {
                    return DropOutcome::Ignored;
                }
            }
            DropTarget::Gift(over_id) => {
                match gifts
                    .iter()
                    .find(|g| g.gift.id == over_id)
                    .and_then(|g| g.gift.person_id.clone())
                {
                    Some(person_id) => person_id,
                    None => return DropOutcome::Ignored,
                }
            }
        };

        if dragged.gift.person_id.as_deref() == Some(target_person_id.as_str()) {
            return DropOutcome::NoOp;
        }

        self.state = DragState::Reassigning {
            gift_id: gift_id.clone(),
            target_person_id: target_person_id.clone(),
        };
        DropOutcome::Reassign(ReassignCommand {
            gift_id,
            person_id: target_person_id,
        })
    }

    /// Completes the in-flight reassignment. Returns how the caller should
    /// resynchronize, or `None` when no command was in flight.
    pub fn resolve(&mut self, success: bool) -> Option<Reconcile> {
        match self.state {
            DragState::Reassigning { .. } => {
                self.state = DragState::Idle;
                Some(if success {
                    Reconcile::RefreshPeopleAndGifts
                } else {
                    Reconcile::RefreshGifts
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gifts::{Gift, GiftStatus};
    use chrono::NaiveDateTime;

    fn ts() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-12-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn gift(id: &str, owner: Option<&str>) -> GiftWithPerson {
        GiftWithPerson {
            gift: Gift {
                id: id.to_string(),
                name: format!("gift {id}"),
                description: None,
                price: None,
                status: GiftStatus::Idea,
                url: None,
                location: None,
                notes: None,
                person_id: owner.map(str::to_string),
                created_at: ts(),
                updated_at: ts(),
            },
            person: None,
        }
    }

    fn fixture() -> (Vec<GiftWithPerson>, Vec<Person>) {
        (
            vec![
                gift("g1", Some("alice")),
                gift("g2", Some("bob")),
                gift("g3", None),
            ],
            vec![person("alice", "Alice"), person("bob", "Bob")],
        )
    }

    #[test]
    fn drop_on_person_lane_reassigns_once() {
        let (gifts, people) = fixture();
        let mut drag = DragController::new();

        drag.drag_start("g1");
        assert_eq!(drag.active_gift(), Some("g1"));

        let outcome = drag.drop(DropTarget::Person("bob".to_string()), &gifts, &people);
        assert_eq!(
            outcome,
            DropOutcome::Reassign(ReassignCommand {
                gift_id: "g1".to_string(),
                person_id: "bob".to_string(),
            })
        );
        assert!(matches!(drag.state(), DragState::Reassigning { .. }));

        // A second drop without a new gesture produces nothing.
        let mut drag2 = DragController::new();
        assert_eq!(
            drag2.drop(DropTarget::Person("bob".to_string()), &gifts, &people),
            DropOutcome::Ignored
        );
    }

    #[test]
    fn drop_on_own_lane_is_noop() {
        let (gifts, people) = fixture();
        let mut drag = DragController::new();
        drag.drag_start("g1");
        assert_eq!(
            drag.drop(DropTarget::Person("alice".to_string()), &gifts, &people),
            DropOutcome::NoOp
        );
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn drop_on_owned_gift_targets_its_owner() {
        let (gifts, people) = fixture();
        let mut drag = DragController::new();
        drag.drag_start("g1");
        let outcome = drag.drop(DropTarget::Gift("g2".to_string()), &gifts, &people);
        assert_eq!(
            outcome,
            DropOutcome::Reassign(ReassignCommand {
                gift_id: "g1".to_string(),
                person_id: "bob".to_string(),
            })
        );
    }

    #[test]
    fn drop_on_unassigned_gift_is_ignored() {
        let (gifts, people) = fixture();
        let mut drag = DragController::new();
        drag.drag_start("g1");
        assert_eq!(
            drag.drop(DropTarget::Gift("g3".to_string()), &gifts, &people),
            DropOutcome::Ignored
        );
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn cancel_clears_active_gift() {
        let mut drag = DragController::new();
        drag.drag_start("g1");
        drag.drag_cancel();
        assert_eq!(drag.state(), &DragState::Idle);
        assert_eq!(drag.active_gift(), None);
    }

    #[test]
    fn new_drag_replaces_active_one() {
        let mut drag = DragController::new();
        drag.drag_start("g1");
        drag.drag_start("g2");
        assert_eq!(drag.active_gift(), Some("g2"));
    }

    #[test]
    fn resolve_maps_success_and_failure_to_refresh_scope() {
        let (gifts, people) = fixture();
        let mut drag = DragController::new();

        drag.drag_start("g1");
        drag.drop(DropTarget::Person("bob".to_string()), &gifts, &people);
        assert_eq!(drag.resolve(true), Some(Reconcile::RefreshPeopleAndGifts));
        assert_eq!(drag.state(), &DragState::Idle);

        drag.drag_start("g1");
        drag.drop(DropTarget::Person("bob".to_string()), &gifts, &people);
        assert_eq!(drag.resolve(false), Some(Reconcile::RefreshGifts));

        // Resolving with nothing in flight is a no-op.
        assert_eq!(drag.resolve(true), None);
    }
}
