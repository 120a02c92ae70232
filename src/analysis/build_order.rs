use serde::{Deserialize, Serialize};

/// Raw item event extracted from the timeline, tagged with its original
/// stream position (`seq`) so events sharing a timestamp keep a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemEvent {
    pub kind: ItemEventKind,
    pub item_id: i32,
    pub before_id: i32,
    pub after_id: i32,
    pub timestamp: i64,
    pub seq: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEventKind {
    Purchase,
    Sale,
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildAction {
    Purchased,
    Sold,
}

/// One surviving entry in the reconstructed build order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEntry {
    pub item_id: i32,
    pub timestamp: i64,
    pub action: BuildAction,
}

struct Candidate {
    item_id: i32,
    timestamp: i64,
    action: BuildAction,
    undone: bool,
}

/// Replays purchase/sale/undo events into the net build order.
///
/// The client's undo references the most recent matching action rather than a
/// specific purchase, so each undo scans the candidate list backwards for the
/// newest not-yet-undone entry of the right action and item id. An undo with
/// no live target is dropped and counted, not an error: Riot's event stream
/// is authoritative but not guaranteed self-consistent.
///
/// Expects `events` pre-sorted by `(timestamp, seq)`. Returns the surviving
/// entries in original order plus the number of dropped undos.
pub fn reconstruct_build_order(events: &[ItemEvent]) -> (Vec<BuildEntry>, u32) {
    let mut candidates: Vec<Candidate> = Vec::with_capacity(events.len());
    let mut dropped_undos = 0u32;

    for event in events {
        match event.kind {
            ItemEventKind::Purchase => candidates.push(Candidate {
                item_id: event.item_id,
                timestamp: event.timestamp,
                action: BuildAction::Purchased,
                undone: false,
            }),
            ItemEventKind::Sale => candidates.push(Candidate {
                item_id: event.item_id,
                timestamp: event.timestamp,
                action: BuildAction::Sold,
                undone: false,
            }),
            ItemEventKind::Undo => {
                // afterId == 0 means a purchase was rolled back (the item in
                // `beforeId` disappeared); beforeId == 0 means a sale was
                // rolled back (the item in `afterId` came back).
                let target = if event.after_id == 0 && event.before_id != 0 {
                    Some((BuildAction::Purchased, event.before_id))
                } else if event.before_id == 0 && event.after_id != 0 {
                    Some((BuildAction::Sold, event.after_id))
                } else {
                    None
                };

                let matched = target.and_then(|(action, item_id)| {
                    candidates
                        .iter_mut()
                        .rev()
                        .find(|c| !c.undone && c.action == action && c.item_id == item_id)
                });

                match matched {
                    Some(candidate) => candidate.undone = true,
                    None => dropped_undos += 1,
                }
            }
        }
    }

    let build_order = candidates
        .into_iter()
        .filter(|c| !c.undone)
        .map(|c| BuildEntry {
            item_id: c.item_id,
            timestamp: c.timestamp,
            action: c.action,
        })
        .collect();

    (build_order, dropped_undos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(item_id: i32, timestamp: i64, seq: u32) -> ItemEvent {
        ItemEvent {
            kind: ItemEventKind::Purchase,
            item_id,
            before_id: 0,
            after_id: 0,
            timestamp,
            seq,
        }
    }

    fn sale(item_id: i32, timestamp: i64, seq: u32) -> ItemEvent {
        ItemEvent {
            kind: ItemEventKind::Sale,
            item_id,
            before_id: 0,
            after_id: 0,
            timestamp,
            seq,
        }
    }

    fn undo(before_id: i32, after_id: i32, timestamp: i64, seq: u32) -> ItemEvent {
        ItemEvent {
            kind: ItemEventKind::Undo,
            item_id: 0,
            before_id,
            after_id,
            timestamp,
            seq,
        }
    }

    #[test]
    fn no_undos_keeps_every_event_in_order() {
        let events = vec![
            purchase(1001, 1000, 0),
            purchase(1055, 2000, 1),
            sale(1001, 3000, 2),
        ];

        let (build_order, dropped) = reconstruct_build_order(&events);

        assert_eq!(dropped, 0);
        assert_eq!(build_order.len(), 3);
        assert_eq!(build_order[0].item_id, 1001);
        assert_eq!(build_order[0].action, BuildAction::Purchased);
        assert_eq!(build_order[1].item_id, 1055);
        assert_eq!(build_order[2].item_id, 1001);
        assert_eq!(build_order[2].action, BuildAction::Sold);
    }

    #[test]
    fn undo_removes_purchase() {
        let events = vec![purchase(1001, 1000, 0), undo(1001, 0, 1500, 1)];

        let (build_order, dropped) = reconstruct_build_order(&events);

        assert!(build_order.is_empty());
        assert_eq!(dropped, 0);
    }

    #[test]
    fn undo_targets_most_recent_matching_purchase() {
        let events = vec![
            purchase(1036, 1000, 0),
            purchase(1036, 2000, 1),
            undo(1036, 0, 2500, 2),
        ];

        let (build_order, _) = reconstruct_build_order(&events);

        // The second purchase is undone, the first survives.
        assert_eq!(build_order.len(), 1);
        assert_eq!(build_order[0].timestamp, 1000);
    }

    #[test]
    fn undo_of_sale_restores_only_the_sale() {
        let events = vec![
            purchase(3031, 1000, 0),
            sale(3031, 2000, 1),
            undo(0, 3031, 2500, 2),
        ];

        let (build_order, dropped) = reconstruct_build_order(&events);

        assert_eq!(dropped, 0);
        assert_eq!(build_order.len(), 1);
        assert_eq!(build_order[0].action, BuildAction::Purchased);
    }

    #[test]
    fn unmatched_undo_is_dropped_and_counted() {
        let events = vec![purchase(1001, 1000, 0), undo(9999, 0, 1500, 1)];

        let (build_order, dropped) = reconstruct_build_order(&events);

        assert_eq!(build_order.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn undo_does_not_touch_non_matching_earlier_entries() {
        let events = vec![
            purchase(1001, 1000, 0),
            purchase(1055, 2000, 1),
            undo(1055, 0, 2500, 2),
        ];

        let (build_order, _) = reconstruct_build_order(&events);

        assert_eq!(build_order.len(), 1);
        assert_eq!(build_order[0].item_id, 1001);
    }

    #[test]
    fn already_undone_entry_is_not_undone_twice() {
        let events = vec![
            purchase(1036, 1000, 0),
            undo(1036, 0, 1200, 1),
            undo(1036, 0, 1400, 2),
        ];

        let (build_order, dropped) = reconstruct_build_order(&events);

        assert!(build_order.is_empty());
        assert_eq!(dropped, 1);
    }

    #[test]
    fn malformed_undo_with_both_ids_zero_is_dropped() {
        let events = vec![purchase(1001, 1000, 0), undo(0, 0, 1500, 1)];

        let (build_order, dropped) = reconstruct_build_order(&events);

        assert_eq!(build_order.len(), 1);
        assert_eq!(dropped, 1);
    }
}
