use serde::{Deserialize, Serialize};

use crate::api::models::{FrameDto, ParticipantFrameDto};

use super::build_order::{reconstruct_build_order, BuildEntry, ItemEvent, ItemEventKind};
use super::skill_order::{reconstruct_skill_order, SkillEvent, SkillOrderEntry};

/// Minute marks at which laning snapshots are taken.
pub const SNAPSHOT_MINUTES: [i64; 3] = [5, 10, 14];
const MS_PER_MINUTE: i64 = 60_000;

/// Cumulative laning stats for one participant at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneStats {
    pub cs: i32,
    pub gold: i32,
    pub xp: i32,
    pub damage: i64,
}

impl LaneStats {
    fn from_frame(frame: &ParticipantFrameDto) -> Self {
        LaneStats {
            cs: frame.minions_killed + frame.jungle_minions_killed,
            gold: frame.total_gold,
            xp: frame.xp,
            damage: frame.damage_stats.total_damage_done_to_champions,
        }
    }

    pub fn diff(&self, other: &LaneStats) -> LaneStats {
        LaneStats {
            cs: self.cs - other.cs,
            gold: self.gold - other.gold,
            xp: self.xp - other.xp,
            damage: self.damage - other.damage,
        }
    }
}

/// Player vs. lane-opponent comparison at one minute mark. `opponent` and
/// `diff` are None when no opponent was supplied or the opponent had no
/// frame data; a missing diff means "not applicable", never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub minute: i64,
    pub player: LaneStats,
    pub opponent: Option<LaneStats>,
    pub diff: Option<LaneStats>,
}

/// Counts of anomalous events silently skipped during replay. The raw event
/// stream is not guaranteed self-consistent across patches; these give
/// callers visibility without turning bad data into errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayDiagnostics {
    pub dropped_undos: u32,
    pub rejected_skill_ups: u32,
}

/// Everything derived from one match timeline for one target player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineResult {
    pub snapshots: Vec<LaneSnapshot>,
    pub build_order: Vec<BuildEntry>,
    pub skill_order: Vec<SkillOrderEntry>,
    pub diagnostics: ReplayDiagnostics,
}

const ITEM_PURCHASED: &str = "ITEM_PURCHASED";
const ITEM_SOLD: &str = "ITEM_SOLD";
const ITEM_UNDO: &str = "ITEM_UNDO";
const SKILL_LEVEL_UP: &str = "SKILL_LEVEL_UP";
const LEVEL_UP_NORMAL: &str = "NORMAL";

/// Scans the match timeline once and derives the target player's laning
/// snapshots, build order, and skill order.
///
/// Events inside a frame carry no guaranteed order and can share timestamps,
/// so each extracted event is tagged with a running sequence index and both
/// event lists are sorted by `(timestamp, seq)` before replay - an undo must
/// bind to the most recent matching action, which makes first-seen ordering
/// load-bearing. Each minute mark is recorded from the first frame that
/// reaches it, at most once, and only if the mark fits inside the game
/// duration. Input frames are never mutated; all state is local to the call.
pub fn process_timeline(
    frames: &[FrameDto],
    player_id: i32,
    opponent_id: Option<i32>,
    game_duration_secs: i64,
) -> TimelineResult {
    let mut item_events: Vec<ItemEvent> = Vec::new();
    let mut skill_events: Vec<SkillEvent> = Vec::new();
    let mut snapshots: Vec<LaneSnapshot> = Vec::new();

    let mut seq = 0u32;
    let mut next_mark = 0usize;
    let duration_ms = game_duration_secs * 1000;

    let player_key = player_id.to_string();
    let opponent_key = opponent_id.map(|id| id.to_string());

    for frame in frames {
        for event in &frame.events {
            if event.participant_id != player_id {
                continue;
            }

            match event.event_type.as_str() {
                ITEM_PURCHASED => {
                    item_events.push(ItemEvent {
                        kind: ItemEventKind::Purchase,
                        item_id: event.item_id,
                        before_id: 0,
                        after_id: 0,
                        timestamp: event.timestamp,
                        seq,
                    });
                    seq += 1;
                }
                ITEM_SOLD => {
                    item_events.push(ItemEvent {
                        kind: ItemEventKind::Sale,
                        item_id: event.item_id,
                        before_id: 0,
                        after_id: 0,
                        timestamp: event.timestamp,
                        seq,
                    });
                    seq += 1;
                }
                ITEM_UNDO => {
                    item_events.push(ItemEvent {
                        kind: ItemEventKind::Undo,
                        item_id: 0,
                        before_id: event.before_id,
                        after_id: event.after_id,
                        timestamp: event.timestamp,
                        seq,
                    });
                    seq += 1;
                }
                // Evolutions and other special level-up types do not spend a
                // skill point.
                SKILL_LEVEL_UP if event.level_up_type == LEVEL_UP_NORMAL => {
                    skill_events.push(SkillEvent {
                        skill_slot: event.skill_slot,
                        timestamp: event.timestamp,
                        seq,
                    });
                    seq += 1;
                }
                _ => {}
            }
        }

        while next_mark < SNAPSHOT_MINUTES.len() {
            let minute = SNAPSHOT_MINUTES[next_mark];
            let mark_ms = minute * MS_PER_MINUTE;
            if frame.timestamp < mark_ms {
                break;
            }

            if mark_ms <= duration_ms {
                if let Some(player) = frame
                    .participant_frames
                    .get(&player_key)
                    .map(LaneStats::from_frame)
                {
                    let opponent = opponent_key
                        .as_deref()
                        .and_then(|key| frame.participant_frames.get(key))
                        .map(LaneStats::from_frame);
                    let diff = opponent.map(|o| player.diff(&o));

                    snapshots.push(LaneSnapshot {
                        minute,
                        player,
                        opponent,
                        diff,
                    });
                }
            }
            next_mark += 1;
        }
    }

    item_events.sort_by_key(|e| (e.timestamp, e.seq));
    skill_events.sort_by_key(|e| (e.timestamp, e.seq));

    let (build_order, dropped_undos) = reconstruct_build_order(&item_events);
    let (skill_order, rejected_skill_ups) = reconstruct_skill_order(&skill_events);

    TimelineResult {
        snapshots,
        build_order,
        skill_order,
        diagnostics: ReplayDiagnostics {
            dropped_undos,
            rejected_skill_ups,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{DamageStatsDto, TimelineEventDto};
    use std::collections::HashMap;

    fn participant_frame(cs: i32, jungle_cs: i32, gold: i32, xp: i32, damage: i64) -> ParticipantFrameDto {
        ParticipantFrameDto {
            total_gold: gold,
            xp,
            minions_killed: cs,
            jungle_minions_killed: jungle_cs,
            damage_stats: DamageStatsDto {
                total_damage_done_to_champions: damage,
            },
        }
    }

    fn frame(timestamp: i64, participant_frames: Vec<(i32, ParticipantFrameDto)>, events: Vec<TimelineEventDto>) -> FrameDto {
        let participant_frames: HashMap<String, ParticipantFrameDto> = participant_frames
            .into_iter()
            .map(|(id, f)| (id.to_string(), f))
            .collect();
        FrameDto {
            timestamp,
            events,
            participant_frames,
        }
    }

    fn item_event(event_type: &str, participant_id: i32, item_id: i32, timestamp: i64) -> TimelineEventDto {
        TimelineEventDto {
            event_type: event_type.to_string(),
            timestamp,
            participant_id,
            item_id,
            ..Default::default()
        }
    }

    fn skill_event(participant_id: i32, skill_slot: i32, level_up_type: &str, timestamp: i64) -> TimelineEventDto {
        TimelineEventDto {
            event_type: SKILL_LEVEL_UP.to_string(),
            timestamp,
            participant_id,
            skill_slot,
            level_up_type: level_up_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn snapshots_recorded_once_per_minute_mark() {
        let frames = vec![
            frame(0, vec![(1, participant_frame(0, 0, 500, 0, 0))], vec![]),
            frame(300_000, vec![(1, participant_frame(40, 4, 2000, 3200, 1500))], vec![]),
            // A later frame past the 5 minute mark must not add a second
            // 5 minute snapshot.
            frame(360_000, vec![(1, participant_frame(50, 4, 2300, 3900, 1700))], vec![]),
            frame(600_000, vec![(1, participant_frame(90, 8, 4100, 7000, 4000))], vec![]),
            frame(840_000, vec![(1, participant_frame(130, 12, 6000, 9800, 6500))], vec![]),
        ];

        let result = process_timeline(&frames, 1, None, 1800);

        let minutes: Vec<i64> = result.snapshots.iter().map(|s| s.minute).collect();
        assert_eq!(minutes, vec![5, 10, 14]);
        assert_eq!(result.snapshots[0].player.cs, 44);
        assert_eq!(result.snapshots[0].player.gold, 2000);
        assert!(result.snapshots.iter().all(|s| s.opponent.is_none() && s.diff.is_none()));
    }

    #[test]
    fn diff_is_player_minus_opponent() {
        let frames = vec![frame(
            300_000,
            vec![
                (1, participant_frame(40, 0, 2000, 3200, 1500)),
                (6, participant_frame(35, 0, 1800, 3000, 1900)),
            ],
            vec![],
        )];

        let result = process_timeline(&frames, 1, Some(6), 1800);

        let snapshot = &result.snapshots[0];
        let diff = snapshot.diff.expect("opponent data present");
        assert_eq!(diff.cs, 5);
        assert_eq!(diff.gold, 200);
        assert_eq!(diff.xp, 200);
        assert_eq!(diff.damage, -400);
    }

    #[test]
    fn missing_opponent_frame_leaves_diff_absent() {
        let frames = vec![frame(
            300_000,
            vec![(1, participant_frame(40, 0, 2000, 3200, 1500))],
            vec![],
        )];

        let result = process_timeline(&frames, 1, Some(6), 1800);

        assert_eq!(result.snapshots.len(), 1);
        assert!(result.snapshots[0].opponent.is_none());
        assert!(result.snapshots[0].diff.is_none());
    }

    #[test]
    fn marks_past_game_duration_are_skipped() {
        let frames = vec![
            frame(300_000, vec![(1, participant_frame(40, 0, 2000, 3200, 0))], vec![]),
            frame(720_000, vec![(1, participant_frame(90, 0, 4100, 7000, 0))], vec![]),
        ];

        // Game ended at 12 minutes: 5 and 10 recorded, 14 never.
        let result = process_timeline(&frames, 1, None, 720);

        let minutes: Vec<i64> = result.snapshots.iter().map(|s| s.minute).collect();
        assert_eq!(minutes, vec![5, 10]);
    }

    #[test]
    fn other_participants_events_are_ignored() {
        let frames = vec![frame(
            60_000,
            vec![],
            vec![
                item_event(ITEM_PURCHASED, 1, 1001, 10_000),
                item_event(ITEM_PURCHASED, 2, 3031, 11_000),
                skill_event(2, 1, LEVEL_UP_NORMAL, 12_000),
            ],
        )];

        let result = process_timeline(&frames, 1, None, 1800);

        assert_eq!(result.build_order.len(), 1);
        assert_eq!(result.build_order[0].item_id, 1001);
        assert!(result.skill_order.is_empty());
    }

    #[test]
    fn non_normal_level_ups_are_excluded() {
        let frames = vec![frame(
            600_000,
            vec![],
            vec![
                skill_event(1, 1, LEVEL_UP_NORMAL, 60_000),
                skill_event(1, 1, "EVOLVE", 400_000),
                skill_event(1, 2, LEVEL_UP_NORMAL, 500_000),
            ],
        )];

        let result = process_timeline(&frames, 1, None, 1800);

        assert_eq!(result.skill_order.len(), 2);
        assert_eq!(result.skill_order[1].skill_slot, 2);
        assert_eq!(result.skill_order[1].level_taken_at, 2);
    }

    #[test]
    fn undo_binds_across_frames() {
        let purchase = item_event(ITEM_PURCHASED, 1, 1001, 1000);
        let mut undo = item_event(ITEM_UNDO, 1, 0, 1500);
        undo.before_id = 1001;
        undo.after_id = 0;

        let frames = vec![
            frame(60_000, vec![], vec![purchase]),
            frame(120_000, vec![], vec![undo]),
        ];

        let result = process_timeline(&frames, 1, None, 1800);

        assert!(result.build_order.is_empty());
        assert_eq!(result.diagnostics.dropped_undos, 0);
    }

    #[test]
    fn same_timestamp_events_keep_stream_order() {
        // Two purchases and an undo all at t=1000: the undo must cancel the
        // second purchase, because it was seen most recently.
        let first = item_event(ITEM_PURCHASED, 1, 1036, 1000);
        let second = item_event(ITEM_PURCHASED, 1, 1036, 1000);
        let mut undo = item_event(ITEM_UNDO, 1, 0, 1000);
        undo.before_id = 1036;

        let frames = vec![frame(60_000, vec![], vec![first, second, undo])];

        let result = process_timeline(&frames, 1, None, 1800);

        assert_eq!(result.build_order.len(), 1);
        assert_eq!(result.build_order[0].item_id, 1036);
    }

    #[test]
    fn rerunning_is_idempotent() {
        let frames = vec![
            frame(
                300_000,
                vec![
                    (1, participant_frame(40, 0, 2000, 3200, 1500)),
                    (6, participant_frame(35, 0, 1800, 3000, 1900)),
                ],
                vec![
                    item_event(ITEM_PURCHASED, 1, 1001, 10_000),
                    skill_event(1, 1, LEVEL_UP_NORMAL, 20_000),
                ],
            ),
        ];

        let first = process_timeline(&frames, 1, Some(6), 1800);
        let second = process_timeline(&frames, 1, Some(6), 1800);

        assert_eq!(first, second);
    }
}
