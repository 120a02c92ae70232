use serde::{Deserialize, Serialize};

pub const MAX_CHAMPION_LEVEL: i32 = 18;
const BASIC_SKILL_CAP: i32 = 5;
const ULTIMATE_CAP: i32 = 3;
const ULTIMATE_SLOT: i32 = 4;

/// Raw skill-level-up event (slots 1-4 are Q, W, E, R).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillEvent {
    pub skill_slot: i32,
    pub timestamp: i64,
    pub seq: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOrderEntry {
    pub skill_slot: i32,
    /// Champion level at which the point was spent, 1..=18 consecutive.
    pub level_taken_at: i32,
    /// Rank of the skill after this point, 1..=5 (1..=3 for the ultimate).
    pub skill_level: i32,
    pub timestamp: i64,
}

/// Replays skill-level-up events into the champion's skill order.
///
/// Each accepted event spends one point and advances the champion level, up
/// to level 18. Events that would push a slot past its rank cap (5 for Q/W/E,
/// 3 for R) or that name a slot outside 1-4 are rejected and counted, without
/// advancing the level. Expects `events` pre-sorted by `(timestamp, seq)`.
pub fn reconstruct_skill_order(events: &[SkillEvent]) -> (Vec<SkillOrderEntry>, u32) {
    let mut points = [0i32; 5]; // indexed by slot, slot 0 unused
    let mut champion_level = 1;
    let mut rejected = 0u32;
    let mut order = Vec::with_capacity(events.len().min(MAX_CHAMPION_LEVEL as usize));

    for event in events {
        if champion_level > MAX_CHAMPION_LEVEL {
            break;
        }

        let slot = event.skill_slot;
        if !(1..=4).contains(&slot) {
            rejected += 1;
            continue;
        }

        let cap = if slot == ULTIMATE_SLOT {
            ULTIMATE_CAP
        } else {
            BASIC_SKILL_CAP
        };

        let slot_points = &mut points[slot as usize];
        *slot_points += 1;
        if *slot_points > cap {
            *slot_points -= 1;
            rejected += 1;
            continue;
        }

        order.push(SkillOrderEntry {
            skill_slot: slot,
            level_taken_at: champion_level,
            skill_level: *slot_points,
            timestamp: event.timestamp,
        });
        champion_level += 1;
    }

    // Monotonic by construction; re-sorted in case that ever changes.
    order.sort_by_key(|e| (e.level_taken_at, e.timestamp));

    (order, rejected)
}
