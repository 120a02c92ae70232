use serde::{Deserialize, Serialize};

use super::timeline::TimelineResult;

/// Minute mark used for the aggregated lane differentials.
pub const LANE_DIFF_MINUTE: i64 = 14;

/// One participant's end-of-game line, as stored in a match record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub puuid: String,
    pub participant_id: i32,
    pub champion_name: String,
    pub team_id: i32,
    pub team_position: String,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i32,
    pub cs: i32,
    pub damage_to_champions: i64,
    pub vision_score: i32,
    pub wards_placed: i32,
    pub control_wards: i32,
}

/// A fully processed match: roster plus the tracked player's timeline result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: String,
    /// Game creation, epoch milliseconds.
    pub game_creation: i64,
    pub game_duration_secs: i64,
    pub participants: Vec<PlayerRow>,
    pub timeline: TimelineResult,
}

/// The participant on the opposing team sharing the player's assigned role.
/// None when the role is empty (ARAM, remakes) or no opposite-team player
/// holds it.
pub fn find_lane_opponent<'a>(
    participants: &'a [PlayerRow],
    player: &PlayerRow,
) -> Option<&'a PlayerRow> {
    if player.team_position.is_empty() {
        return None;
    }
    participants
        .iter()
        .find(|p| p.team_id != player.team_id && p.team_position == player.team_position)
}

/// Aggregate statistics over a filtered match collection. Every field is
/// present and zero for an empty collection, so display code has one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub kda_ratio: f64,
    pub kill_participation: f64,
    pub damage_per_minute: f64,
    pub gold_per_minute: f64,
    pub cs_per_minute: f64,
    pub damage_per_game: f64,
    pub gold_per_game: f64,
    pub cs_per_game: f64,
    pub vision_score_per_game: f64,
    pub wards_placed_per_game: f64,
    pub control_wards_per_game: f64,
    pub team_damage_share: f64,
    pub damage_per_gold: f64,
    pub cs_diff_at_14: f64,
    pub gold_diff_at_14: f64,
    pub xp_diff_at_14: f64,
    pub damage_diff_at_14: f64,
    /// Games that actually produced a 14 minute lane diff.
    pub lane_diff_games: u32,
    /// Kill participation minus the lane opponent's, percentage points.
    pub kp_diff_vs_opponent: f64,
    /// Games where both teams had kills and a lane opponent was identified.
    pub kp_diff_games: u32,
}

fn per(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Folds the matches whose creation timestamp falls in `[window_start,
/// window_end)` into summary statistics for the player identified by `puuid`.
///
/// Per-minute rates divide by the combined duration of all included games,
/// not by a per-game average of rates. The 14 minute lane differentials and
/// the kill-participation differential are averaged only over the games that
/// produced them; a game without a 14 minute snapshot, without a lane
/// opponent, or where either team went killless is left out of that metric's
/// denominator rather than counted as zero. Matches in which the player does
/// not appear contribute nothing.
pub fn calculate_summary_stats(
    matches: &[MatchRecord],
    puuid: &str,
    window_start: i64,
    window_end: i64,
) -> SummaryStats {
    let mut games = 0u32;
    let mut wins = 0u32;
    let mut kills = 0i64;
    let mut deaths = 0i64;
    let mut assists = 0i64;
    let mut duration_secs = 0i64;
    let mut damage = 0i64;
    let mut gold = 0i64;
    let mut cs = 0i64;
    let mut vision_score = 0i64;
    let mut wards_placed = 0i64;
    let mut control_wards = 0i64;
    let mut team_kills_total = 0i64;
    let mut team_damage_total = 0i64;

    let mut lane_diff_games = 0u32;
    let mut cs_diff_sum = 0f64;
    let mut gold_diff_sum = 0f64;
    let mut xp_diff_sum = 0f64;
    let mut damage_diff_sum = 0f64;

    let mut kp_diff_games = 0u32;
    let mut kp_diff_sum = 0f64;

    for record in matches {
        if record.game_creation < window_start || record.game_creation >= window_end {
            continue;
        }
        let Some(player) = record.participants.iter().find(|p| p.puuid == puuid) else {
            continue;
        };

        games += 1;
        if player.win {
            wins += 1;
        }
        kills += player.kills as i64;
        deaths += player.deaths as i64;
        assists += player.assists as i64;
        duration_secs += record.game_duration_secs;
        damage += player.damage_to_champions;
        gold += player.gold_earned as i64;
        cs += player.cs as i64;
        vision_score += player.vision_score as i64;
        wards_placed += player.wards_placed as i64;
        control_wards += player.control_wards as i64;

        let team_kills: i64 = record
            .participants
            .iter()
            .filter(|p| p.team_id == player.team_id)
            .map(|p| p.kills as i64)
            .sum();
        let team_damage: i64 = record
            .participants
            .iter()
            .filter(|p| p.team_id == player.team_id)
            .map(|p| p.damage_to_champions)
            .sum();
        team_kills_total += team_kills;
        team_damage_total += team_damage;

        if let Some(diff) = record
            .timeline
            .snapshots
            .iter()
            .find(|s| s.minute == LANE_DIFF_MINUTE)
            .and_then(|s| s.diff)
        {
            lane_diff_games += 1;
            cs_diff_sum += diff.cs as f64;
            gold_diff_sum += diff.gold as f64;
            xp_diff_sum += diff.xp as f64;
            damage_diff_sum += diff.damage as f64;
        }

        if let Some(opponent) = find_lane_opponent(&record.participants, player) {
            let enemy_kills: i64 = record
                .participants
                .iter()
                .filter(|p| p.team_id == opponent.team_id)
                .map(|p| p.kills as i64)
                .sum();
            // A 0/0 kill-participation comparison is meaningless, so both
            // teams must have kills for this game to count.
            if team_kills > 0 && enemy_kills > 0 {
                let player_kp =
                    100.0 * (player.kills + player.assists) as f64 / team_kills as f64;
                let opponent_kp =
                    100.0 * (opponent.kills + opponent.assists) as f64 / enemy_kills as f64;
                kp_diff_games += 1;
                kp_diff_sum += player_kp - opponent_kp;
            }
        }
    }

    if games == 0 {
        return SummaryStats::default();
    }

    let games_f = games as f64;
    let minutes = duration_secs as f64 / 60.0;

    SummaryStats {
        total_games: games,
        wins,
        win_rate: 100.0 * wins as f64 / games_f,
        kda_ratio: per((kills + assists) as f64, deaths as f64),
        kill_participation: 100.0 * per((kills + assists) as f64, team_kills_total as f64),
        damage_per_minute: per(damage as f64, minutes),
        gold_per_minute: per(gold as f64, minutes),
        cs_per_minute: per(cs as f64, minutes),
        damage_per_game: damage as f64 / games_f,
        gold_per_game: gold as f64 / games_f,
        cs_per_game: cs as f64 / games_f,
        vision_score_per_game: vision_score as f64 / games_f,
        wards_placed_per_game: wards_placed as f64 / games_f,
        control_wards_per_game: control_wards as f64 / games_f,
        team_damage_share: 100.0 * per(damage as f64, team_damage_total as f64),
        damage_per_gold: per(damage as f64, gold as f64),
        cs_diff_at_14: per(cs_diff_sum, lane_diff_games as f64),
        gold_diff_at_14: per(gold_diff_sum, lane_diff_games as f64),
        xp_diff_at_14: per(xp_diff_sum, lane_diff_games as f64),
        damage_diff_at_14: per(damage_diff_sum, lane_diff_games as f64),
        lane_diff_games,
        kp_diff_vs_opponent: per(kp_diff_sum, kp_diff_games as f64),
        kp_diff_games,
    }
}
