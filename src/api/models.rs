use serde::Deserialize;
use std::collections::HashMap;

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

// Match V5 response
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct MatchMetadata {
    pub match_id: String,
    pub participants: Vec<String>,
    #[serde(default)]
    pub data_version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct MatchInfo {
    pub game_creation: i64,
    pub game_duration: i64,
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub teams: Vec<TeamDto>,
    #[serde(default)]
    pub game_id: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ParticipantDto {
    pub puuid: String,
    pub participant_id: i32,
    pub champion_id: i32,
    pub champion_name: String,
    pub team_id: i32,
    pub win: bool,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i32,
    pub total_minions_killed: i32,
    #[serde(default)]
    pub neutral_minions_killed: i32,
    pub total_damage_dealt_to_champions: i64,
    #[serde(default)]
    pub vision_score: i32,
    #[serde(default)]
    pub wards_placed: i32,
    #[serde(default)]
    pub vision_wards_bought_in_game: i32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct TeamDto {
    pub team_id: i32,
    #[serde(default)]
    pub win: bool,
    #[serde(default)]
    pub objectives: Option<ObjectivesDto>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ObjectivesDto {
    #[serde(default)]
    pub champion: ObjectiveDto,
    #[serde(default)]
    pub tower: ObjectiveDto,
    #[serde(default)]
    pub dragon: ObjectiveDto,
    #[serde(default)]
    pub baron: ObjectiveDto,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ObjectiveDto {
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub kills: i32,
}

// Match Timeline V5 response
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct TimelineDto {
    pub info: TimelineInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct TimelineInfo {
    pub frames: Vec<FrameDto>,
    #[serde(default)]
    pub frame_interval: i64,
}

/// One snapshot of all participants plus the discrete events since the
/// previous frame. Participant frames are keyed by participant id as a
/// string ("1".."10") in the raw JSON.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FrameDto {
    pub timestamp: i64,
    #[serde(default)]
    pub events: Vec<TimelineEventDto>,
    #[serde(default)]
    pub participant_frames: HashMap<String, ParticipantFrameDto>,
}

/// Discriminated by `type`; only the fields relevant to the event's type are
/// present in the payload, everything else deserializes to its default.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEventDto {
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: i64,
    #[serde(default)]
    pub participant_id: i32,
    #[serde(default)]
    pub item_id: i32,
    #[serde(default)]
    pub before_id: i32,
    #[serde(default)]
    pub after_id: i32,
    #[serde(default)]
    pub skill_slot: i32,
    #[serde(default)]
    pub level_up_type: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrameDto {
    #[serde(default)]
    pub total_gold: i32,
    #[serde(default)]
    pub xp: i32,
    #[serde(default)]
    pub minions_killed: i32,
    #[serde(default)]
    pub jungle_minions_killed: i32,
    #[serde(default)]
    pub damage_stats: DamageStatsDto,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DamageStatsDto {
    #[serde(default)]
    pub total_damage_done_to_champions: i64,
}
