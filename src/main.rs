mod analysis;
mod api;
mod cache;
mod config;
mod display;
mod error;
mod rate_limit;

use analysis::summary::{calculate_summary_stats, find_lane_opponent, MatchRecord, PlayerRow};
use analysis::timeline::process_timeline;
use api::client::RiotApiClient;
use api::models::{MatchDto, ParticipantDto};
use clap::Parser;
use config::Config;
use display::output::{
    display_build_order, display_error, display_info, display_lane_snapshots,
    display_match_history, display_skill_order, display_success, display_summary_stats,
};
use error::AppError;
use indicatif::ProgressBar;

#[derive(Parser, Debug)]
#[command(name = "lanewise")]
#[command(about = "Reconstruct match timelines and aggregate laning performance", long_about = None)]
struct Args {
    /// Riot Game Name
    game_name: String,

    /// Riot Tag (tag line)
    tag_line: String,

    /// Region (default: euw1)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of matches to analyze (default: 20, max: 100)
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Aggregation window in days, counting back from now (default: 30)
    #[arg(short, long, default_value = "30")]
    days: i64,

    /// Force refresh from Riot API (ignore cache)
    #[arg(long)]
    refresh: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn participant_row(p: &ParticipantDto) -> PlayerRow {
    PlayerRow {
        puuid: p.puuid.clone(),
        participant_id: p.participant_id,
        champion_name: p.champion_name.clone(),
        team_id: p.team_id,
        team_position: p.team_position.clone(),
        win: p.win,
        kills: p.kills,
        deaths: p.deaths,
        assists: p.assists,
        gold_earned: p.gold_earned,
        cs: p.total_minions_killed + p.neutral_minions_killed,
        damage_to_champions: p.total_damage_dealt_to_champions,
        vision_score: p.vision_score,
        wards_placed: p.wards_placed,
        control_wards: p.vision_wards_bought_in_game,
    }
}

fn build_record(match_id: &str, match_data: &MatchDto, puuid: &str, client: &RiotApiClient) -> Result<Option<MatchRecord>, AppError> {
    let participants: Vec<PlayerRow> = match_data
        .info
        .participants
        .iter()
        .map(participant_row)
        .collect();

    let Some(player) = participants.iter().find(|p| p.puuid == puuid) else {
        // Spectated or transferred account; nothing to derive for this match.
        return Ok(None);
    };

    let opponent_id = find_lane_opponent(&participants, player).map(|o| o.participant_id);

    let timeline_data = client.get_timeline(match_id)?;
    let timeline = process_timeline(
        &timeline_data.info.frames,
        player.participant_id,
        opponent_id,
        match_data.info.game_duration,
    );

    Ok(Some(MatchRecord {
        match_id: match_id.to_string(),
        game_creation: match_data.info.game_creation,
        game_duration_secs: match_data.info.game_duration,
        participants,
        timeline,
    }))
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(region) = args.region {
        config.region = region;
    }

    let player_key = format!("{}#{}", args.game_name, args.tag_line);

    // Load rate limit tracker
    let mut rate_limiter = rate_limit::RequestLog::load(&player_key)?;

    display_info(&format!(
        "Analyzing {} in region {}",
        player_key, config.region
    ));

    let client = RiotApiClient::new(config.clone());

    let mut match_cache = cache::MatchCache::load(&player_key)?;
    match_cache.region = config.region.clone();

    // Step 1: Resolve PUUID (cached across runs)
    let puuid = match (&match_cache.account, args.refresh) {
        (Some(account), false) => {
            display_info("Step 1: Using cached account info");
            account.puuid.clone()
        }
        _ => {
            display_info("Step 1: Getting account info...");
            if !rate_limiter.can_make_request() {
                rate_limiter.display_status();
                return Err(AppError::RateLimited);
            }
            let account = client.get_account(&args.game_name, &args.tag_line)?;
            rate_limiter.record_request();
            rate_limiter.save().ok();
            match_cache.set_account(account.puuid.clone());
            display_success(&format!("Found PUUID: {}", &account.puuid[0..8]));
            account.puuid
        }
    };

    // Step 2: Get recent match IDs (one cheap request)
    display_info("Step 2: Fetching match IDs...");
    if !rate_limiter.can_make_request() {
        rate_limiter.display_status();
        return Err(AppError::RateLimited);
    }
    let match_count = std::cmp::min(args.matches, 100);
    let match_ids = client.get_match_ids(&puuid, match_count)?;
    rate_limiter.record_request();
    rate_limiter.save().ok();

    if match_ids.is_empty() {
        return Err(AppError::NoMatches);
    }
    display_success(&format!("Found {} matches", match_ids.len()));

    // Step 3: Fetch and process matches the cache doesn't have yet. Each new
    // match costs two requests (detail + timeline).
    let missing: Vec<&str> = match_ids
        .iter()
        .map(|id| id.as_str())
        .filter(|id| args.refresh || !match_cache.contains(id))
        .collect();

    if missing.is_empty() {
        display_success("Cache is up-to-date (no new matches)");
    } else {
        display_info(&format!(
            "Step 3: Fetching {} new matches...",
            missing.len()
        ));
        let pb = ProgressBar::new(missing.len() as u64);
        pb.set_message("Fetching match details");

        let mut new_records = Vec::new();
        for match_id in &missing {
            if !rate_limiter.can_make_request() {
                pb.finish_and_clear();
                display_info("Request budget exhausted, continuing with fetched matches");
                break;
            }

            let match_data = client.get_match(match_id)?;
            rate_limiter.record_request();

            if let Some(record) = build_record(match_id, &match_data, &puuid, &client)? {
                new_records.push(record);
            }
            rate_limiter.record_request();
            rate_limiter.save().ok();

            pb.inc(1);
        }
        pb.finish_with_message("Match data fetched");

        match_cache.add_records(new_records);
    }
    match_cache.save()?;

    // Step 4: Assemble the analyzed collection in recency order
    let records: Vec<MatchRecord> = match_ids
        .iter()
        .filter_map(|id| match_cache.get_record(id))
        .cloned()
        .collect();

    if records.is_empty() {
        return Err(AppError::NoMatches);
    }

    // Step 5: Aggregate over the time window [now - days, now)
    let window_end = chrono::Utc::now().timestamp_millis();
    let window_start = window_end - args.days * 24 * 60 * 60 * 1000;
    let stats = calculate_summary_stats(&records, &puuid, window_start, window_end);

    display_match_history(&records, &puuid);
    display_summary_stats(&stats, &player_key, args.days);

    // Step 6: Timeline detail for the most recent match
    if let Some(latest) = records.first() {
        display_info(&format!("Timeline for most recent match {}", latest.match_id));
        display_lane_snapshots(&latest.timeline.snapshots);
        display_build_order(&latest.timeline.build_order);
        display_skill_order(&latest.timeline.skill_order);

        let diag = latest.timeline.diagnostics;
        if diag.dropped_undos > 0 || diag.rejected_skill_ups > 0 {
            display_info(&format!(
                "Timeline anomalies: {} unmatched undos, {} over-cap skill ups",
                diag.dropped_undos, diag.rejected_skill_ups
            ));
        }
    }

    // Display API usage stats
    rate_limiter.display_status();

    Ok(())
}
