use crate::analysis::build_order::{BuildAction, BuildEntry};
use crate::analysis::skill_order::SkillOrderEntry;
use crate::analysis::summary::{MatchRecord, SummaryStats};
use crate::analysis::timeline::LaneSnapshot;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    result: String,
    kda: String,
    cs: String,
    duration: String,
}

#[derive(Tabled)]
struct SnapshotRow {
    minute: String,
    cs: String,
    gold: String,
    xp: String,
    damage: String,
    #[tabled(rename = "cs +/-")]
    cs_diff: String,
    #[tabled(rename = "gold +/-")]
    gold_diff: String,
    #[tabled(rename = "xp +/-")]
    xp_diff: String,
}

#[derive(Tabled)]
struct BuildRow {
    time: String,
    action: String,
    #[tabled(rename = "item id")]
    item_id: String,
}

#[derive(Tabled)]
struct SkillRow {
    level: String,
    skill: String,
    rank: String,
    time: String,
}

#[derive(Tabled)]
struct StatRow {
    metric: String,
    value: String,
}

fn format_game_time(ms: i64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

fn skill_letter(slot: i32) -> &'static str {
    match slot {
        1 => "Q",
        2 => "W",
        3 => "E",
        4 => "R",
        _ => "?",
    }
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.0}", value)
    } else {
        format!("{:.0}", value)
    }
}

pub fn display_summary_stats(stats: &SummaryStats, player_name: &str, window_days: i64) {
    println!(
        "\n{}",
        format!(
            "Summary for {} (last {} days, {} games)",
            player_name, window_days, stats.total_games
        )
        .bold()
        .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if stats.total_games == 0 {
        println!("{}", "No games in this window".yellow());
        return;
    }

    let rows = vec![
        StatRow {
            metric: "Win rate".to_string(),
            value: format!("{:.1}% ({}W / {}L)", stats.win_rate, stats.wins, stats.total_games - stats.wins),
        },
        StatRow {
            metric: "KDA".to_string(),
            value: format!("{:.2}", stats.kda_ratio),
        },
        StatRow {
            metric: "Kill participation".to_string(),
            value: format!("{:.1}%", stats.kill_participation),
        },
        StatRow {
            metric: "Damage / min".to_string(),
            value: format!("{:.0}", stats.damage_per_minute),
        },
        StatRow {
            metric: "Gold / min".to_string(),
            value: format!("{:.0}", stats.gold_per_minute),
        },
        StatRow {
            metric: "CS / min".to_string(),
            value: format!("{:.1}", stats.cs_per_minute),
        },
        StatRow {
            metric: "Damage / game".to_string(),
            value: format!("{:.0}", stats.damage_per_game),
        },
        StatRow {
            metric: "Vision score / game".to_string(),
            value: format!("{:.1}", stats.vision_score_per_game),
        },
        StatRow {
            metric: "Wards / game".to_string(),
            value: format!(
                "{:.1} ({:.1} control)",
                stats.wards_placed_per_game, stats.control_wards_per_game
            ),
        },
        StatRow {
            metric: "Team damage share".to_string(),
            value: format!("{:.1}%", stats.team_damage_share),
        },
        StatRow {
            metric: "Damage per gold".to_string(),
            value: format!("{:.2}", stats.damage_per_gold),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if stats.lane_diff_games > 0 {
        println!(
            "\n{} (over {} games with lane data)",
            "Laning at 14:00 vs lane opponent".bold().yellow(),
            stats.lane_diff_games
        );
        println!(
            "  CS {}  Gold {}  XP {}  Damage {}",
            signed(stats.cs_diff_at_14),
            signed(stats.gold_diff_at_14),
            signed(stats.xp_diff_at_14),
            signed(stats.damage_diff_at_14)
        );
    }
    if stats.kp_diff_games > 0 {
        println!(
            "  Kill participation {} pts vs opponent ({} games)",
            signed(stats.kp_diff_vs_opponent),
            stats.kp_diff_games
        );
    }
    println!();
}

pub fn display_match_history(records: &[MatchRecord], puuid: &str) {
    if records.is_empty() {
        return;
    }

    let mut rows = vec![];
    let mut wins = 0usize;
    for (idx, record) in records.iter().enumerate() {
        let Some(player) = record.participants.iter().find(|p| p.puuid == puuid) else {
            continue;
        };
        if player.win {
            wins += 1;
        }

        let result = if player.win {
            "WIN".green().to_string()
        } else {
            "LOSS".red().to_string()
        };

        rows.push(MatchRow {
            number: format!("{}", idx + 1),
            champion: player.champion_name.clone(),
            result,
            kda: format!("{}/{}/{}", player.kills, player.deaths, player.assists),
            cs: format!("{}", player.cs),
            duration: format_game_time(record.game_duration_secs * 1000),
        });
    }

    let total = rows.len();
    println!(
        "\n{}",
        format!("MATCH HISTORY (last {} games)", total).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    if total > 0 {
        println!(
            "{} {} W / {} L\n",
            "Overall:".bold(),
            wins.to_string().green(),
            (total - wins).to_string().red()
        );
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_lane_snapshots(snapshots: &[LaneSnapshot]) {
    if snapshots.is_empty() {
        return;
    }

    println!("\n{}", "LANING SNAPSHOTS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut rows = vec![];
    for snapshot in snapshots {
        let (cs_diff, gold_diff, xp_diff) = match snapshot.diff {
            Some(diff) => (
                signed(diff.cs as f64),
                signed(diff.gold as f64),
                signed(diff.xp as f64),
            ),
            // No lane opponent data: not applicable, not zero.
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };

        rows.push(SnapshotRow {
            minute: format!("{}:00", snapshot.minute),
            cs: format!("{}", snapshot.player.cs),
            gold: format!("{}", snapshot.player.gold),
            xp: format!("{}", snapshot.player.xp),
            damage: format!("{}", snapshot.player.damage),
            cs_diff,
            gold_diff,
            xp_diff,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_build_order(build_order: &[BuildEntry]) {
    println!("\n{}", "BUILD ORDER".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if build_order.is_empty() {
        println!("{}", "No surviving item events".yellow());
        return;
    }

    let rows: Vec<BuildRow> = build_order
        .iter()
        .map(|entry| BuildRow {
            time: format_game_time(entry.timestamp),
            action: match entry.action {
                BuildAction::Purchased => "buy".green().to_string(),
                BuildAction::Sold => "sell".red().to_string(),
            },
            item_id: format!("{}", entry.item_id),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_skill_order(skill_order: &[SkillOrderEntry]) {
    println!("\n{}", "SKILL ORDER".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if skill_order.is_empty() {
        println!("{}", "No skill events".yellow());
        return;
    }

    let sequence: Vec<&str> = skill_order
        .iter()
        .map(|e| skill_letter(e.skill_slot))
        .collect();
    println!("{}\n", sequence.join(" > ").bold());

    let rows: Vec<SkillRow> = skill_order
        .iter()
        .map(|entry| SkillRow {
            level: format!("{}", entry.level_taken_at),
            skill: skill_letter(entry.skill_slot).to_string(),
            rank: format!("{}", entry.skill_level),
            time: format_game_time(entry.timestamp),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "i".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
