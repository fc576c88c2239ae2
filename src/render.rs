//! Maps a stats payload onto the dashboard document.
//!
//! Every renderer guards its own inputs, so a payload with missing platform
//! blocks renders partially instead of failing.

use crate::charts::{palette, Canvas, ChartConfig, ChartEngine, ChartKind, ChartOptions, Dataset};
use crate::document::{format_number, Document, Target, TopicBar};
use crate::models::{
    rank_label, resolve, Difficulty, LeetCodeStats, Platform, PlatformStatsMap, StatsPayload,
};
use std::collections::BTreeMap;
use tracing::debug;

pub const TOPIC_LIMIT: usize = 10;

pub fn render_stats<E: ChartEngine>(doc: &mut Document<E>, payload: &StatsPayload) {
    doc.set_text(
        Target::TotalSolved,
        resolve(payload.total_problems_solved).to_string(),
    );

    let stats = &payload.platform_stats;
    update_platform_counts(doc, stats);
    update_difficulty_chart(doc, stats.leetcode.as_ref());
    update_rating_chart(doc, stats);
    update_rankings(doc, stats);

    if let Some(tags) = stats.problem_tags() {
        update_topic_analysis(doc, tags);
    }
}

/// Writes solved totals for the platforms present in the payload.
pub fn update_platform_counts<E: ChartEngine>(doc: &mut Document<E>, stats: &PlatformStatsMap) {
    for platform in Platform::ALL {
        if let Some(total) = stats.total_solved(platform) {
            doc.set_text(Target::PlatformCount(platform), total.to_string());
        }
        if let Some(contests) = stats.contests(platform) {
            doc.set_text(Target::Contests(platform), contests.to_string());
        }
    }

    let categories = stats
        .codechef
        .as_ref()
        .and_then(|codechef| codechef.categories.as_ref());
    if let Some(categories) = categories.filter(|categories| !categories.is_empty()) {
        doc.set_text(
            Target::Categories(Platform::CodeChef),
            category_summary(categories),
        );
    }
}

/// `contest: 2, practice: 8` in name order.
pub fn category_summary(categories: &BTreeMap<String, f64>) -> String {
    categories
        .iter()
        .map(|(name, count)| format!("{name}: {}", format_number(*count)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn update_difficulty_chart<E: ChartEngine>(
    doc: &mut Document<E>,
    leetcode: Option<&LeetCodeStats>,
) {
    let Some(leetcode) = leetcode else {
        return;
    };

    let counts: Vec<u64> = Difficulty::ALL
        .iter()
        .map(|difficulty| leetcode.solved(*difficulty))
        .collect();

    let config = ChartConfig {
        kind: ChartKind::Doughnut,
        labels: Difficulty::ALL
            .iter()
            .map(|difficulty| difficulty.label().to_string())
            .collect(),
        datasets: vec![Dataset {
            data: counts.iter().map(|count| *count as f64).collect(),
            background_colors: vec![
                palette::EASY.to_string(),
                palette::MEDIUM.to_string(),
                palette::HARD.to_string(),
            ],
            ..Dataset::default()
        }],
        options: ChartOptions {
            legend_display: false,
            cutout_percent: Some(70.0),
            begin_at_zero: false,
        },
    };
    doc.charts_mut().replace(Canvas::Difficulty, config);

    for (difficulty, count) in Difficulty::ALL.iter().zip(&counts) {
        doc.set_text(Target::DifficultyCount(*difficulty), count.to_string());
    }
}

/// Always redrawn; absent platforms plot as zero.
pub fn update_rating_chart<E: ChartEngine>(doc: &mut Document<E>, stats: &PlatformStatsMap) {
    let config = ChartConfig {
        kind: ChartKind::Line,
        labels: Platform::ALL
            .iter()
            .map(|platform| platform.label().to_string())
            .collect(),
        datasets: vec![Dataset {
            label: Some("Rating".to_string()),
            data: Platform::ALL
                .iter()
                .map(|platform| stats.rating(*platform))
                .collect(),
            border_color: Some(palette::LEETCODE.to_string()),
            point_colors: vec![
                palette::LEETCODE.to_string(),
                palette::CODECHEF.to_string(),
                palette::CODEFORCES.to_string(),
            ],
            tension: 0.4,
            fill: false,
            ..Dataset::default()
        }],
        options: ChartOptions {
            begin_at_zero: true,
            ..ChartOptions::default()
        },
    };
    doc.charts_mut().replace(Canvas::Rating, config);
}

pub fn update_rankings<E: ChartEngine>(doc: &mut Document<E>, stats: &PlatformStatsMap) {
    if let Some(leetcode) = &stats.leetcode {
        // No separate peak is tracked upstream for LeetCode.
        let rating = resolve(leetcode.contest_rating);
        write_rating(doc, Platform::LeetCode, rating, rating);
    }

    if let Some(codechef) = &stats.codechef {
        write_rating(
            doc,
            Platform::CodeChef,
            resolve(codechef.rating),
            resolve(codechef.highest_rating),
        );
    }

    if let Some(codeforces) = &stats.codeforces {
        let rating = resolve(codeforces.rating);
        write_rating(doc, Platform::CodeForces, rating, rating);
        doc.set_text(
            Target::Rank(Platform::CodeForces),
            rank_label(codeforces.rank.as_deref()),
        );
    }
}

fn write_rating<E: ChartEngine>(doc: &mut Document<E>, platform: Platform, current: f64, max: f64) {
    doc.set_text(Target::Rating(platform), format_number(current));
    doc.set_text(
        Target::MaxRating(platform),
        format!("(max: {})", format_number(max)),
    );
}

/// Replaces the topic bars with the most frequent tags.
pub fn update_topic_analysis<E: ChartEngine>(doc: &mut Document<E>, tags: &BTreeMap<String, u64>) {
    doc.clear_topic_bars();
    let bars = top_topics(tags, TOPIC_LIMIT);
    debug!(tags = tags.len(), shown = bars.len(), "rendering topic bars");
    for bar in bars {
        doc.append_topic_bar(bar);
    }
}

/// Highest-count tags first, ties in name order, scaled against the top count.
pub fn top_topics(tags: &BTreeMap<String, u64>, limit: usize) -> Vec<TopicBar> {
    let mut entries: Vec<(&String, u64)> = tags.iter().map(|(name, count)| (name, *count)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);

    let Some(max_count) = entries.iter().map(|(_, count)| *count).max() else {
        return Vec::new();
    };

    entries
        .into_iter()
        .map(|(name, count)| TopicBar {
            name: name.clone(),
            count,
            percentage: if max_count == 0 {
                0.0
            } else {
                100.0 * count as f64 / max_count as f64
            },
        })
        .collect()
}
