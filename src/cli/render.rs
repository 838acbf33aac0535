//! Plain-text rendering of dashboard data for the terminal.

use crate::cli::progress::status_icon;
use crate::forms::FieldErrors;
use crate::models::FeedbackType;
use crate::services::FeedbackStats;
use crate::views::{Overview, Row};

pub fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Cut to `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn stats_lines(stats: &FeedbackStats) -> Vec<String> {
    let share = stats.sentiment_share();
    let mut lines = vec![
        format!("Total feedback    {}", stats.total),
        format!("Average rating    {} / 5", stats.avg_rating_display()),
        format!("Resolution rate   {}%", stats.resolution_rate),
        String::new(),
        "Feedback types".to_string(),
    ];

    for kind in FeedbackType::ALL {
        lines.push(format!("  {:<18}{}", kind.label(), stats.types.get(kind)));
    }
    if stats.types.unrecognized > 0 {
        lines.push(format!("  {:<18}{}", "Unrecognized", stats.types.unrecognized));
    }

    lines.push(String::new());
    lines.push("Sentiment".to_string());
    lines.push(format!("  {:<18}{}%", "Positive", share.positive));
    lines.push(format!("  {:<18}{}%", "Neutral", share.neutral));
    lines.push(format!("  {:<18}{}%", "Negative", share.negative));
    lines
}

fn table_lines(rows: &[Row]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{:<28} {:<16} {:<7} {:<10} {:<14}",
            "CUSTOMER", "TYPE", "RATING", "DATE", "STATUS"
        ),
        "─".repeat(90),
    ];

    for row in rows {
        lines.push(format!(
            "{:<28} {:<16} {:<7} {:<10} {} {}",
            truncate(&row.name, 28),
            truncate(&row.type_label, 16),
            stars(row.rating),
            row.date,
            status_icon(&row.status_class),
            row.status_label,
        ));
        lines.push(format!("  {}", truncate(&row.email, 60)));
        lines.push(format!("  {}", truncate(&row.message, 86)));
    }
    lines
}

pub fn print_overview(overview: &Overview) {
    println!("Dashboard Overview\n");
    for line in stats_lines(&overview.stats) {
        println!("{}", line);
    }

    println!("\nRecent Submissions");
    if let Some(query) = &overview.query {
        println!("Filter: \"{}\" ({} matching)", query, overview.records.len());
    }
    if let Some(text) = overview.empty_text {
        println!("{}", text);
        return;
    }
    for line in table_lines(&overview.records) {
        println!("{}", line);
    }
}

pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  ✗ {}: {}", field.as_str(), message);
    }
}
