use std::collections::HashMap;

use crate::types::{CommitRecord, IssueRecord};

const TOP_COMMITTERS: usize = 5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Commits grouped by author, null authors dropped, sorted by descending
/// count then ascending name, capped at the top 5.
pub fn top_committers(commits: &[CommitRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for commit in commits {
        if let Some(author) = commit.author.as_deref() {
            *counts.entry(author).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(author, count)| (author.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_COMMITTERS);
    ranked
}

/// Closed rows (case-insensitive) over total rows. 0.0 for an empty table.
pub fn close_rate(issues: &[IssueRecord]) -> f64 {
    if issues.is_empty() {
        return 0.0;
    }
    let closed = issues
        .iter()
        .filter(|i| {
            i.state
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("closed"))
        })
        .count();
    closed as f64 / issues.len() as f64
}

/// Mean elapsed time in fractional days over issues carrying both
/// timestamps. Unlike the per-row column this is not truncated; the mean is
/// taken over exact elapsed seconds. None when no rows qualify.
pub fn average_open_duration_days(issues: &[IssueRecord]) -> Option<f64> {
    let spans: Vec<f64> = issues
        .iter()
        .filter_map(|i| match (i.created_at, i.closed_at) {
            (Some(created), Some(closed)) => {
                Some((closed - created).num_seconds() as f64 / SECONDS_PER_DAY)
            }
            _ => None,
        })
        .collect();
    if spans.is_empty() {
        return None;
    }
    Some(spans.iter().sum::<f64>() / spans.len() as f64)
}

pub fn print_summary(commits: &[CommitRecord], issues: &[IssueRecord]) {
    println!("Commits analyzed         : {}", commits.len());
    println!("Issues analyzed          : {}", issues.len());
    println!("-------------------------------------------");
    println!("Top committers           :");
    let ranked = top_committers(commits);
    if ranked.is_empty() {
        println!("  (no attributed commits)");
    }
    for (rank, (author, count)) in ranked.iter().enumerate() {
        println!("  {}. {} ({} commits)", rank + 1, author, count);
    }
    println!("Issue close rate         : {:.2}", close_rate(issues));
    match average_open_duration_days(issues) {
        Some(days) => println!("Avg open duration (days) : {days:.2}"),
        None => println!("Avg open duration (days) : N/A"),
    }
}
