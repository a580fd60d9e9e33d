use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::types::{CommitRecord, IssueRecord};

pub const COMMIT_COLUMNS: [&str; 5] = ["sha", "author", "email", "date", "message"];
pub const ISSUE_COLUMNS: [&str; 9] = [
    "id",
    "number",
    "title",
    "user",
    "state",
    "created_at",
    "closed_at",
    "comments",
    "open_duration_days",
];

/// Marker written for absent values. Never an empty string or sentinel date.
const NULL: &str = "null";

pub fn write_commits(path: &Path, rows: &[CommitRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(COMMIT_COLUMNS)?;
    for row in rows {
        wtr.write_record(&[
            row.sha.clone(),
            text(&row.author),
            text(&row.email),
            stamp(&row.date),
            text(&row.message),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_issues(path: &Path, rows: &[IssueRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(ISSUE_COLUMNS)?;
    for row in rows {
        wtr.write_record(&[
            row.id.to_string(),
            int(&row.number),
            text(&row.title),
            text(&row.user),
            text(&row.state),
            stamp(&row.created_at),
            stamp(&row.closed_at),
            row.comments.to_string(),
            int(&row.open_duration_days),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn read_commits(path: &Path) -> Result<Vec<CommitRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        rows.push(CommitRecord {
            sha: field(&record, 0).unwrap_or_default(),
            author: field(&record, 1),
            email: field(&record, 2),
            date: parse_stamp(&record, 3),
            message: field(&record, 4),
        });
    }
    Ok(rows)
}

pub fn read_issues(path: &Path) -> Result<Vec<IssueRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        rows.push(IssueRecord {
            id: parse_int(&record, 0).unwrap_or_default(),
            number: parse_int(&record, 1),
            title: field(&record, 2),
            user: field(&record, 3),
            state: field(&record, 4),
            created_at: parse_stamp(&record, 5),
            closed_at: parse_stamp(&record, 6),
            comments: parse_int(&record, 7).unwrap_or_default(),
            open_duration_days: parse_int(&record, 8),
        });
    }
    Ok(rows)
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NULL.to_string())
}

fn stamp(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.to_rfc3339())
        .unwrap_or_else(|| NULL.to_string())
}

fn int(value: &Option<i64>) -> String {
    value
        .map(|n| n.to_string())
        .unwrap_or_else(|| NULL.to_string())
}

fn field(record: &csv::StringRecord, idx: usize) -> Option<String> {
    match record.get(idx) {
        None => None,
        Some(s) if s == NULL || s.is_empty() => None,
        Some(s) => Some(s.to_string()),
    }
}

fn parse_stamp(record: &csv::StringRecord, idx: usize) -> Option<DateTime<Utc>> {
    field(record, idx)
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn parse_int(record: &csv::StringRecord, idx: usize) -> Option<i64> {
    field(record, idx).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn sample_commit() -> CommitRecord {
        CommitRecord {
            sha: "abc123".to_string(),
            author: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            date: Some(Utc.with_ymd_and_hms(2025, 9, 20, 12, 0, 0).unwrap()),
            message: Some("Initial commit".to_string()),
        }
    }

    #[test]
    fn test_commit_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commits.csv");

        let rows = vec![
            sample_commit(),
            CommitRecord {
                sha: "def456".to_string(),
                author: None,
                email: None,
                date: None,
                message: Some("orphan".to_string()),
            },
        ];
        write_commits(&path, &rows).unwrap();
        let loaded = read_commits(&path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_commit_header_and_null_markers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commits.csv");

        let mut row = sample_commit();
        row.author = None;
        row.date = None;
        write_commits(&path, &[row]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("sha,author,email,date,message"));
        let data = lines.next().unwrap();
        assert!(data.starts_with("abc123,null,"));
        assert!(data.contains(",null,Initial commit"));
    }

    #[test]
    fn test_empty_commit_table_keeps_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commits.csv");

        write_commits(&path, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "sha,author,email,date,message");
        assert!(read_commits(&path).unwrap().is_empty());
    }

    #[test]
    fn test_issue_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.csv");

        let created = Utc.with_ymd_and_hms(2025, 9, 20, 12, 0, 0).unwrap();
        let closed = Utc.with_ymd_and_hms(2025, 9, 22, 9, 0, 0).unwrap();
        let rows = vec![
            IssueRecord {
                id: 1,
                number: Some(101),
                title: Some("Open issue".to_string()),
                user: Some("alice".to_string()),
                state: Some("open".to_string()),
                created_at: Some(created),
                closed_at: None,
                comments: 0,
                open_duration_days: None,
            },
            IssueRecord {
                id: 2,
                number: Some(102),
                title: Some("Closed issue, with comma".to_string()),
                user: None,
                state: Some("closed".to_string()),
                created_at: Some(created),
                closed_at: Some(closed),
                comments: 3,
                open_duration_days: Some(1),
            },
        ];
        write_issues(&path, &rows).unwrap();
        let loaded = read_issues(&path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_empty_issue_table_keeps_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.csv");

        write_issues(&path, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "id,number,title,user,state,created_at,closed_at,comments,open_duration_days"
        );
        assert!(read_issues(&path).unwrap().is_empty());
    }

    #[test]
    fn test_reader_tolerates_empty_cells_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commits.csv");
        fs::write(
            &path,
            "sha,author,email,date,message\nabc,,,not-a-date,fix\n",
        )
        .unwrap();
        let rows = read_commits(&path).unwrap();
        assert_eq!(rows[0].author, None);
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].message.as_deref(), Some("fix"));
    }
}
