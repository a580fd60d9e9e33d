use crate::error::MinerError;
use crate::github::RepoApi;
use crate::types::{CommitRecord, IssueRecord, IssueState, RawCommit, RawIssue};

/// Fetch up to `max_commits` commits from `repo`, in API order.
///
/// The cap is a hard ceiling: once reached no further rows are taken and no
/// further pages are requested.
pub async fn fetch_commits<A: RepoApi>(
    api: &A,
    repo: &str,
    max_commits: Option<usize>,
) -> Result<Vec<CommitRecord>, MinerError> {
    let mut records = Vec::new();
    if max_commits == Some(0) {
        return Ok(records);
    }
    let mut page = 1;
    'pages: loop {
        let batch = api.commits_page(repo, page).await?;
        if batch.is_empty() {
            break;
        }
        for raw in batch {
            records.push(normalize_commit(raw)?);
            if let Some(max) = max_commits {
                if records.len() >= max {
                    break 'pages;
                }
            }
        }
        page += 1;
    }
    Ok(records)
}

/// Fetch up to `max_issues` issues from `repo`, excluding pull requests.
///
/// Pull-request-typed items are skipped entirely and never count against the
/// cap. The state filter is applied server-side by the client.
pub async fn fetch_issues<A: RepoApi>(
    api: &A,
    repo: &str,
    state: IssueState,
    max_issues: Option<usize>,
) -> Result<Vec<IssueRecord>, MinerError> {
    let mut records = Vec::new();
    if max_issues == Some(0) {
        return Ok(records);
    }
    let mut page = 1;
    'pages: loop {
        let batch = api.issues_page(repo, state, page).await?;
        if batch.is_empty() {
            break;
        }
        for raw in batch {
            if raw.pull_request.is_some() {
                continue;
            }
            records.push(normalize_issue(raw)?);
            if let Some(max) = max_issues {
                if records.len() >= max {
                    break 'pages;
                }
            }
        }
        page += 1;
    }
    Ok(records)
}

fn normalize_commit(raw: RawCommit) -> Result<CommitRecord, MinerError> {
    let sha = raw.sha.ok_or(MinerError::MalformedRecord {
        kind: "commit",
        field: "sha",
    })?;
    let (author, email, date) = match raw.commit.author {
        Some(a) => (a.name, a.email, a.date),
        None => (None, None, None),
    };
    Ok(CommitRecord {
        sha,
        author,
        email,
        date,
        message: raw.commit.message.as_deref().map(first_line),
    })
}

fn normalize_issue(raw: RawIssue) -> Result<IssueRecord, MinerError> {
    let id = raw.id.ok_or(MinerError::MalformedRecord {
        kind: "issue",
        field: "id",
    })?;
    let open_duration_days = match (raw.created_at, raw.closed_at) {
        (Some(created), Some(closed)) => Some((closed - created).num_days()),
        _ => None,
    };
    Ok(IssueRecord {
        id,
        number: raw.number,
        title: raw.title,
        user: raw.user.and_then(|u| u.login),
        state: raw.state,
        created_at: raw.created_at,
        closed_at: raw.closed_at,
        comments: raw.comments,
        open_duration_days,
    })
}

fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or("").trim().to_string()
}
