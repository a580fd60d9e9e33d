use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("cannot access repository {repo}: {reason}")]
    RepositoryAccess { repo: String, reason: String },

    #[error("{kind} record is missing required field `{field}`")]
    MalformedRecord {
        kind: &'static str,
        field: &'static str,
    },
}

impl MinerError {
    pub fn access(repo: &str, reason: impl std::fmt::Display) -> Self {
        MinerError::RepositoryAccess {
            repo: repo.to_string(),
            reason: reason.to_string(),
        }
    }
}
