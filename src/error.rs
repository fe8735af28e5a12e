use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("CSV file {file} not found. Tried: {}", display_paths(.tried))]
    CsvNotFound { file: String, tried: Vec<PathBuf> },

    #[error("failed to read {}", .path.display())]
    CsvRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {entity} row: {source}")]
    InvalidRow {
        entity: &'static str,
        #[source]
        source: RowError,
    },

    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("background task failed")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

/// Why a single CSV row could not become a stored record.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("missing or invalid field `{0}`")]
    Field(&'static str),

    #[error("value of `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" | ")
}

pub type SeedResult<T> = Result<T, SeedError>;
