use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    csv::{self, Row},
    error::{SeedError, SeedResult},
};

/// Locates seed files across an ordered list of candidate directories.
#[derive(Clone, Debug)]
pub struct CsvSource {
    roots: Vec<PathBuf>,
}

impl CsvSource {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// First candidate that exists wins.
    pub fn resolve(&self, file: &str) -> SeedResult<PathBuf> {
        let tried: Vec<PathBuf> = self.roots.iter().map(|root| root.join(file)).collect();

        match tried.iter().find(|path| path.is_file()) {
            Some(path) => Ok(path.clone()),
            None => Err(SeedError::CsvNotFound { file: file.to_string(), tried }),
        }
    }

    pub async fn load(&self, file: &str) -> SeedResult<Vec<Row>> {
        let path = self.resolve(file)?;
        let content = read(&path).await?;
        let rows = csv::parse(&content);
        debug!(path = %path.display(), rows = rows.len(), "parsed seed file");
        Ok(rows)
    }
}

async fn read(path: &Path) -> SeedResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::CsvRead { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_first_existing_candidate() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let third = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("genre.csv"), "id,title,slug\n").unwrap();
        std::fs::write(third.path().join("genre.csv"), "id,title,slug\n").unwrap();

        let source = CsvSource::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            third.path().to_path_buf(),
        ]);

        assert_eq!(source.resolve("genre.csv").unwrap(), second.path().join("genre.csv"));
    }

    #[test]
    fn reports_every_candidate_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvSource::new(vec![dir.path().join("a"), dir.path().join("b")]);

        match source.resolve("poster.csv") {
            Err(SeedError::CsvNotFound { file, tried }) => {
                assert_eq!(file, "poster.csv");
                assert_eq!(tried, vec![dir.path().join("a/poster.csv"), dir.path().join("b/poster.csv")]);
            },
            other => panic!("expected CsvNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("genre.csv"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        let source = CsvSource::new(vec![dir.path().to_path_buf()]);

        let err = source.load("genre.csv").await.unwrap_err();
        assert!(matches!(err, SeedError::CsvRead { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn loads_and_parses_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("genre.csv"), "id,title,slug\n1,Action,action\n2,Drama,drama\n")
            .unwrap();
        let source = CsvSource::new(vec![dir.path().to_path_buf()]);

        let rows = source.load("genre.csv").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text("slug"), Some("drama"));
    }
}
