use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    csv::Row,
    error::{RowError, SeedError, SeedResult},
    files::CsvSource,
    models::{CartLineRecord, GenrePosterRecord, GenreRecord, PosterRecord, RatingRecord},
    store::Store,
    users,
};

const GENRE_FILE: &str = "genre.csv";
const POSTER_FILE: &str = "poster.csv";
const GENRE_POSTER_FILE: &str = "genrePosterRel.csv";
const CART_LINE_FILE: &str = "CartLine.csv";
const RATING_FILE: &str = "UserRating.csv";

/// Phases whose failures are absorbed into the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    GenrePosters,
    CartLines,
    Ratings,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::GenrePosters => "genre-poster relations",
            Phase::CartLines => "cart lines",
            Phase::Ratings => "user ratings",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub existing: usize,
}

impl Tally {
    fn record(&mut self, created: bool) {
        if created {
            self.created += 1;
        } else {
            self.existing += 1;
        }
    }
}

#[derive(Debug)]
pub struct SkippedRow {
    pub phase: Phase,
    pub row_id: i64,
    /// Identifying columns, e.g. `genreId=3, posterId=17`.
    pub key: String,
    pub reason: RowError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} row {} ({}): {}", self.phase, self.row_id, self.key, self.reason)
    }
}

#[derive(Debug)]
pub struct SkippedFile {
    pub phase: Phase,
    pub reason: SeedError,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.phase, self.reason)
    }
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub users_created: u64,
    pub genres: Tally,
    pub posters: Tally,
    pub genre_posters: Tally,
    pub cart_lines: Tally,
    pub ratings: Tally,
    pub skipped_rows: Vec<SkippedRow>,
    pub skipped_files: Vec<SkippedFile>,
}

impl SeedReport {
    fn skip_row(&mut self, phase: Phase, row: &Row, fields: &[&str], reason: RowError) {
        let skipped = SkippedRow {
            phase,
            row_id: row.id().unwrap_or_default(),
            key: row_key(row, fields),
            reason,
        };
        warn!(%skipped, "skipping invalid row");
        self.skipped_rows.push(skipped);
    }
}

/// Loads every seed file into `store`, in dependency order.
///
/// Errors returned from here are fatal for the run. Per-row failures in the
/// relation, cart line and rating phases, and missing optional files, are
/// collected in the returned report instead.
pub async fn run(store: &Store, config: &Config) -> SeedResult<SeedReport> {
    info!("starting seed");
    let source = CsvSource::new(config.csv_roots.clone());
    let mut report = SeedReport::default();

    seed_users(store, config, &mut report).await?;
    seed_genres(store, &source, &mut report).await?;
    seed_posters(store, &source, &mut report).await?;
    seed_genre_posters(store, &source, &mut report).await?;
    seed_cart_lines(store, &source, &mut report).await;
    seed_ratings(store, &source, &mut report).await;

    info!(
        users = report.users_created,
        genres = report.genres.created,
        posters = report.posters.created,
        genre_posters = report.genre_posters.created,
        cart_lines = report.cart_lines.created,
        ratings = report.ratings.created,
        skipped_rows = report.skipped_rows.len(),
        skipped_files = report.skipped_files.len(),
        "seed completed"
    );

    Ok(report)
}

async fn seed_users(store: &Store, config: &Config, report: &mut SeedReport) -> SeedResult<()> {
    let hash = users::hash_password(&config.seed_password, config.bcrypt_cost).await?;
    let models = users::seed_users().into_iter().map(|u| u.into_active_model(&hash)).collect();

    report.users_created = store.insert_users_skip_duplicates(models).await?;
    info!(created = report.users_created, "users seeded");
    Ok(())
}

async fn seed_genres(store: &Store, source: &CsvSource, report: &mut SeedReport) -> SeedResult<()> {
    for row in source.load(GENRE_FILE).await? {
        let genre = GenreRecord::from_row(&row)
            .map_err(|source| SeedError::InvalidRow { entity: "genre", source })?;
        report.genres.record(store.upsert_genre(&genre).await?);
    }
    info!(created = report.genres.created, existing = report.genres.existing, "genres seeded");
    Ok(())
}

async fn seed_posters(
    store: &Store,
    source: &CsvSource,
    report: &mut SeedReport,
) -> SeedResult<()> {
    for row in source.load(POSTER_FILE).await? {
        let poster = PosterRecord::from_row(&row)
            .map_err(|source| SeedError::InvalidRow { entity: "poster", source })?;

        let taken = store
            .find_poster_by_slug(&poster.slug)
            .await?
            .is_some_and(|existing| existing.id != poster.id);
        let slug = if taken {
            let slug = poster.disambiguated_slug();
            debug!(id = poster.id, from = %poster.slug, to = %slug, "poster slug taken");
            slug
        } else {
            poster.slug.clone()
        };

        report.posters.record(store.upsert_poster(&poster, &slug).await?);
    }
    info!(created = report.posters.created, existing = report.posters.existing, "posters seeded");
    Ok(())
}

async fn seed_genre_posters(
    store: &Store,
    source: &CsvSource,
    report: &mut SeedReport,
) -> SeedResult<()> {
    const KEY: [&str; 2] = ["genreId", "posterId"];

    for row in source.load(GENRE_POSTER_FILE).await? {
        let result = async {
            let rel = GenrePosterRecord::from_row(&row)?;
            Ok::<_, RowError>(store.upsert_genre_poster(&rel).await?)
        }
        .await;

        match result {
            Ok(created) => report.genre_posters.record(created),
            Err(err) => report.skip_row(Phase::GenrePosters, &row, &KEY, err),
        }
    }
    info!(created = report.genre_posters.created, "genre-poster relations seeded");
    Ok(())
}

async fn seed_cart_lines(store: &Store, source: &CsvSource, report: &mut SeedReport) {
    const KEY: [&str; 2] = ["UserID", "PosterID"];

    let Some(rows) = load_optional(source, Phase::CartLines, CART_LINE_FILE, report).await else {
        return;
    };

    for row in rows {
        let result = async {
            let line = CartLineRecord::from_row(&row)?;
            Ok::<_, RowError>(store.create_cart_line(&line).await?)
        }
        .await;

        match result {
            Ok(_) => report.cart_lines.record(true),
            Err(err) => report.skip_row(Phase::CartLines, &row, &KEY, err),
        }
    }
    info!(created = report.cart_lines.created, "cart lines seeded");
}

async fn seed_ratings(store: &Store, source: &CsvSource, report: &mut SeedReport) {
    const KEY: [&str; 2] = ["UserID", "PosterID"];

    let Some(rows) = load_optional(source, Phase::Ratings, RATING_FILE, report).await else {
        return;
    };

    for row in rows {
        let result = async {
            let rating = RatingRecord::from_row(&row)?;
            Ok::<_, RowError>(store.create_rating(&rating).await?)
        }
        .await;

        match result {
            Ok(_) => report.ratings.record(true),
            Err(err) => report.skip_row(Phase::Ratings, &row, &KEY, err),
        }
    }
    info!(created = report.ratings.created, "user ratings seeded");
}

async fn load_optional(
    source: &CsvSource,
    phase: Phase,
    file: &str,
    report: &mut SeedReport,
) -> Option<Vec<Row>> {
    match source.load(file).await {
        Ok(rows) => Some(rows),
        Err(reason) => {
            let skipped = SkippedFile { phase, reason };
            warn!(%skipped, "optional seed file unavailable, skipping phase");
            report.skipped_files.push(skipped);
            None
        },
    }
}

fn row_key(row: &Row, fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| match row.int(field) {
            Some(value) => format!("{field}={value}"),
            None => format!("{field}=null"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;
    use crate::entities::{cart_line, genre, genre_poster_rel, poster, user, user_rating};

    const GENRES: &str = "id,title,slug\n1,Action,action\n2,Drama,drama\n,Broken,broken\n";
    const POSTERS: &str = "\
id,name,slug,description,image,width,height,price,stock
1,Jaws,jaws,\"Shark.
Big one.\",jaws.jpg,50,70,199.95,4
2,Jaws,jaws,Remake,,,,,
3,Åben Himmel,,,,,,,
";
    const RELATIONS: &str = "id,genreId,posterId\n1,1,1\n2,1,404\n3,2,3\n";

    fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }

    fn catalog_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), GENRE_FILE, GENRES);
        write(dir.path(), POSTER_FILE, POSTERS);
        write(dir.path(), GENRE_POSTER_FILE, RELATIONS);
        dir
    }

    fn config(dir: &Path) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            csv_roots: vec![dir.join("missing"), dir.to_path_buf()],
            seed_password: "password123".to_string(),
            bcrypt_cost: 4,
        }
    }

    async fn store() -> Store {
        Store::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn seeds_catalog_and_reports_skips() {
        let dir = catalog_dir();
        let store = store().await;

        let report = run(&store, &config(dir.path())).await.unwrap();

        assert_eq!(report.users_created, 102);
        assert_eq!(report.genres, Tally { created: 2, existing: 0 });
        assert_eq!(report.posters, Tally { created: 3, existing: 0 });
        assert_eq!(report.genre_posters, Tally { created: 2, existing: 0 });

        assert_eq!(report.skipped_rows.len(), 1);
        let skipped = &report.skipped_rows[0];
        assert_eq!(skipped.phase, Phase::GenrePosters);
        assert_eq!(skipped.row_id, 2);
        assert_eq!(skipped.key, "genreId=1, posterId=404");

        let phases: Vec<_> = report.skipped_files.iter().map(|f| f.phase).collect();
        assert_eq!(phases, vec![Phase::CartLines, Phase::Ratings]);
        assert!(matches!(report.skipped_files[0].reason, SeedError::CsvNotFound { .. }));

        assert_eq!(genre_poster_rel::Entity::find().count(store.db()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn poster_defaults_and_slugs_are_persisted() {
        let dir = catalog_dir();
        let store = store().await;

        run(&store, &config(dir.path())).await.unwrap();

        let first = poster::Entity::find_by_id(1).one(store.db()).await.unwrap().unwrap();
        assert_eq!(first.slug, "jaws");
        assert_eq!(first.description.as_deref(), Some("Shark.\nBig one."));
        assert_eq!(first.price, 199.95);

        let remake = poster::Entity::find_by_id(2).one(store.db()).await.unwrap().unwrap();
        assert_eq!(remake.slug, "jaws-2");
        assert_eq!(remake.image, "placeholder.jpg");
        assert_eq!((remake.width, remake.height, remake.stock), (70, 100, 0));
        assert_eq!(remake.price, 50.0);

        let generated = poster::Entity::find_by_id(3).one(store.db()).await.unwrap().unwrap();
        assert_eq!(generated.slug, "aaben-himmel-3");
    }

    #[tokio::test]
    async fn second_run_changes_nothing() {
        let dir = catalog_dir();
        let store = store().await;
        let config = config(dir.path());

        run(&store, &config).await.unwrap();
        let before = genre::Entity::find().all(store.db()).await.unwrap();

        let report = run(&store, &config).await.unwrap();

        assert_eq!(report.users_created, 0);
        assert_eq!(report.genres, Tally { created: 0, existing: 2 });
        assert_eq!(report.posters, Tally { created: 0, existing: 3 });
        assert_eq!(report.genre_posters, Tally { created: 0, existing: 2 });
        assert_eq!(genre::Entity::find().all(store.db()).await.unwrap(), before);
        assert_eq!(user::Entity::find().count(store.db()).await.unwrap(), 102);
        assert_eq!(
            poster::Entity::find_by_id(2).one(store.db()).await.unwrap().unwrap().slug,
            "jaws-2"
        );
    }

    #[tokio::test]
    async fn optional_files_are_loaded_when_present() {
        let dir = catalog_dir();
        write(dir.path(), CART_LINE_FILE, "id,UserID,PosterID,Quantity\n1,3,1,2\n2,999,1,1\n3,4,2,x\n");
        write(dir.path(), RATING_FILE, "id,UserID,PosterID,Rating\n1,3,1,5\n2,5,3,4\n");
        let store = store().await;

        let report = run(&store, &config(dir.path())).await.unwrap();

        assert!(report.skipped_files.is_empty());
        assert_eq!(report.cart_lines.created, 1);
        assert_eq!(report.ratings.created, 2);

        let skipped: Vec<_> = report
            .skipped_rows
            .iter()
            .filter(|s| s.phase == Phase::CartLines)
            .map(|s| s.row_id)
            .collect();
        assert_eq!(skipped, vec![2, 3]);
        assert!(matches!(
            report.skipped_rows.iter().find(|s| s.row_id == 3).map(|s| &s.reason),
            Some(RowError::Field("Quantity"))
        ));

        assert_eq!(cart_line::Entity::find().count(store.db()).await.unwrap(), 1);
        assert_eq!(user_rating::Entity::find().count(store.db()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_required_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), GENRE_FILE, GENRES);
        let store = store().await;

        let err = run(&store, &config(dir.path())).await.unwrap_err();

        match err {
            SeedError::CsvNotFound { file, tried } => {
                assert_eq!(file, POSTER_FILE);
                assert_eq!(tried.len(), 2);
            },
            other => panic!("expected CsvNotFound, got {other:?}"),
        }
        assert_eq!(genre::Entity::find().count(store.db()).await.unwrap(), 2);
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn genre_without_slug_aborts() {
        let dir = catalog_dir();
        write(dir.path(), GENRE_FILE, "id,title,slug\n1,Action,\n");
        let store = store().await;

        let err = run(&store, &config(dir.path())).await.unwrap_err();
        assert!(matches!(err, SeedError::InvalidRow { entity: "genre", .. }), "got {err:?}");
    }
}
