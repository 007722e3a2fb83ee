//! SQLite song store.
//!
//! Uses SQLx with an embedded migration set. Deletes are soft: a deleted row keeps its id and
//! gets a `deleted_at` timestamp, and every query here only sees rows where `deleted_at` is
//! null. Together with `AUTOINCREMENT` this keeps ids from ever being handed out twice.
//!
//! SQLite's `lower()` folds ASCII letters only, so each row also stores `group_name_folded`
//! and `title_folded`, written from [`fold`] on every insert and update. Filters match against
//! those columns.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;

use super::{fold, SongFilter, SongStore, StoreError, StoreResult};
use crate::song::{NewSong, Song, SongId};

const SONG_COLUMNS: &str =
    "id, group_name, title, release_date, text, link, created_at, updated_at";

/// Open (creating if needed) the database at `db_url` and run pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - the database file cannot be created,
/// - a connection cannot be established, or
/// - a migration fails.
pub async fn init_db(db_url: &str, max_connections: u32) -> StoreResult<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// [`SongStore`] backed by a SQLite connection pool.
#[derive(Clone, Debug)]
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn create(&self, song: NewSong) -> StoreResult<Song> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO songs (group_name, title, group_name_folded, title_folded, release_date, \
             text, link, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {SONG_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Song>(&sql)
            .bind(song.group_name.as_str())
            .bind(song.title.as_str())
            .bind(fold(song.group_name.as_str()))
            .bind(fold(song.title.as_str()))
            .bind(&song.detail.release_date)
            .bind(&song.detail.text)
            .bind(&song.detail.link)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: SongId) -> StoreResult<Song> {
        let sql = format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ? AND deleted_at IS NULL");

        sqlx::query_as::<_, Song>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, song: &Song) -> StoreResult<Song> {
        let sql = format!(
            "UPDATE songs SET group_name = ?, title = ?, group_name_folded = ?, title_folded = ?, \
             release_date = ?, text = ?, link = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL RETURNING {SONG_COLUMNS}"
        );

        sqlx::query_as::<_, Song>(&sql)
            .bind(&song.group_name)
            .bind(&song.title)
            .bind(fold(&song.group_name))
            .bind(fold(&song.title))
            .bind(&song.release_date)
            .bind(&song.text)
            .bind(&song.link)
            .bind(Utc::now())
            .bind(song.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: SongId) -> StoreResult<()> {
        let result =
            sqlx::query("UPDATE songs SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn query_paged(
        &self,
        filters: &[SongFilter],
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Song>> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE deleted_at IS NULL"
        ));

        for filter in filters {
            qb.push(" AND instr(")
                .push(filter.field().column())
                .push(", ")
                .push_bind(filter.folded_needle())
                .push(") > 0");
        }

        // SQLite takes signed 64-bit LIMIT/OFFSET.
        qb.push(" ORDER BY id LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let songs = qb.build_query_as::<Song>().fetch_all(&self.pool).await?;
        Ok(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::SongDetail;
    use crate::store::FilterField;
    use songlib_types::NonEmptyText;
    use tempfile::TempDir;

    async fn temp_store() -> (SqliteSongStore, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_url = format!("sqlite:{}", dir.path().join("songs.db").display());
        let pool = init_db(&db_url, 1)
            .await
            .expect("Failed to initialise test database");
        (SqliteSongStore::new(pool), dir)
    }

    fn new_song(group_name: &str, title: &str, text: &str) -> NewSong {
        NewSong::new(
            NonEmptyText::new(group_name).unwrap(),
            NonEmptyText::new(title).unwrap(),
            SongDetail {
                release_date: "16.07.2006".into(),
                text: text.into(),
                link: "https://example.com/watch".into(),
            },
        )
    }

    #[tokio::test]
    async fn test_init_db_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let db_url = format!("sqlite:{}", path.display());

        init_db(&db_url, 1).await.expect("init_db should succeed");
        assert!(path.is_file());

        // Re-running migrations against an existing database is a no-op.
        init_db(&db_url, 1).await.expect("second init_db should succeed");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_persists_all_fields() {
        let (store, _dir) = temp_store().await;

        let created = store.create(new_song("Muse", "Hysteria", "It's bugging me")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.group_name, "Muse");
        assert_eq!(created.title, "Hysteria");
        assert_eq!(created.release_date, "16.07.2006");
        assert_eq!(created.text, "It's bugging me");
        assert_eq!(created.link, "https://example.com/watch");

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (store, _dir) = temp_store().await;
        assert!(matches!(store.get_by_id(42).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let (store, _dir) = temp_store().await;
        let mut song = store.create(new_song("Muse", "Hysteria", "old")).await.unwrap();

        song.text = "new lyrics".into();
        song.link = String::new();
        let updated = store.update(&song).await.unwrap();

        assert_eq!(updated.id, song.id);
        assert_eq!(updated.text, "new lyrics");
        assert_eq!(updated.link, "");
        assert_eq!(updated.created_at, song.created_at);
        assert!(updated.updated_at >= song.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (store, _dir) = temp_store().await;
        let mut song = store.create(new_song("Muse", "Hysteria", "")).await.unwrap();
        song.id += 100;
        assert!(matches!(store.update(&song).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_hides_song_and_never_reuses_id() {
        let (store, _dir) = temp_store().await;
        let first = store.create(new_song("Muse", "Hysteria", "")).await.unwrap();

        store.delete_by_id(first.id).await.unwrap();

        assert!(matches!(store.get_by_id(first.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete_by_id(first.id).await, Err(StoreError::NotFound)));
        assert!(store.query_paged(&[], 0, 10).await.unwrap().is_empty());

        let second = store.create(new_song("Muse", "Uprising", "")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (store, _dir) = temp_store().await;
        assert!(matches!(store.delete_by_id(9).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_query_paged_filters_and_pages() {
        let (store, _dir) = temp_store().await;
        for (group_name, title) in [
            ("The Cats", "Black Cat Blues"),
            ("Muse", "Hysteria"),
            ("CATALYST", "Moon"),
            ("The Cats", "Sunrise"),
        ] {
            store.create(new_song(group_name, title, "")).await.unwrap();
        }

        let cats = [SongFilter::new(FilterField::GroupName, "cat").unwrap()];
        let found = store.query_paged(&cats, 0, 10).await.unwrap();
        let titles: Vec<_> = found.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Black Cat Blues", "Moon", "Sunrise"]);

        let both = [
            SongFilter::new(FilterField::GroupName, "the cats").unwrap(),
            SongFilter::new(FilterField::Title, "SUN").unwrap(),
        ];
        let found = store.query_paged(&both, 0, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Sunrise");

        let page_two = store.query_paged(&[], 2, 2).await.unwrap();
        let titles: Vec<_> = page_two.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Moon", "Sunrise"]);

        assert!(store.query_paged(&[], 10, 10).await.unwrap().is_empty());
        assert_eq!(store.query_paged(&[], 0, u64::MAX).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_query_filter_folds_cyrillic() {
        let (store, _dir) = temp_store().await;
        store.create(new_song("Кино", "Группа крови", "")).await.unwrap();
        store.create(new_song("Muse", "Hysteria", "")).await.unwrap();

        let filters = [SongFilter::new(FilterField::GroupName, "кино").unwrap()];
        let found = store.query_paged(&filters, 0, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].group_name, "Кино");
        assert!(filters[0].matches(&found[0]));

        let filters = [SongFilter::new(FilterField::Title, "КРОВИ").unwrap()];
        assert_eq!(store.query_paged(&filters, 0, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_refreshes_folded_names() {
        let (store, _dir) = temp_store().await;
        let mut song = store.create(new_song("Muse", "Hysteria", "")).await.unwrap();

        song.group_name = "Ария".into();
        store.update(&song).await.unwrap();

        let old = [SongFilter::new(FilterField::GroupName, "muse").unwrap()];
        assert!(store.query_paged(&old, 0, 10).await.unwrap().is_empty());
        let new = [SongFilter::new(FilterField::GroupName, "АРИЯ").unwrap()];
        assert_eq!(store.query_paged(&new, 0, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_query_filter_wildcards_are_literal() {
        let (store, _dir) = temp_store().await;
        store.create(new_song("100% Pure", "A", "")).await.unwrap();
        store.create(new_song("Pure", "B", "")).await.unwrap();

        let filters = [SongFilter::new(FilterField::GroupName, "%").unwrap()];
        let found = store.query_paged(&filters, 0, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].group_name, "100% Pure");
    }
}
