//! Constants used throughout the song library core crate.

/// Delimiter separating verses in lyric text: a single blank line.
pub const VERSE_DELIMITER: &str = "\n\n";

/// Default page number for song listings and verse pages.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size for song listings.
pub const DEFAULT_SONG_PAGE_LIMIT: u64 = 10;

/// Default page size for verse pagination.
pub const DEFAULT_VERSE_PAGE_LIMIT: u64 = 1;

/// Database URL used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:songlib.db";

/// Connection pool size used when `SONGLIB_DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Path of the lookup endpoint on the enrichment service, relative to its base URL.
pub const ENRICHMENT_INFO_PATH: &str = "info";
