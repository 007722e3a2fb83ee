//! # Song Library Core
//!
//! Core business logic for the song library catalog.
//!
//! This crate contains:
//! - the catalog service (add, list, get, update, delete, verse pages)
//! - verse segmentation of lyric text
//! - the HTTP enrichment client that resolves release date, lyrics and link
//! - the song store contract and its SQLite implementation
//! - startup configuration
//!
//! **No API concerns**: HTTP routing, status codes and wire DTOs belong in `api-rest` and
//! `api-shared`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod error;
pub mod song;
pub mod store;
pub mod validation;
pub mod verses;

pub use catalog::{CatalogService, Page, SongListQuery, SongUpdate};
pub use config::CoreConfig;
pub use enrichment::{EnrichmentClient, EnrichmentError, SongDetailSource};
pub use error::{CatalogError, CatalogResult};
pub use song::{NewSong, Song, SongDetail, SongId, SongPatch};
pub use songlib_types::NonEmptyText;
pub use store::{init_db, FilterField, SongFilter, SongStore, SqliteSongStore, StoreError};
