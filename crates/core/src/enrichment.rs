//! Song detail enrichment over HTTP.
//!
//! The lookup service is queried with `GET {base_url}/info?group=..&song=..` and answers with a
//! JSON object `{"releaseDate": .., "text": .., "link": ..}`.
//!
//! Query parameters are always URL-encoded by the request builder, so group names and titles
//! containing `&`, `#`, `?` or spaces reach the service intact. Each lookup is a single
//! request: there are no retries, and any timeout comes from the HTTP client configuration.

use async_trait::async_trait;
use std::time::Duration;

use crate::constants::ENRICHMENT_INFO_PATH;
use crate::song::SongDetail;

/// Errors that can occur while fetching song details.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("lookup service returned HTTP {0}")]
    Status(u16),
    #[error("failed to parse lookup response: {0}")]
    Parse(String),
}

/// Source of song details for a (group, title) pair.
///
/// The catalog service depends on this trait rather than on [`EnrichmentClient`] so tests can
/// substitute an in-memory implementation.
#[async_trait]
pub trait SongDetailSource: Send + Sync {
    async fn fetch_detail(&self, group: &str, title: &str) -> Result<SongDetail, EnrichmentError>;
}

/// HTTP client for the song lookup service.
#[derive(Clone, Debug)]
pub struct EnrichmentClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl EnrichmentClient {
    /// Create a client for the lookup service at `base_url`.
    ///
    /// `base_url` is expected to be validated already (see
    /// [`crate::validation::validate_enrichment_base_url`]).
    ///
    /// # Errors
    ///
    /// Returns `EnrichmentError::Client` if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, EnrichmentError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| EnrichmentError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn info_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            ENRICHMENT_INFO_PATH
        )
    }

    /// Look up release date, lyrics and link for a song.
    pub async fn fetch_detail(
        &self,
        group: &str,
        title: &str,
    ) -> Result<SongDetail, EnrichmentError> {
        let url = self.info_url();
        tracing::debug!(%url, group, song = title, "fetching song details");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", title)])
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        serde_json::from_str::<SongDetail>(&body).map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SongDetailSource for EnrichmentClient {
    async fn fetch_detail(&self, group: &str, title: &str) -> Result<SongDetail, EnrichmentError> {
        EnrichmentClient::fetch_detail(self, group, title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    async fn spawn_lookup_service(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        format!("http://{addr}")
    }

    async fn echo_info(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "releaseDate": "16.07.2006",
            "text": format!("{} / {}", params["group"], params["song"]),
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw",
        }))
    }

    #[test]
    fn test_info_url_joins_path() {
        let client = EnrichmentClient::new("http://localhost:9000/", None).unwrap();
        assert_eq!(client.info_url(), "http://localhost:9000/info");
        assert_eq!(client.base_url(), "http://localhost:9000/");
    }

    #[tokio::test]
    async fn test_fetch_detail_maps_response() {
        let base = spawn_lookup_service(Router::new().route("/info", get(echo_info))).await;
        let client = EnrichmentClient::new(base, None).unwrap();

        let detail = client.fetch_detail("Muse", "Supermassive Black Hole").await.unwrap();

        assert_eq!(detail.release_date, "16.07.2006");
        assert_eq!(detail.text, "Muse / Supermassive Black Hole");
        assert_eq!(detail.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");
    }

    #[tokio::test]
    async fn test_fetch_detail_encodes_special_characters() {
        let base = spawn_lookup_service(Router::new().route("/info", get(echo_info))).await;
        let client = EnrichmentClient::new(base, None).unwrap();

        let detail = client.fetch_detail("AC/DC & Friends", "Who? #1 =50%").await.unwrap();

        assert_eq!(detail.text, "AC/DC & Friends / Who? #1 =50%");
    }

    #[tokio::test]
    async fn test_fetch_detail_missing_fields_are_empty() {
        let app = Router::new().route(
            "/info",
            get(|| async { Json(serde_json::json!({ "text": "only lyrics" })) }),
        );
        let base = spawn_lookup_service(app).await;
        let client = EnrichmentClient::new(base, None).unwrap();

        let detail = client.fetch_detail("a", "b").await.unwrap();
        assert_eq!(detail.text, "only lyrics");
        assert_eq!(detail.release_date, "");
        assert_eq!(detail.link, "");
    }

    #[tokio::test]
    async fn test_fetch_detail_non_success_status() {
        let app = Router::new().route("/info", get(|| async { StatusCode::BAD_GATEWAY }));
        let base = spawn_lookup_service(app).await;
        let client = EnrichmentClient::new(base, None).unwrap();

        let err = client.fetch_detail("a", "b").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::Status(502)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_detail_malformed_body() {
        let app = Router::new().route("/info", get(|| async { "not json" }));
        let base = spawn_lookup_service(app).await;
        let client = EnrichmentClient::new(base, None).unwrap();

        let err = client.fetch_detail("a", "b").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_detail_unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = EnrichmentClient::new(format!("http://{addr}"), None).unwrap();
        let err = client.fetch_detail("a", "b").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::Network(_)), "got {err:?}");
    }
}
