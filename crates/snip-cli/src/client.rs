//! Async HTTP client wrapping the snip JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};
use serde::Deserialize;
use snip_core::{
  snippet::{NewSnippet, Snippet},
  subject::Subject,
};

/// Connection settings for the snip API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Wire shape of `GET /api/snippets/by-subject/:name` items.
#[derive(Debug, Deserialize)]
pub struct SnippetRef {
  pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Debug, Deserialize)]
struct DeleteConfirmation {
  message: String,
}

/// Async HTTP client for the snip JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Build a URL whose final segment is percent-encoded (subject names may
  /// contain spaces or slashes).
  fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
    let mut url = Url::parse(&self.url(path)).context("invalid base URL")?;
    url
      .path_segments_mut()
      .map_err(|_| anyhow!("base URL cannot carry paths"))?
      .push(segment);
    Ok(url)
  }

  /// Turn a failure response into an error carrying the API's message.
  async fn fail(resp: reqwest::Response, what: &str) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
      Ok(body) => anyhow!("{what} → {status}: {}", body.error),
      Err(_) => anyhow!("{what} → {status}"),
    }
  }

  // ── Snippets ──────────────────────────────────────────────────────────────

  /// `GET /api/snippets`
  pub async fn list_snippets(&self) -> Result<Vec<Snippet>> {
    let resp = self
      .client
      .get(self.url("/snippets"))
      .send()
      .await
      .context("GET /snippets failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "GET /snippets").await);
    }
    resp.json().await.context("deserialising snippets")
  }

  /// `GET /api/snippets/:id`
  pub async fn get_snippet(&self, id: i64) -> Result<Snippet> {
    let resp = self
      .client
      .get(self.url(&format!("/snippets/{id}")))
      .send()
      .await
      .context("GET /snippets/:id failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "GET /snippets/:id").await);
    }
    resp.json().await.context("deserialising snippet")
  }

  /// `GET /api/snippets/by-subject/:name`
  pub async fn snippet_ids_by_subject(&self, name: &str) -> Result<Vec<SnippetRef>> {
    let url = self.url_with_segment("/snippets/by-subject", name)?;
    let resp = self
      .client
      .get(url)
      .send()
      .await
      .context("GET /snippets/by-subject failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "GET /snippets/by-subject").await);
    }
    resp.json().await.context("deserialising snippet refs")
  }

  /// `POST /api/snippets`
  pub async fn create_snippet(&self, input: &NewSnippet) -> Result<Snippet> {
    let resp = self
      .client
      .post(self.url("/snippets"))
      .json(input)
      .send()
      .await
      .context("POST /snippets failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "POST /snippets").await);
    }
    resp.json().await.context("deserialising created snippet")
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  /// `GET /api/subjects`
  pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let resp = self
      .client
      .get(self.url("/subjects"))
      .send()
      .await
      .context("GET /subjects failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "GET /subjects").await);
    }
    resp.json().await.context("deserialising subjects")
  }

  /// `POST /api/subjects`
  pub async fn create_subject(&self, name: &str) -> Result<Subject> {
    let resp = self
      .client
      .post(self.url("/subjects"))
      .json(&serde_json::json!({ "name": name }))
      .send()
      .await
      .context("POST /subjects failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "POST /subjects").await);
    }
    resp.json().await.context("deserialising created subject")
  }

  /// `DELETE /api/subjects/:id` — returns the server's confirmation message.
  pub async fn delete_subject(&self, id: i64) -> Result<String> {
    let resp = self
      .client
      .delete(self.url(&format!("/subjects/{id}")))
      .send()
      .await
      .context("DELETE /subjects/:id failed")?;

    if !resp.status().is_success() {
      return Err(Self::fail(resp, "DELETE /subjects/:id").await);
    }
    let confirmation: DeleteConfirmation =
      resp.json().await.context("deserialising confirmation")?;
    Ok(confirmation.message)
  }
}
