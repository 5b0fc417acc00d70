//! Async HTTP client wrapping the stance JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use stance_core::{
  classroom::{SubmissionReceipt, TopicResults},
  submission::SubmissionForm,
  topic::Topic,
};
use std::time::Duration;

/// Connection settings for the stance API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Body of `GET /api/topics`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicList {
  pub topics:  Vec<Topic>,
  pub default: Topic,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the stance JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  base:   Url,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    let base = Url::parse(&config.base_url)
      .with_context(|| format!("invalid base URL {:?}", config.base_url))?;
    Ok(Self { client, base })
  }

  /// `{base}/api/{segments...}`, each segment percent-encoded.
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| anyhow!("base URL {} cannot take a path", self.base))?
      .pop_if_empty()
      .push("api")
      .extend(segments);
    Ok(url)
  }

  /// Turn a non-success response into an error carrying the server's message.
  async fn failure(resp: Response, what: &str) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
      Ok(body) => anyhow!("{what} → {status}: {}", body.error),
      Err(_) => anyhow!("{what} → {status}"),
    }
  }

  // ── Topics ────────────────────────────────────────────────────────────────

  /// `GET /api/topics`
  pub async fn list_topics(&self) -> Result<TopicList> {
    let resp = self
      .client
      .get(self.url(&["topics"])?)
      .send()
      .await
      .context("GET /topics failed")?;

    if !resp.status().is_success() {
      return Err(Self::failure(resp, "GET /topics").await);
    }
    resp.json().await.context("deserialising topics")
  }

  // ── Submissions ───────────────────────────────────────────────────────────

  /// `POST /api/topics/{topic}/submissions`
  pub async fn submit(&self, form: &SubmissionForm) -> Result<SubmissionReceipt> {
    let resp = self
      .client
      .post(self.url(&["topics", form.topic.as_str(), "submissions"])?)
      .json(form)
      .send()
      .await
      .context("POST /submissions failed")?;

    if !resp.status().is_success() {
      return Err(Self::failure(resp, "POST /submissions").await);
    }
    resp.json().await.context("deserialising submission receipt")
  }

  // ── Results ───────────────────────────────────────────────────────────────

  /// `GET /api/topics/{topic}/results`
  pub async fn results(&self, topic: &Topic) -> Result<TopicResults> {
    let resp = self
      .client
      .get(self.url(&["topics", topic.as_str(), "results"])?)
      .send()
      .await
      .with_context(|| format!("GET /topics/{topic}/results failed"))?;

    if !resp.status().is_success() {
      return Err(Self::failure(resp, "GET /results").await);
    }
    resp.json().await.context("deserialising results")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base: &str) -> ApiClient {
    ApiClient::new(ApiConfig { base_url: base.into() }).unwrap()
  }

  #[test]
  fn url_appends_api_prefix_once() {
    let c = client("http://localhost:8080/");
    assert_eq!(
      c.url(&["topics"]).unwrap().as_str(),
      "http://localhost:8080/api/topics"
    );
  }

  #[test]
  fn url_encodes_topic_segments() {
    let c = client("http://localhost:8080/class");
    let url = c.url(&["topics", "week 1/2", "results"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/class/api/topics/week%201%2F2/results");
  }

  #[test]
  fn invalid_base_url_is_rejected() {
    assert!(ApiClient::new(ApiConfig { base_url: "not a url".into() }).is_err());
  }
}
