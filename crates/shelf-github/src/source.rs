//! [`GithubSource`] — a [`ContentSource`] over the GitHub contents API.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, header};
use shelf_core::{
  source::{ContentSource, Listing, ListingWarning, RemoteContent, RemoteFile},
  taxonomy::{is_document, is_hidden},
};
use tracing::{debug, info, instrument, warn};

use crate::{
  error::{GithubError, Result},
  types::{ApiMessage, ContentEntry, ContentsResponse, EntryKind},
};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OWNER: &str = "jon890";
pub const DEFAULT_REPO: &str = "fos-study";

const USER_AGENT: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Which repository to mirror and how to reach it.
#[derive(Debug, Clone)]
pub struct GithubConfig {
  pub owner:    String,
  pub repo:     String,
  /// Branch, tag or commit; `None` uses the repository default branch.
  pub branch:   Option<String>,
  /// Personal access token. Anonymous requests are heavily rate limited.
  pub token:    Option<String>,
  pub api_base: String,
}

impl Default for GithubConfig {
  fn default() -> Self {
    Self {
      owner:    DEFAULT_OWNER.to_owned(),
      repo:     DEFAULT_REPO.to_owned(),
      branch:   None,
      token:    None,
      api_base: DEFAULT_API_BASE.to_owned(),
    }
  }
}

/// Reads a Markdown tree out of one GitHub repository.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GithubSource {
  client: Client,
  config: GithubConfig,
}

impl GithubSource {
  pub fn new(config: GithubConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .user_agent(USER_AGENT)
      .build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &GithubConfig { &self.config }

  /// `{api_base}/repos/{owner}/{repo}/contents[/{path}]`, each path segment
  /// percent-encoded.
  fn contents_url(&self, path: &str) -> String {
    let mut url = format!(
      "{}/repos/{}/{}/contents",
      self.config.api_base.trim_end_matches('/'),
      urlencoding::encode(&self.config.owner),
      urlencoding::encode(&self.config.repo),
    );
    for segment in path.split('/').filter(|s| !s.is_empty()) {
      url.push('/');
      url.push_str(&urlencoding::encode(segment));
    }
    url
  }

  /// GET one contents resource, retrying rate limits and server errors with
  /// exponential backoff.
  #[instrument(skip(self))]
  async fn get_contents(&self, path: &str) -> Result<ContentsResponse> {
    let url = self.contents_url(path);
    let mut attempt = 0;

    loop {
      attempt += 1;

      let mut req = self.client.get(&url).header(header::ACCEPT, ACCEPT);
      if let Some(branch) = &self.config.branch {
        req = req.query(&[("ref", branch)]);
      }
      if let Some(token) = &self.config.token {
        req = req.bearer_auth(token);
      }

      let resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) if attempt < MAX_ATTEMPTS => {
          let backoff = backoff(attempt);
          warn!("request failed (attempt {attempt}/{MAX_ATTEMPTS}): {e}, retrying in {backoff:?}");
          tokio::time::sleep(backoff).await;
          continue;
        }
        Err(e) => return Err(e.into()),
      };

      let status = resp.status();
      if status.is_success() {
        debug!("contents request succeeded: status={status}");
        return Ok(resp.json().await?);
      }

      if status == StatusCode::NOT_FOUND {
        return Err(GithubError::NotFound(path.to_owned()));
      }

      let retryable = status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
        || (status == StatusCode::FORBIDDEN && rate_limit_exhausted(resp.headers()));
      if retryable && attempt < MAX_ATTEMPTS {
        let backoff = backoff(attempt);
        warn!("contents request failed (attempt {attempt}/{MAX_ATTEMPTS}): status={status}, retrying in {backoff:?}");
        tokio::time::sleep(backoff).await;
        continue;
      }

      let message = match resp.json::<ApiMessage>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
      };
      return Err(GithubError::Api { status: status.as_u16(), message });
    }
  }

  async fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>> {
    match self.get_contents(path).await? {
      ContentsResponse::Directory(entries) => Ok(entries),
      ContentsResponse::File(_) => Err(GithubError::UnexpectedKind {
        path:     path.to_owned(),
        expected: "directory",
      }),
    }
  }
}

fn backoff(attempt: u32) -> Duration { Duration::from_millis(100 * 2u64.pow(attempt)) }

/// GitHub signals its primary rate limit as a 403 with no requests left.
fn rate_limit_exhausted(headers: &header::HeaderMap) -> bool {
  headers
    .get(RATE_LIMIT_REMAINING)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| v.trim() == "0")
}

/// Decode GitHub's newline-wrapped base64 file body.
fn decode_content(path: &str, encoded: &str) -> Result<String> {
  let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
  let bytes = STANDARD.decode(compact).map_err(|e| GithubError::Decode {
    path:    path.to_owned(),
    message: e.to_string(),
  })?;
  String::from_utf8(bytes).map_err(|e| GithubError::Decode {
    path:    path.to_owned(),
    message: e.to_string(),
  })
}

// ─── ContentSource impl ──────────────────────────────────────────────────────

impl ContentSource for GithubSource {
  type Error = GithubError;

  #[instrument(skip(self), fields(owner = %self.config.owner, repo = %self.config.repo))]
  async fn list_documents(&self) -> Listing {
    let mut listing = Listing::default();
    let mut pending = vec![String::new()];

    while let Some(dir) = pending.pop() {
      let entries = match self.list_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
          let shown = if dir.is_empty() { "/" } else { dir.as_str() };
          warn!("skipping {shown}: {e}");
          listing.warnings.push(ListingWarning { path: dir, message: e.to_string() });
          continue;
        }
      };

      let mut subdirs = Vec::new();
      for entry in entries {
        if is_hidden(&entry.name) {
          debug!("skipping hidden entry {}", entry.path);
          continue;
        }
        match entry.kind {
          EntryKind::Dir => subdirs.push(entry.path),
          EntryKind::File if is_document(&entry.name) => {
            listing.files.push(RemoteFile {
              name: entry.name,
              path: entry.path,
              sha:  entry.sha,
            });
          }
          _ => debug!("skipping {}", entry.path),
        }
      }

      // Reverse so directories are visited in listing order.
      pending.extend(subdirs.into_iter().rev());
    }

    info!(
      files = listing.files.len(),
      warnings = listing.warnings.len(),
      "listed remote documents"
    );
    listing
  }

  #[instrument(skip(self))]
  async fn fetch<'a>(&'a self, path: &'a str) -> Result<RemoteContent> {
    let file = match self.get_contents(path).await? {
      ContentsResponse::File(file) if file.kind == EntryKind::File => file,
      _ => {
        return Err(GithubError::UnexpectedKind { path: path.to_owned(), expected: "file" });
      }
    };

    // Blobs over 1 MB come back with encoding "none" and an empty body.
    let content = match (file.encoding.as_deref(), file.content.as_deref()) {
      (Some("base64"), Some(body)) => decode_content(path, body)?,
      (Some("base64"), None) => {
        return Err(GithubError::Decode {
          path:    path.to_owned(),
          message: "response carried no content".into(),
        });
      }
      (encoding, _) => {
        return Err(GithubError::Decode {
          path:    path.to_owned(),
          message: format!("unsupported content encoding `{}`", encoding.unwrap_or("none")),
        });
      }
    };

    Ok(RemoteContent { path: file.path, content, sha: file.sha })
  }
}
