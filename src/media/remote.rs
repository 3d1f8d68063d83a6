// SPDX-License-Identifier: MPL-2.0
//! Remote image cache.
//!
//! Gallery records only carry a URL. Images are downloaded on demand and kept
//! as decoded-on-draw [`Handle`]s keyed by URL.
//!
//! # Design
//!
//! - **URL-keyed**: one entry per distinct URL, shared by every tile showing it
//! - **List-bounded**: [`ImageCache::sync`] drops entries whose URL left the
//!   gallery, so memory follows the current snapshot
//! - **Late results discarded**: a download finishing for a pruned URL is ignored
//!
//! # Usage
//!
//! ```ignore
//! let to_fetch = cache.sync(images.iter().map(|image| image.url.as_str()));
//! for url in to_fetch {
//!     // spawn `fetch(client.clone(), url)` and feed the result to `resolve`
//! }
//! ```

use crate::error::NetworkError;
use iced::widget::image::Handle;
use reqwest::Url;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Duration of the fade-in once an image is ready.
pub const FADE_IN: Duration = Duration::from_millis(400);

/// State of one remote image.
#[derive(Debug, Clone)]
pub enum RemoteImage {
    Loading,
    Ready { handle: Handle, ready_at: Instant },
    Failed(NetworkError),
}

impl RemoteImage {
    /// Opacity for the fade-in at `now`, in `0.0..=1.0`.
    #[must_use]
    pub fn opacity_at(&self, now: Instant) -> f32 {
        match self {
            RemoteImage::Ready { ready_at, .. } => {
                let elapsed = now.saturating_duration_since(*ready_at);
                (elapsed.as_secs_f32() / FADE_IN.as_secs_f32()).min(1.0)
            }
            RemoteImage::Loading | RemoteImage::Failed(_) => 0.0,
        }
    }

    #[must_use]
    pub fn handle(&self) -> Option<&Handle> {
        match self {
            RemoteImage::Ready { handle, .. } => Some(handle),
            _ => None,
        }
    }
}

/// Download state for every image URL of the current gallery.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, RemoteImage>,
}

impl ImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&RemoteImage> {
        self.entries.get(url)
    }

    /// Aligns the cache with the URLs of a new image list.
    ///
    /// Entries for URLs no longer listed are dropped. New URLs are marked
    /// [`RemoteImage::Loading`] and returned, in first-seen order, so the
    /// caller can start their downloads.
    pub fn sync<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut wanted = HashSet::new();
        let mut to_fetch = Vec::new();

        for url in urls {
            if !wanted.insert(url) {
                continue;
            }
            if !self.entries.contains_key(url) {
                self.entries.insert(url.to_string(), RemoteImage::Loading);
                to_fetch.push(url.to_string());
            }
        }

        self.entries.retain(|url, _| wanted.contains(url.as_str()));
        to_fetch
    }

    /// Stores the outcome of a download.
    ///
    /// Returns `false` when the URL is no longer tracked; the result is
    /// discarded in that case.
    pub fn resolve(&mut self, url: &str, result: Result<Handle, NetworkError>, now: Instant) -> bool {
        let Some(entry) = self.entries.get_mut(url) else {
            return false;
        };
        *entry = match result {
            Ok(handle) => RemoteImage::Ready {
                handle,
                ready_at: now,
            },
            Err(error) => RemoteImage::Failed(error),
        };
        true
    }

    /// True while some image is still fading in at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.entries
            .values()
            .any(|entry| matches!(entry, RemoteImage::Ready { .. }) && entry.opacity_at(now) < 1.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Checks that `url` is an absolute http(s) URL.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidUrl`] otherwise.
pub fn validate_url(url: &str) -> Result<Url, NetworkError> {
    let parsed = Url::parse(url).map_err(|_| NetworkError::InvalidUrl(url.to_string()))?;
    if matches!(parsed.scheme(), "http" | "https") {
        Ok(parsed)
    } else {
        Err(NetworkError::InvalidUrl(url.to_string()))
    }
}

/// Builds the HTTP client used for image downloads.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client(connect_timeout: Duration, timeout: Duration) -> Result<reqwest::Client, NetworkError> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(NetworkError::from)
}

/// Downloads the image at `url`.
///
/// The bytes are handed to iced undecoded; decoding happens on draw.
///
/// # Errors
///
/// Returns an error for invalid URLs, transport failures, non-success
/// statuses and empty bodies.
pub async fn fetch(client: reqwest::Client, url: String) -> Result<Handle, NetworkError> {
    let parsed = validate_url(&url)?;
    let response = client.get(parsed).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(NetworkError::EmptyBody);
    }
    Ok(Handle::from_bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn handle() -> Handle {
        Handle::from_bytes(vec![0u8; 4])
    }

    #[test]
    fn sync_returns_new_urls_once() {
        let mut cache = ImageCache::new();
        let to_fetch = cache.sync(["https://img/a.jpg", "https://img/b.jpg", "https://img/a.jpg"]);
        assert_eq!(to_fetch, vec!["https://img/a.jpg", "https://img/b.jpg"]);

        let again = cache.sync(["https://img/a.jpg", "https://img/b.jpg"]);
        assert!(again.is_empty());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn sync_prunes_removed_urls() {
        let mut cache = ImageCache::new();
        cache.sync(["https://img/a.jpg", "https://img/b.jpg"]);
        cache.sync(["https://img/b.jpg"]);

        assert!(cache.get("https://img/a.jpg").is_none());
        assert!(matches!(cache.get("https://img/b.jpg"), Some(RemoteImage::Loading)));
    }

    #[test]
    fn resolve_discards_pruned_urls() {
        let mut cache = ImageCache::new();
        cache.sync(["https://img/a.jpg"]);
        cache.sync(std::iter::empty());

        assert!(!cache.resolve("https://img/a.jpg", Ok(handle()), Instant::now()));
        assert!(cache.is_empty());
    }

    #[test]
    fn resolve_records_failures() {
        let mut cache = ImageCache::new();
        cache.sync(["https://img/a.jpg"]);
        assert!(cache.resolve("https://img/a.jpg", Err(NetworkError::Status(404)), Instant::now()));

        assert!(matches!(
            cache.get("https://img/a.jpg"),
            Some(RemoteImage::Failed(NetworkError::Status(404)))
        ));
    }

    #[test]
    fn ready_image_fades_in() {
        let start = Instant::now();
        let mut cache = ImageCache::new();
        cache.sync(["https://img/a.jpg"]);
        cache.resolve("https://img/a.jpg", Ok(handle()), start);

        let entry = cache.get("https://img/a.jpg").expect("tracked");
        assert_abs_diff_eq!(entry.opacity_at(start), 0.0);
        assert_abs_diff_eq!(entry.opacity_at(start + FADE_IN / 2), 0.5, epsilon = 0.01);
        assert_abs_diff_eq!(entry.opacity_at(start + FADE_IN * 3), 1.0);
        assert!(cache.is_animating(start));
        assert!(!cache.is_animating(start + FADE_IN));
        assert!(entry.handle().is_some());
    }

    #[test]
    fn only_http_urls_are_fetchable() {
        assert!(validate_url("https://firebasestorage.googleapis.com/v0/b/x/o/a.jpg").is_ok());
        assert!(validate_url("http://localhost/a.png").is_ok());
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(NetworkError::InvalidUrl(_))
        ));
        assert!(matches!(validate_url("a.jpg"), Err(NetworkError::InvalidUrl(_))));
    }
}
