use clickwheel::collab::{TrackMeta, TrackResolver, TrackUrl};
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const CACHE_CAPACITY: usize = 512;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("Not a web link: {0}")]
    NotALink(TrackUrl),
}

/// The subset of an oEmbed response a track row needs.
#[derive(Debug, Clone, Deserialize)]
struct OEmbed {
    title: String,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl OEmbed {
    fn into_meta(self, url: &TrackUrl) -> TrackMeta {
        TrackMeta {
            title: self.title,
            artist: self.author_name.unwrap_or_default(),
            art_src: self.thumbnail_url,
            canonical_url: url.clone(),
        }
    }
}

/// Looks track links up on an oEmbed endpoint. Up to `capacity` successful
/// lookups are kept; past that an arbitrary entry makes room.
pub struct OEmbedResolver {
    agent: ureq::Agent,
    endpoint: String,
    cache: Mutex<HashMap<TrackUrl, TrackMeta>>,
    capacity: usize,
}

impl OEmbedResolver {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::config_builder()
                .timeout_global(Some(REQUEST_TIMEOUT))
                .build()
                .into(),
            endpoint: endpoint.into(),
            cache: Mutex::new(HashMap::new()),
            capacity: CACHE_CAPACITY,
        }
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    fn remember(&self, url: &TrackUrl, meta: &TrackMeta) {
        let mut cache = self.cache.lock();
        if !cache.contains_key(url)
            && cache.len() >= self.capacity
            && let Some(evicted) = cache.keys().next().cloned()
        {
            cache.remove(&evicted);
        }
        cache.insert(url.clone(), meta.clone());
    }

    fn fetch(&self, url: &TrackUrl) -> Result<TrackMeta, ResolveError> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ResolveError::NotALink(url.clone()));
        }
        let oembed: OEmbed = self
            .agent
            .get(&self.endpoint)
            .query("url", url.as_str())
            .call()?
            .into_body()
            .read_json()?;
        Ok(oembed.into_meta(url))
    }
}

impl TrackResolver for OEmbedResolver {
    fn resolve_track(&self, url: &TrackUrl) -> Option<TrackMeta> {
        if let Some(meta) = self.cache.lock().get(url) {
            return Some(meta.clone());
        }
        match self.fetch(url) {
            Ok(meta) => {
                self.remember(url, &meta);
                Some(meta)
            }
            Err(e) => {
                log::warn!("Could not resolve {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oembed_response_maps_to_meta() {
        let json = r#"{
            "title": "Harvest Moon",
            "author_name": "Neil Young",
            "thumbnail_url": "https://img/1.jpg",
            "provider_name": "Spotify",
            "html": "<iframe></iframe>"
        }"#;
        let url = TrackUrl::new("https://open.spotify.com/track/1");
        let meta = serde_json::from_str::<OEmbed>(json).unwrap().into_meta(&url);
        assert_eq!(meta.title, "Harvest Moon");
        assert_eq!(meta.artist, "Neil Young");
        assert_eq!(meta.art_src.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(meta.canonical_url, url);
    }

    #[test]
    fn test_missing_author_is_blank() {
        let url = TrackUrl::new("https://t/1");
        let meta = serde_json::from_str::<OEmbed>(r#"{"title": "Untitled"}"#)
            .unwrap()
            .into_meta(&url);
        assert_eq!(meta.artist, "");
        assert_eq!(meta.art_src, None);
    }

    #[test]
    fn test_non_links_resolve_to_none_without_a_request() {
        let resolver = OEmbedResolver::new("http://127.0.0.1:9/oembed");
        assert!(matches!(
            resolver.fetch(&TrackUrl::new("spotify:track:1")),
            Err(ResolveError::NotALink(_))
        ));
        assert_eq!(resolver.resolve_track(&TrackUrl::new("not a link")), None);
    }

    #[test]
    fn test_cache_stays_within_capacity() {
        let resolver = OEmbedResolver::new("http://127.0.0.1:9/oembed").with_cache_capacity(2);
        let urls: Vec<_> = (0..5)
            .map(|i| TrackUrl::new(format!("https://t/{i}")))
            .collect();
        for url in &urls {
            let meta = serde_json::from_str::<OEmbed>(r#"{"title": "T"}"#)
                .unwrap()
                .into_meta(url);
            resolver.remember(url, &meta);
        }
        assert_eq!(resolver.cache.lock().len(), 2);
        assert!(resolver.resolve_track(&urls[4]).is_some());
    }
}
