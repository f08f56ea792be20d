//! In-memory [`CacheStorage`] and [`Network`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::lifecycle::{CacheStorage, Network};
use crate::types::{Request, Response};

type Entries = Vec<(Request, Response)>;

/// Caches in creation order; entries keyed by URL.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    caches: Mutex<Vec<(String, Entries)>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_names(&self) -> Vec<String> {
        self.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// URLs stored in `cache`, in insertion order.
    pub fn urls(&self, cache: &str) -> Vec<String> {
        self.lock()
            .iter()
            .find(|(name, _)| name == cache)
            .map(|(_, entries)| entries.iter().map(|(req, _)| req.url.clone()).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, Entries)>> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(caches: &mut Vec<(String, Entries)>, cache: &str, request: Request, response: Response) {
        let index = match caches.iter().position(|(name, _)| name == cache) {
            Some(index) => index,
            None => {
                caches.push((cache.to_string(), Vec::new()));
                caches.len() - 1
            }
        };
        let entries = &mut caches[index].1;
        entries.retain(|(req, _)| req.url != request.url);
        entries.push((request, response));
    }
}

impl CacheStorage for MemoryCacheStorage {
    async fn keys(&self) -> Vec<String> {
        self.cache_names()
    }

    async fn match_request(&self, request: &Request) -> Option<Response> {
        self.lock().iter().find_map(|(_, entries)| {
            entries
                .iter()
                .find(|(req, _)| req.url == request.url && req.method == request.method)
                .map(|(_, response)| response.clone())
        })
    }

    async fn put(&self, cache: &str, request: Request, response: Response) {
        Self::insert(&mut self.lock(), cache, request, response);
    }

    async fn put_all(&self, cache: &str, entries: Vec<(Request, Response)>) {
        let mut caches = self.lock();
        for (request, response) in entries {
            Self::insert(&mut caches, cache, request, response);
        }
    }

    async fn delete(&self, cache: &str) -> bool {
        let mut caches = self.lock();
        let before = caches.len();
        caches.retain(|(name, _)| name != cache);
        caches.len() != before
    }
}

/// Network that answers from a fixed route table and records every call.
/// Unrouted URLs fail like an unreachable host.
#[derive(Debug, Default)]
pub struct StaticNetwork {
    routes: Mutex<HashMap<String, Response>>,
    calls: Mutex<Vec<Request>>,
}

impl StaticNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, response: Response) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), response);
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    pub fn last_body(&self, url: &str) -> Option<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|r| r.url == url)
            .and_then(|r| r.body.clone())
    }
}

impl Network for StaticNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.url)
            .cloned()
            .ok_or_else(|| format!("no route to {}", request.url))
    }
}
