// ── Cached link list ──
//
// Holds the last list fetched from the service as an immutable snapshot
// behind a `watch` channel. Readers take cheap `Arc` clones; every
// mutation publishes a fresh snapshot. Order is whatever the service
// returned; presentation order is the view-model's business.

use std::sync::Arc;

use linkdeck_api::Link;
use tokio::sync::watch;

type Snapshot = Arc<Vec<Arc<Link>>>;

/// Reactive store for the user's links.
pub struct LinkStore {
    snapshot: watch::Sender<Snapshot>,
    /// Bumped on every successful mutation.
    version: watch::Sender<u64>,
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// Replace the whole list, as after a successful refetch.
    pub fn replace_all(&self, links: Vec<Link>) {
        let values: Vec<Arc<Link>> = links.into_iter().map(Arc::new).collect();
        self.publish(values);
    }

    /// Insert a newly created link, or replace the entry with the same id.
    pub fn upsert(&self, link: Link) {
        let mut values = self.snapshot().as_ref().clone();
        match values.iter().position(|l| l.id == link.id) {
            Some(idx) => values[idx] = Arc::new(link),
            None => values.insert(0, Arc::new(link)),
        }
        self.publish(values);
    }

    /// Remove a link by id. Returns the removed link if it was cached.
    pub fn remove(&self, id: &str) -> Option<Arc<Link>> {
        let mut values = self.snapshot().as_ref().clone();
        let idx = values.iter().position(|l| l.id == id)?;
        let removed = values.remove(idx);
        self.publish(values);
        Some(removed)
    }

    /// Look up a cached link by id or slug.
    pub fn find(&self, id_or_slug: &str) -> Option<Arc<Link>> {
        self.snapshot()
            .iter()
            .find(|l| l.id == id_or_slug || l.slug == id_or_slug)
            .cloned()
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Current snapshot as owned links, ready for the view-model.
    pub fn links(&self) -> Vec<Link> {
        self.snapshot().iter().map(|l| Link::clone(l)).collect()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    fn publish(&self, values: Vec<Arc<Link>>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use linkdeck_api::LinkStats;

    use super::*;

    fn link(id: &str, slug: &str) -> Link {
        Link {
            id: id.into(),
            slug: slug.into(),
            destination_url: format!("https://{slug}.example.com"),
            short_url: String::new(),
            domain: None,
            title: None,
            description: None,
            favicon: None,
            tags: vec![],
            expires_at: None,
            is_password_protected: false,
            password: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            stats: LinkStats::default(),
        }
    }

    #[test]
    fn replace_all_swaps_snapshot() {
        let store = LinkStore::new();
        store.replace_all(vec![link("1", "a"), link("2", "b")]);
        assert_eq!(store.len(), 2);

        store.replace_all(vec![link("3", "c")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].id, "3");
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn upsert_inserts_new_links_first() {
        let store = LinkStore::new();
        store.replace_all(vec![link("1", "a")]);
        store.upsert(link("2", "b"));

        let ids: Vec<_> = store.snapshot().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn upsert_replaces_existing_id() {
        let store = LinkStore::new();
        store.replace_all(vec![link("1", "a")]);
        store.upsert(link("1", "renamed"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.find("1").unwrap().slug, "renamed");
    }

    #[test]
    fn remove_returns_removed_link() {
        let store = LinkStore::new();
        store.replace_all(vec![link("1", "a"), link("2", "b")]);

        assert_eq!(store.remove("1").unwrap().slug, "a");
        assert!(store.remove("1").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_matches_slug() {
        let store = LinkStore::new();
        store.replace_all(vec![link("1", "docs")]);
        assert_eq!(store.find("docs").unwrap().id, "1");
        assert!(store.find("nope").is_none());
    }

    #[test]
    fn subscribers_see_new_snapshots() {
        let store = LinkStore::new();
        let rx = store.subscribe();
        store.replace_all(vec![link("1", "a")]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().len(), 1);
    }
}
