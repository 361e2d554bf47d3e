// ── Link list view-model ──
//
// Derived views over the cached list: filter, then sort. Pure functions
// of their inputs, recomputed on demand.

use linkdeck_api::Link;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Creation-date ordering for the link list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    /// Newest first.
    #[default]
    Desc,
    /// Oldest first.
    Asc,
}

/// Search text and sort direction for the visible list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkQuery {
    pub search: String,
    pub sort: SortDirection,
}

impl LinkQuery {
    pub fn new(search: impl Into<String>, sort: SortDirection) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }
}

/// Keep links whose destination URL or slug contains `search`,
/// case-insensitively. Blank search keeps everything.
///
/// The search text is matched as typed: surrounding spaces are part of
/// the needle unless the whole string is blank.
pub fn filter_links<'a>(links: &'a [Link], search: &str) -> Vec<&'a Link> {
    if search.trim().is_empty() {
        return links.iter().collect();
    }
    let needle = search.to_lowercase();
    links
        .iter()
        .filter(|link| {
            link.destination_url.to_lowercase().contains(&needle)
                || link.slug.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort by creation time.
pub fn sort_links(links: &mut [&Link], direction: SortDirection) {
    match direction {
        SortDirection::Desc => links.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortDirection::Asc => links.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

/// Filter, then sort.
pub fn visible_links<'a>(links: &'a [Link], query: &LinkQuery) -> Vec<&'a Link> {
    let mut visible = filter_links(links, &query.search);
    sort_links(&mut visible, query.sort);
    visible
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use linkdeck_api::LinkStats;
    use pretty_assertions::assert_eq;

    use super::*;

    fn link(id: &str, slug: &str, url: &str, created: &str) -> Link {
        Link {
            id: id.into(),
            slug: slug.into(),
            destination_url: url.into(),
            short_url: String::new(),
            domain: None,
            title: None,
            description: None,
            favicon: None,
            tags: vec![],
            expires_at: None,
            is_password_protected: false,
            password: None,
            created_at: created.parse::<DateTime<Utc>>().unwrap(),
            stats: LinkStats::default(),
        }
    }

    fn sample() -> Vec<Link> {
        vec![
            link("1", "docs", "https://Example.com/Docs", "2024-01-01T00:00:00Z"),
            link("2", "blog", "https://blog.rust-lang.org", "2024-03-01T00:00:00Z"),
            link("3", "Shop", "https://shop.test/cart", "2024-02-01T00:00:00Z"),
            link("4", "same", "https://same.test", "2024-02-01T00:00:00Z"),
        ]
    }

    fn ids(links: &[&Link]) -> Vec<String> {
        links.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn filter_is_case_insensitive_over_url_and_slug() {
        let links = sample();
        assert_eq!(ids(&filter_links(&links, "EXAMPLE")), vec!["1"]);
        assert_eq!(ids(&filter_links(&links, "shop")), vec!["3"]);
        assert_eq!(ids(&filter_links(&links, "rust")), vec!["2"]);
    }

    #[test]
    fn blank_search_keeps_all() {
        let links = sample();
        assert_eq!(filter_links(&links, "").len(), 4);
        assert_eq!(filter_links(&links, "   ").len(), 4);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_needle() {
        let links = sample();
        assert!(filter_links(&links, " docs").is_empty());
    }

    #[test]
    fn filter_result_only_contains_matches() {
        let links = sample();
        for query in ["e", "test", "https", "zzz", "/"] {
            let q = query.to_lowercase();
            for l in filter_links(&links, query) {
                assert!(
                    l.destination_url.to_lowercase().contains(&q)
                        || l.slug.to_lowercase().contains(&q)
                );
            }
        }
    }

    #[test]
    fn desc_is_newest_first_and_stable() {
        let links = sample();
        let visible = visible_links(&links, &LinkQuery::default());
        assert_eq!(ids(&visible), vec!["2", "3", "4", "1"]);
    }

    #[test]
    fn asc_reverses_distinct_timestamps() {
        let links = sample();
        let asc = visible_links(&links, &LinkQuery::new("", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let links = sample();
        let mut once = filter_links(&links, "");
        sort_links(&mut once, SortDirection::Desc);
        let mut twice = once.clone();
        sort_links(&mut twice, SortDirection::Desc);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn two_link_example() {
        let links = vec![
            link("1", "a", "https://a.com", "2024-01-01T00:00:00Z"),
            link("2", "b", "https://b.com", "2024-02-01T00:00:00Z"),
        ];

        let filtered = visible_links(&links, &LinkQuery::new("A.COM", SortDirection::Desc));
        assert_eq!(ids(&filtered), vec!["1"]);

        let desc = visible_links(&links, &LinkQuery::new("", SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["2", "1"]);

        let asc = visible_links(&links, &LinkQuery::new("", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["1", "2"]);
    }

    #[test]
    fn sort_direction_parses_from_cli_strings() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::default().to_string(), "desc");
    }
}
