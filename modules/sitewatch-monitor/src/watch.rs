//! One-shot watch runs: load the prior snapshot, observe, diff, notify,
//! persist.

use std::fmt;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use sitewatch_common::{Alert, CorruptPolicy, HeadlineSnapshot, ProfileSnapshot, SearchBatch};

use crate::diff;
use crate::notify::AlertRouter;
use crate::observer::{HeadlineSearcher, PageObserver};
use crate::snapshot::SnapshotStore;

// --- Profile watcher ---

/// Stats from a profile check run.
#[derive(Debug, Default)]
pub struct ProfileRunStats {
    pub observed: bool,
    pub title_changed: bool,
    pub keyword_hits: u32,
    pub alerts_delivered: u32,
}

impl fmt::Display for ProfileRunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Profile Check Complete ===")?;
        writeln!(f, "Observed:         {}", if self.observed { "yes" } else { "no" })?;
        writeln!(f, "Title changed:    {}", if self.title_changed { "yes" } else { "no" })?;
        writeln!(f, "Keyword hits:     {}", self.keyword_hits)?;
        write!(f, "Alerts delivered: {}", self.alerts_delivered)
    }
}

/// Checks a single profile page for a changed, keyword-bearing title.
pub struct ProfileWatcher {
    store: SnapshotStore<ProfileSnapshot>,
    observer: Box<dyn PageObserver>,
    keywords: Vec<String>,
    notifier: AlertRouter,
    on_corrupt: CorruptPolicy,
}

impl ProfileWatcher {
    pub fn new(
        store: SnapshotStore<ProfileSnapshot>,
        observer: Box<dyn PageObserver>,
        keywords: Vec<String>,
        notifier: AlertRouter,
        on_corrupt: CorruptPolicy,
    ) -> Self {
        Self {
            store,
            observer,
            keywords,
            notifier,
            on_corrupt,
        }
    }

    /// Run one check cycle.
    pub async fn run(&self) -> Result<ProfileRunStats> {
        let mut stats = ProfileRunStats::default();

        let previous = self.store.load_with(self.on_corrupt)?;
        match previous.last_check {
            Some(at) => info!(previous_check = %at, "Previous check loaded"),
            None => info!("No previous check recorded, this is the first run"),
        }

        let title = match self.observer.observe().await {
            Ok(t) => {
                stats.observed = true;
                Some(t)
            }
            Err(e) => {
                warn!(
                    observer = self.observer.name(),
                    error = %e,
                    "Observation failed, continuing without one"
                );
                None
            }
        };

        if diff::title_changed(previous.last_post_title.as_deref(), title.as_deref()) {
            stats.title_changed = true;
            info!(
                previous = previous.last_post_title.as_deref().unwrap_or("<none>"),
                current = title.as_deref().unwrap_or("<none>"),
                "Page title has changed"
            );

            // The scan runs only on a changed title: an unchanged
            // keyword-bearing title alerts at most once, on the run where
            // it first appeared.
            if let Some(title) = &title {
                let hits = diff::keyword_hits(title, &self.keywords);
                if !hits.is_empty() {
                    stats.keyword_hits = hits.len() as u32;
                    warn!(title = title.as_str(), keywords = ?hits, "Keyword detected in changed title");

                    let alert = Alert {
                        headline: title.clone(),
                        detail: format!("Matched keywords: {}", hits.join(", ")),
                    };
                    if self.notifier.deliver(&alert).await {
                        stats.alerts_delivered += 1;
                    }
                }
            }
        } else {
            info!("No change detected in page title");
        }

        // The observed value is saved even when the fetch failed; `None`
        // is a valid previous value for the next diff.
        self.store.save(&ProfileSnapshot {
            last_check: Some(Utc::now()),
            last_post_title: title,
        })?;

        Ok(stats)
    }
}

// --- News watcher ---

/// Stats from a news scan run.
#[derive(Debug, Default)]
pub struct NewsRunStats {
    pub headlines_observed: u32,
    pub novel: u32,
    pub alerts_delivered: u32,
}

impl fmt::Display for NewsRunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== News Scan Complete ===")?;
        writeln!(f, "Headlines observed: {}", self.headlines_observed)?;
        writeln!(f, "Novel headlines:    {}", self.novel)?;
        write!(f, "Alerts delivered:   {}", self.alerts_delivered)
    }
}

/// Scans for headlines about a subject and reports the ones never seen
/// before.
pub struct NewsWatcher {
    store: SnapshotStore<HeadlineSnapshot>,
    searcher: Box<dyn HeadlineSearcher>,
    subject: String,
    keywords: Vec<String>,
    notifier: AlertRouter,
    on_corrupt: CorruptPolicy,
}

impl NewsWatcher {
    pub fn new(
        store: SnapshotStore<HeadlineSnapshot>,
        searcher: Box<dyn HeadlineSearcher>,
        subject: String,
        keywords: Vec<String>,
        notifier: AlertRouter,
        on_corrupt: CorruptPolicy,
    ) -> Self {
        Self {
            store,
            searcher,
            subject,
            keywords,
            notifier,
            on_corrupt,
        }
    }

    /// Run one scan cycle.
    pub async fn run(&self) -> Result<NewsRunStats> {
        let mut stats = NewsRunStats::default();

        let mut snapshot = self.store.load_with(self.on_corrupt)?;
        match snapshot.last_check {
            Some(at) => info!(
                previous_check = %at,
                known_items = snapshot.known_items.len(),
                "Previous scan loaded"
            ),
            None => info!("No previous scan recorded, this is the first run"),
        }

        let batch = match self.searcher.search(&self.subject, &self.keywords).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(error = %e, "Search failed, continuing without an observation");
                SearchBatch {
                    searched_at: Utc::now(),
                    headlines: Vec::new(),
                }
            }
        };
        stats.headlines_observed = batch.headlines.len() as u32;

        // Keywords steer the search query; novelty here is pure set
        // membership.
        let novel = diff::novel_headlines(&mut snapshot.known_items, &batch.headlines);
        stats.novel = novel.len() as u32;

        if novel.is_empty() {
            info!("No new headlines");
        }

        for headline in &novel {
            info!(headline = headline.as_str(), "New headline found");
            let alert = Alert {
                headline: headline.clone(),
                detail: format!("Found in search at {}", batch.searched_at.to_rfc3339()),
            };
            if self.notifier.deliver(&alert).await {
                stats.alerts_delivered += 1;
            }
        }

        snapshot.last_check = Some(Utc::now());
        self.store.save(&snapshot)?;

        Ok(stats)
    }
}
