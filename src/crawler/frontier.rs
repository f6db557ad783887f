//! Crawl frontier - the crawl orchestration logic
//!
//! The frontier owns all crawl state: the seen set, the current discovery
//! batch, and the list of downloaded HTML pages awaiting a re-scan. Discovery
//! runs in exactly two rounds: the seed page is scanned, every reference it
//! yields is fetched, then each HTML page downloaded in that first pass is
//! re-read and scanned once more. Pages discovered in the second round are
//! downloaded but never themselves scanned; that cutoff is part of the
//! observed design and is pinned by the integration tests.

use crate::config::Config;
use crate::extract::{extract_references, DiscoveryBatch, ResourceKind};
use crate::fetch::{build_http_client, fetch_binary, fetch_text, BinaryFetch, TextFetch};
use crate::store::MirrorStore;
use crate::url::SiteRoot;
use crate::MirrorError;
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// One resolved unit of work within a pass
struct WorkItem {
    url: Url,
    local_path: PathBuf,
    kind: ResourceKind,
}

/// Outcome of one fetched resource, reported back from a worker task
struct WorkResult {
    local_path: PathBuf,
    kind: ResourceKind,
    ok: bool,
}

/// Counters for one pass, logged when the pass completes
#[derive(Debug, Default, PartialEq, Eq)]
struct PassStats {
    downloaded: usize,
    skipped: usize,
    failed: usize,
}

/// The crawl frontier: owns the seen set, the pending batch, and page records
pub struct Frontier {
    config: Config,
    client: Client,
    site: SiteRoot,
    store: MirrorStore,

    /// References ever discovered, across the whole crawl; grows monotonically
    seen: HashSet<String>,

    /// References discovered in the current round, not yet downloaded
    pending: DiscoveryBatch,

    /// Site-relative paths of downloaded HTML files not yet scanned
    page_records: Vec<PathBuf>,

    /// Crawl deadline, when configured; expired work is skipped, not rolled back
    deadline: Option<Instant>,
}

impl Frontier {
    /// Initializes a crawl: normalizes the seed, builds the HTTP client, and
    /// destructively resets the site output directory
    ///
    /// # Arguments
    ///
    /// * `seed` - Raw seed URL (bare domains get `https://`)
    /// * `config` - Crawl and fetch configuration
    /// * `output_base` - Directory the site directory is created in
    ///
    /// # Returns
    ///
    /// * `Ok(Frontier)` - Ready to [`drive`](Frontier::drive)
    /// * `Err(MirrorError)` - Bad seed, client build failure, or filesystem error
    pub fn initialize(
        seed: &str,
        config: Config,
        output_base: impl Into<PathBuf>,
    ) -> Result<Self, MirrorError> {
        let site = SiteRoot::from_seed(seed)?;
        let client = build_http_client(&config.fetch)?;
        let store = MirrorStore::new(output_base);

        let site_dir = store.reset_site_dir(site.dir_name())?;
        tracing::info!("Created download directory {}", site_dir.display());

        let deadline = match config.crawl.deadline_secs {
            0 => None,
            secs => Some(Instant::now() + Duration::from_secs(secs)),
        };

        Ok(Self {
            config,
            client,
            site,
            store,
            seen: HashSet::new(),
            pending: DiscoveryBatch::new(),
            page_records: Vec::new(),
            deadline,
        })
    }

    /// The sanitized site directory name this crawl writes under
    pub fn site_dir_name(&self) -> &str {
        self.site.dir_name()
    }

    /// Drives the crawl to completion: seed fetch, then two discovery rounds
    ///
    /// Failure to fetch the seed page is the only fatal error; every other
    /// fetch failure skips the one resource and the crawl continues.
    pub async fn drive(&mut self) -> Result<(), MirrorError> {
        let index_path = self.fetch_seed().await?;

        // Round one: scan the seed page and download everything it references
        self.scan_page(&index_path).await;
        let batch = self.take_pending();
        self.run_pass(batch).await;

        // Round two: re-scan the HTML pages round one brought in
        let records = std::mem::take(&mut self.page_records);
        for record in records {
            self.scan_page(&record).await;
        }
        let batch = self.take_pending();
        self.run_pass(batch).await;

        tracing::info!(
            "Mirror complete: {} distinct resources discovered under {}",
            self.seen.len(),
            self.site.dir_name()
        );

        Ok(())
    }

    /// Fetches the seed page into `<site dir>/index.html`
    async fn fetch_seed(&mut self) -> Result<PathBuf, MirrorError> {
        let seed_url = self.site.base().clone();
        let index_path = Path::new(self.site.dir_name()).join("index.html");

        let reason = match fetch_text(&self.client, &seed_url).await {
            TextFetch::Success { body } => {
                self.store.write_text(&index_path, &body).await?;
                tracing::info!("Saved {}", index_path.display());
                return Ok(index_path);
            }
            TextFetch::HttpError { status } => format!("HTTP {}", status),
            TextFetch::NetworkError { error, .. } => error,
        };

        tracing::error!("Failed to fetch seed page {}: {}", seed_url, reason);
        Err(MirrorError::SeedFetch {
            url: seed_url.to_string(),
            reason,
        })
    }

    /// Reads a stored page and feeds its lines through the extractor
    ///
    /// A page whose backing file vanished is dropped silently; external
    /// removal between passes is a benign race.
    async fn scan_page(&mut self, local_path: &Path) {
        let lines = match self.store.read_trimmed_lines(local_path).await {
            Ok(Some(lines)) => lines,
            Ok(None) => {
                tracing::debug!("Page record {} vanished, dropping", local_path.display());
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", local_path.display(), e);
                return;
            }
        };

        extract_references(
            &lines,
            &self.seen,
            &mut self.pending,
            self.config.crawl.print_discoveries,
        );
    }

    /// Folds the pending batch into the seen set and returns its snapshot
    ///
    /// After this the batch is fixed for the pass: references re-discovered
    /// later dedupe against the seen set.
    fn take_pending(&mut self) -> Vec<String> {
        let batch = std::mem::take(&mut self.pending);
        let refs = batch.into_refs();
        for reference in &refs {
            self.seen.insert(reference.clone());
        }
        refs
    }

    /// Downloads one batch of references on the bounded worker pool
    ///
    /// The batch is a snapshot: resolution, existence checks, and path claims
    /// all happen up front on the owning task, so each local path is fetched
    /// at most once and worker tasks share no mutable state.
    async fn run_pass(&mut self, references: Vec<String>) {
        if references.is_empty() {
            return;
        }

        let mut stats = PassStats::default();
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut work = Vec::new();

        for reference in &references {
            let resolved = match self.site.resolve(reference) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::warn!("Skipping unresolvable reference {}: {}", reference, e);
                    stats.failed += 1;
                    continue;
                }
            };

            // One fetch per local path: existence on disk or an earlier claim
            // in this pass both count as already handled
            if self.store.exists(&resolved.local_path) || !claimed.insert(resolved.local_path.clone())
            {
                stats.skipped += 1;
                continue;
            }

            let kind = ResourceKind::from_path(&resolved.local_path.to_string_lossy());
            work.push(WorkItem {
                url: resolved.url,
                local_path: resolved.local_path,
                kind,
            });
        }

        let semaphore = Arc::new(Semaphore::new(
            self.config.crawl.max_concurrent_fetches as usize,
        ));
        let mut tasks: JoinSet<WorkResult> = JoinSet::new();

        let total = work.len();
        for (dispatched, item) in work.into_iter().enumerate() {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    let remaining = total - dispatched;
                    tracing::warn!(
                        "Crawl deadline reached, skipping {} remaining resources in this pass",
                        remaining
                    );
                    stats.skipped += remaining;
                    break;
                }
            }

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let client = self.client.clone();
            let store = self.store.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let ok = download_resource(&client, &store, &item).await;
                WorkResult {
                    local_path: item.local_path,
                    kind: item.kind,
                    ok,
                }
            });
        }

        // The pass completes before the next discovery round begins
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    if result.ok {
                        stats.downloaded += 1;
                        if result.kind == ResourceKind::Markup {
                            self.page_records.push(result.local_path);
                        }
                    } else {
                        stats.failed += 1;
                    }
                }
                Err(e) => {
                    tracing::error!("Download task panicked: {}", e);
                    stats.failed += 1;
                }
            }
        }

        tracing::info!(
            "Pass complete: {} downloaded, {} skipped, {} failed",
            stats.downloaded,
            stats.skipped,
            stats.failed
        );
    }
}

/// Fetches one resource and persists it; returns whether it succeeded
///
/// Images are streamed as opaque bytes, everything else is fetched as text
/// with permissive decoding. Failures are logged here and reported as a
/// skipped resource, never as a crawl-fatal error.
async fn download_resource(client: &Client, store: &MirrorStore, item: &WorkItem) -> bool {
    if item.kind == ResourceKind::Image {
        if let Err(e) = store.ensure_parent(&item.local_path).await {
            tracing::warn!(
                "Failed to create directory for {}: {}",
                item.local_path.display(),
                e
            );
            return false;
        }

        match fetch_binary(client, &item.url, &store.full_path(&item.local_path)).await {
            BinaryFetch::Success => {
                tracing::info!("Downloaded {}", item.url);
                true
            }
            BinaryFetch::HttpError { status } => {
                tracing::warn!("Download failed for {}: HTTP {}", item.url, status);
                false
            }
            BinaryFetch::NetworkError { error, .. } => {
                tracing::warn!("Download failed for {}: {}", item.url, error);
                false
            }
            BinaryFetch::WriteError { error } => {
                tracing::warn!("Write failed for {}: {}", item.local_path.display(), error);
                false
            }
        }
    } else {
        match fetch_text(client, &item.url).await {
            TextFetch::Success { body } => match store.write_text(&item.local_path, &body).await {
                Ok(()) => {
                    tracing::info!("Saved {}", item.local_path.display());
                    true
                }
                Err(e) => {
                    tracing::warn!("Write failed for {}: {}", item.local_path.display(), e);
                    false
                }
            },
            TextFetch::HttpError { status } => {
                tracing::warn!("Fetch failed for {}: HTTP {}", item.url, status);
                false
            }
            TextFetch::NetworkError { error, .. } => {
                tracing::warn!("Fetch failed for {}: {}", item.url, error);
                false
            }
        }
    }
}
