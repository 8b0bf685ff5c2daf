//! 变更检测与编排
//!
//! 每个站点依次经过：抓取 → 指纹 → 读取旧状态 → 比较 → (通知) → 写入状态。
//! 站点之间严格串行，一个站点失败不影响其余站点。

pub mod outcome;

pub use outcome::{RunSummary, SiteOutcome, SkipReason};

use anyhow::Context;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::{MonitorSettings, SiteConfig};
use crate::error::StoreError;
use crate::fetch::{ContentFetcher, HttpFetcher};
use crate::fingerprint::fingerprint;
use crate::notify::{ChangeEvent, DiscordNotifier, Notifier};
use crate::state::{FileStateStore, Lookup, SiteState, StateStore};

pub struct Monitor<F, N, S> {
    fetcher: F,
    notifier: N,
    store: S,
}

/// 生产环境组合
pub type DefaultMonitor = Monitor<HttpFetcher, DiscordNotifier, FileStateStore>;

impl DefaultMonitor {
    pub fn from_settings(settings: &MonitorSettings) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
        let notifier = DiscordNotifier::new(settings.webhook_url.as_str())
            .context("Failed to build webhook client")?;
        let store = FileStateStore::new(&settings.state_dir);

        Ok(Monitor::new(fetcher, notifier, store))
    }
}

impl<F, N, S> Monitor<F, N, S>
where
    F: ContentFetcher,
    N: Notifier,
    S: StateStore,
{
    pub fn new(fetcher: F, notifier: N, store: S) -> Self {
        Self {
            fetcher,
            notifier,
            store,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 检查单个站点
    pub fn check_site(&self, site: &SiteConfig) -> SiteOutcome {
        let name = site.name.as_str();

        if !site.has_url() {
            warn!(site = name, "skipping: no URL specified");
            return SiteOutcome::Skipped(SkipReason::NoUrl);
        }

        let content = match self.fetcher.fetch(&site.url, &site.selector) {
            Ok(content) => content,
            Err(e) => {
                warn!(site = name, url = %site.url, error = %e, "failed to fetch content");
                return SiteOutcome::Skipped(SkipReason::FetchFailed(e));
            }
        };

        let hash = fingerprint(&content);
        let now = Utc::now();
        let fresh = SiteState::observed(hash.as_str(), site.url.as_str(), now);

        let previous = match self.store.lookup(name) {
            Lookup::Found(previous) => previous,
            lookup => {
                // 损坏的状态与缺失同等处理，但在结果中标记
                let recovered_corrupt = matches!(lookup, Lookup::Corrupt { .. });
                info!(site = name, recovered_corrupt, "first check, saving initial state");
                return match self.store.write(name, &fresh) {
                    Ok(()) => SiteOutcome::FirstSeen {
                        hash,
                        recovered_corrupt,
                    },
                    Err(e) => self.persist_failed(name, e),
                };
            }
        };

        if previous.hash == hash {
            info!(site = name, "no changes");
            return match self.store.write(name, &fresh) {
                Ok(()) => SiteOutcome::Unchanged { hash },
                Err(e) => self.persist_failed(name, e),
            };
        }

        info!(site = name, old = %previous.hash, new = %hash, "change detected");

        let change = ChangeEvent {
            site: name.to_string(),
            url: site.url.clone(),
            old_hash: previous.hash.clone(),
            new_hash: hash.clone(),
        };

        // 通知尽力而为，失败不回滚状态写入
        let notified = match self.notifier.notify(&change) {
            Ok(()) => {
                info!(site = name, "notification sent");
                true
            }
            Err(e) => {
                error!(site = name, error = %e, "failed to send notification");
                false
            }
        };

        match self.store.write(name, &fresh.with_previous(previous.hash.as_str())) {
            Ok(()) => SiteOutcome::Changed {
                old_hash: previous.hash,
                new_hash: hash,
                notified,
            },
            Err(e) => self.persist_failed(name, e),
        }
    }

    /// 依次检查所有站点
    pub fn run(&self, sites: &[SiteConfig]) -> RunSummary {
        self.run_with(sites, |_, _| {})
    }

    /// 同 `run`，每个站点完成后回调 `on_outcome`
    pub fn run_with<C>(&self, sites: &[SiteConfig], mut on_outcome: C) -> RunSummary
    where
        C: FnMut(&SiteConfig, &SiteOutcome),
    {
        let mut summary = RunSummary::default();

        for site in sites {
            let outcome = self.check_site(site);
            on_outcome(site, &outcome);
            summary.push(site.name.as_str(), outcome);
        }

        summary
    }

    fn persist_failed(&self, name: &str, e: StoreError) -> SiteOutcome {
        error!(site = name, error = %e, "failed to save state");
        SiteOutcome::Failed(e)
    }
}
