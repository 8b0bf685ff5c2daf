//! 单站点检查结果与运行汇总

use crate::error::{FetchError, StoreError};

/// 跳过原因（不触碰状态）
#[derive(Debug)]
pub enum SkipReason {
    NoUrl,
    FetchFailed(FetchError),
}

/// 单站点检查结果
#[derive(Debug)]
pub enum SiteOutcome {
    Skipped(SkipReason),
    /// 首次观测：写入初始状态，不通知。
    /// `recovered_corrupt` 表示旧状态文件存在但无法解析
    FirstSeen {
        hash: String,
        recovered_corrupt: bool,
    },
    /// 指纹相同：只刷新检查时间
    Unchanged { hash: String },
    /// 指纹变化：已尝试通知并写入新状态
    Changed {
        old_hash: String,
        new_hash: String,
        notified: bool,
    },
    /// 状态写入失败
    Failed(StoreError),
}

impl SiteOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, SiteOutcome::Changed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SiteOutcome::Skipped(SkipReason::NoUrl) => "no-url",
            SiteOutcome::Skipped(SkipReason::FetchFailed(_)) => "fetch-failed",
            SiteOutcome::FirstSeen { .. } => "first-seen",
            SiteOutcome::Unchanged { .. } => "unchanged",
            SiteOutcome::Changed { .. } => "changed",
            SiteOutcome::Failed(_) => "failed",
        }
    }
}

/// 一次运行的汇总，计数全部由结果推导
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<(String, SiteOutcome)>,
}

impl RunSummary {
    pub fn push(&mut self, site: impl Into<String>, outcome: SiteOutcome) {
        self.outcomes.push((site.into(), outcome));
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_change()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SiteOutcome::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SiteOutcome::Failed(_)))
            .count()
    }
}
