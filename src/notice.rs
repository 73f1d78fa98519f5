//! Short-lived confirmation banners.

use chrono::{DateTime, Duration, Utc};
use fintrack_core::{format::format_currency, time::Clock};
use fintrack_domain::Transaction;

pub const DEFAULT_NOTICE_MS: u64 = 2000;
// Keeps the millisecond conversion inside chrono's representable range.
const MAX_NOTICE_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Holds at most one notice. Posting replaces whatever was showing, which
/// cancels the earlier deadline.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    lifetime: Duration,
    current: Option<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_MS)
    }
}

impl NoticeBoard {
    pub fn new(lifetime_ms: u64) -> Self {
        let millis = lifetime_ms.min(MAX_NOTICE_MS) as i64;
        Self {
            lifetime: Duration::milliseconds(millis),
            current: None,
        }
    }

    pub fn post(&mut self, message: impl Into<String>, clock: &dyn Clock) -> &Notice {
        self.current.insert(Notice {
            message: message.into(),
            expires_at: clock.now() + self.lifetime,
        })
    }

    /// The notice, if its deadline has not passed yet.
    pub fn active(&self, clock: &dyn Clock) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| clock.now() < notice.expires_at)
    }

    /// Drops an expired notice.
    pub fn sweep(&mut self, clock: &dyn Clock) {
        if self.active(clock).is_none() {
            self.current = None;
        }
    }
}

/// Banner text shown after a transaction is recorded, e.g. `✓ Income of $5000.00 added`.
pub fn transaction_added(txn: &Transaction) -> String {
    format!("✓ {} of {} added", txn.kind, format_currency(txn.amount))
}
