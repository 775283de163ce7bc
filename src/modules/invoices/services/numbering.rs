use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use tokio::sync::Mutex;

/// Generates human-readable invoice numbers of the form
/// `INV-YYYYMMDD-HHMMSS`.
///
/// The timestamp alone collides under same-second sequential issuance, so the
/// generator remembers the last stamp it handed out and never reuses or goes
/// behind it: the next number is derived from max(now, last + 1s). The
/// format stays fixed-width; cross-process collisions remain possible and are
/// caught by the UNIQUE constraint on invoice_number.
#[derive(Debug, Default)]
pub struct InvoiceNumberGenerator {
    last: Mutex<Option<NaiveDateTime>>,
}

impl InvoiceNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn next(&self) -> String {
        self.next_from(Utc::now().naive_utc()).await
    }

    /// Number derivation with an explicit clock reading, for tests.
    pub async fn next_from(&self, now: NaiveDateTime) -> String {
        let mut last = self.last.lock().await;

        let mut stamp = now.with_nanosecond(0).unwrap_or(now);
        if let Some(prev) = *last {
            if stamp <= prev {
                stamp = prev + Duration::seconds(1);
            }
        }
        *last = Some(stamp);

        format!("INV-{}", stamp.format("%Y%m%d-%H%M%S"))
    }
}
