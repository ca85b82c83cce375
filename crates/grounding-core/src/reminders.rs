//! Daily reminder planning
//!
//! Reminders are one-shot requests for a rolling window of upcoming days. The
//! text of each reminder is the affirmation assigned to that day, so planning
//! a reminder also fixes the day's assignment. Delivery goes through
//! [`NotificationCenter`], which platform shells implement.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::api::AffirmationSource;
use crate::db::KeyValueStore;
use crate::error::{Error, Result};
use crate::models::ReminderSettings;
use crate::repository::AffirmationRepository;

/// Number of days planned ahead
pub const DEFAULT_DAYS_AHEAD: u32 = 14;

/// Upper bound on the planning window, the pending-notification limit on iOS
pub const MAX_DAYS_AHEAD: u32 = 64;

/// Title shown on every reminder
pub const NOTIFICATION_TITLE: &str = "Grounding Sun";

const IDENTIFIER_PREFIX: &str = "daily_affirmation_";

/// A single scheduled reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRequest {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub affirmation_id: String,
    pub fire_at: NaiveDateTime,
}

/// Platform notification delivery
#[allow(async_fn_in_trait)]
pub trait NotificationCenter {
    /// Drop pending reminders with the given identifiers
    fn remove_pending(&self, identifiers: &[String]) -> Result<()>;

    /// Schedule a reminder, replacing any pending one with the same identifier
    async fn add(&self, request: ReminderRequest) -> Result<()>;
}

/// Identifier of the reminder `offset` days after the window start
pub fn reminder_identifier(offset: u32) -> String {
    format!("{IDENTIFIER_PREFIX}{offset}")
}

/// First day whose reminder at `time` is still ahead of `now`
pub fn first_reminder_date(now: NaiveDateTime, time: NaiveTime) -> NaiveDate {
    let today = now.date();
    if now.time() < time {
        return today;
    }
    today.succ_opt().unwrap_or(today)
}

fn window_identifiers(days_ahead: u32) -> Vec<String> {
    (0..days_ahead).map(reminder_identifier).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderScheduler {
    days_ahead: u32,
}

impl ReminderScheduler {
    pub const fn new() -> Self {
        Self {
            days_ahead: DEFAULT_DAYS_AHEAD,
        }
    }

    #[must_use]
    pub const fn with_days_ahead(mut self, days_ahead: u32) -> Self {
        self.days_ahead = days_ahead;
        self
    }

    /// Replace the reminder window starting at `start`, firing at `time`
    ///
    /// A reminder that fails to schedule is logged and skipped. Returns the
    /// number of reminders scheduled.
    pub async fn schedule_daily<A, S, C>(
        &self,
        repository: &AffirmationRepository<A, S>,
        center: &C,
        start: NaiveDate,
        time: NaiveTime,
    ) -> Result<usize>
    where
        A: AffirmationSource,
        S: KeyValueStore,
        C: NotificationCenter,
    {
        center.remove_pending(&window_identifiers(self.days_ahead))?;

        let mut scheduled = 0;
        for offset in 0..self.days_ahead {
            let Some(date) = start.checked_add_days(Days::new(u64::from(offset))) else {
                continue;
            };
            let affirmation = repository.assigned_affirmation(date);

            let request = ReminderRequest {
                identifier: reminder_identifier(offset),
                title: NOTIFICATION_TITLE.to_string(),
                body: affirmation.text,
                affirmation_id: affirmation.id,
                fire_at: date.and_time(time),
            };

            match center.add(request).await {
                Ok(()) => scheduled += 1,
                Err(error) => {
                    tracing::error!("Failed to schedule notification for day +{offset}: {error}");
                }
            }
        }

        tracing::info!("Scheduled {scheduled} daily reminders from {start} at {time}");
        Ok(scheduled)
    }

    /// Remove every reminder in the window
    pub fn cancel<C: NotificationCenter>(&self, center: &C) -> Result<()> {
        center.remove_pending(&window_identifiers(self.days_ahead))
    }

    /// Schedule or cancel according to saved preferences
    pub async fn apply_settings<A, S, C>(
        &self,
        settings: &ReminderSettings,
        repository: &AffirmationRepository<A, S>,
        center: &C,
        start: NaiveDate,
    ) -> Result<usize>
    where
        A: AffirmationSource,
        S: KeyValueStore,
        C: NotificationCenter,
    {
        if settings.is_enabled() {
            self.schedule_daily(repository, center, start, settings.effective_time())
                .await
        } else {
            self.cancel(center)?;
            Ok(0)
        }
    }
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification center that keeps pending reminders in memory
#[derive(Debug, Default)]
pub struct InMemoryNotificationCenter {
    pending: Mutex<BTreeMap<String, ReminderRequest>>,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending reminders ordered by fire time
    pub fn pending(&self) -> Result<Vec<ReminderRequest>> {
        let mut requests: Vec<ReminderRequest> = self.lock()?.values().cloned().collect();
        requests.sort_by(|a, b| a.fire_at.cmp(&b.fire_at));
        Ok(requests)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, ReminderRequest>>> {
        self.pending
            .lock()
            .map_err(|_| Error::Notification("pending reminders lock poisoned".to_string()))
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn remove_pending(&self, identifiers: &[String]) -> Result<()> {
        let mut pending = self.lock()?;
        for identifier in identifiers {
            pending.remove(identifier);
        }
        Ok(())
    }

    async fn add(&self, request: ReminderRequest) -> Result<()> {
        self.lock()?.insert(request.identifier.clone(), request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticAffirmationSource;
    use crate::db::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    async fn loaded_repository() -> AffirmationRepository<StaticAffirmationSource, MemoryStore> {
        let source = StaticAffirmationSource::new().with_delay(Duration::ZERO);
        let repo = AffirmationRepository::new(source, MemoryStore::new());
        repo.fetch_affirmations().await;
        repo
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    /// Rejects one identifier to exercise partial failure
    struct RejectingCenter {
        inner: InMemoryNotificationCenter,
        reject: String,
    }

    impl NotificationCenter for RejectingCenter {
        fn remove_pending(&self, identifiers: &[String]) -> Result<()> {
            self.inner.remove_pending(identifiers)
        }

        async fn add(&self, request: ReminderRequest) -> Result<()> {
            if request.identifier == self.reject {
                return Err(Error::Notification("quota exceeded".to_string()));
            }
            self.inner.add(request).await
        }
    }

    #[tokio::test]
    async fn test_schedule_daily_uses_assignments() {
        let repo = loaded_repository().await;
        let center = InMemoryNotificationCenter::new();

        let scheduled = ReminderScheduler::new()
            .schedule_daily(&repo, &center, start(), nine())
            .await
            .unwrap();
        assert_eq!(scheduled, 14);

        let pending = center.pending().unwrap();
        assert_eq!(pending.len(), 14);
        for (offset, request) in pending.iter().enumerate() {
            let date = start() + Days::new(offset as u64);
            let assigned = repo.assigned_affirmation(date);

            assert_eq!(request.identifier, format!("daily_affirmation_{offset}"));
            assert_eq!(request.title, "Grounding Sun");
            assert_eq!(request.body, assigned.text);
            assert_eq!(request.affirmation_id, assigned.id);
            assert_eq!(request.fire_at, date.and_time(nine()));
        }
    }

    #[tokio::test]
    async fn test_rescheduling_replaces_window() {
        let repo = loaded_repository().await;
        let center = InMemoryNotificationCenter::new();
        let scheduler = ReminderScheduler::new().with_days_ahead(3);

        scheduler
            .schedule_daily(&repo, &center, start(), nine())
            .await
            .unwrap();
        let later = NaiveTime::from_hms_opt(20, 30, 0).unwrap();
        scheduler
            .schedule_daily(&repo, &center, start(), later)
            .await
            .unwrap();

        let pending = center.pending().unwrap();
        assert_eq!(pending.len(), 3);
        assert!(pending.iter().all(|request| request.fire_at.time() == later));
    }

    #[tokio::test]
    async fn test_cancel_removes_window() {
        let repo = loaded_repository().await;
        let center = InMemoryNotificationCenter::new();
        let scheduler = ReminderScheduler::new();

        scheduler
            .schedule_daily(&repo, &center, start(), nine())
            .await
            .unwrap();
        scheduler.cancel(&center).unwrap();
        assert!(center.pending().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_reminder_is_skipped() {
        let repo = loaded_repository().await;
        let center = RejectingCenter {
            inner: InMemoryNotificationCenter::new(),
            reject: reminder_identifier(2),
        };

        let scheduled = ReminderScheduler::new()
            .with_days_ahead(5)
            .schedule_daily(&repo, &center, start(), nine())
            .await
            .unwrap();

        assert_eq!(scheduled, 4);
        let identifiers: Vec<String> = center
            .inner
            .pending()
            .unwrap()
            .into_iter()
            .map(|request| request.identifier)
            .collect();
        assert!(!identifiers.contains(&reminder_identifier(2)));
        assert_eq!(identifiers.len(), 4);
    }

    #[tokio::test]
    async fn test_apply_settings_follows_toggle() {
        let repo = loaded_repository().await;
        let center = InMemoryNotificationCenter::new();
        let scheduler = ReminderScheduler::new().with_days_ahead(2);

        let enabled = ReminderSettings {
            enabled: Some(true),
            time: NaiveTime::from_hms_opt(7, 15, 0),
            days: None,
        };
        assert_eq!(
            scheduler
                .apply_settings(&enabled, &repo, &center, start())
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            center.pending().unwrap()[0].fire_at,
            start().and_hms_opt(7, 15, 0).unwrap()
        );

        let unset = ReminderSettings::default();
        assert_eq!(
            scheduler
                .apply_settings(&unset, &repo, &center, start())
                .await
                .unwrap(),
            0
        );
        assert!(center.pending().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_repository_schedules_fallback() {
        let source = StaticAffirmationSource::new();
        let repo = AffirmationRepository::new(source, MemoryStore::new());
        let center = InMemoryNotificationCenter::new();

        ReminderScheduler::new()
            .with_days_ahead(1)
            .schedule_daily(&repo, &center, start(), nine())
            .await
            .unwrap();

        let pending = center.pending().unwrap();
        assert_eq!(pending[0].body, "You are enough.");
        assert_eq!(pending[0].affirmation_id, "fallback");
    }

    #[test]
    fn test_first_reminder_date_skips_passed_time() {
        let morning = start().and_hms_opt(8, 59, 0).unwrap();
        assert_eq!(first_reminder_date(morning, nine()), start());

        let on_time = start().and_time(nine());
        assert_eq!(first_reminder_date(on_time, nine()), start().succ_opt().unwrap());

        let evening = start().and_hms_opt(21, 0, 0).unwrap();
        assert_eq!(first_reminder_date(evening, nine()), start().succ_opt().unwrap());
    }
}
