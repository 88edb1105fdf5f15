// Daily critique quota: a small per-day allotment of guests that may receive
// a freshly generated critique.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::domain::entities::DailyCritiqueRecord;
use crate::domain::ports::{Clock, QuotaStore};

/// Quota tracker with injected time source and persistence.
///
/// Every query first reconciles the stored record against the current local
/// calendar day, so a guest can never exceed its allotment and the pool
/// resets exactly once per day.
pub struct DailyQuota<C, S> {
    clock: C,
    store: S,
    sample_size: usize,
    record: Option<DailyCritiqueRecord>,
}

impl<C, S> DailyQuota<C, S>
where
    C: Clock,
    S: QuotaStore,
{
    pub fn new(clock: C, store: S, sample_size: usize) -> Self {
        Self {
            clock,
            store,
            sample_size,
            record: None,
        }
    }

    /// Loads the persisted record, if any. Store failures are non-fatal; the
    /// tracker starts empty and resamples on first use.
    pub async fn load(&mut self) {
        match self.store.load().await {
            Ok(record) => self.record = record,
            Err(err) => warn!(error = %err, "failed to load daily critique state"),
        }
    }

    /// Resamples targets if the stored date is not today. Must run before any
    /// query is answered; `can_critique` and `mark_complete` call it first.
    pub async fn ensure_today(&mut self, guest_pool: &[String], rng: &mut StdRng) {
        let today = self.clock.today();
        if self
            .record
            .as_ref()
            .is_some_and(|record| record.date == today)
        {
            return;
        }

        let mut targets: Vec<String> = guest_pool
            .choose_multiple(rng, self.sample_size.min(guest_pool.len()))
            .cloned()
            .collect();
        targets.shuffle(rng);

        let record = DailyCritiqueRecord {
            date: today,
            target_guest_ids: targets,
            completed_guest_ids: Vec::new(),
        };
        self.persist(&record).await;
        self.record = Some(record);
    }

    /// True iff the guest is targeted today and has not yet spoken.
    pub async fn can_critique(
        &mut self,
        guest_id: &str,
        guest_pool: &[String],
        rng: &mut StdRng,
    ) -> bool {
        self.ensure_today(guest_pool, rng).await;
        let Some(record) = &self.record else {
            return false;
        };
        record.target_guest_ids.iter().any(|id| id == guest_id)
            && !record.completed_guest_ids.iter().any(|id| id == guest_id)
    }

    /// Marks the guest's allotment spent for today. Duplicate completions are
    /// harmless.
    pub async fn mark_complete(&mut self, guest_id: &str, guest_pool: &[String], rng: &mut StdRng) {
        self.ensure_today(guest_pool, rng).await;
        let Some(record) = &mut self.record else {
            return;
        };
        if !record.completed_guest_ids.iter().any(|id| id == guest_id) {
            record.completed_guest_ids.push(guest_id.to_string());
        }
        let snapshot = record.clone();
        self.persist(&snapshot).await;
    }

    pub fn record(&self) -> Option<&DailyCritiqueRecord> {
        self.record.as_ref()
    }

    async fn persist(&self, record: &DailyCritiqueRecord) {
        if let Err(err) = self.store.save(record).await {
            warn!(error = %err, "failed to persist daily critique state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    // Fixed calendar so rollover assertions are deterministic.
    struct FixedClock {
        date: NaiveDate,
    }

    impl FixedClock {
        fn on(year: i32, month: u32, day: u32) -> Self {
            Self {
                date: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
            }
        }
    }

    impl Clock for FixedClock {
        fn now_millis(&self) -> u64 {
            0
        }

        fn today(&self) -> NaiveDate {
            self.date
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        // Shared slot lets tests inspect what the tracker persisted.
        saved: Arc<Mutex<Option<DailyCritiqueRecord>>>,
        fail_save: bool,
    }

    #[async_trait]
    impl QuotaStore for RecordingStore {
        async fn load(&self) -> Result<Option<DailyCritiqueRecord>, String> {
            let guard = self.saved.lock().expect("store mutex poisoned");
            Ok(guard.clone())
        }

        async fn save(&self, record: &DailyCritiqueRecord) -> Result<(), String> {
            if self.fail_save {
                return Err("save failed".to_string());
            }
            let mut guard = self.saved.lock().expect("store mutex poisoned");
            *guard = Some(record.clone());
            Ok(())
        }
    }

    fn pool(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("g{i}")).collect()
    }

    #[tokio::test]
    async fn when_guest_is_not_targeted_then_can_critique_is_always_false() {
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), RecordingStore::default(), 3);
        let mut rng = StdRng::seed_from_u64(1);
        let guests = pool(8);

        quota.ensure_today(&guests, &mut rng).await;
        let record = quota.record().expect("record should exist").clone();
        let outsider = guests
            .iter()
            .find(|id| !record.target_guest_ids.contains(id))
            .expect("pool of 8 must contain a non-target");

        assert!(!quota.can_critique(outsider, &guests, &mut rng).await);
    }

    #[tokio::test]
    async fn when_guest_is_targeted_then_can_critique_until_marked_complete() {
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), RecordingStore::default(), 3);
        let mut rng = StdRng::seed_from_u64(2);
        let guests = pool(5);

        quota.ensure_today(&guests, &mut rng).await;
        let target = quota.record().expect("record should exist").target_guest_ids[0].clone();

        assert!(quota.can_critique(&target, &guests, &mut rng).await);
        quota.mark_complete(&target, &guests, &mut rng).await;
        assert!(!quota.can_critique(&target, &guests, &mut rng).await);
    }

    #[tokio::test]
    async fn when_marked_complete_twice_then_no_duplicate_entries_accumulate() {
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), RecordingStore::default(), 3);
        let mut rng = StdRng::seed_from_u64(3);
        let guests = pool(5);

        quota.ensure_today(&guests, &mut rng).await;
        let target = quota.record().expect("record should exist").target_guest_ids[0].clone();

        quota.mark_complete(&target, &guests, &mut rng).await;
        quota.mark_complete(&target, &guests, &mut rng).await;

        let record = quota.record().expect("record should exist");
        assert_eq!(record.completed_guest_ids, vec![target]);
    }

    #[tokio::test]
    async fn when_the_date_rolls_over_then_targets_resample_and_completed_clears() {
        let store = RecordingStore::default();
        let guests = pool(10);
        let mut rng = StdRng::seed_from_u64(4);

        // Day one: complete one target and persist.
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), store.clone(), 3);
        quota.ensure_today(&guests, &mut rng).await;
        let target = quota.record().expect("record should exist").target_guest_ids[0].clone();
        quota.mark_complete(&target, &guests, &mut rng).await;

        // Day two: a tracker restored from the same store must reset.
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 2), store, 3);
        quota.load().await;
        quota.ensure_today(&guests, &mut rng).await;

        let record = quota.record().expect("record should exist");
        assert_eq!(
            record.date,
            NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date")
        );
        assert!(record.completed_guest_ids.is_empty());
        assert!(record.target_guest_ids.len() <= 3);
        assert!(!record.target_guest_ids.is_empty());
    }

    #[tokio::test]
    async fn when_the_pool_is_smaller_than_the_sample_then_all_guests_are_targeted() {
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), RecordingStore::default(), 3);
        let mut rng = StdRng::seed_from_u64(5);
        let guests = pool(2);

        quota.ensure_today(&guests, &mut rng).await;

        let record = quota.record().expect("record should exist");
        assert_eq!(record.target_guest_ids.len(), 2);
    }

    #[tokio::test]
    async fn when_the_store_fails_then_the_tracker_keeps_working_in_memory() {
        let store = RecordingStore {
            saved: Arc::new(Mutex::new(None)),
            fail_save: true,
        };
        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), store, 3);
        let mut rng = StdRng::seed_from_u64(6);
        let guests = pool(5);

        quota.ensure_today(&guests, &mut rng).await;
        let target = quota.record().expect("record should exist").target_guest_ids[0].clone();

        assert!(quota.can_critique(&target, &guests, &mut rng).await);
        quota.mark_complete(&target, &guests, &mut rng).await;
        assert!(!quota.can_critique(&target, &guests, &mut rng).await);
    }

    #[tokio::test]
    async fn when_the_stored_record_is_for_today_then_it_is_kept_verbatim() {
        let stored = DailyCritiqueRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            target_guest_ids: vec!["g1".to_string(), "g2".to_string()],
            completed_guest_ids: vec!["g1".to_string()],
        };
        let store = RecordingStore {
            saved: Arc::new(Mutex::new(Some(stored.clone()))),
            fail_save: false,
        };

        let mut quota = DailyQuota::new(FixedClock::on(2024, 5, 1), store, 3);
        quota.load().await;
        let mut rng = StdRng::seed_from_u64(7);
        quota.ensure_today(&pool(5), &mut rng).await;

        assert_eq!(quota.record(), Some(&stored));
    }
}
