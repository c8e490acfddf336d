//! User actions and derived views over [`ProgressState`].
//!
//! A session owns the in-memory state and writes it through the
//! [`ProgressStore`] after every change. If storage fails the session keeps
//! working from memory and stops writing until it is restarted.

use crate::catalog::{QUOTES, TOPICS, TOTAL_DAYS, is_valid_day};
use crate::clock::Clock;
use crate::errors::{Result, TrackerError};
use crate::models::{ProgressResponse, ProgressState, StatsResponse, TopicVariant, TopicView};
use crate::progress_store::ProgressStore;
use crate::quotes::{QuoteRng, pick_quote};
use crate::stats::{build_stats_at, days_elapsed, progress_percentage};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::{debug, info, warn};

const REMINDER_INTERVAL_HOURS: i64 = 24;

pub struct Session<S> {
    store: ProgressStore<S>,
    clock: Clock,
    rng: QuoteRng,
    state: ProgressState,
    quote: usize,
    reminder_due: bool,
    reminder_shown_at: Option<DateTime<Utc>>,
    persistence_degraded: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads stored progress (or starts fresh and saves it), then runs the
    /// page-load checks.
    pub fn start(kv: S, clock: Clock, rng: QuoteRng) -> Self {
        let now = clock.now();
        let store = ProgressStore::new(kv);
        let loaded = store.load(now);

        let mut session = Self {
            store,
            clock,
            rng,
            state: ProgressState::fresh(now),
            quote: 0,
            reminder_due: false,
            reminder_shown_at: None,
            persistence_degraded: false,
        };

        match loaded {
            Ok(Some(state)) => {
                info!(
                    current_day = state.current_day,
                    completed = state.completed_days.len(),
                    "loaded saved progress"
                );
                session.state = state;
            }
            Ok(None) => {
                info!("no saved progress, starting at day 1");
                session.persist();
            }
            Err(err) => session.degrade(err),
        }

        session.page_load();
        session
    }

    /// Re-checks the daily reminder and picks a new quote, as on every page load.
    ///
    /// This can raise the reminder flag but never lowers it.
    pub fn page_load(&mut self) {
        self.check_reminder();
        self.quote = pick_quote(&mut self.rng);
    }

    /// Marks `day` done. Completing the current day moves the pointer forward.
    ///
    /// Returns `false` when the day was already complete, in which case
    /// nothing changes.
    pub fn mark_complete(&mut self, day: u32) -> Result<bool> {
        validate_day(day)?;
        if self.state.is_completed(day) {
            debug!(day, "day already complete");
            return Ok(false);
        }

        self.state.completed_days.insert(day);
        if day == self.state.current_day && self.state.current_day < TOTAL_DAYS {
            self.state.current_day += 1;
        }
        self.quote = pick_quote(&mut self.rng);
        info!(day, current_day = self.state.current_day, "day marked complete");

        self.persist();
        Ok(true)
    }

    /// Flips completion of `day` and returns whether it is now complete.
    ///
    /// Un-completing never moves the current day back.
    pub fn toggle_complete(&mut self, day: u32) -> Result<bool> {
        validate_day(day)?;
        if !self.state.is_completed(day) {
            self.mark_complete(day)?;
            return Ok(true);
        }

        self.state.completed_days.remove(&day);
        info!(day, "day marked incomplete");
        self.persist();
        Ok(false)
    }

    /// Starts the plan over from day 1 with a new start date.
    ///
    /// Callers are responsible for confirming with the user first.
    pub fn reset(&mut self) {
        self.state = ProgressState::fresh(self.clock.now());
        info!("progress reset");

        if self.persistence_degraded {
            return;
        }
        if let Err(err) = self.store.clear() {
            self.degrade(err);
            return;
        }
        self.persist();
    }

    pub fn dismiss_reminder(&mut self) {
        self.reminder_due = false;
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn quote(&self) -> &'static str {
        QUOTES[self.quote % QUOTES.len()]
    }

    pub fn reminder_due(&self) -> bool {
        self.reminder_due
    }

    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    pub fn days_elapsed(&self) -> i64 {
        days_elapsed(self.state.start_date, self.clock.now())
    }

    pub fn progress_percentage(&self) -> f64 {
        progress_percentage(&self.state)
    }

    pub fn stats(&self) -> StatsResponse {
        build_stats_at(self.clock.now(), &self.state)
    }

    pub fn topics(&self) -> Vec<TopicView> {
        (1..=TOTAL_DAYS)
            .zip(TOPICS)
            .map(|(day, title)| TopicView {
                day,
                title: title.to_string(),
                completed: self.state.is_completed(day),
                current: self.state.is_current(day),
                variant: TopicVariant::for_day(&self.state, day),
            })
            .collect()
    }

    pub fn snapshot(&self) -> ProgressResponse {
        ProgressResponse {
            current_day: self.state.current_day,
            completed_days: self.state.completed_days.iter().copied().collect(),
            start_date: self
                .state
                .start_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            stats: self.stats(),
            quote: self.quote().to_string(),
            reminder_due: self.reminder_due,
            persistence_degraded: self.persistence_degraded,
            topics: self.topics(),
        }
    }

    fn check_reminder(&mut self) {
        let now = self.clock.now();
        let stored = if self.persistence_degraded {
            None
        } else {
            match self.store.last_reminder() {
                Ok(at) => at,
                Err(err) => {
                    self.degrade(err);
                    None
                }
            }
        };

        let last = stored.max(self.reminder_shown_at);
        let due = match last {
            None => true,
            Some(at) => now - at > Duration::hours(REMINDER_INTERVAL_HOURS),
        };
        if !due {
            return;
        }

        debug!("daily reminder due");
        self.reminder_due = true;
        self.reminder_shown_at = Some(now);
        if self.persistence_degraded {
            return;
        }
        if let Err(err) = self.store.record_reminder(now) {
            self.degrade(err);
        }
    }

    fn persist(&mut self) {
        if self.persistence_degraded {
            return;
        }
        if let Err(err) = self.store.save(&self.state) {
            self.degrade(err);
        }
    }

    fn degrade(&mut self, err: TrackerError) {
        warn!("continuing without persistence: {err}");
        self.persistence_degraded = true;
    }
}

fn validate_day(day: u32) -> Result<()> {
    if is_valid_day(day) {
        Ok(())
    } else {
        Err(TrackerError::InvalidDay { day })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress_store::{PROGRESS_KEY, REMINDER_KEY};
    use crate::storage::MemoryStore;

    fn start_time() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_767_605_400, 0).unwrap()
    }

    fn fresh_session() -> Session<MemoryStore> {
        Session::start(
            MemoryStore::new(),
            Clock::fixed(start_time()),
            QuoteRng::scripted(vec![0, 1, 2, 3, 4, 5, 6, 7]),
        )
    }

    fn session_at_day(current_day: u32) -> Session<MemoryStore> {
        let mut session = fresh_session();
        for day in 1..current_day {
            session.mark_complete(day).unwrap();
        }
        assert_eq!(session.state().current_day, current_day);
        session
    }

    fn reopen(session: Session<MemoryStore>, clock: Clock) -> Session<MemoryStore> {
        let kv = session.store().kv().clone();
        Session::start(kv, clock, QuoteRng::scripted(vec![0]))
    }

    #[test]
    fn first_start_initializes_and_persists_defaults() {
        let session = fresh_session();
        assert_eq!(session.state(), &ProgressState::fresh(start_time()));
        assert_eq!(
            session.store().load(start_time()).unwrap(),
            Some(ProgressState::fresh(start_time()))
        );
        assert!(!session.persistence_degraded());
    }

    #[test]
    fn start_resumes_saved_progress() {
        let mut session = fresh_session();
        session.mark_complete(1).unwrap();
        session.mark_complete(2).unwrap();

        let later = Clock::fixed(start_time() + Duration::days(3));
        let resumed = reopen(session, later);
        assert_eq!(resumed.state().current_day, 3);
        assert_eq!(resumed.state().start_date, start_time());
        assert_eq!(resumed.days_elapsed(), 3);
    }

    #[test]
    fn malformed_record_starts_fresh() {
        let kv = MemoryStore::new().with_entry(PROGRESS_KEY, "not json");
        let session = Session::start(kv, Clock::fixed(start_time()), QuoteRng::seeded(1));
        assert_eq!(session.state(), &ProgressState::fresh(start_time()));
        assert!(!session.persistence_degraded());
    }

    #[test]
    fn mark_complete_is_idempotent() {
        for day in 1..=TOTAL_DAYS {
            let mut once = session_at_day(3);
            let mut twice = session_at_day(3);

            once.mark_complete(day).unwrap();
            twice.mark_complete(day).unwrap();
            assert!(!twice.mark_complete(day).unwrap());
            assert_eq!(once.state(), twice.state());
        }
    }

    #[test]
    fn repeated_mark_complete_keeps_quote() {
        let mut session = fresh_session();
        session.mark_complete(4).unwrap();
        let quote = session.quote();
        session.mark_complete(4).unwrap();
        assert_eq!(session.quote(), quote);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        for day in 1..=TOTAL_DAYS {
            let mut session = session_at_day(5);
            let before = session.state().is_completed(day);

            session.toggle_complete(day).unwrap();
            assert_ne!(session.state().is_completed(day), before);
            session.toggle_complete(day).unwrap();
            assert_eq!(session.state().is_completed(day), before);
        }
    }

    #[test]
    fn toggle_off_does_not_move_current_day_back() {
        let mut session = session_at_day(4);
        assert!(!session.toggle_complete(3).unwrap());
        assert_eq!(session.state().current_day, 4);
        assert!(!session.state().is_completed(3));
    }

    #[test]
    fn completing_current_day_advances() {
        for current in 1..TOTAL_DAYS {
            let mut session = session_at_day(current);
            session.mark_complete(current).unwrap();
            assert_eq!(session.state().current_day, current + 1);
            assert!(session.state().is_completed(current));
        }
    }

    #[test]
    fn completing_future_day_keeps_current() {
        for current in 1..=TOTAL_DAYS - 5 {
            let mut session = session_at_day(current);
            session.mark_complete(current + 5).unwrap();
            assert_eq!(session.state().current_day, current);
            assert!(session.state().is_completed(current + 5));
        }
    }

    #[test]
    fn last_day_does_not_advance_past_plan() {
        let mut session = session_at_day(TOTAL_DAYS);
        session.mark_complete(TOTAL_DAYS).unwrap();
        assert_eq!(session.state().current_day, TOTAL_DAYS);
        assert_eq!(session.progress_percentage(), 100.0);
    }

    #[test]
    fn out_of_range_days_are_rejected_without_change() {
        let mut session = session_at_day(2);
        let before = session.state().clone();

        for day in [0, 21, 500] {
            assert!(matches!(
                session.mark_complete(day),
                Err(TrackerError::InvalidDay { day: rejected }) if rejected == day
            ));
            assert!(matches!(
                session.toggle_complete(day),
                Err(TrackerError::InvalidDay { .. })
            ));
        }
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn every_change_is_persisted() {
        let mut session = fresh_session();
        session.mark_complete(1).unwrap();
        session.toggle_complete(9).unwrap();
        session.toggle_complete(1).unwrap();

        let stored = session.store().load(start_time()).unwrap().unwrap();
        assert_eq!(&stored, session.state());
    }

    #[test]
    fn reset_clears_and_persists_fresh_state() {
        let mut session = session_at_day(6);
        session.toggle_complete(15).unwrap();

        session.clock_mut().advance(Duration::days(2));
        session.reset();

        let reset_at = start_time() + Duration::days(2);
        assert_eq!(session.state(), &ProgressState::fresh(reset_at));
        assert_eq!(session.days_elapsed(), 0);
        assert_eq!(
            session.store().load(reset_at).unwrap(),
            Some(ProgressState::fresh(reset_at))
        );
    }

    #[test]
    fn mark_complete_rerolls_quote() {
        let mut session = Session::start(
            MemoryStore::new(),
            Clock::fixed(start_time()),
            QuoteRng::scripted(vec![2, 5]),
        );
        assert_eq!(session.quote(), QUOTES[2]);
        session.mark_complete(1).unwrap();
        assert_eq!(session.quote(), QUOTES[5]);
    }

    #[test]
    fn reminder_due_without_history() {
        let session = fresh_session();
        assert!(session.reminder_due());
        assert_eq!(
            session.store().kv().get(REMINDER_KEY).unwrap(),
            Some(start_time().timestamp_millis().to_string())
        );
    }

    #[test]
    fn reminder_not_due_after_ten_hours() {
        let shown = start_time() - Duration::hours(10);
        let kv = MemoryStore::new()
            .with_entry(REMINDER_KEY, &shown.timestamp_millis().to_string());
        let session = Session::start(kv, Clock::fixed(start_time()), QuoteRng::seeded(7));

        assert!(!session.reminder_due());
        assert_eq!(
            session.store().kv().get(REMINDER_KEY).unwrap(),
            Some(shown.timestamp_millis().to_string())
        );
    }

    #[test]
    fn reminder_due_after_twenty_five_hours() {
        let shown = start_time() - Duration::hours(25);
        let kv = MemoryStore::new()
            .with_entry(REMINDER_KEY, &shown.timestamp_millis().to_string());
        let session = Session::start(kv, Clock::fixed(start_time()), QuoteRng::seeded(7));

        assert!(session.reminder_due());
        assert_eq!(
            session.store().kv().get(REMINDER_KEY).unwrap(),
            Some(start_time().timestamp_millis().to_string())
        );
    }

    #[test]
    fn page_load_never_lowers_reminder() {
        let mut session = fresh_session();
        assert!(session.reminder_due());

        session.clock_mut().advance(Duration::hours(1));
        session.page_load();
        assert!(session.reminder_due());

        session.dismiss_reminder();
        session.page_load();
        assert!(!session.reminder_due());

        session.clock_mut().advance(Duration::hours(24));
        session.page_load();
        assert!(session.reminder_due());
    }

    #[test]
    fn unavailable_storage_degrades_to_memory() {
        let mut session = Session::start(
            MemoryStore::unavailable(),
            Clock::fixed(start_time()),
            QuoteRng::seeded(3),
        );
        assert!(session.persistence_degraded());
        assert!(session.reminder_due());

        session.mark_complete(1).unwrap();
        session.toggle_complete(7).unwrap();
        assert_eq!(session.state().current_day, 2);
        assert!(session.state().is_completed(7));

        session.dismiss_reminder();
        session.clock_mut().advance(Duration::hours(2));
        session.page_load();
        assert!(!session.reminder_due());

        session.reset();
        assert_eq!(session.state().current_day, 1);
    }

    #[test]
    fn topics_reflect_state() {
        let mut session = session_at_day(3);
        session.mark_complete(10).unwrap();

        let topics = session.topics();
        assert_eq!(topics.len(), TOTAL_DAYS as usize);
        assert_eq!(topics[0].variant, TopicVariant::Completed);
        assert_eq!(topics[2].variant, TopicVariant::Current);
        assert_eq!(topics[9].variant, TopicVariant::Completed);
        assert_eq!(topics[19].variant, TopicVariant::Plain);
        assert_eq!(topics[19].title, TOPICS[19]);
    }

    #[test]
    fn snapshot_carries_stats_and_quote() {
        let mut session = session_at_day(5);
        session.clock_mut().advance(Duration::hours(50));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_day, 5);
        assert_eq!(snapshot.completed_days, vec![1, 2, 3, 4]);
        assert_eq!(snapshot.start_date, "2026-01-05T09:30:00.000Z");
        assert_eq!(snapshot.stats.days_elapsed, 2);
        assert_eq!(snapshot.stats.progress_percentage, 20.0);
        assert_eq!(snapshot.quote, session.quote());
        assert!(snapshot.reminder_due);
    }
}
