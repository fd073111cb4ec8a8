//! Wall-clock trigger rules and a deterministic scheduler
//!
//! The core never owns a timer: trigger rules decide whether a job is due
//! at a timestamp handed in from outside, and the binary's loop supplies
//! real time. Tests call [`Scheduler::tick`] with synthetic timestamps.

use chrono::{DateTime, NaiveTime, Utc};

/// Trait for deciding when a scheduled job should fire
pub trait TriggerRule {
    /// Check whether the job is due at `now`, given when it last fired.
    fn should_fire(&self, now: DateTime<Utc>, last_fired: Option<DateTime<Utc>>) -> bool;

    /// Name of this rule, for logging.
    fn name(&self) -> &str;
}

/// Fires at most once per day, at or after the given wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct DailyAt {
    at: NaiveTime,
}

impl DailyAt {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }
}

impl TriggerRule for DailyAt {
    fn should_fire(&self, now: DateTime<Utc>, last_fired: Option<DateTime<Utc>>) -> bool {
        if now.time() < self.at {
            return false;
        }
        match last_fired {
            None => true,
            Some(last) => now.date_naive() != last.date_naive(),
        }
    }

    fn name(&self) -> &str {
        "DailyAt"
    }
}

/// Fires every `n` minutes; used for the keep-alive heartbeat.
#[derive(Debug, Clone, Copy)]
pub struct EveryMinutes {
    n: u32,
}

impl EveryMinutes {
    pub fn new(n: u32) -> Self {
        Self { n }
    }
}

impl TriggerRule for EveryMinutes {
    fn should_fire(&self, now: DateTime<Utc>, last_fired: Option<DateTime<Utc>>) -> bool {
        match last_fired {
            None => true,
            Some(last) => now.signed_duration_since(last).num_minutes() >= i64::from(self.n),
        }
    }

    fn name(&self) -> &str {
        "EveryMinutes"
    }
}

struct Entry<'a> {
    rule: Box<dyn TriggerRule + 'a>,
    job: Box<dyn FnMut(DateTime<Utc>) + 'a>,
    last_fired: Option<DateTime<Utc>>,
}

/// Holds trigger rules with their jobs and fires due ones from `tick`.
#[derive(Default)]
pub struct Scheduler<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Scheduler<'a> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add<R, J>(&mut self, rule: R, job: J)
    where
        R: TriggerRule + 'a,
        J: FnMut(DateTime<Utc>) + 'a,
    {
        self.entries.push(Entry {
            rule: Box::new(rule),
            job: Box::new(job),
            last_fired: None,
        });
    }

    /// Run every job whose rule fires at `now`. Returns how many fired.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        let mut fired = 0;
        for entry in &mut self.entries {
            if entry.rule.should_fire(now, entry.last_fired) {
                log::debug!("trigger {} firing", entry.rule.name());
                (entry.job)(now);
                entry.last_fired = Some(now);
                fired += 1;
            }
        }
        fired
    }
}
