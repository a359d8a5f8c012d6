//! Background sweep scheduler.
//!
//! Owned by the composition root and started explicitly; `shutdown` aborts
//! all jobs. Three independent timers:
//! - reminder sweep, every minute
//! - recurrence sweep, daily at 00:00 local time
//! - overdue sweep, daily at 10:00 local time
//!
//! Each job holds its own mutex for the duration of a run; a tick that
//! arrives while the previous run is still executing is skipped with a
//! warning instead of piling up.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveTime, TimeZone};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::{info, warn};

use billfold_core::reminders::ReminderServiceTrait;

const REMINDER_SWEEP_INTERVAL_SECS: u64 = 60;
const RECURRENCE_SWEEP_TIME: (u32, u32) = (0, 0);
const OVERDUE_SWEEP_TIME: (u32, u32) = (10, 0);

pub struct SweepScheduler {
    handles: Vec<JoinHandle<()>>,
}

impl SweepScheduler {
    /// Spawn all three sweep jobs.
    pub fn start(reminder_service: Arc<dyn ReminderServiceTrait>) -> Self {
        info!("Starting sweep scheduler (reminder: 60s, recurrence: 00:00, overdue: 10:00)");
        let handles = vec![
            spawn_reminder_sweep(reminder_service.clone()),
            spawn_daily_sweep(reminder_service.clone(), RECURRENCE_SWEEP_TIME, SweepKind::Recurrence),
            spawn_daily_sweep(reminder_service, OVERDUE_SWEEP_TIME, SweepKind::Overdue),
        ];
        Self { handles }
    }

    /// Stop all jobs. In-flight sweeps are aborted.
    pub fn shutdown(&mut self) {
        info!("Stopping sweep scheduler");
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for SweepScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Clone, Copy, Debug)]
enum SweepKind {
    Recurrence,
    Overdue,
}

fn spawn_reminder_sweep(service: Arc<dyn ReminderServiceTrait>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let guard = Mutex::new(());
        let mut ticker = interval(Duration::from_secs(REMINDER_SWEEP_INTERVAL_SECS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let Ok(_lock) = guard.try_lock() else {
                warn!("Previous reminder sweep still running, skipping this tick");
                continue;
            };
            let now = Local::now().naive_local();
            if let Err(e) = service.run_reminder_sweep(now).await {
                warn!("Reminder sweep failed: {e}");
            }
        }
    })
}

fn spawn_daily_sweep(
    service: Arc<dyn ReminderServiceTrait>,
    (hour, minute): (u32, u32),
    kind: SweepKind,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let guard = Mutex::new(());
        loop {
            let delay = delay_until_next(Local::now(), hour, minute);
            sleep(delay).await;

            let Ok(_lock) = guard.try_lock() else {
                warn!("Previous {kind:?} sweep still running, skipping this run");
                continue;
            };
            let now = Local::now();
            let result = match kind {
                SweepKind::Recurrence => service
                    .run_recurrence_sweep(now.date_naive())
                    .await
                    .map(|_| ()),
                SweepKind::Overdue => service
                    .run_overdue_sweep(now.naive_local())
                    .await
                    .map(|_| ()),
            };
            if let Err(e) = result {
                warn!("{kind:?} sweep failed: {e}");
            }
        }
    })
}

/// Time to sleep until the next local occurrence of `hour:minute`.
fn delay_until_next(now: DateTime<Local>, hour: u32, minute: u32) -> Duration {
    let target_time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid sweep time");
    let mut target_date = now.date_naive();
    if now.time() >= target_time {
        target_date = target_date + ChronoDuration::days(1);
    }
    let target = Local
        .from_local_datetime(&target_date.and_time(target_time))
        .earliest()
        .unwrap_or(now);
    (target - now).to_std().unwrap_or(std::time::Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .unwrap()
    }

    #[test]
    fn test_delay_targets_later_today() {
        let now = local(2025, 3, 7, 8, 0, 0);
        let delay = delay_until_next(now, 10, 0);
        assert_eq!(delay, Duration::from_secs(2 * 3600));
    }

    #[test]
    fn test_delay_rolls_to_tomorrow() {
        let now = local(2025, 3, 7, 10, 0, 0);
        let delay = delay_until_next(now, 10, 0);
        assert_eq!(delay, Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_delay_to_midnight() {
        let now = local(2025, 3, 7, 23, 59, 0);
        let delay = delay_until_next(now, 0, 0);
        assert_eq!(delay, Duration::from_secs(60));
    }
}
