use crate::model::log::schedule::ScheduleLog;
use crate::model::schedule::Schedule;
use chrono::NaiveDateTime;
use dashmap::DashMap;
use macros::log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledJob {
    pub task_name: String,
    pub schedule: Schedule,
    pub next_run: NaiveDateTime,
}

/// Recurring jobs by task name. Jobs hold only the name; the task itself is
/// resolved again when the job fires.
#[derive(Default)]
pub struct ScheduleRegistry {
    jobs: DashMap<String, ScheduledJob>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any job under `task_name`. Returns false for schedules that
    /// never recur, which are left unregistered.
    pub fn register(&self, task_name: &str, schedule: &Schedule, now: NaiveDateTime) -> bool {
        self.jobs.remove(task_name);
        let next_run = match schedule.next_run_after(now) {
            Some(next_run) if schedule.is_recurring() => next_run,
            _ => {
                log!(ScheduleLog::OnceNotRegistered {
                    name: task_name.to_string()
                });
                return false;
            }
        };
        self.jobs.insert(
            task_name.to_string(),
            ScheduledJob {
                task_name: task_name.to_string(),
                schedule: *schedule,
                next_run,
            },
        );
        log!(ScheduleLog::JobRegistered {
            name: task_name.to_string(),
            schedule: schedule.to_string(),
        });
        true
    }

    pub fn unregister(&self, task_name: &str) -> bool {
        let removed = self.jobs.remove(task_name).is_some();
        if removed {
            log!(ScheduleLog::JobRemoved {
                name: task_name.to_string()
            });
        }
        removed
    }

    pub fn contains(&self, task_name: &str) -> bool {
        self.jobs.contains_key(task_name)
    }

    pub fn jobs(&self) -> Vec<ScheduledJob> {
        let mut jobs: Vec<_> = self.jobs.iter().map(|job| job.value().clone()).collect();
        jobs.sort_by(|left, right| left.task_name.cmp(&right.task_name));
        jobs
    }

    /// Names of jobs due at `now`, sorted. Each due job fires once and moves on
    /// to its next instant after `now`, so a late tick never fires twice.
    pub fn take_due(&self, now: NaiveDateTime) -> Vec<String> {
        let mut due = Vec::new();
        for mut job in self.jobs.iter_mut() {
            if job.next_run > now {
                continue;
            }
            match job.schedule.next_run_after(now) {
                Some(next_run) => job.next_run = next_run,
                None => continue,
            }
            due.push(job.task_name.clone());
        }
        due.sort();
        due
    }
}
