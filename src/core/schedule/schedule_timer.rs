use crate::core::app_config::AppConfig;
use crate::core::schedule::schedule_registry::ScheduleRegistry;
use crate::interface::core::dispatcher::JobDispatcher;
use crate::interface::core::runnable::Runnable;
use crate::model::log::schedule::ScheduleLog;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use macros::log;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::oneshot::Receiver;
use tokio::time::{MissedTickBehavior, interval};

/// Polls the registry at a fixed interval and hands due jobs to the dispatcher.
pub struct ScheduleTimer {
    app_config: Arc<AppConfig>,
    registry: Arc<ScheduleRegistry>,
    dispatcher: Arc<dyn JobDispatcher>,
}

impl ScheduleTimer {
    pub fn new(
        app_config: Arc<AppConfig>,
        registry: Arc<ScheduleRegistry>,
        dispatcher: Arc<dyn JobDispatcher>,
    ) -> Self {
        ScheduleTimer {
            app_config,
            registry,
            dispatcher,
        }
    }

    pub fn tick(&self, now: NaiveDateTime) -> usize {
        let due = self.registry.take_due(now);
        let count = due.len();
        for task_name in due {
            log!(ScheduleLog::JobFired {
                name: task_name.clone()
            });
            self.dispatcher.clone().dispatch(task_name);
        }
        count
    }
}

#[async_trait]
impl Runnable for ScheduleTimer {
    async fn run_impl(self: Arc<Self>, mut shutdown_rx: Receiver<()>) {
        let mut ticker = interval(Duration::from_secs(self.app_config.tick_interval));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            select! {
                biased;
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    self.tick(Local::now().naive_local());
                }
            }
        }
        log!(ScheduleLog::SchedulerStopped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Config;
    use crate::model::schedule::{Schedule, ScheduleTime};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDispatcher {
        dispatched: Mutex<Vec<String>>,
    }

    impl JobDispatcher for RecordingDispatcher {
        fn dispatch(self: Arc<Self>, task_name: String) {
            self.dispatched.lock().unwrap().push(task_name);
        }
    }

    fn timer(dispatcher: Arc<RecordingDispatcher>) -> (ScheduleTimer, Arc<ScheduleRegistry>) {
        let app_config = Arc::new(AppConfig::from_config(Config::default()).unwrap());
        let registry = Arc::new(ScheduleRegistry::new());
        (
            ScheduleTimer::new(app_config, registry.clone(), dispatcher),
            registry,
        )
    }

    #[test]
    fn tick_dispatches_due_jobs_by_name() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (timer, registry) = timer(dispatcher.clone());
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let time = ScheduleTime::from_hm(6, 15).unwrap();
        registry.register("nightly", &Schedule::daily(time), date.and_hms_opt(6, 0, 0).unwrap());

        assert_eq!(timer.tick(date.and_hms_opt(6, 14, 59).unwrap()), 0);
        assert_eq!(timer.tick(date.and_hms_opt(6, 15, 0).unwrap()), 1);
        assert_eq!(timer.tick(date.and_hms_opt(6, 15, 1).unwrap()), 0);
        assert_eq!(*dispatcher.dispatched.lock().unwrap(), vec!["nightly"]);
    }

    #[tokio::test]
    async fn stops_on_shutdown_signal() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (timer, _) = timer(dispatcher);
        let (shutdown_tx, handle) = Arc::new(timer).run();

        shutdown_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
