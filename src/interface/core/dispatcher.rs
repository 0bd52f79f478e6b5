use std::sync::Arc;

/// Receiver of scheduler triggers. Dispatch must not block the scheduler loop.
pub trait JobDispatcher: Send + Sync + 'static {
    fn dispatch(self: Arc<Self>, task_name: String);
}
