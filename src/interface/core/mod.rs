pub mod dispatcher;
pub mod runnable;
