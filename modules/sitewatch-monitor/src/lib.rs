pub mod diff;
pub mod notify;
pub mod observer;
pub mod snapshot;
pub mod watch;
