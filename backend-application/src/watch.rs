// Live game watch subsystem
//
// GameWatcher (discovery) -> PollerPool -> FeedPoller per live game
//   -> WriteQueue -> WriteSerializer -> PlayerRepository

pub mod discovery;
pub mod poller;
pub mod pool;
pub mod write_queue;

#[cfg(test)]
pub(crate) mod testing;

pub use discovery::*;
pub use poller::*;
pub use pool::*;
pub use write_queue::*;
