//! Worker tasks that back the session.
//!
//! The dispatch worker owns all ledger writes; the handle stays synchronous.

mod dispatch;

pub(crate) use dispatch::{Command, DispatchWorker};
