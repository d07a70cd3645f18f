//! Rules engine: reachability, selection, and click resolution.
//!
//! Everything here is synchronous and side-effect free apart from the
//! explicit selection state. Callers own the snapshot, the selection, and
//! the pending set; the engine only reads them.

mod pending;
mod range;
mod resolver;
mod selection;

pub use pending::PendingIntents;
pub use range::RangeCalculator;
pub use resolver::{ActionResolver, Decision, RejectReason};
pub use selection::{SelectionError, SelectionState};
