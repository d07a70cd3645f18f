//! Intents: proposed state transitions sent to the ledger authority.
//!
//! The engine never applies intents to its own snapshot. It validates them
//! locally, dispatches them, and waits for the authority to publish the next
//! snapshot. Authorities that keep state in-process (tests, local play) use
//! [`IntentTransition::transition`] to produce that next snapshot with the
//! same rules the client validated against.
pub mod combat;
pub mod movement;

pub use combat::{ATTACK_CAPABLE, AttackError, AttackIntent, attack_power};
pub use movement::{MoveError, MoveIntent};

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Snapshot, UnitId};

/// Defines how an intent is validated against, and applied to, a snapshot.
pub trait IntentTransition {
    type Error: GameError;

    /// Returns the unit initiating this intent.
    fn actor(&self) -> UnitId;

    /// Validates pre-conditions against the snapshot the intent targets.
    fn pre_validate(&self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// Produces the successor snapshot. Does not re-run validation.
    fn apply(&self, snapshot: &Snapshot) -> Result<Snapshot, Self::Error>;

    /// Validates, then applies.
    fn transition(&self, snapshot: &Snapshot) -> Result<Snapshot, Self::Error> {
        self.pre_validate(snapshot)?;
        self.apply(snapshot)
    }
}

/// Any intent the resolver can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Move(MoveIntent),
    Attack(AttackIntent),
}

impl Intent {
    pub fn actor(&self) -> UnitId {
        match self {
            Intent::Move(intent) => intent.actor(),
            Intent::Attack(intent) => intent.actor(),
        }
    }

    /// Used for log fields and file names.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Intent::Move(_) => "move",
            Intent::Attack(_) => "attack",
        }
    }

    pub fn pre_validate(&self, snapshot: &Snapshot) -> Result<(), IntentError> {
        match self {
            Intent::Move(intent) => intent.pre_validate(snapshot).map_err(IntentError::from),
            Intent::Attack(intent) => intent.pre_validate(snapshot).map_err(IntentError::from),
        }
    }

    pub fn transition(&self, snapshot: &Snapshot) -> Result<Snapshot, IntentError> {
        match self {
            Intent::Move(intent) => intent.transition(snapshot).map_err(IntentError::from),
            Intent::Attack(intent) => intent.transition(snapshot).map_err(IntentError::from),
        }
    }
}

impl From<MoveIntent> for Intent {
    fn from(intent: MoveIntent) -> Self {
        Self::Move(intent)
    }
}

impl From<AttackIntent> for Intent {
    fn from(intent: AttackIntent) -> Self {
        Self::Attack(intent)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Move(intent) => write!(f, "move {} to {}", intent.unit, intent.to),
            Intent::Attack(intent) => {
                write!(f, "attack {} with {}", intent.defender, intent.attacker)
            }
        }
    }
}

/// Errors surfaced while validating or applying an [`Intent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentError {
    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("attack rejected: {0}")]
    Attack(#[from] AttackError),
}

impl GameError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            IntentError::Move(error) => error.severity(),
            IntentError::Attack(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            IntentError::Move(error) => error.error_code(),
            IntentError::Attack(error) => error.error_code(),
        }
    }
}
