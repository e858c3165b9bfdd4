use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Trap state of the current floor, ordered from least to most safe
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
    Display,
)]
pub enum TrapStatus {
    /// Traps armed and hidden
    #[default]
    Active,
    /// Traps armed but revealed
    Visible,
    /// Traps disarmed for the rest of the floor
    Inactive,
}

impl TrapStatus {
    /// Status after a Sight effect; only hidden traps become visible
    pub fn reveal(self) -> Self {
        match self {
            Self::Active => Self::Visible,
            other => other,
        }
    }

    /// Status after a Safety effect
    pub fn disarm(self) -> Self {
        Self::Inactive
    }
}
