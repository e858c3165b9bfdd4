use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr, IntoStaticStr};

/// Dungeon consumables, keyed by the item id carried in the "used" log message
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Pomander {
    Safety = 1,
    Sight = 2,
    Strength = 3,
    Steel = 4,
    Affluence = 5,
    Flight = 6,
    Alteration = 7,
    Purity = 8,
    Fortune = 9,
    Witching = 10,
    Serenity = 11,
    Rage = 12,
    Lust = 13,
    Intuition = 14,
    Raising = 15,
    Resolution = 16,
    Frailty = 17,
    Concealment = 18,
    Petrification = 19,
    #[strum(serialize = "Lethargy Protomander")]
    LethargyProtomander = 20,
    #[strum(serialize = "Storms Protomander")]
    StormsProtomander = 21,
    #[strum(serialize = "Dread Protomander")]
    DreadProtomander = 22,
    #[strum(serialize = "Safety Protomander")]
    SafetyProtomander = 23,
    #[strum(serialize = "Sight Protomander")]
    SightProtomander = 24,
    #[strum(serialize = "Strength Protomander")]
    StrengthProtomander = 25,
    #[strum(serialize = "Steel Protomander")]
    SteelProtomander = 26,
    #[strum(serialize = "Affluence Protomander")]
    AffluenceProtomander = 27,
    #[strum(serialize = "Flight Protomander")]
    FlightProtomander = 28,
    #[strum(serialize = "Alteration Protomander")]
    AlterationProtomander = 29,
    #[strum(serialize = "Purity Protomander")]
    PurityProtomander = 30,
    #[strum(serialize = "Fortune Protomander")]
    FortuneProtomander = 31,
    #[strum(serialize = "Witching Protomander")]
    WitchingProtomander = 32,
    #[strum(serialize = "Serenity Protomander")]
    SerenityProtomander = 33,
    #[strum(serialize = "Intuition Protomander")]
    IntuitionProtomander = 34,
    #[strum(serialize = "Raising Protomander")]
    RaisingProtomander = 35,
}

impl Pomander {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_protomander(&self) -> bool {
        (*self as u8) >= Self::LethargyProtomander as u8
    }
}
