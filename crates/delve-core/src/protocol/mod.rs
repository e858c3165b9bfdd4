//! Server message decoding.
//!
//! Only two server-to-client messages matter to the tracker:
//!
//! - **SystemLogMessage**: pomander use, duty end, transference
//! - **ActorControlSelf**: director updates (duty commenced / recommenced)
//!
//! Opcode numbers move between game patches, so they come from a versioned
//! [`OpcodeTable`] that can be loaded from disk. Payload layouts are fixed
//! and live in [`layout`].

pub mod layout;
mod message;
mod opcodes;
mod signal;

pub use message::*;
pub use opcodes::*;
pub use signal::*;
