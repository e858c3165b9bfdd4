use super::{ActorControlSelf, Direction, NetworkMessage, OpcodeTable, SystemLogMessage};
use crate::content::ids::{director, log};
use crate::error::{Error, Result};
use crate::protocol::layout::system_log;

/// Dungeon-relevant events recovered from server messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DungeonSignal {
    DutyCommenced { content_id: u16 },
    DutyRecommenced,
    PomanderUsed { item_id: u8 },
    DutyEnded,
    TransferenceInitiated,
}

impl DungeonSignal {
    /// Signals carried by system log messages; the tracker only honours
    /// these while the player stands in a dungeon zone.
    pub fn is_system_log(&self) -> bool {
        matches!(
            self,
            Self::PomanderUsed { .. } | Self::DutyEnded | Self::TransferenceInitiated
        )
    }
}

/// Decode a network message into a dungeon signal.
///
/// Returns `Ok(None)` for client-bound traffic, unrelated opcodes and
/// unrelated log ids / director updates. Returns an error only when a
/// relevant message is too short to carry its fields.
pub fn decode_signal(msg: &NetworkMessage<'_>, opcodes: &OpcodeTable) -> Result<Option<DungeonSignal>> {
    if msg.direction != Direction::ZoneDown {
        return Ok(None);
    }

    if msg.opcode == opcodes.system_log_message {
        let log_msg = SystemLogMessage::decode(msg.opcode, msg.payload)?;
        return Ok(match log_msg.log_id {
            log::POMANDER_USED => {
                let item_id = log_msg.item_id.ok_or(Error::PayloadTooShort {
                    opcode: msg.opcode,
                    needed: system_log::MIN_LEN_WITH_ITEM,
                    actual: msg.payload.len(),
                })?;
                Some(DungeonSignal::PomanderUsed { item_id })
            }
            log::DUTY_ENDED => Some(DungeonSignal::DutyEnded),
            log::TRANSFERENCE_INITIATED => Some(DungeonSignal::TransferenceInitiated),
            _ => None,
        });
    }

    if msg.opcode == opcodes.actor_control_self {
        return Ok(match ActorControlSelf::decode(msg.opcode, msg.payload)? {
            ActorControlSelf::DirectorUpdate { kind, content_id } => match kind {
                director::DUTY_COMMENCED => Some(DungeonSignal::DutyCommenced { content_id }),
                director::DUTY_RECOMMENCED => Some(DungeonSignal::DutyRecommenced),
                _ => None,
            },
            ActorControlSelf::Other { .. } => None,
        });
    }

    Ok(None)
}
