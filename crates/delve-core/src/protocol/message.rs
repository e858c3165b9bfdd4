use serde::{Deserialize, Serialize};

use super::layout::{actor_control_self, system_log};
use crate::content::ids::director;
use crate::error::{Error, Result};

/// Direction of a zone connection message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Client to server
    ZoneUp,
    /// Server to client
    ZoneDown,
}

/// A network message as delivered by the host's network hook
#[derive(Debug, Clone, Copy)]
pub struct NetworkMessage<'a> {
    pub payload: &'a [u8],
    pub opcode: u16,
    pub source_actor: u32,
    pub target_actor: u32,
    pub direction: Direction,
}

/// Bounds-checked little-endian reads over a payload
struct PayloadReader<'a> {
    opcode: u16,
    bytes: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    fn new(opcode: u16, bytes: &'a [u8], min_len: usize) -> Result<Self> {
        if bytes.len() < min_len {
            return Err(Error::PayloadTooShort {
                opcode,
                needed: min_len,
                actual: bytes.len(),
            });
        }
        Ok(Self { opcode, bytes })
    }

    fn field<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        self.bytes
            .get(offset..offset + N)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(Error::PayloadTooShort {
                opcode: self.opcode,
                needed: offset + N,
                actual: self.bytes.len(),
            })
    }

    fn u8_at(&self, offset: usize) -> Result<u8> {
        self.field::<1>(offset).map(|b| b[0])
    }

    fn u16_at(&self, offset: usize) -> Result<u16> {
        self.field::<2>(offset).map(u16::from_le_bytes)
    }

    fn u32_at(&self, offset: usize) -> Result<u32> {
        self.field::<4>(offset).map(u32::from_le_bytes)
    }
}

/// Decoded SystemLogMessage payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemLogMessage {
    pub log_id: u32,
    /// Byte at the item-id offset, if the payload is long enough to carry one
    pub item_id: Option<u8>,
}

impl SystemLogMessage {
    pub fn decode(opcode: u16, payload: &[u8]) -> Result<Self> {
        let reader = PayloadReader::new(opcode, payload, system_log::MIN_LEN)?;
        let log_id = reader.u32_at(system_log::LOG_ID)?;
        let item_id = if payload.len() >= system_log::MIN_LEN_WITH_ITEM {
            Some(reader.u8_at(system_log::ITEM_ID)?)
        } else {
            None
        };

        Ok(Self { log_id, item_id })
    }
}

/// Decoded ActorControlSelf payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorControlSelf {
    DirectorUpdate {
        kind: u8,
        /// Content id field; only meaningful for duty-commenced updates
        content_id: u16,
    },
    Other {
        category: u8,
    },
}

impl ActorControlSelf {
    pub fn decode(opcode: u16, payload: &[u8]) -> Result<Self> {
        let reader = PayloadReader::new(opcode, payload, actor_control_self::CATEGORY_WIDTH)?;
        let category = reader.u8_at(actor_control_self::CATEGORY)?;
        if category != director::DIRECTOR_UPDATE {
            return Ok(Self::Other { category });
        }

        let reader = PayloadReader::new(opcode, payload, actor_control_self::MIN_LEN)?;
        Ok(Self::DirectorUpdate {
            kind: reader.u8_at(actor_control_self::UPDATE_KIND)?,
            content_id: reader.u16_at(actor_control_self::CONTENT_ID)?,
        })
    }
}
