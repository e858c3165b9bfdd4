//! Payload layout constants
//!
//! Byte offsets into the IPC payload (after the segment/IPC headers the host
//! strips). All multi-byte fields are little-endian.

/// SystemLogMessage payload
pub mod system_log {
    /// Log message id (u32)
    pub const LOG_ID: usize = 4;
    pub const LOG_ID_WIDTH: usize = 4;

    /// Item id of a used pomander (u8), only meaningful for the pomander log id
    pub const ITEM_ID: usize = 16;
    pub const ITEM_ID_WIDTH: usize = 1;

    /// Bytes needed to read the log id
    pub const MIN_LEN: usize = LOG_ID + LOG_ID_WIDTH;

    /// Bytes needed to read a pomander item id
    pub const MIN_LEN_WITH_ITEM: usize = ITEM_ID + ITEM_ID_WIDTH;
}

/// ActorControlSelf payload
pub mod actor_control_self {
    /// Control category (u8; the u16 field's low byte)
    pub const CATEGORY: usize = 0;
    pub const CATEGORY_WIDTH: usize = 1;

    /// Content id of a duty-commenced update (u16; low half of param1)
    pub const CONTENT_ID: usize = 4;
    pub const CONTENT_ID_WIDTH: usize = 2;

    /// Director update kind (u8; low byte of param2)
    pub const UPDATE_KIND: usize = 8;
    pub const UPDATE_KIND_WIDTH: usize = 1;

    /// Bytes needed to decode a director update
    pub const MIN_LEN: usize = UPDATE_KIND + UPDATE_KIND_WIDTH;
}
