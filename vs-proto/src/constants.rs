//! Wire-level constants shared between the codec and the protocol engine.

/// Length in bytes of an encoded virtual stigmergy broadcast.
pub const BROADCAST_LEN: usize = 9;

/// Largest representable key. Keys are packed into the low 6 bits of byte 0.
pub const MAX_KEY: u8 = 63;

/// Mask isolating the key bits of byte 0.
pub const KEY_MASK: u8 = 0b0011_1111;

/// Bit flagging a frame as a virtual stigmergy broadcast (vs. some other
/// message class sharing the same 9-byte envelope).
pub const VS_MARKER_BIT: u8 = 0b1000_0000;

/// Bit carrying the GET/PUT action.
pub const ACTION_BIT: u8 = 0b0100_0000;
