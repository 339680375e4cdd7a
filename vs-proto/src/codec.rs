use crate::constants::{ACTION_BIT, BROADCAST_LEN, KEY_MASK, MAX_KEY, VS_MARKER_BIT};
use crate::error::{Error, Result};
use crate::tuple::{Action, Broadcast, Tuple};

/// Encodes and decodes [`Broadcast`]s to/from the 9-byte wire frame.
///
/// Byte layout:
///
/// ```text
/// byte 0: bit7 = VS marker, bit6 = action (0=GET,1=PUT), bits5-0 = key
/// byte 1: posX
/// byte 2: posY
/// byte 3-4: value, little-endian
/// byte 5-6: timestamp, little-endian
/// byte 7: id
/// byte 8: reserved, always 0
/// ```
pub struct Codec;

impl Codec {
    /// Packs `broadcast` into a 9-byte frame.
    ///
    /// Fails if `broadcast.tuple.key` exceeds [`MAX_KEY`]; callers that
    /// already constructed the `Broadcast` through [`Broadcast::new`] cannot
    /// hit this, since that constructor enforces the same bound.
    pub fn encode(broadcast: &Broadcast) -> Result<[u8; BROADCAST_LEN]> {
        let key = broadcast.tuple.key;
        if key > MAX_KEY {
            return Err(Error::KeyOutOfRange(key));
        }

        let action_bit = match broadcast.action {
            Action::Get => 0,
            Action::Put => ACTION_BIT,
        };

        let mut frame = [0u8; BROADCAST_LEN];
        frame[0] = VS_MARKER_BIT | action_bit | (key & KEY_MASK);
        frame[1] = broadcast.tuple.pos_x;
        frame[2] = broadcast.tuple.pos_y;
        frame[3..5].copy_from_slice(&broadcast.tuple.value.to_le_bytes());
        frame[5..7].copy_from_slice(&broadcast.tuple.timestamp.to_le_bytes());
        frame[7] = broadcast.tuple.id;
        frame[8] = 0;
        Ok(frame)
    }

    /// Decodes a 9-byte frame. Total: returns `None` for any frame whose
    /// byte 0 bit 7 is clear (not a VS broadcast), and `Some` otherwise.
    ///
    /// `lastAccessed` is not part of the wire format and is always 0 on the
    /// decoded tuple.
    pub fn decode(frame: &[u8; BROADCAST_LEN]) -> Option<Broadcast> {
        if frame[0] & VS_MARKER_BIT == 0 {
            return None;
        }

        let action = if frame[0] & ACTION_BIT != 0 {
            Action::Put
        } else {
            Action::Get
        };
        let key = frame[0] & KEY_MASK;
        let value = u16::from_le_bytes([frame[3], frame[4]]);
        let timestamp = u16::from_le_bytes([frame[5], frame[6]]);

        Some(Broadcast {
            action,
            tuple: Tuple {
                key,
                value,
                pos_x: frame[1],
                pos_y: frame[2],
                id: frame[7],
                timestamp,
                last_accessed: 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_worked_example() {
        let broadcast = Broadcast::new(
            Action::Put,
            Tuple {
                key: 5,
                pos_x: 3,
                pos_y: 4,
                value: 0x1234,
                timestamp: 0x00AB,
                id: 7,
                last_accessed: 0,
            },
        )
        .unwrap();

        let frame = Codec::encode(&broadcast).unwrap();
        assert_eq!(frame, [0xC5, 0x03, 0x04, 0x34, 0x12, 0xAB, 0x00, 0x07, 0x00]);
    }

    #[test]
    fn round_trips_through_decode() {
        let broadcast = Broadcast::new(
            Action::Put,
            Tuple {
                key: 5,
                pos_x: 3,
                pos_y: 4,
                value: 0x1234,
                timestamp: 0x00AB,
                id: 7,
                last_accessed: 0,
            },
        )
        .unwrap();

        let frame = Codec::encode(&broadcast).unwrap();
        let decoded = Codec::decode(&frame).unwrap();
        assert_eq!(decoded, broadcast);
    }

    #[test]
    fn rejects_non_vs_frames() {
        let frame = [0x45u8, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(Codec::decode(&frame).is_none());
    }

    #[test]
    fn rejects_out_of_range_keys() {
        let tuple = Tuple {
            key: 64,
            ..Tuple::empty()
        };
        assert_eq!(
            Broadcast::new(Action::Get, tuple),
            Err(Error::KeyOutOfRange(64))
        );
    }

    #[test]
    fn get_action_clears_the_action_bit() {
        let broadcast = Broadcast::new(Action::Get, Tuple::default_for(1, 9)).unwrap();
        let frame = Codec::encode(&broadcast).unwrap();
        assert_eq!(frame[0] & ACTION_BIT, 0);
        assert_eq!(frame[0] & VS_MARKER_BIT, VS_MARKER_BIT);
    }
}
