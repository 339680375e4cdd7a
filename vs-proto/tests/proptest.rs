use proptest::prelude::*;
use vs_proto::{Action, Broadcast, Codec, Tuple};

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Get), Just(Action::Put)]
}

fn arb_tuple() -> impl Strategy<Value = Tuple> {
    (0u8..=63, any::<u16>(), any::<u8>(), any::<u8>(), any::<u8>(), any::<u16>()).prop_map(
        |(key, value, pos_x, pos_y, id, timestamp)| Tuple {
            key,
            value,
            pos_x,
            pos_y,
            id,
            timestamp,
            last_accessed: 0,
        },
    )
}

proptest! {
    #[test]
    fn decode_of_encode_recovers_the_broadcast(action in arb_action(), tuple in arb_tuple()) {
        let broadcast = Broadcast::new(action, tuple).unwrap();
        let frame = Codec::encode(&broadcast).unwrap();
        let decoded = Codec::decode(&frame).unwrap();
        prop_assert_eq!(decoded, broadcast);
    }

    #[test]
    fn non_vs_frames_never_decode(bytes in prop::collection::vec(any::<u8>(), 9)) {
        let mut frame: [u8; 9] = bytes.try_into().unwrap();
        frame[0] &= 0b0111_1111;
        prop_assert!(Codec::decode(&frame).is_none());
    }

    #[test]
    fn keys_above_63_are_rejected_at_construction(key in 64u8..=255, value in any::<u16>()) {
        let tuple = Tuple { key, value, ..Tuple::empty() };
        prop_assert!(Broadcast::new(Action::Put, tuple).is_err());
    }
}
