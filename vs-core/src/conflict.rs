use vs_proto::Tuple;

/// A conflict-resolution capability, supplied to an [`crate::Agent`] at
/// construction, so overriding the rule never requires touching the table or
/// protocol code.
///
/// A conflict only ever arises between two tuples with equal `timestamp` and
/// differing `id`; the resolver decides which one is kept.
pub trait ConflictResolver {
    /// Resolves a conflict on `key` between the locally-held tuple and an
    /// incoming remote tuple, returning the winner.
    fn resolve(&mut self, key: u8, local: Tuple, remote: Tuple) -> Tuple;

    /// Called when the local agent's own tuple lost a conflict. No-op by
    /// default.
    fn on_lost(&mut self, _key: u8, _winner: Tuple) {}
}

/// The default resolver: the tuple with the larger `id` wins.
///
/// Total and symmetric — same-`id` tuples are never passed in as a conflict
/// in the first place, since equal id means the same writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestIdWins;

impl ConflictResolver for LargestIdWins {
    fn resolve(&mut self, _key: u8, local: Tuple, remote: Tuple) -> Tuple {
        if local.id > remote.id {
            local
        } else {
            remote
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(id: u8) -> Tuple {
        Tuple {
            id,
            timestamp: 1,
            ..Tuple::empty()
        }
    }

    #[test]
    fn larger_id_wins() {
        let mut resolver = LargestIdWins;
        let winner = resolver.resolve(5, tuple(1), tuple(2));
        assert_eq!(winner.id, 2);

        let winner = resolver.resolve(5, tuple(9), tuple(2));
        assert_eq!(winner.id, 9);
    }
}
