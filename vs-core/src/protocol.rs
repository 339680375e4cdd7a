//! The inbound gossip state machine: compares an incoming broadcast's
//! timestamp against the locally-held tuple and decides whether to accept,
//! rebroadcast, resolve a conflict, or ignore it.
//!
//! This lives as free functions over a [`Table`] and a [`ConflictResolver`]
//! rather than as a type of its own, since it has no state beyond the two it
//! already borrows; [`crate::Agent::handle_broadcast`] is the call site.

use tracing::{debug, warn};
use vs_proto::{Action, Tuple};

use crate::conflict::ConflictResolver;
use crate::table::Table;

/// What the caller must do after [`handle_inbound`] ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing further to send.
    None,
    /// Rebroadcast a PUT carrying `tuple`.
    RebroadcastPut(Tuple),
}

/// Runs the protocol state machine for one inbound `(action, remote)` pair
/// on `key`, mutating `table` and `resolver` as needed.
///
/// `local_id` identifies the agent this table belongs to, so a lost conflict
/// can be reported via [`ConflictResolver::on_lost`].
pub fn handle_inbound<R: ConflictResolver>(
    table: &mut Table,
    resolver: &mut R,
    local_id: u8,
    key: u8,
    action: Action,
    remote: Tuple,
) -> Outcome {
    let local = table.retrieve(key, false);
    let lt = local.timestamp;
    let rt = remote.timestamp;

    match action {
        Action::Put => {
            if rt > lt {
                debug!(key, lt, rt, "inbound PUT newer than local; accepting");
                table.insert(key, remote, false);
                Outcome::RebroadcastPut(remote)
            } else if rt == lt && local.id != remote.id {
                resolve_conflict(table, resolver, local_id, key, local, remote);
                Outcome::None
            } else {
                warn!(key, lt, rt, "inbound PUT stale or redundant; ignoring");
                Outcome::None
            }
        }
        Action::Get => {
            if rt == lt && rt != 0 && local.id != remote.id {
                resolve_conflict(table, resolver, local_id, key, local, remote);
                Outcome::None
            } else if rt < lt {
                debug!(key, lt, rt, "inbound GET stale; refreshing remote");
                Outcome::RebroadcastPut(local)
            } else if rt > lt {
                debug!(key, lt, rt, "inbound GET newer than local; accepting");
                table.insert(key, remote, false);
                Outcome::RebroadcastPut(remote)
            } else {
                Outcome::None
            }
        }
    }
}

fn resolve_conflict<R: ConflictResolver>(
    table: &mut Table,
    resolver: &mut R,
    local_id: u8,
    key: u8,
    local: Tuple,
    remote: Tuple,
) {
    let winner = resolver.resolve(key, local, remote);
    debug!(key, winner_id = winner.id, "resolved conflict");
    table.insert(key, winner, false);

    if local.id == local_id && winner.id != local.id {
        resolver.on_lost(key, winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::conflict::LargestIdWins;

    fn table() -> Table {
        Table::new(TableConfig::with_size(8)).unwrap()
    }

    fn tuple(id: u8, timestamp: u16, value: u16) -> Tuple {
        Tuple {
            key: 5,
            id,
            timestamp,
            value,
            pos_x: 0,
            pos_y: 0,
            last_accessed: 0,
        }
    }

    #[test]
    fn newer_put_is_accepted_and_rebroadcast() {
        let mut table = table();
        let mut resolver = LargestIdWins;
        let remote = tuple(2, 1, 42);
        let outcome = handle_inbound(&mut table, &mut resolver, 1, 5, Action::Put, remote);
        match outcome {
            Outcome::RebroadcastPut(t) => assert_eq!((t.id, t.timestamp, t.value), (2, 1, 42)),
            Outcome::None => panic!("expected a rebroadcast"),
        }
        assert_eq!(table.retrieve(5, false).value, 42);
    }

    #[test]
    fn equal_timestamp_different_id_is_a_conflict() {
        let mut table = table();
        table.insert(5, tuple(1, 1, 100), true);
        let mut resolver = LargestIdWins;
        let remote = tuple(2, 1, 200);
        let outcome = handle_inbound(&mut table, &mut resolver, 1, 5, Action::Put, remote);
        assert_eq!(outcome, Outcome::None);
        assert_eq!(table.retrieve(5, false).value, 200);
    }

    #[test]
    fn stale_get_triggers_local_rebroadcast() {
        let mut table = table();
        table.insert(5, tuple(1, 3, 42), true);
        let mut resolver = LargestIdWins;
        let remote = tuple(2, 1, 9);
        let outcome = handle_inbound(&mut table, &mut resolver, 1, 5, Action::Get, remote);
        match outcome {
            Outcome::RebroadcastPut(t) => assert_eq!((t.id, t.timestamp, t.value), (1, 3, 42)),
            Outcome::None => panic!("expected a rebroadcast"),
        }
    }

    #[test]
    fn newer_get_pulls_in_remote() {
        let mut table = table();
        table.insert(5, tuple(1, 1, 9), true);
        let mut resolver = LargestIdWins;
        let remote = tuple(2, 3, 42);
        let outcome = handle_inbound(&mut table, &mut resolver, 1, 5, Action::Get, remote);
        match outcome {
            Outcome::RebroadcastPut(t) => assert_eq!((t.id, t.timestamp, t.value), (2, 3, 42)),
            Outcome::None => panic!("expected a rebroadcast"),
        }
        assert_eq!(table.retrieve(5, false).value, 42);
    }

    #[test]
    fn identical_put_applied_twice_is_idempotent() {
        let mut table = table();
        let mut resolver = LargestIdWins;
        let remote = tuple(2, 1, 42);
        handle_inbound(&mut table, &mut resolver, 1, 5, Action::Put, remote);
        let before = table.retrieve(5, false);
        let outcome = handle_inbound(&mut table, &mut resolver, 1, 5, Action::Put, remote);
        assert_eq!(outcome, Outcome::None);
        let after = table.retrieve(5, false);
        assert_eq!((after.id, after.timestamp, after.value), (before.id, before.timestamp, before.value));
    }
}
