use tracing::{debug, trace};
use vs_proto::Tuple;

use crate::config::TableConfig;
use crate::error::Result;

/// A fixed-capacity dual-segment tuple store.
///
/// Slots `[0, active_head)` are the *active* segment: tuples the local agent
/// has explicitly read or written. Slots `(passive_head, vs_size)` are the
/// *passive* segment: tuples learned only by gossip. The middle range is
/// free. Both heads share one backing array so demotion/promotion never
/// allocates.
#[derive(Debug, Clone)]
pub struct Table {
    slots: Vec<Tuple>,
    active_head: usize,
    passive_head: usize,
    clock: u64,
    pos_x: u8,
    pos_y: u8,
    config: TableConfig,
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;
        let vs_size = config.vs_size as usize;
        Ok(Self {
            slots: vec![Tuple::empty(); vs_size],
            active_head: 0,
            passive_head: vs_size - 1,
            clock: 0,
            pos_x: 0,
            pos_y: 0,
            config,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn location(&self) -> (u8, u8) {
        (self.pos_x, self.pos_y)
    }

    pub fn set_location(&mut self, x: u8, y: u8) {
        self.pos_x = x;
        self.pos_y = y;
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Active count plus passive count, derived from the heads rather than
    /// tracked as a separate counter.
    pub fn size(&self) -> usize {
        self.active_head + (self.slots.len() - 1 - self.passive_head)
    }

    pub fn has(&self, key: u8) -> bool {
        self.find_index(key).is_some()
    }

    fn vs_size(&self) -> usize {
        self.slots.len()
    }

    fn is_active_index(&self, idx: usize) -> bool {
        idx < self.active_head
    }

    fn is_passive_index(&self, idx: usize) -> bool {
        idx > self.passive_head
    }

    fn find_index(&self, key: u8) -> Option<usize> {
        (0..self.active_head)
            .chain((self.passive_head + 1)..self.vs_size())
            .find(|&i| self.slots[i].timestamp > 0 && self.slots[i].key == key)
    }

    /// Euclidean distance from the agent's current location to `tuple`.
    pub fn distance_to(&self, tuple: &Tuple) -> f64 {
        let dx = self.pos_x as f64 - tuple.pos_x as f64;
        let dy = self.pos_y as f64 - tuple.pos_y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance to the tuple stored under `key`, or `None` if this table
    /// holds no such tuple. Read-only: does not refresh `last_accessed`.
    pub fn distance_to_key(&self, key: u8) -> Option<f64> {
        self.find_index(key).map(|idx| self.distance_to(&self.slots[idx]))
    }

    fn oldest_active_index(&self) -> Option<usize> {
        (0..self.active_head)
            .filter(|&i| self.slots[i].timestamp > 0)
            .min_by_key(|&i| self.slots[i].last_accessed)
    }

    fn furthest_passive_index(&self) -> Option<usize> {
        ((self.passive_head + 1)..self.vs_size())
            .filter(|&i| self.slots[i].timestamp > 0)
            .max_by(|&a, &b| {
                self.distance_to(&self.slots[a])
                    .partial_cmp(&self.distance_to(&self.slots[b]))
                    .unwrap()
            })
    }

    /// Removes slots `[idx..active_head)` or `(passive_head..idx]` by
    /// shuffling the segment inward by one and moving the corresponding
    /// head, clearing the vacated boundary slot.
    fn remove(&mut self, key: u8) {
        let Some(idx) = self.find_index(key) else {
            return;
        };

        if self.is_active_index(idx) {
            for i in idx..self.active_head.saturating_sub(1) {
                self.slots[i] = self.slots[i + 1];
            }
            self.active_head -= 1;
            self.slots[self.active_head] = Tuple::empty();
        } else {
            let mut i = idx;
            while i > self.passive_head + 1 {
                self.slots[i] = self.slots[i - 1];
                i -= 1;
            }
            self.passive_head += 1;
            self.slots[self.passive_head] = Tuple::empty();
        }
    }

    /// Inserts or overwrites `tuple` under `key`.
    ///
    /// `by_agent` distinguishes a local agent write/promotion from a
    /// gossip-learned insert. The access clock advances exactly once per
    /// top-level call; the recursive re-insert used to promote a passive hit
    /// to active does not double-advance it (the demotion path below is a
    /// distinct table-touching operation on a different key and does get its
    /// own tick).
    pub fn insert(&mut self, key: u8, mut tuple: Tuple, by_agent: bool) {
        tuple.last_accessed = self.clock;

        match self.find_index(key) {
            None => {
                if by_agent {
                    self.insert_active(tuple);
                } else {
                    self.insert_passive(tuple);
                }
                self.clock += 1;
            }
            Some(idx) => {
                if by_agent && self.is_passive_index(idx) {
                    trace!(key, "promoting passive tuple to active on agent write");
                    self.remove(key);
                    self.insert(key, tuple, by_agent);
                } else {
                    self.slots[idx] = tuple;
                    self.clock += 1;
                }
            }
        }
    }

    fn insert_active(&mut self, tuple: Tuple) {
        let min_passive = self.config.vs_size_min_passive as usize;
        if self.active_head <= self.passive_head.saturating_sub(min_passive) {
            self.slots[self.active_head] = tuple;
            self.active_head += 1;
            return;
        }

        let Some(oldest_idx) = self.oldest_active_index() else {
            debug!(key = tuple.key, "active segment full with no evictable tuple; dropping write");
            return;
        };
        let evicted = self.slots[oldest_idx];
        self.remove(evicted.key);

        self.slots[self.active_head] = tuple;
        self.active_head += 1;

        debug!(evicted_key = evicted.key, new_key = tuple.key, "demoting oldest active tuple to passive");
        self.insert(evicted.key, evicted, false);
    }

    fn insert_passive(&mut self, tuple: Tuple) {
        let min_active = self.config.vs_size_min_active as usize;
        if self.passive_head >= self.active_head.max(min_active) {
            self.slots[self.passive_head] = tuple;
            self.passive_head -= 1;
            return;
        }

        let Some(furthest_idx) = self.furthest_passive_index() else {
            debug!(key = tuple.key, "passive segment full with no evictable tuple; dropping gossip insert");
            return;
        };
        let furthest = self.slots[furthest_idx];
        if self.distance_to(&tuple) < self.distance_to(&furthest) {
            self.remove(furthest.key);
            self.slots[self.passive_head] = tuple;
            self.passive_head -= 1;
            debug!(evicted_key = furthest.key, new_key = tuple.key, "replacing furthest passive tuple");
        } else {
            trace!(key = tuple.key, "incoming passive tuple no closer than furthest; dropping");
        }
    }

    /// Reads the tuple stored under `key`, refreshing `last_accessed`.
    ///
    /// Returns an empty tuple (without inserting one) if `key` is absent.
    /// `by_agent` triggers the same passive-to-active promotion as
    /// [`Table::insert`].
    pub fn retrieve(&mut self, key: u8, by_agent: bool) -> Tuple {
        let Some(idx) = self.find_index(key) else {
            return Tuple::empty();
        };

        self.slots[idx].last_accessed = self.clock;
        let tuple = self.slots[idx];

        if by_agent && self.is_passive_index(idx) {
            self.remove(key);
            self.insert(key, tuple, by_agent);
        } else {
            self.clock += 1;
        }

        tuple
    }

    /// Every valid tuple whose squared distance from `(pos_x, pos_y)` is at
    /// most `radius^2`. Does not reorder, promote, or touch `last_accessed`.
    pub fn scan_within(&self, pos_x: u8, pos_y: u8, radius: u8) -> Vec<Tuple> {
        let radius_sq = (radius as i32) * (radius as i32);
        self.slots
            .iter()
            .filter(|t| {
                if t.timestamp == 0 {
                    return false;
                }
                let dx = t.pos_x as i32 - pos_x as i32;
                let dy = t.pos_y as i32 - pos_y as i32;
                dx * dx + dy * dy <= radius_sq
            })
            .copied()
            .collect()
    }

    /// Removes every tuple whose age exceeds `max_tuple_age` or whose
    /// distance from the agent exceeds `max_tuple_distance`.
    pub fn prune(&mut self) {
        let stale: Vec<u8> = (0..self.active_head)
            .chain((self.passive_head + 1)..self.vs_size())
            .filter(|&i| self.slots[i].timestamp > 0 && self.is_stale(&self.slots[i]))
            .map(|i| self.slots[i].key)
            .collect();

        for key in stale {
            debug!(key, "pruning stale tuple");
            self.remove(key);
        }
    }

    fn is_stale(&self, tuple: &Tuple) -> bool {
        let age = self.clock.saturating_sub(tuple.last_accessed);
        age > self.config.max_tuple_age as u64 || self.distance_to(tuple) > self.config.max_tuple_distance as f64
    }
}
