use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest legal `VS_SIZE`.
pub const VS_MIN_SIZE: u8 = 8;
/// Largest legal `VS_SIZE`.
pub const VS_MAX_SIZE: u8 = 64;

/// The five table-sizing and pruning knobs a host may tune at construction
/// time.
///
/// This is the systems-language stand-in for the C++/C preprocessor-level
/// `VS_SIZE`/`VS_SIZE_MIN_ACTIVE`/... defines: one explicit value passed to
/// [`crate::Table::new`], not a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Total table slots. Must be in `8..=64`.
    pub vs_size: u8,
    /// Floor on the active segment's size.
    pub vs_size_min_active: u8,
    /// Floor on the passive segment's size.
    pub vs_size_min_passive: u8,
    /// Pruning threshold, in access-clock ticks.
    pub max_tuple_age: u32,
    /// Pruning threshold, in distance units.
    pub max_tuple_distance: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            vs_size: VS_MAX_SIZE,
            vs_size_min_active: VS_MAX_SIZE / 8,
            vs_size_min_passive: VS_MAX_SIZE / 8,
            max_tuple_age: 100,
            max_tuple_distance: 100,
        }
    }
}

impl TableConfig {
    /// A config with `vs_size` and both reservation floors scaled as
    /// `vs_size / 8`, the same ratio the defaults use, pruning thresholds
    /// left at their defaults.
    pub fn with_size(vs_size: u8) -> Self {
        Self {
            vs_size,
            vs_size_min_active: vs_size / VS_MIN_SIZE,
            vs_size_min_passive: vs_size / VS_MIN_SIZE,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(VS_MIN_SIZE..=VS_MAX_SIZE).contains(&self.vs_size) {
            return Err(Error::SizeOutOfRange(self.vs_size));
        }
        let reserved = self.vs_size_min_active as u16 + self.vs_size_min_passive as u16;
        if reserved > self.vs_size as u16 {
            return Err(Error::ReservationsExceedSize {
                vs_size: self.vs_size,
                min_active: self.vs_size_min_active,
                min_passive: self.vs_size_min_passive,
            });
        }
        Ok(())
    }
}
