//! Cost values shared by every level grid and by the base lattice.

pub const COST_FREE: u8 = 0;
/// Default cost above which the full swept-footprint check is needed.
pub const COST_POSSIBLY_CIRCUMSCRIBED: u8 = 128;
pub const COST_INSCRIBED: u8 = 253;
pub const COST_LETHAL: u8 = 254;

/// Edge cost meaning "no valid transition".
///
/// Kept well below `u32::MAX / 2` so the search can add two of them without
/// overflowing.
pub const INFINITE_COST: u32 = 1_000_000_000;

/// Largest nominal primitive cost. Edge costs are `nominal * (max_cost + 1)`
/// with `max_cost < 255`, so every finite edge stays below [`INFINITE_COST`].
pub const MAX_NOMINAL_COST: u32 = INFINITE_COST / 256;

pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
pub const DEFAULT_FREE_THRESH: f32 = 0.196;
