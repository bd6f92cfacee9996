//! FNV-1a hashing of world state for reproducibility checks.
//!
//! Not cryptographic. Two worlds with the same hash are assumed identical
//! when comparing seeded runs.

use shoal_core::Structure;

use crate::world::WorldState;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash every cell field, including the inspiration flag, then every bank
/// in player order. The grid shape is folded in first.
pub fn state_hash(world: &WorldState) -> u64 {
    let grid = world.grid();
    let mut hash = FNV_OFFSET;
    hash = fnv1a_bytes(hash, &(grid.rows() as u64).to_le_bytes());
    hash = fnv1a_bytes(hash, &(grid.cols() as u64).to_le_bytes());

    for cell in world.cells() {
        hash = fnv1a_bytes(hash, &cell.floor.to_le_bytes());
        hash = fnv1a_bytes(hash, &cell.carried.to_le_bytes());
        hash = fnv1a_bytes(
            hash,
            &[
                match cell.structure {
                    Structure::None => 0,
                    Structure::Factory => 1,
                    Structure::Dropoff => 2,
                },
                u8::from(cell.has_unit),
                cell.owner.map_or(0, |p| p.0),
                u8::from(cell.inspired),
            ],
        );
    }
    for (player, bank) in world.banks() {
        hash = fnv1a_bytes(hash, &[player.0]);
        hash = fnv1a_bytes(hash, &bank.to_le_bytes());
    }
    hash
}
