//! The per-cell record and structure tags.

use crate::id::PlayerId;

/// A permanent structure occupying a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Structure {
    /// Bare sea floor.
    #[default]
    None,
    /// A player's starting base. Spawns units and accepts deposits.
    Factory,
    /// A player-built deposit point, converted from a unit.
    Dropoff,
}

impl Structure {
    /// Whether any structure is present.
    pub fn is_some(self) -> bool {
        self != Structure::None
    }

    /// Numeric code used in observation tensors: Factory = 1, Dropoff = -1,
    /// None = 0.
    pub fn code(self) -> f32 {
        match self {
            Structure::None => 0.0,
            Structure::Factory => 1.0,
            Structure::Dropoff => -1.0,
        }
    }
}

/// One grid location.
///
/// Units and structures have no identity beyond their position: a unit is
/// "a cell with `has_unit` set", and moving or destroying it is cell
/// mutation. `owner` governs both the unit and the structure, so a unit
/// standing on a structure always belongs to the structure's owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Resource available to extract from the sea floor.
    pub floor: u32,
    /// Resource held by the unit on this cell. Zero when there is no unit.
    pub carried: u32,
    /// Structure on this cell, if any.
    pub structure: Structure,
    /// Whether a unit occupies the cell.
    pub has_unit: bool,
    /// Owner of the unit and/or structure. `None` iff neither is present.
    pub owner: Option<PlayerId>,
    /// Transient inspiration flag, recomputed by every extraction pass.
    pub inspired: bool,
}

impl Cell {
    /// A bare cell holding `floor` resource.
    pub fn with_floor(floor: u32) -> Self {
        Self {
            floor,
            ..Self::default()
        }
    }

    /// Owner of the unit on this cell, if there is one.
    pub fn unit_owner(&self) -> Option<PlayerId> {
        if self.has_unit {
            self.owner
        } else {
            None
        }
    }

    /// Owner of the structure on this cell, if there is one.
    pub fn structure_owner(&self) -> Option<PlayerId> {
        if self.structure.is_some() {
            self.owner
        } else {
            None
        }
    }

    /// Place a unit owned by `owner` carrying `carried`.
    pub fn place_unit(&mut self, owner: PlayerId, carried: u32) {
        self.has_unit = true;
        self.carried = carried;
        self.owner = Some(owner);
    }

    /// Remove the unit and return its cargo.
    ///
    /// Ownership is kept if a structure remains on the cell.
    pub fn take_unit(&mut self) -> u32 {
        let cargo = self.carried;
        self.has_unit = false;
        self.carried = 0;
        if !self.structure.is_some() {
            self.owner = None;
        }
        cargo
    }
}
