//! Action opcodes.
//!
//! Each player submits one action per grid cell per tick. An action only
//! means something when a unit or structure owned by that player sits on
//! the cell; everywhere else it is ignored.

/// Cardinal direction for unit movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One row up (row - 1).
    North,
    /// One column right (col + 1).
    East,
    /// One row down (row + 1).
    South,
    /// One column left (col - 1).
    West,
}

impl Direction {
    /// All four directions in opcode order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the `(row_offset, col_offset)` for this direction.
    pub fn offset_2d(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

/// One opcode for one cell.
///
/// Wire opcodes: `0 Idle`, `1 SpawnUnit`, `2 ConvertToDropoff`,
/// `3 MoveN`, `4 MoveE`, `5 MoveS`, `6 MoveW`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Do nothing.
    #[default]
    Idle,
    /// Spawn a unit on a structure.
    SpawnUnit,
    /// Convert the unit on this cell into a dropoff.
    ConvertToDropoff,
    /// Move the unit on this cell one step.
    Move(Direction),
}

impl Action {
    /// Decode a wire opcode. Out-of-range values decode to [`Action::Idle`].
    pub fn from_opcode(opcode: i64) -> Self {
        match opcode {
            1 => Action::SpawnUnit,
            2 => Action::ConvertToDropoff,
            3 => Action::Move(Direction::North),
            4 => Action::Move(Direction::East),
            5 => Action::Move(Direction::South),
            6 => Action::Move(Direction::West),
            _ => Action::Idle,
        }
    }

    /// Encode as a wire opcode.
    pub fn opcode(self) -> u8 {
        match self {
            Action::Idle => 0,
            Action::SpawnUnit => 1,
            Action::ConvertToDropoff => 2,
            Action::Move(Direction::North) => 3,
            Action::Move(Direction::East) => 4,
            Action::Move(Direction::South) => 5,
            Action::Move(Direction::West) => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn opcodes_match_wire_table() {
        assert_eq!(Action::from_opcode(0), Action::Idle);
        assert_eq!(Action::from_opcode(1), Action::SpawnUnit);
        assert_eq!(Action::from_opcode(2), Action::ConvertToDropoff);
        assert_eq!(Action::from_opcode(3), Action::Move(Direction::North));
        assert_eq!(Action::from_opcode(6), Action::Move(Direction::West));
    }

    #[test]
    fn offsets_are_unit_steps() {
        for d in Direction::ALL {
            let (dr, dc) = d.offset_2d();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }

    proptest! {
        #[test]
        fn unknown_opcodes_are_idle(op in prop_oneof![i64::MIN..0i64, 7i64..i64::MAX]) {
            prop_assert_eq!(Action::from_opcode(op), Action::Idle);
        }

        #[test]
        fn known_opcodes_survive_encoding(op in 0i64..7) {
            prop_assert_eq!(i64::from(Action::from_opcode(op).opcode()), op);
        }
    }
}
