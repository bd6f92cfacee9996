//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a player.
///
/// Players are numbered `1..=num_players`. "No owner" is expressed as
/// `Option<PlayerId>::None`, never as a zero id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Zero-based slot for this player (`PlayerId(1)` is slot 0).
    ///
    /// # Panics
    ///
    /// Panics on `PlayerId(0)`, which is never a valid player.
    pub fn index(self) -> usize {
        assert!(self.0 > 0, "PlayerId(0) is not a player");
        usize::from(self.0 - 1)
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Self {
        let id = u8::try_from(index + 1).expect("player index fits in u8");
        Self(id)
    }

    /// Iterate `PlayerId(1)..=PlayerId(count)` in id order.
    pub fn all(count: u8) -> impl Iterator<Item = PlayerId> {
        (1..=count).map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for PlayerId {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Zero after construction or reset; incremented once per resolved turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_index_round_trips() {
        for i in 0..16 {
            assert_eq!(PlayerId::from_index(i).index(), i);
        }
        assert_eq!(PlayerId(1).index(), 0);
    }

    #[test]
    #[should_panic(expected = "not a player")]
    fn player_zero_has_no_index() {
        let _ = PlayerId(0).index();
    }

    #[test]
    fn all_players_in_order() {
        let ids: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)]);
    }

    #[test]
    fn tick_next() {
        assert_eq!(TickId(0).next(), TickId(1));
        assert_eq!(TickId::default(), TickId(0));
    }
}
