//! The enumerated set of supported board sizes.

use crate::error::SpaceError;

/// Supported square map sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MapSize {
    /// 32 × 32.
    Tiny,
    /// 40 × 40.
    Small,
    /// 48 × 48.
    #[default]
    Medium,
    /// 56 × 56.
    Large,
    /// 64 × 64.
    Giant,
}

impl MapSize {
    /// All sizes, smallest first.
    pub const ALL: [MapSize; 5] = [
        MapSize::Tiny,
        MapSize::Small,
        MapSize::Medium,
        MapSize::Large,
        MapSize::Giant,
    ];

    /// Side length in cells.
    pub fn side(self) -> u32 {
        match self {
            MapSize::Tiny => 32,
            MapSize::Small => 40,
            MapSize::Medium => 48,
            MapSize::Large => 56,
            MapSize::Giant => 64,
        }
    }
}

impl TryFrom<u32> for MapSize {
    type Error = SpaceError;

    fn try_from(side: u32) -> Result<Self, Self::Error> {
        MapSize::ALL
            .into_iter()
            .find(|s| s.side() == side)
            .ok_or(SpaceError::UnsupportedSize { side })
    }
}
