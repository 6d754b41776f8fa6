//! Resize handles ("ordinates") and the quadrant a gesture points into.
//!
//! ```text
//!     nw ──── n ──── ne
//!     │               │
//!     w               e
//!     │               │
//!     sw ──── s ──── se
//! ```
//!
//! Corner ordinates move both axes; edge ordinates move one. An ordinate
//! also names which edges stay fixed while resizing: dragging `nw` keeps
//! the bottom-right corner in place.

use core::fmt;
use core::str::FromStr;

use crate::error::CropError;

/// One of the eight resize handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ordinate {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Ordinate {
    /// All handles, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// The four corner handles, clockwise from north-east.
    pub const CORNERS: [Self; 4] = [Self::Ne, Self::Se, Self::Sw, Self::Nw];

    /// Short lowercase name (`"nw"`, `"e"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    /// Corner handles resize both axes.
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    /// Whether this handle changes the horizontal extent.
    pub const fn affects_x(self) -> bool {
        !matches!(self, Self::N | Self::S)
    }

    /// Whether this handle changes the vertical extent.
    pub const fn affects_y(self) -> bool {
        !matches!(self, Self::E | Self::W)
    }

    /// Handle sits on the left edge; the right edge is the fixed side.
    pub const fn is_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Handle sits on the top edge; the bottom edge is the fixed side.
    pub const fn is_north(self) -> bool {
        matches!(self, Self::N | Self::Nw | Self::Ne)
    }

    /// The corner whose fixed point a gesture on this handle shares.
    ///
    /// Corners map to themselves. An edge handle is anchored like the
    /// corner clockwise-adjacent to it: `n` like `nw`, `e` like `ne`,
    /// `s` like `se`, `w` like `sw`.
    pub const fn anchor_corner(self) -> Self {
        match self {
            Self::N => Self::Nw,
            Self::E => Self::Ne,
            Self::S => Self::Se,
            Self::W => Self::Sw,
            corner => corner,
        }
    }

    /// Corner for a pointer in the given half of each axis.
    pub const fn from_halves(left: bool, top: bool) -> Self {
        match (left, top) {
            (true, true) => Self::Nw,
            (true, false) => Self::Sw,
            (false, true) => Self::Ne,
            (false, false) => Self::Se,
        }
    }
}

impl fmt::Display for Ordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ordinate {
    type Err = CropError;

    /// Parse a handle name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s))
            .ok_or(CropError::InvalidOrdinate)
    }
}
