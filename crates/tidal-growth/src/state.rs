use bitflags::bitflags;
use tidal_blocks::{BlockState, Direction};

bitflags! {
    /// Raw state bits; the low five are attachment faces.
    #[derive(Default)]
    pub struct StateBits: u8 {
        const UP = 1 << 0;
        const NORTH = 1 << 1;
        const EAST = 1 << 2;
        const SOUTH = 1 << 3;
        const WEST = 1 << 4;
        const WATERLOGGED = 1 << 5;
    }
}

const ATTACHMENTS: StateBits = StateBits {
    bits: StateBits::UP.bits
        | StateBits::NORTH.bits
        | StateBits::EAST.bits
        | StateBits::SOUTH.bits
        | StateBits::WEST.bits,
};

const HORIZONTALS: StateBits = StateBits {
    bits: StateBits::NORTH.bits | StateBits::EAST.bits | StateBits::SOUTH.bits | StateBits::WEST.bits,
};

// Indexed by `Direction as usize`; DOWN never carries an attachment.
const FLAG_FOR: [Option<StateBits>; 6] = [
    None,
    Some(StateBits::UP),
    Some(StateBits::NORTH),
    Some(StateBits::SOUTH),
    Some(StateBits::WEST),
    Some(StateBits::EAST),
];

/// Faces a plant block is attached to, plus its waterlogged flag.
///
/// Values are immutable; every `with_*` returns a new state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectivityState(StateBits);

/// Quarter-turn rotation around the Y axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rotation {
    None,
    Clockwise90,
    Clockwise180,
    CounterClockwise90,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirror {
    None,
    // Swaps north and south
    LeftRight,
    // Swaps east and west
    FrontBack,
}

impl Default for ConnectivityState {
    /// Freshly placed: no attachments, waterlogged.
    fn default() -> Self {
        Self(StateBits::WATERLOGGED)
    }
}

impl ConnectivityState {
    pub const EMPTY: ConnectivityState = ConnectivityState(StateBits { bits: 0 });

    /// Number of distinct states (index space of the shape table).
    pub const COUNT: usize = 64;

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self(StateBits::from_bits_truncate(bits))
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0.bits()
    }

    #[inline]
    pub fn from_block_state(state: BlockState) -> Self {
        Self::from_bits((state & 0x3f) as u8)
    }

    #[inline]
    pub fn to_block_state(self) -> BlockState {
        self.bits() as BlockState
    }

    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        FLAG_FOR[dir.index()].is_some_and(|f| self.0.contains(f))
    }

    /// Sets or clears the flag for `dir`; DOWN is ignored.
    #[inline]
    pub fn with(self, dir: Direction, on: bool) -> Self {
        match FLAG_FOR[dir.index()] {
            Some(f) => {
                let mut bits = self.0;
                bits.set(f, on);
                Self(bits)
            }
            None => self,
        }
    }

    #[inline]
    pub fn is_waterlogged(self) -> bool {
        self.0.contains(StateBits::WATERLOGGED)
    }

    #[inline]
    pub fn with_waterlogged(self, on: bool) -> Self {
        let mut bits = self.0;
        bits.set(StateBits::WATERLOGGED, on);
        Self(bits)
    }

    #[inline]
    pub fn attachment_count(self) -> u32 {
        (self.0 & ATTACHMENTS).bits().count_ones()
    }

    #[inline]
    pub fn has_any_attachment(self) -> bool {
        self.0.intersects(ATTACHMENTS)
    }

    #[inline]
    pub fn has_horizontal(self) -> bool {
        self.0.intersects(HORIZONTALS)
    }

    #[inline]
    pub fn is_fully_attached(self) -> bool {
        self.0.contains(ATTACHMENTS)
    }

    /// Same state with UP cleared.
    #[inline]
    pub fn horizontal_only(self) -> Self {
        Self(self.0 - StateBits::UP)
    }

    /// Attached directions in UP, NORTH, SOUTH, WEST, EAST order.
    pub fn attached(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }

    pub fn rotated(self, rot: Rotation) -> Self {
        let turn = |d: Direction| match rot {
            Rotation::None => d,
            Rotation::Clockwise90 => d.rotate_y_cw(),
            Rotation::Clockwise180 => d.opposite(),
            Rotation::CounterClockwise90 => d.rotate_y_ccw(),
        };
        Direction::HORIZONTAL
            .into_iter()
            .fold(self, |acc, d| acc.with(turn(d), self.has(d)))
    }

    pub fn mirrored(self, mirror: Mirror) -> Self {
        let (a, b) = match mirror {
            Mirror::None => return self,
            Mirror::LeftRight => (Direction::North, Direction::South),
            Mirror::FrontBack => (Direction::East, Direction::West),
        };
        self.with(a, self.has(b)).with(b, self.has(a))
    }
}
