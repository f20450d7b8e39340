/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Walks the 3x3 block centered on a cell, clipped to the board bounds.
///
/// The center itself is included and the order is row-major: every `x` of the
/// top row first, then the middle row, then the bottom row. A corner cell
/// yields 4 positions, an edge cell 6, and an inner cell 9.
#[derive(Clone, Debug)]
pub struct NearIter {
    x_first: Coord,
    x_last: Coord,
    y_last: Coord,
    cursor: Option<Coord2>,
}

impl NearIter {
    pub(crate) fn new((x, y): Coord2, (size_x, size_y): Coord2) -> Self {
        if x >= size_x || y >= size_y {
            return Self {
                x_first: 0,
                x_last: 0,
                y_last: 0,
                cursor: None,
            };
        }

        let x_first = x.saturating_sub(1);
        let y_first = y.saturating_sub(1);
        Self {
            x_first,
            x_last: x.saturating_add(1).min(size_x - 1),
            y_last: y.saturating_add(1).min(size_y - 1),
            cursor: Some((x_first, y_first)),
        }
    }
}

impl Iterator for NearIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (x, y) = self.cursor?;
        self.cursor = if x < self.x_last {
            Some((x + 1, y))
        } else if y < self.y_last {
            Some((self.x_first, y + 1))
        } else {
            None
        };
        Some((x, y))
    }
}
