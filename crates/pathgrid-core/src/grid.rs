//! The rectangular occupancy grid searches run against.
//!
//! A [`Grid`] is a `width × height` map of [`Terrain`] cells stored in a
//! flat row-major buffer. Construction validates dimensions eagerly, so
//! every `Grid` value in existence is rectangular and non-empty; after
//! construction the grid is read-only as far as searches are concerned.

use crate::geom::Point;
use std::fmt;

/// What occupies a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// The cell can be entered.
    #[default]
    Open,
    /// The cell is a wall.
    Blocked,
}

/// An immutable rectangular occupancy map.
///
/// Cells are addressed by [`Point`] with `x` as the column and `y` as the
/// row; `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Create an all-open grid of the given dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![Terrain::Open; (width * height) as usize],
        })
    }

    /// Build a grid from a rectangular matrix of rows.
    ///
    /// Every row must have the same non-zero width.
    pub fn from_rows(rows: &[Vec<Terrain>]) -> Result<Self, GridError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let width = rows[0].len();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(GridError::RaggedRows { row });
            }
            cells.extend_from_slice(r);
        }
        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    /// Parse a grid from an ASCII map.
    ///
    /// `'.'` is open, `'#'` is blocked. Lines are separated by `'\n'` and
    /// must all have the same width; leading/trailing whitespace is trimmed
    /// from the whole string but not from individual lines.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let mut cells = Vec::new();
        let mut width: i32 = -1;
        let mut height: i32 = 0;
        for (row, line) in s.lines().enumerate() {
            let mut w: i32 = 0;
            for ch in line.chars() {
                match ch {
                    '.' => cells.push(Terrain::Open),
                    '#' => cells.push(Terrain::Blocked),
                    _ => {
                        return Err(GridError::InvalidGlyph {
                            ch,
                            pos: Point::new(w, row as i32),
                        });
                    }
                }
                w += 1;
            }
            if width < 0 {
                width = w;
            } else if w != width {
                return Err(GridError::RaggedRows { row });
            }
            height += 1;
        }
        if width <= 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: grids are non-empty by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// The terrain at `p`, or `None` if out of bounds.
    #[inline]
    pub fn terrain(&self, p: Point) -> Option<Terrain> {
        if self.in_bounds(p) {
            Some(self.cells[self.index(p)])
        } else {
            None
        }
    }

    /// Whether `p` cannot be entered. Out-of-bounds positions count as
    /// blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        !matches!(self.terrain(p), Some(Terrain::Open))
    }

    /// Set the terrain at `p`. Out-of-bounds positions are ignored.
    ///
    /// Mutation is only possible while the caller still holds the grid
    /// exclusively; once a search borrows the grid it is frozen.
    pub fn set(&mut self, p: Point, t: Terrain) {
        if self.in_bounds(p) {
            let i = self.index(p);
            self.cells[i] = t;
        }
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let ch = match self.cells[(y * self.width + x) as usize] {
                    Terrain::Open => '.',
                    Terrain::Blocked => '#',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when constructing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Zero cells in at least one dimension.
    EmptyGrid,
    /// A row with a different width than the first row.
    RaggedRows { row: usize },
    /// A map character that is neither `'.'` nor `'#'`.
    InvalidGlyph { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has zero width or height"),
            Self::RaggedRows { row } => {
                write!(f, "grid row {row} has inconsistent width")
            }
            Self::InvalidGlyph { ch, pos } => {
                write!(
                    f,
                    "grid contains invalid glyph \u{201c}{ch}\u{201d} at ({}, {})",
                    pos.x, pos.y
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Grid::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
....
.##.
....";

    #[test]
    fn new_all_open() {
        let g = Grid::new(3, 2).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert_eq!(g.len(), 6);
        assert!(!g.is_blocked(Point::new(2, 1)));
    }

    #[test]
    fn new_rejects_degenerate_dimensions() {
        assert_eq!(Grid::new(0, 5).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(Grid::new(5, 0).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(Grid::new(-1, 3).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn parse_map() {
        let g = Grid::parse(MAP).unwrap();
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert!(g.is_blocked(Point::new(1, 1)));
        assert!(g.is_blocked(Point::new(2, 1)));
        assert!(!g.is_blocked(Point::new(0, 1)));
        assert_eq!(g.terrain(Point::new(3, 2)), Some(Terrain::Open));
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = Grid::parse("...\n..\n...").unwrap_err();
        assert_eq!(err, GridError::RaggedRows { row: 1 });
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let err = Grid::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidGlyph {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Grid::parse("").unwrap_err(), GridError::EmptyGrid);
        assert_eq!(Grid::parse("  \n ").unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn from_rows_rectangular() {
        use Terrain::*;
        let g = Grid::from_rows(&[vec![Open, Blocked], vec![Open, Open]]).unwrap();
        assert_eq!(g.width(), 2);
        assert_eq!(g.height(), 2);
        assert!(g.is_blocked(Point::new(1, 0)));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        use Terrain::*;
        let err = Grid::from_rows(&[vec![Open, Open], vec![Open]]).unwrap_err();
        assert_eq!(err, GridError::RaggedRows { row: 1 });
        assert_eq!(Grid::from_rows(&[]).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let g = Grid::parse(MAP).unwrap();
        assert!(!g.in_bounds(Point::new(-1, 0)));
        assert!(!g.in_bounds(Point::new(4, 0)));
        assert!(g.is_blocked(Point::new(-1, 0)));
        assert!(g.is_blocked(Point::new(0, 3)));
        assert_eq!(g.terrain(Point::new(4, 0)), None);
    }

    #[test]
    fn set_updates_terrain() {
        let mut g = Grid::new(2, 2).unwrap();
        g.set(Point::new(1, 1), Terrain::Blocked);
        assert!(g.is_blocked(Point::new(1, 1)));
        // Out of bounds set is a no-op.
        g.set(Point::new(9, 9), Terrain::Blocked);
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let g = Grid::parse(MAP).unwrap();
        let rendered = g.to_string();
        assert_eq!(rendered, MAP);
        assert_eq!(Grid::parse(&rendered).unwrap(), g);
    }
}
