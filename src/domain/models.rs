use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::errors::{GridError, GridResult};

/// Logical position of a cell in a rectangular grid (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPath {
    pub row: usize,
    pub column: usize,
}

impl CellPath {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellPath {
    /// Formats as a 1-based `R{row}C{column}` label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row + 1, self.column + 1)
    }
}

/// Natural size of a piece of content, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Measurement provider for cell content.
///
/// The core never looks inside a cell; it only asks for the size the
/// content would like to occupy when laid out without constraints.
pub trait Measure {
    fn measure(&self) -> Size;
}

impl Measure for Size {
    fn measure(&self) -> Size {
        *self
    }
}

/// Maximum observed width per column and maximum observed height per row.
///
/// Values only ever merge upward. Two instances are equal when both
/// mappings are equal.
///
/// # Examples
///
/// ```
/// use gridsel::domain::{CellPath, CellSizes, Size};
///
/// let a = CellSizes::for_cell(CellPath::new(0, 1), Size::new(6, 1));
/// let b = CellSizes::for_cell(CellPath::new(1, 1), Size::new(10, 2));
/// let merged = CellSizes::reduce([a, b]);
///
/// assert_eq!(merged.width_for(1), Some(10));
/// assert_eq!(merged.height_for(0), Some(1));
/// assert_eq!(merged.height_for(1), Some(2));
/// assert_eq!(merged.width_for(0), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSizes {
    pub width: HashMap<usize, u16>,
    pub height: HashMap<usize, u16>,
}

impl CellSizes {
    /// The partial aggregate contributed by a single cell.
    pub fn for_cell(path: CellPath, size: Size) -> Self {
        Self {
            width: HashMap::from([(path.column, size.width)]),
            height: HashMap::from([(path.row, size.height)]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_empty() && self.height.is_empty()
    }

    pub fn width_for(&self, column: usize) -> Option<u16> {
        self.width.get(&column).copied()
    }

    pub fn height_for(&self, row: usize) -> Option<u16> {
        self.height.get(&row).copied()
    }

    /// Merges `other` into `self` key-wise, keeping the larger value.
    pub fn merge(&mut self, other: &CellSizes) {
        merge_max(&mut self.width, &other.width);
        merge_max(&mut self.height, &other.height);
    }

    /// Folds any number of partial aggregates into one.
    ///
    /// The result does not depend on the order of `parts`.
    pub fn reduce<I>(parts: I) -> CellSizes
    where
        I: IntoIterator<Item = CellSizes>,
    {
        parts.into_iter().fold(CellSizes::default(), |mut acc, part| {
            acc.merge(&part);
            acc
        })
    }
}

fn merge_max(into: &mut HashMap<usize, u16>, from: &HashMap<usize, u16>) {
    for (&key, &value) in from {
        into.entry(key)
            .and_modify(|current| *current = (*current).max(value))
            .or_insert(value);
    }
}

/// The single selected cell of a grid, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(CellPath),
}

impl Selection {
    pub fn path(self) -> Option<CellPath> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(path) => Some(path),
        }
    }

    pub fn is_selected(self, path: CellPath) -> bool {
        match self {
            Selection::Unselected => false,
            Selection::Selected(current) => current == path,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Unselected => write!(f, "No selection"),
            Selection::Selected(path) => write!(f, "{}", path),
        }
    }
}

/// Abstract directional input, independent of any input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl FromStr for NavKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(NavKey::Up),
            "down" => Ok(NavKey::Down),
            "left" => Ok(NavKey::Left),
            "right" => Ok(NavKey::Right),
            "none" => Ok(NavKey::None),
            other => Err(format!("Unknown key: {}", other)),
        }
    }
}

/// A rectangular table of opaque cell content.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<C> {
    rows: Vec<Vec<C>>,
    columns: usize,
}

impl<C> Default for Grid<C> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: 0,
        }
    }
}

impl<C> Grid<C> {
    /// Builds a grid, rejecting rows whose length differs from the first row.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridsel::domain::{Grid, GridError};
    ///
    /// let grid = Grid::new(vec![vec!["a", "b"], vec!["c", "d"]]).unwrap();
    /// assert_eq!(grid.row_count(), 2);
    /// assert_eq!(grid.column_count(), 2);
    ///
    /// let ragged = Grid::new(vec![vec!["a", "b"], vec!["c"]]);
    /// assert!(matches!(ragged, Err(GridError::RaggedRows { row: 1, .. })));
    /// ```
    pub fn new(rows: Vec<Vec<C>>) -> GridResult<Self> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != columns)
        {
            return Err(GridError::RaggedRows {
                row,
                expected: columns,
                found,
            });
        }
        Ok(Self { rows, columns })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns == 0
    }

    pub fn cell(&self, path: CellPath) -> Option<&C> {
        self.rows.get(path.row).and_then(|row| row.get(path.column))
    }

    /// Iterates cells in row-major order together with their paths.
    pub fn cells(&self) -> impl Iterator<Item = (CellPath, &C)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, cell)| (CellPath::new(row, column), cell))
        })
    }

    /// Converts every cell, keeping the shape.
    pub fn map<D, F>(self, mut f: F) -> Grid<D>
    where
        F: FnMut(CellPath, C) -> D,
    {
        let rows = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .into_iter()
                    .enumerate()
                    .map(|(column, cell)| f(CellPath::new(row, column), cell))
                    .collect()
            })
            .collect();
        Grid {
            rows,
            columns: self.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_path_display_is_one_based() {
        assert_eq!(CellPath::new(0, 0).to_string(), "R1C1");
        assert_eq!(CellPath::new(2, 3).to_string(), "R3C4");
    }

    #[test]
    fn test_for_cell_buckets_width_by_column_and_height_by_row() {
        let sizes = CellSizes::for_cell(CellPath::new(2, 5), Size::new(7, 3));
        assert_eq!(sizes.width_for(5), Some(7));
        assert_eq!(sizes.height_for(2), Some(3));
        assert_eq!(sizes.width_for(2), None);
        assert_eq!(sizes.height_for(5), None);
    }

    #[test]
    fn test_merge_keeps_larger_values() {
        let mut a = CellSizes::for_cell(CellPath::new(0, 0), Size::new(4, 2));
        let b = CellSizes::for_cell(CellPath::new(0, 0), Size::new(3, 5));
        a.merge(&b);
        assert_eq!(a.width_for(0), Some(4));
        assert_eq!(a.height_for(0), Some(5));
    }

    #[test]
    fn test_reduce_of_nothing_is_empty() {
        let sizes = CellSizes::reduce(Vec::new());
        assert!(sizes.is_empty());
        assert_eq!(sizes, CellSizes::default());
    }

    #[test]
    fn test_reduce_order_does_not_matter() {
        let a = CellSizes::for_cell(CellPath::new(0, 0), Size::new(4, 1));
        let b = CellSizes::for_cell(CellPath::new(1, 0), Size::new(9, 2));
        let c = CellSizes::for_cell(CellPath::new(1, 1), Size::new(2, 4));

        let forward = CellSizes::reduce([a.clone(), b.clone(), c.clone()]);
        let backward = CellSizes::reduce([c, b, a]);
        assert_eq!(forward, backward);
        assert_eq!(forward.width_for(0), Some(9));
        assert_eq!(forward.height_for(1), Some(4));
    }

    #[test]
    fn test_selection_path() {
        assert_eq!(Selection::Unselected.path(), None);
        let path = CellPath::new(1, 2);
        assert_eq!(Selection::Selected(path).path(), Some(path));
        assert!(Selection::Selected(path).is_selected(path));
        assert!(!Selection::Selected(path).is_selected(CellPath::new(2, 1)));
        assert!(!Selection::Unselected.is_selected(path));
    }

    #[test]
    fn test_nav_key_parsing() {
        assert_eq!("up".parse::<NavKey>(), Ok(NavKey::Up));
        assert_eq!(" Down ".parse::<NavKey>(), Ok(NavKey::Down));
        assert_eq!("LEFT".parse::<NavKey>(), Ok(NavKey::Left));
        assert_eq!("right".parse::<NavKey>(), Ok(NavKey::Right));
        assert_eq!("none".parse::<NavKey>(), Ok(NavKey::None));
        assert!("sideways".parse::<NavKey>().is_err());
    }

    #[test]
    fn test_empty_grid() {
        let grid: Grid<Size> = Grid::new(Vec::new()).unwrap();
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);
        assert!(grid.is_empty());
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn test_grid_of_empty_rows_has_no_columns() {
        let grid: Grid<Size> = Grid::new(vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_ragged_grid_is_rejected() {
        let result = Grid::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
        assert_eq!(
            result,
            Err(GridError::RaggedRows {
                row: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::new(vec![vec!['a', 'b'], vec!['c', 'd']]).unwrap();
        let collected: Vec<(CellPath, char)> = grid.cells().map(|(p, c)| (p, *c)).collect();
        assert_eq!(
            collected,
            vec![
                (CellPath::new(0, 0), 'a'),
                (CellPath::new(0, 1), 'b'),
                (CellPath::new(1, 0), 'c'),
                (CellPath::new(1, 1), 'd'),
            ]
        );
    }

    #[test]
    fn test_cell_lookup() {
        let grid = Grid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(grid.cell(CellPath::new(1, 0)), Some(&3));
        assert_eq!(grid.cell(CellPath::new(2, 0)), None);
        assert_eq!(grid.cell(CellPath::new(0, 2)), None);
    }

    #[test]
    fn test_map_keeps_shape() {
        let grid = Grid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let mapped = grid.map(|path, value| value * 10 + path.column);
        assert_eq!(mapped.cell(CellPath::new(1, 1)), Some(&41));
        assert_eq!(mapped.column_count(), 2);
    }
}
