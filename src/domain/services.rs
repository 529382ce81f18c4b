//! Size negotiation and selection services for the table component.
//!
//! `SizeAggregator` turns heterogeneous per-cell measurements into one
//! width per column and one height per row. `SelectionController` is the
//! keyboard navigation state machine for the single selected cell.

use super::errors::{GridError, GridResult};
use super::models::{CellPath, CellSizes, Grid, Measure, NavKey, Selection, Size};

/// Receives the aggregate whenever a measurement pass changes it.
pub trait SizeObserver {
    fn sizes_changed(&mut self, sizes: &CellSizes);
}

impl<F> SizeObserver for F
where
    F: FnMut(&CellSizes),
{
    fn sizes_changed(&mut self, sizes: &CellSizes) {
        self(sizes)
    }
}

/// Collects cell measurements and reduces them into a shared `CellSizes`.
///
/// A measurement pass starts with [`SizeAggregator::begin_pass`], during
/// which every mounted cell reports once, and ends with
/// [`SizeAggregator::publish`], which notifies the observer only when the
/// aggregate differs from what it last received. Within a pass stored
/// maxima never decrease; a new pass rebuilds the aggregate from scratch so
/// maxima of cells that are gone do not linger.
///
/// # Examples
///
/// ```
/// use gridsel::domain::{CellPath, CellSizes, Size, SizeAggregator};
///
/// let mut aggregator = SizeAggregator::new();
/// aggregator.report(CellPath::new(0, 0), Size::new(6, 1));
/// aggregator.report(CellPath::new(1, 0), Size::new(10, 2));
///
/// let mut received = None;
/// aggregator.publish(&mut |sizes: &CellSizes| received = Some(sizes.clone()));
///
/// let received = received.unwrap();
/// assert_eq!(received.width_for(0), Some(10));
/// assert_eq!(received.height_for(1), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct SizeAggregator {
    aggregate: CellSizes,
    published: Option<CellSizes>,
    reports: usize,
}

impl SizeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one cell's measured size into the aggregate.
    ///
    /// Returns `true` if any stored maximum grew.
    pub fn report(&mut self, path: CellPath, size: Size) -> bool {
        self.reports += 1;
        let before = (
            self.aggregate.width_for(path.column),
            self.aggregate.height_for(path.row),
        );
        self.aggregate.merge(&CellSizes::for_cell(path, size));
        before
            != (
                self.aggregate.width_for(path.column),
                self.aggregate.height_for(path.row),
            )
    }

    /// Combines partial aggregates with the key-wise `max` rule.
    pub fn reduce<I>(sizes_from_children: I) -> CellSizes
    where
        I: IntoIterator<Item = CellSizes>,
    {
        CellSizes::reduce(sizes_from_children)
    }

    pub fn current_aggregate(&self) -> &CellSizes {
        &self.aggregate
    }

    pub fn width_for(&self, column: usize) -> Option<u16> {
        self.aggregate.width_for(column)
    }

    pub fn height_for(&self, row: usize) -> Option<u16> {
        self.aggregate.height_for(row)
    }

    /// Number of reports received since the current pass began.
    pub fn report_count(&self) -> usize {
        self.reports
    }

    /// Starts a new measurement pass, discarding the previous maxima.
    ///
    /// Observers keep the last published value until [`publish`] runs.
    ///
    /// [`publish`]: SizeAggregator::publish
    pub fn begin_pass(&mut self) {
        self.aggregate = CellSizes::default();
        self.reports = 0;
    }

    /// Forgets everything, including what was last published.
    ///
    /// Used when the content set changes; the next [`publish`] always
    /// notifies.
    ///
    /// [`publish`]: SizeAggregator::publish
    pub fn reset(&mut self) {
        self.begin_pass();
        self.published = None;
    }

    /// Hands the aggregate to `observer` if it changed since the last publish.
    pub fn publish(&mut self, observer: &mut dyn SizeObserver) -> bool {
        if self.published.as_ref() == Some(&self.aggregate) {
            return false;
        }
        tracing::debug!(
            "Publishing cell sizes: {} columns, {} rows from {} reports",
            self.aggregate.width.len(),
            self.aggregate.height.len(),
            self.reports
        );
        observer.sizes_changed(&self.aggregate);
        self.published = Some(self.aggregate.clone());
        true
    }

    /// Runs a full pass over `grid`: every cell reports its natural size,
    /// then the result is published once.
    pub fn measure_pass<C: Measure>(
        &mut self,
        grid: &Grid<C>,
        observer: &mut dyn SizeObserver,
    ) -> bool {
        self.begin_pass();
        for (path, cell) in grid.cells() {
            self.report(path, cell.measure());
        }
        self.publish(observer)
    }
}

/// Keyboard navigation state machine for a single selected cell.
///
/// The first directional key establishes an anchor whose position depends
/// on the key; after that keys move the selection one cell and clamp at
/// the grid edges.
///
/// # Examples
///
/// ```
/// use gridsel::domain::{CellPath, NavKey, Selection, SelectionController};
///
/// let mut controller = SelectionController::new(3, 4);
/// assert_eq!(controller.handle(NavKey::Left), Selection::Selected(CellPath::new(0, 3)));
/// assert_eq!(controller.handle(NavKey::Right), Selection::Selected(CellPath::new(0, 3)));
/// assert_eq!(controller.handle(NavKey::Down), Selection::Selected(CellPath::new(1, 3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Selection,
    rows: usize,
    columns: usize,
}

impl SelectionController {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            selected: Selection::Unselected,
            rows,
            columns,
        }
    }

    pub fn for_grid<C>(grid: &Grid<C>) -> Self {
        Self::new(grid.row_count(), grid.column_count())
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn selected(&self) -> Selection {
        self.selected
    }

    fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Binds new grid dimensions, dropping a selection that no longer fits.
    pub fn reconfigure(&mut self, rows: usize, columns: usize) {
        self.rows = rows;
        self.columns = columns;
        if let Selection::Selected(path) = self.selected {
            if path.row >= rows || path.column >= columns {
                tracing::debug!("Dropping selection {} after resize to {}x{}", path, rows, columns);
                self.selected = Selection::Unselected;
            }
        }
    }

    /// Applies one directional key and returns the resulting selection.
    pub fn handle(&mut self, key: NavKey) -> Selection {
        if self.is_empty() {
            return self.selected;
        }
        let max_row = self.rows - 1;
        let max_col = self.columns - 1;

        let next = match self.selected {
            Selection::Unselected => match key {
                NavKey::Down | NavKey::Right => Selection::Selected(CellPath::new(0, 0)),
                NavKey::Up => Selection::Selected(CellPath::new(max_row, 0)),
                NavKey::Left => Selection::Selected(CellPath::new(0, max_col)),
                NavKey::None => Selection::Unselected,
            },
            Selection::Selected(path) => {
                let CellPath { row, column } = path;
                let moved = match key {
                    NavKey::Down if row < max_row => CellPath::new(row + 1, column),
                    NavKey::Up if row > 0 => CellPath::new(row - 1, column),
                    NavKey::Right if column < max_col => CellPath::new(row, column + 1),
                    NavKey::Left if column > 0 => CellPath::new(row, column - 1),
                    NavKey::Up | NavKey::Down | NavKey::Left | NavKey::Right | NavKey::None => {
                        path
                    }
                };
                Selection::Selected(moved)
            }
        };

        if next != self.selected {
            tracing::debug!("Selection {:?} -> {} via {:?}", self.selected, next, key);
            self.selected = next;
        }
        self.selected
    }

    /// Selects `path` directly, e.g. from a pointer click.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] and leaves the selection untouched
    /// if `path` is outside the grid.
    pub fn select(&mut self, path: CellPath) -> GridResult<Selection> {
        if path.row >= self.rows || path.column >= self.columns {
            return Err(GridError::OutOfBounds {
                path,
                rows: self.rows,
                columns: self.columns,
            });
        }
        self.selected = Selection::Selected(path);
        Ok(self.selected)
    }

    pub fn clear(&mut self) {
        self.selected = Selection::Unselected;
    }
}
