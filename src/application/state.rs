//! Render and interaction state of a table.
//!
//! `App` owns the grid content, the `SizeAggregator` and the
//! `SelectionController`, and composes them through the render loop: each
//! frame runs a measurement pass, the aggregator publishes into
//! `TableLayout`, and the renderer lays cells out from the published sizes.

use crate::domain::{
    CellPath, CellSizes, Grid, NavKey, Selection, SelectionController, SizeAggregator,
    SizeObserver, TableStyle,
};
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use ratatui::text::Text;

/// The sizes the renderer lays cells out with.
///
/// Updated only through [`SizeObserver`] when the aggregator publishes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableLayout {
    pub sizes: CellSizes,
    pub revision: u64,
}

impl SizeObserver for TableLayout {
    fn sizes_changed(&mut self, sizes: &CellSizes) {
        self.sizes = sizes.clone();
        self.revision += 1;
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use gridsel::application::App;
/// use gridsel::domain::{Grid, NavKey, Selection, TableStyle};
/// use ratatui::text::Text;
///
/// let grid = Grid::new(vec![vec![Text::raw("a"), Text::raw("b")]]).unwrap();
/// let mut app = App::new(grid, TableStyle::default());
/// assert_eq!(app.selected(), Selection::Unselected);
/// app.navigate(NavKey::Left);
/// assert_eq!(app.selected().path().map(|p| p.column), Some(1));
/// ```
#[derive(Debug)]
pub struct App {
    /// Cell content, immutable for the lifetime of a loaded grid
    pub grid: Grid<Text<'static>>,
    pub style: TableStyle,
    /// Selection highlight resolved from `style` at construction
    pub highlight: Color,
    pub aggregator: SizeAggregator,
    pub controller: SelectionController,
    /// Sizes published by the last measurement pass that changed them
    pub layout: TableLayout,
    /// Cell rectangles from the last rendered frame, for hit testing
    pub cell_areas: Vec<(CellPath, Rect)>,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl App {
    /// Creates the table state for `grid`.
    ///
    /// An invalid `style` is not fatal: the problem is logged and shown in
    /// the status bar, an unparsable color falls back to blue, and a border
    /// that does not fit in the padding is drawn as a fill instead.
    pub fn new(grid: Grid<Text<'static>>, style: TableStyle) -> Self {
        let controller = SelectionController::for_grid(&grid);
        let status_message = match style.validate() {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Invalid table style: {}", e);
                Some(e.to_string())
            }
        };
        let highlight = style.highlight_color().unwrap_or(Color::Blue);
        Self {
            grid,
            style,
            highlight,
            aggregator: SizeAggregator::new(),
            controller,
            layout: TableLayout::default(),
            cell_areas: Vec::new(),
            status_message,
        }
    }

    /// Whether the selection is shown as a border rather than a fill.
    pub fn draws_selection_border(&self) -> bool {
        self.style.selection_border_width > 0 && self.style.cell_padding > 0
    }

    /// Swaps in new content. Sizes are recomputed from scratch and the
    /// selection starts over.
    pub fn replace_grid(&mut self, grid: Grid<Text<'static>>) {
        tracing::info!(
            "Replacing grid with {}x{} content",
            grid.row_count(),
            grid.column_count()
        );
        self.controller
            .reconfigure(grid.row_count(), grid.column_count());
        self.controller.clear();
        self.grid = grid;
        self.aggregator.reset();
        self.layout = TableLayout::default();
        self.cell_areas.clear();
        self.status_message = None;
    }

    /// Measures every cell and publishes the aggregate into `layout`.
    ///
    /// Returns `true` if the layout changed.
    pub fn run_measure_pass(&mut self) -> bool {
        self.aggregator.measure_pass(&self.grid, &mut self.layout)
    }

    pub fn selected(&self) -> Selection {
        self.controller.selected()
    }

    pub fn navigate(&mut self, key: NavKey) -> Selection {
        let previous = self.controller.selected();
        let current = self.controller.handle(key);
        if previous != current {
            self.status_message = None;
        }
        current
    }

    /// Selects the cell rendered under the given screen position, if any.
    pub fn click(&mut self, column: u16, row: u16) -> Option<CellPath> {
        let position = Position::new(column, row);
        let path = self
            .cell_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|&(path, _)| path)?;

        match self.controller.select(path) {
            Ok(selection) => {
                tracing::debug!("Clicked {} at ({}, {})", selection, column, row);
                self.status_message = None;
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Ignoring click: {}", e);
                self.status_message = Some(e.to_string());
                None
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.controller.clear();
    }

    pub fn set_cell_areas(&mut self, areas: Vec<(CellPath, Rect)>) {
        self.cell_areas = areas;
    }

    /// Text for the status bar: either a pending message or the current cell.
    pub fn status_text(&self) -> String {
        if let Some(ref status) = self.status_message {
            return status.clone();
        }
        format!(
            "{} | {}x{} | Arrows/hjkl: move | Click: select | Esc: clear | q: quit",
            self.selected(),
            self.grid.row_count(),
            self.grid.column_count()
        )
    }
}
