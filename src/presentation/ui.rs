use crate::application::App;
use crate::domain::{CellPath, CellSizes, Grid, Measure, Size, TableStyle};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const STRIPE_BACKGROUND: Color = Color::Indexed(236);

impl Measure for Text<'_> {
    /// Widest line in display columns by line count. Empty content still
    /// takes one line.
    fn measure(&self) -> Size {
        let width = u16::try_from(self.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(self.height().max(1)).unwrap_or(u16::MAX);
        Size::new(width, height)
    }
}

/// Turns raw strings into renderable cells, bolding header row/column.
pub fn styled_grid(grid: Grid<String>, style: &TableStyle) -> Grid<Text<'static>> {
    grid.map(|path, content| {
        let header = (style.bold_header_row && path.row == 0)
            || (style.bold_header_column && path.column == 0);
        if header {
            Text::styled(content, Style::default().add_modifier(Modifier::BOLD))
        } else {
            Text::raw(content)
        }
    })
}

/// Lays cells out row by row from the aggregated sizes.
///
/// A column or row the aggregate has no entry for falls back to the cell's
/// own natural size. Every slot adds `padding` on each side. Cells are
/// clipped to `area` and cells falling entirely outside it are left out.
pub fn compute_cell_areas<C: Measure>(
    grid: &Grid<C>,
    sizes: &CellSizes,
    padding: u16,
    area: Rect,
) -> Vec<(CellPath, Rect)> {
    let mut areas = Vec::with_capacity(grid.row_count() * grid.column_count());
    let mut y = area.y;

    for row in 0..grid.row_count() {
        let mut x = area.x;
        let mut row_height = 0u16;

        for column in 0..grid.column_count() {
            let path = CellPath::new(row, column);
            let Some(cell) = grid.cell(path) else {
                continue;
            };
            let natural = cell.measure();
            let width = sizes
                .width_for(column)
                .unwrap_or(natural.width)
                .saturating_add(padding.saturating_mul(2));
            let height = sizes
                .height_for(row)
                .unwrap_or(natural.height)
                .saturating_add(padding.saturating_mul(2));

            let slot = Rect::new(x, y, width, height).intersection(area);
            if !slot.is_empty() {
                areas.push((path, slot));
            }
            x = x.saturating_add(width);
            row_height = row_height.max(height);
        }
        y = y.saturating_add(row_height);
    }
    areas
}

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_table(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!("gridsel | Cell: {}", app.selected()))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Table");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let padding = app.style.cell_padding;
    let cell_areas = compute_cell_areas(&app.grid, &app.layout.sizes, padding, inner);
    let highlight = app.highlight;
    let draw_border = app.draws_selection_border();

    for &(path, slot) in &cell_areas {
        let Some(content) = app.grid.cell(path) else {
            continue;
        };

        let mut cell_style = Style::default();
        if app.style.alternating_row_background && path.row % 2 == 1 {
            cell_style = cell_style.bg(STRIPE_BACKGROUND);
        }
        let selected = app.selected().is_selected(path);
        if selected && !draw_border {
            cell_style = cell_style.bg(highlight).fg(Color::Black);
        }
        f.render_widget(Block::default().style(cell_style), slot);

        if selected && draw_border {
            let border_type = if app.style.selection_border_width >= 2 {
                BorderType::Thick
            } else {
                BorderType::Plain
            };
            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(highlight));
            f.render_widget(border, slot);
        }

        let content_area = slot.inner(Margin::new(padding, padding));
        if !content_area.is_empty() {
            f.render_widget(Paragraph::new(content.clone()), content_area);
        }
    }

    app.set_cell_areas(cell_areas);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_text())
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.status_message {
            Some(_) => Style::default().fg(Color::Yellow),
            None => Style::default(),
        });
    f.render_widget(status, area);
}
