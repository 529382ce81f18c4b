use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use super::errors::{GridError, GridResult};

pub const MAX_SELECTION_BORDER_WIDTH: u16 = 2;

/// Visual options for a table.
///
/// Deserializes from partial JSON; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use gridsel::domain::TableStyle;
/// use ratatui::style::Color;
///
/// let style: TableStyle = serde_json::from_str(r#"{"selection_highlight_color": "red"}"#).unwrap();
/// assert_eq!(style.highlight_color().unwrap(), Color::Red);
/// assert!(style.alternating_row_background);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyle {
    /// Shade every odd row
    pub alternating_row_background: bool,
    /// Color name, index or `#rrggbb`
    pub selection_highlight_color: String,
    /// 0 fills the selected cell, 1 draws a plain border, 2 a thick one.
    /// A border is drawn in the padding, so it needs `cell_padding >= 1`.
    pub selection_border_width: u16,
    /// Blank columns/rows on each side of the cell content
    pub cell_padding: u16,
    pub bold_header_row: bool,
    pub bold_header_column: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            alternating_row_background: true,
            selection_highlight_color: "blue".to_string(),
            selection_border_width: 1,
            cell_padding: 1,
            bold_header_row: true,
            bold_header_column: true,
        }
    }
}

impl TableStyle {
    pub fn highlight_color(&self) -> GridResult<Color> {
        Color::from_str(self.selection_highlight_color.trim())
            .map_err(|_| GridError::InvalidColor(self.selection_highlight_color.clone()))
    }

    pub fn validate(&self) -> GridResult<()> {
        self.highlight_color()?;
        if self.selection_border_width > MAX_SELECTION_BORDER_WIDTH {
            return Err(GridError::InvalidBorderWidth(self.selection_border_width));
        }
        if self.selection_border_width > 0 && self.cell_padding == 0 {
            return Err(GridError::BorderWithoutPadding(self.selection_border_width));
        }
        Ok(())
    }
}
