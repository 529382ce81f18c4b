use super::models::CellPath;

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    OutOfBounds {
        path: CellPath,
        rows: usize,
        columns: usize,
    },
    InvalidColor(String),
    InvalidBorderWidth(u16),
    BorderWithoutPadding(u16),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::RaggedRows { row, expected, found } => {
                write!(
                    f,
                    "Grid is not rectangular: row {} has {} cells, expected {}",
                    row + 1,
                    found,
                    expected
                )
            }
            GridError::OutOfBounds { path, rows, columns } => {
                write!(f, "Cell {} is outside a {}x{} grid", path, rows, columns)
            }
            GridError::InvalidColor(color) => {
                write!(f, "Invalid highlight color: {}", color)
            }
            GridError::InvalidBorderWidth(width) => {
                write!(f, "Invalid selection border width: {} (expected 0, 1 or 2)", width)
            }
            GridError::BorderWithoutPadding(width) => {
                write!(
                    f,
                    "Selection border width {} needs a cell padding of at least 1",
                    width
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

pub type GridResult<T> = Result<T, GridError>;
