use crate::domain::Grid;
use std::fs;
use std::path::Path;

pub struct GridRepository;

impl GridRepository {
    /// The table shown when no grid file is given.
    pub fn default_rows() -> Vec<Vec<String>> {
        [
            ["", "Monday", "Tuesday", "Wednesday"],
            ["Berlin", "Cloudy", "Mostly\nSunny", "Sunny"],
            ["London", "Heavy Rain", "Cloudy", "Sunny"],
        ]
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
    }

    pub fn default_grid() -> Grid<String> {
        // The built-in table is rectangular.
        Grid::new(Self::default_rows()).unwrap_or_default()
    }

    /// Loads a grid from a `.json` file or, for any other extension, a CSV file.
    pub fn load_grid(path: &Path) -> Result<Grid<String>, String> {
        let rows = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::read_json_rows(path)?,
            _ => Self::read_csv_rows(path)?,
        };
        let grid = Grid::new(rows).map_err(|e| e.to_string())?;
        tracing::info!(
            "Loaded {}x{} grid from {:?}",
            grid.row_count(),
            grid.column_count(),
            path
        );
        Ok(grid)
    }

    fn read_json_rows(path: &Path) -> Result<Vec<Vec<String>>, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str::<Vec<Vec<String>>>(&content)
            .map_err(|e| format!("Invalid grid file - {}", e))
    }

    fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| e.to_string())?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| format!("CSV parse error: {}", e))?;
            rows.push(record.iter().map(|field| field.replace("\\n", "\n")).collect());
        }
        Ok(rows)
    }
}
