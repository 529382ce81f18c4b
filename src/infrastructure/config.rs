use crate::domain::TableStyle;
use std::fs;
use std::path::Path;

pub struct ConfigRepository;

impl ConfigRepository {
    /// Reads and validates a JSON style file.
    pub fn load_style(path: &Path) -> Result<TableStyle, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let style = serde_json::from_str::<TableStyle>(&content)
            .map_err(|e| format!("Invalid config file - {}", e))?;
        style.validate().map_err(|e| e.to_string())?;
        tracing::info!("Loaded table style from {:?}", path);
        Ok(style)
    }
}
