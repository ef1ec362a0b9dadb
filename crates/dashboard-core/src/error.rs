use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Sheet '{name}' not found. Available: {available:?}")]
    SheetNotFound { name: String, available: Vec<String> },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("API error: {0}")]
    Api(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
