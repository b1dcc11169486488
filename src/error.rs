use thiserror::Error;

/// Lookup and parsing failures for the calculator catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Calculator not found: {0}")]
    CalculatorNotFound(String),

    #[error("Invalid catalog file: {0}")]
    Parse(String),
}

impl CatalogError {
    /// What was looked up and missed, for the not-found page
    pub fn missing(&self) -> Option<(&'static str, &str)> {
        match self {
            CatalogError::CategoryNotFound(id) => Some(("category", id)),
            CatalogError::CalculatorNotFound(id) => Some(("calculator", id)),
            CatalogError::Parse(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("End date {end} is before start date {start}")]
    Inverted { start: String, end: String },
}
