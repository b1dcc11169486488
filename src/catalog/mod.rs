//! Calculator catalog
//!
//! Read-only metadata about every calculator in the directory. The built-in
//! data lives in [`data`]; a TOML file with the same shape can replace it.

mod data;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculator {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_popular: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// A category together with its member calculators in catalog order
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView<'a> {
    #[serde(flatten)]
    pub category: &'a Category,
    pub calculators: Vec<&'a Calculator>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    calculators: Vec<Calculator>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, calculators: Vec<Calculator>) -> Self {
        Self {
            categories,
            calculators,
        }
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Self::new(data::categories(), data::calculators())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Load a catalog file
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded catalog from {} ({} categories, {} calculators)",
            path.display(),
            catalog.categories.len(),
            catalog.calculators.len()
        );
        Ok(catalog)
    }

    /// Every calculator, in catalog order
    pub fn calculators(&self) -> &[Calculator] {
        &self.calculators
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Result<CategoryView<'_>, CatalogError> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::CategoryNotFound(id.to_string()))?;

        Ok(CategoryView {
            category,
            calculators: self.in_category(&category.id).collect(),
        })
    }

    pub fn calculator(&self, id: &str) -> Result<&Calculator, CatalogError> {
        self.calculators
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::CalculatorNotFound(id.to_string()))
    }

    pub fn in_category<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Calculator> + 'a {
        self.calculators.iter().filter(move |c| c.category == id)
    }

    pub fn popular(&self) -> Vec<&Calculator> {
        self.calculators.iter().filter(|c| c.is_popular).collect()
    }

    pub fn newest(&self) -> Vec<&Calculator> {
        self.calculators.iter().filter(|c| c.is_new).collect()
    }

    /// Display name of a category, falling back to its id
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(id: &str, category: &str) -> Calculator {
        Calculator {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: category.to_string(),
            icon: String::new(),
            is_new: false,
            is_popular: false,
        }
    }

    fn cat(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: String::new(),
        }
    }

    fn small_catalog() -> Catalog {
        Catalog::new(
            vec![cat("finance"), cat("math")],
            vec![calc("loan", "finance"), calc("factorial", "math")],
        )
    }

    #[test]
    fn test_category_lookup() {
        let catalog = small_catalog();

        let finance = catalog.category("finance").unwrap();
        let ids: Vec<&str> = finance.calculators.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["loan"]);

        assert_eq!(
            catalog.category("geometry").unwrap_err(),
            CatalogError::CategoryNotFound("geometry".to_string())
        );
    }

    #[test]
    fn test_calculator_lookup() {
        let catalog = small_catalog();
        assert_eq!(catalog.calculator("factorial").unwrap().category, "math");
        assert!(matches!(
            catalog.calculator("sudoku"),
            Err(CatalogError::CalculatorNotFound(_))
        ));
    }

    #[test]
    fn test_category_keeps_catalog_order_unfiltered() {
        let catalog = Catalog::new(
            vec![cat("finance")],
            vec![
                calc("loan", "finance"),
                calc("bmi", "health"),
                calc("savings", "finance"),
                calc("mortgage", "finance"),
            ],
        );
        let view = catalog.category("finance").unwrap();
        let ids: Vec<&str> = view.calculators.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["loan", "savings", "mortgage"]);
    }

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();
        assert!(!catalog.calculators().is_empty());

        for calculator in catalog.calculators() {
            assert!(
                catalog.category(&calculator.category).is_ok(),
                "{} has unknown category {}",
                calculator.id,
                calculator.category
            );
        }

        let mut ids: Vec<&str> = catalog.calculators().iter().map(|c| c.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "Calculator ids must be unique");

        assert!(!catalog.popular().is_empty());
        assert!(!catalog.newest().is_empty());
    }

    #[test]
    fn test_catalog_from_toml() {
        let content = r#"
            [[categories]]
            id = "math"
            name = "Math"
            description = "Numbers"
            icon = "∑"

            [[calculators]]
            id = "factorial"
            name = "Factorial"
            description = "n!"
            category = "math"
            icon = "!"
            is_new = true
        "#;

        let catalog = Catalog::from_toml_str(content).unwrap();
        let factorial = catalog.calculator("factorial").unwrap();
        assert!(factorial.is_new);
        assert!(!factorial.is_popular);
        assert_eq!(catalog.category_name("math"), "Math");
        assert_eq!(catalog.category_name("unknown"), "unknown");

        assert!(matches!(
            Catalog::from_toml_str("calculators = 3"),
            Err(CatalogError::Parse(_))
        ));
    }
}
