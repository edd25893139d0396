pub mod product;

pub use product::ProductRecord;

use anyhow::{Context, Result};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/products.json");

/// Read-only product list, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("built-in catalog is malformed")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<ProductRecord> = serde_json::from_str(json)?;
        Ok(Self { products })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to parse catalog {}", path.display()))
    }

    /// Uses `path` when given, otherwise the built-in list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin()?,
        };
        log::info!("📦 Catalog loaded: {} products", catalog.len());
        Ok(catalog)
    }

    pub fn get_all(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Compact JSON of the whole catalog, embedded in the assistant prompt.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string(&self.products).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_covers_every_quick_category() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        for category in ["Hair Care", "Skin Care", "Oral Care"] {
            assert!(
                catalog.get_all().iter().any(|p| p.category == category),
                "no products in {category}"
            );
        }
    }

    #[test]
    fn prompt_json_uses_storefront_field_names() {
        let catalog = Catalog::new(vec![ProductRecord {
            title: "Oil".into(),
            category: "Hair Care".into(),
            price: "Rs 500".into(),
            discounted_price: Some("Rs 450".into()),
            link: "https://example.com/oil".into(),
        }]);
        let json = catalog.to_prompt_json();
        assert!(json.contains("\"discountedPrice\":\"Rs 450\""));
        assert!(json.starts_with('['));
    }

    #[test]
    fn loads_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"title":"Paste","category":"Oral Care","price":"Rs 200","link":"https://example.com"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_all()[0].discounted_price, None);
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        assert!(Catalog::from_path(Path::new("/nonexistent/products.json")).is_err());
    }
}
