//! Product Model

use serde::{Deserialize, Serialize};

/// Product category (closed set, wire spelling is the API's)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Paes,
    Doces,
    Salgados,
    Bebidas,
    Bolos,
    Outros,
    Pizzas,
    Refeicoes,
    Lanches,
    Omeletes,
    BebidasQuentes,
}

impl Category {
    /// All categories in menu display order
    pub const ALL: [Category; 11] = [
        Category::Paes,
        Category::Doces,
        Category::Salgados,
        Category::Bebidas,
        Category::Bolos,
        Category::Outros,
        Category::Pizzas,
        Category::Refeicoes,
        Category::Lanches,
        Category::Omeletes,
        Category::BebidasQuentes,
    ];

    /// Value as sent in the `categoria` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Paes => "paes",
            Category::Doces => "doces",
            Category::Salgados => "salgados",
            Category::Bebidas => "bebidas",
            Category::Bolos => "bolos",
            Category::Outros => "outros",
            Category::Pizzas => "pizzas",
            Category::Refeicoes => "refeicoes",
            Category::Lanches => "lanches",
            Category::Omeletes => "omeletes",
            Category::BebidasQuentes => "bebidas-quentes",
        }
    }

    /// Human-readable label (pt-BR, as shown in the storefront)
    pub fn label(&self) -> &'static str {
        match self {
            Category::Paes => "Pães",
            Category::Doces => "Doces",
            Category::Salgados => "Salgados",
            Category::Bebidas => "Bebidas",
            Category::Bolos => "Bolos",
            Category::Outros => "Outros",
            Category::Pizzas => "Pizzas",
            Category::Refeicoes => "Refeições",
            Category::Lanches => "Lanches",
            Category::Omeletes => "Omeletes",
            Category::BebidasQuentes => "Bebidas Quentes",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    /// Unit price in BRL
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "imagemUrl", default)]
    pub image_url: String,
    #[serde(rename = "disponivel")]
    pub available: bool,
    /// Featured on the storefront home page
    #[serde(rename = "destaque", default)]
    pub featured: bool,
    #[serde(rename = "ordem", default)]
    pub sort_order: i32,
}

/// Filters for `GET /products`
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub available: Option<bool>,
}

impl ProductQuery {
    /// Only available products, all categories
    pub fn available() -> Self {
        Self {
            category: None,
            available: Some(true),
        }
    }

    /// Restrict to a category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Query-string pairs (`categoria`, `disponivel`), omitting unset filters
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("categoria", category.as_str().to_string()));
        }
        if let Some(available) = self.available {
            pairs.push(("disponivel", available.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Category::BebidasQuentes).unwrap(),
            "\"bebidas-quentes\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"paes\"").unwrap(),
            Category::Paes
        );
    }

    #[test]
    fn test_product_deserializes_api_shape() {
        let json = r#"{
            "_id": "abc123",
            "nome": "Pão Francês",
            "descricao": "Unidade",
            "preco": 0.75,
            "categoria": "paes",
            "imagemUrl": "",
            "disponivel": true,
            "destaque": false,
            "ordem": 1
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "abc123");
        assert_eq!(product.name, "Pão Francês");
        assert_eq!(product.price, 0.75);
        assert_eq!(product.category, Category::Paes);
        assert!(product.available);
    }

    #[test]
    fn test_product_query_pairs() {
        let query = ProductQuery::available().with_category(Category::Bolos);
        assert_eq!(
            query.to_query(),
            vec![
                ("categoria", "bolos".to_string()),
                ("disponivel", "true".to_string())
            ]
        );

        assert!(ProductQuery::default().to_query().is_empty());
    }
}
