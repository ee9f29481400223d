use crate::error::PortalClientError;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Crops the portal publishes market data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Soybean,
    Corn,
    Rice,
    Coffee,
    Beans,
    Wheat,
    Cotton,
    Sorghum,
}

/// Products whose price-table label differs from their common portal label.
const PRICE_LABEL_OVERRIDES: &[(Product, &str)] = &[
    (Product::Rice, "ARROZ LONGO FINO EM CASCA"),
    (Product::Coffee, "CAFÉ ARÁBICA"),
];

impl Product {
    pub const ALL: [Product; 8] = [
        Product::Soybean,
        Product::Corn,
        Product::Rice,
        Product::Coffee,
        Product::Beans,
        Product::Wheat,
        Product::Cotton,
        Product::Sorghum,
    ];

    /// Label the portal uses for `paramproduto`.
    pub const fn portal_label(&self) -> &'static str {
        match self {
            Product::Soybean => "SOJA",
            Product::Corn => "MILHO",
            Product::Rice => "ARROZ",
            Product::Coffee => "CAFÉ",
            Product::Beans => "FEIJÃO",
            Product::Wheat => "TRIGO",
            Product::Cotton => "ALGODÃO",
            Product::Sorghum => "SORGO",
        }
    }

    pub const fn english_name(&self) -> &'static str {
        match self {
            Product::Soybean => "soybean",
            Product::Corn => "corn",
            Product::Rice => "rice",
            Product::Coffee => "coffee",
            Product::Beans => "beans",
            Product::Wheat => "wheat",
            Product::Cotton => "cotton",
            Product::Sorghum => "sorghum",
        }
    }

    /// Label used by the price table, after the override table.
    pub fn price_label(&self) -> &'static str {
        PRICE_LABEL_OVERRIDES
            .iter()
            .find(|(product, _)| product == self)
            .map(|(_, label)| *label)
            .unwrap_or_else(|| self.portal_label())
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Product {
    type Err = PortalClientError;

    /// Accepts the English name or the portal label, in any case, with or without accents.
    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = fold(value);
        Product::ALL
            .into_iter()
            .find(|product| {
                fold(product.english_name()) == wanted || fold(product.portal_label()) == wanted
            })
            .ok_or_else(|| {
                PortalClientError::validation("product", format!("unsupported product '{value}'"))
            })
    }
}

/// Lowercase and strip the Portuguese diacritics the portal labels use.
fn fold(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
