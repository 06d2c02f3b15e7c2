//! Category standardization and keyword-based inference.
//!
//! Categories are resolved in two stages:
//!
//! 1. **Standardize** the category text itself: blank-like values become the
//!    sentinel, known prefixes map to a canonical category, anything else is
//!    kept in title case.
//! 2. **Infer** a category from the product name, only when stage 1 produced
//!    the sentinel. The first keyword hit wins, scanning categories and their
//!    keywords in table order.

use inv_model::Category;

use crate::text::title_case;

/// Category values that mean "nothing was entered".
const BLANK_CATEGORY_VALUES: &[&str] = &["", "nan", "none"];

/// Prefix rules, evaluated in order. The first matching prefix wins.
const CATEGORY_PREFIXES: &[(&[&str], Category)] = &[
    (&["mob", "mobi"], Category::Mobiliario),
    (&["elec", "élec"], Category::Electronica),
    (&["pap", "ofic"], Category::Papeleria),
    (&["limp", "aseo"], Category::Limpieza),
];

/// Product keywords per category, in tie-break order.
pub const PRODUCT_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Electronica,
        &[
            "laptop",
            "mouse",
            "teclado",
            "monitor",
            "impresora",
            "disco duro",
            "memoria",
            "cámara",
            "camara",
            "audífono",
            "audifono",
            "auricular",
            "tablet",
            "celular",
            "teléfono",
            "telefono",
            "bocina",
            "parlante",
            "cable",
            "usb",
            "router",
            "switch",
            "servidor",
            "proyector",
            "escáner",
            "escaner",
            "batería",
            "bateria",
            "cargador",
            "adaptador",
            "pantalla",
            "cpu",
            "procesador",
            "tarjeta",
            "hub",
            "docking",
        ],
    ),
    (
        Category::Mobiliario,
        &[
            "silla",
            "escritorio",
            "mesa",
            "estante",
            "archivero",
            "librero",
            "sofá",
            "sofa",
            "gabinete",
            "mueble",
            "anaquel",
            "repisa",
            "banco",
            "banca",
            "cajonera",
            "vitrina",
            "credenza",
        ],
    ),
    (
        Category::Papeleria,
        &[
            "papel",
            "folder",
            "carpeta",
            "pluma",
            "lápiz",
            "lapiz",
            "engrapadora",
            "grapa",
            "clip",
            "sobre",
            "cuaderno",
            "agenda",
            "cartulina",
            "cinta",
            "pegamento",
            "tijera",
            "marcador",
            "post-it",
        ],
    ),
    (
        Category::Limpieza,
        &[
            "jabón",
            "jabon",
            "detergente",
            "escoba",
            "trapeador",
            "cloro",
            "desinfectante",
            "toalla",
            "papel higiénico",
            "bolsa basura",
            "aromatizante",
            "franela",
            "guante",
            "cubeta",
        ],
    ),
];

/// Stage 1: map free-text category input to a category.
pub fn standardize_category(raw: &str) -> Category {
    let trimmed = raw.trim();
    let folded = trimmed.to_lowercase();
    if BLANK_CATEGORY_VALUES.contains(&folded.as_str()) {
        return Category::SinCategoria;
    }
    for (prefixes, category) in CATEGORY_PREFIXES {
        if prefixes.iter().any(|prefix| folded.starts_with(prefix)) {
            return category.clone();
        }
    }
    Category::from_label(&title_case(trimmed))
}

/// Stage 2: find the first category whose keyword occurs in the product name.
pub fn infer_from_product(product: &str) -> Option<Category> {
    let product = product.to_lowercase();
    PRODUCT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| product.contains(keyword)))
        .map(|(category, _)| category.clone())
}

/// Both stages: inference only runs when stage 1 yields the sentinel and a
/// product name is available.
pub fn resolve_category(raw: &str, product: Option<&str>) -> Category {
    let standardized = standardize_category(raw);
    if !standardized.is_sentinel() {
        return standardized;
    }
    product
        .and_then(infer_from_product)
        .unwrap_or(Category::SinCategoria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_covers_every_known_category_once() {
        let categories: Vec<&Category> = PRODUCT_KEYWORDS.iter().map(|(c, _)| c).collect();
        assert_eq!(categories.len(), Category::KNOWN.len());
        for known in &Category::KNOWN {
            assert_eq!(categories.iter().filter(|c| **c == known).count(), 1);
        }
    }

    #[test]
    fn keywords_are_lowercase() {
        for (_, keywords) in PRODUCT_KEYWORDS {
            for keyword in *keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }
}
