//! Movement type corrections.

use inv_model::{ENTRADA, SALIDA};

/// Known misspellings and their corrections. Matching is exact.
pub const MOVEMENT_TYPE_FIXES: &[(&str, &str)] = &[("Entrd", ENTRADA), ("Slaida", SALIDA)];

/// Correct known misspellings; every other value passes through unchanged.
pub fn normalize_movement_type(value: &str) -> String {
    MOVEMENT_TYPE_FIXES
        .iter()
        .find(|(typo, _)| *typo == value)
        .map_or_else(|| value.to_string(), |(_, fixed)| (*fixed).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_known_typos_only() {
        assert_eq!(normalize_movement_type("Entrd"), "Entrada");
        assert_eq!(normalize_movement_type("Slaida"), "Salida");
        assert_eq!(normalize_movement_type("Venta"), "Venta");
        assert_eq!(normalize_movement_type("entrd"), "entrd");
        assert_eq!(normalize_movement_type("Entrada"), "Entrada");
    }
}
