/// A dynamic `WHERE` clause with positional parameters.
#[derive(Debug, Clone, Default)]
pub(crate) struct Conditions {
    clauses: Vec<&'static str>,
    params: Vec<String>,
}

impl Conditions {
    /// Add a clause holding exactly one `?` placeholder.
    pub(crate) fn push(&mut self, clause: &'static str, value: &str) {
        self.clauses.push(clause);
        self.params.push(value.to_string());
    }

    /// Add a clause unless the value is empty.
    pub(crate) fn push_non_empty(&mut self, clause: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.push(clause, value);
        }
    }

    /// Copy of these conditions with one more clause.
    pub(crate) fn and(&self, clause: &'static str, value: &str) -> Self {
        let mut extended = self.clone();
        extended.push(clause, value);
        extended
    }

    /// `""` or `" WHERE a AND b"`.
    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn params(&self) -> impl Iterator<Item = &String> {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_where_clause() {
        let mut conditions = Conditions::default();
        assert_eq!(conditions.where_clause(), "");
        conditions.push_non_empty("Fecha >= ?", Some(""));
        conditions.push_non_empty("Fecha <= ?", None);
        assert_eq!(conditions.where_clause(), "");

        conditions.push("Categoria = ?", "Limpieza");
        let sales = conditions.and("Tipo_Movimiento = ?", "Salida");
        assert_eq!(conditions.where_clause(), " WHERE Categoria = ?");
        assert_eq!(
            sales.where_clause(),
            " WHERE Categoria = ? AND Tipo_Movimiento = ?"
        );
        assert_eq!(sales.params().count(), 2);
    }
}
