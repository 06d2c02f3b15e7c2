//! KPI and chart aggregates over stored movements.
//!
//! Revenue is always `Cantidad * Precio_Unitario` summed over sale rows
//! (`Tipo_Movimiento = 'Salida'`). The JSON field names match the dashboard
//! API consumed by the web front end of the inventory system.

use inv_model::SALIDA;
use rusqlite::params_from_iter;
use serde::Serialize;

use crate::error::Result;
use crate::query::Conditions;
use crate::store::Store;

/// Number of categories reported in [`Dashboard::top_categories`].
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Dashboard filters, combined with AND. Empty strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    pub category: Option<String>,
    pub seller: Option<String>,
}

impl DashboardFilter {
    fn conditions(&self) -> Conditions {
        let mut conditions = Conditions::default();
        conditions.push_non_empty("Fecha >= ?", self.from.as_deref());
        conditions.push_non_empty("Fecha <= ?", self.to.as_deref());
        conditions.push_non_empty("Categoria = ?", self.category.as_deref());
        conditions.push_non_empty("Vendedor = ?", self.seller.as_deref());
        conditions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    #[serde(rename = "ingresos_totales")]
    pub total_revenue: f64,
    #[serde(rename = "total_articulos")]
    pub total_items: i64,
    #[serde(rename = "total_transacciones")]
    pub transactions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerRevenue {
    #[serde(rename = "vendedor")]
    pub seller: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuantity {
    #[serde(rename = "categoria")]
    pub category: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    /// `None` groups sales without a date.
    #[serde(rename = "fecha")]
    pub date: Option<String>,
    pub total: f64,
}

/// Unfiltered value lists for the filter controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    #[serde(rename = "categorias")]
    pub categories: Vec<String>,
    #[serde(rename = "vendedores")]
    pub sellers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: Kpis,
    /// Revenue per seller, highest first.
    #[serde(rename = "ingresos_vendedor")]
    pub revenue_by_seller: Vec<SellerRevenue>,
    /// Categories by quantity sold, highest first.
    #[serde(rename = "top_categorias")]
    pub top_categories: Vec<CategoryQuantity>,
    /// Revenue per date, oldest first.
    #[serde(rename = "tendencia")]
    pub revenue_trend: Vec<DailyRevenue>,
    #[serde(rename = "filtros")]
    pub filters: FilterOptions,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Store {
    pub fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard> {
        let all = filter.conditions();
        let sales = all.and("Tipo_Movimiento = ?", SALIDA);
        let (where_all, where_sales) = (all.where_clause(), sales.where_clause());

        let total_revenue: f64 = self.conn.query_row(
            &format!(
                "SELECT COALESCE(SUM(Cantidad * Precio_Unitario), 0) FROM inventario{where_sales}"
            ),
            params_from_iter(sales.params()),
            |row| row.get(0),
        )?;
        let (total_items, transactions): (i64, i64) = self.conn.query_row(
            &format!(
                "SELECT COALESCE(SUM(Cantidad), 0), COUNT(ID_Movimiento) FROM inventario{where_all}"
            ),
            params_from_iter(all.params()),
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT Vendedor, COALESCE(SUM(Cantidad * Precio_Unitario), 0) AS Total FROM inventario{where_sales} \
             GROUP BY Vendedor ORDER BY Total DESC, Vendedor"
        ))?;
        let revenue_by_seller = stmt
            .query_map(params_from_iter(sales.params()), |row| {
                Ok(SellerRevenue {
                    seller: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    total: round2(row.get(1)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT Categoria, COALESCE(SUM(Cantidad), 0) AS Total FROM inventario{where_sales} \
             GROUP BY Categoria ORDER BY Total DESC, Categoria LIMIT {TOP_CATEGORY_LIMIT}"
        ))?;
        let top_categories = stmt
            .query_map(params_from_iter(sales.params()), |row| {
                Ok(CategoryQuantity {
                    category: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    total: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT Fecha, COALESCE(SUM(Cantidad * Precio_Unitario), 0) AS Total FROM inventario{where_sales} \
             GROUP BY Fecha ORDER BY Fecha ASC"
        ))?;
        let revenue_trend = stmt
            .query_map(params_from_iter(sales.params()), |row| {
                Ok(DailyRevenue {
                    date: row.get(0)?,
                    total: round2(row.get(1)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Dashboard {
            kpis: Kpis {
                total_revenue: round2(total_revenue),
                total_items,
                transactions,
            },
            revenue_by_seller,
            top_categories,
            revenue_trend,
            filters: FilterOptions {
                categories: self.categories()?,
                sellers: self.sellers()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(10.005_000_1), 10.01);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(0.0), 0.0);
    }
}
