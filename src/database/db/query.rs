/// A PostgREST table query: `GET /rest/v1/<table>?select=..&col=eq.val&order=..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub table: String,
    pub columns: Option<String>,
    pub filters: Vec<Filter>,
    pub order: Vec<(String, bool)>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(String, String),
    Neq(String, String),
    Gte(String, String),
    Lte(String, String),
    In(String, Vec<String>),
    IsNull(String),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(c, _)
            | Filter::Neq(c, _)
            | Filter::Gte(c, _)
            | Filter::Lte(c, _)
            | Filter::In(c, _)
            | Filter::IsNull(c) => c,
        }
    }

    fn operand(&self) -> String {
        match self {
            Filter::Eq(_, v) => format!("eq.{v}"),
            Filter::Neq(_, v) => format!("neq.{v}"),
            Filter::Gte(_, v) => format!("gte.{v}"),
            Filter::Lte(_, v) => format!("lte.{v}"),
            Filter::In(_, vs) => {
                let items: Vec<String> = vs.iter().map(|v| quote_list_item(v)).collect();
                format!("in.({})", items.join(","))
            }
            Filter::IsNull(_) => "is.null".to_string(),
        }
    }
}

// PostgREST list items containing reserved characters must be double-quoted.
fn quote_list_item(v: &str) -> String {
    if v.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        v.to_string()
    }
}

impl TableQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.to_string()));
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Neq(column.into(), value.to_string()));
        self
    }

    pub fn gte(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Gte(column.into(), value.to_string()));
        self
    }

    pub fn lte(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Lte(column.into(), value.to_string()));
        self
    }

    pub fn is_in<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.filters.push(Filter::In(column.into(), values));
        self
    }

    pub fn is_null(mut self, column: impl Into<String>) -> Self {
        self.filters.push(Filter::IsNull(column.into()));
        self
    }

    /// Adds `eq` only when a value is given.
    pub fn eq_opt<V: ToString>(self, column: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push((column.into(), ascending));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Query-string pairs in PostgREST syntax.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        params.push((
            "select".to_string(),
            self.columns.clone().unwrap_or_else(|| "*".to_string()),
        ));
        for f in &self.filters {
            params.push((f.column().to_string(), f.operand()));
        }
        if !self.order.is_empty() {
            let order: Vec<String> = self
                .order
                .iter()
                .map(|(c, asc)| format!("{c}.{}", if *asc { "asc" } else { "desc" }))
                .collect();
            params.push(("order".to_string(), order.join(",")));
        }
        if let Some(n) = self.limit {
            params.push(("limit".to_string(), n.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_postgrest_params() {
        let q = TableQuery::new("fixed_assets")
            .select("asset_id,asset_name")
            .eq("company_id", "c1")
            .eq_opt("store_id", None::<&str>)
            .gte("acquisition_date", "2024-01-01")
            .is_null("deleted_at")
            .order("acquisition_date", false)
            .order("asset_name", true)
            .limit(50);

        assert_eq!(
            q.to_params(),
            vec![
                ("select".to_string(), "asset_id,asset_name".to_string()),
                ("company_id".to_string(), "eq.c1".to_string()),
                ("acquisition_date".to_string(), "gte.2024-01-01".to_string()),
                ("deleted_at".to_string(), "is.null".to_string()),
                ("order".to_string(), "acquisition_date.desc,asset_name.asc".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn quotes_reserved_list_items() {
        let q = TableQuery::new("accounts").is_in("account_type", ["asset", "a,b"]);
        assert_eq!(q.to_params()[1].1, "in.(asset,\"a,b\")");
    }

    #[test]
    fn selects_everything_by_default() {
        assert_eq!(
            TableQuery::new("accounts").to_params(),
            vec![("select".to_string(), "*".to_string())]
        );
    }
}
