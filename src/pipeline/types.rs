use serde_json::Value;

/// One row of view data: a flat mapping from field name to primitive value,
/// exactly as the backend route returned it.
pub type Record = serde_json::Map<String, Value>;

/// Exact-match dropdown filter: `name` is the UI-facing filter name, `field`
/// the record field it compares against.
#[derive(Debug, Clone)]
pub struct CategoricalFilter {
    pub name: String,
    pub field: String,
}

/// Declarative description of one list view. Every page shares the same
/// pipeline behavior; only this configuration differs.
#[derive(Debug, Clone)]
pub struct ViewSpec {
    /// Field holding the unique row identifier (selection / bulk actions).
    pub id_field: String,
    /// Free-text fields matched by the search box.
    pub search_fields: Vec<String>,
    /// Exact-match categorical filters.
    pub filters: Vec<CategoricalFilter>,
    /// Timestamp field driving the fixed most-recent-first sort.
    pub sort_field: String,
    pub page_size: usize,
}

impl ViewSpec {
    pub fn new(id_field: impl Into<String>, sort_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            search_fields: vec![],
            filters: vec![],
            sort_field: sort_field.into(),
            page_size: 20,
        }
    }

    pub fn search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn filter(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.filters.push(CategoricalFilter { name: name.into(), field: field.into() });
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }
}

/// User-facing notification raised at the page boundary. Fetch failures
/// produce exactly one of these; nothing propagates further up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(msg) | Notice::Info(msg) => msg,
        }
    }
}
