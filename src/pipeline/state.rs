use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::error::PipelineError;
use super::types::{Notice, Record, ViewSpec};

/// Per-view list state: raw fetched records plus search, categorical filters,
/// pagination and selection, kept mutually consistent as inputs change.
///
/// One instance per page, driven from a single logical thread. The filtered
/// (not the visible) set is what exports consume.
pub struct ListPipeline {
    spec: ViewSpec,
    records: Vec<Record>,
    search: String,
    active_filters: BTreeMap<String, String>,
    page: usize,
    selected: BTreeSet<String>,
    notices: Vec<Notice>,
}

impl ListPipeline {
    pub fn new(spec: ViewSpec) -> Self {
        Self {
            spec,
            records: Vec::new(),
            search: String::new(),
            active_filters: BTreeMap::new(),
            page: 1,
            selected: BTreeSet::new(),
            notices: Vec::new(),
        }
    }

    // ── Fetch ───────────────────────────────────────────────────────────

    /// Consume a `{success, data|error}` envelope from the backend route.
    ///
    /// Fails closed: on `success: false` or a malformed body the record set
    /// stays empty and exactly one error notice is raised. There is no retry;
    /// the caller re-ingests on manual refresh.
    pub fn ingest(&mut self, envelope: Value) -> Result<usize, PipelineError> {
        if envelope.get("success").and_then(Value::as_bool) == Some(false) {
            let message = envelope
                .get("error")
                .or_else(|| envelope.get("errors"))
                .and_then(Value::as_str)
                .unwrap_or("Failed to fetch data")
                .to_string();
            return Err(self.fail(PipelineError::Upstream(message)));
        }

        let rows = match envelope.get("data").and_then(Value::as_array) {
            Some(rows) => rows,
            None => return Err(self.fail(PipelineError::Shape)),
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match row.as_object() {
                Some(obj) => records.push(obj.clone()),
                // One bad element poisons the whole payload
                None => return Err(self.fail(PipelineError::Shape)),
            }
        }

        let count = records.len();
        self.records = records;
        self.page = 1;
        self.selected.clear();
        Ok(count)
    }

    /// Record a non-2xx transport failure for this page load.
    pub fn ingest_transport_failure(&mut self, status: u16, body: impl Into<String>) {
        let err = PipelineError::Transport { status, body: body.into() };
        self.fail(err);
    }

    /// Wholesale refresh after a manual reload.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.page = 1;
        self.selected.clear();
    }

    fn fail(&mut self, err: PipelineError) -> PipelineError {
        self.records.clear();
        self.page = 1;
        self.selected.clear();
        self.notices.push(Notice::Error(format!("Error fetching data: {err}")));
        err
    }

    /// Drain pending user-facing notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── Filtering ───────────────────────────────────────────────────────

    pub fn set_search(&mut self, needle: impl Into<String>) {
        self.search = needle.into();
        self.page = 1;
        self.revalidate_selection();
    }

    /// Select a categorical filter value, or clear it with `None`.
    pub fn set_filter(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => {
                self.active_filters.insert(name.to_string(), v.to_string());
            }
            _ => {
                self.active_filters.remove(name);
            }
        }
        self.page = 1;
        self.revalidate_selection();
    }

    /// Search + categorical predicates applied, sorted most-recent-first.
    /// Equal timestamps keep their fetch order; missing timestamps sort last.
    pub fn filtered(&self) -> Vec<&Record> {
        let needle = self.search.trim().to_lowercase();

        let mut rows: Vec<&Record> = self
            .records
            .iter()
            .filter(|rec| self.matches_search(rec, &needle) && self.matches_filters(rec))
            .collect();

        rows.sort_by_key(|rec| {
            std::cmp::Reverse(timestamp_millis(rec.get(&self.spec.sort_field)))
        });
        rows
    }

    fn matches_search(&self, rec: &Record, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.spec.search_fields.iter().any(|field| {
            rec.get(field)
                .map(|v| value_text(v).to_lowercase().contains(needle))
                .unwrap_or(false)
        })
    }

    fn matches_filters(&self, rec: &Record) -> bool {
        self.spec.filters.iter().all(|filter| {
            match self.active_filters.get(&filter.name) {
                None => true,
                Some(wanted) => rec
                    .get(&filter.field)
                    .map(|v| value_text(v).eq_ignore_ascii_case(wanted))
                    .unwrap_or(false),
            }
        })
    }

    // ── Pagination ──────────────────────────────────────────────────────

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        let filtered = self.filtered().len();
        std::cmp::max(1, filtered.div_ceil(self.spec.page_size))
    }

    /// Rows for the current page; never more than `page_size` entries.
    pub fn visible(&self) -> Vec<&Record> {
        let start = (self.page - 1) * self.spec.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.spec.page_size)
            .collect()
    }

    /// Out-of-range requests are no-ops (the UI disables the buttons).
    pub fn goto_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.page = page;
            self.revalidate_selection();
        }
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.goto_page(self.page - 1);
        }
    }

    // ── Selection ───────────────────────────────────────────────────────

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    fn visible_ids(&self) -> Vec<String> {
        self.visible()
            .iter()
            .filter_map(|rec| rec.get(&self.spec.id_field))
            .map(value_text)
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Toggle one row. Only identifiers rendered on the current page are
    /// selectable.
    pub fn toggle_select(&mut self, id: &str) {
        if !self.selected.remove(id) && self.visible_ids().iter().any(|v| v == id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Page-scoped select-all: selects every row on the current page, or
    /// clears the selection entirely when the page is already fully selected.
    pub fn toggle_select_all(&mut self) {
        let ids = self.visible_ids();
        if !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id)) {
            self.selected.clear();
        } else {
            self.selected = ids.into_iter().collect();
        }
    }

    fn revalidate_selection(&mut self) {
        let ids: BTreeSet<String> = self.visible_ids().into_iter().collect();
        self.selected.retain(|id| ids.contains(id));
    }

    /// Gate a bulk action on a non-empty selection. With nothing checked an
    /// informational notice (e.g. "Please select at least one activity.") is
    /// raised and the caller skips the action.
    pub fn require_selection(&mut self, message: &str) -> bool {
        if self.selected.is_empty() {
            self.notices.push(Notice::Info(message.to_string()));
            return false;
        }
        true
    }

    // ── Confirmed mutations ─────────────────────────────────────────────

    /// Splice out rows the backend confirmed as deleted, without a refetch.
    /// Never call this before the mutation route reports success.
    pub fn remove_confirmed(&mut self, ids: &[String]) -> usize {
        let id_field = self.spec.id_field.clone();
        let before = self.records.len();
        self.records.retain(|rec| {
            rec.get(&id_field)
                .map(|v| !ids.iter().any(|id| *id == value_text(v)))
                .unwrap_or(true)
        });
        for id in ids {
            self.selected.remove(id);
        }
        self.page = self.page.min(self.total_pages());
        before - self.records.len()
    }

    /// Swap in an edited row after the backend confirmed the write.
    pub fn replace_confirmed(&mut self, id: &str, record: Record) -> bool {
        let id_field = self.spec.id_field.clone();
        for rec in &mut self.records {
            if rec.get(&id_field).map(|v| value_text(v) == id).unwrap_or(false) {
                *rec = record;
                return true;
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Render a primitive JSON value the way the views compare and display it.
fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Timestamp for sorting: RFC 3339 or `YYYY-MM-DD HH:MM:SS` strings, or a
/// numeric epoch. Anything unparsable counts as the epoch and sorts oldest.
fn timestamp_millis(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::String(s)) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.timestamp_millis())
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .map(|dt| dt.and_utc().timestamp_millis())
            })
            .unwrap_or(0),
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        _ => 0,
    }
}
