//! Capture of engine `tracing` events into column-oriented tables.
//!
//! Each tracing target becomes a table; each event field becomes a column,
//! created the first time it is seen. Every row also gets a `level` column so
//! diagnostics (WARN) can be told apart from estimate records (INFO).
//!
//! ```ignore
//! // Engine side:
//! tracing::info!(target: "estimate", side = "Buy", fill_pct, slippage_pct);
//!
//! // Test side:
//! tracing::subscriber::with_default(instrument::EventSubscriber, || { /* run */ });
//! let captured = instrument::drain();
//! let estimates = &captured.tables["estimate"];
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

pub const LEVEL_COLUMN: &str = "level";

/// Values of one field across all rows of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::U64(v) => v.len(),
            ColumnData::I64(v) => v.len(),
            ColumnData::F64(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pad_to(&mut self, rows: usize) {
        let missing = rows.saturating_sub(self.len());
        if missing == 0 {
            return;
        }
        match self {
            ColumnData::U64(v) => v.extend(std::iter::repeat_n(0, missing)),
            ColumnData::I64(v) => v.extend(std::iter::repeat_n(0, missing)),
            ColumnData::F64(v) => v.extend(std::iter::repeat_n(f64::NAN, missing)),
            ColumnData::Bool(v) => v.extend(std::iter::repeat_n(false, missing)),
            ColumnData::Str(v) => v.extend(std::iter::repeat_n(String::new(), missing)),
        }
    }
}

/// Rows recorded under one tracing target.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    pub columns: HashMap<String, ColumnData>,
    pub rows: usize,
}

impl EventTable {
    /// Bring every column up to the current row count. Absent floats pad with
    /// NaN so a missing measurement is never mistaken for a zero.
    fn align(&mut self) {
        for column in self.columns.values_mut() {
            column.pad_to(self.rows);
        }
    }

    pub fn f64s(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name)? {
            ColumnData::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn strs(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(name)? {
            ColumnData::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn bools(&self, name: &str) -> Option<&[bool]> {
        match self.columns.get(name)? {
            ColumnData::Bool(v) => Some(v),
            _ => None,
        }
    }
}

/// All tables captured on the current thread, keyed by target.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub tables: HashMap<String, EventTable>,
}

thread_local! {
    static CAPTURED: RefCell<Captured> = RefCell::default();
}

struct RowVisitor<'a> {
    table: &'a mut EventTable,
}

impl RowVisitor<'_> {
    fn column(&mut self, field: &Field, empty: impl FnOnce(usize) -> ColumnData) -> &mut ColumnData {
        let rows = self.table.rows;
        self.table
            .columns
            .entry(field.name().to_string())
            .or_insert_with(|| empty(rows))
    }
}

impl Visit for RowVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if let ColumnData::U64(v) = self.column(field, |rows| ColumnData::U64(vec![0; rows])) {
            v.push(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if let ColumnData::I64(v) = self.column(field, |rows| ColumnData::I64(vec![0; rows])) {
            v.push(value);
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let ColumnData::F64(v) = self.column(field, |rows| ColumnData::F64(vec![f64::NAN; rows])) {
            v.push(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if let ColumnData::Bool(v) = self.column(field, |rows| ColumnData::Bool(vec![false; rows])) {
            v.push(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let ColumnData::Str(v) = self.column(field, |rows| ColumnData::Str(vec![String::new(); rows])) {
            v.push(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Subscriber that appends every INFO-or-more-severe event to the
/// thread-local capture. Spans are ignored.
pub struct EventSubscriber;

impl Subscriber for EventSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let metadata = event.metadata();
        let target = metadata.target().to_string();

        CAPTURED.with(|c| {
            let mut captured = c.borrow_mut();
            let table = captured.tables.entry(target).or_default();
            table.align();

            let rows = table.rows;
            if let ColumnData::Str(levels) = table
                .columns
                .entry(LEVEL_COLUMN.to_string())
                .or_insert_with(|| ColumnData::Str(vec![String::new(); rows]))
            {
                levels.push(metadata.level().to_string());
            }
            event.record(&mut RowVisitor { table: &mut *table });

            table.rows += 1;
            table.align();
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Install `EventSubscriber` process-wide. Later calls are ignored.
pub fn install() {
    let _ = tracing::subscriber::set_global_default(EventSubscriber);
}

/// Take everything captured on this thread so far.
pub fn drain() -> Captured {
    CAPTURED.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

pub fn clear() {
    CAPTURED.with(|c| *c.borrow_mut() = Captured::default());
}

// === Polars Integration ===

use polars::prelude::*;

impl EventTable {
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut names: Vec<&String> = self.columns.keys().collect();
        names.sort();

        let columns: Vec<polars::prelude::Column> = names
            .into_iter()
            .map(|name| match &self.columns[name] {
                ColumnData::U64(v) => polars::prelude::Column::new(name.into(), v),
                ColumnData::I64(v) => polars::prelude::Column::new(name.into(), v),
                ColumnData::F64(v) => polars::prelude::Column::new(name.into(), v),
                ColumnData::Bool(v) => polars::prelude::Column::new(name.into(), v),
                ColumnData::Str(v) => polars::prelude::Column::new(name.into(), v),
            })
            .collect();

        DataFrame::new(columns)
    }
}

impl Captured {
    pub fn to_dataframes(&self) -> HashMap<String, DataFrame> {
        self.tables
            .iter()
            .filter_map(|(name, table)| table.to_dataframe().ok().map(|df| (name.clone(), df)))
            .collect()
    }
}

pub fn drain_to_dataframes() -> HashMap<String, DataFrame> {
    drain().to_dataframes()
}

/// Write each frame to `{dir}/{target}.parquet`.
pub fn save_parquet(dfs: &mut HashMap<String, DataFrame>, dir: &std::path::Path) -> PolarsResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| PolarsError::IO {
        error: e.into(),
        msg: None,
    })?;
    for (name, df) in dfs.iter_mut() {
        let file = std::fs::File::create(dir.join(format!("{}.parquet", name))).map_err(|e| {
            PolarsError::IO {
                error: e.into(),
                msg: None,
            }
        })?;
        ParquetWriter::new(file).finish(df)?;
    }
    Ok(())
}

/// Per side and order type: how many estimates ran, mean fill and slippage,
/// worst impact. Expects the `estimate` table.
pub fn estimate_summary(estimates: &DataFrame) -> PolarsResult<DataFrame> {
    estimates
        .clone()
        .lazy()
        .group_by([col("side"), col("order_type")])
        .agg([
            col("fill_pct").count().alias("count"),
            col("fill_pct").mean().alias("mean_fill_pct"),
            col("slippage_pct").mean().alias("mean_slippage_pct"),
            col("impact_pct").max().alias("max_impact_pct"),
        ])
        .sort(["side", "order_type"], SortMultipleOptions::default())
        .collect()
}

/// Clears the capture and installs the subscriber on creation; on drop,
/// writes whatever was captured to `{parent}/{name}/` when a parent directory
/// was given.
///
/// ```ignore
/// let mut session = instrument::CaptureSession::persisted("data", "depth_sweep");
/// // ... run estimates ...
/// let frames = session.frames();
/// ```
pub struct CaptureSession {
    out_dir: Option<std::path::PathBuf>,
    frames: Option<HashMap<String, DataFrame>>,
}

impl CaptureSession {
    /// In-memory only.
    pub fn new() -> Self {
        clear();
        install();
        Self {
            out_dir: None,
            frames: None,
        }
    }

    pub fn persisted(parent: impl Into<std::path::PathBuf>, name: &str) -> Self {
        let mut session = Self::new();
        session.out_dir = Some(parent.into().join(sanitize(name)));
        session
    }

    /// Drains on first call, cached afterwards.
    pub fn frames(&mut self) -> &HashMap<String, DataFrame> {
        self.frames.get_or_insert_with(drain_to_dataframes)
    }

    pub fn out_dir(&self) -> Option<&std::path::Path> {
        self.out_dir.as_deref()
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        let Some(dir) = self.out_dir.take() else {
            return;
        };
        let mut frames = self.frames.take().unwrap_or_else(drain_to_dataframes);
        if frames.is_empty() {
            return;
        }
        if let Err(e) = save_parquet(&mut frames, &dir) {
            eprintln!("CaptureSession: failed to write {}: {}", dir.display(), e);
        }
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(60)
        .collect()
}
