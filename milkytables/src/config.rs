//! Table construction settings

use std::fmt;

use crate::model::Column;
use crate::model::RowData;
use crate::schema::Schema;
use crate::schema::Unchecked;

type KeyOf<S> = <<S as Schema>::Output as RowData>::Key;

/// Everything [`Table::create`](crate::table::Table::create) needs: the raw
/// initial rows, the column descriptors, and the schema that gates every value.
///
/// # Example
///
/// ```
/// use milkytables::TableConfig;
/// use milkytables::model::{Column, Record};
/// use milkytables::schema::{FieldKind, FieldRule, RecordSchema};
///
/// let schema = RecordSchema::new().field(FieldRule::new("name", FieldKind::String));
/// let config: TableConfig<RecordSchema> = TableConfig::new(schema)
///     .with_row(Record::new().set("name", "Jane"))
///     .with_column(Column::new("name".to_string(), "Name"));
///
/// assert_eq!(config.rows().len(), 1);
/// ```
pub struct TableConfig<S: Schema, L = (), H = String> {
    pub(crate) rows: Vec<S::Input>,
    pub(crate) columns: Vec<Column<KeyOf<S>, L, H>>,
    pub(crate) schema: S,
}

impl<S: Schema, L, H> TableConfig<S, L, H> {
    /// Creates an empty config validated by `schema`.
    pub fn new(schema: S) -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            schema,
        }
    }

    /// Appends one raw initial row.
    pub fn with_row(mut self, row: S::Input) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends raw initial rows, in order.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = S::Input>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Appends one column descriptor.
    pub fn with_column(mut self, column: Column<KeyOf<S>, L, H>) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends column descriptors, in display order.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column<KeyOf<S>, L, H>>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Returns the raw initial rows.
    pub fn rows(&self) -> &[S::Input] {
        &self.rows
    }

    /// Returns the column descriptors.
    pub fn columns(&self) -> &[Column<KeyOf<S>, L, H>] {
        &self.columns
    }

    /// Returns the schema.
    pub fn schema(&self) -> &S {
        &self.schema
    }
}

impl<V, L, H> TableConfig<Unchecked<V>, L, H>
where
    V: RowData + fmt::Debug,
{
    /// Creates an empty config without validation.
    pub fn unchecked() -> Self {
        Self::new(Unchecked::new())
    }
}

impl<S: Schema + Default, L, H> Default for TableConfig<S, L, H> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, L, H> fmt::Debug for TableConfig<S, L, H>
where
    S: Schema + fmt::Debug,
    L: fmt::Debug,
    H: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("schema", &self.schema)
            .finish()
    }
}
