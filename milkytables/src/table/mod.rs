//! The immutable table
//!
//! A [`Table`] owns an ordered row sequence and its column descriptors. Every
//! operation borrows the table and returns a new one: earlier tables, and any
//! projection borrowed from them, stay valid and unchanged.
//!
//! # Example
//!
//! ```
//! use milkytables::{Direction, PlainTable, Table, TableConfig};
//! use milkytables::model::{Column, Record, RowId};
//!
//! let table: PlainTable<Record> = Table::create(
//!     TableConfig::unchecked()
//!         .with_row(Record::new().set("name", "John").set("age", 20))
//!         .with_row(Record::new().set("name", "Jane").set("age", 21))
//!         .with_column(Column::new("name".to_string(), "Name"))
//!         .with_column(Column::new("age".to_string(), "Age")),
//! )?;
//!
//! let table = table.add(Record::new().set("name", "Amy").set("age", 19))?;
//! let sorted = table.sort_by_column(&"age".to_string(), Direction::Asc);
//!
//! assert_eq!(sorted.ids(), vec![RowId(2), RowId(0), RowId(1)]);
//! assert_eq!(table.ids(), vec![RowId(0), RowId(1), RowId(2)]);
//! # Ok::<(), milkytables::Error>(())
//! ```

mod projection;
mod sort;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;
use log::trace;

pub use projection::Cell;
pub use projection::HeaderLabels;
pub use projection::ProjectedRow;
pub use sort::Direction;
pub use sort::ParseDirectionError;

use crate::config::TableConfig;
use crate::error::Error;
use crate::error::Result;
use crate::error::ValidationError;
use crate::model::Column;
use crate::model::Row;
use crate::model::RowData;
use crate::model::RowId;
use crate::schema::Schema;
use crate::schema::Unchecked;

type ValueOf<S> = <S as Schema>::Output;
type KeyOf<S> = <<S as Schema>::Output as RowData>::Key;

/// Immutable, schema-gated collection of identified rows.
///
/// `S` is the [`Schema`] every inserted value passes through; its output type
/// is the stored row type. `L` is the opaque cell-layout handle carried by the
/// columns.
pub struct Table<S: Schema, L = (), H = String> {
    rows: Arc<[Row<ValueOf<S>>]>,
    columns: Arc<[Column<KeyOf<S>, L, H>]>,
    schema: Arc<S>,
}

/// A table without validation.
pub type PlainTable<V, L = (), H = String> = Table<Unchecked<V>, L, H>;

impl<S: Schema, L, H> Table<S, L, H> {
    /// Builds a table from `config`.
    ///
    /// Raw rows are parsed in order and receive ids `0, 1, 2, …`. The first
    /// rejected row aborts construction. Two columns with the same key are
    /// rejected with [`Error::DuplicateColumn`].
    pub fn create(config: TableConfig<S, L, H>) -> Result<Self> {
        let TableConfig {
            rows: raw_rows,
            columns,
            schema,
        } = config;

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.key()) {
                return Err(Error::DuplicateColumn(format!("{:?}", column.key())));
            }
        }

        let mut rows = Vec::with_capacity(raw_rows.len());
        let mut next = Some(RowId::FIRST);
        for (index, raw) in raw_rows.into_iter().enumerate() {
            let value = parse(&schema, raw).map_err(|err| err.at_index(index))?;
            let id = next.ok_or(Error::IdExhausted)?;
            rows.push(Row::new(id, value));
            next = id.next();
        }

        debug!(
            "created table with {} rows and {} columns",
            rows.len(),
            columns.len()
        );

        Ok(Self {
            rows: rows.into(),
            columns: columns.into(),
            schema: Arc::new(schema),
        })
    }

    // =========================================================================
    // Mutations (each returns a new table)
    // =========================================================================

    /// Appends a validated row under the next id.
    pub fn add(&self, raw: S::Input) -> Result<Self> {
        let value = parse(self.schema(), raw)?;
        let id = self.next_id()?;
        debug!("add: appending row {id}");

        let mut rows = self.rows.to_vec();
        rows.push(Row::new(id, value));
        Ok(self.with_rows(rows))
    }

    /// Replaces the value of row `id`, keeping its position.
    ///
    /// The new value is validated even when `id` is absent; an absent id is
    /// then a no-op, not an error.
    pub fn update(&self, id: RowId, raw: S::Input) -> Result<Self> {
        let value = Arc::new(parse(self.schema(), raw)?);

        if !self.contains(id) {
            trace!("update: row {id} not present, table unchanged");
            return Ok(self.clone());
        }
        debug!("update: replacing row {id}");

        let rows = self
            .rows
            .iter()
            .map(|row| {
                if row.id() == id {
                    Row::with_shared(id, Arc::clone(&value))
                } else {
                    row.clone()
                }
            })
            .collect::<Vec<_>>();
        Ok(self.with_rows(rows))
    }

    /// Removes row `id`. An absent id is a no-op.
    pub fn delete(&self, id: RowId) -> Self {
        if !self.contains(id) {
            trace!("delete: row {id} not present, table unchanged");
            return self.clone();
        }
        debug!("delete: removing row {id}");

        let rows = self
            .rows
            .iter()
            .filter(|row| row.id() != id)
            .cloned()
            .collect::<Vec<_>>();
        self.with_rows(rows)
    }

    /// Appends a duplicate of row `id` under the next id.
    ///
    /// Fails with [`Error::RowNotFound`] if `id` is absent. The copy shares its
    /// value with the source row and is always placed last.
    pub fn copy(&self, id: RowId) -> Result<Self> {
        let source = self.get(id).ok_or(Error::RowNotFound(id))?;
        let new_id = self.next_id()?;
        debug!("copy: duplicating row {id} as {new_id}");

        let copied = Row::with_shared(new_id, Arc::clone(source.shared_value()));
        let mut rows = self.rows.to_vec();
        rows.push(copied);
        Ok(self.with_rows(rows))
    }

    /// Returns a table with no rows, the same columns and the same schema.
    pub fn clear_all(&self) -> Self {
        debug!("clear_all: dropping {} rows", self.rows.len());
        self.with_rows(Vec::new())
    }

    /// Returns a table with rows ordered by the value at `key`.
    ///
    /// The sort is stable: rows with equal values keep their current relative
    /// order in both directions. Values are compared with
    /// [`Value::sort_cmp`](crate::model::Value::sort_cmp), which orders mixed
    /// kinds deterministically. Sorting never consults the schema.
    pub fn sort_by_column(&self, key: &KeyOf<S>, direction: Direction) -> Self {
        debug!("sort_by_column: {key:?} {direction}");

        let mut keyed = self
            .rows
            .iter()
            .map(|row| (row.value().field(key), row.clone()))
            .collect::<Vec<_>>();

        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = a.sort_cmp(b);
            match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });

        self.with_rows(keyed.into_iter().map(|(_, row)| row).collect())
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Projects every row onto the columns, in column declaration order.
    pub fn get_rows(&self) -> Vec<ProjectedRow<'_, KeyOf<S>, L>> {
        self.rows
            .iter()
            .map(|row| {
                let cells = self
                    .columns
                    .iter()
                    .map(|column| {
                        Cell::new(
                            column.key(),
                            row.value().field(column.key()),
                            column.cell_layout(),
                        )
                    })
                    .collect();
                ProjectedRow::new(row.id(), cells)
            })
            .collect()
    }

    /// Maps each column key to its label, in column declaration order.
    pub fn get_header_labels(&self) -> HeaderLabels<'_, KeyOf<S>, H> {
        HeaderLabels::new(
            self.columns
                .iter()
                .map(|column| (column.key(), column.label()))
                .collect(),
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the rows in table order.
    pub fn rows(&self) -> &[Row<ValueOf<S>>] {
        &self.rows
    }

    /// Returns the row ids in table order.
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(Row::id).collect()
    }

    /// Returns the row with `id`.
    pub fn get(&self, id: RowId) -> Option<&Row<ValueOf<S>>> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Returns `true` if a row has `id`.
    pub fn contains(&self, id: RowId) -> bool {
        self.rows.iter().any(|row| row.id() == id)
    }

    pub fn columns(&self) -> &[Column<KeyOf<S>, L, H>] {
        &self.columns
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the id the next added or copied row would receive: the largest
    /// id plus one, or 0 for an empty table.
    pub fn next_id(&self) -> Result<RowId> {
        match self.rows.iter().map(Row::id).max() {
            None => Ok(RowId::FIRST),
            Some(max) => max.next().ok_or(Error::IdExhausted),
        }
    }

    /// Returns `true` if both tables share the same column allocation, which
    /// holds for every table of one lineage.
    pub fn shares_columns_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.columns, &other.columns)
    }

    fn with_rows(&self, rows: Vec<Row<ValueOf<S>>>) -> Self {
        Self {
            rows: rows.into(),
            columns: Arc::clone(&self.columns),
            schema: Arc::clone(&self.schema),
        }
    }
}

fn parse<S: Schema>(schema: &S, raw: S::Input) -> std::result::Result<S::Output, ValidationError> {
    schema.parse(raw).map_err(|rejected| {
        debug!("schema rejected row value: {rejected}");
        ValidationError::from(rejected)
    })
}

impl<S: Schema, L, H> Clone for Table<S, L, H> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            columns: Arc::clone(&self.columns),
            schema: Arc::clone(&self.schema),
        }
    }
}

impl<S, L, H> fmt::Debug for Table<S, L, H>
where
    S: Schema + fmt::Debug,
    S::Output: fmt::Debug,
    L: fmt::Debug,
    H: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("schema", &self.schema)
            .finish()
    }
}
