//! Read-only projections of a table

use crate::model::RowId;
use crate::model::Value;

/// One projected cell: the field value plus the column's cell layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a, K, L> {
    key: &'a K,
    value: Value,
    cell_layout: Option<&'a L>,
}

impl<'a, K, L> Cell<'a, K, L> {
    pub(crate) fn new(key: &'a K, value: Value, cell_layout: Option<&'a L>) -> Self {
        Self {
            key,
            value,
            cell_layout,
        }
    }

    pub fn key(&self) -> &'a K {
        self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn cell_layout(&self) -> Option<&'a L> {
        self.cell_layout
    }
}

/// A display-ready row: one [`Cell`] per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow<'a, K, L> {
    id: RowId,
    cells: Vec<Cell<'a, K, L>>,
}

impl<'a, K: PartialEq, L> ProjectedRow<'a, K, L> {
    pub(crate) fn new(id: RowId, cells: Vec<Cell<'a, K, L>>) -> Self {
        Self { id, cells }
    }

    /// Id of the source row, for wiring UI actions back to the table.
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[Cell<'a, K, L>] {
        &self.cells
    }

    /// Returns the cell for `key`, if a column projects it.
    pub fn get(&self, key: &K) -> Option<&Cell<'a, K, L>> {
        self.cells.iter().find(|cell| cell.key == key)
    }

    /// Returns the value for `key`, if a column projects it.
    pub fn value(&self, key: &K) -> Option<&Value> {
        self.get(key).map(Cell::value)
    }
}

/// Column key to header label, in column declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels<'a, K, H = String> {
    labels: Vec<(&'a K, &'a H)>,
}

impl<'a, K: PartialEq, H> HeaderLabels<'a, K, H> {
    pub(crate) fn new(labels: Vec<(&'a K, &'a H)>) -> Self {
        Self { labels }
    }

    /// Returns the label for `key`.
    pub fn get(&self, key: &K) -> Option<&'a H> {
        self.labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, label)| *label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a K, &'a H)> + '_ {
        self.labels.iter().copied()
    }

    /// Returns the labels alone, in order.
    pub fn labels(&self) -> Vec<&'a H> {
        self.labels.iter().map(|(_, label)| *label).collect()
    }
}
