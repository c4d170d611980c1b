//! Cell layout bindings
//!
//! The core table never looks inside a cell layout. UI integrations pick a
//! concrete layout type and alias the generic table with it; this module is
//! the plain-text one, used by terminal and log output.

use crate::model::Column;
use crate::model::Value;
use crate::table::Cell;
use crate::table::Table;

/// Formats a cell value as text.
pub type TextLayout = fn(&Value) -> String;

/// A table whose columns carry [`TextLayout`]s.
pub type TextTable<S> = Table<S, TextLayout>;

/// A column carrying a [`TextLayout`].
pub type TextColumn<K> = Column<K, TextLayout>;

/// Renders a projected cell with its layout, falling back to the value's
/// `Display` form.
pub fn render_cell<K>(cell: &Cell<'_, K, TextLayout>) -> String {
    match cell.cell_layout() {
        Some(layout) => layout(cell.value()),
        None => cell.value().to_string(),
    }
}
