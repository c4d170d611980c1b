//! Column descriptors

/// Binds a row field to a header label and an optional cell renderer.
///
/// `L` is an opaque renderer handle supplied by the UI layer. The table stores
/// it per column and hands it back in projections without ever inspecting it.
/// `H` is the header label; plain text by default, or any renderable header
/// type a UI binding wants to hand back from
/// [`get_header_labels`](crate::table::Table::get_header_labels).
///
/// # Example
///
/// ```
/// use milkytables::model::Column;
///
/// let columns: Vec<Column<String>> = vec![
///     Column::new("name".to_string(), "Name"),
///     Column::new("age".to_string(), "Age"),
/// ];
/// assert_eq!(columns[1].label(), "Age");
///
/// #[derive(Debug, PartialEq)]
/// enum Header {
///     Icon(&'static str),
/// }
///
/// let icon: Column<String, (), Header> = Column::with_header("age".to_string(), Header::Icon("clock"));
/// assert_eq!(icon.label(), &Header::Icon("clock"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column<K, L = (), H = String> {
    key: K,
    label: H,
    cell_layout: Option<L>,
}

impl<K, L> Column<K, L> {
    /// Creates a column with a text label and no cell layout.
    pub fn new(key: K, label: impl Into<String>) -> Self {
        Self::with_header(key, label.into())
    }
}

impl<K, L, H> Column<K, L, H> {
    /// Creates a column with an arbitrary header label and no cell layout.
    pub fn with_header(key: K, label: H) -> Self {
        Self {
            key,
            label,
            cell_layout: None,
        }
    }

    /// Attaches a cell layout (builder pattern).
    pub fn with_cell_layout(mut self, layout: L) -> Self {
        self.cell_layout = Some(layout);
        self
    }

    /// Returns the projected field key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the header label.
    pub fn label(&self) -> &H {
        &self.label
    }

    /// Returns the cell layout, if any.
    pub fn cell_layout(&self) -> Option<&L> {
        self.cell_layout.as_ref()
    }
}
