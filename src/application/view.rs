//! Read-only snapshots handed to whatever draws the simulation.

/// Columns left blank between two fields on the same display row
pub const FIELD_GAP: usize = 2;

/// How displayed fields are arranged on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub fields_per_row: usize,
    pub rows_of_display: usize,
}

impl Layout {
    /// Fit `displayed_count` fields of `length` columns into `line_width`.
    /// Always at least one field per row.
    pub fn compute(length: usize, displayed_count: usize, line_width: usize) -> Self {
        let displayed_count = displayed_count.max(1);
        let fields_per_row = (line_width / (length + FIELD_GAP)).clamp(1, displayed_count);
        Self {
            fields_per_row,
            rows_of_display: displayed_count.div_ceil(fields_per_row),
        }
    }
}

/// One displayed grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    /// Position in the pool
    pub index: usize,
    pub alive_count: usize,
    pub dead_count: usize,
    pub generation: u64,
    /// Has at least one live cell
    pub alive: bool,
}

/// Pool-wide figures plus the displayed fields, in slot order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolView {
    pub generation: u64,
    pub total_count: usize,
    pub fields_alive: usize,
    pub total_alive_cells: usize,
    pub layout: Layout,
    pub fields: Vec<FieldView>,
}

impl PoolView {
    /// Displayed fields grouped into screen rows, at least one per row
    pub fn rows(&self) -> impl Iterator<Item = &[FieldView]> + '_ {
        self.fields.chunks(self.layout.fields_per_row.max(1))
    }
}
