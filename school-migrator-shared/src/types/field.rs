//! Ordered column aliases for a single logical field.
//!
//! Legacy exports are inconsistent: a column may carry its original
//! Portuguese name (`nome`) or an English name left behind by an earlier,
//! partial migration (`name`). A `Field` lists every accepted spelling in
//! priority order so that the lookup is declared once per entity instead of
//! being repeated as conditional chains inside each transform.

/// A logical field resolved by trying each column name in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Column names, highest priority first.
    pub names: &'static [&'static str],
}

impl Field {
    /// Creates a field from its aliases, highest priority first.
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// The preferred (first) column name, used in error messages.
    pub fn primary(&self) -> &'static str {
        self.names.first().copied().unwrap_or("")
    }
}
