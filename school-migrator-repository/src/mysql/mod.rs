//! MySQL implementation of the legacy source.
mod legacy_source;
mod row;

pub use legacy_source::MySqlLegacySource;
pub use row::decode_row;
