//! Re-exports every shared type.
mod entity_kind;
mod field;
mod legacy_row;
mod records;
mod stats;

pub use entity_kind::EntityKind;
pub use field::Field;
pub use legacy_row::LegacyRow;
pub use records::{
    Address, NewCollection, NewFile, NewInstitution, NewRole, NewSchool, NewUser, STATUS_ACTIVE,
    STATUS_INACTIVE,
};
pub use stats::{EntityStats, MigrationStats};
