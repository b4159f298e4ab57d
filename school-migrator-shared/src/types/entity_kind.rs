use std::fmt;

use serde::{Deserialize, Serialize};

/// The five entity types copied from the legacy database.
///
/// The declaration order is the migration order: institutions and schools
/// must exist before users reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Institutions,
    Schools,
    Users,
    Files,
    Collections,
}

impl EntityKind {
    /// Every entity kind, in dependency order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Institutions,
        EntityKind::Schools,
        EntityKind::Users,
        EntityKind::Files,
        EntityKind::Collections,
    ];

    /// Name of the legacy (MySQL) table holding rows of this kind.
    pub fn source_table(&self) -> &'static str {
        match self {
            EntityKind::Institutions => "instituicoes",
            EntityKind::Schools => "escolas",
            EntityKind::Users => "usuarios",
            EntityKind::Files => "arquivos",
            EntityKind::Collections => "colecoes",
        }
    }

    /// Name of the target (PostgreSQL) table rows of this kind are inserted into.
    pub fn target_table(&self) -> &'static str {
        match self {
            EntityKind::Institutions => "institutions",
            EntityKind::Schools => "schools",
            EntityKind::Users => "users",
            EntityKind::Files => "files",
            EntityKind::Collections => "collections",
        }
    }

    /// Human readable label used in progress lines and the summary.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Institutions => "Institutions",
            EntityKind::Schools => "Schools",
            EntityKind::Users => "Users",
            EntityKind::Files => "Files",
            EntityKind::Collections => "Collections",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
