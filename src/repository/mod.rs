//! Storage contract for clips and the sort-key table shared by every backend.

mod memory;
mod migrate;
mod sqlite;

pub use memory::MemoryClipRepository;
pub use sqlite::SqliteClipRepository;

use std::cmp::Ordering;

use crate::clip::{Clip, ClipId};
use crate::error::Result;

pub const DEFAULT_SORT_KEY: &str = "createdAtDesc";

/// Persistence operations the service relies on.
pub trait ClipRepository {
    /// Fails with `NotFound` when no clip has this id.
    fn find_by_id(&self, id: ClipId) -> Result<Clip>;

    /// Stores a new clip and returns the id assigned to it. The id on `clip` is ignored.
    fn create(&mut self, clip: &Clip) -> Result<ClipId>;

    /// Replaces every field of the stored clip with the same id.
    fn update(&mut self, clip: &Clip) -> Result<()>;

    /// Removes the clip permanently.
    fn delete(&mut self, clip: &Clip) -> Result<()>;

    /// Clips whose status equals `is_active`, ordered by `order_key`.
    /// An unknown key lists in storage order.
    fn list_by_status(&self, is_active: bool, order_key: &str) -> Result<Vec<Clip>>;

    /// Stores a copy of clip `id` with fresh timestamps and returns the new id.
    fn duplicate(&mut self, id: ClipId) -> Result<ClipId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    LastUsedAt,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::LastUsedAt => "last_used_at",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::CreatedAt => "Created",
            SortField::UpdatedAt => "Updated",
            SortField::LastUsedAt => "Last used",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub ascending: bool,
}

impl SortKey {
    pub const ALL: [(&'static str, SortKey); 6] = [
        ("createdAtDesc", SortKey::desc(SortField::CreatedAt)),
        ("createdAtAsc", SortKey::asc(SortField::CreatedAt)),
        ("updatedAtDesc", SortKey::desc(SortField::UpdatedAt)),
        ("updatedAtAsc", SortKey::asc(SortField::UpdatedAt)),
        ("lastUsedAtDesc", SortKey::desc(SortField::LastUsedAt)),
        ("lastUsedAtAsc", SortKey::asc(SortField::LastUsedAt)),
    ];

    const fn desc(field: SortField) -> Self {
        Self { field, ascending: false }
    }

    const fn asc(field: SortField) -> Self {
        Self { field, ascending: true }
    }

    /// `None` for empty or unrecognized keys.
    pub fn parse(key: &str) -> Option<SortKey> {
        Self::ALL
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, sort)| *sort)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|(name, _)| *name)
    }

    /// SQL `ORDER BY` clause; ties fall back to id in the same direction.
    pub fn order_by(self) -> String {
        let dir = if self.ascending { "ASC" } else { "DESC" };
        format!("ORDER BY {col} {dir}, id {dir}", col = self.field.column())
    }

    pub fn compare(self, a: &Clip, b: &Clip) -> Ordering {
        let ord = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::LastUsedAt => a.last_used_at.cmp(&b.last_used_at),
        }
        .then(a.id.cmp(&b.id));
        if self.ascending { ord } else { ord.reverse() }
    }
}
