//! Id generation for list field entries

use uuid::Uuid;

/// Source of fresh ids for new list entries
#[cfg_attr(test, mockall::automock)]
pub trait EntryIdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs, unique regardless of how fast entries are added
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl EntryIdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
