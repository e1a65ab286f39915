// Catalog Port - menu lookups made by producers

use crate::domain::{ItemId, Menu, MenuItem};

/// Read-only item lookup
///
/// `None` means the client asked for something that is not on the menu.
pub trait Catalog: Send + Sync {
    fn lookup(&self, id: ItemId) -> Option<MenuItem>;
}

impl Catalog for Menu {
    fn lookup(&self, id: ItemId) -> Option<MenuItem> {
        self.get(id).cloned()
    }
}
