use crate::error::ItemsError;
use crate::model::{CreateItem, Item, UpdateItem};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Entries {
    items: BTreeMap<u64, Item>,
    last_id: u64,
}

/// Process-lifetime item storage. Ids are never reused, even after deletion.
#[derive(Debug, Default)]
pub struct ItemStore {
    entries: RwLock<Entries>,
}

impl ItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All items ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        self.entries.read().items.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Result<Item, ItemsError> {
        self.entries.read().items.get(&id).cloned().ok_or(ItemsError::NotFound { id, context: None })
    }

    pub fn create(&self, payload: CreateItem) -> Item {
        let mut entries = self.entries.write();
        entries.last_id += 1;

        let item = Item {
            id: entries.last_id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            created_at: Utc::now(),
        };
        entries.items.insert(item.id, item.clone());
        item
    }

    pub fn update(&self, id: u64, patch: UpdateItem) -> Result<Item, ItemsError> {
        let mut entries = self.entries.write();
        let item = entries.items.get_mut(&id).ok_or(ItemsError::NotFound { id, context: None })?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        Ok(item.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), ItemsError> {
        self.entries
            .write()
            .items
            .remove(&id)
            .map(drop)
            .ok_or(ItemsError::NotFound { id, context: None })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn payload(name: &str) -> CreateItem {
        CreateItem { name: name.to_owned(), description: None, price: 1.5 }
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let store = ItemStore::new();
        assert_eq!(store.create(payload("a")).id, 1);
        assert_eq!(store.create(payload("b")).id, 2);

        store.delete(2).unwrap();
        assert_eq!(store.create(payload("c")).id, 3);
        assert_eq!(store.list().iter().map(|i| i.id).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn update_changes_only_provided_fields() {
        let store = ItemStore::new();
        let created = store.create(CreateItem {
            name: "lamp".to_owned(),
            description: Some("desk lamp".to_owned()),
            price: 20.0,
        });

        let updated =
            store.update(created.id, UpdateItem { price: Some(25.0), ..UpdateItem::default() }).unwrap();
        assert_eq!(updated.name, "lamp");
        assert_eq!(updated.description.as_deref(), Some("desk lamp"));
        assert!((updated.price - 25.0).abs() < f64::EPSILON);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn missing_ids_are_reported() {
        let store = ItemStore::new();
        assert!(matches!(store.get(9), Err(ItemsError::NotFound { id: 9, .. })));
        assert!(store.update(9, UpdateItem::default()).is_err());
        assert!(store.delete(9).is_err());
    }

    #[test]
    fn concurrent_creates_get_unique_ids() {
        let store = Arc::new(ItemStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || (0..50).map(|_| store.create(payload("x")).id).collect::<Vec<_>>())
            })
            .collect();

        let mut ids: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }
}
