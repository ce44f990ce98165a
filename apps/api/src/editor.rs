//! Shared helpers for form-backed editors: sub-record collections keyed by
//! UUID and shallow-merge patches.

use uuid::Uuid;

use crate::errors::AppError;

/// An entry inside a record's nested collection (education, course module, ...).
pub trait SubRecord {
    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

/// Appends `item` under a freshly generated id and returns that id.
pub fn add_item<T: SubRecord>(items: &mut Vec<T>, mut item: T) -> Uuid {
    let id = Uuid::new_v4();
    item.set_id(id);
    items.push(item);
    id
}

/// Removes the item with `id`; the remaining items keep their order.
pub fn remove_item<T: SubRecord>(items: &mut Vec<T>, id: Uuid) -> Result<T, AppError> {
    let index = items
        .iter()
        .position(|i| i.id() == id)
        .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;
    Ok(items.remove(index))
}

/// Replaces the item carrying the same id as `item`.
pub fn replace_item<T: SubRecord>(items: &mut [T], item: T) -> Result<(), AppError> {
    let id = item.id();
    let slot = items
        .iter_mut()
        .find(|i| i.id() == id)
        .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;
    *slot = item;
    Ok(())
}

/// Shallow merge of one patch field: `Some` replaces, `None` keeps.
pub fn merge<T>(target: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Debug, Clone)]
    struct Item {
        id: Uuid,
        label: &'static str,
    }

    impl SubRecord for Item {
        fn id(&self) -> Uuid {
            self.id
        }
        fn set_id(&mut self, id: Uuid) {
            self.id = id;
        }
    }

    fn item(label: &'static str) -> Item {
        Item {
            id: Uuid::nil(),
            label,
        }
    }

    #[test]
    fn test_add_grows_by_one_with_unique_ids() {
        let mut items = Vec::new();
        let mut ids = HashSet::new();
        for n in 0..50 {
            let before = items.len();
            let id = add_item(&mut items, item("x"));
            assert_eq!(items.len(), before + 1, "iteration {n}");
            assert!(ids.insert(id), "duplicate id {id}");
        }
    }

    #[test]
    fn test_remove_shrinks_by_one_and_keeps_order() {
        let mut items = Vec::new();
        let a = add_item(&mut items, item("a"));
        let b = add_item(&mut items, item("b"));
        let c = add_item(&mut items, item("c"));

        let removed = remove_item(&mut items, b).unwrap();
        assert_eq!(removed.label, "b");
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let mut items = vec![item("a")];
        let err = remove_item(&mut items, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_replace_item() {
        let mut items = Vec::new();
        let id = add_item(&mut items, item("a"));
        replace_item(&mut items, Item { id, label: "z" }).unwrap();
        assert_eq!(items[0].label, "z");
        assert!(replace_item(&mut items, Item { id: Uuid::new_v4(), label: "q" }).is_err());
    }

    #[test]
    fn test_merge() {
        let mut name = "old".to_string();
        merge(&mut name, None);
        assert_eq!(name, "old");
        merge(&mut name, Some("new".to_string()));
        assert_eq!(name, "new");
    }
}
