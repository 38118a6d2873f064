//! Medical kit inventory.
//!
//! The inventory is a flat list of [`KitItem`]s persisted as one JSON
//! document through a [`KitStore`]. Reads never fail from the caller's point
//! of view: a missing or unreadable document yields the localized default kit.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Storage key the inventory document lives under.
pub const KIT_STORAGE_KEY: &str = "smart-kit-inventory";

/// Stock level of a kit item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KitStatus {
    /// In stock.
    #[default]
    Available,
    /// Running low.
    Low,
    /// Past its expiry date.
    Expired,
}

impl KitStatus {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Low => "low",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for KitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_quantity() -> u32 {
    1
}

/// One entry in the kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitItem {
    /// Unique identifier. Default items use small integers, user items a
    /// millisecond timestamp.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Stock level.
    #[serde(default)]
    pub status: KitStatus,
    /// Count on hand. Documents written before quantities existed load as 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl KitItem {
    /// Create an item.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        status: KitStatus,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            status,
            quantity,
        }
    }
}

/// Persistence boundary for the inventory.
pub trait KitStore {
    /// Read the stored inventory, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unreadable or the stored
    /// document does not decode.
    fn load(&self) -> Result<Option<Vec<KitItem>>>;

    /// Replace the stored inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn save(&self, items: &[KitItem]) -> Result<()>;
}

impl KitStore for Storage {
    fn load(&self) -> Result<Option<Vec<KitItem>>> {
        match self.get(KIT_STORAGE_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, items: &[KitItem]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.put(KIT_STORAGE_KEY, &raw)?;
        Ok(())
    }
}

/// The live inventory plus the store it writes through to.
#[derive(Debug)]
pub struct KitInventory<S> {
    store: S,
    items: Vec<KitItem>,
}

impl<S: KitStore> KitInventory<S> {
    /// Load the inventory, substituting `defaults` when nothing usable is
    /// stored.
    ///
    /// Stored items whose id matches a default item take that item's name
    /// and description, so the kit always reads in the language `defaults`
    /// came from. The store is rewritten only if something changed.
    pub fn load(store: S, defaults: &[KitItem]) -> Self {
        let mut items = match store.load() {
            Ok(Some(items)) => {
                debug!(count = items.len(), "Loaded kit inventory");
                items
            }
            Ok(None) => {
                debug!("No saved kit, using defaults");
                defaults.to_vec()
            }
            Err(err) if err.is_recoverable_read() => {
                warn!(error = %err, "Saved kit is unreadable, using defaults");
                defaults.to_vec()
            }
            Err(err) => {
                error!(error = %err, "Kit storage unavailable, using defaults");
                defaults.to_vec()
            }
        };
        if localize(&mut items, defaults) {
            debug!("Re-localized saved kit");
            if let Err(err) = store.save(&items) {
                warn!(error = %err, "Failed to save re-localized kit");
            }
        }
        Self { store, items }
    }

    /// Current items in display order.
    #[must_use]
    pub fn items(&self) -> &[KitItem] {
        &self.items
    }

    /// Look an item up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&KitItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// A fresh id derived from the current time in milliseconds.
    ///
    /// Bumped past any id already in use.
    #[must_use]
    pub fn next_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Insert a new item or replace the one with the same id, then persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKitItem`] if the name is blank, or a storage
    /// error if the write fails.
    pub fn upsert(&mut self, mut item: KitItem) -> Result<()> {
        let trimmed = item.name.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_kit_item("name must not be empty"));
        }
        item.name = trimmed.to_string();

        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                debug!(id = %item.id, "Updating kit item");
                *existing = item;
            }
            None => {
                info!(id = %item.id, name = %item.name, "Adding kit item");
                self.items.push(item);
            }
        }
        self.persist()
    }

    /// Remove the item with `id`, then persist.
    ///
    /// Returns the removed item, or `None` if no item had that id (nothing is
    /// written in that case).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn remove(&mut self, id: &str) -> Result<Option<KitItem>> {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };
        let removed = self.items.remove(position);
        info!(id, "Removed kit item");
        self.persist()?;
        Ok(Some(removed))
    }

    /// Replace the whole inventory with `defaults`, then persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn reset(&mut self, defaults: &[KitItem]) -> Result<()> {
        info!("Resetting kit to defaults");
        self.items = defaults.to_vec();
        self.persist()
    }

    /// Take localized names and descriptions from `defaults` for every item
    /// whose id matches a default item. User-added items are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn relocalize(&mut self, defaults: &[KitItem]) -> Result<()> {
        if localize(&mut self.items, defaults) {
            self.persist()?;
        }
        Ok(())
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.items)
    }
}

/// Copy localized text from matching default items. Returns whether
/// anything changed.
fn localize(items: &mut [KitItem], defaults: &[KitItem]) -> bool {
    let mut changed = false;
    for item in items {
        if let Some(localized) = defaults.iter().find(|d| d.id == item.id) {
            if item.name != localized.name || item.description != localized.description {
                item.name.clone_from(&localized.name);
                item.description.clone_from(&localized.description);
                changed = true;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::content::{get_content, Language};

    #[derive(Debug, Default)]
    struct MemoryStore {
        raw: RefCell<Option<String>>,
        saves: Cell<usize>,
        fail_reads: bool,
    }

    impl MemoryStore {
        fn with_raw(raw: &str) -> Self {
            Self {
                raw: RefCell::new(Some(raw.to_string())),
                ..Self::default()
            }
        }
    }

    impl KitStore for MemoryStore {
        fn load(&self) -> Result<Option<Vec<KitItem>>> {
            if self.fail_reads {
                return Err(Error::Io(std::io::Error::other("store offline")));
            }
            match self.raw.borrow().as_deref() {
                Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
                None => Ok(None),
            }
        }

        fn save(&self, items: &[KitItem]) -> Result<()> {
            *self.raw.borrow_mut() = Some(serde_json::to_string(items)?);
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn defaults(language: Language) -> Vec<KitItem> {
        get_content(language).default_kit
    }

    #[test]
    fn test_empty_store_uses_defaults() {
        let inventory = KitInventory::load(MemoryStore::default(), &defaults(Language::English));
        assert_eq!(inventory.items(), defaults(Language::English).as_slice());
        assert_eq!(inventory.store.saves.get(), 0);
    }

    #[test]
    fn test_corrupt_data_uses_defaults() {
        let inventory = KitInventory::load(
            MemoryStore::with_raw("{not json"),
            &defaults(Language::English),
        );
        assert_eq!(inventory.items().len(), 6);
    }

    #[test]
    fn test_unavailable_store_uses_defaults() {
        let store = MemoryStore {
            fail_reads: true,
            ..MemoryStore::default()
        };
        let inventory = KitInventory::load(store, &defaults(Language::Arabic));
        assert_eq!(inventory.items(), defaults(Language::Arabic).as_slice());
    }

    #[test]
    fn test_missing_quantity_loads_as_one() {
        let raw = r#"[{"id":"9","name":"Scissors","description":"Blunt tip","status":"low"}]"#;
        let inventory = KitInventory::load(MemoryStore::with_raw(raw), &[]);
        let item = inventory.get("9").unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.status, KitStatus::Low);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &defaults(Language::English));
        inventory
            .upsert(KitItem::new("42", "Tweezers", "", KitStatus::Expired, 2))
            .unwrap();
        let expected = inventory.items().to_vec();

        let reloaded = KitInventory::load(inventory.into_store(), &[]);
        assert_eq!(reloaded.items(), expected.as_slice());
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &defaults(Language::English));
        inventory
            .upsert(KitItem::new("3", "  Antiseptic Wipes  ", "", KitStatus::Available, 12))
            .unwrap();

        let item = inventory.get("3").unwrap();
        assert_eq!(item.name, "Antiseptic Wipes");
        assert_eq!(item.quantity, 12);
        assert_eq!(inventory.items().len(), 6);
        assert_eq!(inventory.store.saves.get(), 1);
    }

    #[test]
    fn test_upsert_rejects_blank_name() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &[]);
        let err = inventory
            .upsert(KitItem::new("1", "   ", "", KitStatus::Available, 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidKitItem { .. }));
        assert!(inventory.items().is_empty());
        assert_eq!(inventory.store.saves.get(), 0);
    }

    #[test]
    fn test_remove() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &defaults(Language::English));
        let removed = inventory.remove("1").unwrap().unwrap();
        assert_eq!(removed.id, "1");
        assert!(inventory.get("1").is_none());
        assert!(inventory.remove("1").unwrap().is_none());
        assert_eq!(inventory.store.saves.get(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &defaults(Language::English));
        inventory.remove("2").unwrap();
        inventory.reset(&defaults(Language::English)).unwrap();
        assert_eq!(inventory.items(), defaults(Language::English).as_slice());
    }

    #[test]
    fn test_relocalize_only_touches_default_items() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &defaults(Language::English));
        inventory
            .upsert(KitItem::new("777", "My Inhaler", "", KitStatus::Available, 1))
            .unwrap();
        inventory.upsert(KitItem::new("1", "Gauze", "", KitStatus::Low, 2)).unwrap();

        let arabic = defaults(Language::Arabic);
        inventory.relocalize(&arabic).unwrap();

        let gauze = inventory.get("1").unwrap();
        assert_eq!(gauze.name, arabic[0].name);
        assert_eq!(gauze.status, KitStatus::Low);
        assert_eq!(gauze.quantity, 2);
        assert_eq!(inventory.get("777").unwrap().name, "My Inhaler");
    }

    #[test]
    fn test_load_localizes_saved_default_items() {
        let english = defaults(Language::English);
        let arabic = defaults(Language::Arabic);
        let storage = Storage::open_in_memory().unwrap();
        let mut saved = english.clone();
        saved[1].quantity = 7;
        saved.push(KitItem::new("777", "My Inhaler", "", KitStatus::Available, 1));
        KitStore::save(&storage, &saved).unwrap();

        let inventory = KitInventory::load(storage, &arabic);
        assert_eq!(inventory.items()[0].name, arabic[0].name);
        assert_eq!(inventory.items()[1].description, arabic[1].description);
        assert_eq!(inventory.items()[1].quantity, 7);
        assert_eq!(inventory.get("777").unwrap().name, "My Inhaler");

        // Localized text was written back
        let stored = KitStore::load(&inventory.into_store()).unwrap().unwrap();
        assert_eq!(stored[0].name, arabic[0].name);
    }

    #[test]
    fn test_load_in_same_language_does_not_write() {
        let english = defaults(Language::English);
        let store = MemoryStore::with_raw(&serde_json::to_string(&english).unwrap());
        let inventory = KitInventory::load(store, &english);
        assert_eq!(inventory.items(), english.as_slice());
        assert_eq!(inventory.store.saves.get(), 0);
    }

    #[test]
    fn test_next_id_is_unique() {
        let mut inventory = KitInventory::load(MemoryStore::default(), &[]);
        let first = inventory.next_id();
        inventory
            .upsert(KitItem::new(first.clone(), "A", "", KitStatus::Available, 1))
            .unwrap();
        let second = inventory.next_id();
        assert_ne!(first, second);
        assert!(second.parse::<i64>().is_ok());
    }

    #[test]
    fn test_storage_backed_round_trip() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(KitStore::load(&storage).unwrap().is_none());

        let items = defaults(Language::Arabic);
        KitStore::save(&storage, &items).unwrap();
        assert_eq!(KitStore::load(&storage).unwrap(), Some(items));
    }

    #[test]
    fn test_storage_corrupt_document_is_recoverable() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put(KIT_STORAGE_KEY, "[{\"id\":").unwrap();
        let err = KitStore::load(&storage).unwrap_err();
        assert!(err.is_recoverable_read());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&KitStatus::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
        assert_eq!(KitStatus::Low.to_string(), "low");
    }
}
