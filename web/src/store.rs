use simon_core::{PersistentStore, StoreError};

/// [`PersistentStore`] over the page's `localStorage`.
///
/// Private browsing modes may deny storage entirely; then every call fails and the engine keeps playing in memory.
#[derive(Clone, Debug)]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

impl BrowserStore {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is not available, scores will not be kept");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_string()))
    }
}

impl PersistentStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::WriteRejected(format!("{:?}", err)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use simon_core::{Leaderboard, StorageKey};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn leaderboard_round_trips_through_local_storage() {
        let mut store = BrowserStore::local();
        let mut board = Leaderboard::new();
        board.record("Ava", 3);

        board.save(&mut store).unwrap();

        assert_eq!(Leaderboard::load(&store), board);
        assert!(store.get(Leaderboard::KEY).unwrap().is_some());
    }
}
