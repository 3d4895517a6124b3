use shared::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

/// `window.localStorage` behind the storage port.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// `None` when the page has no local storage (private mode, sandboxed iframe).
    pub fn open() -> Option<Self> {
        let storage = window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::backend(format!("{:?}", err))
}

impl KeyValueStore for LocalStore {
    fn get(&mut self, key: &str) -> shared::Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> shared::Result<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}
