//! Demonstration of a store announcing loaded values to subscribers

use microstore::{mixin, CallbackError, Observable, Registry};
use serde::Deserialize;
use std::sync::{Arc, Mutex, RwLock};

/// Hands out canned JSON responses, one per page.
struct PagedSource {
    pages: Vec<&'static str>,
}

impl PagedSource {
    fn load(&self, page: usize) -> &'static str {
        self.pages.get(page).copied().unwrap_or(r#"{ "data": { "values": [] }}"#)
    }
}

#[derive(Deserialize)]
struct Payload {
    data: PayloadData,
}

#[derive(Deserialize)]
struct PayloadData {
    values: Vec<i32>,
}

struct ValueStore {
    source: PagedSource,
    values: RwLock<Vec<i32>>,
    events: Registry,
}

mixin!(ValueStore, events);

impl ValueStore {
    fn load_values(&self, page: usize) -> Result<(), CallbackError> {
        let payload: Payload = serde_json::from_str(self.source.load(page))?;
        self.trigger("values.loaded")?;
        *self.values.write().unwrap() = payload.data.values;
        Ok(())
    }

    fn values(&self) -> Vec<i32> {
        self.values.read().unwrap().clone()
    }
}

fn main() -> Result<(), CallbackError> {
    println!("=== Sample Store ===\n");

    let store = Arc::new(ValueStore {
        source: PagedSource {
            pages: vec![
                r#"{ "data": { "values": [1, 2, 3] }}"#,
                r#"{ "data": { "values": [5, 6, 7] }}"#,
            ],
        },
        values: RwLock::new(Vec::new()),
        events: Registry::new(),
    });

    // A local mirror that re-reads the store whenever it is notified.
    let mirror = Arc::new(Mutex::new(Vec::new()));

    println!("1. Binding 'mirror' and 'printer'");
    let weak = Arc::downgrade(&store);
    let mirror_clone = mirror.clone();
    store.bind("values.loaded", "mirror", move |_| {
        if let Some(store) = weak.upgrade() {
            *mirror_clone.lock().unwrap() = store.values();
        }
    });
    store.bind("values.loaded", "printer", |_| {
        println!("   [values.loaded] fired");
    });

    println!("\n2. Loading page 0 twice");
    store.load_values(0)?;
    store.load_values(0)?;
    println!("   store:  {:?}", store.values());
    println!("   mirror: {:?}", mirror.lock().unwrap());

    println!("\n3. Unbinding 'mirror' and loading page 1");
    store.unbind("values.loaded", "mirror");
    store.load_values(1)?;
    println!("   store:  {:?}", store.values());
    println!("   mirror: {:?} (no longer updated)", mirror.lock().unwrap());

    println!("\n✓ Example complete!");
    Ok(())
}
