//! Persistence Adapter - the `receipt_state_v1` record
//!
//! Writes are whole-document and unconditional. Reads are lenient: every
//! field falls back to its default on its own, and nothing here fails to
//! the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::document::{PaperWidth, ReceiptDocument};
use crate::item::{generate_item_id, Item};
use crate::ledger::ItemLedger;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "receipt_state_v1";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Wire shape of the stored record. Field order is part of the format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReceipt {
    pub store_name: String,
    pub cashier_name: String,
    pub cashier_enabled: bool,
    pub transaction_date: String,
    pub paper_width: String,
    pub logo_data_url: String,
    pub note: String,
    pub footer_line1: String,
    pub footer_line2: String,
    pub items: Vec<StoredItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default)]
    pub price: u64,
}

impl From<&ReceiptDocument> for StoredReceipt {
    fn from(doc: &ReceiptDocument) -> Self {
        Self {
            store_name: doc.store_name.clone(),
            cashier_name: doc.cashier_name.clone(),
            cashier_enabled: doc.cashier_enabled,
            transaction_date: doc
                .transaction_date
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            paper_width: doc.paper_width.as_str().to_string(),
            logo_data_url: doc.logo_data_url.clone().unwrap_or_default(),
            note: doc.note.clone(),
            footer_line1: doc.footer_line1.clone(),
            footer_line2: doc.footer_line2.clone(),
            items: doc
                .items
                .items()
                .iter()
                .map(|it| StoredItem {
                    id: it.id.clone(),
                    name: it.name.clone(),
                    qty: it.qty,
                    price: it.price,
                })
                .collect(),
        }
    }
}

/// Serialize the full document to the stored JSON text
pub fn encode(doc: &ReceiptDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredReceipt::from(doc))
}

/// Rebuild a document from stored text.
///
/// Unparseable text or a non-object value yields the defaults.
pub fn decode(raw: &str) -> ReceiptDocument {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => decode_object(&map),
        Ok(_) => {
            tracing::debug!("stored receipt is not an object, using defaults");
            ReceiptDocument::default()
        }
        Err(e) => {
            tracing::debug!(error = %e, "stored receipt unreadable, using defaults");
            ReceiptDocument::default()
        }
    }
}

fn decode_object(map: &Map<String, Value>) -> ReceiptDocument {
    let defaults = ReceiptDocument::default();
    let text = |key: &str, fallback: &str| -> String {
        map.get(key)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };

    ReceiptDocument {
        store_name: text("storeName", &defaults.store_name),
        cashier_name: text("cashierName", &defaults.cashier_name),
        cashier_enabled: map
            .get("cashierEnabled")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.cashier_enabled),
        transaction_date: map
            .get("transactionDate")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_INPUT_FORMAT).ok()),
        paper_width: map
            .get("paperWidth")
            .and_then(Value::as_str)
            .map(PaperWidth::from_stored)
            .unwrap_or_default(),
        logo_data_url: map
            .get("logoDataUrl")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        note: text("note", &defaults.note),
        footer_line1: text("footerLine1", &defaults.footer_line1),
        footer_line2: text("footerLine2", &defaults.footer_line2),
        items: map
            .get("items")
            .and_then(Value::as_array)
            .map(|arr| decode_items(arr))
            .unwrap_or_default(),
    }
}

fn decode_items(values: &[Value]) -> ItemLedger {
    let mut seen = HashSet::new();
    let items = values
        .iter()
        .filter_map(|v| serde_json::from_value::<StoredItem>(v.clone()).ok())
        .map(|stored| {
            let id = if stored.id.is_empty() || seen.contains(&stored.id) {
                generate_item_id()
            } else {
                stored.id
            };
            seen.insert(id.clone());
            Item {
                id,
                name: stored.name,
                qty: stored.qty,
                price: stored.price,
            }
        })
        .collect();
    ItemLedger::from_items(items)
}

/// Load/save/clear of one document through a key-value store.
///
/// Storage failures are logged and swallowed.
pub struct ReceiptStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> ReceiptStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Stored document, or the defaults when absent or unreadable
    pub fn load(&self) -> ReceiptDocument {
        match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => ReceiptDocument::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored receipt");
                ReceiptDocument::default()
            }
        }
    }

    /// Raw stored record, if any
    pub fn load_raw(&self) -> Option<String> {
        self.backend.get(STORAGE_KEY).ok().flatten()
    }

    pub fn save(&mut self, doc: &ReceiptDocument) {
        let encoded = match encode(doc) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode receipt");
                return;
            }
        };
        if let Err(e) = self.backend.set(STORAGE_KEY, &encoded) {
            tracing::warn!(error = %e, "failed to write stored receipt");
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(STORAGE_KEY) {
            tracing::warn!(error = %e, "failed to remove stored receipt");
        }
    }
}
