//! Nota Thermal Core - receipt state, formatting and persistence
//!
//! # Ground Rules
//! 1. Totals are derived, never stored
//! 2. Every change is written back whole
//! 3. Bad input is ignored, bad storage falls back to defaults
//! 4. Display text and typed values are separate

pub mod document;
pub mod format;
pub mod item;
pub mod ledger;
pub mod logo;
pub mod persistence;
pub mod preview;
pub mod session;
pub mod storage;

pub use document::{PaperWidth, ReceiptDocument};
pub use format::{
    format_from_date_input, format_idr, format_long_date_id, format_num_id, only_digits,
    parse_digits_to_number,
};
pub use item::{Item, ItemField, ItemId};
pub use ledger::{ItemLedger, NewItemDraft};
pub use persistence::{ReceiptStore, STORAGE_KEY};
pub use session::{Confirm, DocumentField, PrintHost, ReceiptSession};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
