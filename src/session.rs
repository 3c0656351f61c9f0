//! Receipt session - single owner of the document being edited
//!
//! Every mutation writes the whole document back to storage before
//! returning. Operations report whether anything changed; failures are
//! logged, never returned.

use chrono::{Local, NaiveDate};
use std::path::Path;

use crate::document::{PaperWidth, ReceiptDocument};
use crate::format::date_from_input;
use crate::item::{Item, ItemField};
use crate::ledger::NewItemDraft;
use crate::logo::load_logo;
use crate::persistence::ReceiptStore;
use crate::preview::render_text;
use crate::storage::KeyValueStore;

pub const RESET_PROMPT: &str = "Hapus semua data nota?";

/// Blocking yes/no question for destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Where a finished receipt goes. No completion signal.
pub trait PrintHost {
    fn print(&mut self, receipt: &str);
}

/// Scalar header/footer fields of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentField {
    StoreName,
    CashierName,
    Note,
    FooterLine1,
    FooterLine2,
}

impl std::str::FromStr for DocumentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store-name" => Ok(Self::StoreName),
            "cashier-name" => Ok(Self::CashierName),
            "note" => Ok(Self::Note),
            "footer1" => Ok(Self::FooterLine1),
            "footer2" => Ok(Self::FooterLine2),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

pub struct ReceiptSession<S: KeyValueStore> {
    document: ReceiptDocument,
    draft: NewItemDraft,
    store: ReceiptStore<S>,
}

impl<S: KeyValueStore> ReceiptSession<S> {
    /// Rehydrate from `backend`, or start empty
    pub fn open(backend: S) -> Self {
        let store = ReceiptStore::new(backend);
        let document = store.load();
        tracing::debug!(items = document.items.len(), "receipt session opened");
        Self {
            document,
            draft: NewItemDraft::default(),
            store,
        }
    }

    pub fn document(&self) -> &ReceiptDocument {
        &self.document
    }

    pub fn draft(&self) -> &NewItemDraft {
        &self.draft
    }

    pub fn store(&self) -> &ReceiptStore<S> {
        &self.store
    }

    pub fn total(&self) -> u64 {
        self.document.total()
    }

    fn persist(&mut self) {
        self.store.save(&self.document);
    }

    // --- Header / footer ---

    pub fn set_text(&mut self, field: DocumentField, value: &str) {
        let value = value.to_string();
        match field {
            DocumentField::StoreName => self.document.store_name = value,
            DocumentField::CashierName => self.document.cashier_name = value,
            DocumentField::Note => self.document.note = value,
            DocumentField::FooterLine1 => self.document.footer_line1 = value,
            DocumentField::FooterLine2 => self.document.footer_line2 = value,
        }
        self.persist();
    }

    pub fn set_cashier_enabled(&mut self, enabled: bool) {
        self.document.cashier_enabled = enabled;
        self.persist();
    }

    pub fn set_paper_width(&mut self, width: PaperWidth) {
        self.document.paper_width = width;
        self.persist();
    }

    pub fn set_transaction_date(&mut self, date: Option<NaiveDate>) {
        self.document.transaction_date = date;
        self.persist();
    }

    /// Date-input text; empty or unreadable clears the date
    pub fn set_transaction_date_input(&mut self, raw: &str) {
        let date = if raw.trim().is_empty() {
            None
        } else {
            date_from_input(raw)
        };
        self.set_transaction_date(date);
    }

    // --- Logo ---

    /// Replace the logo with the file at `path`.
    ///
    /// A file that cannot be read leaves the current logo in place.
    pub fn set_logo_from_file(&mut self, path: &Path) -> bool {
        match load_logo(path) {
            Ok(url) => {
                self.document.logo_data_url = Some(url);
                self.persist();
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "logo not loaded");
                false
            }
        }
    }

    pub fn clear_logo(&mut self) {
        self.document.logo_data_url = None;
        self.persist();
    }

    // --- Items ---

    pub fn set_draft_name(&mut self, raw: &str) {
        self.draft.set_name(raw);
    }

    pub fn set_draft_qty(&mut self, raw: &str) {
        self.draft.set_qty(raw);
    }

    pub fn set_draft_price(&mut self, raw: &str) {
        self.draft.set_price(raw);
    }

    /// Commit the draft as a new item. Invalid drafts are ignored.
    pub fn add_item(&mut self) -> Option<Item> {
        let Some(item) = self.draft.commit(&mut self.document.items) else {
            tracing::debug!("add item rejected");
            return None;
        };
        self.persist();
        Some(item)
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let removed = self.document.items.remove_item(id);
        if !removed {
            tracing::debug!(id, "remove of unknown item ignored");
        }
        self.persist();
        removed
    }

    pub fn update_item_field(&mut self, id: &str, field: ItemField, raw: &str) -> bool {
        let updated = self.document.items.update_field(id, field, raw);
        self.persist();
        updated
    }

    // --- Output ---

    pub fn display_date(&self) -> String {
        self.document.display_date(Local::now().date_naive())
    }

    pub fn preview(&self) -> String {
        render_text(&self.document, Local::now().date_naive())
    }

    /// Send the receipt to `host`. Refused while there are no items.
    pub fn print(&self, host: &mut dyn PrintHost) -> bool {
        if self.document.items.is_empty() {
            tracing::debug!("print refused: no items");
            return false;
        }
        host.print(&self.preview());
        true
    }

    /// Wipe everything after `confirm` agrees, including the stored record
    pub fn reset(&mut self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            return false;
        }
        self.document = ReceiptDocument::default();
        self.draft = NewItemDraft::default();
        self.store.clear();
        tracing::info!("receipt reset");
        true
    }
}
