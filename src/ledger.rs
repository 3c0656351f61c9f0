//! Item Ledger - ordered line items and the new-item draft
//!
//! Insertion order is display order. Totals are always derived.

use crate::format::{only_digits, parse_digits_to_number, to_rupiah_input};
use crate::item::{Item, ItemField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLedger {
    items: Vec<Item>,
}

impl ItemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    /// Append a new item.
    ///
    /// Rejected without effect when the name is blank, `qty < 1`, or the
    /// price is absent.
    pub fn add_item(&mut self, name: &str, qty: u32, price: Option<u64>) -> Option<&Item> {
        let name = name.trim();
        if name.is_empty() || qty < 1 {
            return None;
        }
        let price = price?;
        self.items.push(Item::new(name, qty, price));
        self.items.last()
    }

    /// Remove the item with `id`. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|it| it.id != id);
        self.items.len() != before
    }

    /// Edit one column of an existing row from raw input text.
    ///
    /// Numeric columns keep only the digits and fall back to 0; the name
    /// is stored verbatim.
    pub fn update_field(&mut self, id: &str, field: ItemField, raw: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|it| it.id == id) else {
            return false;
        };
        match field {
            ItemField::Name => item.name = raw.to_string(),
            ItemField::Qty => {
                let n = parse_digits_to_number(raw).unwrap_or(0);
                item.qty = u32::try_from(n).unwrap_or(0);
            }
            ItemField::Price => item.price = parse_digits_to_number(raw).unwrap_or(0),
        }
        true
    }

    /// Σ qty × price over every item
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, it| acc.saturating_add(it.subtotal()))
    }
}

/// Transient inputs of the "add item" row.
///
/// Each numeric field keeps the text the user sees next to the value it
/// parses to; the two are only ever updated together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItemDraft {
    pub name: String,
    qty: Option<u64>,
    price: Option<u64>,
    price_display: String,
}

impl NewItemDraft {
    pub fn set_name(&mut self, raw: &str) {
        self.name = raw.to_string();
    }

    pub fn set_qty(&mut self, raw: &str) {
        self.qty = parse_digits_to_number(raw);
    }

    /// Price keystroke: `"12000"` shows as `"Rp 12.000"`, no digits clears.
    pub fn set_price(&mut self, raw: &str) {
        let digits = only_digits(raw);
        match parse_digits_to_number(&digits) {
            Some(n) => {
                self.price = Some(n);
                self.price_display = to_rupiah_input(n);
            }
            None => {
                self.price = None;
                self.price_display.clear();
            }
        }
    }

    pub fn qty(&self) -> Option<u64> {
        self.qty
    }

    pub fn qty_display(&self) -> String {
        self.qty.map(|q| q.to_string()).unwrap_or_default()
    }

    pub fn price(&self) -> Option<u64> {
        self.price
    }

    pub fn price_display(&self) -> &str {
        &self.price_display
    }

    /// Move the draft into `ledger`. The draft is cleared only on success.
    pub fn commit(&mut self, ledger: &mut ItemLedger) -> Option<Item> {
        let qty = self.qty.and_then(|q| u32::try_from(q).ok()).unwrap_or(0);
        let item = ledger.add_item(&self.name, qty, self.price)?.clone();
        *self = Self::default();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(rows: &[(&str, u32, u64)]) -> ItemLedger {
        let mut ledger = ItemLedger::new();
        for (name, qty, price) in rows {
            ledger.add_item(name, *qty, Some(*price));
        }
        ledger
    }

    #[test]
    fn test_total_empty() {
        assert_eq!(ItemLedger::new().total(), 0);
    }

    #[test]
    fn test_total_sum_of_products() {
        let ledger = ledger_with(&[("Kopi", 2, 12000), ("Roti", 3, 5000)]);
        assert_eq!(ledger.total(), 39000);
    }

    #[test]
    fn test_add_trims_name_and_keeps_order() {
        let ledger = ledger_with(&[("  Kopi  ", 1, 1000), ("Teh", 1, 500)]);
        let names: Vec<_> = ledger.items().iter().map(|it| it.name.as_str()).collect();
        assert_eq!(names, ["Kopi", "Teh"]);
    }

    #[test]
    fn test_add_rejections() {
        let mut ledger = ItemLedger::new();
        assert!(ledger.add_item("", 1, Some(1000)).is_none());
        assert!(ledger.add_item("   ", 1, Some(1000)).is_none());
        assert!(ledger.add_item("X", 0, Some(1000)).is_none());
        assert!(ledger.add_item("X", 1, None).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let ledger = ledger_with(&[("Kopi", 1, 1000), ("Kopi", 1, 1000)]);
        assert_eq!(ledger.len(), 2);
        assert_ne!(ledger.items()[0].id, ledger.items()[1].id);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut ledger = ledger_with(&[("Kopi", 1, 1000)]);
        let before = ledger.clone();
        assert!(!ledger.remove_item("nope"));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_update_numeric_fields() {
        let mut ledger = ledger_with(&[("Kopi", 1, 1000)]);
        let id = ledger.items()[0].id.clone();

        assert!(ledger.update_field(&id, ItemField::Price, "Rp 12.000"));
        assert!(ledger.update_field(&id, ItemField::Qty, "3x"));
        assert_eq!(ledger.get(&id).unwrap().price, 12000);
        assert_eq!(ledger.get(&id).unwrap().qty, 3);

        ledger.update_field(&id, ItemField::Qty, "");
        assert_eq!(ledger.get(&id).unwrap().qty, 0);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_update_name_verbatim() {
        let mut ledger = ledger_with(&[("Kopi", 1, 1000)]);
        let id = ledger.items()[0].id.clone();
        ledger.update_field(&id, ItemField::Name, " Kopi Susu ");
        assert_eq!(ledger.get(&id).unwrap().name, " Kopi Susu ");
    }

    #[test]
    fn test_draft_price_echo() {
        let mut draft = NewItemDraft::default();
        draft.set_price("12000");
        assert_eq!(draft.price(), Some(12000));
        assert_eq!(draft.price_display(), "Rp 12.000");
        draft.set_price("Rp ");
        assert_eq!(draft.price(), None);
        assert_eq!(draft.price_display(), "");
    }

    #[test]
    fn test_draft_commit_clears_only_on_success() {
        let mut ledger = ItemLedger::new();
        let mut draft = NewItemDraft::default();
        draft.set_name("Kopi");
        draft.set_qty("2");

        assert!(draft.commit(&mut ledger).is_none());
        assert_eq!(draft.name, "Kopi");

        draft.set_price("Rp 12.000");
        let item = draft.commit(&mut ledger).unwrap();
        assert_eq!(item.subtotal(), 24000);
        assert_eq!(draft, NewItemDraft::default());
        assert_eq!(ledger.len(), 1);
    }
}
