//! Contract Invariant Tests
//!
//! Behaviour the stored record and the ledger must always keep.

use chrono::NaiveDate;
use nota_thermal::{
    format_from_date_input, format_idr, only_digits, parse_digits_to_number,
    persistence::{decode, encode},
    FileStore, ItemLedger, KeyValueStore, MemoryStore, PaperWidth, ReceiptDocument,
    ReceiptSession, STORAGE_KEY,
};

fn rows() -> Vec<(&'static str, u32, u64)> {
    vec![
        ("Kopi Susu", 2, 18000),
        ("Roti Bakar", 1, 15000),
        ("Air Mineral", 3, 4000),
        ("Gratis", 1, 0),
    ]
}

fn ledger_from(rows: &[(&str, u32, u64)]) -> ItemLedger {
    let mut ledger = ItemLedger::new();
    for &(name, qty, price) in rows {
        assert!(ledger.add_item(name, qty, Some(price)).is_some());
    }
    ledger
}

#[test]
fn invariant_total_is_sum_of_products() {
    let rows = rows();
    let expected: u64 = rows.iter().map(|&(_, q, p)| u64::from(q) * p).sum();

    let forward = ledger_from(&rows);
    let mut reversed_rows = rows.clone();
    reversed_rows.reverse();
    let reversed = ledger_from(&reversed_rows);

    assert_eq!(forward.total(), expected);
    assert_eq!(reversed.total(), expected);
}

#[test]
fn invariant_total_tracks_removals() {
    let mut ledger = ledger_from(&rows());
    let first = ledger.items()[0].clone();
    ledger.remove_item(&first.id);

    let expected: u64 = ledger.items().iter().map(|it| it.subtotal()).sum();
    assert_eq!(ledger.total(), expected);
    assert_eq!(ledger.total(), 63000 - first.subtotal());
}

#[test]
fn invariant_invalid_adds_leave_ledger_unchanged() {
    let mut ledger = ledger_from(&rows());
    let before = ledger.clone();

    assert!(ledger.add_item("", 1, Some(1000)).is_none());
    assert!(ledger.add_item("X", 0, Some(1000)).is_none());
    assert!(ledger.add_item("X", 1, parse_digits_to_number("abc")).is_none());

    assert_eq!(ledger, before);
}

#[test]
fn invariant_remove_unknown_is_noop() {
    let mut ledger = ledger_from(&rows());
    let before = ledger.clone();
    assert!(!ledger.remove_item("does-not-exist"));
    assert_eq!(ledger, before);
}

#[test]
fn invariant_roundtrip_reproduces_document() {
    let mut doc = ReceiptDocument {
        store_name: "Toko Aikira".to_string(),
        cashier_name: "Aikira".to_string(),
        cashier_enabled: false,
        transaction_date: NaiveDate::from_ymd_opt(2025, 1, 5),
        paper_width: PaperWidth::Mm80,
        logo_data_url: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        note: "Jl. Merdeka No. 1\nBandung".to_string(),
        footer_line1: "Sampai jumpa".to_string(),
        footer_line2: String::new(),
        items: ItemLedger::new(),
    };
    doc.items = ledger_from(&rows());

    let encoded = encode(&doc).unwrap();
    assert_eq!(decode(&encoded), doc);
    assert_eq!(encode(&decode(&encoded)).unwrap(), encoded);
}

#[test]
fn invariant_corrupt_record_yields_defaults() {
    for raw in ["", "null", "not json", "{\"items\": 5}", "{}"] {
        let doc = decode(raw);
        assert_eq!(doc.paper_width, PaperWidth::Mm58, "input {raw:?}");
        assert!(doc.cashier_enabled);
        assert!(doc.items.is_empty());
        assert_eq!(doc.footer_line1, "Terima kasih");
        assert_eq!(
            doc.footer_line2,
            "Barang yang sudah dibeli tidak dapat dikembalikan"
        );
    }
}

#[test]
fn invariant_currency_format() {
    assert_eq!(format_idr(12000), "Rp\u{a0}12.000");
    assert_eq!(format_idr(0), "Rp\u{a0}0");
    assert!(!format_idr(1_000_000).contains(','));
}

#[test]
fn invariant_date_input_format() {
    assert_eq!(format_from_date_input("2025-01-05"), "05 Januari 2025");
    assert_eq!(format_from_date_input(""), "");
}

#[test]
fn invariant_digit_extraction() {
    assert_eq!(only_digits("Rp 12.000"), "12000");
    assert_eq!(parse_digits_to_number(""), None);
    assert_eq!(parse_digits_to_number("Rp 0"), Some(0));
}

#[test]
fn invariant_reset_removes_record() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("data");

    let mut session = ReceiptSession::open(FileStore::new(&dir));
    session.set_draft_name("Kopi");
    session.set_draft_qty("1");
    session.set_draft_price("Rp 5.000");
    assert!(session.add_item().is_some());
    assert!(dir.join(format!("{STORAGE_KEY}.json")).exists());

    assert!(session.reset(&|_: &str| true));
    assert!(FileStore::new(&dir).get(STORAGE_KEY).unwrap().is_none());

    let reopened = ReceiptSession::open(FileStore::new(&dir));
    assert_eq!(reopened.document(), &ReceiptDocument::default());
}

#[test]
fn invariant_session_rehydrates_saved_state() {
    let mut backend = MemoryStore::new();
    let mut doc = ReceiptDocument {
        store_name: "Toko".to_string(),
        ..ReceiptDocument::default()
    };
    doc.items = ledger_from(&rows());
    backend.set(STORAGE_KEY, &encode(&doc).unwrap()).unwrap();

    let session = ReceiptSession::open(backend);
    assert_eq!(session.document(), &doc);
    assert_eq!(session.total(), 63000);
}
