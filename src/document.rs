//! Receipt Document - the editable state behind one receipt

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::format_long_date_id;
use crate::ledger::ItemLedger;

pub const DEFAULT_FOOTER_LINE1: &str = "Terima kasih";
pub const DEFAULT_FOOTER_LINE2: &str = "Barang yang sudah dibeli tidak dapat dikembalikan";

/// Thermal roll width class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperWidth {
    #[default]
    #[serde(rename = "58")]
    Mm58,
    #[serde(rename = "80")]
    Mm80,
}

impl PaperWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperWidth::Mm58 => "58",
            PaperWidth::Mm80 => "80",
        }
    }

    /// Stored value to width; anything unknown is 58 mm
    pub fn from_stored(value: &str) -> Self {
        match value {
            "80" => PaperWidth::Mm80,
            _ => PaperWidth::Mm58,
        }
    }

    /// Characters per line on a thermal printer
    pub fn columns(&self) -> usize {
        match self {
            PaperWidth::Mm58 => 32,
            PaperWidth::Mm80 => 48,
        }
    }
}

impl std::str::FromStr for PaperWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches("mm") {
            "58" => Ok(PaperWidth::Mm58),
            "80" => Ok(PaperWidth::Mm80),
            other => Err(format!("paper width must be 58 or 80, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDocument {
    pub store_name: String,
    pub cashier_name: String,
    pub cashier_enabled: bool,
    pub transaction_date: Option<NaiveDate>,
    pub paper_width: PaperWidth,
    pub logo_data_url: Option<String>,
    pub note: String,
    pub footer_line1: String,
    pub footer_line2: String,
    pub items: ItemLedger,
}

impl Default for ReceiptDocument {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            cashier_name: String::new(),
            cashier_enabled: true,
            transaction_date: None,
            paper_width: PaperWidth::default(),
            logo_data_url: None,
            note: String::new(),
            footer_line1: DEFAULT_FOOTER_LINE1.to_string(),
            footer_line2: DEFAULT_FOOTER_LINE2.to_string(),
            items: ItemLedger::default(),
        }
    }
}

impl ReceiptDocument {
    pub fn total(&self) -> u64 {
        self.items.total()
    }

    /// Transaction date in long form, or `today` when none is set
    pub fn display_date(&self, today: NaiveDate) -> String {
        format_long_date_id(self.transaction_date.unwrap_or(today))
    }
}
