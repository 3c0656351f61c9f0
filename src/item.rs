//! Receipt line items and their identifiers

use rand::distributions::Alphanumeric;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub type ItemId = String;

/// Length of the fallback token used when no OS randomness is available.
const FALLBACK_ID_LEN: usize = 9;

/// One receipt line. Prices are whole Rupiah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub qty: u32,
    pub price: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, qty: u32, price: u64) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            qty,
            price,
        }
    }

    /// `qty × price`, recomputed on every call
    pub fn subtotal(&self) -> u64 {
        u64::from(self.qty).saturating_mul(self.price)
    }
}

/// Editable columns of an item row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Qty,
    Price,
}

impl std::str::FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "qty" => Ok(Self::Qty),
            "price" => Ok(Self::Price),
            other => Err(format!("unknown item field: {other}")),
        }
    }
}

/// Fresh item identifier.
///
/// A random UUID v4 when the OS random source works, otherwise a short
/// alphanumeric token from a time-seeded generator.
pub fn generate_item_id() -> ItemId {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "OS randomness unavailable, using fallback id");
            fallback_token()
        }
    }
}

fn fallback_token() -> ItemId {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(seed)
        .sample_iter(&Alphanumeric)
        .take(FALLBACK_ID_LEN)
        .map(char::from)
        .collect()
}
