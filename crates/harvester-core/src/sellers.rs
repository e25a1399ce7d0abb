use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::UNKNOWN;

/// Jurisdiction-dependent registration ids carried by the seller payload.
///
/// Russian sellers fill `ogrn`/`ogrnip`/`kpp`, Belarusian ones `unp`,
/// Kazakh ones `bin`, and so on; the rest stay at [`UNKNOWN`].
pub const REGISTRATION_KEYS: [&str; 7] = [
    "ogrn",
    "ogrnip",
    "kpp",
    "taxpayerCode",
    "unp",
    "bin",
    "unn",
];

/// Seller metadata, resolved once per harvest session and immutable after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRecord {
    pub seller_id: u64,
    pub display_name: String,
    pub legal_name: String,
    /// Taxpayer identification number (`inn`).
    pub tax_id: String,
    /// Keyed by the entries of [`REGISTRATION_KEYS`]; every key is present.
    pub registration_ids: BTreeMap<String, String>,
    pub legal_address: String,
    pub trademark: String,
    pub profile_url: String,
}

impl SellerRecord {
    /// Record returned when a lookup fails: every string field is
    /// [`UNKNOWN`], only the id is preserved.
    #[must_use]
    pub fn placeholder(seller_id: u64) -> Self {
        Self {
            seller_id,
            display_name: UNKNOWN.to_string(),
            legal_name: UNKNOWN.to_string(),
            tax_id: UNKNOWN.to_string(),
            registration_ids: REGISTRATION_KEYS
                .iter()
                .map(|key| ((*key).to_string(), UNKNOWN.to_string()))
                .collect(),
            legal_address: UNKNOWN.to_string(),
            trademark: UNKNOWN.to_string(),
            profile_url: UNKNOWN.to_string(),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.display_name == UNKNOWN && self.profile_url == UNKNOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_preserves_id_and_fills_sentinels() {
        let seller = SellerRecord::placeholder(4242);
        assert_eq!(seller.seller_id, 4242);
        assert_eq!(seller.display_name, UNKNOWN);
        assert_eq!(seller.legal_name, UNKNOWN);
        assert_eq!(seller.tax_id, UNKNOWN);
        assert_eq!(seller.legal_address, UNKNOWN);
        assert_eq!(seller.trademark, UNKNOWN);
        assert_eq!(seller.profile_url, UNKNOWN);
        assert!(seller.is_placeholder());
    }

    #[test]
    fn placeholder_has_every_registration_key() {
        let seller = SellerRecord::placeholder(1);
        assert_eq!(seller.registration_ids.len(), REGISTRATION_KEYS.len());
        for key in REGISTRATION_KEYS {
            assert_eq!(seller.registration_ids.get(key).map(String::as_str), Some(UNKNOWN));
        }
    }
}
