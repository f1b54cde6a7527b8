//! Cryptocurrencies the processor can settle, and the merchant GUIDs routing
//! payments to the right wallet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported cryptocurrencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cryptocurrency {
    Bitcoin,
    Litecoin,
    Dogecoin,
    Vertcoin,
    Auroracoin,
    Mintcoin,
    Darkcoin,
    Maxcoin,
}

impl Cryptocurrency {
    /// All supported coins in display order.
    pub const ALL: [Cryptocurrency; 8] = [
        Cryptocurrency::Bitcoin,
        Cryptocurrency::Litecoin,
        Cryptocurrency::Dogecoin,
        Cryptocurrency::Vertcoin,
        Cryptocurrency::Auroracoin,
        Cryptocurrency::Mintcoin,
        Cryptocurrency::Darkcoin,
        Cryptocurrency::Maxcoin,
    ];

    /// Name shown to the buyer.
    pub fn display_name(&self) -> &'static str {
        match self {
            Cryptocurrency::Bitcoin => "Bitcoin",
            Cryptocurrency::Litecoin => "Litecoin",
            Cryptocurrency::Dogecoin => "Dogecoin",
            Cryptocurrency::Vertcoin => "Vertcoin",
            Cryptocurrency::Auroracoin => "Auroracoin",
            Cryptocurrency::Mintcoin => "Mintcoin",
            Cryptocurrency::Darkcoin => "Darkcoin",
            Cryptocurrency::Maxcoin => "Maxcoin",
        }
    }

    /// Lowercase slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Cryptocurrency::Bitcoin => "bitcoin",
            Cryptocurrency::Litecoin => "litecoin",
            Cryptocurrency::Dogecoin => "dogecoin",
            Cryptocurrency::Vertcoin => "vertcoin",
            Cryptocurrency::Auroracoin => "auroracoin",
            Cryptocurrency::Mintcoin => "mintcoin",
            Cryptocurrency::Darkcoin => "darkcoin",
            Cryptocurrency::Maxcoin => "maxcoin",
        }
    }

    /// Settings key holding the merchant GUID, e.g. `bitcoin_guid`.
    pub fn guid_setting_key(&self) -> String {
        format!("{}_guid", self.slug())
    }
}

impl fmt::Display for Cryptocurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A coin the merchant has configured, offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOption {
    pub currency: Cryptocurrency,
    pub guid: String,
}

impl CurrencyOption {
    /// Name shown in the currency picker.
    pub fn name(&self) -> &'static str {
        self.currency.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_eight_coins() {
        assert_eq!(Cryptocurrency::ALL.len(), 8);
        assert_eq!(Cryptocurrency::ALL[0], Cryptocurrency::Bitcoin);
        assert_eq!(Cryptocurrency::ALL[7], Cryptocurrency::Maxcoin);
    }

    #[test]
    fn guid_setting_key_uses_slug() {
        assert_eq!(Cryptocurrency::Dogecoin.guid_setting_key(), "dogecoin_guid");
        assert_eq!(Cryptocurrency::Auroracoin.guid_setting_key(), "auroracoin_guid");
    }

    #[test]
    fn slug_matches_serde_name() {
        for coin in Cryptocurrency::ALL {
            let json = serde_json::to_string(&coin).unwrap();
            assert_eq!(json, format!("\"{}\"", coin.slug()));
        }
    }

    #[test]
    fn option_name_is_display_name() {
        let option = CurrencyOption {
            currency: Cryptocurrency::Vertcoin,
            guid: "g-1".to_string(),
        };
        assert_eq!(option.name(), "Vertcoin");
    }
}
