//! Priced guidance offerings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something a learner can book a session for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Offering {
    BasicSession,
    ScamMasterclass,
    PremiumMonthly,
    WalletSetupGuide,
}

impl Offering {
    /// The full catalogue, in display order.
    pub const ALL: [Offering; 4] = [
        Offering::BasicSession,
        Offering::ScamMasterclass,
        Offering::PremiumMonthly,
        Offering::WalletSetupGuide,
    ];

    /// Price in whole US dollars.
    pub fn price_usd(&self) -> u32 {
        match self {
            Offering::BasicSession => 10,
            Offering::ScamMasterclass => 25,
            Offering::PremiumMonthly => 15,
            Offering::WalletSetupGuide => 20,
        }
    }

    /// Default session topic label.
    pub fn topic(&self) -> &'static str {
        match self {
            Offering::BasicSession => "Crypto basics session",
            Offering::ScamMasterclass => "Scam prevention masterclass",
            Offering::PremiumMonthly => "Premium monthly guidance",
            Offering::WalletSetupGuide => "Wallet setup guide",
        }
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.topic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_match_catalogue() {
        assert_eq!(Offering::BasicSession.price_usd(), 10);
        assert_eq!(Offering::ScamMasterclass.price_usd(), 25);
        assert_eq!(Offering::PremiumMonthly.price_usd(), 15);
        assert_eq!(Offering::WalletSetupGuide.price_usd(), 20);
    }

    #[test]
    fn deserializes_from_snake_case() {
        let o: Offering = serde_json::from_str("\"scam_masterclass\"").unwrap();
        assert_eq!(o, Offering::ScamMasterclass);
    }
}
