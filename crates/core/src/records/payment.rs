//! Payment methods and their cash/bank classification.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// How a record was paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// No method recorded.
    #[default]
    Unspecified,
    /// Cash.
    Cash,
    /// Bank account.
    Bank,
    /// Debit or credit card.
    Card,
    /// Generic online payment.
    Online,
    /// Online bank transfer.
    OnlineTransfer,
    /// Online payment gateway.
    OnlinePayment,
    /// Anything else, normalized.
    Other(String),
}

/// Balance bucket a payment method feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentClass {
    /// Cash in hand.
    Cash,
    /// Bank balance.
    Bank,
    /// Neither bucket; still counted in income/expense totals.
    Unclassified,
}

/// Normalizes a raw method: trimmed, lowercased, separators collapsed to `_`.
fn normalize(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

impl PaymentMethod {
    /// Parses a raw method string, never failing.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "" => Self::Unspecified,
            "cash" => Self::Cash,
            "bank" => Self::Bank,
            "card" => Self::Card,
            "online" => Self::Online,
            "online_transfer" => Self::OnlineTransfer,
            "online_payment" => Self::OnlinePayment,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the normalized wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unspecified => "",
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Card => "card",
            Self::Online => "online",
            Self::OnlineTransfer => "online_transfer",
            Self::OnlinePayment => "online_payment",
            Self::Other(raw) => raw,
        }
    }

    /// Classifies this method for balance purposes.
    #[must_use]
    pub fn class(&self) -> PaymentClass {
        classify(self)
    }
}

/// Classifies a payment method into the cash or bank bucket.
///
/// Empty and `cash` are cash-equivalent; `bank`, `card` and the online family are
/// bank-equivalent; anything else is unclassified.
#[must_use]
pub fn classify(method: &PaymentMethod) -> PaymentClass {
    match method {
        PaymentMethod::Unspecified | PaymentMethod::Cash => PaymentClass::Cash,
        PaymentMethod::Bank
        | PaymentMethod::Card
        | PaymentMethod::Online
        | PaymentMethod::OnlineTransfer
        | PaymentMethod::OnlinePayment => PaymentClass::Bank,
        PaymentMethod::Other(_) => PaymentClass::Unclassified,
    }
}

impl From<&str> for PaymentMethod {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => Self::parse(&raw),
            Value::Null => Self::Unspecified,
            other => Self::parse(&other.to_string()),
        })
    }
}
