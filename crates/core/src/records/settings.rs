//! Business settings read by the aggregator.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tallybook_shared::types::Currency;

use super::{amount, lenient};

/// Expense categories offered out of the box.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 10] = [
    "Rent",
    "Utilities",
    "Salaries",
    "Supplies",
    "Inventory",
    "Marketing",
    "Travel",
    "Software",
    "Maintenance",
    "Other",
];

/// Business settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Reporting currency.
    #[serde(deserialize_with = "lenient_currency")]
    pub currency: Currency,
    /// Whether tax estimates are shown.
    #[serde(deserialize_with = "lenient::flag")]
    pub tax_enabled: bool,
    /// Tax rate in percent.
    #[serde(deserialize_with = "amount::deserialize")]
    pub tax_rate: Decimal,
    /// Cash in hand before the first record.
    #[serde(deserialize_with = "amount::deserialize_signed")]
    pub opening_cash: Decimal,
    /// Timezone defining local calendar days.
    #[serde(deserialize_with = "lenient_timezone")]
    pub timezone: Tz,
    /// Known expense categories.
    #[serde(deserialize_with = "lenient_categories")]
    pub expense_categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            tax_enabled: false,
            tax_rate: Decimal::ZERO,
            opening_cash: Decimal::ZERO,
            timezone: Tz::UTC,
            expense_categories: default_categories(),
        }
    }
}

impl Settings {
    /// Tax rate clamped to `0..=100`.
    #[must_use]
    pub fn effective_tax_rate(&self) -> Decimal {
        self.tax_rate.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Converts an instant to the business timezone.
    #[must_use]
    pub fn local_now(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }
}

fn lenient_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|code| code.parse().ok())
        .unwrap_or_default())
}

fn default_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn lenient_categories<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::string_list(deserializer)?.unwrap_or_else(default_categories))
}

fn lenient_timezone<'de, D>(deserializer: D) -> Result<Tz, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|name| name.trim().parse().ok())
        .unwrap_or(Tz::UTC))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.currency, Currency::Usd);
        assert!(!settings.tax_enabled);
        assert_eq!(settings.opening_cash, Decimal::ZERO);
        assert_eq!(settings.timezone, Tz::UTC);
        assert!(settings.expense_categories.iter().any(|c| c == "Other"));
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"taxEnabled":true,"taxRate":"18","openingCash":-250}"#)
                .unwrap();
        assert!(settings.tax_enabled);
        assert_eq!(settings.tax_rate, dec!(18));
        assert_eq!(settings.opening_cash, dec!(-250));
        assert_eq!(settings.currency, Currency::Usd);
    }

    #[test]
    fn test_bad_currency_and_timezone_fall_back() {
        let settings: Settings =
            serde_json::from_str(r#"{"currency":"dollars","timezone":"Mars/Olympus"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.timezone, Tz::UTC);
    }

    #[test]
    fn test_unlisted_currency_is_kept() {
        let settings: Settings = serde_json::from_str(r#"{"currency":"LKR"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Other("LKR".to_string()));

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["currency"], "LKR");
    }

    #[test]
    fn test_malformed_flags_and_categories_fall_back() {
        let settings: Settings = serde_json::from_str(
            r#"{"taxEnabled":"yes","expenseCategories":"Rent, Travel"}"#,
        )
        .unwrap();
        assert!(settings.tax_enabled);
        assert_eq!(settings.expense_categories, Settings::default().expense_categories);

        let settings: Settings =
            serde_json::from_str(r#"{"taxEnabled":null,"expenseCategories":["Rent",4,"Fuel"]}"#)
                .unwrap();
        assert!(!settings.tax_enabled);
        assert_eq!(settings.expense_categories, vec!["Rent", "Fuel"]);
    }

    #[test]
    fn test_timezone_and_currency_parse() {
        let settings: Settings =
            serde_json::from_str(r#"{"currency":"inr","timezone":"Asia/Kolkata"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Inr);
        assert_eq!(settings.timezone, chrono_tz::Asia::Kolkata);
    }

    #[test]
    fn test_effective_tax_rate_is_clamped() {
        let settings = Settings {
            tax_rate: dec!(150),
            ..Settings::default()
        };
        assert_eq!(settings.effective_tax_rate(), dec!(100));
    }
}
