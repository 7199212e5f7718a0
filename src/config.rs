//! Runtime settings sourced from the environment (`.env` supported) and the
//! optional stock-catalog file.

use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::Quote;

/// Runtime configuration for the banking core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interest rate applied to savings balances, as a fraction.
    pub interest_rate: Decimal,
    /// Optional path to a JSON stock catalog; the built-in catalog is used
    /// when unset or unreadable.
    pub catalog_path: Option<String>,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let interest_rate = dotenv::var("BANKSIM_INTEREST_RATE")
            .ok()
            .and_then(|v| v.parse::<Decimal>().ok())
            .unwrap_or_else(default_interest_rate);

        let catalog_path = dotenv::var("BANKSIM_CATALOG").ok();

        Self {
            interest_rate,
            catalog_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interest_rate: default_interest_rate(),
            catalog_path: None,
        }
    }
}

fn default_interest_rate() -> Decimal {
    // 3% on savings
    Decimal::new(3, 2)
}

/// Load a stock catalog from a JSON file: an array of `{name, price}`
/// entries, quoted in catalog order.
pub fn load_catalog(path: &str) -> Result<Vec<Quote>> {
    let data = std::fs::read_to_string(path)?;
    let catalog: Vec<Quote> = serde_json::from_str(&data)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_config_matches_reference_rate() {
        let config = Config::default();
        assert_eq!(config.interest_rate, dec!(0.03));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn catalog_json_parses_in_order() {
        let raw = r#"[
            {"name": "Tesla", "price": 1000.0},
            {"name": "Aramco", "price": 10.0}
        ]"#;

        let catalog: Vec<Quote> = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Tesla");
        assert_eq!(catalog[0].price, dec!(1000));
        assert_eq!(catalog[1].name, "Aramco");
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        assert!(load_catalog("/definitely/not/here.json").is_err());
    }
}
