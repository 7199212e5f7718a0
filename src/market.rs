//! The stock market: a fixed catalog of instruments whose prices move by a
//! bounded random walk, one tick at a time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::models::Quote;

// Price moves are quantized to whole basis points so every tick stays exact
// in decimal arithmetic. One tick perturbs each price by at most ±5%.
const MAX_TICK_BPS: i64 = 500;

lazy_static::lazy_static! {
    /// Smallest price a tick can leave behind.
    static ref PRICE_FLOOR: Decimal = Decimal::new(1, 2);

    /// The built-in catalog and its starting prices.
    static ref DEFAULT_CATALOG: Vec<Quote> = vec![
        quote("Tesla", 1000_00),
        quote("Google", 1500_00),
        quote("Apple", 120_00),
        quote("Amazon", 2000_00),
        quote("Meta", 250_00),
        quote("Nvidia", 300_00),
        quote("Aramco", 10_00),
        quote("Nike", 110_00),
        quote("Goldman Sachs", 250_00),
        quote("Chase", 130_00),
    ];
}

fn quote(name: &str, cents: i64) -> Quote {
    Quote {
        name: name.to_string(),
        price: Decimal::new(cents, 2),
    }
}

/// The built-in ten-instrument catalog.
pub fn default_catalog() -> Vec<Quote> {
    DEFAULT_CATALOG.clone()
}

/// Market-wide instrument prices. Prices are shared by all accounts and only
/// ever move through [`StockMarket::advance_prices`].
pub struct StockMarket {
    stocks: Vec<Quote>,
    rng: StdRng,
}

impl StockMarket {
    /// Market over the built-in catalog, seeded from entropy.
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    /// Market over a custom catalog, seeded from entropy.
    pub fn with_catalog(catalog: Vec<Quote>) -> Self {
        Self {
            stocks: catalog,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic market for tests: same seed, same walk.
    pub fn with_seed(catalog: Vec<Quote>, seed: u64) -> Self {
        Self {
            stocks: catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Apply one market tick: every price is multiplied by `1 + u` with `u`
    /// uniform in [-0.05, 0.05], rounded to cents, and floored at 0.01.
    pub fn advance_prices(&mut self) {
        for stock in &mut self.stocks {
            let bps = self.rng.gen_range(-MAX_TICK_BPS..=MAX_TICK_BPS);
            let factor = Decimal::ONE + Decimal::new(bps, 4);
            let next = (stock.price * factor).round_dp(2);
            stock.price = if next <= Decimal::ZERO {
                *PRICE_FLOOR
            } else {
                next
            };
        }
        tracing::debug!("market tick applied to {} instruments", self.stocks.len());
    }

    /// Current quotes in catalog order, without moving the market.
    pub fn quotes(&self) -> &[Quote] {
        &self.stocks
    }

    /// Quotes as the original system served them: viewing the market is
    /// itself a tick.
    pub fn list_stocks(&mut self) -> &[Quote] {
        self.advance_prices();
        &self.stocks
    }
}

impl Default for StockMarket {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_catalog_has_ten_instruments_in_order() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog[0].name, "Tesla");
        assert_eq!(catalog[0].price, dec!(1000.00));
        assert_eq!(catalog[9].name, "Chase");
        assert_eq!(catalog[9].price, dec!(130.00));
    }

    #[test]
    fn tick_stays_within_five_percent_and_positive() {
        let mut market = StockMarket::with_seed(default_catalog(), 7);

        for _ in 0..50 {
            let before: Vec<Decimal> = market.quotes().iter().map(|q| q.price).collect();
            market.advance_prices();

            for (old, quote) in before.iter().zip(market.quotes()) {
                assert!(quote.price >= dec!(0.01), "{} went below the floor", quote.name);
                let drift = (quote.price - old).abs();
                // cent rounding can add up to half a cent on top of the 5% band
                assert!(
                    drift <= old * dec!(0.05) + dec!(0.005),
                    "{} moved {} from {}",
                    quote.name,
                    drift,
                    old
                );
            }
        }
    }

    #[test]
    fn same_seed_walks_the_same_path() {
        let mut a = StockMarket::with_seed(default_catalog(), 42);
        let mut b = StockMarket::with_seed(default_catalog(), 42);

        for _ in 0..10 {
            a.advance_prices();
            b.advance_prices();
        }

        assert_eq!(a.quotes(), b.quotes());
    }

    #[test]
    fn listing_stocks_moves_the_market() {
        let mut market = StockMarket::with_seed(default_catalog(), 1);
        let before: Vec<Decimal> = market.quotes().iter().map(|q| q.price).collect();

        let after: Vec<Decimal> = market.list_stocks().iter().map(|q| q.price).collect();

        // with ten instruments at ±5% a fully unchanged board is as good as
        // impossible for this seed
        assert_ne!(before, after);
    }

    #[test]
    fn penny_prices_never_clamp_below_floor() {
        let catalog = vec![Quote {
            name: "Penny".to_string(),
            price: dec!(0.01),
        }];
        let mut market = StockMarket::with_seed(catalog, 9);

        for _ in 0..200 {
            market.advance_prices();
            assert!(market.quotes()[0].price >= dec!(0.01));
        }
    }
}
