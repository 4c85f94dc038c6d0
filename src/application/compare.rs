//! Cross-exchange price comparison.

use rust_decimal::Decimal;

use crate::domain::{Exchange, Price, Symbol};
use crate::port::PriceError;

/// One symbol quoted on every exchange that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub symbol: Symbol,
    /// Exchanges that returned a price, in display order.
    pub quotes: Vec<(Exchange, Price)>,
    /// Exchanges that did not, with the reason.
    pub missing: Vec<(Exchange, PriceError)>,
}

impl Comparison {
    /// Split raw fetch results into quotes and misses.
    #[must_use]
    pub fn from_results(symbol: Symbol, results: Vec<(Exchange, Result<Price, PriceError>)>) -> Self {
        let mut quotes = Vec::new();
        let mut missing = Vec::new();
        for (exchange, result) in results {
            match result {
                Ok(price) => quotes.push((exchange, price)),
                Err(e) => missing.push((exchange, e)),
            }
        }
        Self {
            symbol,
            quotes,
            missing,
        }
    }

    /// Exchange quoting the highest price.
    #[must_use]
    pub fn highest(&self) -> Option<(Exchange, Price)> {
        self.quotes.iter().copied().max_by(|a, b| a.1.cmp(&b.1))
    }

    /// Exchange quoting the lowest price.
    #[must_use]
    pub fn lowest(&self) -> Option<(Exchange, Price)> {
        self.quotes.iter().copied().min_by(|a, b| a.1.cmp(&b.1))
    }

    /// Highest minus lowest, over valid quotes only.
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        Some(self.highest()?.1 - self.lowest()?.1)
    }

    /// Spread as a percentage of the lowest quote, to two decimals.
    #[must_use]
    pub fn spread_percent(&self) -> Option<Decimal> {
        let low = self.lowest()?.1;
        if low.is_zero() {
            return None;
        }
        Some((self.spread()? / low * Decimal::ONE_HUNDRED).round_dp(2))
    }

    /// True if every exchange reported the symbol as absent.
    #[must_use]
    pub fn not_listed_anywhere(&self) -> bool {
        self.quotes.is_empty() && self.missing.iter().all(|(_, e)| e.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc() -> Symbol {
        Symbol::parse("BTC").unwrap()
    }

    fn not_found(exchange: Exchange) -> PriceError {
        PriceError::NotFound {
            exchange,
            symbol: btc(),
        }
    }

    #[test]
    fn spread_ignores_missing_exchange() {
        let cmp = Comparison::from_results(
            btc(),
            vec![
                (Exchange::Binance, Ok(dec!(95000))),
                (Exchange::Bybit, Ok(dec!(95100))),
                (Exchange::Bitget, Ok(dec!(94950))),
                (Exchange::Mexc, Err(not_found(Exchange::Mexc))),
            ],
        );
        assert_eq!(cmp.quotes.len(), 3);
        assert_eq!(cmp.missing.len(), 1);
        assert_eq!(cmp.highest(), Some((Exchange::Bybit, dec!(95100))));
        assert_eq!(cmp.lowest(), Some((Exchange::Bitget, dec!(94950))));
        assert_eq!(cmp.spread(), Some(dec!(150)));
        assert_eq!(cmp.spread_percent(), Some(dec!(0.16)));
        assert!(!cmp.not_listed_anywhere());
    }

    #[test]
    fn single_quote_has_zero_spread() {
        let cmp = Comparison::from_results(btc(), vec![(Exchange::Binance, Ok(dec!(10)))]);
        assert_eq!(cmp.spread(), Some(Decimal::ZERO));
    }

    #[test]
    fn no_quotes_means_no_spread() {
        let cmp = Comparison::from_results(
            btc(),
            Exchange::ALL.into_iter().map(|e| (e, Err(not_found(e)))).collect(),
        );
        assert_eq!(cmp.spread(), None);
        assert!(cmp.not_listed_anywhere());
    }
}
