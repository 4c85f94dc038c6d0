//! `price` and `compare` commands.

use tabled::{Table, Tabled};

use crate::application::Comparison;
use crate::cli::{output, CompareArgs, PriceArgs};
use crate::domain::{format_price, Exchange, Symbol};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_price_sources;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct QuoteRow {
    #[tabled(rename = "Exchange")]
    exchange: &'static str,
    #[tabled(rename = "Price")]
    price: String,
}

/// Fetch one price and print it.
pub async fn execute_price(args: &PriceArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let symbol = Symbol::parse(&args.symbol)?;
    let exchange: Exchange = args.exchange.parse()?;

    let price = build_price_sources(&config)
        .fetch(&symbol, exchange)
        .await
        .map_err(|e| e.into_alert_error(&symbol))?;

    output::field(
        &format!("{symbol} ({})", exchange.label()),
        output::highlight(format!("${}", format_price(price))),
    );
    Ok(())
}

/// Fetch a symbol from every exchange and print a comparison table.
pub async fn execute_compare(args: &CompareArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let symbol = Symbol::parse(&args.symbol)?;

    let results = build_price_sources(&config).fetch_all(&symbol).await;
    let comparison = Comparison::from_results(symbol, results);

    output::section(&format!("{} across exchanges", comparison.symbol));
    println!();
    if comparison.not_listed_anywhere() {
        output::error(&format!("{} not found on any exchange", comparison.symbol));
        return Ok(());
    }

    output::table(&Table::new(quote_rows(&comparison)).to_string());
    println!();

    if let (Some((high_ex, high)), Some((low_ex, low)), Some(spread)) = (
        comparison.highest(),
        comparison.lowest(),
        comparison.spread(),
    ) {
        output::field(
            "Highest",
            format!("{} ${}", high_ex.label(), output::positive(format_price(high))),
        );
        output::field(
            "Lowest",
            format!("{} ${}", low_ex.label(), output::negative(format_price(low))),
        );
        let percent = comparison
            .spread_percent()
            .map(|p| format!(" ({}%)", format_price(p)))
            .unwrap_or_default();
        output::field("Spread", format!("${}{percent}", format_price(spread)));
    } else {
        output::warning("No exchange answered, try again shortly");
    }
    Ok(())
}

fn quote_rows(comparison: &Comparison) -> Vec<QuoteRow> {
    let quoted = comparison.quotes.iter().map(|(exchange, price)| QuoteRow {
        exchange: exchange.label(),
        price: format!("${}", format_price(*price)),
    });
    let missing = comparison.missing.iter().map(|(exchange, _)| QuoteRow {
        exchange: exchange.label(),
        price: "N/A".to_string(),
    });
    quoted.chain(missing).collect()
}
