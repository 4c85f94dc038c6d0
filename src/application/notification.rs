//! Trigger notification payloads.

use chrono::{DateTime, TimeZone};

use crate::domain::{format_price, Alert, ChatId, Price};
use crate::port::{Link, Notification};

/// Build the message sent when `alert` crosses its target at `current`.
pub fn triggered<Tz>(chat: ChatId, alert: &Alert, current: Price, at: DateTime<Tz>) -> Notification
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let coin = if current > alert.target { "🟢" } else { "🔴" };
    let exchange = alert.exchange;
    let verb = alert.direction().map_or("reached", |d| d.verb());

    let text = format!(
        "{coin} ${symbol}\n\
         {marker} {name}\n\
         \n\
         {symbol} {verb} ${target}\n\
         Target price: ${target}\n\
         Current price: ${current}\n\
         \n\
         🕓 {time}",
        symbol = alert.symbol,
        marker = exchange.marker(),
        name = exchange.label().to_uppercase(),
        target = format_price(alert.target),
        current = format_price(current),
        time = at.format("%H:%M:%S"),
    );

    let name = exchange.label().to_uppercase();
    Notification {
        chat,
        text,
        links: vec![
            Link::new(
                format!("🔗 {name}"),
                exchange.desktop_url(&alert.symbol),
            ),
            Link::new(
                format!("📱 {name} mobile"),
                exchange.mobile_url(&alert.symbol),
            ),
        ],
    }
}
