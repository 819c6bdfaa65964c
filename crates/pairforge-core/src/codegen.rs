//! Widget data file generation.
//!
//! Renders the QML-consumed JS data file: a header block, the `currencies`
//! table and the `exchanges` table with each exchange's confirmed pairs.
//! The whole artifact is assembled in memory; the caller decides whether to
//! print it, write it, or both.

use crate::currencies::Currency;
use crate::exchange::{ExchangeDescriptor, ExchangeSet};

/// Render the complete generated artifact.
pub fn render(currencies: &[Currency], exchanges: &ExchangeSet) -> String {
    let mut lines = build_header();
    lines.extend(build_currencies(currencies));
    lines.extend(build_exchanges(exchanges));
    lines.join("\n")
}

fn build_header() -> Vec<String> {
    vec![
        String::from("// This file is auto-generated. DO NOT EDIT BY HAND"),
        String::from("// Use pairforge to rebuild this file if needed"),
        String::new(),
        String::from("// https://doc.qt.io/qt-5/qtqml-javascript-resources.html"),
        String::from(".pragma library"),
        String::new(),
    ]
}

fn build_currencies(currencies: &[Currency]) -> Vec<String> {
    let mut sorted: Vec<&Currency> = currencies.iter().collect();
    sorted.sort_by_key(|currency| currency.code);

    let mut lines = vec![String::from("var currencies = {")];
    for currency in sorted {
        let mut row = format!("\t\"{}\": {{\"code\": \"{}\", ", currency.code, currency.code);
        if currency.name != currency.code {
            row.push_str(&format!("\"name\": \"{}\", ", currency.name));
        }
        if let Some(symbol) = currency.symbol {
            row.push_str(&format!("\"symbol\": \"{symbol}\", "));
        }
        row.push_str("},");
        lines.push(row);
    }
    lines.push(String::from("}"));
    lines
}

fn build_exchanges(exchanges: &ExchangeSet) -> Vec<String> {
    let mut lines = vec![String::from("var exchanges = {")];
    for exchange in exchanges.iter() {
        lines.extend(build_exchange(exchange));
    }
    lines.push(String::from("}"));
    lines.push(String::new());
    lines
}

fn build_exchange(exchange: &ExchangeDescriptor) -> Vec<String> {
    let mut lines = vec![
        format!("\t\"{}\": {{", exchange.code),
        format!("\t\t\"name\": \"{}\",", exchange.name),
        format!("\t\t\"url\": \"{}\",", exchange.url),
        String::from("\t\t\"getUrl\": function(crypto, pair) {"),
        format!("\t\t\t{}", exchange.url_expression),
        String::from("\t\t},"),
        String::from("\t\t\"getRateFromExchangeData\": function(data, crypto, pair) {"),
        format!("\t\t\t{}", exchange.rate_expression),
        String::from("\t\t},"),
        String::from("\t\t\"pairs\": {"),
    ];

    for (base, quotes) in exchange.pairs.iter() {
        let mut quotes: Vec<&str> = quotes.iter().map(|quote| quote.as_str()).collect();
        quotes.sort_unstable();
        let mut row = format!("\t\t\t\"{base}\": [");
        for quote in quotes {
            row.push_str(&format!("\"{quote}\","));
        }
        row.push_str("],");
        lines.push(row);
    }

    lines.push(String::from("\t\t},"));
    lines.push(String::from("\t},"));
    lines
}
