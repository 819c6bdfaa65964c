//! Behavior tests for the built-in registry and the generated artifact.

use pairforge_core::{
    codegen, tasks, validator::ValidatorMap, ExchangeSet, HttpResponse, Instrument, CURRENCIES,
};

fn inst(code: &str) -> Instrument {
    Instrument::parse(code).expect("valid instrument")
}

#[test]
fn builtin_validators_cover_every_builtin_exchange() {
    let exchanges = ExchangeSet::builtin().expect("registry");
    let validators = ValidatorMap::builtin();

    // Each registered validator rejects a non-2xx response outright.
    let server_error = HttpResponse::with_status(500, "{}");
    for exchange in exchanges.iter() {
        let validator = validators.get(&exchange.code);
        assert!(
            !validator(&server_error),
            "{} validator accepted a 500",
            exchange.code
        );
    }
}

#[test]
fn binance_validator_distinguishes_real_tickers() {
    let validators = ValidatorMap::builtin();
    let validator = validators.get("binance-com");

    let listed = HttpResponse::ok_json(r#"{"symbol":"BTCEUR","price":"58123.45"}"#);
    let unlisted = HttpResponse::ok_json(r#"{"code":-1121,"msg":"Invalid symbol."}"#);
    assert!(validator(&listed));
    assert!(!validator(&unlisted));
}

#[test]
fn bitstamp_tasks_stay_inside_the_allow_list() {
    let exchanges = ExchangeSet::builtin().expect("registry");
    let bitstamp = exchanges.get("bitstamp-net").expect("present");
    let allow_list = bitstamp.allow_list.as_ref().expect("allow-list configured");

    let tasks = tasks::generate(bitstamp);
    assert!(!tasks.is_empty());
    for task in &tasks {
        let concat = format!("{}{}", task.base, task.quote);
        assert!(allow_list.contains(&concat), "{concat} outside allow-list");
    }
    // Far fewer checks than the raw cross product of ~44 instruments.
    assert!(tasks.len() < 100);
}

#[test]
fn bitstamp_urls_are_lowercase() {
    let exchanges = ExchangeSet::builtin().expect("registry");
    let bitstamp = exchanges.get("bitstamp-net").expect("present");
    assert_eq!(
        bitstamp.ticker_url(&inst("BTC"), &inst("USD")),
        "https://www.bitstamp.net/api/v2/ticker/btcusd"
    );
}

#[test]
fn no_builtin_exchange_generates_self_pairs() {
    let exchanges = ExchangeSet::builtin().expect("registry");
    for exchange in exchanges.iter() {
        for task in tasks::generate(exchange) {
            assert_ne!(task.base, task.quote, "self pair on {}", exchange.code);
        }
    }
}

#[test]
fn artifact_lists_every_exchange_and_confirmed_pair() {
    let mut exchanges = ExchangeSet::builtin().expect("registry");
    {
        let kraken = exchanges.get_mut("kraken-com").expect("present");
        kraken.pairs.insert(inst("BTC"), inst("USD"));
        kraken.pairs.insert(inst("BTC"), inst("EUR"));
        kraken.pairs.insert(inst("ETH"), inst("EUR"));
    }

    let rendered = codegen::render(CURRENCIES, &exchanges);

    for exchange in exchanges.iter() {
        assert!(rendered.contains(&format!("\"{}\": {{", exchange.code)));
    }
    assert!(rendered.contains("\t\t\t\"BTC\": [\"EUR\",\"USD\",],"));
    assert!(rendered.contains("\t\t\t\"ETH\": [\"EUR\",],"));

    // Currency table entries round-trip, symbol included.
    assert!(rendered.contains("\"BTC\": {\"code\": \"BTC\", \"name\": \"Bitcoin\", \"symbol\": \"₿\", },"));
}

#[test]
fn artifact_is_deterministic_for_identical_state() {
    let exchanges = ExchangeSet::builtin().expect("registry");
    let first = codegen::render(CURRENCIES, &exchanges);
    let second = codegen::render(CURRENCIES, &exchanges);
    assert_eq!(first, second);
}
