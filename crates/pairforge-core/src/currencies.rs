//! Static currency/token table shared by every exchange descriptor and by
//! the generated artifact.

use crate::domain::Instrument;

/// One currency or token known to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: Option<&'static str>,
}

const fn plain(code: &'static str, name: &'static str) -> Currency {
    Currency {
        code,
        name,
        symbol: None,
    }
}

const fn symbolic(code: &'static str, name: &'static str, symbol: &'static str) -> Currency {
    Currency {
        code,
        name,
        symbol: Some(symbol),
    }
}

/// All currencies the tool knows about, in code order.
pub const CURRENCIES: &[Currency] = &[
    plain("1INCH", "1inch"),
    plain("ADA", "Cardano"),
    plain("ATOM", "Cosmos"),
    symbolic("BCH", "Bitcoin Cash", "฿"),
    plain("BNB", "Binance Coin"),
    plain("BNT", "Bancor"),
    plain("BSV", "Bitcoin SV"),
    symbolic("BTC", "Bitcoin", "₿"),
    plain("BTG", "Bitcoin Gold"),
    plain("BTT", "BitTorrent"),
    symbolic("BUSD", "Binance USD", "B$"),
    plain("COMP", "Compound"),
    symbolic("CZK", "Czech Krown", "Kč"),
    plain("DASH", "Dash"),
    plain("DOGE", "Dogecoin"),
    plain("DOT", "Polkadot"),
    plain("EOS", "EOS"),
    plain("ETC", "Ethereum Classic"),
    symbolic("ETH", "Ethereum", "Ξ"),
    symbolic("EUR", "Euro", "€"),
    plain("FIL", "Filecoin"),
    plain("GAME", "GameCredits"),
    symbolic("GBP", "British Pound", "£"),
    plain("GLM", "Golem"),
    symbolic("JPY", "Japanese Yen", "¥"),
    plain("LINK", "Chainlink"),
    plain("LSK", "Lisk"),
    symbolic("LTC", "Litecoin", "Ł"),
    plain("LUNA", "Terra"),
    plain("MKR", "Maker"),
    symbolic("PLN", "Polish Zloty", "zł"),
    plain("SOL", "Solana"),
    plain("THETA", "Theta"),
    plain("UNI", "Uniswap"),
    symbolic("USD", "US Dollar", "$"),
    symbolic("USDC", "USD Coin", "$C"),
    symbolic("USDT", "USD Tether", "$T"),
    plain("WBTC", "Wrapped Bitcoin"),
    plain("XLM", "Stellar"),
    plain("XMR", "Monero"),
    symbolic("XRP", "Ripple", "Ʀ"),
    plain("XTZ", "Tezos"),
    plain("ZEC", "ZCash"),
    plain("ZRX", "0x"),
];

/// The table as parsed instrument codes, in table order.
pub fn instruments() -> Vec<Instrument> {
    CURRENCIES
        .iter()
        .filter_map(|currency| Instrument::parse(currency.code).ok())
        .collect()
}
