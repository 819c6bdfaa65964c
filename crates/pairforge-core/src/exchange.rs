//! Exchange descriptors and the run-scoped registry.
//!
//! The registry is an explicit value threaded through task generation,
//! dispatch and aggregation; there is no process-wide singleton.

use std::collections::HashSet;

use crate::currencies;
use crate::domain::{Instrument, PairTable};
use crate::ValidationError;

/// Static description of one exchange plus its per-run confirmed-pairs
/// table. The API URL template uses `{base}`/`{quote}` placeholders.
#[derive(Debug, Clone)]
pub struct ExchangeDescriptor {
    pub code: String,
    pub name: String,
    pub url: String,
    pub api_url: String,
    /// Some APIs (Bitstamp) only answer lowercase symbol paths.
    pub lowercase_symbols: bool,
    pub instruments: Vec<Instrument>,
    /// When present, only "BASEQUOTE" members are ever checked. Guards
    /// against cross-products orders of magnitude larger than the listing.
    pub allow_list: Option<HashSet<String>>,
    pub disabled: bool,
    /// JS body of the widget's getUrl(crypto, pair) function.
    pub url_expression: String,
    /// JS body of the widget's getRateFromExchangeData(data, ...) function.
    pub rate_expression: String,
    pub pairs: PairTable,
}

impl ExchangeDescriptor {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            url: url.into(),
            api_url: api_url.into(),
            lowercase_symbols: false,
            instruments: currencies::instruments(),
            allow_list: None,
            disabled: false,
            url_expression: String::new(),
            rate_expression: String::new(),
            pairs: PairTable::new(),
        }
    }

    pub fn with_lowercase_symbols(mut self) -> Self {
        self.lowercase_symbols = true;
        self
    }

    pub fn with_instruments(mut self, instruments: Vec<Instrument>) -> Self {
        self.instruments = instruments;
        self
    }

    pub fn with_allow_list<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = Some(pairs.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_expressions(
        mut self,
        url_expression: impl Into<String>,
        rate_expression: impl Into<String>,
    ) -> Self {
        self.url_expression = url_expression.into();
        self.rate_expression = rate_expression.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether a (base, quote) combination may be checked at all.
    pub fn is_pair_allowed(&self, base: &Instrument, quote: &Instrument) -> bool {
        match &self.allow_list {
            None => true,
            Some(list) => list.contains(&format!("{base}{quote}")),
        }
    }

    /// Fill the API URL template for one pair, case-folding when required.
    pub fn ticker_url(&self, base: &Instrument, quote: &Instrument) -> String {
        let (base, quote) = if self.lowercase_symbols {
            (base.to_lowercase(), quote.to_lowercase())
        } else {
            (base.as_str().to_string(), quote.as_str().to_string())
        };
        self.api_url.replace("{base}", &base).replace("{quote}", &quote)
    }
}

/// Insertion-ordered exchange registry for one run.
#[derive(Debug, Clone, Default)]
pub struct ExchangeSet {
    entries: Vec<ExchangeDescriptor>,
}

impl ExchangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an exchange. Duplicate ids are a configuration error.
    pub fn register(&mut self, descriptor: ExchangeDescriptor) -> Result<(), ValidationError> {
        if self.get(&descriptor.code).is_some() {
            return Err(ValidationError::DuplicateExchange {
                code: descriptor.code,
            });
        }
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&ExchangeDescriptor> {
        self.entries.iter().find(|ex| ex.code == code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut ExchangeDescriptor> {
        self.entries.iter_mut().find(|ex| ex.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Without a filter, drop disabled exchanges. With a substring filter,
    /// keep only exchanges whose code or name contains it and force them
    /// enabled (an explicitly requested exchange ignores its disabled flag).
    pub fn retain_matching(&mut self, filter: Option<&str>) {
        match filter {
            None => self.entries.retain(|ex| !ex.disabled),
            Some(needle) => {
                self.entries
                    .retain(|ex| ex.code.contains(needle) || ex.name.contains(needle));
                for ex in &mut self.entries {
                    ex.disabled = false;
                }
            }
        }
    }

    /// The exchange registry shipped with the widget.
    pub fn builtin() -> Result<Self, ValidationError> {
        let mut set = Self::new();

        set.register(
            ExchangeDescriptor::new(
                "binance-com",
                "Binance",
                "https://binance.com/",
                "https://api1.binance.com/api/v3/ticker/price?symbol={base}{quote}",
            )
            .with_expressions(
                "return `https://api1.binance.com/api/v3/ticker/price?symbol=${crypto}${pair}`",
                "return data.price",
            ),
        )?;

        // GET ticker docs: https://www.bitstamp.net/api/#ticker
        set.register(
            ExchangeDescriptor::new(
                "bitstamp-net",
                "Bitstamp",
                "https://bitstamp.net/",
                "https://www.bitstamp.net/api/v2/ticker/{base}{quote}",
            )
            .with_lowercase_symbols()
            .with_allow_list(BITSTAMP_PAIRS.iter().copied())
            .with_expressions(
                "return `https://www.bitstamp.net/api/v2/ticker/${crypto.toLowerCase()}${pair.toLowerCase()}`",
                "return data.ask",
            ),
        )?;

        set.register(
            ExchangeDescriptor::new(
                "bitbay-net",
                "BitBay",
                "https://bitbay.net/",
                "https://api.zonda.exchange/rest/trading/ticker/{base}-{quote}",
            )
            .with_expressions(
                "return `https://api.zonda.exchange/rest/trading/ticker/${crypto}-${pair}`",
                "return data.ask",
            ),
        )?;

        set.register(
            ExchangeDescriptor::new(
                "coinmate-io",
                "Coinmate",
                "https://coinmate.io/",
                "https://coinmate.io/api/ticker?currencyPair={base}_{quote}",
            )
            .with_expressions(
                "return `https://coinmate.io/api/ticker?currencyPair=${crypto}_${pair}`",
                "return data.data.ask",
            ),
        )?;

        set.register(
            ExchangeDescriptor::new(
                "kraken-com",
                "Kraken",
                "https://kraken.com/",
                "https://api.kraken.com/0/public/Ticker?pair={base}{quote}",
            )
            .with_expressions(
                "return `https://api.kraken.com/0/public/Ticker?pair=${crypto}${pair}`",
                // Kraken keys the result object by its own asset-pair spelling.
                "return data.result[Object.keys(data['result'])[0]].a[0]",
            ),
        )?;

        Ok(set)
    }
}

/// Pairs Bitstamp actually lists, per its ticker endpoint documentation.
const BITSTAMP_PAIRS: &[&str] = &[
    "BTCUSD", "BTCEUR", "BTCGBP", "BTCPAX", "BTCUSDC", "GBPUSD", "GBPEUR", "EURUSD", "ETHUSD",
    "ETHEUR", "ETHBTC", "ETHGBP", "ETHPAX", "ETHUSDC", "XRPUSD", "XRPEUR", "XRPBTC", "XRPGBP",
    "XRPPAX", "UNIUSD", "UNIEUR", "UNIBTC", "LTCUSD", "LTCEUR", "LTCBTC", "LTCGBP", "LINKUSD",
    "LINKEUR", "LINKGBP", "LINKBTC", "LINKETH", "XLMBTC", "XLMUSD", "XLMEUR", "XLMGBP", "BCHUSD",
    "BCHEUR", "BCHBTC", "BCHGBP", "AAVEUSD", "AAVEEUR", "AAVEBTC", "ALGOUSD", "ALGOEUR",
    "ALGOBTC", "SNXUSD", "SNXEUR", "SNXBTC", "BATUSD", "BATEUR", "BATBTC", "MKRUSD", "MKREUR",
    "MKRBTC", "ZRXUSD", "ZRXEUR", "ZRXBTC", "YFIUSD", "YFIEUR", "YFIBTC", "UMAUSD", "UMAEUR",
    "UMABTC", "OMGUSD", "OMGEUR", "OMGGBP", "OMGBTC", "KNCUSD", "KNCEUR", "KNCBTC", "CRVUSD",
    "CRVEUR", "CRVBTC", "AUDIOUSD", "AUDIOEUR", "AUDIOBTC", "USDCUSD", "USDCEUR", "DAIUSD",
    "PAXUSD", "PAXEUR", "PAXGBP", "ETH2ETH", "GUSDUSD",
];
