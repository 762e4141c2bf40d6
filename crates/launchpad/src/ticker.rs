//! Cosmetic market price ticker
//!
//! Prices start from fixed defaults, are replaced by a public quote on a slow
//! timer and random-walk on a fast timer. A failed quote keeps whatever was
//! displayed before.

use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use gaspad_types::*;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::PriceConfig;
use crate::error::LaunchpadResult;
use crate::random::RandomSource;

// ============================================================================
// Prices
// ============================================================================

/// USD prices shown by the ticker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prices {
    pub sol: f64,
    pub btc: f64,
    pub eth: f64,
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            sol: DEFAULT_SOL_PRICE,
            btc: DEFAULT_BTC_PRICE,
            eth: DEFAULT_ETH_PRICE,
        }
    }
}

impl Prices {
    /// Replace all three prices when the quote carries all three
    pub fn apply_quote(&mut self, quote: &PriceQuote) -> bool {
        match quote.prices() {
            Some(prices) => {
                *self = prices;
                true
            }
            None => false,
        }
    }

    /// One random-walk step
    pub fn jitter(&mut self, random: &mut dyn RandomSource) {
        let (sol, btc, eth) = JITTER_AMPLITUDE;
        self.sol += (random.next_f64() - 0.5) * sol;
        self.btc += (random.next_f64() - 0.5) * btc;
        self.eth += (random.next_f64() - 0.5) * eth;
    }

    pub fn sol_display(&self) -> String {
        format_usd(self.sol, 2)
    }

    pub fn btc_display(&self) -> String {
        format_usd(self.btc, 0)
    }

    pub fn eth_display(&self) -> String {
        format_usd(self.eth, 2)
    }
}

impl fmt::Display for Prices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SOL {}  BTC {}  ETH {}",
            self.sol_display(),
            self.btc_display(),
            self.eth_display()
        )
    }
}

/// `$` amount with thousands separators and a fixed number of decimals
pub fn format_usd(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{}${}.{}", sign, grouped, fraction),
        None => format!("{}${}", sign, grouped),
    }
}

// ============================================================================
// Quote Source
// ============================================================================

/// Quote payload, `{"solana":{"usd":..},"bitcoin":{..},"ethereum":{..}}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub solana: Option<UsdQuote>,
    #[serde(default)]
    pub bitcoin: Option<UsdQuote>,
    #[serde(default)]
    pub ethereum: Option<UsdQuote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UsdQuote {
    pub usd: Option<f64>,
}

impl PriceQuote {
    /// All three prices, or `None` if any is missing
    pub fn prices(&self) -> Option<Prices> {
        let usd = |quote: &Option<UsdQuote>| quote.and_then(|q| q.usd);
        Some(Prices {
            sol: usd(&self.solana)?,
            btc: usd(&self.bitcoin)?,
            eth: usd(&self.ethereum)?,
        })
    }
}

/// Source of market quotes
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch(&self) -> GasPadResult<PriceQuote>;
}

/// CoinGecko simple price endpoint
pub struct CoinGeckoFeed {
    client: reqwest::Client,
    endpoint: String,
}

impl CoinGeckoFeed {
    pub fn new(config: &PriceConfig) -> LaunchpadResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    async fn fetch(&self) -> GasPadResult<PriceQuote> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| GasPadError::network(&format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GasPadError::network(&format!("Price API error: {}", response.status())));
        }

        response
            .json::<PriceQuote>()
            .await
            .map_err(|e| GasPadError::malformed_response("coingecko", &e.to_string()))
    }
}

// ============================================================================
// Ticker Tasks
// ============================================================================

/// Fetch one quote and publish it; failures keep the current prices
pub async fn refresh(feed: &dyn PriceFeed, prices: &watch::Sender<Prices>) -> bool {
    match feed.fetch().await {
        Ok(quote) => {
            let mut applied = false;
            prices.send_modify(|current| applied = current.apply_quote(&quote));
            if applied {
                debug!("Applied market quote: {}", *prices.borrow());
            } else {
                warn!("Market quote incomplete, keeping simulated prices");
            }
            applied
        }
        Err(e) => {
            warn!("Market data fetch failed, keeping simulated prices: {}", e);
            false
        }
    }
}

/// Starts the refresh and jitter timers
pub struct PriceTicker;

impl PriceTicker {
    /// Spawn both timers on the current tokio runtime
    ///
    /// The first quote is requested immediately.
    pub fn spawn(feed: Arc<dyn PriceFeed>, mut random: Box<dyn RandomSource>, config: &PriceConfig) -> TickerHandle {
        let (sender, receiver) = watch::channel(Prices::default());
        let sender = Arc::new(sender);

        let refresh_every = config.refresh_interval();
        let refresh_sender = Arc::clone(&sender);
        let refresh_task = tokio::spawn(async move {
            let mut ticks = interval(refresh_every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                refresh(feed.as_ref(), &refresh_sender).await;
            }
        });

        let jitter_every = config.jitter_interval();
        let jitter_task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + jitter_every, jitter_every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                sender.send_modify(|prices| prices.jitter(random.as_mut()));
            }
        });

        TickerHandle {
            prices: receiver,
            tasks: vec![refresh_task, jitter_task],
        }
    }
}

/// Owns the ticker timers; dropping it stops them
pub struct TickerHandle {
    prices: watch::Receiver<Prices>,
    tasks: Vec<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn current(&self) -> Prices {
        *self.prices.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Prices> {
        self.prices.clone()
    }

    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Convenience for polling callers
    pub async fn changed(&mut self) -> Option<Prices> {
        self.prices.changed().await.ok()?;
        Some(*self.prices.borrow_and_update())
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
