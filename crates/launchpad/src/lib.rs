pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod flow;
pub mod image;
pub mod random;
pub mod score;
pub mod storage;
pub mod store;
pub mod ticker;
pub mod wallet;

pub use app::{GasPad, LaunchAttempt};
pub use clock::{Clock, FixedClock, ImmediateScheduler, Scheduler, SystemClock, TokioScheduler};
pub use config::{LaunchpadConfig, FlowConfig, PriceConfig, QualityScorePolicy, WalletConfig};
pub use error::{LaunchpadError, LaunchpadResult};
pub use flow::{FlowCanceller, FlowOutcome, FlowServices, FlowStep, LaunchFlow, SubmitOutcome};
pub use image::{DataUriEncoder, ImageEncoder, ImageLoadState, ImageLoader};
pub use random::{ChaChaRandom, RandomSource, SequenceRandom};
pub use score::{score, ScoreReport};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::LaunchStore;
pub use ticker::{CoinGeckoFeed, PriceFeed, PriceTicker, Prices, TickerHandle};
pub use wallet::{ConnectOutcome, HostEnvironment, ProviderError, StaticProvider, WalletProvider, WalletSession};
