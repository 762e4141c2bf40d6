//! Application context
//!
//! `GasPad` owns the launch list, the wallet session and the shared
//! collaborators. Front ends hold one instance and pass it where needed.

use std::sync::Arc;
use gaspad_types::*;
use tracing::info;

use crate::config::LaunchpadConfig;
use crate::flow::{FlowOutcome, FlowServices, LaunchFlow, SubmitOutcome};
use crate::random::ChaChaRandom;
use crate::storage::KeyValueStore;
use crate::store::LaunchStore;
use crate::ticker::{PriceFeed, PriceTicker, TickerHandle};
use crate::wallet::{ConnectOutcome, HostEnvironment, WalletSession};

/// Result of submitting and running a flow
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchAttempt {
    /// The submit did not start the flow
    NotStarted(SubmitOutcome),
    Finished(FlowOutcome),
}

pub struct GasPad<S: KeyValueStore> {
    config: LaunchpadConfig,
    store: LaunchStore<S>,
    wallet: WalletSession,
    services: FlowServices,
    seeder: ChaChaRandom,
}

impl<S: KeyValueStore> GasPad<S> {
    /// Build the context and load the launch list
    pub fn new(
        config: LaunchpadConfig,
        storage: S,
        host: HostEnvironment,
        services: FlowServices,
        mut seeder: ChaChaRandom,
    ) -> Self {
        let store = LaunchStore::open(storage, &config.storage.launches_key, services.clock.as_ref());
        let wallet = WalletSession::new(host, Box::new(seeder.fork()), config.wallet.clone());
        info!("GasPad ready with {} launches", store.len());

        Self {
            config,
            store,
            wallet,
            services,
            seeder,
        }
    }

    /// Same as `new`, with randomness seeded from the operating system
    pub fn open(
        config: LaunchpadConfig,
        storage: S,
        host: HostEnvironment,
        services: FlowServices,
    ) -> GasPadResult<Self> {
        Ok(Self::new(config, storage, host, services, ChaChaRandom::from_entropy()?))
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    pub fn store(&self) -> &LaunchStore<S> {
        &self.store
    }

    pub fn wallet(&self) -> &WalletState {
        self.wallet.state()
    }

    pub async fn connect(&mut self, kind: ProviderKind) -> ConnectOutcome {
        self.wallet.connect(kind).await
    }

    pub fn disconnect(&mut self) {
        self.wallet.disconnect();
    }

    /// Launches shown on the home page
    pub fn home(&self) -> &[Token] {
        self.store.latest(HOME_LAUNCH_COUNT)
    }

    pub fn launches(&self) -> &[Token] {
        self.store.all()
    }

    pub fn find(&self, id: &str) -> Option<&Token> {
        self.store.find(id)
    }

    /// A fresh flow in `Editing` for `draft`
    pub fn new_flow(&mut self, draft: TokenDraft) -> LaunchFlow {
        LaunchFlow::with_draft(
            draft,
            self.config.flow.clone(),
            self.services.clone(),
            Box::new(self.seeder.fork()),
        )
    }

    /// Submit `flow` with the current wallet and, if it starts, run it to the end
    pub async fn launch(&mut self, flow: &mut LaunchFlow) -> LaunchAttempt {
        match flow.submit(self.wallet.state()) {
            SubmitOutcome::Started => LaunchAttempt::Finished(flow.run(&mut self.store).await),
            other => LaunchAttempt::NotStarted(other),
        }
    }

    /// Start the price ticker with the configured intervals
    pub fn spawn_ticker(&mut self, feed: Arc<dyn PriceFeed>) -> TickerHandle {
        PriceTicker::spawn(feed, Box::new(self.seeder.fork()), &self.config.prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, ImmediateScheduler};
    use crate::flow::FlowStep;
    use crate::image::DataUriEncoder;
    use crate::storage::MemoryStore;

    const NOW: i64 = 1_700_000_000_000;

    fn gaspad() -> GasPad<MemoryStore> {
        let services = FlowServices {
            scheduler: Arc::new(ImmediateScheduler::new()),
            clock: Arc::new(FixedClock::new(NOW)),
            encoder: Arc::new(DataUriEncoder),
        };
        GasPad::new(
            LaunchpadConfig::default(),
            MemoryStore::new(),
            HostEnvironment::empty(),
            services,
            ChaChaRandom::from_seed(1),
        )
    }

    fn draft(ticker: &str) -> TokenDraft {
        TokenDraft {
            name: format!("{} token", ticker),
            ticker: ticker.to_string(),
            image: Some(ImageAttachment::new("logo.png", "image/png", vec![1, 2, 3])),
            ..TokenDraft::default()
        }
    }

    #[test]
    fn test_starts_with_seed_launches() {
        let app = gaspad();
        assert_eq!(app.launches().len(), 2);
        assert_eq!(app.home().len(), 2);
        assert!(app.find("genesis-1").is_some());
        assert!(!app.wallet().connected);
    }

    #[tokio::test]
    async fn test_launch_requires_wallet() {
        let mut app = gaspad();
        let mut flow = app.new_flow(draft("gas"));

        assert_eq!(
            app.launch(&mut flow).await,
            LaunchAttempt::NotStarted(SubmitOutcome::ConnectWalletRequested)
        );
        assert_eq!(flow.step(), FlowStep::Editing);
        assert_eq!(app.launches().len(), 2);
    }

    #[tokio::test]
    async fn test_connected_launches_reach_home() {
        let mut app = gaspad();
        app.connect(ProviderKind::Phantom).await;
        let creator = app.wallet().address.clone().unwrap();

        for ticker in ["aa", "bb", "cc", "dd", "ee"] {
            let mut flow = app.new_flow(draft(ticker));
            match app.launch(&mut flow).await {
                LaunchAttempt::Finished(FlowOutcome::Deployed(token)) => {
                    assert_eq!(token.creator_address, creator);
                    assert_eq!(token.ticker, ticker.to_uppercase());
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }

        assert_eq!(app.launches().len(), 7);
        let home: Vec<&str> = app.home().iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(home, vec!["EE", "DD", "CC", "BB", "AA", "TEST"]);
    }

    #[tokio::test]
    async fn test_disconnect_blocks_further_launches() {
        let mut app = gaspad();
        app.connect(ProviderKind::Solflare).await;
        app.disconnect();

        let mut flow = app.new_flow(draft("gas"));
        assert!(matches!(
            app.launch(&mut flow).await,
            LaunchAttempt::NotStarted(SubmitOutcome::ConnectWalletRequested)
        ));
    }
}
