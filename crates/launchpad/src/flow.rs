//! Launch submission state machine
//!
//! `Editing -> Validating -> Minting -> Deployed`. A submit moves the flow out
//! of `Editing` only when a wallet is connected and the draft is complete; the
//! two simulated steps then run on the injected scheduler. Image conversion
//! failure, a failed commit or a cancel returns the flow to `Editing` without
//! persisting anything.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use gaspad_types::*;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, Scheduler};
use crate::config::{FlowConfig, QualityScorePolicy};
use crate::image::ImageEncoder;
use crate::random::RandomSource;
use crate::score::{score, ScoreReport};
use crate::storage::KeyValueStore;
use crate::store::LaunchStore;

/// Id draws before a commit gives up on finding an unused one
const MAX_ID_ATTEMPTS: usize = 16;

// ============================================================================
// Steps and Outcomes
// ============================================================================

/// Current step of a launch flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStep {
    Editing,
    Validating,
    Minting,
    Deployed,
}

impl FlowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStep::Editing => "editing",
            FlowStep::Validating => "validating",
            FlowStep::Minting => "minting",
            FlowStep::Deployed => "deployed",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a submit request
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No wallet is connected; the caller should open the connect prompt
    ConnectWalletRequested,
    /// The draft failed validation; the flow stays in `Editing`
    Rejected(GasPadError),
    /// The flow moved to `Validating`
    Started,
}

/// Result of running a started flow to the end
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Deployed(Token),
    /// The flow went back to `Editing`; nothing was persisted
    Aborted(GasPadError),
}

/// Collaborators shared by every flow instance
#[derive(Clone)]
pub struct FlowServices {
    pub scheduler: Arc<dyn Scheduler>,
    pub clock: Arc<dyn Clock>,
    pub encoder: Arc<dyn ImageEncoder>,
}

/// Cancels the pending delay of a running flow
#[derive(Debug, Clone)]
pub struct FlowCanceller {
    cancel: Arc<watch::Sender<bool>>,
}

impl FlowCanceller {
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }
}

// ============================================================================
// Launch Flow
// ============================================================================

/// One submission attempt; a new instance is needed after `Deployed`
pub struct LaunchFlow {
    draft: TokenDraft,
    step: watch::Sender<FlowStep>,
    cancel: Arc<watch::Sender<bool>>,
    creator: Option<String>,
    config: FlowConfig,
    services: FlowServices,
    random: Box<dyn RandomSource>,
}

impl LaunchFlow {
    pub fn new(config: FlowConfig, services: FlowServices, random: Box<dyn RandomSource>) -> Self {
        Self::with_draft(TokenDraft::default(), config, services, random)
    }

    pub fn with_draft(
        draft: TokenDraft,
        config: FlowConfig,
        services: FlowServices,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let (step, _) = watch::channel(FlowStep::Editing);
        let (cancel, _) = watch::channel(false);
        Self {
            draft,
            step,
            cancel: Arc::new(cancel),
            creator: None,
            config,
            services,
            random,
        }
    }

    pub fn step(&self) -> FlowStep {
        *self.step.borrow()
    }

    /// Receiver notified on every step change
    pub fn subscribe(&self) -> watch::Receiver<FlowStep> {
        self.step.subscribe()
    }

    pub fn canceller(&self) -> FlowCanceller {
        FlowCanceller {
            cancel: Arc::clone(&self.cancel),
        }
    }

    pub fn draft(&self) -> &TokenDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TokenDraft {
        &mut self.draft
    }

    /// Live score of the current draft
    pub fn estimate(&self) -> ScoreReport {
        score(&self.draft)
    }

    /// Request the `Editing -> Validating` transition
    ///
    /// Checks run in order: wallet connection, text fields, image.
    pub fn submit(&mut self, wallet: &WalletState) -> SubmitOutcome {
        let step = self.step();
        if step != FlowStep::Editing {
            return SubmitOutcome::Rejected(GasPadError::InvalidTransition {
                from: step.to_string(),
                reason: "submit is only accepted while editing".to_string(),
            });
        }

        let creator = match wallet.connected_address() {
            Some(address) => address.to_string(),
            None => {
                info!("Submit without a connected wallet, requesting connection");
                return SubmitOutcome::ConnectWalletRequested;
            }
        };

        if let Err(e) = self.draft.validate_fields() {
            debug!("Submit rejected: {}", e);
            return SubmitOutcome::Rejected(e);
        }

        if self.draft.image.is_none() {
            debug!("Submit rejected: no image attached");
            return SubmitOutcome::Rejected(GasPadError::MissingImage);
        }

        self.creator = Some(creator);
        self.cancel.send_replace(false);
        self.transition(FlowStep::Validating);
        SubmitOutcome::Started
    }

    /// Drive a started flow through minting and commit the token
    pub async fn run<S: KeyValueStore>(&mut self, store: &mut LaunchStore<S>) -> FlowOutcome {
        let step = self.step();
        let creator = match (step, self.creator.clone()) {
            (FlowStep::Validating, Some(creator)) => creator,
            _ => {
                return FlowOutcome::Aborted(GasPadError::InvalidTransition {
                    from: step.to_string(),
                    reason: "run requires a submitted flow".to_string(),
                });
            }
        };

        let image_ref = match self.encode_image().await {
            Ok(image_ref) => image_ref,
            Err(e) => {
                error!("Image conversion failed, aborting launch: {}", e);
                return self.abort(e);
            }
        };

        if let Err(e) = self.wait(FlowStep::Validating, self.config.validating_delay()).await {
            return self.abort(e);
        }
        self.transition(FlowStep::Minting);

        if let Err(e) = self.wait(FlowStep::Minting, self.config.minting_delay()).await {
            return self.abort(e);
        }

        let token = match self.build_token(store, creator, image_ref) {
            Ok(token) => token,
            Err(e) => {
                error!("Failed to build launch: {}", e);
                return self.abort(e);
            }
        };
        if let Err(e) = store.append(token.clone()) {
            error!("Failed to commit launch {}: {}", token.id, e);
            return self.abort(e);
        }

        self.creator = None;
        self.transition(FlowStep::Deployed);
        info!("Deployed ${} ({}) with quality score {}", token.ticker, token.id, token.quality_score);
        FlowOutcome::Deployed(token)
    }

    async fn encode_image(&self) -> GasPadResult<String> {
        match &self.draft.image {
            Some(image) => self.services.encoder.encode(image).await,
            None => Err(GasPadError::MissingImage),
        }
    }

    async fn wait(&self, step: FlowStep, delay: Duration) -> GasPadResult<()> {
        let mut cancel = self.cancel.subscribe();
        tokio::select! {
            _ = self.services.scheduler.sleep(delay) => Ok(()),
            _ = cancelled(&mut cancel) => {
                warn!("Launch flow cancelled during {}", step);
                Err(GasPadError::FlowCancelled { step: step.to_string() })
            }
        }
    }

    fn build_token<S: KeyValueStore>(
        &mut self,
        store: &LaunchStore<S>,
        creator: String,
        image_ref: String,
    ) -> GasPadResult<Token> {
        let id = self.unique_id(store)?;

        let quality_score = match self.config.quality_score {
            QualityScorePolicy::Cosmetic => COSMETIC_SCORE_MIN + self.random.below(COSMETIC_SCORE_SPAN) as u8,
            QualityScorePolicy::Estimated => score(&self.draft).total,
        };

        Ok(Token {
            id,
            name: self.draft.name.trim().to_string(),
            ticker: self.draft.ticker.trim().to_uppercase(),
            description: self.draft.description.clone(),
            image_ref,
            creator_address: creator,
            created_at: self.services.clock.now_ms(),
            socials: self.draft.socials(),
            quality_score,
            supply: self.draft.supply.clone(),
            decimals: self.draft.decimals,
        })
    }

    fn unique_id<S: KeyValueStore>(&mut self, store: &LaunchStore<S>) -> GasPadResult<String> {
        let mut taken = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.random.alphanumeric_lower(TOKEN_ID_LEN);
            if !store.contains_id(&id) {
                return Ok(id);
            }
            debug!("Generated id {} already taken, retrying", id);
            taken = id;
        }
        Err(GasPadError::invalid_parameter(
            "id",
            &taken,
            &format!("an unused id within {} attempts", MAX_ID_ATTEMPTS),
        ))
    }

    fn abort(&mut self, reason: GasPadError) -> FlowOutcome {
        self.creator = None;
        self.transition(FlowStep::Editing);
        FlowOutcome::Aborted(reason)
    }

    fn transition(&self, next: FlowStep) {
        let previous = self.step.send_replace(next);
        info!("Launch flow {} -> {}", previous, next);
    }
}

async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
