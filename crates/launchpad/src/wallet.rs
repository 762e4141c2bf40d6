//! Wallet session with mock fallback
//!
//! A connect request first tries the provider injected by the host for the
//! requested wallet family. A missing provider, or one that fails for any
//! reason other than an explicit user rejection, degrades to a synthetic
//! address so the launch flow stays usable.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use gaspad_types::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::WalletConfig;
use crate::random::RandomSource;

/// Failure reported by a wallet provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The user dismissed the connection prompt
    #[error("User rejected the request")]
    UserRejected,

    #[error("Provider error (code {code:?}): {message}")]
    Failed { code: Option<i32>, message: String },
}

impl ProviderError {
    /// Classify a provider error code
    pub fn from_code(code: i32, message: &str) -> Self {
        if code == USER_REJECTED_CODE {
            ProviderError::UserRejected
        } else {
            ProviderError::Failed {
                code: Some(code),
                message: message.to_string(),
            }
        }
    }

    pub fn failed(message: &str) -> Self {
        ProviderError::Failed {
            code: None,
            message: message.to_string(),
        }
    }
}

/// A wallet extension injected by the host environment
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for its public address
    async fn connect(&self) -> Result<String, ProviderError>;
}

/// Provider that always answers with the same address
#[derive(Debug, Clone)]
pub struct StaticProvider {
    address: String,
}

impl StaticProvider {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

#[async_trait]
impl WalletProvider for StaticProvider {
    async fn connect(&self) -> Result<String, ProviderError> {
        Ok(self.address.clone())
    }
}

/// Wallet providers available in the host, keyed by family
#[derive(Clone, Default)]
pub struct HostEnvironment {
    providers: HashMap<ProviderKind, Arc<dyn WalletProvider>>,
}

impl HostEnvironment {
    /// A host with no wallet extensions installed
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, kind: ProviderKind, provider: Arc<dyn WalletProvider>) -> Self {
        self.providers.insert(kind, provider);
        self
    }

    pub fn provider(&self, kind: ProviderKind) -> Option<Arc<dyn WalletProvider>> {
        self.providers.get(&kind).cloned()
    }
}

/// Result of a connect request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected {
        address: String,
        provider_kind: ProviderKind,
        /// True when the address was synthesized
        mocked: bool,
    },
    /// The user rejected the prompt; the session is unchanged
    Cancelled,
}

/// Owns the connection state; updated atomically on connect and disconnect
pub struct WalletSession {
    state: WalletState,
    host: HostEnvironment,
    random: Box<dyn RandomSource>,
    config: WalletConfig,
}

impl WalletSession {
    pub fn new(host: HostEnvironment, random: Box<dyn RandomSource>, config: WalletConfig) -> Self {
        Self {
            state: WalletState::disconnected(),
            host,
            random,
            config,
        }
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    /// Connect to the requested wallet family
    ///
    /// `ProviderKind::None` is treated as Phantom.
    pub async fn connect(&mut self, kind: ProviderKind) -> ConnectOutcome {
        let kind = match kind {
            ProviderKind::None => ProviderKind::Phantom,
            other => other,
        };

        if let Some(provider) = self.host.provider(kind) {
            match provider.connect().await {
                Ok(address) => {
                    info!("Connected {} wallet {}", kind, address);
                    return self.set_connected(address, kind, false);
                }
                Err(ProviderError::UserRejected) => {
                    info!("{} connection rejected by user", kind);
                    return ConnectOutcome::Cancelled;
                }
                Err(e) => {
                    warn!("{} provider failed, falling back to mock identity: {}", kind, e);
                }
            }
        } else {
            info!("No {} provider in host, using mock identity", kind);
        }

        let address = self.mock_address();
        self.set_connected(address, kind, true)
    }

    /// Reset to fully disconnected
    pub fn disconnect(&mut self) {
        if self.state.connected {
            info!("Wallet disconnected");
        }
        self.state = WalletState::disconnected();
    }

    /// Prefix, random upper-case alphanumerics, suffix
    pub fn mock_address(&mut self) -> String {
        format!(
            "{}{}{}",
            self.config.mock_prefix,
            self.random.alphanumeric_upper(self.config.mock_body_len),
            self.config.mock_suffix
        )
    }

    fn set_connected(&mut self, address: String, kind: ProviderKind, mocked: bool) -> ConnectOutcome {
        self.state = WalletState::connected(address.clone(), kind);
        ConnectOutcome::Connected {
            address,
            provider_kind: kind,
            mocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ChaChaRandom;

    struct FailingProvider(ProviderError);

    #[async_trait]
    impl WalletProvider for FailingProvider {
        async fn connect(&self) -> Result<String, ProviderError> {
            Err(self.0.clone())
        }
    }

    fn session(host: HostEnvironment) -> WalletSession {
        WalletSession::new(host, Box::new(ChaChaRandom::from_seed(42)), WalletConfig::default())
    }

    fn is_mock_address(address: &str) -> bool {
        let body_len = address.len() as isize - 4 - 3;
        address.starts_with("8fGx")
            && address.ends_with("kL9")
            && body_len == 6
            && address[4..10].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    }

    #[tokio::test]
    async fn test_connect_without_provider_uses_mock() {
        let mut wallet = session(HostEnvironment::empty());

        let outcome = wallet.connect(ProviderKind::Phantom).await;
        let first = match outcome {
            ConnectOutcome::Connected { address, provider_kind, mocked } => {
                assert!(mocked);
                assert_eq!(provider_kind, ProviderKind::Phantom);
                address
            }
            ConnectOutcome::Cancelled => panic!("expected connection"),
        };

        assert!(is_mock_address(&first), "unexpected address {}", first);
        assert!(wallet.is_connected());
        assert_eq!(wallet.state().address.as_deref(), Some(first.as_str()));

        wallet.disconnect();
        wallet.connect(ProviderKind::Phantom).await;
        let second = wallet.state().address.clone().unwrap();
        assert!(is_mock_address(&second));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_connect_uses_injected_provider() {
        let host = HostEnvironment::empty()
            .with_provider(ProviderKind::Solflare, Arc::new(StaticProvider::new("So1flareAddr")));
        let mut wallet = session(host);

        let outcome = wallet.connect(ProviderKind::Solflare).await;
        assert_eq!(
            outcome,
            ConnectOutcome::Connected {
                address: "So1flareAddr".to_string(),
                provider_kind: ProviderKind::Solflare,
                mocked: false,
            }
        );
        assert_eq!(
            wallet.state(),
            &WalletState::connected("So1flareAddr".to_string(), ProviderKind::Solflare)
        );
    }

    #[tokio::test]
    async fn test_user_rejection_keeps_session_disconnected() {
        let host = HostEnvironment::empty().with_provider(
            ProviderKind::Phantom,
            Arc::new(FailingProvider(ProviderError::from_code(4001, "User rejected the request."))),
        );
        let mut wallet = session(host);

        assert_eq!(wallet.connect(ProviderKind::Phantom).await, ConnectOutcome::Cancelled);
        assert_eq!(wallet.state(), &WalletState::disconnected());
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_mock() {
        let host = HostEnvironment::empty().with_provider(
            ProviderKind::Phantom,
            Arc::new(FailingProvider(ProviderError::from_code(-32603, "Internal error"))),
        );
        let mut wallet = session(host);

        match wallet.connect(ProviderKind::Phantom).await {
            ConnectOutcome::Connected { address, mocked, .. } => {
                assert!(mocked);
                assert!(is_mock_address(&address));
            }
            ConnectOutcome::Cancelled => panic!("non-cancel failure must not cancel"),
        }
        assert!(wallet.is_connected());
    }

    #[tokio::test]
    async fn test_none_kind_defaults_to_phantom() {
        let mut wallet = session(HostEnvironment::empty());
        wallet.connect(ProviderKind::None).await;
        assert_eq!(wallet.state().provider_kind, ProviderKind::Phantom);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let mut wallet = session(HostEnvironment::empty());
        wallet.connect(ProviderKind::Solflare).await;

        for _ in 0..3 {
            wallet.disconnect();
            assert_eq!(
                wallet.state(),
                &WalletState {
                    address: None,
                    provider_kind: ProviderKind::None,
                    connected: false,
                }
            );
        }
    }
}
