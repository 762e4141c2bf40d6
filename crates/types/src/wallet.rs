/// Wallet connection state shared between the session and the launch flow

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::GasPadError;

/// Browser wallet family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    None,
    Phantom,
    Solflare,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::None => "none",
            ProviderKind::Phantom => "phantom",
            ProviderKind::Solflare => "solflare",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GasPadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(ProviderKind::None),
            "phantom" => Ok(ProviderKind::Phantom),
            "solflare" => Ok(ProviderKind::Solflare),
            other => Err(GasPadError::invalid_parameter(
                "provider",
                other,
                "one of: none, phantom, solflare",
            )),
        }
    }
}

/// Snapshot of the wallet session
///
/// Either fully disconnected or fully connected; never partially set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    pub address: Option<String>,
    pub provider_kind: ProviderKind,
    pub connected: bool,
}

impl Default for WalletState {
    fn default() -> Self {
        Self::disconnected()
    }
}

impl WalletState {
    /// The reset state
    pub fn disconnected() -> Self {
        Self {
            address: None,
            provider_kind: ProviderKind::None,
            connected: false,
        }
    }

    /// A connected state for `address`
    pub fn connected(address: String, provider_kind: ProviderKind) -> Self {
        Self {
            address: Some(address),
            provider_kind,
            connected: true,
        }
    }

    /// Address when connected
    pub fn connected_address(&self) -> Option<&str> {
        if self.connected {
            self.address.as_deref()
        } else {
            None
        }
    }

    /// Abbreviated address for navigation display, e.g. `8fGx...kL9`
    pub fn short_address(&self) -> Option<String> {
        let address = self.connected_address()?;
        let chars: Vec<char> = address.chars().collect();
        if chars.len() <= 7 {
            return Some(address.to_string());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        Some(format!("{}...{}", head, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("phantom".parse::<ProviderKind>().unwrap(), ProviderKind::Phantom);
        assert_eq!("Solflare".parse::<ProviderKind>().unwrap(), ProviderKind::Solflare);
        assert_eq!("".parse::<ProviderKind>().unwrap(), ProviderKind::None);
        assert!("metamask".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_short_address() {
        let state = WalletState::connected("8fGxAB12CDkL9".to_string(), ProviderKind::Phantom);
        assert_eq!(state.short_address().as_deref(), Some("8fGx...kL9"));

        assert_eq!(WalletState::disconnected().short_address(), None);
    }

    #[test]
    fn test_disconnected_is_default() {
        let state = WalletState::default();
        assert_eq!(state.address, None);
        assert_eq!(state.provider_kind, ProviderKind::None);
        assert!(!state.connected);
        assert_eq!(state.connected_address(), None);
    }
}
