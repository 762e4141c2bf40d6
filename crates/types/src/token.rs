/// Token records, launch drafts and the built-in seed sequence

use serde::{Deserialize, Serialize};
use crate::{constants::*, errors::GasPadError, GasPadResult};

// ============================================================================
// Persisted Token
// ============================================================================

/// A launched token as held by the launch store
///
/// Field names follow the persisted JSON layout. The aliases accept payloads
/// written by earlier front ends (`imageUrl`, `creator`, `timestamp`, `aiScore`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Opaque identifier, unique within the store
    pub id: String,

    /// Display name
    pub name: String,

    /// Upper-cased ticker, at most five characters
    pub ticker: String,

    /// Free-form description (may be empty)
    #[serde(default)]
    pub description: String,

    /// Image URI or data URI
    #[serde(default, alias = "imageUrl")]
    pub image_ref: String,

    /// Wallet address that created the launch
    #[serde(alias = "creator")]
    pub creator_address: String,

    /// Creation wall-clock time (ms since epoch)
    #[serde(alias = "timestamp")]
    pub created_at: i64,

    /// Optional social links
    #[serde(default)]
    pub socials: Socials,

    /// Quality score fixed at creation
    #[serde(alias = "aiScore")]
    pub quality_score: u8,

    /// Total supply as a decimal string
    pub supply: String,

    /// Token decimals
    pub decimals: u8,
}

impl Token {
    /// Check the record invariants
    pub fn validate(&self) -> GasPadResult<()> {
        if self.id.trim().is_empty() {
            return Err(GasPadError::validation("id", "must not be empty"));
        }
        validate_name(&self.name)?;
        validate_ticker(&self.ticker)?;
        if self.ticker != self.ticker.to_uppercase() {
            return Err(GasPadError::validation("ticker", "must be upper-case"));
        }
        validate_supply(&self.supply)?;
        if self.quality_score > MAX_SCORE {
            return Err(GasPadError::invalid_parameter(
                "quality_score",
                &self.quality_score.to_string(),
                "at most 100",
            ));
        }
        Ok(())
    }

    /// Whether the image reference is an inline data URI
    pub fn has_inline_image(&self) -> bool {
        self.image_ref.starts_with("data:")
    }
}

/// Social links attached to a launch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Socials {
    /// Build from raw form inputs, treating blank inputs as absent
    pub fn from_links(twitter: &str, telegram: &str, website: &str) -> Self {
        Self {
            twitter: non_blank(twitter),
            telegram: non_blank(telegram),
            website: non_blank(website),
        }
    }

    /// Number of links present
    pub fn count(&self) -> usize {
        [&self.twitter, &self.telegram, &self.website]
            .iter()
            .filter(|link| link.as_deref().map_or(false, |l| !l.is_empty()))
            .count()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// Draft
// ============================================================================

/// Image picked in the creation form, before conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// Original file name
    pub file_name: String,
    /// MIME type reported by the picker
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }
}

/// Token creation form state
///
/// Text fields hold raw input; an empty string means the field is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDraft {
    pub name: String,
    pub ticker: String,
    pub description: String,
    pub image: Option<ImageAttachment>,
    pub twitter: String,
    pub telegram: String,
    pub website: String,
    pub supply: String,
    pub decimals: u8,
}

impl Default for TokenDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            ticker: String::new(),
            description: String::new(),
            image: None,
            twitter: String::new(),
            telegram: String::new(),
            website: String::new(),
            supply: DEFAULT_SUPPLY.to_string(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl TokenDraft {
    /// Check the text fields required at submission
    ///
    /// The image is checked separately by the launch flow.
    pub fn validate_fields(&self) -> GasPadResult<()> {
        validate_name(&self.name)?;
        validate_ticker(&self.ticker)?;
        validate_supply(&self.supply)?;
        Ok(())
    }

    /// Social links in their persisted form
    pub fn socials(&self) -> Socials {
        Socials::from_links(&self.twitter, &self.telegram, &self.website)
    }
}

// ============================================================================
// Field Validation
// ============================================================================

fn validate_name(name: &str) -> GasPadResult<()> {
    if name.trim().is_empty() {
        return Err(GasPadError::validation("name", "must not be empty"));
    }
    Ok(())
}

fn validate_ticker(ticker: &str) -> GasPadResult<()> {
    let trimmed = ticker.trim();
    if trimmed.is_empty() {
        return Err(GasPadError::validation("ticker", "must not be empty"));
    }
    // upper-casing can lengthen a ticker ("ß" -> "SS")
    if trimmed.to_uppercase().chars().count() > MAX_TICKER_LEN {
        return Err(GasPadError::validation(
            "ticker",
            &format!("must be at most {} characters", MAX_TICKER_LEN),
        ));
    }
    Ok(())
}

fn validate_supply(supply: &str) -> GasPadResult<()> {
    let is_digits = !supply.is_empty() && supply.bytes().all(|b| b.is_ascii_digit());
    if !is_digits || supply.bytes().all(|b| b == b'0') {
        return Err(GasPadError::validation("supply", "must be a positive integer"));
    }
    Ok(())
}

// ============================================================================
// Seed Sequence
// ============================================================================

/// The two sample launches used when no persisted data exists
pub fn seed_launches(now_ms: i64) -> Vec<Token> {
    let socials = Socials {
        twitter: Some(SEED_TWITTER_URL.to_string()),
        telegram: Some(SEED_TELEGRAM_URL.to_string()),
        website: None,
    };

    vec![
        Token {
            id: "genesis-1".to_string(),
            name: "TEST PAD".to_string(),
            ticker: "TEST".to_string(),
            description: "TESTING GASPAD LAUNCH".to_string(),
            image_ref: MASCOT_URL.to_string(),
            creator_address: "8fGxGASPADv1kL9".to_string(),
            created_at: now_ms - HOUR_MS,
            socials: socials.clone(),
            quality_score: 98,
            supply: DEFAULT_SUPPLY.to_string(),
            decimals: DEFAULT_DECIMALS,
        },
        Token {
            id: "genesis-2".to_string(),
            name: "GAS PAD".to_string(),
            ticker: "GAS".to_string(),
            description: "TESTING GASPAD LAUNCH".to_string(),
            image_ref: MASCOT_URL.to_string(),
            creator_address: "3vPrAGENCYmQ2".to_string(),
            created_at: now_ms - 2 * HOUR_MS,
            socials,
            quality_score: 94,
            supply: DEFAULT_SUPPLY.to_string(),
            decimals: DEFAULT_DECIMALS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_launches_are_valid() {
        let seed = seed_launches(10 * HOUR_MS);
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, "genesis-1");
        assert_eq!(seed[1].id, "genesis-2");
        assert_eq!(seed[0].created_at, 9 * HOUR_MS);
        assert_eq!(seed[1].created_at, 8 * HOUR_MS);
        for token in &seed {
            assert!(token.validate().is_ok());
        }
    }

    #[test]
    fn test_token_json_layout() {
        let token = seed_launches(0).remove(0);
        let json = serde_json::to_value(&token).unwrap();

        assert_eq!(json["imageRef"], MASCOT_URL);
        assert_eq!(json["creatorAddress"], "8fGxGASPADv1kL9");
        assert_eq!(json["qualityScore"], 98);
        assert!(json["socials"].get("website").is_none());
    }

    #[test]
    fn test_token_accepts_legacy_field_names() {
        let legacy = r#"{
            "id": "abc123",
            "name": "Legacy",
            "ticker": "LGC",
            "description": "old payload",
            "imageUrl": "data:image/png;base64,AAAA",
            "creator": "8fGxABCDEFkL9",
            "timestamp": 1700000000000,
            "socials": { "telegram": "", "twitter": "https://x.com/legacy", "website": "" },
            "aiScore": 91,
            "supply": "1000000000",
            "decimals": 9
        }"#;

        let token: Token = serde_json::from_str(legacy).unwrap();
        assert_eq!(token.image_ref, "data:image/png;base64,AAAA");
        assert_eq!(token.creator_address, "8fGxABCDEFkL9");
        assert_eq!(token.created_at, 1_700_000_000_000);
        assert_eq!(token.quality_score, 91);
        assert!(token.has_inline_image());
        assert_eq!(token.socials.count(), 1);
    }

    #[test]
    fn test_draft_field_validation() {
        let mut draft = TokenDraft {
            name: "Gas".to_string(),
            ticker: "GAS".to_string(),
            ..TokenDraft::default()
        };
        assert!(draft.validate_fields().is_ok());

        draft.ticker = "TOOLONG".to_string();
        assert_eq!(
            draft.validate_fields(),
            Err(GasPadError::validation("ticker", "must be at most 5 characters"))
        );

        draft.ticker = "ßßß".to_string();
        assert_eq!(
            draft.validate_fields(),
            Err(GasPadError::validation("ticker", "must be at most 5 characters"))
        );

        draft.ticker = "GAS".to_string();
        draft.supply = "0".to_string();
        assert!(draft.validate_fields().is_err());

        draft.supply = "12.5".to_string();
        assert!(draft.validate_fields().is_err());

        draft.supply = DEFAULT_SUPPLY.to_string();
        draft.name = "   ".to_string();
        assert!(draft.validate_fields().is_err());
    }

    #[test]
    fn test_socials_blank_inputs_are_absent() {
        let socials = Socials::from_links(" https://x.com/gas ", "", "   ");
        assert_eq!(socials.twitter.as_deref(), Some("https://x.com/gas"));
        assert_eq!(socials.telegram, None);
        assert_eq!(socials.website, None);
        assert_eq!(socials.count(), 1);
    }
}
