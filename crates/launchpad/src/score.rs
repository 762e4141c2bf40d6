//! Launch readiness score computed from the creation form
//!
//! The score is a weighted sum of field presence:
//! - metadata (45): name 15, ticker 10, description longer than 10 chars 20
//! - visual (25): image attached
//! - social (30): twitter, telegram and website at 10 each

use gaspad_types::*;

pub const RECOMMEND_NAMING: &str = "Initialize core naming protocol (Name/Ticker).";
pub const RECOMMEND_DESCRIPTION: &str = "Expand project manifesto to increase neural resonance.";
pub const RECOMMEND_IMAGE: &str = "Upload visual identity asset for retinal verification.";
pub const RECOMMEND_SOCIALS: &str = "Bridge social uplinks (X/TG) to establish community swarm.";
pub const READY_TO_DEPLOY: &str = "All systems nominal. Ready for decentralized deployment.";

/// Score breakdown and ordered advice for a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub metadata_points: u8,
    pub visual_points: u8,
    pub social_points: u8,
    pub total: u8,
    pub recommendations: Vec<String>,
}

impl ScoreReport {
    /// Status line shown next to the score gauge
    pub fn status_message(&self) -> &'static str {
        match self.total {
            0..=19 => "Awaiting neural sync... Please input core metadata.",
            20..=49 => "Signatures detected. Processing tokenomics hierarchy...",
            50..=79 => "Structural integrity verified. Analyzing community reach...",
            80..=99 => "Launch vectors aligned. Finalizing AI audit reports...",
            _ => "Maximum resonance achieved. Gas AI recommends immediate deployment.",
        }
    }

    pub fn is_ready(&self) -> bool {
        self.recommendations.len() == 1 && self.recommendations[0] == READY_TO_DEPLOY
    }
}

fn present(value: &str) -> bool {
    !value.is_empty()
}

fn points(condition: bool, points: u8) -> u8 {
    if condition {
        points
    } else {
        0
    }
}

/// Score a draft. Pure and deterministic.
pub fn score(draft: &TokenDraft) -> ScoreReport {
    let description_chars = draft.description.chars().count();

    let metadata_points = points(present(&draft.name), SCORE_NAME_POINTS)
        + points(present(&draft.ticker), SCORE_TICKER_POINTS)
        + points(description_chars > SCORE_DESCRIPTION_MIN_CHARS, SCORE_DESCRIPTION_POINTS);
    let visual_points = points(draft.image.is_some(), SCORE_IMAGE_POINTS);
    let social_points = points(present(&draft.twitter), SCORE_SOCIAL_POINTS)
        + points(present(&draft.telegram), SCORE_SOCIAL_POINTS)
        + points(present(&draft.website), SCORE_SOCIAL_POINTS);

    let mut recommendations = Vec::new();
    if !present(&draft.name) || !present(&draft.ticker) {
        recommendations.push(RECOMMEND_NAMING.to_string());
    }
    if description_chars < RECOMMENDED_DESCRIPTION_CHARS {
        recommendations.push(RECOMMEND_DESCRIPTION.to_string());
    }
    if draft.image.is_none() {
        recommendations.push(RECOMMEND_IMAGE.to_string());
    }
    if !present(&draft.twitter) || !present(&draft.telegram) {
        recommendations.push(RECOMMEND_SOCIALS.to_string());
    }
    if recommendations.is_empty() {
        recommendations.push(READY_TO_DEPLOY.to_string());
    }

    ScoreReport {
        metadata_points,
        visual_points,
        social_points,
        total: metadata_points + visual_points + social_points,
        recommendations,
    }
}
