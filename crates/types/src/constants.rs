/// Launchpad constants shared by the store, wallet session and launch flow

// ============================================================================
// Persistence Constants
// ============================================================================

/// Storage slot holding the JSON-encoded launch list
pub const LAUNCHES_STORAGE_KEY: &str = "gaspad_launches";

/// Number of launches shown on the home view
pub const HOME_LAUNCH_COUNT: usize = 6;

// ============================================================================
// Token Constants
// ============================================================================

/// Maximum ticker length in characters
pub const MAX_TICKER_LEN: usize = 5;

/// Default total supply for a new draft
pub const DEFAULT_SUPPLY: &str = "1000000000";

/// Default decimals for a new draft
pub const DEFAULT_DECIMALS: u8 = 9;

/// Length of generated launch ids
pub const TOKEN_ID_LEN: usize = 11;

// ============================================================================
// Score Weights
// ============================================================================

/// Points for a non-empty name
pub const SCORE_NAME_POINTS: u8 = 15;

/// Points for a non-empty ticker
pub const SCORE_TICKER_POINTS: u8 = 10;

/// Points for a description longer than `SCORE_DESCRIPTION_MIN_CHARS`
pub const SCORE_DESCRIPTION_POINTS: u8 = 20;

/// Description must be strictly longer than this to earn points
pub const SCORE_DESCRIPTION_MIN_CHARS: usize = 10;

/// Descriptions shorter than this trigger the expansion recommendation
pub const RECOMMENDED_DESCRIPTION_CHARS: usize = 20;

/// Points for an attached image
pub const SCORE_IMAGE_POINTS: u8 = 25;

/// Points per social link (twitter, telegram, website)
pub const SCORE_SOCIAL_POINTS: u8 = 10;

/// Maximum metadata subtotal
pub const MAX_METADATA_POINTS: u8 =
    SCORE_NAME_POINTS + SCORE_TICKER_POINTS + SCORE_DESCRIPTION_POINTS;

/// Maximum visual subtotal
pub const MAX_VISUAL_POINTS: u8 = SCORE_IMAGE_POINTS;

/// Maximum social subtotal
pub const MAX_SOCIAL_POINTS: u8 = SCORE_SOCIAL_POINTS * 3;

/// Maximum total score
pub const MAX_SCORE: u8 = MAX_METADATA_POINTS + MAX_VISUAL_POINTS + MAX_SOCIAL_POINTS;

/// Lower bound (inclusive) of the success-screen quality score
pub const COSMETIC_SCORE_MIN: u8 = 85;

/// Width of the success-screen quality score range, upper bound exclusive
pub const COSMETIC_SCORE_SPAN: u32 = 15;

// ============================================================================
// Wallet Constants
// ============================================================================

/// Fixed prefix of synthetic wallet addresses
pub const MOCK_ADDRESS_PREFIX: &str = "8fGx";

/// Fixed suffix of synthetic wallet addresses
pub const MOCK_ADDRESS_SUFFIX: &str = "kL9";

/// Number of random characters between prefix and suffix
pub const MOCK_ADDRESS_BODY_LEN: usize = 6;

/// Provider error code signalling an explicit user rejection
pub const USER_REJECTED_CODE: i32 = 4001;

// ============================================================================
// Flow Timing
// ============================================================================

/// Simulated audit duration (milliseconds)
pub const VALIDATING_DELAY_MS: u64 = 1_500;

/// Simulated mint duration (milliseconds)
pub const MINTING_DELAY_MS: u64 = 2_000;

// ============================================================================
// Price Ticker
// ============================================================================

/// Public quote endpoint for SOL, BTC and ETH in USD
pub const PRICE_ENDPOINT: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=solana,bitcoin,ethereum&vs_currencies=usd";

/// Initial SOL price shown before the first quote arrives
pub const DEFAULT_SOL_PRICE: f64 = 126.49;

/// Initial BTC price shown before the first quote arrives
pub const DEFAULT_BTC_PRICE: f64 = 88_856.00;

/// Initial ETH price shown before the first quote arrives
pub const DEFAULT_ETH_PRICE: f64 = 2_995.27;

/// Quote refresh interval (seconds), kept within the free tier
pub const PRICE_REFRESH_SECS: u64 = 60;

/// Cosmetic jitter interval (seconds)
pub const PRICE_JITTER_SECS: u64 = 3;

/// Full jitter amplitude per asset (sol, btc, eth)
pub const JITTER_AMPLITUDE: (f64, f64, f64) = (0.02, 1.0, 0.1);

// ============================================================================
// Seed Data
// ============================================================================

/// Official mascot image, also used by the seed launches
pub const MASCOT_URL: &str = "https://raw.githubusercontent.com/heil-kaizen/GasPad/main/GasPad.png";

/// Secondary mascot mirror
pub const MASCOT_MIRROR_URL: &str =
    "https://r2.erweima.ai/ai_image/3f7e6f66-3d2b-4d7a-8f8d-6d8b9d2e1b9b.jpg";

/// Project X account linked from the seed launches
pub const SEED_TWITTER_URL: &str = "https://x.com/gaspad_sol";

/// Telegram link used by the seed launches
pub const SEED_TELEGRAM_URL: &str = "https://t.me";

/// One hour in milliseconds
pub const HOUR_MS: i64 = 3_600_000;
