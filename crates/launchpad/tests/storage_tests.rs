//! Launch store persistence against the file-backed storage

use anyhow::Result;
use gaspad_launchpad::{FixedClock, JsonFileStore, KeyValueStore, LaunchStore};
use gaspad_types::*;
use tempfile::TempDir;

const NOW: i64 = 1_700_000_000_000;

/// Create a file store in a temporary directory
fn create_test_storage() -> Result<(JsonFileStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let storage = JsonFileStore::open(temp_dir.path().join("data"))?;
    Ok((storage, temp_dir))
}

fn create_test_token(id: &str, ticker: &str) -> Token {
    Token {
        id: id.to_string(),
        name: format!("{} token", ticker),
        ticker: ticker.to_string(),
        description: String::new(),
        image_ref: "data:image/png;base64,AQID".to_string(),
        creator_address: "8fGxQ1W2E3kL9".to_string(),
        created_at: NOW,
        socials: Socials::from_links("https://x.com/test", "", ""),
        quality_score: 88,
        supply: DEFAULT_SUPPLY.to_string(),
        decimals: DEFAULT_DECIMALS,
    }
}

#[test]
fn test_first_open_persists_seed_to_disk() -> Result<()> {
    let (storage, temp_dir) = create_test_storage()?;
    let clock = FixedClock::new(NOW);

    let store = LaunchStore::open(storage, LAUNCHES_STORAGE_KEY, &clock);
    assert_eq!(store.all(), seed_launches(NOW).as_slice());

    let path = temp_dir.path().join("data").join(format!("{}.json", LAUNCHES_STORAGE_KEY));
    let on_disk: Vec<Token> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    assert_eq!(on_disk, seed_launches(NOW));
    Ok(())
}

#[test]
fn test_appends_survive_reopen() -> Result<()> {
    let (storage, temp_dir) = create_test_storage()?;
    let clock = FixedClock::new(NOW);

    let mut store = LaunchStore::open(storage, LAUNCHES_STORAGE_KEY, &clock);
    store.append(create_test_token("first000001", "ONE"))?;
    store.append(create_test_token("second00002", "TWO"))?;
    drop(store);

    // a later session starts an hour later; persisted timestamps must not move
    clock.advance(HOUR_MS);
    let reopened = LaunchStore::open(JsonFileStore::open(temp_dir.path().join("data"))?, LAUNCHES_STORAGE_KEY, &clock);

    let tickers: Vec<&str> = reopened.all().iter().map(|t| t.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["TWO", "ONE", "TEST", "GAS"]);
    assert_eq!(reopened.find("genesis-1").map(|t| t.created_at), Some(NOW - HOUR_MS));
    Ok(())
}

#[test]
fn test_corrupt_file_is_replaced_by_seed() -> Result<()> {
    let (mut storage, _temp_dir) = create_test_storage()?;
    storage.set(LAUNCHES_STORAGE_KEY, "[{\"id\": \"half-written\"")?;
    let clock = FixedClock::new(NOW);

    let store = LaunchStore::open(storage, LAUNCHES_STORAGE_KEY, &clock);
    assert_eq!(store.len(), 2);

    let persisted = store.storage().get(LAUNCHES_STORAGE_KEY)?.unwrap_or_default();
    assert_eq!(serde_json::from_str::<Vec<Token>>(&persisted)?, seed_launches(NOW));
    Ok(())
}

#[test]
fn test_legacy_browser_payload_loads() -> Result<()> {
    let (mut storage, _temp_dir) = create_test_storage()?;
    storage.set(
        LAUNCHES_STORAGE_KEY,
        r#"[{
            "id": "k3j9x0a1b2c",
            "name": "Moon Gas",
            "ticker": "MGAS",
            "description": "from the browser",
            "imageUrl": "data:image/png;base64,AAAA",
            "creator": "8fGxZZZZZZkL9",
            "timestamp": 1699990000000,
            "socials": { "twitter": "", "telegram": "", "website": "" },
            "aiScore": 87,
            "supply": "1000000000",
            "decimals": 9
        }]"#,
    )?;
    let clock = FixedClock::new(NOW);

    let store = LaunchStore::open(storage, LAUNCHES_STORAGE_KEY, &clock);
    assert_eq!(store.len(), 1);
    let token = &store.all()[0];
    assert_eq!(token.creator_address, "8fGxZZZZZZkL9");
    assert_eq!(token.quality_score, 87);
    assert_eq!(token.socials.count(), 0);
    Ok(())
}
