use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gaspad_launchpad::config::create_example_config;
use gaspad_launchpad::image::mime_from_path;
use gaspad_launchpad::score::score;
use gaspad_launchpad::ticker::refresh;
use gaspad_launchpad::{
    Clock, CoinGeckoFeed, DataUriEncoder, FlowOutcome, FlowServices, GasPad, HostEnvironment,
    JsonFileStore, LaunchAttempt, LaunchpadConfig, Prices, StaticProvider, SubmitOutcome,
    SystemClock, TokioScheduler,
};
use gaspad_types::*;

#[derive(Parser)]
#[command(name = "gaspad")]
#[command(about = "GasPad token launchpad", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "gaspad.toml")]
    config: String,

    /// Override the storage directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest launches, as on the home page
    Home,

    /// Every launch, newest first
    Launches,

    /// One launch by id
    Show { id: String },

    /// Score a draft without launching it
    Score(DraftArgs),

    /// Run the full launch flow
    Launch {
        #[command(flatten)]
        draft: DraftArgs,

        /// Token image file
        #[arg(long)]
        image: PathBuf,

        /// Wallet family to connect with
        #[arg(long, default_value = "phantom")]
        wallet: String,

        /// Address answered by the wallet extension; a mock address is used when absent
        #[arg(long)]
        wallet_address: Option<String>,
    },

    /// Market prices
    Prices {
        /// Keep the ticker running for this many seconds
        #[arg(long)]
        watch: Option<u64>,
    },

    /// Write an example configuration file
    InitConfig { path: String },
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    ticker: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    twitter: String,

    #[arg(long, default_value = "")]
    telegram: String,

    #[arg(long, default_value = "")]
    website: String,

    #[arg(long, default_value = DEFAULT_SUPPLY)]
    supply: String,

    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: u8,
}

impl DraftArgs {
    fn into_draft(self, image: Option<ImageAttachment>) -> TokenDraft {
        TokenDraft {
            name: self.name,
            ticker: self.ticker,
            description: self.description,
            image,
            twitter: self.twitter,
            telegram: self.telegram,
            website: self.website,
            supply: self.supply,
            decimals: self.decimals,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { path } = &cli.command {
        create_example_config(path)?;
        println!("Example configuration written to {}", path);
        return Ok(());
    }

    let mut config = load_config(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    init_logging(&config, cli.log_level.as_deref());

    match cli.command {
        Commands::Home => {
            let app = open_app(config, HostEnvironment::empty())?;
            print_launches(app.home());
        }
        Commands::Launches => {
            let app = open_app(config, HostEnvironment::empty())?;
            print_launches(app.launches());
        }
        Commands::Show { id } => {
            let app = open_app(config, HostEnvironment::empty())?;
            match app.find(&id) {
                Some(token) => print_token_details(token),
                None => bail!("No launch with id '{}'", id),
            }
        }
        Commands::Score(draft) => {
            let report = score(&draft.into_draft(None));
            println!("Score: {}/100", report.total);
            println!(
                "  metadata {}/{}  visual {}/{}  social {}/{}",
                report.metadata_points,
                MAX_METADATA_POINTS,
                report.visual_points,
                MAX_VISUAL_POINTS,
                report.social_points,
                MAX_SOCIAL_POINTS
            );
            println!("{}", report.status_message());
            for recommendation in &report.recommendations {
                println!("  - {}", recommendation);
            }
        }
        Commands::Launch { draft, image, wallet, wallet_address } => {
            let kind: ProviderKind = wallet.parse()?;
            let attachment = read_image(&image)?;
            let host = match wallet_address {
                Some(address) => HostEnvironment::empty().with_provider(kind, Arc::new(StaticProvider::new(&address))),
                None => HostEnvironment::empty(),
            };

            let mut app = open_app(config, host)?;
            run_launch(&mut app, kind, draft.into_draft(Some(attachment))).await?;
        }
        Commands::Prices { watch } => {
            let feed = Arc::new(CoinGeckoFeed::new(&config.prices)?);
            match watch {
                Some(seconds) => {
                    let mut app = open_app(config, HostEnvironment::empty())?;
                    let mut ticker = app.spawn_ticker(feed);
                    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
                    tokio::pin!(deadline);
                    loop {
                        tokio::select! {
                            _ = &mut deadline => break,
                            prices = ticker.changed() => match prices {
                                Some(prices) => println!("{}", prices),
                                None => break,
                            },
                        }
                    }
                    ticker.stop();
                }
                None => {
                    let (sender, receiver) = tokio::sync::watch::channel(Prices::default());
                    if !refresh(feed.as_ref(), &sender).await {
                        warn!("Showing default prices");
                    }
                    println!("{}", *receiver.borrow());
                }
            }
        }
        Commands::InitConfig { .. } => {}
    }

    Ok(())
}

fn load_config(path: &str) -> Result<LaunchpadConfig> {
    if Path::new(path).exists() {
        LaunchpadConfig::load(path).with_context(|| format!("Failed to load configuration from {}", path))
    } else {
        Ok(LaunchpadConfig::default())
    }
}

fn init_logging(config: &LaunchpadConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(config.logging.level.as_str()).to_string();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_app(config: LaunchpadConfig, host: HostEnvironment) -> Result<GasPad<JsonFileStore>> {
    let storage = JsonFileStore::open(&config.storage.data_dir)?;
    let services = FlowServices {
        scheduler: Arc::new(TokioScheduler),
        clock: Arc::new(SystemClock),
        encoder: Arc::new(DataUriEncoder),
    };
    info!("Using data directory {}", config.storage.data_dir.display());
    Ok(GasPad::open(config, storage, host, services)?)
}

fn read_image(path: &Path) -> Result<ImageAttachment> {
    let mime = match mime_from_path(path) {
        Some(mime) => mime,
        None => bail!("Unsupported image type: {}", path.display()),
    };
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(ImageAttachment::new(&file_name, mime, bytes))
}

async fn run_launch(app: &mut GasPad<JsonFileStore>, kind: ProviderKind, draft: TokenDraft) -> Result<()> {
    let report = score(&draft);
    println!("Draft score: {}/100 - {}", report.total, report.status_message());

    let mut flow = app.new_flow(draft);
    let mut steps = flow.subscribe();
    let printer = tokio::spawn(async move {
        while steps.changed().await.is_ok() {
            println!("[{}]", *steps.borrow_and_update());
        }
    });

    let mut attempt = app.launch(&mut flow).await;
    if attempt == LaunchAttempt::NotStarted(SubmitOutcome::ConnectWalletRequested) {
        println!("Connecting {} wallet...", kind);
        match app.connect(kind).await {
            gaspad_launchpad::ConnectOutcome::Connected { address, mocked, .. } => {
                let suffix = if mocked { " (mock)" } else { "" };
                println!("Connected {}{}", address, suffix);
            }
            gaspad_launchpad::ConnectOutcome::Cancelled => {
                printer.abort();
                println!("Wallet connection cancelled");
                return Ok(());
            }
        }
        attempt = app.launch(&mut flow).await;
    }
    drop(flow);
    let _ = printer.await;

    match attempt {
        LaunchAttempt::Finished(FlowOutcome::Deployed(token)) => {
            println!("Deployed!");
            print_token_details(&token);
            Ok(())
        }
        LaunchAttempt::Finished(FlowOutcome::Aborted(e)) => bail!("Launch aborted: {}", e),
        LaunchAttempt::NotStarted(SubmitOutcome::Rejected(e)) => bail!("{}", e),
        LaunchAttempt::NotStarted(other) => bail!("Launch did not start: {:?}", other),
    }
}

fn print_launches(launches: &[Token]) {
    let now = SystemClock.now_ms();
    for token in launches {
        println!(
            "{:<12} ${:<6} {:<20} score {:>3}  {}  {}",
            token.id,
            token.ticker,
            token.name,
            token.quality_score,
            short(&token.creator_address),
            age(now - token.created_at)
        );
    }
}

fn print_token_details(token: &Token) {
    println!("{} (${})", token.name, token.ticker);
    println!("  id:          {}", token.id);
    println!("  creator:     {}", token.creator_address);
    println!("  score:       {}", token.quality_score);
    println!("  supply:      {} ({} decimals)", token.supply, token.decimals);
    if !token.description.is_empty() {
        println!("  description: {}", token.description);
    }
    for (label, link) in [
        ("twitter", &token.socials.twitter),
        ("telegram", &token.socials.telegram),
        ("website", &token.socials.website),
    ] {
        if let Some(link) = link {
            println!("  {:<12} {}", format!("{}:", label), link);
        }
    }
    if token.has_inline_image() {
        println!("  image:       inline ({} chars)", token.image_ref.len());
    } else {
        println!("  image:       {}", token.image_ref);
    }
}

fn short(address: &str) -> String {
    WalletState::connected(address.to_string(), ProviderKind::None)
        .short_address()
        .unwrap_or_default()
}

fn age(elapsed_ms: i64) -> String {
    let minutes = elapsed_ms.max(0) / 60_000;
    match minutes {
        0 => "just now".to_string(),
        m if m < 60 => format!("{}m ago", m),
        m if m < 24 * 60 => format!("{}h ago", m / 60),
        m => format!("{}d ago", m / (24 * 60)),
    }
}
