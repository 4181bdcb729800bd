//! SmartTunnel CLI
//!
//! Picks the fastest route to a registered site based on the network the
//! machine is currently on.
//!
//! # Architecture Overview
//!
//! ```text
//!   current host ──▶ routing table lookup ──(no match)──────────▶ no action
//!                          │
//!                          ▼ matched entry
//!                    intranet probe ──(200)─────────────────────▶ intranet site
//!                          │ unreachable
//!                          ▼
//!                    IPv6 probe ──(200, address seen)───────────▶ IPv6 site
//!                          │ unreachable
//!                          ▼
//!                       no action
//!
//!   Cross-cutting: config (TOML) · store (JSON) · tracing · metrics
//! ```
//!
//! All other subcommands edit the routing table or the intranet test URL
//! and persist the change immediately.

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use smart_tunnel::config::loader::default_store_path;
use smart_tunnel::config::{self, TunnelConfig};
use smart_tunnel::observability::logging;
use smart_tunnel::probe::HttpTransport;
use smart_tunnel::redirect::{self, ConfiguredNavigator};
use smart_tunnel::state::AppState;
use smart_tunnel::storage::JsonFileStore;
use smart_tunnel::{DecisionEngine, DecisionResult};

#[derive(Parser)]
#[command(name = "smart-tunnel", version)]
#[command(about = "Redirect to intranet or IPv6 mirrors depending on the current network", long_about = None)]
struct Cli {
    /// Config file (TOML). Defaults to the platform config directory.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store file (JSON). Overrides the config file.
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide where the current site should go and redirect there
    Resolve(ResolveArgs),
    /// Register a site with its IPv6 and intranet mirrors
    Add {
        /// Domain to register (matched as a substring of the host)
        domain: String,
        /// IPv6 site URL (default: https://ipv6.<domain>)
        #[arg(long)]
        ipv6: Option<String>,
        /// Intranet site URL (default: http://intranet.<domain>)
        #[arg(long)]
        intranet: Option<String>,
    },
    /// Remove every registered site matching a host
    Remove { host: String },
    /// List registered sites
    List,
    /// Delete a registered site by its number in `list`
    Delete { number: usize },
    /// Set the URL used to detect the intranet
    SetIntranetTest { url: String },
    /// Show the URL used to detect the intranet
    ShowIntranetTest,
    /// Add missing schemes to every registered site URL
    Repair,
}

#[derive(Args)]
struct ResolveArgs {
    /// Hostname of the current page
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    host: Option<String>,

    /// URL of the current page
    #[arg(long)]
    url: Option<Url>,

    /// Report the decision without navigating
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = config::load_or_default(cli.config.as_deref())?;
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init_logging(log_level);

    let store_path = cli
        .store
        .clone()
        .or_else(|| config.storage.path.clone())
        .or_else(default_store_path)
        .ok_or("no store path: pass --store or set storage.path")?;
    tracing::debug!(store = %store_path.display(), "Opening store");

    let store = JsonFileStore::open(&store_path)?;
    let mut state = AppState::load(store, &config.probes.intranet.default_target_url)?;

    match cli.command {
        Commands::Resolve(args) => resolve(&config, &state, args).await?,
        Commands::Add {
            domain,
            ipv6,
            intranet,
        } => {
            let domain = domain.to_ascii_lowercase();
            let ipv6 = ipv6.unwrap_or_else(|| format!("https://ipv6.{domain}"));
            let intranet = intranet.unwrap_or_else(|| format!("http://intranet.{domain}"));
            let entry = state.add_site(&domain, &ipv6, &intranet)?;
            println!("Added {}", entry.domain);
            println!("   IPv6:     {}", entry.ipv6_site);
            println!("   Intranet: {}", entry.intranet_site);
        }
        Commands::Remove { host } => {
            let host = host.to_ascii_lowercase();
            match state.remove_site(&host)? {
                0 => println!("{host} is not registered"),
                n => println!("Removed {n} matching entry(s) for {host}"),
            }
        }
        Commands::List => {
            if state.entries().is_empty() {
                println!("Routing table is empty");
            }
            for (i, entry) in state.entries().iter().enumerate() {
                println!("{}. {}", i + 1, entry.domain);
                println!("   IPv6:     {}", entry.ipv6_site);
                println!("   Intranet: {}", entry.intranet_site);
            }
        }
        Commands::Delete { number } => {
            let index = number.checked_sub(1).ok_or("entries are numbered from 1")?;
            let entry = state.delete_at(index)?;
            println!("Deleted {}", entry.domain);
        }
        Commands::SetIntranetTest { url } => {
            state.set_intranet_test_url(&url)?;
            println!("Intranet test URL set to {url}");
        }
        Commands::ShowIntranetTest => println!("{}", state.intranet_test_url()),
        Commands::Repair => {
            let fixed = state.repair_urls()?;
            println!("Repaired {fixed} URL(s)");
        }
    }

    Ok(())
}

async fn resolve(
    config: &TunnelConfig,
    state: &AppState<JsonFileStore>,
    args: ResolveArgs,
) -> Result<(), Box<dyn Error>> {
    let host = current_host(&args)?;

    let transport = HttpTransport::new()?;
    let engine = DecisionEngine::from_config(transport, config, state.intranet_test_url());
    let decision = engine.decide(state.table(), &host).await;

    if args.dry_run {
        match &decision.result {
            DecisionResult::Redirect(url) => println!("{}\t{}", decision.resolution, url),
            DecisionResult::NoAction => println!("{}", decision.resolution),
        }
        return Ok(());
    }

    let navigator = ConfiguredNavigator::from_config(&config.redirect)?;
    redirect::execute(&decision.result, &navigator).await?;
    Ok(())
}

/// Hostname of the current page, lowercased the way a browser reports it.
fn current_host(args: &ResolveArgs) -> Result<String, Box<dyn Error>> {
    if let Some(url) = &args.url {
        return url
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| format!("URL '{url}' has no host").into());
    }

    let raw = args.host.as_deref().unwrap_or_default();
    let host = url::Host::parse(raw).map_err(|e| format!("invalid host '{raw}': {e}"))?;
    Ok(host.to_string())
}
