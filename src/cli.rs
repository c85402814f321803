// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;

use crate::config::ColorScheme;
use crate::config::RegenerationPolicy;
use crate::config::RemovalPolicy;
use crate::config::SorterConfig;
use crate::config::load_config;
use crate::error::Fallible;
use crate::serve::server::start_server;

/// Name of the configuration file looked up in the working directory when
/// `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "cardsorter.toml";

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the card sorter UI.
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Optional path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Port to serve on.
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Do not open the browser on startup.
    #[arg(long)]
    no_open: bool,
    /// Number of cards in the list.
    #[arg(long)]
    capacity: Option<usize>,
    /// How card colors are generated.
    #[arg(long)]
    color_scheme: Option<ColorScheme>,
    /// What happens to the list after a card is removed.
    #[arg(long)]
    removal_policy: Option<RemovalPolicy>,
    /// How "get more" replaces unpinned cards.
    #[arg(long)]
    regeneration_policy: Option<RegenerationPolicy>,
    /// Treat an explicit move as an implicit like.
    #[arg(long)]
    move_implies_pin: Option<bool>,
    /// Liking a card also clears its recommendation flag.
    #[arg(long)]
    pin_clears_recommendation: Option<bool>,
    /// Seed for the card generator.
    #[arg(long)]
    seed: Option<u64>,
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve(args) => {
            let config = resolve_config(&args)?;
            start_server(config, args.port, !args.no_open).await
        }
    }
}

fn resolve_config(args: &ServeArgs) -> Fallible<SorterConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_config(&default_path)?
            } else {
                SorterConfig::default()
            }
        }
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

// CLI flags win over the configuration file.
fn apply_overrides(config: &mut SorterConfig, args: &ServeArgs) {
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(color_scheme) = args.color_scheme {
        config.color_scheme = color_scheme;
    }
    if let Some(removal_policy) = args.removal_policy {
        config.removal_policy = removal_policy;
    }
    if let Some(regeneration_policy) = args.regeneration_policy {
        config.regeneration_policy = regeneration_policy;
    }
    if let Some(move_implies_pin) = args.move_implies_pin {
        config.move_implies_pin = move_implies_pin;
    }
    if let Some(pin_clears_recommendation) = args.pin_clears_recommendation {
        config.pin_clears_recommendation = pin_clears_recommendation;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
}
