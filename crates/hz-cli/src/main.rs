//! CLI frontend for the Hazard dice-pool engine.

mod commands;
mod config;
mod notifier;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hz_mechanics::TableConfig;

use crate::commands::Context;
use crate::config::CliConfig;

/// Largest action or danger pool the command line accepts.
const MAX_POOL: i64 = 20;

#[derive(Parser)]
#[command(
    name = "hz",
    about = "Hazard: action/danger dice pools and character ledgers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Roster file (default: from hz.toml, else roster.json)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Config file (default: hz.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Force the next dice faces, comma-separated (e.g. 6,6,3)
    #[arg(long, global = true, value_delimiter = ',')]
    dice: Vec<u8>,

    /// Print announcements as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a character with a fresh ledger
    New {
        /// Character name
        name: String,
    },

    /// List characters and their ledgers
    List,

    /// Show a character's full sheet
    Show {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Delete a character
    Delete {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Roll action dice against danger dice
    Roll {
        /// Character name (case-insensitive)
        name: String,

        /// Number of action dice, 0-20
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(..=MAX_POOL))]
        action: u8,

        /// Number of danger dice, 0-20 (default: from conditions and traumas)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(..=MAX_POOL))]
        danger: Option<u8>,
    },

    /// Mark a hit box
    Hit {
        /// Character name (case-insensitive)
        name: String,

        /// Box number, starting at 1 (default: the next unmarked box)
        #[arg(short, long = "box")]
        box_number: Option<usize>,
    },

    /// Recover one hit
    Rest {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Spend, refresh, or gain stunt points
    Stunt {
        #[command(subcommand)]
        action: StuntCommand,
    },

    /// Gain, stash, or spend leverage
    Leverage {
        #[command(subcommand)]
        action: LeverageCommand,
    },

    /// Mark one experience
    Xp {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Set or clear a condition
    Condition {
        /// Character name (case-insensitive)
        name: String,

        /// afraid, angry, exhausted, hungry, injured, or lost
        condition: String,

        /// Clear the condition instead of setting it
        #[arg(long)]
        clear: bool,
    },

    /// Cycle a drive box: empty, ticked, crossed
    Drive {
        /// Character name (case-insensitive)
        name: String,

        /// Box number, 1-10
        #[arg(value_name = "BOX")]
        box_number: usize,
    },

    /// Write or clear a trauma line
    Trauma {
        /// Character name (case-insensitive)
        name: String,

        /// Line number, 1-4
        line: usize,

        /// Trauma text (omit to clear the line)
        text: Vec<String>,
    },

    /// Manage and roll the gear-roll budget
    Gear {
        #[command(subcommand)]
        action: GearCommand,
    },

    /// Spend experience on an advance (lists options when none is given)
    Advance {
        /// Character name (case-insensitive)
        name: String,

        /// trademark, edge, hits, or stunts
        choice: Option<String>,
    },

    /// Roll to retire a character
    Retire {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Manage gear and special-gear items
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },
}

#[derive(Subcommand)]
enum StuntCommand {
    /// Spend a held stunt point
    Use {
        /// Character name (case-insensitive)
        name: String,

        /// Point number, starting at 1 (default: the highest held point)
        #[arg(short, long)]
        point: Option<usize>,
    },
    /// Refill stunt points
    Refresh {
        /// Character name (case-insensitive)
        name: String,
    },
    /// Gain one bonus stunt point
    Bonus {
        /// Character name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum LeverageCommand {
    /// Roll a d6, halve it, and stash the result
    Gain {
        /// Character name (case-insensitive)
        name: String,
    },
    /// Stash one bonus leverage
    Bonus {
        /// Character name (case-insensitive)
        name: String,
    },
    /// Spend one leverage
    Spend {
        /// Character name (case-insensitive)
        name: String,

        /// doc, dream, or train
        on: String,
    },
}

#[derive(Subcommand)]
enum GearCommand {
    /// Refill gear rolls
    Reset {
        /// Character name (case-insensitive)
        name: String,
    },
    /// Spend gear rolls without rolling
    Spend {
        /// Character name (case-insensitive)
        name: String,

        /// Gear rolls to spend
        #[arg(default_value = "1")]
        cost: u32,
    },
    /// Make a gear roll
    Roll {
        /// Character name (case-insensitive)
        name: String,

        /// Target number, 1-6
        #[arg(short, long, conflicts_with = "item", required_unless_present = "item")]
        target: Option<u32>,

        /// Use an item's tag count as the target
        #[arg(short, long)]
        item: Option<String>,

        /// Modifier; each point costs one more gear roll
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        modifier: i32,

        /// Stash to spend as a bonus
        #[arg(short, long, default_value = "0")]
        stash: u32,
    },
}

#[derive(Subcommand)]
enum ItemCommand {
    /// Add an item
    Add {
        /// Character name (case-insensitive)
        name: String,

        /// Item name
        item: String,

        /// Add as special gear
        #[arg(short, long)]
        special: bool,

        /// Comma-separated tags (special gear only)
        #[arg(short, long, value_delimiter = ',', requires = "special")]
        tags: Vec<String>,
    },
    /// Remove an item
    Remove {
        /// Character name (case-insensitive)
        name: String,

        /// Item name (case-insensitive)
        item: String,
    },
    /// List a character's items
    List {
        /// Character name (case-insensitive)
        name: String,
    },
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env("HZ_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn context(cli: &Cli) -> Result<Context, String> {
    let config = CliConfig::load(cli.config.as_deref())?;
    init_logging(&config.log);

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let mut table = TableConfig::default().with_forced_faces(cli.dice.iter().copied());
    if let Some(seed) = cli.seed.or(config.seed) {
        table = table.with_seed(seed);
    }

    Ok(Context {
        roster: cli.roster.clone().unwrap_or(config.roster),
        table,
        json: cli.json,
    })
}

fn run(cli: Cli) -> Result<(), String> {
    let ctx = context(&cli)?;
    tracing::debug!(roster = %ctx.roster.display(), "starting");

    match cli.command {
        Commands::New { name } => commands::new::run(&ctx, &name),
        Commands::List => commands::list::run(&ctx),
        Commands::Show { name } => commands::show::run(&ctx, &name),
        Commands::Delete { name } => commands::delete::run(&ctx, &name),
        Commands::Roll {
            name,
            action,
            danger,
        } => commands::roll::run(&ctx, &name, action.into(), danger.map(usize::from)),
        Commands::Hit { name, box_number } => commands::sheet::hit(&ctx, &name, box_number),
        Commands::Rest { name } => commands::sheet::rest(&ctx, &name),
        Commands::Stunt { action } => match action {
            StuntCommand::Use { name, point } => commands::sheet::use_stunt(&ctx, &name, point),
            StuntCommand::Refresh { name } => commands::sheet::refresh_stunts(&ctx, &name),
            StuntCommand::Bonus { name } => commands::sheet::bonus_stunt(&ctx, &name),
        },
        Commands::Leverage { action } => match action {
            LeverageCommand::Gain { name } => commands::sheet::gain_leverage(&ctx, &name),
            LeverageCommand::Bonus { name } => commands::sheet::bonus_leverage(&ctx, &name),
            LeverageCommand::Spend { name, on } => {
                commands::sheet::spend_leverage(&ctx, &name, &on)
            }
        },
        Commands::Xp { name } => commands::sheet::mark_experience(&ctx, &name),
        Commands::Condition {
            name,
            condition,
            clear,
        } => commands::sheet::condition(&ctx, &name, &condition, !clear),
        Commands::Drive { name, box_number } => commands::sheet::drive(&ctx, &name, box_number),
        Commands::Trauma { name, line, text } => {
            commands::sheet::trauma(&ctx, &name, line, &text.join(" "))
        }
        Commands::Gear { action } => match action {
            GearCommand::Reset { name } => commands::gear::reset(&ctx, &name),
            GearCommand::Spend { name, cost } => commands::gear::spend(&ctx, &name, cost),
            GearCommand::Roll {
                name,
                target,
                item,
                modifier,
                stash,
            } => commands::gear::roll(&ctx, &name, target, item.as_deref(), modifier, stash),
        },
        Commands::Advance { name, choice } => {
            commands::advance::run(&ctx, &name, choice.as_deref())
        }
        Commands::Retire { name } => commands::retire::run(&ctx, &name),
        Commands::Item { action } => match action {
            ItemCommand::Add {
                name,
                item,
                special,
                tags,
            } => commands::item::add(&ctx, &name, &item, special, tags),
            ItemCommand::Remove { name, item } => commands::item::remove(&ctx, &name, &item),
            ItemCommand::List { name } => commands::item::list(&ctx, &name),
        },
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
