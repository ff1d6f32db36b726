use clap::{Parser, Subcommand, ValueEnum};
use dh_cli::{init_logging, log_level, read_adversary, read_monster, read_options};
use dh_engine::api;
use dh_engine::balance::has_errors;
use dh_engine::content::builtin_names;
use dh_engine::format::render;
use dh_engine::{tier_for_cr, Adversary, ChallengeRating, ConvertOptions, OutputFormat};
use std::{fs, path::PathBuf};

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Markdown,
    Compact,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Markdown => OutputFormat::Markdown,
            Format::Compact => OutputFormat::Compact,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert a monster file (JSON or YAML) into an adversary
    Convert {
        /// Path to the monster file
        file: PathBuf,
        /// Options file (JSON or YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format; overrides the formats listed in the options file
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Narrative seed (defaults to one derived from the monster name)
        #[arg(long)]
        seed: Option<u64>,
        /// Leave out the design notes block
        #[arg(long, default_value_t = false)]
        no_notes: bool,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Convert a built-in sample monster, or list them when no name is given
    Builtin {
        /// Built-in id, e.g. goblin or adult-red-dragon
        name: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the tier for a challenge rating (0.25, 1/4, 17, ...)
    Tier { cr: String },
    /// Move an adversary file to another tier
    RescaleTier {
        file: PathBuf,
        /// Target tier (1-4)
        tier: u8,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Move an adversary file to another difficulty (minor, major, severe)
    RescaleDifficulty {
        file: PathBuf,
        difficulty: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Apply a quick-adjust preset (tougher, weaker, deadlier, softer, elite, minionize)
    Adjust {
        file: PathBuf,
        preset: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Run the balance checker over an adversary file
    Check { file: PathBuf },
}

#[derive(Parser)]
#[command(name = "dhconv")]
#[command(about = "Convert D&D 5e monsters into Daggerheart adversaries")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn emit(adversary: &Adversary, formats: &[OutputFormat], out: Option<&PathBuf>) -> anyhow::Result<()> {
    let text = formats
        .iter()
        .map(|f| render(adversary, *f))
        .collect::<Vec<_>>()
        .join("\n");
    match out {
        Some(path) => {
            fs::write(path, text)?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Options are loaded before logging so their verbosity can apply.
    let loaded = match &cli.cmd {
        Cmd::Convert {
            config: Some(path), ..
        } => Some(read_options(path)?),
        _ => None,
    };
    init_logging(log_level(cli.verbose, loaded.as_ref().map(|o| o.verbosity)));

    match cli.cmd {
        Cmd::Convert {
            file,
            config: _,
            format,
            seed,
            no_notes,
            out,
        } => {
            let mut options = loaded.unwrap_or_default();
            if let Some(seed) = seed {
                options.seed = Some(seed);
            }
            if no_notes {
                options.include_design_notes = false;
            }
            if let Some(f) = format {
                options.formats = vec![f.into()];
            }
            let monster = read_monster(&file)?;
            let adversary = api::convert_monster(&monster, &options)?;
            emit(&adversary, &options.formats, out.as_ref())?;
        }
        Cmd::Builtin { name, format, seed } => match name {
            None => {
                for id in builtin_names() {
                    println!("{}", id);
                }
            }
            Some(name) => {
                let monster = api::builtin_monster(&name)?;
                let options = ConvertOptions {
                    seed,
                    ..Default::default()
                };
                let adversary = api::convert_monster(&monster, &options)?;
                emit(&adversary, &[format.into()], None)?;
            }
        },
        Cmd::Tier { cr } => {
            let rating = ChallengeRating::parse(&cr)?;
            let tier = tier_for_cr(rating.value())?;
            println!("CR {} => Tier {} ({} XP)", rating, tier, rating.xp());
        }
        Cmd::RescaleTier { file, tier, format } => {
            let adversary = read_adversary(&file)?;
            let scaled = api::rescale_tier(&adversary, tier)?;
            emit(&scaled, &[format.into()], None)?;
        }
        Cmd::RescaleDifficulty {
            file,
            difficulty,
            format,
        } => {
            let adversary = read_adversary(&file)?;
            let scaled = api::rescale_difficulty(&adversary, &difficulty)?;
            emit(&scaled, &[format.into()], None)?;
        }
        Cmd::Adjust {
            file,
            preset,
            format,
        } => {
            let adversary = read_adversary(&file)?;
            let adjusted = api::quick_adjust(&adversary, &preset)?;
            emit(&adjusted, &[format.into()], None)?;
        }
        Cmd::Check { file } => {
            let adversary = read_adversary(&file)?;
            let findings = api::check(&adversary);
            if findings.is_empty() {
                println!("{}: no findings", adversary.name);
            }
            for finding in &findings {
                println!("{}", finding);
            }
            if has_errors(&findings) {
                anyhow::bail!("{} failed the balance check", adversary.name);
            }
        }
    }
    Ok(())
}
