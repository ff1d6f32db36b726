use clap::Parser;
use dh_cli::{init_logging, log_level, read_monster};
use dh_engine::format::render;
use dh_engine::{ConvertOptions, OutputFormat, Pipeline};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(name = "batch-convert")]
#[command(about = "Convert every monster file in a directory and print a summary")]
struct Args {
    /// Directory of monster files (.json, .yaml, .yml)
    dir: PathBuf,

    /// Write one rendered adversary per monster into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output format for written files: markdown | compact | json
    #[arg(long, default_value = "json")]
    format: String,

    /// Narrative seed shared by every conversion
    #[arg(long)]
    seed: Option<u64>,

    /// Raise log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct Row {
    file: String,
    name: String,
    cr: String,
    tier: String,
    archetype: String,
    hp: u32,
    stress: u32,
    features: usize,
}

fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Markdown => "md",
        OutputFormat::Compact => "txt",
        OutputFormat::Json => "json",
    }
}

fn is_monster_file(path: &std::path::Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("yaml") | Some("yml")
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(log_level(args.verbose, None));

    let format: OutputFormat = args.format.parse()?;
    let options = ConvertOptions {
        seed: args.seed,
        ..Default::default()
    };
    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)?;
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(&args.dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| is_monster_file(p))
        .collect();
    paths.sort();

    let pipeline = Pipeline::default();
    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for path in &paths {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let converted = read_monster(path)
            .and_then(|m| pipeline.run(&m, &options).map_err(anyhow::Error::from));
        let adversary = match converted {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", file, e);
                failures.push((file, format!("{:#}", e)));
                continue;
            }
        };

        if let Some(dir) = &args.out_dir {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| adversary.name.clone());
            let target = dir.join(format!("{}.{}", stem, extension(format)));
            fs::write(&target, render(&adversary, format))?;
        }

        rows.push(Row {
            file,
            name: adversary.name.clone(),
            cr: adversary.provenance.source_cr.clone(),
            tier: adversary.tier.to_string(),
            archetype: adversary.archetype.to_string(),
            hp: adversary.hp,
            stress: adversary.stress,
            features: adversary.features.len(),
        });
    }

    println!("batch-convert results");
    println!("---------------------");
    println!(
        "{:<28} {:<24} {:>5} {:>4} {:<10} {:>3} {:>6} {:>8}",
        "file", "name", "cr", "tier", "archetype", "hp", "stress", "features"
    );
    for r in &rows {
        println!(
            "{:<28} {:<24} {:>5} {:>4} {:<10} {:>3} {:>6} {:>8}",
            r.file, r.name, r.cr, r.tier, r.archetype, r.hp, r.stress, r.features
        );
    }
    println!();
    println!("converted:          {}", rows.len());
    println!("failed:             {}", failures.len());
    for (file, err) in &failures {
        println!("  {}: {}", file, err);
    }

    Ok(())
}
