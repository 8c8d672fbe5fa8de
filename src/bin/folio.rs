use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a raw project record into its canonical form.
    Normalize(NormalizeArgs),
    /// Validate a raw project record and lint its normalized form.
    Check(CheckArgs),
    /// List the aggregated media of a normalized record, one per line.
    Gallery(GalleryArgs),
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the canonical JSON (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat lint warnings as failures.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct GalleryArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Route bare filenames into their public base directory.
    #[arg(long, default_value_t = false)]
    public: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Normalize(args) => cmd_normalize(args),
        Command::Check(args) => cmd_check(args),
        Command::Gallery(args) => cmd_gallery(args),
    }
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let def = folio::ProjectDef::from_path(&args.in_path)?;
    let project = folio::normalize(&def);

    let text = if args.pretty {
        serde_json::to_string_pretty(&project)?
    } else {
        serde_json::to_string(&project)?
    };

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, text)
                .with_context(|| format!("write canonical record '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let def = folio::ProjectDef::from_path(&args.in_path)?;

    if let Err(errors) = folio::validate_project(&def) {
        for error in &errors.errors {
            eprintln!("error: {error}");
        }
        anyhow::bail!("validation failed with {} error(s)", errors.errors.len());
    }

    let project = folio::normalize(&def);
    let warnings = folio::lint_project(&project);
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    if args.strict && !warnings.is_empty() {
        anyhow::bail!("strict check failed with {} warning(s)", warnings.len());
    }

    eprintln!(
        "ok: {} section(s), {} media",
        project.section_count,
        project.all_media.len()
    );
    Ok(())
}

fn cmd_gallery(args: GalleryArgs) -> anyhow::Result<()> {
    let def = folio::ProjectDef::from_path(&args.in_path)?;
    let project = folio::normalize(&def);

    for media in &project.all_media {
        let src = if args.public {
            folio::media::paths::public_media_url(&media.src)
        } else {
            media.src.clone()
        };
        if media.caption.is_empty() {
            println!("{}\t{}", media.kind.as_str(), src);
        } else {
            println!("{}\t{}\t{}", media.kind.as_str(), src, media.caption);
        }
    }
    Ok(())
}
