use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use stencilcheck::{
    gallery::{list_png_files, render_gallery, GalleryOptions},
    render_markdown, run_checks, CheckConfig,
};

#[derive(Parser, Debug)]
#[command(name = "stencilcheck", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a submission against the template and write report artifacts.
    Check(CheckArgs),
    /// Print a markdown gallery table for a directory of PNGs.
    Gallery(GalleryArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Path to the candidate submission file.
    path: PathBuf,

    /// JSON checker config; defaults to the built-in reference instance.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report output directory (overrides the config's report_dir).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GalleryArgs {
    /// Directory holding the gallery images.
    dir: PathBuf,

    /// Images per table row.
    #[arg(long, default_value_t = 3)]
    per_row: usize,

    /// Rendered image width in pixels.
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// Prefix stripped from filenames to produce captions.
    #[arg(long, default_value = "cat_sitting_")]
    prefix: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Gallery(args) => cmd_gallery(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => CheckConfig::load(path)?,
        None => CheckConfig::default(),
    };
    if let Some(out_dir) = args.out_dir {
        cfg.report_dir = out_dir;
    }

    eprintln!("checking {}", args.path.display());
    let report = run_checks(&cfg, &args.path)?;

    let Some(name) = report.submission_name.clone() else {
        let failed = report
            .rows()
            .iter()
            .find(|(_, status)| !status.passed())
            .map(|(label, _)| *label)
            .unwrap_or("unknown check");
        eprintln!(
            "report unavailable: '{failed}' failed before a submission name could be extracted"
        );
        return Ok(());
    };

    std::fs::create_dir_all(&cfg.report_dir)
        .with_context(|| format!("create report dir '{}'", cfg.report_dir.display()))?;

    if let Some(annotated) = &report.annotated {
        let changes_path = cfg.report_dir.join(format!("{name}_changes.png"));
        annotated.save_png(&changes_path)?;
        eprintln!("wrote {}", changes_path.display());
    }

    let markdown = render_markdown(&report)?;
    let report_path = cfg
        .report_dir
        .join(format!("{name}_preliminary_check_report.md"));
    std::fs::write(&report_path, markdown)
        .with_context(|| format!("write report '{}'", report_path.display()))?;
    eprintln!("wrote {}", report_path.display());

    eprintln!(
        "done checking {}: {}",
        args.path.display(),
        if report.passed() { "pass" } else { "fail" }
    );
    Ok(())
}

fn cmd_gallery(args: GalleryArgs) -> anyhow::Result<()> {
    let image_dir = args
        .dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(".")
        .to_string();

    let opts = GalleryOptions {
        image_dir,
        image_width: args.width,
        per_row: args.per_row,
        filename_prefix: args.prefix,
    };

    let filenames = list_png_files(&args.dir)?;
    eprintln!("detected {} images", filenames.len());

    println!("{}", render_gallery(&filenames, &opts));
    Ok(())
}
