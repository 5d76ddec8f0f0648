use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{error, info, warn, Instrument};

use equipment_scraper::app::ports::Progress;
use equipment_scraper::config::Config;
use equipment_scraper::constants::DEFAULT_OUTPUT_FILE;
use equipment_scraper::infra::ReqwestHttp;
use equipment_scraper::input::read_urls_from_path;
use equipment_scraper::logging;
use equipment_scraper::output::{
    build_image_archive, create_archive_file, template_output_path, write_csv, write_xlsx,
    write_xlsx_from_template, ArchiveNaming,
};
use equipment_scraper::pipeline::BatchDriver;
use equipment_scraper::registry::RecipeRegistry;
use equipment_scraper::types::ImageMode;

#[derive(Parser)]
#[command(name = "equipment_scraper")]
#[command(about = "Auction equipment listing scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Directory for rotated JSON log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported sites and the recipe each one uses
    Sites,
    /// Scrape every URL in a CSV file
    Run {
        /// Headerless CSV with one listing URL per row (first column)
        #[arg(long)]
        input: PathBuf,
        /// Site label, e.g. Fastline, Proxi_Bid, Kerr, "Superior Energy"
        #[arg(long)]
        site: String,
        #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "xlsx")]
        format: OutputFormat,
        /// Existing workbook to fill from row 2 (keeps formatting and macros)
        #[arg(long)]
        template: Option<PathBuf>,
        /// Collect images into this zip instead of =IMAGE() cells
        #[arg(long)]
        images: Option<PathBuf>,
        /// Name archive entries by spreadsheet row instead of collection order
        #[arg(long, requires = "images")]
        align_images: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

struct RunArgs {
    input: PathBuf,
    site: String,
    output: PathBuf,
    format: OutputFormat,
    template: Option<PathBuf>,
    images: Option<PathBuf>,
    align_images: bool,
    config: Option<PathBuf>,
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    // Configuration problems surface before any network traffic
    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let registry = RecipeRegistry::new();
    let (site, recipe) = registry.resolve_label(&args.site)?;

    if let Some(template) = &args.template {
        if matches!(args.format, OutputFormat::Csv) {
            bail!("--template only applies to xlsx output");
        }
        if !template.exists() {
            bail!("Template not found: {}", template.display());
        }
    }

    // Opened now so an unwritable archive path fails before any fetch
    let archive_file = match &args.images {
        Some(path) => Some(
            create_archive_file(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => None,
    };

    let urls = read_urls_from_path(&args.input)
        .with_context(|| format!("reading URL list {}", args.input.display()))?;
    if urls.is_empty() {
        warn!("No URLs in {}", args.input.display());
    }

    let mode = if args.images.is_some() {
        ImageMode::Collect
    } else {
        ImageMode::Formula
    };

    let http = ReqwestHttp::new(config.http.clone())?;
    let driver = BatchDriver::new(&http, site, recipe, mode);
    let total = urls.len();
    let mut report = |fraction: f64| {
        let done = (fraction * total as f64).round() as usize;
        info!("Progress: {}/{} ({:.0}%)", done, total, fraction * 100.0);
    };
    let progress: &mut dyn Progress = &mut report;
    let span = tracing::info_span!("batch", site = %site, recipe = recipe.key);
    let result = driver.run(&urls, Some(progress)).instrument(span).await;

    let output = match &args.template {
        Some(template) => template_output_path(template, &args.output),
        None => args.output.clone(),
    };
    match (args.format, &args.template) {
        (OutputFormat::Xlsx, Some(template)) => {
            write_xlsx_from_template(template, &result.schema, &result.records, &output)?
        }
        (OutputFormat::Xlsx, None) => write_xlsx(
            &result.schema,
            &result.records,
            &output,
            &config.output.sheet_name,
        )?,
        (OutputFormat::Csv, _) => {
            let file = File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            write_csv(&result.schema, &result.records, BufWriter::new(file))?;
        }
    }
    println!("💾 Saved {} rows to {}", result.records.len(), output.display());

    if let (Some(archive_path), Some(file)) = (&args.images, archive_file) {
        let naming = if args.align_images {
            ArchiveNaming::Row
        } else {
            ArchiveNaming::Sequential
        };
        let summary = build_image_archive(&result.images, &http, naming, file).await?;
        println!(
            "🖼️  Saved {} images to {} ({} skipped)",
            summary.written,
            archive_path.display(),
            summary.skipped
        );
        if naming == ArchiveNaming::Sequential && result.images.len() < result.records.len() {
            warn!(
                "{} of {} rows had no image; archive numbering does not follow spreadsheet rows",
                result.records.len() - result.images.len(),
                result.records.len()
            );
        }
    }

    println!("\n📊 Results for {}:", site);
    println!("   Rows: {}", result.records.len());
    println!("   Failures: {}", result.failures.len());
    for failure in &result.failures {
        println!("   - row {} {}: {}", failure.row, failure.url, failure.error);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli.log_dir);

    match cli.command {
        Commands::Sites => {
            let registry = RecipeRegistry::new();
            for (site, recipe) in registry.list_sites() {
                println!("{:<16} -> {}", site.label(), recipe.name);
            }
        }
        Commands::Run {
            input,
            site,
            output,
            format,
            template,
            images,
            align_images,
            config,
        } => {
            let args = RunArgs {
                input,
                site,
                output,
                format,
                template,
                images,
                align_images,
                config,
            };
            if let Err(e) = run(args).await {
                error!("Run failed: {:#}", e);
                return Err(e);
            }
        }
    }
    Ok(())
}
