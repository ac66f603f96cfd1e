use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};
use photo_sorter_core::config::LogLevel;
use photo_sorter_core::{
    format_key, logging, read_exif_fields, CollisionPolicy, Config, ExifMetadataProvider,
    MetadataProvider, MissingTimestampPolicy, PhotoSorter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-sorter")]
#[command(about = "Sort photos into one folder per capture day")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Args)]
struct GroupingArgs {
    /// Image files or folders holding them (folders are not searched recursively)
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Leave files without a capture date in place instead of failing
    #[arg(long)]
    skip_missing: bool,

    /// Also consider files whose extension is not a known image format
    #[arg(long, requires = "skip_missing")]
    all_files: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Move photos into per-day folders under a destination
    Sort {
        #[command(flatten)]
        grouping: GroupingArgs,

        /// Folder the day folders are created in
        #[arg(short, long)]
        dest: PathBuf,

        /// Keep both files on a name clash instead of overwriting
        #[arg(long)]
        rename_on_collision: bool,

        /// Show a progress bar while moving
        #[arg(long)]
        progress: bool,
    },

    /// Show how photos would be grouped without moving anything
    Group {
        #[command(flatten)]
        grouping: GroupingArgs,
    },

    /// Print the capture date and every EXIF field of one file
    Inspect {
        /// Image file to inspect
        file: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Set log level based on verbosity
    let mut config = Config::default();
    config.log_level = log_level_for(cli.verbose);
    init_logging(cli.log_dir.as_ref(), &config)?;

    match cli.command {
        Commands::Sort {
            grouping,
            dest,
            rename_on_collision,
            progress,
        } => {
            let mut config = build_config(&grouping, config);
            if rename_on_collision {
                config.collision_policy = CollisionPolicy::Rename;
            }
            config.show_progress = progress;
            config.validate()?;

            let sorter = PhotoSorter::new(config);
            let images = sorter.discover(&grouping.sources[..])?;
            info!("Found {} images", images.len());
            let grouped = sorter.group(images)?;
            for (file, e) in grouped.skipped() {
                warn!("Left {} in place: {}", file.path.display(), e);
            }

            info!("Starting sort into {}", dest.display());
            let result = sorter
                .sort(&grouped, &dest)
                .with_context(|| format!("sorting into {} stopped", dest.display()))?;
            info!("Sort complete");

            if grouping.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for bucket in &result.buckets {
                    println!("{} ({} files)", bucket.directory.display(), bucket.files.len());
                }
                println!(
                    "Moved {} files, skipped {}",
                    result.moved_count(),
                    grouped.skipped().len()
                );
            }
            Ok(())
        }

        Commands::Group { grouping } => {
            let config = build_config(&grouping, config);
            config.validate()?;

            let sorter = PhotoSorter::new(config);
            let images = sorter.discover(&grouping.sources[..])?;
            let grouped = sorter.group(images)?;

            if grouping.json {
                let buckets: Vec<_> = grouped
                    .iter()
                    .map(|(key, files)| {
                        serde_json::json!({
                            "key": key,
                            "files": files.iter().map(|f| &f.path).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&buckets)?);
            } else {
                for (key, files) in grouped.iter() {
                    println!("'{}'", key);
                    for file in files {
                        println!("  {}", file.path.display());
                    }
                }
                for (file, e) in grouped.skipped() {
                    println!("skipped {}: {}", file.path.display(), e);
                }
            }
            Ok(())
        }

        Commands::Inspect { file } => {
            match ExifMetadataProvider.capture_date(&file) {
                Ok(date) => println!("Captured: {} -> '{}'", date, format_key(&date)),
                Err(e) => println!("Captured: unknown ({})", e),
            }
            for field in read_exif_fields(&file)? {
                println!("[{}] {} = {}", field.ifd, field.tag, field.value);
            }
            Ok(())
        }
    }
}

fn log_level_for(verbose: u8) -> LogLevel {
    match verbose {
        0 => LogLevel::Info,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}

fn build_config(args: &GroupingArgs, mut config: Config) -> Config {
    if args.skip_missing {
        config.missing_timestamp = MissingTimestampPolicy::Skip;
    }
    config.process_unsupported_formats = args.all_files;
    config
}

fn init_logging(log_dir: Option<&PathBuf>, config: &Config) -> anyhow::Result<()> {
    let level = LevelFilter::from(config.log_level);
    match log_dir {
        Some(dir) => logging::init_logger(dir, level)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("failed to set up file logging"),
        None => {
            env_logger::Builder::new()
                .filter_level(logging::effective_level(level))
                .init();
            Ok(())
        }
    }
}
