use clap::{Parser, Subcommand};
use puml_rollup::{Aggregator, Classifier, Config, Document, FileDiscovery, LinePatterns};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "puml-rollup")]
#[command(about = "Merges per-module PlantUML package diagrams into one high-level diagram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge all diagram files from a directory into one overview diagram
    Merge {
        /// Directory containing the per-module .puml files
        #[arg(short, long, default_value = "./UML")]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for the merged diagram
        #[arg(short, long, default_value = "./UML_HighLevel")]
        output: PathBuf,

        /// File name of the merged diagram
        #[arg(long, default_value = "master_highlevel.puml")]
        file: String,
    },
    /// Shade class colors inside the package blocks of one diagram
    Shade {
        /// Diagram file to shade
        input: PathBuf,

        /// Where to write the shaded diagram
        output: PathBuf,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file (defaults to ~/.puml-rollup.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            input,
            config,
            output,
            file,
        } => {
            merge_diagrams(input, config, output, file)?;
        }
        Commands::Shade { input, output } => {
            shade_diagram(input, output)?;
        }
        Commands::Config { output } => {
            generate_config(output)?;
        }
    }

    Ok(())
}

fn merge_diagrams(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: PathBuf,
    file_name: String,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let mut config = if let Some(config_path) = config_path {
        Config::from_file(&config_path)?
    } else {
        Config::load()?
    };

    // Override source directory
    config.source_directory = input.clone();

    println!("🎯 Source directory: {}", input.display());

    // Overlapping category lists are a configuration error; fail before
    // touching any document.
    let classifier = Classifier::new(&config.categories.dynamic, &config.categories.static_)?;

    let discovery = FileDiscovery::new(config.clone());
    let files = discovery.discover_files()?;
    let total_size: u64 = files.iter().map(|f| f.size).sum();
    println!(
        "🔍 Found {} diagram files ({:.1} KB)",
        files.len(),
        total_size as f64 / 1024.0
    );

    let patterns = LinePatterns::new()?;
    let mut aggregator = Aggregator::new();

    for file in &files {
        let text = fs::read_to_string(&file.path)?;
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());

        aggregator.ingest(&patterns, &Document { name, text });
        println!("  ✓ {}", file.path.display());
    }

    let rendered = puml_rollup::render(&aggregator, &classifier);

    fs::create_dir_all(&output_dir)?;
    let out_path = output_dir.join(&file_name);
    fs::write(&out_path, rendered)?;

    let duration = start_time.elapsed();
    println!(
        "\n✅ Merged {} modules and {} relations in {:.2}s",
        aggregator.module_count(),
        aggregator.relation_count(),
        duration.as_secs_f64()
    );
    println!("📁 Wrote {}", out_path.display());

    Ok(())
}

fn shade_diagram(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let text = fs::read_to_string(&input)?;
    let shaded = puml_rollup::shade::apply(&text)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output, shaded)?;

    println!("✅ Wrote {}", output.display());
    Ok(())
}

fn generate_config(output_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = output_path.unwrap_or_else(|| {
        Config::default_config_path().unwrap_or_else(|_| PathBuf::from("puml-rollup.toml"))
    });

    println!("📝 Generating configuration file: {}", config_path.display());

    let documented_config = Config::create_documented_config();
    std::fs::write(&config_path, documented_config)?;

    println!("✅ Configuration file created successfully!");
    println!("💡 Edit the category lists to control <<dynamic>>/<<static>> styling.");

    Ok(())
}
