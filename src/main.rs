use clap::{Parser, Subcommand};
use sidecar_intent::assembly::{self, AssemblyDoc};
use sidecar_intent::render;
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "sidecar-intent")]
#[command(about = "Declare sidecars and component wiring for a resource graph", long_about = None)]
struct Cli {
    /// Log every attachment (debug level).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the graph and emit the orchestrator manifest (JSON).
    Manifest {
        #[arg(long)]
        input: String,

        /// Write to a file instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Assemble the graph and print a summary.
    Check {
        #[arg(long)]
        input: String,
    },
}

fn init_logging(cli: &Cli) {
    // RUST_LOG wins over the flags.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if cli.verbose {
            "debug"
        } else if cli.quiet {
            "error"
        } else {
            "warn"
        };
        EnvFilter::new(level)
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.cmd {
        Commands::Manifest { input, out } => {
            let doc = AssemblyDoc::from_path(&input)?;
            let model = assembly::assemble(&doc)?;
            let json = render::render_manifest(&model)?;

            match out {
                Some(out) => {
                    std::fs::write(&out, json)?;
                    println!("Wrote {}", out);
                }
                None => print!("{}", json),
            }
        }
        Commands::Check { input } => {
            let doc = AssemblyDoc::from_path(&input)?;
            let model = assembly::assemble(&doc)?;

            for dup in model.duplicate_sidecars() {
                tracing::warn!(
                    resource = %dup.resource,
                    count = dup.count,
                    "resource requests more than one sidecar"
                );
            }
            print!("{}", render::render_summary(&model)?);
        }
    }

    Ok(())
}
