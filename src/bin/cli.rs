use clap::{Args, Parser, Subcommand};
use qht_rs::common::bits2hr;
use qht_rs::{
    FilterConfig, FilterConfigBuilder, FilterOps, FilterParams, FilterStats,
    QueueFilter, QuotientFilter, StreamFilterOps,
};
use std::io::{self, BufRead, BufWriter, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the table layout derived from a configuration
    Params {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Read lines from stdin and print the ones not seen before
    Dedup {
        #[command(flatten)]
        filter: FilterArgs,

        /// Use the queue variant, remembering only recent lines per cell
        #[arg(short, long)]
        queue: bool,

        /// Print duplicate lines instead of first occurrences
        #[arg(short, long)]
        duplicates: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Total memory budget in bits
    #[arg(short, long, default_value = "8388608")]
    memory_bits: u64,

    /// Buckets per cell
    #[arg(short = 'b', long, default_value = "3")]
    buckets: usize,

    /// Bits per fingerprint
    #[arg(short, long, default_value = "8")]
    fingerprint_bits: usize,

    /// Seed for the eviction RNG
    #[arg(short, long)]
    seed: Option<u64>,
}

impl FilterArgs {
    fn to_config(&self) -> Result<FilterConfig, Box<dyn std::error::Error>> {
        let mut builder = FilterConfigBuilder::default()
            .memory_size_bits(self.memory_bits)
            .n_buckets(self.buckets)
            .fingerprint_size(self.fingerprint_bits);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        let config = builder.build()?;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Params { filter } => {
            let params = FilterParams::try_from(&filter.to_config()?)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            println!("Table size: {}", bits2hr(params.table_bits));
            println!(
                "Estimated false positive rate when full: {:.4}",
                params.estimated_false_positive_rate(1.0)
            );
        }
        Commands::Dedup {
            filter,
            queue,
            duplicates,
        } => {
            let config = filter.to_config()?;
            if *queue {
                let filter = QueueFilter::new(config)?;
                dedup(filter, |f, line| f.insert(line), *duplicates)?;
            } else {
                let filter = QuotientFilter::new(config)?;
                dedup(filter, |f, line| f.stream(line), *duplicates)?;
            }
        }
    }

    Ok(())
}

fn dedup<F: FilterStats>(
    mut filter: F,
    mut seen: impl FnMut(&mut F, &str) -> bool,
    duplicates: bool,
) -> io::Result<()> {
    debug!(
        n_cells = filter.n_cells(),
        memory = %bits2hr(filter.memory_bits()),
        "dedup started"
    );

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    let (mut total, mut repeated) = (0usize, 0usize);

    for line in stdin.lock().lines() {
        let line = line?;
        total += 1;

        let is_duplicate = seen(&mut filter, &line);
        if is_duplicate {
            repeated += 1;
        }
        if is_duplicate == duplicates {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;

    info!(
        total,
        duplicates = repeated,
        load_factor = filter.load_factor(),
        "dedup finished"
    );
    Ok(())
}
