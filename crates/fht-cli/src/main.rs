//! Command-line front end for the fast Hadamard transform.
//!
//! Provides subcommands:
//! - transform: transform a whitespace-separated text matrix
//! - bench: time the row-parallel kernel on generated data
//! - config: print or write the default configuration

mod bench;
mod element;
mod io;
mod transform;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use fht_core::{logging, AppConfig, ElementType};
use fht_kernels::RowTransformer;

use crate::bench::{run_bench, BenchReport};
use crate::transform::{transform_text, AxisArg, Scaling, TransformOptions};

#[derive(Parser)]
#[command(name = "fht")]
#[command(about = "Fast Hadamard transform", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads for the row driver (overrides the config file)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Emit JSON log lines instead of human-readable ones
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a text matrix (one row per line)
    Transform {
        /// Input file, or - for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file, or - for stdout
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Element type
        #[arg(short, long, default_value = "f64")]
        dtype: ElementType,

        /// Axes to transform
        #[arg(short, long, value_enum, default_value = "rows")]
        axis: AxisArg,

        /// Divide by the transform size (inverse of an unscaled transform)
        #[arg(long, conflicts_with = "orthonormal")]
        inverse: bool,

        /// Divide by the square root of the transform size
        #[arg(long)]
        orthonormal: bool,
    },

    /// Run performance benchmark
    Bench {
        /// Number of rows
        #[arg(short, long)]
        rows: Option<usize>,

        /// Row length (power of two)
        #[arg(short = 'n', long)]
        row_length: Option<usize>,

        /// Timed iterations
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Element type
        #[arg(short, long)]
        dtype: Option<ElementType>,

        /// RNG seed for the generated matrix
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Print the default configuration, or write it to a file
    Config {
        /// Destination file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(threads) = cli.threads {
        config.kernel.num_threads = threads;
    }
    if cli.json_logs {
        logging::init_logging(&config.log_level);
    } else {
        logging::init_console_logging(&config.log_level);
    }

    match cli.command {
        Commands::Transform {
            input,
            output,
            dtype,
            axis,
            inverse,
            orthonormal,
        } => {
            let scaling = if orthonormal {
                Scaling::Orthonormal
            } else if inverse {
                Scaling::Inverse
            } else {
                Scaling::None
            };
            run_transform(&config, &input, &output, dtype, TransformOptions { axis, scaling })?
        }

        Commands::Bench {
            rows,
            row_length,
            iterations,
            dtype,
            seed,
        } => {
            let bench = &mut config.bench;
            bench.row_count = rows.unwrap_or(bench.row_count);
            bench.row_length = row_length.unwrap_or(bench.row_length);
            bench.iterations = iterations.unwrap_or(bench.iterations);
            bench.element_type = dtype.unwrap_or(bench.element_type);
            run_benchmark(&config, seed)?
        }

        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(p) => Ok(AppConfig::from_file(p)?),
        None => Ok(AppConfig::default()),
    }
}

fn run_transform(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    dtype: ElementType,
    options: TransformOptions,
) -> anyhow::Result<()> {
    let transformer = RowTransformer::new(&config.kernel)?;
    let text = io::read_source(input)?;
    let result = match dtype {
        ElementType::F32 => transform_text::<f32>(&text, &options, &transformer)?,
        ElementType::F64 => transform_text::<f64>(&text, &options, &transformer)?,
        ElementType::I32 => transform_text::<i32>(&text, &options, &transformer)?,
        ElementType::I64 => transform_text::<i64>(&text, &options, &transformer)?,
    };
    io::write_sink(output, &result)?;
    Ok(())
}

fn run_benchmark(config: &AppConfig, seed: u64) -> anyhow::Result<()> {
    let transformer = RowTransformer::new(&config.kernel)?;
    let bench = &config.bench;

    println!(
        "{} {}x{} {} ({} iterations, {} workers)",
        "Benchmarking".yellow(),
        bench.row_count,
        bench.row_length,
        bench.element_type,
        bench.iterations,
        transformer.num_threads()
    );

    let report = match bench.element_type {
        ElementType::F32 => run_bench::<f32>(bench, &transformer, seed)?,
        ElementType::F64 => run_bench::<f64>(bench, &transformer, seed)?,
        ElementType::I32 => run_bench::<i32>(bench, &transformer, seed)?,
        ElementType::I64 => run_bench::<i64>(bench, &transformer, seed)?,
    };
    print_report(&report, bench.element_type);
    Ok(())
}

fn print_report(report: &BenchReport, element_type: ElementType) {
    let bytes = report.elements_per_sec * element_type.size_bytes() as f64;
    println!("{}", "\nBenchmark Results:".bold().green());
    println!("  {} {:.3} ms", "Best:".cyan(), report.best.as_secs_f64() * 1e3);
    println!("  {} {:.3} ms", "Mean:".cyan(), report.mean.as_secs_f64() * 1e3);
    println!(
        "  {} {:.2} Melem/s ({:.2} GB/s)",
        "Throughput:".cyan(),
        report.elements_per_sec / 1e6,
        bytes / 1e9
    );
    println!("  {} {:.2} Gop/s", "Butterflies:".cyan(), report.ops_per_sec / 1e9);
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = AppConfig::default();
    match output {
        Some(path) => {
            config.save(path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_transform() {
        let cli = Cli::try_parse_from([
            "fht", "-j", "2", "transform", "--dtype", "i32", "--axis", "columns", "--inverse",
        ])
        .unwrap();
        assert_eq!(cli.threads, Some(2));
        assert!(!cli.json_logs);
        match cli.command {
            Commands::Transform {
                dtype,
                axis,
                inverse,
                orthonormal,
                ..
            } => {
                assert_eq!(dtype, ElementType::I32);
                assert_eq!(axis, AxisArg::Columns);
                assert!(inverse);
                assert!(!orthonormal);
            }
            _ => panic!("expected transform subcommand"),
        }
    }

    #[test]
    fn test_numeric_axis_aliases() {
        let cases = [
            ("0", AxisArg::Columns),
            ("1", AxisArg::Rows),
            ("all", AxisArg::All),
        ];
        for (arg, expected) in cases {
            let cli = Cli::try_parse_from(["fht", "transform", "--axis", arg]).unwrap();
            match cli.command {
                Commands::Transform { axis, .. } => assert_eq!(axis, expected),
                _ => panic!("expected transform subcommand"),
            }
        }
        assert!(Cli::try_parse_from(["fht", "transform", "--axis", "2"]).is_err());
    }

    #[test]
    fn test_inverse_conflicts_with_orthonormal() {
        assert!(Cli::try_parse_from(["fht", "transform", "--inverse", "--orthonormal"]).is_err());
    }

    #[test]
    fn test_run_transform_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "1 0 0 0\n0 0 0 1\n")?;

        let options = TransformOptions {
            axis: AxisArg::Rows,
            scaling: Scaling::None,
        };
        run_transform(&AppConfig::default(), &input, &output, ElementType::I64, options)?;
        assert_eq!(std::fs::read_to_string(&output)?, "1 1 1 1\n1 -1 -1 1\n");
        Ok(())
    }

    #[test]
    fn test_write_default_config() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fht.toml");
        write_default_config(Some(&path))?;
        let loaded = load_config(Some(&path))?;
        assert_eq!(loaded, AppConfig::default());
        Ok(())
    }
}
