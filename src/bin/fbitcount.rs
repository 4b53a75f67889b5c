// fbitcount: time population count strategies over a large unaligned buffer
//
// Reads MEGS MiB of random data (or a file), shifts the buffer start by one
// byte so chunk reads are unaligned, then times every strategy serially and,
// on multi-core machines, partitioned across worker threads.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use bitcount_rs::bench::{BenchConfig, DEFAULT_MEGS, MIB, Progress, time_run};
use bitcount_rs::common::io::{InputBuffer, read_file, read_random};
use bitcount_rs::common::{io_error_msg, reset_sigpipe};
use bitcount_rs::kernel::native;
use bitcount_rs::strategy::Strategy;
use bitcount_rs::{BitcountError, threads};

const TOOL_NAME: &str = "fbitcount";

#[derive(Parser)]
#[command(
    name = "fbitcount",
    version,
    about = "Time population count strategies over a large unaligned buffer"
)]
struct Cli {
    /// Megabytes of random data to count
    #[arg(value_name = "MEGS", default_value_t = DEFAULT_MEGS)]
    megs: usize,

    /// Worker threads for parallel runs (default: all available)
    #[arg(short = 't', long = "threads", value_name = "N")]
    threads: Option<usize>,

    /// Strategy to run; repeat to run several (default: all)
    #[arg(short = 's', long = "strategy", value_name = "NAME")]
    strategies: Vec<String>,

    /// Override the number of timed iterations per strategy
    #[arg(short = 'n', long = "iterations", value_name = "N")]
    iterations: Option<usize>,

    /// Keep the buffer start aligned (skip the one-byte shift)
    #[arg(long = "aligned")]
    aligned: bool,

    /// Count the bits of FILE instead of random data
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<(BenchConfig, Option<PathBuf>), BitcountError> {
        let strategies = if self.strategies.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            self.strategies
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<Strategy>, _>>()?
        };
        let config = BenchConfig {
            megs: self.megs,
            threads: self.threads,
            offset: if self.aligned { 0 } else { 1 },
            strategies,
            iterations: self.iterations,
        };
        config.validate()?;
        Ok((config, self.input))
    }
}

/// Warning for buffers too small to time meaningfully.
fn small_input_note(len: usize) -> Option<&'static str> {
    (len < MIB).then_some("input smaller than 1 MiB; timings will be noisy")
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        match e.downcast_ref::<BitcountError>() {
            Some(BitcountError::Io(io_err)) => {
                eprintln!("{}: {}: {}", TOOL_NAME, e, io_error_msg(io_err))
            }
            _ => eprintln!("{}: {:#}", TOOL_NAME, e),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, input) = cli.into_config()?;

    if let Some(n) = config.threads {
        threads::configure_global_pool(n)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let data: InputBuffer = match &input {
        Some(path) => {
            writeln!(out, "Using {}", path.display())?;
            read_file(path)
                .map_err(BitcountError::from)
                .with_context(|| format!("cannot read '{}'", path.display()))?
        }
        None => {
            writeln!(out, "Using {} megs of data", config.megs)?;
            write!(out, "Reading input... ")?;
            out.flush()?;
            let len = config.buffer_len()?;
            let buf = read_random(len)
                .map_err(BitcountError::from)
                .context("cannot read random data")?;
            writeln!(out, "done.")?;
            InputBuffer::Owned(buf)
        }
    };

    // Shifted start: chunk windows no longer sit on word-aligned addresses.
    let offset = config.offset.min(data.len());
    let buffer = &data[offset..];

    let parallelism = threads::available_parallelism();
    writeln!(
        out,
        "{} bytes, {} execution units, hardware kernel: {}",
        buffer.len(),
        parallelism,
        native::selected_name()
    )?;
    if let Some(note) = small_input_note(buffer.len()) {
        eprintln!("{}: {}", TOOL_NAME, note);
    }

    for run in config.runs(parallelism) {
        writeln!(out)?;
        write!(out, "{}", run.description())?;
        out.flush()?;

        let mut write_err = None;
        let timing = time_run(&run, buffer, |event| {
            let res = match event {
                Progress::FirstCount(bits) => write!(out, " ({} bits are set) ", bits),
                Progress::Tick => write!(out, "."),
            };
            if let Err(e) = res.and_then(|_| out.flush()) {
                write_err.get_or_insert(e);
            }
        });
        if let Some(e) = write_err {
            return Err(e.into());
        }

        writeln!(out)?;
        writeln!(out, "{} seconds per iteration", timing.seconds_per_iteration())?;
        if !timing.consistent {
            anyhow::bail!("{}: inconsistent bit counts across iterations", run.description());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fbitcount").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let (cfg, input) = parse(&[]).into_config().unwrap();
        assert_eq!(cfg.megs, DEFAULT_MEGS);
        assert_eq!(cfg.offset, 1);
        assert_eq!(cfg.strategies, Strategy::ALL.to_vec());
        assert!(input.is_none());
    }

    #[test]
    fn test_strategy_selection() {
        let (cfg, _) = parse(&["-s", "popcnt", "--strategy", "table", "8"])
            .into_config()
            .unwrap();
        assert_eq!(cfg.strategies, vec![Strategy::Hardware, Strategy::Table]);
        assert_eq!(cfg.megs, 8);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = parse(&["-s", "sse"]).into_config().err().unwrap();
        assert!(matches!(err, BitcountError::UnknownStrategy(_)));
    }

    #[test]
    fn test_zero_megs_rejected() {
        assert!(parse(&["0"]).into_config().is_err());
    }

    #[test]
    fn test_small_input_note() {
        assert!(small_input_note(0).is_some());
        assert!(small_input_note(MIB - 1).is_some());
        assert!(small_input_note(MIB).is_none());
    }

    #[test]
    fn test_aligned_flag() {
        let (cfg, _) = parse(&["--aligned", "-t", "2", "-n", "3"]).into_config().unwrap();
        assert_eq!(cfg.offset, 0);
        assert_eq!(cfg.threads, Some(2));
        assert_eq!(cfg.iterations, Some(3));
    }
}
