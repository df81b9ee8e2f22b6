use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;

use maskara::{Mask, MaskOptions, ProcessResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mask pattern, e.g. `000.000.000-00` or `#.##0,00`
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Values to mask; read one per line from stdin when omitted
    #[arg(value_name = "VALUE")]
    values: Vec<String>,

    /// Consume pattern and value right-to-left
    #[arg(short = 'r', long)]
    reverse: bool,

    /// Fill exhausted required tokens with their defaults
    #[arg(short = 'd', long, conflicts_with = "no_defaults")]
    defaults: bool,

    /// Never fill defaults, even in reverse mode
    #[arg(short = 'D', long)]
    no_defaults: bool,

    /// Print the validity of each value next to its result
    #[arg(short = 's', long)]
    status: bool,

    /// Exit with status 1 if any value is invalid
    #[arg(short = 'c', long)]
    check: bool,
}

impl Args {
    fn options(&self) -> MaskOptions {
        let options = if self.reverse {
            MaskOptions::reverse()
        } else {
            MaskOptions::forward()
        };
        match (self.defaults, self.no_defaults) {
            (true, _) => options.with_defaults(true),
            (_, true) => options.with_defaults(false),
            _ => options,
        }
    }
}

fn read_values(args: &Args) -> Result<Vec<String>> {
    if !args.values.is_empty() {
        return Ok(args.values.clone());
    }
    io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to read values from stdin")
}

fn render(processed: &ProcessResult, status: bool) -> String {
    if status {
        let flag = if processed.valid { "valid" } else { "invalid" };
        format!("{}\t{}", processed.result, flag)
    } else {
        processed.result.clone()
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mask = Mask::new(&args.pattern, args.options());

    let processed = read_values(&args)?
        .iter()
        .map(|value| mask.process(value.as_str()))
        .collect_vec();

    if !processed.is_empty() {
        let mut stdout = io::stdout().lock();
        writeln!(
            stdout,
            "{}",
            processed.iter().map(|p| render(p, args.status)).join("\n")
        )
        .context("Failed to write results")?;
    }

    let failed = args.check && processed.iter().any(|p| !p.valid);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("maskara").chain(argv.iter().copied()))
    }

    #[test]
    fn reverse_flag_enables_defaults() {
        let options = args(&["-r", "#0"]).options();
        assert!(options.reverse);
        assert_eq!(options.use_defaults, None);
    }

    #[test]
    fn explicit_default_flags() {
        assert_eq!(args(&["-d", "0"]).options().use_defaults, Some(true));
        assert_eq!(args(&["-r", "-D", "0"]).options().use_defaults, Some(false));
    }

    #[test]
    fn conflicting_default_flags_are_rejected() {
        let argv = ["maskara", "-d", "-D", "0"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn values_from_arguments() {
        let a = args(&["000", "123", "45"]);
        assert_eq!(a.pattern, "000");
        assert_eq!(read_values(&a).unwrap(), vec!["123", "45"]);
    }

    #[test]
    fn render_with_status() {
        let mask = Mask::new("00-00", MaskOptions::forward());
        assert_eq!(render(&mask.process("1234"), true), "12-34\tvalid");
        assert_eq!(render(&mask.process("12a4"), true), "12-\tinvalid");
        assert_eq!(render(&mask.process("1234"), false), "12-34");
    }
}
