use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use veil_core::{MaskError, MaskOptions, Masker, Pattern, Preset};

/// Mask a string for display or logging.
#[derive(Parser, Debug)]
#[command(
    name = "veil",
    author,
    version,
    about = "Mask part of a string, keeping chosen edges visible",
    disable_version_flag = true
)]
struct Cli {
    /// String to mask (read from standard input when omitted)
    input: Option<String>,

    /// Characters left visible at the start
    #[arg(short = 'p', long = "prefix")]
    prefix: Option<usize>,

    /// Characters left visible at the end
    #[arg(short = 's', long = "suffix")]
    suffix: Option<usize>,

    /// Mask character (1 to 10 characters)
    #[arg(short = 'c', long = "char")]
    mask_char: Option<String>,

    /// Mask every character
    #[arg(long)]
    full: bool,

    /// Mask the edges and show the middle
    #[arg(long)]
    reverse: bool,

    /// Percentage of characters to mask (0-100), centered
    #[arg(long)]
    percentage: Option<f64>,

    /// Named recipe: email, creditCard, phone
    #[arg(long, value_parser = parse_preset)]
    preset: Option<Preset>,

    /// Shape pattern: email, phone, generic, auto
    #[arg(long, value_parser = parse_pattern)]
    pattern: Option<Pattern>,

    /// Fill masked positions with random symbols
    #[arg(long)]
    random: bool,

    /// Leave input unchanged when fewer characters would be masked
    #[arg(long = "min-mask")]
    min_mask: Option<usize>,

    /// Longest input accepted
    #[arg(long = "max-length")]
    max_length: Option<usize>,

    /// Regex; matching characters in the masked middle stay visible
    #[arg(long = "preserve")]
    preserve: Option<String>,

    /// Fail when prefix/suffix do not fit the input
    #[arg(long)]
    strict: bool,

    /// Print a JSON report of how the input would be masked
    #[arg(long)]
    info: bool,

    /// JSON file with masking options (flags take precedence)
    #[arg(long = "options")]
    options_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "VEIL_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    s.parse().map_err(|e: MaskError| e.to_string())
}

fn parse_pattern(s: &str) -> Result<Pattern, String> {
    s.parse().map_err(|e: MaskError| e.to_string())
}

impl Cli {
    fn options(&self) -> Result<MaskOptions> {
        let mut options = match &self.options_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file: {:?}", path))?;
                let value: serde_json::Value = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse options file: {:?}", path))?;
                MaskOptions::from_json(&value)
                    .with_context(|| format!("Invalid options in {:?}", path))?
            }
            None => MaskOptions::default(),
        };

        if let Some(n) = self.prefix {
            options.prefix_length = n;
        }
        if let Some(n) = self.suffix {
            options.suffix_length = n;
        }
        if let Some(c) = &self.mask_char {
            options.mask_char = c.clone();
        }
        if let Some(p) = self.percentage {
            options.percentage = Some(p);
        }
        if let Some(preset) = self.preset {
            options.preset = Some(preset);
        }
        if let Some(pattern) = self.pattern {
            options.pattern = Some(pattern);
        }
        if let Some(n) = self.min_mask {
            options.min_mask_length = n;
        }
        if let Some(n) = self.max_length {
            options.max_length = n;
        }
        if let Some(source) = &self.preserve {
            options.preserve_pattern = Some(source.clone());
        }
        options.full_mask |= self.full;
        options.reverse_mask |= self.reverse;
        options.random_mask |= self.random;
        options.strict |= self.strict;
        // One-shot process
        options.cache = false;

        Ok(options)
    }

    fn input(&self) -> Result<String> {
        if let Some(input) = &self.input {
            return Ok(input.clone());
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read standard input")?;
        let trimmed = buf
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(&buf);
        Ok(trimmed.to_string())
    }
}

fn run(cli: &Cli) -> Result<String> {
    let options = cli.options()?;
    let input = cli.input()?;
    debug!(length = input.chars().count(), "read input");

    let masker = Masker::new();
    if cli.info {
        let report = masker.mask_info(input.as_str(), &options);
        return serde_json::to_string_pretty(&report).context("Failed to render mask info");
    }
    masker
        .obscure(input.as_str(), &options)
        .context("Masking failed")
}

/// Usage error that never quotes argv; the offending token may be the input.
/// Only the error kind and, for bad values, the flag name are shown.
fn usage_error(e: &clap::Error) -> String {
    let what = match e.kind() {
        ErrorKind::UnknownArgument => "unexpected argument",
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => "invalid value",
        ErrorKind::NoEquals => "flag requires a value",
        ErrorKind::TooManyValues | ErrorKind::TooFewValues | ErrorKind::WrongNumberOfValues => {
            "wrong number of values"
        }
        ErrorKind::ArgumentConflict => "conflicting arguments",
        ErrorKind::MissingRequiredArgument => "missing required argument",
        ErrorKind::InvalidUtf8 => "argument is not valid UTF-8",
        _ => "invalid arguments",
    };
    let flag = match (e.kind(), e.get(ContextKind::InvalidArg)) {
        (ErrorKind::InvalidValue | ErrorKind::ValueValidation, Some(ContextValue::String(flag))) => {
            format!(" for '{flag}'")
        }
        _ => String::new(),
    };
    format!(
        "error: {what}{flag}\n\n{}\n\nFor more information, try '--help'.",
        Cli::command().render_usage()
    )
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here too and are not failures
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", usage_error(&e));
            return ExitCode::from(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
