use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use co2lex::{LexerOptions, LexicalError, Token};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::{info, warn};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, Write};

const VERSION: &'static str = env!("CARGO_PKG_VERSION");

pub struct Config {
    pub source_path: String,

    /// Preprocessing applied to the source before scanning.
    pub options: LexerOptions,

    /// What to do with the token stream.
    pub target: Target,

    /// Write `check` errors to the output writer as `Debug` lines rather than as colored
    /// diagnostics on stderr. Only set programmatically.
    pub plaintext_errors: bool,
}

pub enum Target {
    /// Print every token.
    Tokens(Format),

    /// Report unrecognized input.
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `Token.<Kind>` and the quoted text, one token per line.
    Raw,

    /// Byte range, short class name and the quoted text, one token per line.
    Spans,
}

impl Format {
    fn from_name(name: &str) -> Result<Format, CliError> {
        match name {
            "raw" => Ok(Format::Raw),
            "spans" => Ok(Format::Spans),
            _ => Err(CliError::UnknownFormat(name.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    Arguments(clap::Error),
    InvalidTabSize(String),
    UnknownFormat(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Arguments(error) => write!(f, "{}", error),
            CliError::InvalidTabSize(value) => write!(f, "invalid tab size: {:?}", value),
            CliError::UnknownFormat(name) => write!(f, "unknown output format: {:?}", name),
        }
    }
}

impl std::error::Error for CliError {}

impl Config {
    /// Builds the configuration from the process command line, exiting on `--help` and
    /// `--version`.
    pub fn new() -> Result<Config, CliError> {
        let matches = app().get_matches();
        Config::from_matches(&matches)
    }

    /// Builds the configuration from explicit arguments, the first one being the binary name.
    pub fn from_args<I, T>(args: I) -> Result<Config, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(CliError::Arguments)?;
        Config::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Config, CliError> {
        let config_from_leaf_matches = |matches: &ArgMatches, target| -> Result<Config, CliError> {
            let tab_size = match matches.value_of("tab-size") {
                Some(value) => Some(
                    value
                        .parse()
                        .map_err(|_| CliError::InvalidTabSize(value.to_string()))?,
                ),
                None => None,
            };

            Ok(Config {
                source_path: matches.value_of("FILE").unwrap_or_default().to_string(),
                options: LexerOptions {
                    strip_newlines: matches.is_present("strip-newlines"),
                    strip_all: matches.is_present("strip-all"),
                    ensure_newline: matches.is_present("ensure-newline"),
                    tab_size,
                },
                target,
                plaintext_errors: false,
            })
        };

        match matches.subcommand() {
            ("tokens", Some(matches)) => {
                let format = Format::from_name(matches.value_of("format").unwrap_or("raw"))?;
                config_from_leaf_matches(matches, Target::Tokens(format))
            }
            ("check", Some(matches)) => config_from_leaf_matches(matches, Target::Check),
            _ => unreachable!(),
        }
    }
}

fn app() -> App<'static, 'static> {
    let file = || {
        Arg::with_name("FILE")
            .help("Path to the CO2 source file")
            .required(true)
            .index(1)
    };

    App::new("co2lex")
        .version(VERSION)
        .about("Tokenizer for CO2 sources")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("strip-newlines")
                .long("strip-newlines")
                .help("Strip leading and trailing newlines from the source")
                .global(true),
        )
        .arg(
            Arg::with_name("strip-all")
                .long("strip-all")
                .help("Strip leading and trailing whitespace from the source")
                .global(true),
        )
        .arg(
            Arg::with_name("ensure-newline")
                .long("ensure-newline")
                .help("Append a newline to the source if it lacks one")
                .global(true),
        )
        .arg(
            Arg::with_name("tab-size")
                .long("tab-size")
                .takes_value(true)
                .value_name("N")
                .help("Expand tabs to N columns before scanning")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("tokens")
                .about("Prints the token stream")
                .arg(file())
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .takes_value(true)
                        .possible_values(&["raw", "spans"])
                        .help("Output format"),
                ),
        )
        .subcommand(
            SubCommand::with_name("check")
                .about("Reports characters no token can start with")
                .arg(file()),
        )
}

#[derive(Debug, PartialEq)]
pub enum RunResult {
    Ok,
    LexicalError,
    IoError,
}

/// Runs the configured target, printing to stdout.
pub fn run(config: Config) -> RunResult {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Runs the configured target, printing tokens and plaintext errors to `out`.
pub fn run_with_output(config: Config, out: &mut impl Write) -> RunResult {
    let source_code = match fs::read_to_string(&config.source_path) {
        Ok(source_code) => source_code,
        Err(error) => {
            eprintln!("Error while reading the source file:\n{}", error);
            return RunResult::IoError;
        }
    };

    if !co2lex::matches_filename(&config.source_path) {
        warn!(
            "{} does not look like a CO2 source file (expected one of {:?})",
            config.source_path,
            co2lex::FILENAMES
        );
    }

    let source_code = config.options.prepare(&source_code);
    let tokens = co2lex::tokenize(&source_code);

    match config.target {
        Target::Tokens(format) => {
            let mut count = 0;
            for token in tokens {
                if let Err(error) = write_token(out, &token, format) {
                    eprintln!("Error while writing tokens:\n{}", error);
                    return RunResult::IoError;
                }
                count += 1;
            }
            info!("{}: {} tokens", config.source_path, count);
            RunResult::Ok
        }
        Target::Check => {
            let errors = co2lex::lexical_errors(&source_code, tokens);
            if errors.is_empty() {
                return match writeln!(out, "Ok!") {
                    Ok(()) => RunResult::Ok,
                    Err(_) => RunResult::IoError,
                };
            }

            let reported = if config.plaintext_errors {
                errors
                    .iter()
                    .try_for_each(|error| writeln!(out, "{:?}", error))
            } else {
                report_lexical_errors(&config.source_path, &source_code, &errors);
                Ok(())
            };
            match reported {
                Ok(()) => RunResult::LexicalError,
                Err(_) => RunResult::IoError,
            }
        }
    }
}

fn write_token(out: &mut impl Write, token: &Token, format: Format) -> io::Result<()> {
    match format {
        Format::Raw => writeln!(out, "Token.{}\t{:?}", token.kind, token.text),
        Format::Spans => {
            let class = match token.kind.short_name() {
                "" => "-",
                class => class,
            };
            writeln!(
                out,
                "{}..{}\t{}\t{:?}",
                token.span.start, token.span.end, class, token.text
            )
        }
    }
}

fn report_lexical_errors(file_name: &str, source_code: &str, errors: &[LexicalError]) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(file_name, source_code);

    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();

    for error in errors {
        let emitted = codespan_reporting::term::emit(
            &mut writer.lock(),
            &config,
            &files,
            &error.to_codespan(file_id),
        );
        if let Err(error) = emitted {
            eprintln!("Error while reporting diagnostics:\n{}", error);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, Config, Format, Target};

    #[test]
    fn parses_tokens_subcommand() {
        let config =
            Config::from_args(vec!["co2lex", "tokens", "--format", "spans", "a.co2"]).unwrap();
        assert_eq!(config.source_path, "a.co2");
        assert!(matches!(config.target, Target::Tokens(Format::Spans)));
        assert_eq!(config.options, co2lex::LexerOptions::default());
    }

    #[test]
    fn parses_global_options() {
        let config = Config::from_args(vec![
            "co2lex",
            "check",
            "--ensure-newline",
            "--strip-all",
            "--tab-size",
            "4",
            "a.co2",
        ])
        .unwrap();
        assert!(matches!(config.target, Target::Check));
        assert!(config.options.ensure_newline);
        assert!(config.options.strip_all);
        assert!(!config.options.strip_newlines);
        assert_eq!(config.options.tab_size, Some(4));
    }

    #[test]
    fn rejects_bad_tab_size() {
        let result = Config::from_args(vec!["co2lex", "check", "--tab-size", "wide", "a.co2"]);
        assert!(matches!(result, Err(CliError::InvalidTabSize(_))));
    }

    #[test]
    fn requires_a_subcommand() {
        let result = Config::from_args(vec!["co2lex"]);
        assert!(matches!(result, Err(CliError::Arguments(_))));
    }
}
