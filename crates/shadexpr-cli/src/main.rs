#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod logging;
mod report;

use clap::Parser;
use miette::{miette, IntoDiagnostic, LabeledSpan, Result};
use shadexpr_parser::{ParseError, ParserOptions, Printer, Style};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "shadexpr")]
#[command(author, version, about = "Parse shader expressions and print the tree", long_about = None)]
struct Cli {
    /// Expressions to parse. Read one per line from stdin when omitted.
    expressions: Vec<String>,

    /// Read expressions from a file, one per line
    #[arg(short, long, value_name = "PATH", conflicts_with = "expressions")]
    file: Option<PathBuf>,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit one JSON report per expression on stdout, and JSON logs on stderr
    #[arg(long)]
    json: bool,

    /// How to print a successfully parsed tree
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Maximum nesting depth before parsing gives up
    #[arg(long, value_name = "N", default_value_t = 256, env = "SHADEXPR_MAX_DEPTH")]
    max_depth: usize,

    /// Accept trees with empty child slots
    #[arg(long)]
    no_validate: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Indented tree with source ranges
    Tree,
    /// Prefix S-expression
    Sexpr,
    /// Fully parenthesized infix
    Source,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    let options = ParserOptions {
        max_depth: cli.max_depth,
        validate: !cli.no_validate,
    };

    let sources = match (&cli.file, cli.expressions.is_empty()) {
        (Some(path), _) => split_lines(&std::fs::read_to_string(path).into_diagnostic()?),
        (None, true) => split_lines(&std::io::read_to_string(std::io::stdin()).into_diagnostic()?),
        (None, false) => cli.expressions.clone(),
    };
    debug!(count = sources.len(), ?options, "parsing expressions");

    let mut failed = 0usize;
    for source in &sources {
        if !run_one(source, &options, cli.format, cli.json)? {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(miette!(
            "{failed} of {} expression(s) failed to parse",
            sources.len()
        ));
    }
    Ok(())
}

/// Non-empty, trimmed lines.
fn split_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Parse and print one expression. Returns whether it parsed cleanly.
fn run_one(source: &str, options: &ParserOptions, format: Format, json: bool) -> Result<bool> {
    let mut parser = shadexpr_parser::Parser::with_options(source.as_bytes(), options.clone());
    let root = parser.parse();

    if json {
        let report = report::ParseReport::new(source, &parser);
        println!("{}", serde_json::to_string(&report).into_diagnostic()?);
        return Ok(report.ok);
    }

    match (parser.error(), root) {
        (Some(error), _) => {
            eprintln!("{:?}", diagnostic(source, error));
            Ok(false)
        }
        (None, Some(root)) => {
            let rendered = match format {
                Format::Tree => report::tree(parser.arena(), root),
                Format::Sexpr => Printer::new(Style::SExpr).print(parser.arena(), root),
                Format::Source => Printer::new(Style::Source).print(parser.arena(), root),
            };
            println!("{}", rendered.trim_end());
            Ok(true)
        }
        // The parser records an error whenever it produces no root.
        (None, None) => Ok(false),
    }
}

/// A labelled report over the expression text.
fn diagnostic(source: &str, error: &ParseError) -> miette::Report {
    let label = LabeledSpan::at(error.span().range(), "here");
    miette!(labels = vec![label], "{error}").with_source_code(source.to_string())
}
