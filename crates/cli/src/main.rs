mod render;

use std::io::{self, BufRead};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdlang_config::{DecoderConfig, MatchRule, load_config};
use cmdlang_core::grammar::dump::{to_pretty_json, tokens_to_pretty_json};
use cmdlang_core::{AssemblyError, BuiltinCommand, Decoder, builtin_table, parse_tokens, tokenize};
use cmdlang_diagnostics as diag;
use tracing_subscriber::EnvFilter;

use crate::render::{Format, render_diagnostics};

/// Name shown in rendered diagnostics for the command line being checked.
const SOURCE_NAME: &str = "<input>";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cmdlang",
    version,
    about = "cmdlang: tokenize, parse, and decode command lines like `edit 2 +friend /name:\"Ann\"`"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Path to a decoder configuration JSON file.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Match imperatives against keywords exactly instead of by prefix.
    #[arg(long, global = true)]
    exact: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Pipeline stages (progressive: tokens → ast → parse → decode) ──
    /// Print the token stream of a command line.
    Tokens {
        /// The command line. Read from stdin when omitted or `-`.
        line: Option<String>,
    },

    /// Print the syntax tree of a command line.
    Ast {
        /// The command line. Read from stdin when omitted or `-`.
        line: Option<String>,
    },

    /// Print the bare command extracted from a command line.
    Parse {
        /// The command line. Read from stdin when omitted or `-`.
        line: Option<String>,
    },

    /// Resolve a command line against the built-in commands and print the result.
    Decode {
        /// The command line. Read from stdin when omitted or `-`.
        line: Option<String>,
    },

    // ── Reference / informational ───────────────────────────────────
    /// List built-in keywords, optionally only those a prefix would match.
    Bindings { prefix: Option<String> },

    /// Explain a diagnostic ID (e.g. CMD2001).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{out:#}");
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, format: Format) -> Result<()> {
    match cli.cmd {
        Cmd::Tokens { line } => cmd_tokens(&read_line(line)?, format),
        Cmd::Ast { line } => cmd_ast(&read_line(line)?, format),
        Cmd::Parse { line } => cmd_parse(&read_line(line)?, format),
        Cmd::Decode { line } => {
            let config = resolve_config(cli.config.as_deref(), cli.exact)?;
            cmd_decode(&read_line(line)?, config, format)
        }
        Cmd::Bindings { prefix } => {
            let config = resolve_config(cli.config.as_deref(), cli.exact)?;
            cmd_bindings(prefix.as_deref(), config, format)
        }
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_tokens(line: &str, format: Format) -> Result<()> {
    let tokens = tokenize(line).map_err(AssemblyError::from);
    let tokens = exit_on_error(line, tokens, format);

    match format {
        Format::Json => println!("{}", tokens_to_pretty_json(&tokens)),
        Format::Pretty => {
            for t in tokens.tokens() {
                println!(
                    "{:<9} {:<16} {}..{}",
                    t.kind.to_string(),
                    format!("{:?}", t.literal),
                    t.span.start,
                    t.span.end
                );
            }
        }
    }
    Ok(())
}

fn cmd_ast(line: &str, format: Format) -> Result<()> {
    let tokens = tokenize(line).map_err(AssemblyError::from);
    let tokens = exit_on_error(line, tokens, format);
    let tree = parse_tokens(&tokens).map_err(AssemblyError::from);
    let tree = exit_on_error(line, tree, format);

    println!("{}", to_pretty_json(&tree));
    Ok(())
}

fn cmd_parse(line: &str, format: Format) -> Result<()> {
    let bare = exit_on_error(line, cmdlang_core::parse(line), format);
    println!("{}", serde_json::to_string_pretty(&bare)?);
    Ok(())
}

fn cmd_decode(line: &str, config: DecoderConfig, format: Format) -> Result<()> {
    let decoder: Decoder<BuiltinCommand> = Decoder::with_config(builtin_table(), config);
    let command = cmdlang_core::parse(line).and_then(|bare| decoder.decode(&bare));
    let command = exit_on_error(line, command, format);
    println!("{}", serde_json::to_string_pretty(&command)?);
    Ok(())
}

fn cmd_bindings(prefix: Option<&str>, config: DecoderConfig, format: Format) -> Result<()> {
    let decoder: Decoder<BuiltinCommand> = Decoder::with_config(builtin_table(), config);
    let keywords: Vec<&str> = match prefix {
        Some(p) => decoder.candidates(p),
        None => decoder.table().keywords().collect(),
    };

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "prefix": prefix,
                "match_rule": decoder.config().match_rule,
                "keywords": keywords,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for k in &keywords {
                println!("{k}");
            }
            if keywords.is_empty()
                && let Some(p) = prefix
            {
                eprintln!("no built-in command matches `{p}`");
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let text = diag::explain(id);
            let out = serde_json::json!({
                "id": id,
                "explanation": text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output: write to stdout, not stderr.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Unwrap a pipeline result, or render its diagnostic and exit with code 1.
fn exit_on_error<T>(line: &str, result: Result<T, AssemblyError>, format: Format) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(code = err.code(), kind = ?err.kind(), "assembly failed");
            render_diagnostics(line, SOURCE_NAME, &[err.to_diagnostic()], format);
            process::exit(1);
        }
    }
}

/// The command line from the positional argument, or one line of stdin when
/// it is absent or `-`. The trailing line ending is stripped.
fn read_line(arg: Option<String>) -> Result<String> {
    match arg {
        Some(line) if line != "-" => Ok(line),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .lock()
                .read_line(&mut buf)
                .context("failed to read command line from stdin")?;
            let trimmed = buf.trim_end_matches(['\n', '\r']).len();
            buf.truncate(trimmed);
            Ok(buf)
        }
    }
}

/// Resolve the decoder configuration from (in priority order):
///   1. `--exact`, which overrides the match rule
///   2. Explicit `--config` path
///   3. [`DecoderConfig::default`]
fn resolve_config(path: Option<&str>, exact: bool) -> Result<DecoderConfig> {
    let mut config = match path {
        Some(p) => load_config(p).with_context(|| format!("failed to load config '{p}'"))?,
        None => DecoderConfig::default(),
    };
    if exact {
        config.match_rule = MatchRule::Exact;
    }
    tracing::debug!(
        match_rule = %config.match_rule,
        prefer_exact = config.prefer_exact,
        "decoder config"
    );
    Ok(config)
}
