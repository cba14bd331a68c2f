//! `walk` entrypoint: lexes, parses, and lowers a turtle-walk script into a
//! CFG, then dispatches to whichever of `--cfg-dump` / `--analyze` / `--svg`
//! the caller asked for.

use anyhow::{Context, Result};
use clap::Parser;
use core_ast::{pretty_print, Annotations, AstContext, Lexer, Node, Parser as WalkParser};
use core_cfg::{to_dot, Cfg};
use core_diag::{Diagnostic, DiagnosticSink};
use core_eval::{create_random_walk, render_svg};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;

/// A miniature static-analysis laboratory for 2D turtle-walk programs.
#[derive(Parser, Debug)]
#[command(name = "walk", version, about = "Turtle-walk dataflow laboratory")]
struct Args {
    /// Path to the turtle-walk script to process.
    script: PathBuf,

    /// Print the program's control-flow graph as Graphviz DOT.
    #[arg(long = "cfg-dump")]
    cfg_dump: bool,

    /// Render concrete random-walk traces (and any selected analysis's
    /// covered area) as an SVG overlay.
    #[arg(long = "svg")]
    svg: bool,

    /// When rendering SVG, omit the connecting segments/arcs and draw only
    /// the per-step dots.
    #[arg(long = "dots-only")]
    dots_only: bool,

    /// Number of concrete random walks to trace when rendering SVG.
    #[arg(long = "executions", default_value_t = 1)]
    executions: u32,

    /// How many times more likely a loop back edge is to be taken than a
    /// sibling forward edge, when tracing concrete random walks.
    #[arg(long = "loopiness", default_value_t = 1)]
    loopiness: u32,

    /// Run the named dataflow analysis and pretty-print the program
    /// annotated with its results. See `--help` for the set of known names.
    #[arg(long = "analyze")]
    analyze: Option<String>,
}

/// CLI-boundary errors distinct from the generic I/O failures `anyhow`
/// wraps — an unknown `--analyze` name is the one fatal condition not
/// already carried by a [`DiagnosticSink`] return of `None`.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown analysis '{0}' (see --help for the list of known analyses)")]
    UnknownAnalysis(String),
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("walk.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "walk.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

/// Lexes and parses `source`, reporting every diagnostic to `sink`. Returns
/// `None` (after the sink has been populated) on any lexical or syntactic
/// error.
fn build_cfg(source: &str, sink: &mut DiagnosticSink) -> Option<(AstContext, Node, Cfg)> {
    let tokens = Lexer::new(source).lex_all(sink)?;
    let mut parser = WalkParser::new(tokens);
    let root = parser.parse(sink)?;
    let ctx = parser.into_context();
    let cfg = Cfg::build(&ctx, root);
    Some((ctx, root, cfg))
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script '{}'", args.script.display()))?;

    let mut sink = DiagnosticSink::new();
    let started = Instant::now();
    let Some((ctx, root, cfg)) = build_cfg(&source, &mut sink) else {
        sink.write_all(std::io::stderr())?;
        return Ok(ExitCode::FAILURE);
    };
    tracing::info!(
        target: "cli.pipeline",
        blocks = cfg.blocks().len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "cfg_built"
    );

    let mut printed_anything = false;

    if args.cfg_dump {
        println!("{}", to_dot(&ctx, &cfg));
        printed_anything = true;
    }

    let mut covered_area = Vec::new();

    if let Some(name) = args.analyze.as_deref() {
        let span = tracing::info_span!(target: "cli.pipeline", "solve", analysis = name);
        let _enter = span.enter();
        match core_analyses::get_analysis_results(name, &ctx, &cfg) {
            None => {
                sink.push(Diagnostic::plain(0, CliError::UnknownAnalysis(name.to_string()).to_string()));
                sink.write_all(std::io::stderr())?;
                return Ok(ExitCode::FAILURE);
            }
            Some(output) => {
                if !output.converged {
                    eprintln!("warning: analysis '{name}' did not converge within the node-visit budget");
                } else {
                    println!("{}", pretty_print(&ctx, root, &output.annotations));
                    printed_anything = true;
                }
                covered_area = output.covered_area;
            }
        }
    }

    if args.svg {
        let mut rng = rand::thread_rng();
        let walks: Vec<_> = (0..args.executions.max(1))
            .map(|_| create_random_walk(&ctx, &cfg, args.loopiness, &mut rng))
            .collect();
        println!("{}", render_svg(&walks, &covered_area, args.dots_only, &mut rng));
        printed_anything = true;
    }

    if !printed_anything {
        println!("{}", pretty_print(&ctx, root, &Annotations::new()));
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let _guard = configure_logging();
    run()
}
