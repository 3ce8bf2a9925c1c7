// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterwerk — command-line front end.
//
// Entry point. Initialises logging, loads the engine config and the filter
// pipeline, then filters one image file into another.
//
//   rasterwerk <input> <output> <pipeline> [config.json]
//
// `<pipeline>` is either the compact form (`grayscale,blur:2,glitch:0.3`) or
// `@path/to/pipeline.json`.

use std::path::PathBuf;
use std::process::ExitCode;

use rasterwerk_core::error::Result;
use rasterwerk_core::EngineConfig;
use rasterwerk_filter::{FilterPipeline, PixelFilterEngine, surface};

const USAGE: &str = "usage: rasterwerk <input> <output> <pipeline> [config.json]";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    output: PathBuf,
    pipeline: PipelineSource,
    config: Option<PathBuf>,
}

/// Where the pipeline comes from.
#[derive(Debug, PartialEq)]
enum PipelineSource {
    Inline(String),
    JsonFile(PathBuf),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "filtering failed");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Option<Args> {
    let mut args = args.into_iter();
    let input = PathBuf::from(args.next()?);
    let output = PathBuf::from(args.next()?);
    let pipeline = match args.next()? {
        p if p.starts_with('@') => PipelineSource::JsonFile(PathBuf::from(&p[1..])),
        p => PipelineSource::Inline(p),
    };
    let config = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return None;
    }
    Some(Args {
        input,
        output,
        pipeline,
        config,
    })
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = PixelFilterEngine::new(config);

    let pipeline = match &args.pipeline {
        PipelineSource::Inline(text) => FilterPipeline::parse(text, &engine)?,
        PipelineSource::JsonFile(path) => FilterPipeline::load(path)?,
    };
    tracing::info!(pipeline = %pipeline, "pipeline ready");

    let source = surface::open(&args.input)?;
    let filtered = pipeline.apply(&engine, &source)?;
    surface::save(&filtered, &args.output)?;

    tracing::info!(output = %args.output.display(), "done");
    Ok(())
}
