mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use thumbgen_gcode::{parse_block, BlockSummary};
use thumbgen_ops::init_tracing;
use thumbgen_orchestrator::{Pipeline, PipelineReport};
use thumbgen_types::config::ThumbgenConfig;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref());
    init_tracing(&config.ops)?;

    match cli.command {
        Command::Render {
            input,
            output,
            overrides,
        } => {
            overrides.apply(&mut config);
            let pipeline = Pipeline::from_config(&config)?;
            let report = pipeline.generate(&input, &output, config.thumbnail.size()?)?;
            print_report(&report, cli.json)?;
        }
        Command::Inject {
            input,
            gcode,
            overrides,
        } => {
            overrides.apply(&mut config);
            let pipeline = Pipeline::from_config(&config)?;
            let report = pipeline.inject(&input, &gcode, config.thumbnail.size()?)?;
            print_report(&report, cli.json)?;
        }
        Command::Verify { file } => {
            let summary = verify_file(&file)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", describe_summary(&file, &summary));
            }
        }
    }
    Ok(())
}

fn verify_file(path: &Path) -> Result<BlockSummary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_block(&text)?.verify()?)
}

fn describe_summary(path: &Path, summary: &BlockSummary) -> String {
    format!(
        "{}: {}*{} thumbnail, {} jpeg bytes in {} lines of {} characters",
        path.display(),
        summary.width,
        summary.height,
        summary.jpeg_len,
        summary.body_lines,
        summary.chunk_size
    )
}

fn print_report(report: &PipelineReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> ThumbgenConfig {
    let Some(path) = path else {
        return ThumbgenConfig::default();
    };
    match ThumbgenConfig::from_file(path) {
        Ok(cfg) => {
            if let Err(err) = cfg.validate() {
                eprintln!(
                    "Invalid config in '{}': {err}. Falling back to internal defaults.",
                    path.display()
                );
                ThumbgenConfig::default()
            } else {
                cfg
            }
        }
        Err(err) => {
            eprintln!(
                "Failed to load config from '{}': {err}. Falling back to internal defaults.",
                path.display()
            );
            ThumbgenConfig::default()
        }
    }
}
