// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Server Binary
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Minimal tool server: loads the catalogs (fatally, before serving
//! anything), then answers newline-delimited JSON tool requests on stdin
//! with one JSON response per line on stdout. Heavier wire protocols
//! belong to an outer process.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use corrosion_data::catalog;
use corrosion_tools::dispatch::{dispatch, ErrorEnvelope, ToolRequest, ToolResponse, TOOL_NAMES};
use corrosion_types::config::EngineConfig;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Corrosion rate prediction tool server
#[derive(Parser)]
#[command(name = "corrosion-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SCPN corrosion prediction engine", long_about = None)]
struct Cli {
    /// Tabulated-data directory (overrides CORROSION_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the tool list and exit
    #[arg(long)]
    list_tools: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.list_tools {
        for name in TOOL_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| EngineConfig::from_env().data_dir);

    // Catalog load is all-or-nothing; a partial catalog must not serve.
    let catalogs = match catalog::global(&data_dir) {
        Ok(set) => set,
        Err(e) => {
            error!("catalog load failed: {e}");
            std::process::exit(1);
        }
    };
    info!(
        data_dir = %data_dir.display(),
        materials = catalogs.materials.len(),
        "corrosion-server ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<ToolRequest>(&line) {
            Ok(request) => dispatch(catalogs, request),
            Err(e) => {
                error!("unparseable request: {e}");
                ToolResponse {
                    ok: false,
                    result: None,
                    error: Some(ErrorEnvelope {
                        kind: "input_validation".into(),
                        message: format!("unparseable request line: {e}"),
                    }),
                }
            }
        };
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &response)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }
    Ok(())
}
