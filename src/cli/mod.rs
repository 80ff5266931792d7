//! FCTMS Workout CLI Module
//!
//! Command-line interface for serving, one-off predictions and artifact inspection.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::artifacts::{ArtifactPaths, ArtifactStore};
use crate::prediction::PredictionService;
use crate::schema::{FEATURE_NAMES, WORKOUT_LABEL};
use crate::server::{run_server, ServerConfig, ServerError};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_run(msg: &str) {
    eprint!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    eprintln!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "fctms-workout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Workout plan prediction API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Bind host [env: HOST, default 0.0.0.0]
        #[arg(long)]
        host: Option<String>,

        /// Bind port [env: PORT, default 5000]
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the artifact files [env: ARTIFACTS_DIR, default .]
        #[arg(short, long)]
        artifacts_dir: Option<PathBuf>,
    },

    /// Run a single prediction from a JSON request file
    Predict {
        /// Request JSON file, or - for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Directory holding the artifact files [env: ARTIFACTS_DIR, default .]
        #[arg(short, long)]
        artifacts_dir: Option<PathBuf>,
    },

    /// Show encoder vocabularies, classes and scaler parameters
    Inspect {
        /// Directory holding the artifact files [env: ARTIFACTS_DIR, default .]
        #[arg(short, long)]
        artifacts_dir: Option<PathBuf>,
    },
}

fn artifact_paths(dir: Option<&Path>) -> ArtifactPaths {
    match dir {
        Some(dir) => ArtifactPaths::from_dir(dir),
        None => ArtifactPaths::default(),
    }
}

fn load_store(dir: Option<&Path>) -> anyhow::Result<ArtifactStore> {
    let paths = artifact_paths(dir);
    step_run("Loading artifacts");
    let start = Instant::now();
    let store = ArtifactStore::load(&paths).context("Failed to load artifacts")?;
    step_done(&format!("{:.1?}", start.elapsed()));
    Ok(store)
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    artifacts_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let defaults = ServerConfig::default();
    let config = ServerConfig {
        host: host.unwrap_or(defaults.host),
        port: port.unwrap_or(defaults.port),
        artifacts: artifacts_dir.map(ArtifactPaths::from_dir).unwrap_or(defaults.artifacts),
    };

    section("FCTMS Workout API");
    println!("  {} {}", muted("Predict"), format!("http://{}:{}/predict", config.host, config.port).white());
    println!("  {} {}", muted("Health "), format!("http://{}:{}/", config.host, config.port).white());
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}

// ─── Predict ───────────────────────────────────────────────────────────────────

/// Prints exactly the body `POST /predict` would return
pub fn cmd_predict(input: &Path, artifacts_dir: Option<&Path>) -> anyhow::Result<()> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    let service = PredictionService::new(Arc::new(load_store(artifacts_dir)?));
    println!("{}", render_prediction(&service, &raw)?);
    Ok(())
}

/// JSON body for a raw request, identical to what `POST /predict` answers
pub fn render_prediction(service: &PredictionService, raw: &str) -> serde_json::Result<String> {
    let outcome = serde_json::from_str::<serde_json::Value>(raw)
        .map_err(ServerError::from)
        .and_then(|value| service.predict_value(&value).map_err(ServerError::from));

    match outcome {
        Ok(result) => serde_json::to_string(&result),
        Err(e) => serde_json::to_string(&serde_json::json!({ "error": e.to_string() })),
    }
}

// ─── Inspect ───────────────────────────────────────────────────────────────────

pub fn cmd_inspect(artifacts_dir: Option<&Path>) -> anyhow::Result<()> {
    let store = load_store(artifacts_dir)?;

    section("Encoders");
    for encoder in store.encoders().iter() {
        println!("  {}", encoder.field().white().bold());
        for (code, class) in encoder.classes().iter().enumerate() {
            println!("    {:>3}  {}", dim(&code.to_string()), class);
        }
    }

    section("Classifier");
    let classifier = store.classifier();
    println!("  {:<12} {}", muted("Trees"), classifier.n_trees());
    println!("  {:<12} {}", muted("Max depth"), classifier.max_depth());
    println!("  {:<12} {}", muted("Features"), classifier.n_features());
    let labels = store.encoder(WORKOUT_LABEL)?;
    for &code in classifier.classes() {
        println!("    {:>3}  {}", dim(&code.to_string()), labels.decode(code)?);
    }

    section("Scaler");
    let scaler = store.scaler();
    println!("  {:<32} {:>12} {:>12}", muted("Feature"), muted("Mean"), muted("Scale"));
    for ((name, mean), scale) in FEATURE_NAMES.iter().zip(scaler.mean()).zip(scaler.scale()) {
        println!("  {:<32} {:>12.4} {:>12.4}", name, mean, scale);
    }

    println!();
    Ok(())
}
