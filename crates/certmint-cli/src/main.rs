// SPDX-License-Identifier: MIT
//
// certmint — Operator CLI.
//
// Entry point. Initialises logging, opens the artifact store, and drives the
// certificate pipeline from the command line.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use certmint_core::types::CertificateRequest;
use certmint_core::AppConfig;
use certmint_service::CertificateService;

#[derive(Debug, Parser)]
#[command(name = "certmint", version, about = "Issue and retrieve verifiable completion certificates")]
struct Cli {
    /// Directory holding durable certificate resources.
    #[arg(long, default_value = "certificates")]
    artifact_root: PathBuf,

    /// Base URL for verification and download links.
    #[arg(long, default_value = "https://certs.example.com")]
    base_url: String,

    /// Logo composited onto QR codes (best-effort).
    #[arg(long, default_value = "assets/logo.png")]
    logo: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Issue a new certificate and print the receipt as JSON.
    Issue {
        #[arg(long)]
        participant: String,
        #[arg(long)]
        course: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        completed_on: NaiveDate,
        #[arg(long)]
        issuer: String,
    },
    /// Print the stored metadata record for a certificate id.
    Show { id: String },
    /// Write one artifact to a file.
    Export {
        id: String,
        /// Artifact format: pdf or png.
        #[arg(long, default_value = "pdf")]
        format: String,
        /// Output path; defaults to {id}.{format} in the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("certmint starting");

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> certmint_core::Result<()> {
    let config = AppConfig {
        base_url: cli.base_url,
        artifact_root: cli.artifact_root,
        logo_path: cli.logo,
        qr_size: 300,
    };
    let service = CertificateService::new(config)?;

    match cli.command {
        Command::Issue {
            participant,
            course,
            completed_on,
            issuer,
        } => {
            let receipt = service.generate(&CertificateRequest {
                participant_name: participant,
                course_name: course,
                completion_date: Some(completed_on),
                issuer_name: issuer,
            })?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Command::Show { id } => {
            let metadata = service.metadata(&id)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Command::Export { id, format, out } => {
            let (bytes, _mime) = service.artifact(&id, &format)?;
            let out =
                out.unwrap_or_else(|| PathBuf::from(format!("{id}.{}", format.to_lowercase())));
            std::fs::write(&out, &bytes)?;
            println!("wrote {} ({} bytes)", out.display(), bytes.len());
        }
    }
    Ok(())
}
