use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, info};
use mock_service::bridge::MockService;
use mock_service::profile::MockProfile;
use pulsecore::scan::Resolution;
use pulsecore::service::ImagePayload;
use report::render::{draw_progress, report_text};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use workflow::config::DriverConfig;
use workflow::runner::Runner;

mod mock_service;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "ProofPulse image-forensics client")]
struct Args {
    /// Load service settings from YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Base URL of the analysis service (overrides config and PROOFPULSE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an image and print the forensic report
    Analyze {
        #[arg(long)]
        image: PathBuf,
        /// Print the normalized report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Send a feedback message to the team
    Feedback {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// Serve a local stand-in for the analysis and feedback services
    MockService {
        #[arg(long, default_value_t = 8000)]
        port: u16,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Answer every analysis with this HTTP status
        #[arg(long)]
        fail_status: Option<u16>,
        /// Reply with text/plain instead of JSON
        #[arg(long, default_value_t = false)]
        plain_text: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    }
    .resolve(args.api_url.clone());

    match args.command {
        Command::Analyze { image, json } => analyze(config, image, json).await,
        Command::Feedback { name, message } => {
            let runner = Runner::new(config);
            runner
                .send_feedback(&name, &message)
                .await
                .context("sending feedback")?;
            println!("Feedback sent. Thank you!");
            Ok(())
        }
        Command::MockService {
            port,
            seed,
            fail_status,
            plain_text,
        } => {
            let service = MockService::new(MockProfile {
                seed,
                fail_status,
                plain_text,
                ..Default::default()
            });
            let (addr, server) = service.bind(SocketAddr::from(([127, 0, 0, 1], port)))?;
            println!("Mock analysis service on http://{} (Ctrl+C to stop)", addr);
            tokio::select! {
                _ = server => {}
                result = signal::ctrl_c() => {
                    result.context("awaiting Ctrl+C to exit")?;
                }
            }
            info!("mock service stopped");
            Ok(())
        }
    }
}

async fn analyze(config: DriverConfig, image: PathBuf, json: bool) -> anyhow::Result<()> {
    let payload = ImagePayload::load(&image).await?;
    let runner = Runner::new(config);

    let mut stderr = std::io::stderr();
    let outcome = runner
        .analyze(payload, |state| {
            if let Err(err) = draw_progress(&mut stderr, state) {
                debug!("progress line not drawn: {}", err);
            }
        })
        .await?;
    eprintln!();
    info!("scan finished after {} frames", outcome.frames);

    match outcome.resolution {
        Resolution::Report => {
            if let Some(report) = &outcome.report {
                if json {
                    println!("{}", serde_json::to_string_pretty(report)?);
                } else {
                    print!("{}", report_text(report));
                }
            }
            Ok(())
        }
        Resolution::Text => {
            println!("{}", outcome.raw_body.unwrap_or_default());
            Ok(())
        }
        Resolution::Failed | Resolution::Stale => {
            let message = outcome
                .error
                .unwrap_or_else(|| "Something went wrong".to_string());
            anyhow::bail!("analysis failed: {}", message)
        }
    }
}
