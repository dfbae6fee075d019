//! facevault: context custody CLI
//!
//! Commands:
//!   generate                 - generate a context, seal it, show the mnemonic once
//!   open <envelope>          - open a sealed envelope into a session (prompts for phrase)
//!   status --session <id>    - report whether a session has an opened context
//!   close --session <id>     - destroy a session's opened context
//!   export-public --session <id> - write the public-only context for the verifier

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use fv_core::config::FvConfig;
use fv_core::types::b64;
use fv_core::SessionId;
use fv_custody::CustodyManager;

#[derive(Parser, Debug)]
#[command(
    name = "facevault",
    version,
    about = "FaceVault context custody",
    long_about = "facevault: generate, seal, open, and close homomorphic-encryption contexts"
)]
struct Cli {
    /// Path to facevault.toml configuration file
    #[arg(
        long,
        short = 'c',
        env = "FV_CONFIG",
        default_value = "/etc/facevault/config.toml"
    )]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FV_LOG", default_value = "info")]
    log: String,

    /// Log format (json, text)
    #[arg(long, env = "FV_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a fresh context and seal it under a new recovery mnemonic
    ///
    /// The mnemonic is printed exactly once and never stored; losing it makes
    /// the sealed context unrecoverable.
    Generate {
        /// Where to write the sealed envelope
        #[arg(long, short = 'o', default_value = "context.envelope")]
        out: PathBuf,
    },

    /// Open a sealed envelope into session custody (prompts for the phrase)
    Open {
        /// Path to the sealed envelope
        envelope: PathBuf,
        /// Session id (a random one is created when omitted)
        #[arg(long, short = 's')]
        session: Option<String>,
    },

    /// Report whether a session has an opened context
    Status {
        #[arg(long, short = 's')]
        session: String,
    },

    /// Destroy a session's opened context (logout)
    Close {
        #[arg(long, short = 's')]
        session: String,
    },

    /// Write the public-only context (no secret key) for the verifier
    #[command(name = "export-public")]
    ExportPublic {
        #[arg(long, short = 's')]
        session: String,
        /// Where to write the public context blob
        #[arg(long, short = 'o', default_value = "context.public")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log, &cli.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "facevault starting"
    );

    let config = FvConfig::load(&cli.config)?;
    let manager = CustodyManager::new(&config);

    match cli.command {
        Commands::Generate { out } => {
            let generated = manager.generate()?;
            let (sealed, mnemonic) = manager.seal(&generated.context_bytes)?;

            std::fs::write(&out, &sealed.envelope)
                .with_context(|| format!("writing envelope to {}", out.display()))?;

            println!("context fingerprint : {}", generated.fingerprint);
            println!("sealed envelope     : {} ({} bytes)", out.display(), sealed.envelope.len());
            println!("envelope (base64)   : {}", b64::encode(&sealed.envelope));
            println!();
            println!("Recovery phrase, shown ONCE. Write it down now:");
            println!();
            println!("    {}", mnemonic.expose_phrase());
            println!();
            println!("Anyone with this phrase can decrypt the biometric key.");
        }

        Commands::Open { envelope, session } => {
            let session = match session {
                Some(raw) => SessionId::new(raw)?,
                None => SessionId::random(),
            };
            let envelope_bytes = std::fs::read(&envelope)
                .with_context(|| format!("reading envelope from {}", envelope.display()))?;

            let phrase = rpassword::prompt_password("Recovery phrase: ")
                .context("reading recovery phrase")?;

            manager.open(&session, &envelope_bytes, phrase.trim())?;
            println!("opened context for session {session}");
        }

        Commands::Status { session } => {
            let session = SessionId::new(session)?;
            if manager.is_open(&session) {
                println!("session {session}: context open");
            } else {
                println!("session {session}: no opened context");
            }
        }

        Commands::Close { session } => {
            let session = SessionId::new(session)?;
            manager.close(&session)?;
            println!("session {session}: custody closed");
        }

        Commands::ExportPublic { session, out } => {
            let session = SessionId::new(session)?;
            let public = manager.export_public(&session)?;
            std::fs::write(&out, &public)
                .with_context(|| format!("writing public context to {}", out.display()))?;
            println!("public context written to {} ({} bytes)", out.display(), public.len());
        }
    }

    Ok(())
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}
