//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use healthdesk::config::AppConfig;
use healthdesk::output::OutputMode;

/// healthdesk - Doctor verification and patient health summaries
#[derive(Parser, Debug)]
#[command(
    name = "healthdesk",
    version,
    about = "Doctor verification workflow and patient health summaries",
    long_about = "Serve the healthdesk API and administer doctor verification.\n\n\
                  Doctors register with three credential documents and stay pending\n\
                  until an administrator verifies or rejects them."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to $HEALTHDESK_CONFIG or ~/.config/healthdesk/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep all data in memory
        #[arg(long)]
        in_memory: bool,
    },

    /// Show a doctor's verification status
    Status {
        /// Doctor email
        email: String,
    },

    /// Verify or reject a doctor profile
    Review {
        /// Doctor email
        email: String,

        /// Decision: verified (or approved), rejected
        #[arg(short, long, default_value = "verified")]
        status: String,

        /// Notes shown to the doctor
        #[arg(short, long)]
        notes: Option<String>,

        /// Apply the same decision to every credential
        #[arg(long)]
        credentials: bool,
    },

    /// Verify or reject a single credential
    ReviewCredential {
        /// Credential ID
        id: String,

        /// Decision: verified (or approved), rejected
        #[arg(short, long, default_value = "verified")]
        status: String,

        /// Notes shown to the doctor
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List verified doctors
    Doctors {
        /// Filter by name, email or specialization
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create an administrator account
    AddAdmin {
        /// Login email
        email: String,

        /// Display name
        #[arg(long, default_value = "Administrator")]
        name: String,

        /// Password
        #[arg(long, env = "HEALTHDESK_ADMIN_PASSWORD")]
        password: String,
    },

    /// Show the effective configuration
    Config {
        /// Write the configuration file with defaults
        #[arg(long)]
        init: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)?;

    match cli.command {
        Some(Command::Serve {
            host,
            port,
            in_memory,
        }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.storage.in_memory |= in_memory;
            commands::serve(&config)
        },
        Some(Command::Status { email }) => commands::status(&config, &email, output_mode),
        Some(Command::Review {
            email,
            status,
            notes,
            credentials,
        }) => commands::review(&config, &email, &status, notes, credentials, output_mode),
        Some(Command::ReviewCredential { id, status, notes }) => {
            commands::review_credential(&config, &id, &status, notes, output_mode)
        },
        Some(Command::Doctors { search }) => {
            commands::doctors(&config, search.as_deref(), output_mode)
        },
        Some(Command::AddAdmin {
            email,
            name,
            password,
        }) => commands::add_admin(&config, &email, &name, &password, output_mode),
        Some(Command::Config { init }) => commands::config(&config, &config_path, init, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": healthdesk::VERSION
                    })
                );
            } else {
                println!("healthdesk v{}", healthdesk::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": healthdesk::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("healthdesk v{}", healthdesk::VERSION);
                println!("\nRun 'healthdesk --help' for usage");
                println!("Run 'healthdesk serve' to start the server");
            }
            Ok(())
        },
    }
}
