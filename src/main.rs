mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use vh_app::App;
use vh_core::shipment::ContainerSize;
use vh_core::vanning::SelectionMode;
use vh_terminal::bootstrap::tracing::init_tracing_subscriber;
use vh_terminal::bootstrap::{load_config, wire_dependencies};

#[derive(Parser)]
#[command(name = "vanning-handy")]
#[command(about = "Vanning and collation handy terminal", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full round: send results, then receive plans and collation targets
    Sync,
    /// Send registered containers only
    SendShipments,
    /// Send completed collations only
    SendCollations,
    /// Select bundles from scanner input (one tag per line on stdin)
    Scan {
        #[arg(long, value_enum, default_value_t = Mode::Normal)]
        mode: Mode,
        #[arg(long, value_enum, default_value_t = Size::Ft20)]
        size: Size,
        #[command(flatten)]
        weights: WeightArgs,
    },
    /// Register the selected bundles as one container and send it
    RegisterContainer {
        /// Owner code, 3 letters
        #[arg(long)]
        owner: String,
        /// Serial number, 6 digits
        #[arg(long)]
        serial: String,
        #[arg(long, default_value = "")]
        seal: String,
        #[arg(long)]
        booking: Option<String>,
        #[arg(long, value_enum, default_value_t = Size::Ft20)]
        size: Size,
        #[command(flatten)]
        weights: WeightArgs,
        /// JPEG of the loaded container
        #[arg(long)]
        container_photo: Option<PathBuf>,
        /// JPEG of the seal
        #[arg(long)]
        seal_photo: Option<PathBuf>,
    },
    /// Collate a container from scanner input; lists targets without --no
    Collate {
        /// 1-based number from the target list
        #[arg(long)]
        no: Option<usize>,
    },
    /// Plan totals, last download and pending work
    Progress,
    /// Recent web service calls
    History {
        #[arg(short, long, default_value_t = vh_app::usecases::DEFAULT_HISTORY_LIMIT)]
        limit: i64,
    },
    /// Ask the back office for its clock
    ServerTime,
    /// ISO 6346 check digit of an owner code and serial
    CheckDigit { value: String },
    /// Show terminal settings, or replace them from a JSON file
    Settings {
        #[arg(long)]
        import: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Normal,
    JyuryoCalc,
}

impl From<Mode> for SelectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => SelectionMode::Normal,
            Mode::JyuryoCalc => SelectionMode::JyuryoCalc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Size {
    #[value(name = "20")]
    Ft20,
    #[value(name = "40")]
    Ft40,
}

impl From<Size> for ContainerSize {
    fn from(size: Size) -> Self {
        match size {
            Size::Ft20 => ContainerSize::Ft20,
            Size::Ft40 => ContainerSize::Ft40,
        }
    }
}

/// Overrides of the weights pre-filled from the system row.
#[derive(Args, Clone, Copy, Default)]
struct WeightArgs {
    #[arg(long)]
    container_kg: Option<i32>,
    #[arg(long)]
    dunnage_kg: Option<i32>,
    #[arg(long)]
    max_kg: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::CheckDigit { value } = &cli.command {
        return commands::check_digit(value);
    }

    let config = load_config(cli.config.as_deref())?;
    init_tracing_subscriber(&config.log)?;
    let app = App::new(wire_dependencies(&config).await?);

    match cli.command {
        Commands::Sync => commands::sync(&app).await,
        Commands::SendShipments => commands::send_shipments(&app).await,
        Commands::SendCollations => commands::send_collations(&app).await,
        Commands::Scan {
            mode,
            size,
            weights,
        } => commands::scan(&app, mode.into(), size.into(), weights).await,
        Commands::RegisterContainer {
            owner,
            serial,
            seal,
            booking,
            size,
            weights,
            container_photo,
            seal_photo,
        } => {
            let form = commands::RegistrationForm {
                owner,
                serial,
                seal,
                booking,
                size: size.into(),
                weights,
                container_photo,
                seal_photo,
            };
            commands::register_container(&app, form).await
        }
        Commands::Collate { no } => commands::collate(&app, no).await,
        Commands::Progress => commands::progress(&app).await,
        Commands::History { limit } => commands::history(&app, limit).await,
        Commands::ServerTime => commands::server_time(&app).await,
        Commands::CheckDigit { value } => commands::check_digit(&value),
        Commands::Settings { import } => commands::settings(&app, import.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registration_arguments() {
        let cli = Cli::try_parse_from([
            "vanning-handy",
            "register-container",
            "--owner",
            "CSQ",
            "--serial",
            "305438",
            "--size",
            "40",
            "--dunnage-kg",
            "120",
        ])
        .unwrap();

        let Commands::RegisterContainer { size, weights, seal, .. } = cli.command else {
            panic!("expected register-container");
        };
        assert_eq!(ContainerSize::from(size), ContainerSize::Ft40);
        assert_eq!(weights.dunnage_kg, Some(120));
        assert_eq!(weights.container_kg, None);
        assert_eq!(seal, "");
    }

    #[test]
    fn scan_defaults_to_normal_twenty_foot() {
        let cli = Cli::try_parse_from(["vanning-handy", "scan", "-c", "/etc/vanning.toml"]).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/etc/vanning.toml")));
        let Commands::Scan { mode, size, .. } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(SelectionMode::from(mode), SelectionMode::Normal);
        assert_eq!(ContainerSize::from(size), ContainerSize::Ft20);
    }

    #[test]
    fn unknown_size_is_rejected() {
        assert!(Cli::try_parse_from(["vanning-handy", "scan", "--size", "45"]).is_err());
    }
}
