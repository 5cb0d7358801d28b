use crate::cli::args::{Args, ClientArgs, Command, ConfigArgs, ConfigCommand, ServerArgs};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::console::Console;
use crate::core::session::{EndReason, SessionOutcome};
use crate::domain::config::{ClientConfig, LinkConfig, ServerConfig};
use crate::domain::error::{LinkError, LinkResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::tcp::{self, Connection, LineServer};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

/// Execute CLI command
pub async fn execute_command(args: Args) -> LinkResult<()> {
    let writer = ConsoleWriter::new(args.output);

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };

    if !args.quiet {
        init_logging(&config.global.log_level, args.verbose)?;
    }

    match args.command {
        Command::Server(server_args) => {
            let mut config = config;
            apply_server_overrides(&mut config.server, &server_args);
            config.validate()?;
            run_server(&config.server).await
        }
        Command::Client(client_args) => {
            let mut config = config;
            apply_client_overrides(&mut config.client, &client_args);
            config.validate()?;
            run_client(&config.client).await
        }
        Command::Config(config_args) => {
            execute_config_command(config_args, &writer, &config, &config_manager)
        }
        Command::Version => {
            writer.write_message(&format!("linetalk {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

/// CLI flags win over whatever the configuration files said
pub fn apply_server_overrides(config: &mut ServerConfig, args: &ServerArgs) {
    if let Some(bind) = &args.bind {
        config.host = bind.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
}

pub fn apply_client_overrides(config: &mut ClientConfig, args: &ClientArgs) {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(timeout) = args.timeout {
        config.connect_timeout_ms = Some(timeout.saturating_mul(1000));
    }
}

async fn run_server(config: &ServerConfig) -> LinkResult<()> {
    let server = LineServer::bind(config).await?;
    let connection = server.accept().await?;
    drive_session(connection, &mut Console::stdio()).await?;
    Ok(())
}

async fn run_client(config: &ClientConfig) -> LinkResult<()> {
    let connection = tcp::connect(config).await?;
    drive_session(connection, &mut Console::stdio()).await?;
    Ok(())
}

/// Run the console loop over `connection` until quit, error or Ctrl-C.
/// The connection is dropped, and the socket closed, before this returns.
pub async fn drive_session<I, O>(
    connection: Connection,
    console: &mut Console<I, O>,
) -> LinkResult<SessionOutcome>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let peer = connection.peer_addr();
    let mut session = connection.into_session();

    let finished = tokio::select! {
        result = session.run(console) => Some(result?),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            None
        }
    };
    let outcome = finished.unwrap_or_else(|| SessionOutcome {
        reason: EndReason::Interrupted,
        stats: session.stats().clone(),
    });

    info!(
        "Closing connection to {} ({}): {} bytes sent, {} bytes received",
        peer, outcome.reason, outcome.stats.bytes_sent, outcome.stats.bytes_received
    );
    Ok(outcome)
}

fn execute_config_command(
    args: ConfigArgs,
    writer: &ConsoleWriter,
    config: &LinkConfig,
    config_manager: &ConfigManager,
) -> LinkResult<()> {
    match args.command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let result = match &file {
                Some(config_path) => config_manager
                    .load_config_from_path(config_path.as_ref())
                    .and_then(|c| c.validate()),
                None => config.validate(),
            };
            // main reports the failure
            result?;
            let name = file.as_deref().unwrap_or("Current configuration");
            writer.write_message(&format!("{} is valid", name))?;
            Ok(())
        }
        ConfigCommand::Init { output, global } => {
            let path = if global {
                config_manager.init_global_config()?
            } else if let Some(output_path) = output {
                config_manager.init_project_config(output_path.as_ref())?
            } else {
                let current_dir = std::env::current_dir().map_err(|e| LinkError::Config {
                    message: format!("Failed to get current directory: {}", e),
                })?;
                config_manager.init_project_config(&current_dir)?
            };
            writer.write_message(&format!("Configuration initialized at '{}'", path.display()))?;
            Ok(())
        }
    }
}
