//! parley - connect to one IRC server and stay there.
//!
//! Usage: `parley [config.toml]`

use parley::config::{self, ClientConfig};
use parley::telemetry::{self, spans};
use parley::session::run;
use parley::{ConnectionEngine, SessionManager, TcpTransport};
use tracing::{Instrument, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = ClientConfig::load(&config_path).map_err(|e| {
        eprintln!("failed to load {config_path}: {e}");
        e
    })?;

    telemetry::init(&config.log)?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(path = %config_path, error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "{} configuration error(s) in {config_path}",
            errors.len()
        ));
    }

    let engine_config = config.engine_config();
    info!(
        host = %engine_config.server_host,
        port = engine_config.server_port,
        nick = %engine_config.nick,
        "Starting parley"
    );

    let span = spans::session(&engine_config.server_host, &engine_config.nick);
    let (transport, mut transport_events) = TcpTransport::new(config.limits.max_line_len);
    let engine = ConnectionEngine::new(engine_config, Box::new(transport));
    let mut session = SessionManager::new(engine).with_autojoin(&config.session.channels);

    session.directory_mut().subscribe(|event| {
        info!(channel = %event.channel, event = event.event.kind(), "Channel event");
    });

    session.connect()?;

    let outcome = tokio::select! {
        result = run(&mut session, &mut transport_events).instrument(span) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            Ok(())
        }
    };

    session.disconnect();
    outcome?;
    info!("Shutdown complete");
    Ok(())
}
