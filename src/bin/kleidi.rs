use anyhow::Result;
use kleidi::cli::{actions, actions::Action, start, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;

    // Handle the action
    let result = match action {
        Action::Server { .. } => actions::server::handle(action).await,
    };

    telemetry::shutdown_tracer();

    result
}
