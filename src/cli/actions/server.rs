use crate::api;
use crate::api::handlers::auth::AuthConfig;
use crate::cli::actions::Action;
use anyhow::Result;

/// Validated server configuration produced by dispatch.
#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub frontend_base_url: String,
    pub session_ttl_seconds: i64,
}

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => {
            let auth_config = AuthConfig::new(args.frontend_base_url)
                .with_session_ttl_seconds(args.session_ttl_seconds);

            api::new(args.port, args.dsn, auth_config).await?;
        }
    }

    Ok(())
}
