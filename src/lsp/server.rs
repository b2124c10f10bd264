use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::Config;
use crate::lsp::backend::Backend;

/// Start the LSP server
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;

    // Logging goes to stderr; stdout carries LSP traffic
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.clone()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    // If running under the integration test, exit after a short delay so the
    // test can read stdout to EOF.
    if std::env::var("FPRETTIFY_LS_TEST_EXIT").as_deref() == Ok("1") {
        std::thread::spawn(|| {
            std::thread::sleep(std::time::Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let (service, socket) = LspService::build(move |client| Backend::new(client, config)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
