use anyhow::Context;

use bankbranch_branch::{Bank, BranchConfig, cli};

fn main() -> anyhow::Result<()> {
    bankbranch_observability::init();

    let config = BranchConfig::from_env().context("invalid branch configuration")?;
    tracing::info!(config = %serde_json::to_string(&config)?, "branch starting");

    let mut bank = Bank::new(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    cli::run(&mut bank, stdin.lock(), stdout.lock()).context("terminal I/O failed")?;

    tracing::info!(
        clients = bank.clients().len(),
        accounts = bank.accounts().len(),
        "branch closed"
    );
    Ok(())
}
