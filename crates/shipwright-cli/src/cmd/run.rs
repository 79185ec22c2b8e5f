use anyhow::Context;
use shipwright_core::clock::SystemClock;
use shipwright_core::config::Settings;
use shipwright_core::cycle::{CycleController, CycleDeps, CycleOutcome};
use shipwright_core::vcs::GitCli;
use shipwright_remote::{BoardClient, CompletionClient, ForgeClient};
use std::path::Path;

pub fn run(env_file: &Path, data_dir: Option<&Path>) -> anyhow::Result<()> {
    // Settings validation is the only work allowed before this point; a
    // missing key must abort before any network or disk-mutating operation.
    let mut settings = Settings::from_file(env_file).context("failed to load settings")?;
    if let Some(dir) = data_dir {
        settings.data_dir = dir.to_path_buf();
    }

    let generator = CompletionClient::new(
        &settings.completion_base_url,
        settings.completion_api_key.clone(),
    )?;
    let host = ForgeClient::new(&settings.forge_api_base, settings.forge_token.clone())?;
    let announcer = BoardClient::new(
        &settings.board_base_url,
        settings.board_api_key.clone(),
        &settings.board_channel,
    )?;
    let vcs = GitCli::discover()?;
    let clock = SystemClock;

    let controller = CycleController::new(&settings);
    let deps = CycleDeps {
        generator: &generator,
        host: &host,
        announcer: &announcer,
        vcs: &vcs,
        clock: &clock,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(controller.run(&deps))?;

    match outcome {
        CycleOutcome::AlreadyRan => println!("Cycle already ran today; nothing to do."),
        CycleOutcome::Completed { published, failed } => {
            println!("Cycle complete: {published} published, {failed} failed.")
        }
    }
    Ok(())
}
