use fleetops::{
    commands::SystemCommandRunner,
    config::AppConfig,
    fs::FileSystem,
    operation::{AnsibleExecutor, Dispatcher},
    progress_reporter::terminal::TerminalProgressReporter,
};
use tracing::debug;

use crate::cli::ClapCli;

/// Primary command dispatcher: wires the real adapters together and runs the command
pub(crate) async fn dispatch_command<F: FileSystem>(
    args: &ClapCli,
    config: &AppConfig,
    fs: &F,
) -> i32 {
    debug!("Dispatching command: {:?}", args.command);

    let runner = SystemCommandRunner::default();
    let executor = AnsibleExecutor::new(runner.clone(), config);
    let reporter = TerminalProgressReporter::new(config.use_colors());

    Dispatcher::new(config, &executor, &runner, fs, &reporter)
        .dispatch(args.command.as_deref(), &args.args)
        .await
}
