use fleetops::{
    commands::{CommandRunner, Invocation, SystemCommandRunner},
    config::AppConfigBuilder,
    operation::{AnsibleExecutor, Command, RemoteExecutor, steps},
};

#[tokio::test]
async fn test_command_execution_with_long_output() {
    let runner = SystemCommandRunner::default();

    // Generate a command that produces a lot of output
    let invocation = Invocation::new("sh").args([
        "-c",
        "for i in $(seq 1 1000); do echo \"Line $i\"; done",
    ]);

    let output = runner.execute(&invocation).await.unwrap();

    // Should capture all output lines
    assert!(output.is_success());
    assert_eq!(output.stdout_str().lines().count(), 1000);
}

#[tokio::test]
async fn test_combined_output_keeps_both_streams() {
    let runner = SystemCommandRunner::default();
    let invocation = Invocation::new("sh").args(["-c", "echo out; echo err >&2; exit 4"]);

    let output = runner.execute(&invocation).await.unwrap();

    assert_eq!(output.exit_code(), 4);
    assert_eq!(output.combined_output(), "out\nerr\n");
}

#[tokio::test]
async fn test_ansible_executor_against_stand_in_backend() {
    // `echo` stands in for ansible, so the "output" is the argument vector itself
    let config = AppConfigBuilder::default()
        .backend("echo")
        .inventory("/srv/hosts.ini")
        .private_key("/keys/deploy")
        .build();
    let executor = AnsibleExecutor::new(SystemCommandRunner::default(), &config);
    let action = steps::build(Command::Status, &config).unwrap().remove(0);

    let result = executor
        .execute(&action, config.credentials())
        .await
        .unwrap();

    assert!(result.succeeded());
    assert_eq!(
        result.output(),
        "webservers -i /srv/hosts.ini -m command -a systemctl status rantoo --no-pager \
         -u deploy --private-key /keys/deploy\n"
    );
}

#[tokio::test]
async fn test_ansible_executor_reports_backend_failure() {
    let config = AppConfigBuilder::default().backend("false").build();
    let executor = AnsibleExecutor::new(SystemCommandRunner::default(), &config);
    let action = steps::build(Command::Health, &config).unwrap().remove(0);

    let result = executor
        .execute(&action, config.credentials())
        .await
        .unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.exit_code(), 1);
}

#[tokio::test]
async fn test_ansible_executor_missing_backend_is_an_error() {
    let config = AppConfigBuilder::default()
        .backend("fleetops-no-such-backend")
        .build();
    let executor = AnsibleExecutor::new(SystemCommandRunner::default(), &config);
    let action = steps::build(Command::Status, &config).unwrap().remove(0);

    let result = executor.execute(&action, config.credentials()).await;

    assert!(result.is_err());
}
