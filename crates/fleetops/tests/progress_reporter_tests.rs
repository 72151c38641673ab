use fleetops::progress_reporter::{port::ProgressReporter, terminal::TerminalProgressReporter};

#[test]
fn test_terminal_reporter_formatting() {
    // Test with colors enabled
    let reporter = TerminalProgressReporter::new(true);

    let success_msg = reporter.format_success("Deployment finished");
    let error_msg = reporter.format_error("Step 1/2 failed");
    let warning_msg = reporter.format_warning("Ignoring extra arguments");
    let info_msg = reporter.format_info("Found `ansible`");

    assert!(success_msg.contains("Deployment finished"));
    assert!(error_msg.contains("Step 1/2 failed"));
    assert!(warning_msg.contains("Ignoring extra arguments"));
    assert!(info_msg.contains("Found `ansible`"));

    // Prefix indicators should be present, as emoji or their plain-text fallback
    assert!(success_msg.contains("✅") || success_msg.contains("OK"));
    assert!(error_msg.contains("❌") || error_msg.contains("[E]"));
    assert!(warning_msg.contains("⚠️") || warning_msg.contains("[W]"));
    assert!(info_msg.contains("ℹ️") || info_msg.contains("[I]"));
}

#[test]
fn test_terminal_reporter_without_colors() {
    let reporter = TerminalProgressReporter::new(false);

    let success_msg = reporter.format_success("Deployment finished");
    let progress_msg = reporter.format_progress("[1/2] Testing connection...");

    // Message should be plain text without ANSI color codes
    assert!(!success_msg.contains("\x1b["));
    assert!(!progress_msg.contains("\x1b["));
    assert!(progress_msg.ends_with("[1/2] Testing connection..."));
}
