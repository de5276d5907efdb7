use std::process::{Command, Output};

/// Runs the bot binary with only `vars` set, from an empty directory so no `.env` is picked up.
fn run_bot(name: &str, vars: &[(&str, &str)]) -> Output {
    let dir = std::env::temp_dir().join("boardify-bot-tests").join(name);
    std::fs::create_dir_all(&dir).unwrap();

    Command::new(env!("CARGO_BIN_EXE_boardify-bot"))
        .env_clear()
        .envs(vars.iter().copied())
        .current_dir(&dir)
        .output()
        .unwrap()
}

#[test]
fn exits_with_failure_without_token() {
    let output = run_bot("no-token", &[("WEB_APP_URL", "https://boardify.example.com")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TELEGRAM_BOT_TOKEN"), "stderr: {stderr}");
}

#[test]
fn exits_with_failure_without_web_app_url() {
    let output = run_bot("no-url", &[("TELEGRAM_BOT_TOKEN", "123:abc")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WEB_APP_URL"), "stderr: {stderr}");
}

#[test]
fn exits_with_failure_on_insecure_url() {
    let output = run_bot(
        "http-url",
        &[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("WEB_APP_URL", "http://boardify.example.com"),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("https"), "stderr: {stderr}");
}
