use assert_cmd::Command;
use predicates::prelude::*;

fn phatic() -> Command {
    Command::cargo_bin("phatic").expect("phatic binary is built for tests")
}

#[test]
fn one_shot_reply() {
    phatic()
        .args(["Я", "хочу", "спати"])
        .assert()
        .success()
        .stdout("Деталізуйте, що саме Ви хочете?\n");
}

#[test]
fn one_shot_literal_is_case_insensitive() {
    phatic().arg("НІ").assert().success().stdout("Будь ласка, не будьте так небагатослівні...\n");
}

#[test]
fn interactive_loop_until_eof() {
    phatic()
        .write_stdin("так\nмій комп'ютер\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Бот: Будь ласка, не будьте так небагатослівні..."))
        .stdout(predicate::str::contains("Бот: Машини Вас лякають."));
}

#[test]
fn interactive_quit_command() {
    phatic()
        .write_stdin("/quit\nтак\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Бот:").not());
}

#[test]
fn explain_report_goes_to_stderr() {
    phatic()
        .args(["--explain", "--no-color", "Мене", "бентежить", "шум"])
        .assert()
        .success()
        .stdout("Як давно Вас бентежить шум?\n")
        .stderr(predicate::str::contains("tier: wildcard"))
        .stderr(predicate::str::contains("b=\"шум\""));
}

#[test]
fn custom_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.toml");
    std::fs::write(&path, "default_reply = \"Pardon?\"\n[[rules]]\npattern = \"hi\"\nresponse = \"hello\"\n").unwrap();

    phatic().arg("--catalog").arg(&path).arg("Hi").assert().success().stdout("hello\n");
    phatic().arg("--catalog").arg(&path).arg("what").assert().success().stdout("Pardon?\n");
}

#[test]
fn missing_catalog_fails() {
    phatic()
        .args(["--catalog", "/definitely/not/here.toml", "hi"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to load catalog"));
}

#[test]
fn version_flag() {
    phatic().arg("--version").assert().success().stdout(predicate::str::contains("phatic"));
}
