use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn veil() -> Command {
    let mut cmd = Command::cargo_bin("veil").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("VEIL_LOG_LEVEL");
    cmd
}

#[test]
fn test_masks_positional_input() {
    veil()
        .arg("mysecretkey")
        .assert()
        .success()
        .stdout("mys*****key\n");
}

#[test]
fn test_reads_standard_input() {
    veil()
        .write_stdin("mysecretkey\n")
        .assert()
        .success()
        .stdout("mys*****key\n");
}

#[test]
fn test_frame_and_char_flags() {
    veil()
        .args(["-p", "2", "-s", "4", "-c", "#", "john.doe@example.com"])
        .assert()
        .success()
        .stdout(format!("jo{}.com\n", "#".repeat(14)));
}

#[test]
fn test_preset_flag() {
    veil()
        .args(["--preset", "creditCard", "4111 1111 1111 1111"])
        .assert()
        .success()
        .stdout("************1111\n");
}

#[test]
fn test_percentage_and_full_flags() {
    veil()
        .args(["--percentage", "50", "1234567890"])
        .assert()
        .success()
        .stdout("12*****890\n");
    veil()
        .args(["--full", "secret"])
        .assert()
        .success()
        .stdout("******\n");
}

#[test]
fn test_info_prints_json() {
    veil()
        .args(["--info", "short"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"willBeMasked\": false"));
}

#[test]
fn test_validation_error_exits_one_without_leaking() {
    veil()
        .args(["--max-length", "4", "hunter2secret"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("exceeds maximum"))
        .stderr(predicate::str::contains("hunter2secret").not());
}

#[test]
fn test_unknown_preset_is_usage_error() {
    veil()
        .args(["--preset", "iban", "hunter2secret"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value for '--preset"))
        .stderr(predicate::str::contains("iban").not())
        .stderr(predicate::str::contains("hunter2secret").not());
}

#[test]
fn test_dash_prefixed_input_not_echoed() {
    veil()
        .arg("--token=abc123secret")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("unexpected argument"))
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("--token").not())
        .stderr(predicate::str::contains("abc123secret").not());
}

#[test]
fn test_unquoted_multi_word_input_not_echoed() {
    veil()
        .args(["my", "secretvalue"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unexpected argument"))
        .stderr(predicate::str::contains("secretvalue").not());
}

#[test]
fn test_reverse_flag() {
    veil()
        .args(["--reverse", "mysecretkey"])
        .assert()
        .success()
        .stdout("***ecret***\n");
}

#[test]
fn test_random_flag() {
    veil()
        .args(["--random", "mysecretkey"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^mys[*#@$%&!?]{5}key\n$").unwrap());
}

#[test]
fn test_pattern_flag() {
    veil()
        .args(["--pattern", "phone", "555-123-4567"])
        .assert()
        .success()
        .stdout("******4567\n");
}

#[test]
fn test_min_mask_flag() {
    // five would be masked, six are required
    veil()
        .args(["--min-mask", "6", "mysecretkey"])
        .assert()
        .success()
        .stdout("mysecretkey\n");
}

#[test]
fn test_preserve_flag() {
    veil()
        .args(["-p", "0", "-s", "4", "--preserve", "[- ]", "4111-1111-1111-1111"])
        .assert()
        .success()
        .stdout("****-****-****-1111\n");
}

#[test]
fn test_strict_flag() {
    veil()
        .args(["--strict", "short"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds input length"));
}

#[test]
fn test_options_file_with_flag_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r##"{{ "maskChar": "#", "prefixLength": 1 }}"##).unwrap();
    veil()
        .arg("--options")
        .arg(file.path())
        .args(["-s", "1", "abcdef"])
        .assert()
        .success()
        .stdout("a####f\n");
}

#[test]
fn test_help_and_version_exit_zero() {
    veil()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prefix"));
    veil()
        .arg("-h")
        .assert()
        .success();
    veil()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    veil()
        .arg("--version")
        .assert()
        .success();
}
