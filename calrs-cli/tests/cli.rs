use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use rstest::*;
use tempfile::TempDir;

#[fixture]
fn workdir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("events.tsv"),
        "# id start end\n0\t0\t100\n1\t101\t200\n2\t0\t2000\n3\t101\t200\n",
    )
    .unwrap();
    fs::write(dir.path().join("invalid.tsv"), "0 0 100\n1 300 200\n").unwrap();
    dir
}

fn calrs() -> Command {
    Command::cargo_bin("calrs").unwrap()
}

#[rstest]
#[case("exhaustive")]
#[case("sweep")]
#[case("partition")]
#[case("bucket")]
fn test_overlaps_every_algorithm(workdir: TempDir, #[case] algorithm: &str) {
    calrs()
        .current_dir(workdir.path())
        .args(["overlaps", "-i", "events.tsv", "-a", algorithm, "-b", "7"])
        .assert()
        .success()
        .stdout("0\t2\n1\t2\n1\t3\n2\t3\n");
}

#[rstest]
fn test_overlaps_json_from_config(workdir: TempDir) {
    fs::write(
        workdir.path().join("calrs.toml"),
        "algorithm = \"sweep\"\nformat = \"json\"\n",
    )
    .unwrap();

    calrs()
        .current_dir(workdir.path())
        .args(["overlaps", "-i", "events.tsv", "--config", "calrs.toml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"first_id\":0,\"second_id\":2}"));
}

#[rstest]
fn test_overlaps_reads_stdin(workdir: TempDir) {
    calrs()
        .current_dir(workdir.path())
        .args(["overlaps", "-i", "-"])
        .write_stdin("0 0 100\n1 100 200\n")
        .assert()
        .success()
        .stdout("0\t1\n");
}

#[rstest]
fn test_overlaps_rejects_invalid_event(workdir: TempDir) {
    calrs()
        .current_dir(workdir.path())
        .args(["overlaps", "-i", "invalid.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event 1"));
}

#[rstest]
fn test_overlaps_rejects_zero_bucket_size(workdir: TempDir) {
    calrs()
        .current_dir(workdir.path())
        .args(["overlaps", "-i", "events.tsv", "-a", "bucket", "-b", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid bucket size"));
}

#[rstest]
fn test_generate_then_compare(workdir: TempDir) {
    calrs()
        .current_dir(workdir.path())
        .args(["generate", "-n", "300", "--max", "1000", "--seed", "111", "-o", "random.tsv"])
        .assert()
        .success();

    let generated = fs::read_to_string(workdir.path().join("random.tsv")).unwrap();
    assert_eq!(generated.lines().count(), 300);

    calrs()
        .current_dir(workdir.path())
        .args(["compare", "-i", "random.tsv", "-b", "13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MISMATCH").not())
        .stdout(predicate::str::contains("partition"));
}
