use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_invalid() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("foobar");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("recognized"));

    Ok(())
}

// --- contiguous ---

#[test]
fn command_contiguous_collinear() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("synder");
    let output = cmd
        .arg("contiguous")
        .arg("tests/synmap/collinear.tsv")
        .arg("-k")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 1);
    assert_eq!(stdout, "q1\t0\t500\tt1\t0\t400\t30\t+\t1\n");

    Ok(())
}

#[test]
fn command_contiguous_inverted() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("synder");
    let output = cmd
        .arg("contiguous")
        .arg("tests/synmap/inverted.tsv")
        .arg("-k")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("q1\t150\t250\tt1\t150\t250\t10\t-\t2"));

    Ok(())
}

#[test]
fn command_contiguous_interleaved() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let out_path = temp.path().join("sets.tsv");

    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("contiguous")
        .arg("tests/synmap/interleaved.tsv")
        .arg("--qsizes")
        .arg("tests/synmap/q.sizes")
        .arg("--tsizes")
        .arg("tests/synmap/t.sizes")
        .arg("--check")
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    let output = fs::read_to_string(&out_path)?;
    let expected = "\
q1\t0\t50\tt1\t0\t30\t4\t+\t1
q1\t20\t70\tt2\t0\t30\t6\t+\t2
q2\t0\t100\tt1\t500\t600\t5\t-\t3
";
    assert_eq!(output, expected);

    Ok(())
}

#[test]
fn command_contiguous_stdin() -> anyhow::Result<()> {
    let input = fs::read_to_string("tests/synmap/collinear.tsv")?;

    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("contiguous")
        .arg("stdin")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("q1\t0\t500\tt1\t0\t400\t30\t+\t1"));

    Ok(())
}

#[test]
fn command_contiguous_warns_past_contig_end() -> anyhow::Result<()> {
    // q1 is declared 300 long, the last block stops at 500
    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("contiguous")
        .arg("tests/synmap/collinear.tsv")
        .arg("--qsizes")
        .arg("tests/synmap/q.sizes")
        .arg("--check")
        .assert()
        .success()
        .stderr(predicate::str::contains("stop greater than contig length: 500 vs 300"));

    Ok(())
}

#[test]
fn command_contiguous_bad_input() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let in_path = temp.path().join("bad.tsv");
    fs::write(&in_path, "q1\t0\t100\tt1\t0\t100\t10\t+\nq1\t0\t100\tt1\n")?;

    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("contiguous")
        .arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error at line 2"));

    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("contiguous")
        .arg("tests/synmap/not_there.tsv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not open"));

    Ok(())
}

// --- blocks ---

#[test]
fn command_blocks() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("synder");
    let output = cmd
        .arg("blocks")
        .arg("tests/synmap/collinear.tsv")
        .arg("-k")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let expected = "\
0\tq1\t0\t100\tt1\t0\t100\t10\t+\t1\t4\t1\t-,1
1\tq1\t150\t250\tt1\t150\t250\t10\t+\t2\t5\t1\t0,2
2\tq1\t400\t500\tt1\t300\t400\t10\t+\t3\t6\t1\t1,-
";
    assert_eq!(stdout, expected);

    Ok(())
}

#[test]
fn command_blocks_debug_dump() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("synder");
    cmd.arg("blocks")
        .arg("tests/synmap/interleaved.tsv")
        .arg("-vv")
        .assert()
        .success()
        .stderr(predicate::str::contains("Q-0 parent=q1 pos(0, 10, +)"))
        .stderr(predicate::str::contains("* cnr=[-,2]"));

    Ok(())
}
