use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_align_linear() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwalign")?;
    let output = cmd
        .arg("align")
        .arg("tests/align/seqs_a.fa")
        .arg("tests/align/seqs_b.fa")
        .arg("tests/align/dna.mat")
        .arg("--gap")
        .arg("-2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.starts_with(concat!(
        "Alignment #1:\n\n",
        "Sequence #1: seq1A\n",
        "Sequence #2: seq1B\n",
        "Matches: 1\n",
        "Percent identity: 50%\n",
        "Indels: number=0 mean length=0.0\n",
        "Alignment length: 2\n",
        "Score=0.0\n\n",
        "AC\n|*\nAG\n\n",
        "Alignment #2:\n\n",
    )));
    assert!(stdout.contains(concat!(
        "Matches: 1\n",
        "Percent identity: 67%\n",
        "Indels: number=1 mean length=1.0\n",
        "Alignment length: 2\n",
        "Score=-1.0\n\n",
        "AC\n| \nA-\n\n",
    )));
    assert!(stdout.contains(concat!(
        "Alignment #3:\n\n",
        "Sequence #1: seq3A\n",
        "Sequence #2: seq3B\n",
        "Matches: 2\n",
        "Percent identity: 67%\n",
        "Indels: number=1 mean length=2.0\n",
        "Alignment length: 4\n",
        "Score=-2.0\n\n",
        "AAAC\n  ||\n--AC\n\n",
    )));
    assert!(!stdout.contains("Alignment #4:"));

    Ok(())
}

#[test]
fn command_align_affine() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwalign")?;
    let output = cmd
        .arg("align")
        .arg("tests/align/seqs_a.fa")
        .arg("tests/align/seqs_b.fa")
        .arg("tests/align/dna.mat")
        .arg("--gap")
        .arg("-5")
        .arg("--affine")
        .arg("--extend")
        .arg("-1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Score=0.0\n\nAC\n|*\nAG\n\n"));
    assert!(stdout.contains("Score=-4.0\n\nAC\n| \nA-\n\n"));
    assert!(stdout.contains(concat!(
        "Alignment #3:\n\n",
        "Sequence #1: seq3A\n",
        "Sequence #2: seq3B\n",
        "Matches: 2\n",
        "Percent identity: 67%\n",
        "Indels: number=1 mean length=2.0\n",
        "Alignment length: 4\n",
        "Score=-4.0\n\n",
        "AAAC\n  ||\n--AC\n\n",
    )));

    Ok(())
}

#[test]
fn command_align_default_extend() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input1 = temp.path().join("a.fa");
    let input2 = temp.path().join("b.fa");
    fs::write(&input1, ">a\nAAAAC\n")?;
    fs::write(&input2, ">b\nAC\n")?;

    let mut cmd = Command::cargo_bin("nwalign")?;
    let output = cmd
        .arg("align")
        .arg(&input1)
        .arg(&input2)
        .arg("tests/align/dna.mat")
        .arg("--gap=-5")
        .arg("--affine")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // one run of three: -5 + 2 * -0.1, plus two matches
    assert!(stdout.contains("Indels: number=1 mean length=3.0\n"));
    assert!(stdout.contains("Score=-3.2\n"));

    Ok(())
}

#[test]
fn command_align_outfile_gz() -> anyhow::Result<()> {
    use flate2::write::GzEncoder;
    use std::io::Write;

    let temp = TempDir::new()?;
    let input1 = temp.path().join("a.fa.gz");
    let input2 = temp.path().join("b.fa");
    let outfile = temp.path().join("out.txt");

    let file = fs::File::create(&input1)?;
    let mut encoder = GzEncoder::new(file, flate2::Compression::default());
    let line = "ACGT".repeat(10);
    encoder.write_all(format!(">long\n{}\n{}\n", line, line).as_bytes())?;
    encoder.finish()?;
    fs::write(&input2, format!(">long\n{}\n", "ACGT".repeat(20)))?;
    fs::write(&outfile, "stale content\n")?;

    let mut cmd = Command::cargo_bin("nwalign")?;
    let output = cmd
        .arg("align")
        .arg(&input1)
        .arg(&input2)
        .arg("tests/align/dna.mat")
        .arg("--gap")
        .arg("-1")
        .arg("-o")
        .arg(&outfile)
        .output()?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(&outfile)?;
    assert!(!content.contains("stale"));
    assert!(content.contains("Percent identity: 100%\n"));
    assert!(content.contains("Alignment length: 80\nScore=80.0\n"));

    // 80 columns wrap into blocks of 60 and 20
    let widths: Vec<usize> = content
        .lines()
        .skip(10)
        .filter(|l| !l.is_empty())
        .map(|l| l.len())
        .collect();
    assert_eq!(widths, vec![60, 60, 60, 20, 20, 20]);

    Ok(())
}

#[test]
fn command_align_missing_pair() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input1 = temp.path().join("a.fa");
    let input2 = temp.path().join("b.fa");
    fs::write(&input1, ">a\nANC\n")?;
    fs::write(&input2, ">b\nAC\n")?;

    let mut cmd = Command::cargo_bin("nwalign")?;
    let output = cmd
        .arg("align")
        .arg(&input1)
        .arg(&input2)
        .arg("tests/align/dna.mat")
        .arg("--gap")
        .arg("-2")
        .output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("failed to align pair #1"));
    assert!(stderr.contains("no score for pair (N, A)"));

    Ok(())
}

#[test]
fn command_align_unequal_counts() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input2 = temp.path().join("b.fa");
    // the empty record is skipped, leaving one sequence against three
    fs::write(&input2, ">b\nAC\n>empty\n")?;

    let mut cmd = Command::cargo_bin("nwalign")?;
    let output = cmd
        .arg("align")
        .arg("tests/align/seqs_a.fa")
        .arg(&input2)
        .arg("tests/align/dna.mat")
        .arg("--gap")
        .arg("-2")
        .output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("skipping empty record empty"));
    assert!(stderr.contains("sequence collections differ in size: 3 vs 1"));

    Ok(())
}

#[test]
fn command_align_requires_gap() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwalign")?;
    cmd.arg("align")
        .arg("tests/align/seqs_a.fa")
        .arg("tests/align/seqs_b.fa")
        .arg("tests/align/dna.mat")
        .assert()
        .failure()
        .stderr(predicates::str::contains("--gap"));

    Ok(())
}

#[test]
fn command_align_verbose() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwalign")?;
    cmd.arg("align")
        .arg("tests/align/seqs_a.fa")
        .arg("tests/align/seqs_b.fa")
        .arg("tests/align/dna.mat")
        .arg("--gap")
        .arg("-2")
        .arg("-v")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicates::str::contains("Alignment #3: pair3 (4) vs pair3 (2)"));

    Ok(())
}

#[test]
fn command_align_non_finite_penalty() -> anyhow::Result<()> {
    let cases: [&[&str]; 3] = [
        &["--gap", "NaN"],
        &["--gap", "inf"],
        &["--gap", "-5", "--affine", "--extend", "NaN"],
    ];
    for penalties in cases {
        let mut cmd = Command::cargo_bin("nwalign")?;
        cmd.arg("align")
            .arg("tests/align/seqs_a.fa")
            .arg("tests/align/seqs_b.fa")
            .arg("tests/align/dna.mat")
            .args(penalties)
            .assert()
            .failure()
            .code(2)
            .stdout(predicates::str::is_empty())
            .stderr(predicates::str::contains("penalty must be finite"));
    }

    Ok(())
}

#[test]
fn command_no_subcommand() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("nwalign")?;
    cmd.arg("-v")
        .assert()
        .failure()
        .code(2)
        .stderr(predicates::str::contains("panicked").not());

    Ok(())
}
