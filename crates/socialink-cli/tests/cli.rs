use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const LICENCE_SCAN: &str =
    "Diplôme de Licence en Travail Social\nUniversité Mohammed V - Rabat\nObtenu le 15/06/2018";

fn socialink() -> Command {
    let mut cmd = Command::cargo_bin("socialink").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn extract_recognized_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.txt");
    fs::write(&input, LICENCE_SCAN).unwrap();

    socialink()
        .args(["extract", "--text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title":"Licence en Travail Social""#))
        .stdout(predicate::str::contains(r#""confidence":75"#))
        .stdout(predicate::str::contains(r#""documentNumber":null"#));
}

#[test]
fn extract_text_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.txt");
    fs::write(&input, LICENCE_SCAN).unwrap();

    socialink()
        .args(["extract", "--format", "text", "--text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Institution: Mohammed V - Rabat"))
        .stdout(predicate::str::contains("Document number: -"))
        .stdout(predicate::str::contains("Confidence: 75%"));
}

#[test]
fn extract_text_takes_no_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.txt");
    fs::write(&input, LICENCE_SCAN).unwrap();

    socialink()
        .arg("extract")
        .arg(dir.path().join("scan.jpg"))
        .arg("--text")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    socialink()
        .args(["extract", "--text"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_rejects_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "hello").unwrap();

    socialink()
        .arg("extract")
        .arg(&input)
        .arg("--model-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""success":false"#))
        .stdout(predicate::str::contains("Unsupported file format"));
}

#[test]
fn extract_pdf_returns_warning() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.pdf");
    fs::write(&input, b"%PDF-1.4").unwrap();

    socialink()
        .arg("extract")
        .arg(&input)
        .arg("--model-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success":true"#))
        .stdout(predicate::str::contains("PDF OCR requires image conversion"))
        .stdout(predicate::str::contains(r#""confidence":0"#));
}

#[test]
fn extract_image_without_models_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.jpg");
    fs::write(&input, b"not really a jpeg").unwrap();

    socialink()
        .arg("extract")
        .arg(&input)
        .arg("--model-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("OCR engine unavailable"));
}

#[test]
fn extract_missing_file() {
    socialink()
        .args(["extract", "does-not-exist.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_results_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    let out = dir.path().join("out");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("diplome.pdf"), b"%PDF-1.4").unwrap();
    fs::write(docs.join("notes.txt"), "hello").unwrap();

    socialink()
        .arg("batch")
        .arg(format!("{}/*", docs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .arg("--model-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("0 extracted, 1 with warnings, 1 failed"));

    let pdf_result = fs::read_to_string(out.join("diplome.pdf.json")).unwrap();
    assert!(pdf_result.contains("PDF OCR requires image conversion"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert!(lines.next().unwrap().starts_with("file,status,title"));
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.contains(",warning,"));
    assert!(summary.contains(",failed,"));
}

#[test]
fn batch_keeps_one_result_per_file_sharing_a_stem() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    let out = dir.path().join("out");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("diplome.jpg"), b"not really a jpeg").unwrap();
    fs::write(docs.join("diplome.pdf"), b"%PDF-1.4").unwrap();

    socialink()
        .arg("batch")
        .arg(format!("{}/diplome.*", docs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--model-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 extracted, 1 with warnings, 1 failed"));

    let jpg_result = fs::read_to_string(out.join("diplome.jpg.json")).unwrap();
    assert!(jpg_result.contains("OCR engine unavailable"));

    let pdf_result = fs::read_to_string(out.join("diplome.pdf.json")).unwrap();
    assert!(pdf_result.contains("PDF OCR requires image conversion"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();

    socialink()
        .arg("batch")
        .arg(format!("{}/*.png", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    socialink()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains(r#""language": "fra+ara""#));

    socialink()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_commands_use_the_given_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");

    socialink()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    socialink()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "ocr.keep_unk", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set ocr.keep_unk = true"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains(r#""keep_unk": true"#));

    socialink()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "ocr.keep_unk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    socialink()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site.json"));
}
