//! Integration tests for the Estante CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a fixture with one ebook (backed by a local file) and one drawing
fn create_fixture(dir: &TempDir) -> PathBuf {
    let pdf = dir.path().join("socorros.pdf");
    fs::write(&pdf, b"%PDF-1.4 test").expect("Failed to write test file");

    let rows = json!([
        {
            "id": "2",
            "titulo": "Colorir Animais",
            "tipo": "desenho",
            "url_capa": "https://cdn.example/animais-capa.jpg",
            "url_arquivo": "https://cdn.example/animais.jpg",
            "created_at": "2024-06-01T10:00:00Z",
            "updated_at": "2024-06-01T10:00:00Z"
        },
        {
            "id": "1",
            "titulo": "Primeiros Socorros",
            "tipo": "ebook",
            "url_capa": "https://cdn.example/socorros-capa.jpg",
            "url_arquivo": format!("file://{}", pdf.display()),
            "created_at": "2024-06-02T10:00:00Z",
            "updated_at": "2024-06-02T10:00:00Z"
        }
    ]);

    let path = dir.path().join("conteudos.json");
    fs::write(&path, serde_json::to_string(&rows).unwrap()).expect("Failed to write fixture");
    path
}

fn estante(fixture: &Path) -> Command {
    let mut cmd = Command::cargo_bin("estante").unwrap();
    cmd.env_remove("ESTANTE_BIND")
        .env_remove("ESTANTE_STALE_SECS")
        .arg("--fixture")
        .arg(fixture);
    cmd
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("estante").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("read"));
}

#[test]
fn test_list_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    let output = estante(&fixture).arg("list").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Todos (2)"));
    let ebook = stdout.find("Primeiros Socorros").unwrap();
    let drawing = stdout.find("Colorir Animais").unwrap();
    assert!(ebook < drawing);
    assert!(stdout.contains("Colorir Animais.jpg"));
}

#[test]
fn test_list_filtered_json() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    let output = estante(&fixture)
        .args(["list", "--filter", "desenho", "--json"])
        .assert()
        .success();
    let body: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(body["filter"], "desenho");
    assert_eq!(body["total"], 1);
    assert_eq!(body["grid"]["cards"][0]["id"], "2");
    assert_eq!(body["grid"]["cards"][0]["read_label"], "Ver Agora");
}

#[test]
fn test_list_invalid_filter() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["list", "--filter", "video"])
        .assert()
        .failure();
}

#[test]
fn test_list_failure_shows_empty_state_and_toast() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    estante(&missing)
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Nenhum conteúdo encontrado"))
        .stderr(predicate::str::contains("Erro ao carregar conteúdo"));
}

#[test]
fn test_stats_json() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    let output = estante(&fixture)
        .args(["stats", "--json"])
        .assert()
        .success();
    let body: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(body, json!({ "ebooks": 1, "drawings": 1, "total": 2 }));
}

#[test]
fn test_download_saves_with_title_filename() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);
    let out_dir = temp_dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    estante(&fixture)
        .args(["download", "1", "--output"])
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Download iniciado"));

    let saved = fs::read(out_dir.join("Primeiros Socorros.pdf")).unwrap();
    assert_eq!(saved, b"%PDF-1.4 test");
}

#[test]
fn test_download_keeps_hostile_title_inside_output() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("fonte.pdf");
    fs::write(&pdf, b"%PDF-1.4 fuga").unwrap();
    let fixture = temp_dir.path().join("conteudos.json");
    let rows = json!([{
        "id": "9",
        "titulo": "../fuga",
        "tipo": "ebook",
        "url_capa": "",
        "url_arquivo": format!("file://{}", pdf.display()),
        "created_at": "2024-06-02T10:00:00Z",
        "updated_at": "2024-06-02T10:00:00Z"
    }]);
    fs::write(&fixture, rows.to_string()).unwrap();

    let out_dir = temp_dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    estante(&fixture)
        .args(["download", "9", "--output"])
        .arg(&out_dir)
        .assert()
        .success();

    assert_eq!(fs::read(out_dir.join("_fuga.pdf")).unwrap(), b"%PDF-1.4 fuga");
    assert!(!temp_dir.path().join("fuga.pdf").exists());
}

#[test]
fn test_read_has_no_output_option() {
    let mut cmd = Command::cargo_bin("estante").unwrap();
    cmd.args(["read", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--launch"))
        .stdout(predicate::str::contains("--output").not());
}

#[test]
fn test_download_unknown_id() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["download", "404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No content with id '404'"));
}

#[test]
fn test_download_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["download", "1", "--output"])
        .arg(temp_dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Erro no download"));
}

#[test]
fn test_read_jump_to_page_then_close() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["read", "1"])
        .write_stdin("5\n-2\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Primeiros Socorros - Página 1"))
        .stdout(predicate::str::contains("#page=5"))
        .stdout(predicate::str::contains("Visualizador fechado"));
}

#[test]
fn test_read_page_turn_finishes_before_close() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["read", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Primeiros Socorros - Página 2"))
        .stdout(predicate::str::contains("Visualizador fechado"));
}

#[test]
fn test_read_external_view() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["read", "1"])
        .write_stdin("e\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("visualização externa"))
        .stdout(predicate::str::contains("Página 2").not());
}

#[test]
fn test_read_unknown_id() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = create_fixture(&temp_dir);

    estante(&fixture)
        .args(["read", "404"])
        .write_stdin("q\n")
        .assert()
        .failure();
}
