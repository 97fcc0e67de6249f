//! Integration tests for the rolling window exports

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::*;

#[test]
fn test_raw_lines_kept_regardless_of_identifier() {
    let temp = TempDir::new().unwrap();
    standard_workspace(temp.path());

    ponto_cmd()
        .current_dir(temp.path())
        .args(["export", "--date", "16-10-2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolling export 16/07/2026 - 16/10/2026"));

    let raw = fs::read_to_string(temp.path().join("out/Linhas_Janela_Escritorio_20261016.txt")).unwrap();
    let expected = [
        escritorio_line(1, "16102026", "0758", ANA),
        escritorio_line(2, "16102026", "0800", CARLA),
        escritorio_line(3, "16102026", "0805", "77777777777"),
        escritorio_line(6, "16072026", "0700", ANA),
    ];
    assert_eq!(raw, format!("{}\n", expected.join("\n")));
}

#[test]
fn test_multi_punch_employee_present_in_window_export() {
    let temp = TempDir::new().unwrap();
    standard_workspace(temp.path());

    ponto_cmd()
        .current_dir(temp.path())
        .args(["export", "--date", "16-10-2026"])
        .assert()
        .success();

    let raw = fs::read_to_string(temp.path().join("out/Linhas_Janela_Sede_20261016.txt")).unwrap();
    assert!(raw.contains(&sede_line(1, "16102026", "0801", BRUNO)));
    assert!(raw.contains(&sede_line(2, "16102026", "1702", BRUNO)));

    let book = temp.path().join("out/Registros_Janela_20261016.xlsx");
    assert_eq!(sheet_names(&book), vec!["Registros"]);
    let table = sheet_rows(&book, "Registros");
    assert_eq!(table[0], "DATE,TIME,TERMINAL,IDENTIFIER,NAME,SECTION");
    assert_eq!(table.len(), 7);
    assert!(table.contains(&"16/10/2026,08:01,Sede,99887766554,Bruno Costa,Sede".to_string()));
    assert!(table.contains(&"16/10/2026,17:02,Sede,99887766554,Bruno Costa,Sede".to_string()));
    // Unknown identifiers never become validated records
    assert!(!table.iter().any(|row| row.contains("77777777777")));
    // Window start is inclusive, the day before is not
    assert!(table
        .contains(&"16/07/2026,07:00,Escritorio,00112233445,Ana Silva,Escritório".to_string()));
    assert!(!table.iter().any(|row| row.contains("15/07/2026")));

    let dump = fs::read_to_string(temp.path().join("out/Registros_Janela_20261016.txt")).unwrap();
    assert!(dump.contains("Total records: 6"));

    assert!(!temp
        .path()
        .join("out/Relatorio_Presenca_20261016.txt")
        .exists());
}

#[test]
fn test_run_writes_everything() {
    let temp = TempDir::new().unwrap();
    standard_workspace(temp.path());

    ponto_cmd()
        .current_dir(temp.path())
        .args(["run", "--date", "16-10-2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily report 16/10/2026"))
        .stdout(predicate::str::contains("Validated records: 6"));

    let out = temp.path().join("out");
    for name in [
        "Relatorio_Presenca_20261016.txt",
        "Relatorio_Presenca_20261016.xlsx",
        "Registros_Janela_20261016.txt",
        "Registros_Janela_20261016.xlsx",
        "Linhas_Janela_Escritorio_20261016.txt",
        "Linhas_Janela_Sede_20261016.txt",
    ] {
        assert!(out.join(name).exists(), "missing {}", name);
    }
}
