#![allow(dead_code)]

use assert_cmd::Command;
use calamine::{open_workbook_auto, Reader};
use std::fs;
use std::path::Path;

pub const CONFIG: &str = r#"
output_dir = "out"
window_months = 3

[roster]
path = "roster.csv"

[[terminal]]
name = "Escritorio"
path = "Ponto_Escritorio.txt"
date_offset = 10
time_offset = 18
identifier = { strategy = "substring" }

[[terminal]]
name = "Sede"
path = "Ponto_Sede.txt"
date_offset = 8
time_offset = 16
identifier = { strategy = "fixed_tail", length = 11 }
"#;

pub const ROSTER: &str = "Nome,Secao,NIT\n\
Ana Silva,Escritório,112233445\n\
Bruno Costa,Sede,99887766554\n\
Eva Souza,Sede,44455566677\n\
Carla Lima,,12312312312\n";

pub const ANA: &str = "00112233445";
pub const BRUNO: &str = "99887766554";
pub const EVA: &str = "44455566677";
pub const CARLA: &str = "12312312312";

pub fn ponto_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ponto").unwrap();
    cmd.env_remove("PONTO_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Line of the Escritorio terminal: 10-char prefix, date, time, identifier
pub fn escritorio_line(seq: u32, date: &str, time: &str, id: &str) -> String {
    format!("{:010}{}{}{}", seq, date, time, id)
}

/// Line of the Sede terminal: 8-char prefix, date, time, identifier at the tail
pub fn sede_line(seq: u32, date: &str, time: &str, id: &str) -> String {
    format!("{:08}{}{}{}", seq, date, time, id)
}

/// Write config, roster and both terminal dumps into `dir`
pub fn write_workspace(dir: &Path, escritorio: &[String], sede: &[String]) {
    fs::write(dir.join("ponto.toml"), CONFIG).unwrap();
    fs::write(dir.join("roster.csv"), ROSTER).unwrap();
    fs::write(dir.join("Ponto_Escritorio.txt"), escritorio.join("\r\n")).unwrap();
    fs::write(dir.join("Ponto_Sede.txt"), sede.join("\r\n")).unwrap();
}

/// The mixed fixture used by most tests, evaluated on 16/10/2026
pub fn standard_workspace(dir: &Path) {
    write_workspace(
        dir,
        &[
            escritorio_line(1, "16102026", "0758", ANA),
            escritorio_line(2, "16102026", "0800", CARLA),
            escritorio_line(3, "16102026", "0805", "77777777777"),
            escritorio_line(4, "1X102026", "0758", ANA),
            escritorio_line(5, "15072026", "0700", ANA),
            escritorio_line(6, "16072026", "0700", ANA),
        ],
        &[
            sede_line(1, "16102026", "0801", BRUNO),
            sede_line(2, "16102026", "1702", BRUNO),
            sede_line(3, "16102026", "0655", EVA),
        ],
    );
}

/// Worksheet names of a workbook, in order
pub fn sheet_names(path: &Path) -> Vec<String> {
    open_workbook_auto(path).unwrap().sheet_names()
}

/// Rows of one worksheet, each row's cells joined with commas
pub fn sheet_rows(path: &Path, sheet: &str) -> Vec<String> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}
