//! File operations through the CSV store

use std::fs;
use std::path::Path;

use puma::engine::{Evaluator, Payload, Session};
use puma::foundation::{ErrorKind, Value};
use puma::runtime::{CsvStore, Repl, RuntimeConfig};
use tempfile::TempDir;

fn evaluator() -> Evaluator {
    Evaluator::default().with_persistence(CsvStore::new())
}

fn load(dir: &Path, name: &str, contents: &str) -> (Evaluator, Session) {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    let evaluator = evaluator();
    let mut session = Session::with_seed(7);
    evaluator
        .execute(&format!("Sol \"{}\"", path.display()), &mut session)
        .unwrap();
    (evaluator, session)
}

#[test]
fn load_transform_save_round_trip() {
    let dir = TempDir::new().unwrap();
    let (evaluator, mut session) = load(dir.path(), "ventas.csv", "x,y\n1,4\n2,5\n3,6\n");
    assert!(session.has_loaded());

    evaluator.execute("Maceta x y", &mut session).unwrap();
    evaluator.execute("Carnivora", &mut session).unwrap();

    let saved = fs::read_to_string(dir.path().join("ventas.csv")).unwrap();
    assert_eq!(saved, "x,y,x_mas_y\n1,4,5\n2,5,7\n3,6,9\n");
}

#[test]
fn save_to_another_path() {
    let dir = TempDir::new().unwrap();
    let (evaluator, mut session) = load(dir.path(), "a.csv", "x,y\n1,2\n");
    let target = dir.path().join("b.csv");
    evaluator
        .execute(&format!("Carnivora \"{}\"", target.display()), &mut session)
        .unwrap();
    assert_eq!(fs::read_to_string(target).unwrap(), "x,y\n1,2\n");
}

#[test]
fn load_reports_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("d.csv");
    fs::write(&path, "nombre,edad\nana,30\nluis,\n").unwrap();
    let mut session = Session::with_seed(0);
    let success = evaluator()
        .execute(&format!("Sol \"{}\"", path.display()), &mut session)
        .unwrap();
    let Payload::Summary(summary) = success.payload else {
        panic!("expected summary payload");
    };
    assert_eq!(summary.rows, 2);
    assert_eq!(
        session.table().column("edad").unwrap().get(1),
        Some(&Value::Null)
    );
}

#[test]
fn load_failures_keep_the_gate_closed() {
    let dir = TempDir::new().unwrap();
    let evaluator = evaluator();
    let mut session = Session::with_seed(0);

    let missing = dir.path().join("nada.csv");
    let err = evaluator
        .execute(&format!("Sol \"{}\"", missing.display()), &mut session)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));

    let err = evaluator
        .execute("Sol \"datos.xlsx\"", &mut session)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedFormat { .. }));

    let empty = dir.path().join("vacio.csv");
    fs::write(&empty, "").unwrap();
    let err = evaluator
        .execute(&format!("Sol \"{}\"", empty.display()), &mut session)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyInput { .. }));

    assert!(!session.has_loaded());
}

#[test]
fn export_json_and_excel() {
    let dir = TempDir::new().unwrap();
    let (evaluator, mut session) = load(dir.path(), "t.csv", "a,b\n1,x\n");
    let out = dir.path().join("salida");
    evaluator
        .execute(
            &format!("Papapum \"{}\" \"JSON\"", out.display()),
            &mut session,
        )
        .unwrap();
    let text = fs::read_to_string(dir.path().join("salida.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, serde_json::json!([{"a": 1.0, "b": "x"}]));

    evaluator
        .execute(
            &format!("Papapum \"{}\" \"excel\"", out.display()),
            &mut session,
        )
        .unwrap();
    let bytes = fs::read(dir.path().join("salida.xlsx")).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn script_runs_until_terminate() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("datos.csv");
    fs::write(&csv, "x,y\n1,4\n2,5\n").unwrap();
    let out = dir.path().join("fin.csv");
    let script = dir.path().join("guion.puma");
    fs::write(
        &script,
        format!(
            "# demo\nSol \"{}\"\nZombistein (Maceta x y)\nCarnivora \"{}\"\nZerebros\nJalapeño x\n",
            csv.display(),
            out.display()
        ),
    )
    .unwrap();

    let config = RuntimeConfig::default()
        .with_seed(3)
        .with_resources_dir(dir.path());
    let mut repl = Repl::with_editor(NoInput, &config).without_banner();
    let failures = repl.eval_file(&script).unwrap();
    assert_eq!(failures, 0);
    assert!(repl.is_finished());
    assert_eq!(
        fs::read_to_string(out).unwrap(),
        "x,y,x_mas_y\n1,4,15\n2,5,21\n"
    );
}

/// Editor for scripted runs; the prompt is never read.
struct NoInput;

impl puma::runtime::LineEditor for NoInput {
    fn read_line(&mut self, _prompt: &str) -> puma::foundation::Result<puma::runtime::ReadResult> {
        Ok(puma::runtime::ReadResult::Eof)
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_columns(&mut self, _columns: Vec<String>) {}
}
