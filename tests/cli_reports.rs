use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seismo_cli"))
}

fn write_csv(path: &Path, samples: &[f64]) {
    let mut contents = String::from("time_abs,time_rel,velocity\n");
    for (i, s) in samples.iter().enumerate() {
        contents.push_str(&format!("t{i},{},{s}\n", i as f64 * 0.001));
    }
    fs::write(path, contents).expect("write CSV");
}

fn sine(frequency: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * std::f64::consts::PI * frequency * i as f64 / sample_rate).sin())
        .collect()
}

fn stdout_lines(output: &std::process::Output) -> Vec<Value> {
    String::from_utf8(output.stdout.clone())
        .expect("stdout UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("report JSON line"))
        .collect()
}

#[test]
fn analyze_single_file_reports_band() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("station_a.csv");
    // 4 Hz lands on bin 4 (3.906 Hz)
    write_csv(&csv, &sine(4.0, 1000.0, 1024));

    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "ingest": { "lowpass_cutoff": null } }"#).unwrap();

    let output = cli()
        .arg("analyze")
        .arg(&csv)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run seismo_cli analyze");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let reports = stdout_lines(&output);
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report["series"], "station_a");
    assert_eq!(
        report["report"]["classification"]["band"],
        "minor_ambient_noise"
    );
    assert_eq!(report["report"]["windows"].as_array().unwrap().len(), 1);
}

#[test]
fn analyze_directory_isolates_failed_series() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(&dir.path().join("a_good.csv"), &sine(5.0, 1000.0, 2048));
    fs::write(dir.path().join("b_broken.csv"), "time_abs,time_rel,velocity\nx,y,z\n").unwrap();
    write_csv(&dir.path().join("c_good.csv"), &sine(10.0, 1000.0, 512));

    let output = cli()
        .arg("analyze")
        .arg(dir.path())
        .output()
        .expect("failed to run seismo_cli analyze");
    assert_eq!(output.status.code(), Some(2));

    let reports = stdout_lines(&output);
    let names: Vec<&str> = reports
        .iter()
        .map(|r| r["series"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a_good", "b_broken", "c_good"]);

    assert!(reports[0]["report"].is_object());
    assert!(reports[1]["error"]["message"].is_string());
    assert!(reports[1].get("report").is_none());
    assert!(reports[2]["report"].is_object());
}

#[test]
fn analyze_writes_summary_array_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    fs::create_dir(&input).unwrap();
    write_csv(&input.join("one.csv"), &sine(3.0, 200.0, 600));
    write_csv(&input.join("two.csv"), &sine(7.0, 200.0, 600));
    let out = dir.path().join("reports.json");

    let output = cli()
        .arg("analyze")
        .arg(&input)
        .args(["--sample-rate", "200", "--window-size", "256", "--summary"])
        .arg("--output")
        .arg(&out)
        .output()
        .expect("failed to run seismo_cli analyze");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let entries = json.as_array().expect("array of reports");
    assert_eq!(entries.len(), 2);
    for entry in entries {
        let report = &entry["report"];
        assert_eq!(report["sample_rate"], 200.0);
        let windows = report["windows"].as_array().unwrap();
        // 600 samples in windows of 256
        assert_eq!(windows.len(), 3);
        for window in windows {
            let smoothed = window["status"]["analyzed"]["smoothed"].as_array().unwrap();
            assert!(smoothed.is_empty());
        }
    }
}

#[test]
fn analyze_missing_path_is_fatal() {
    let output = cli()
        .args(["analyze", "/nonexistent/seismo/input.csv"])
        .output()
        .expect("failed to run seismo_cli analyze");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn analyze_rejects_invalid_window_size() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("s.csv");
    write_csv(&csv, &[1.0, 2.0, 3.0]);

    let output = cli()
        .arg("analyze")
        .arg(&csv)
        .args(["--window-size", "0"])
        .output()
        .expect("failed to run seismo_cli analyze");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn dump_config_prints_defaults() {
    let output = cli()
        .arg("dump-config")
        .output()
        .expect("failed to run seismo_cli dump-config");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("config JSON");
    assert_eq!(json["scan"]["window_size"], 1024);
    assert_eq!(json["scan"]["max_lag"], 10);
    assert_eq!(json["ingest"]["value_column"], 2);
    assert_eq!(json["classifier"]["strong_noise_mean"], 50.0);
}
