use std::fs;
use std::process::Command;

use serde_json::Value;

fn network(name: &str) -> String {
    format!("{}/../../networks/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn bn_sim(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bn-sim"))
        .args(args)
        .output()
        .expect("run bn-sim")
}

#[test]
fn query_reports_every_method() {
    let path = network("traffic.yaml");
    let output = bn_sim(&[
        "query",
        "--network",
        &path,
        "--target",
        "traffic=true",
        "--evidence",
        "umbrella=true",
        "--iterations",
        "10000",
        "--runs",
        "2",
        "--seed",
        "7",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    let exact = report["exact"].as_f64().unwrap();
    assert!((exact - 0.632091).abs() < 0.001);
    for method in ["rejection", "gibbs"] {
        let mean = report[method]["mean"].as_f64().unwrap();
        assert!((mean - exact).abs() < 0.06, "{method}: {mean}");
        assert_eq!(report[method]["runs"].as_array().unwrap().len(), 2);
    }
    assert_eq!(report["master_seed"].as_u64(), Some(7));
    assert_eq!(report["network_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn query_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports/alarm.json");
    let path = network("alarm.yaml");
    let status = bn_sim(&[
        "query",
        "--network",
        &path,
        "--target",
        "burglary=true",
        "--evidence",
        "johnCalls=true",
        "--evidence",
        "maryCalls=false",
        "--method",
        "exact",
        "--out",
        out.to_str().unwrap(),
    ])
    .status;
    assert!(status.success());
    let report: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!((report["exact"].as_f64().unwrap() - 0.0102303).abs() < 0.001);
    assert!(report.get("gibbs").is_none());
}

#[test]
fn unknown_variable_fails() {
    let path = network("traffic.yaml");
    let output = bn_sim(&["query", "--network", &path, "--target", "snow=true"]);
    assert!(!output.status.success());
}

#[test]
fn describe_and_hash_print_the_network() {
    let yaml = network("traffic.yaml");
    let from_yaml = bn_sim(&["hash", "--network", &yaml]);
    assert!(from_yaml.status.success());
    let describe = bn_sim(&["describe", "--network", &yaml]);
    let text = String::from_utf8(describe.stdout).unwrap();
    assert!(text.starts_with("Bayesian network (4 variables)"));
    assert!(text.contains("traffic <- weekEnd, rain"));
    let hash = String::from_utf8(from_yaml.stdout).unwrap();
    assert_eq!(hash.trim().len(), 64);
}
