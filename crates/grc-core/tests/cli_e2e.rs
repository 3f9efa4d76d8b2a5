//! End-to-end tests for the grc-core binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const POLICIES: &str = r#"[
  {
    "metadata": {
      "name": "P1",
      "annotations": { "policy.mcm.ibm.com/standards": "PCI" }
    },
    "raw": { "status": { "status": { "C1": { "compliant": "NonCompliant" } } } }
  },
  {
    "metadata": {
      "name": "P2",
      "annotations": { "policy.mcm.ibm.com/standards": "PCI,HIPAA" }
    },
    "raw": { "status": { "status": { "C1": { "compliant": "Compliant" } } } }
  }
]"#;

const FINDINGS: &str = r#"[
  {
    "name": "F1",
    "securityClassification": { "securityCategories": ["Access-Control"] },
    "finding": { "severity": "High" }
  },
  {
    "name": "F2",
    "securityClassification": { "securityCategories": ["Access-Control"] },
    "finding": { "severity": "Low" }
  }
]"#;

/// Scratch directories that keep the binary away from the user's config
/// and view state.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Sandbox {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("grc-core").expect("grc-core binary should exist");
        cmd.env_remove("GRC_CONFIG")
            .env_remove("GRC_LOG")
            .env_remove("RUST_LOG")
            .env("GRC_CONFIG_DIR", self.path().join("config"))
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("GRC_VIEW_STATE_DIR", self.path().join("state"));
        cmd
    }
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

mod cards {
    use super::*;

    #[test]
    fn policy_cards_as_json() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        let output = sandbox
            .cmd()
            .args(["cards", "--items", &items])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        assert_eq!(json["command"], "cards");
        assert_eq!(json["mode"], "policy");
        assert_eq!(json["choice"], "standards");
        assert!(json["run_id"].as_str().unwrap().starts_with("run-"));

        let cards = json["body"]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["name"], "PCI");
        assert_eq!(cards[0]["violations"], 2);
        assert_eq!(cards[0]["counts"]["policy"]["total"], 2);
        assert_eq!(cards[1]["name"], "HIPAA");
        assert_eq!(cards[1]["violations"], 0);
    }

    #[test]
    fn filter_drops_other_cards() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        let output = sandbox
            .cmd()
            .args(["cards", "--items", &items, "--filter", "standards=PCI"])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        let cards = json["body"]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["name"], "PCI");
    }

    #[test]
    fn findings_from_stdin_by_route() {
        let sandbox = Sandbox::new();
        let output = sandbox
            .cmd()
            .args(["cards", "--route", "/grc/findings", "--choice", "categories"])
            .write_stdin(FINDINGS)
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        let card = &json["body"]["cards"][0];
        assert_eq!(card["name"], "Access Control");
        assert_eq!(card["rawName"], "Access-Control");
        assert_eq!(card["highSeverity"], 1);
        assert_eq!(card["counts"]["finding"]["currentFindings"], 2);
        assert_eq!(card["counts"]["severity"]["totalSeverity"], 2);
    }

    #[test]
    fn collapsed_query_hides_cards() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        let output = sandbox
            .cmd()
            .args(["cards", "--items", &items, "--query", "card=false"])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["body"]["state"], "collapsed");
        assert_eq!(json["header"]["collapsed"], true);
    }

    #[test]
    fn empty_items_show_no_resource() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["--format", "md", "cards"])
            .write_stdin("[]")
            .assert()
            .success()
            .stdout(predicate::str::contains("No Governance and risk yet"));
    }

    #[test]
    fn markdown_table() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        sandbox
            .cmd()
            .args(["-f", "md", "cards", "--items", &items])
            .assert()
            .success()
            .stdout(predicate::str::contains("| PCI | **1/1** | **1/2** |"))
            .stdout(predicate::str::contains("| HIPAA | 0/1 | 0/1 |"));
    }

    #[test]
    fn summary_line() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        sandbox
            .cmd()
            .args(["-f", "summary", "cards", "--items", &items])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 policy by standards (PCI=2, HIPAA=0)"));
    }

    #[test]
    fn invalid_choice_is_args_error() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        sandbox
            .cmd()
            .args(["cards", "--items", &items, "--choice", "controls"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("invalid card choice"));
    }

    #[test]
    fn summary_format_reports_headline_not_json() {
        let sandbox = Sandbox::new();
        let items = sandbox.write("policies.json", POLICIES);
        sandbox
            .cmd()
            .args(["-f", "summary", "cards", "--items", &items, "--choice", "controls"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains(
                "Invalid Card Choice: invalid card choice: 'controls'",
            ))
            .stderr(predicate::str::contains("\"status\"").not());
    }

    #[test]
    fn exitcode_format_is_silent_on_failure() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["-f", "exitcode", "-q", "cards", "--items", "/no/such/items.json"])
            .assert()
            .code(21)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn malformed_items_are_args_error() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .arg("cards")
            .write_stdin("{\"not\": \"an array\"}")
            .assert()
            .code(10);
    }

    #[test]
    fn missing_items_file_is_io_error() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["cards", "--items", "/no/such/items.json"])
            .assert()
            .code(21);
    }

    #[test]
    fn missing_config_is_config_error() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["--config", "/no/such/config.toml", "cards"])
            .write_stdin("[]")
            .assert()
            .code(11)
            .stderr(predicate::str::contains("\"status\": \"error\""));
    }

    #[test]
    fn config_overrides_other_label_and_default_choice() {
        let sandbox = Sandbox::new();
        let config = sandbox.write(
            "config.toml",
            "locale = \"fr\"\ndefault_choice = \"categories\"\n\n[messages]\n\"overview.grc.overview.other\" = \"Autre\"\n",
        );
        let items = sandbox.write("policies.json", POLICIES);
        let output = sandbox
            .cmd()
            .args(["--config", &config, "cards", "--items", &items])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        assert_eq!(json["choice"], "categories");
        assert_eq!(json["body"]["cards"][0]["name"], "Autre");
    }
}

mod choice {
    use super::*;

    #[test]
    fn set_then_get_persists() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["choice", "set", "categories"])
            .assert()
            .success();

        let output = sandbox.cmd().args(["choice", "get"]).output().unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["choice"], "categories");
        assert_eq!(json["selectedIndex"], 0);
        assert_eq!(json["label"], "Categories");
        assert_eq!(json["persisted"], true);
    }

    #[test]
    fn get_without_state_uses_default() {
        let sandbox = Sandbox::new();
        let output = sandbox.cmd().args(["choice", "get"]).output().unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["choice"], "standards");
        assert_eq!(json["selectedIndex"], 1);
        assert_eq!(json["persisted"], false);
    }

    #[test]
    fn persisted_choice_drives_cards() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["choice", "set", "categories"])
            .assert()
            .success();

        let items = sandbox.write("policies.json", POLICIES);
        let output = sandbox
            .cmd()
            .args(["cards", "--items", &items])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["choice"], "categories");
        assert_eq!(json["header"]["selectedIndex"], 0);
        assert_eq!(json["body"]["cards"][0]["name"], "Other");
    }

    #[test]
    fn invalid_value_is_args_error() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["choice", "set", "controls"])
            .assert()
            .code(10);
    }
}

mod view {
    use super::*;

    #[test]
    fn toggle_card_collapses_and_expands() {
        let sandbox = Sandbox::new();
        let output = sandbox
            .cmd()
            .args(["toggle-card", "index=1"])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["query"], "card=false&index=1");
        assert_eq!(json["params"]["showCard"], false);

        let output = sandbox
            .cmd()
            .args(["toggle-card", "card=false&index=1"])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["query"], "card=true&index=1");
    }

    #[test]
    fn drill_down_from_cluster_tile() {
        let sandbox = Sandbox::new();
        let output = sandbox
            .cmd()
            .args([
                "drill-down",
                "--kind",
                "categories",
                "--name",
                "Access Control",
                "--entity",
                "cluster",
                "--filter",
                "categories=Audit",
                "--query",
                "filters=%7B%22a%22%3A1%7D",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        let values: Vec<&str> = json["filters"]["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(values, vec!["Access Control", "Audit"]);
        assert_eq!(
            json["query"],
            "card=false&index=1&toggle=false&filters={\"a\":1}"
        );
    }

    #[test]
    fn drill_down_rejects_unknown_entity() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["drill-down", "--kind", "standards", "--name", "PCI", "--entity", "rack"])
            .assert()
            .code(10);
    }
}

mod schema {
    use super::*;

    #[test]
    fn list_includes_overview() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["schema", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("GrcOverview"));
    }

    #[test]
    fn named_schema_is_json() {
        let sandbox = Sandbox::new();
        let output = sandbox.cmd().args(["schema", "CardChoice"]).output().unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert!(json.to_string().contains("categories"));
    }

    #[test]
    fn unknown_schema_is_args_error() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["schema", "Nope"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown schema type"));
    }
}
