//! End-to-end tests of the exporter with a scripted executor standing in for PowerShell.

use bytes::Bytes;
use dhcp_scope_metrics_lib::exec::{ExecutionFailure, Executor};
use dhcp_scope_metrics_lib::metrics::parse_item_key;
use dhcp_scope_metrics_lib::query::{BuildError, ErrorKind, Exporter, NormalizeError, NormalizeOptions, NormalizedValue};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers commands by substring match and records what it ran.
#[derive(Default)]
struct ScriptedExecutor {
    replies: HashMap<&'static str, &'static [u8]>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    fn reply(mut self, needle: &'static str, output: &'static [u8]) -> Self {
        let _ = self.replies.insert(needle, output);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executor for ScriptedExecutor {
    async fn execute(&self, command: &str) -> Result<Bytes, ExecutionFailure> {
        self.calls.lock().unwrap().push(command.to_string());
        self.replies
            .iter()
            .find(|(needle, _)| command.contains(*needle))
            .map(|(_, output)| Bytes::from_static(*output))
            .ok_or_else(|| ExecutionFailure::new("no scripted reply", Bytes::new()))
    }
}

fn exporter(executor: ScriptedExecutor) -> Exporter<ScriptedExecutor> {
    Exporter::new(executor, NormalizeOptions::default())
}

#[tokio::test]
async fn test_scope_ids_with_no_scopes_is_empty_list() {
    let exporter = exporter(ScriptedExecutor::default().reply("Get-DhcpServerv4Scope ", b""));

    let value = exporter.export("windows_dhcp.scope_ids", &[]).await.unwrap();
    assert_eq!(value, NormalizedValue::EmptyList);
    assert_eq!(value.to_string(), "[]");
}

#[tokio::test]
async fn test_scope_ids_with_one_scope_is_one_element_list() {
    let exporter = exporter(ScriptedExecutor::default().reply("Get-DhcpServerv4Scope ", b"\"10.0.0.0\""));

    let value = exporter.export("windows_dhcp.scope_ids", &[]).await.unwrap();
    assert_eq!(value, NormalizedValue::List(vec!["10.0.0.0".to_string()]));
    assert_eq!(value.to_string(), r#"["10.0.0.0"]"#);
}

#[tokio::test]
async fn test_item_keys_flow_through_to_commands() {
    let exporter = exporter(
        ScriptedExecutor::default()
            .reply("ExpandProperty Free", b"120\r\n")
            .reply("ExpandProperty InUse", b"8\r\n"),
    );

    let requests = [
        parse_item_key("windows_dhcp.scope_free[10.20.0.0]").unwrap(),
        parse_item_key("windows_dhcp.scope_in_use[\"10.20.0.0\"]").unwrap(),
    ];
    let results = exporter.export_many(&requests).await;

    assert_eq!(results[0], Ok(NormalizedValue::Scalar(120)));
    assert_eq!(results[1], Ok(NormalizedValue::Scalar(8)));
    assert!(exporter.executor().calls().iter().all(|call| call.contains("-ScopeId '10.20.0.0'")));
}

#[tokio::test]
async fn test_scope_get_document_is_ready_for_discovery() {
    let exporter = exporter(ScriptedExecutor::default().reply(
        "Select-Object @{",
        br#"[{"ScopeId":"10.0.0.0","Free":5,"InUse":3},{"ScopeId":"10.1.0.0","Free":0,"InUse":254}]"#,
    ));

    let value = exporter.export("scope.get", &[]).await.unwrap();
    let NormalizedValue::Document(text) = value else {
        panic!("scope.get yields a document");
    };
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_missing_parameter_and_empty_result_are_distinct() {
    let exporter = exporter(ScriptedExecutor::default().reply("ExpandProperty Free", b""));

    let missing = exporter.export("scope_free", &[]).await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::Build(BuildError::MissingParameter { name: "scope_id" }));

    let empty = exporter.export("scope_free", &["10.0.0.0".to_string()]).await.unwrap_err();
    assert_eq!(empty.kind, ErrorKind::Normalize(NormalizeError::EmptyResult));
    assert_eq!(empty.scope_id.as_deref(), Some("10.0.0.0"));

    assert_eq!(exporter.executor().calls().len(), 1);
}
