use super::{ErrorKind, ExportError, NormalizeOptions, NormalizedValue, build_command, normalize};
use crate::exec::Executor;
use crate::metrics::{MetricRequest, lookup};
use futures_util::future::join_all;

const LOG_TARGET: &str = "  exporter";

/// Answers monitoring-host queries by building a command, running it, and normalizing its output.
///
/// Each call is independent: the exporter holds no per-request state, so concurrent
/// calls need no coordination beyond what the executor itself requires.
#[derive(Debug, Clone)]
pub struct Exporter<E> {
    executor: E,
    options: NormalizeOptions,
}

impl<E: Executor> Exporter<E> {
    #[must_use]
    pub const fn new(executor: E, options: NormalizeOptions) -> Self {
        Self { executor, options }
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// The host-facing entry point: export one metric identified by key and parameters.
    pub async fn export(&self, key: &str, params: &[String]) -> Result<NormalizedValue, ExportError> {
        self.export_request(&MetricRequest::new(key, params.to_vec())).await
    }

    /// Export one metric.
    ///
    /// Key and parameter problems are reported before anything is executed. Execution
    /// failures are never retried.
    pub async fn export_request(&self, request: &MetricRequest) -> Result<NormalizedValue, ExportError> {
        let result = self.export_core(request).await;

        if let Err(e) = &result {
            log::warn!(target: LOG_TARGET, "Could not export {e}");
        }

        result
    }

    /// Export several metrics concurrently, returning results in request order.
    pub async fn export_many(&self, requests: &[MetricRequest]) -> Vec<Result<NormalizedValue, ExportError>> {
        join_all(requests.iter().map(|request| self.export_request(request))).await
    }

    async fn export_core(&self, request: &MetricRequest) -> Result<NormalizedValue, ExportError> {
        let command = build_command(request).map_err(|e| ExportError::new(request, requested_scope_id(request), e))?;

        log::debug!(target: LOG_TARGET, "Running '{}' for metric '{}'", command.text, request.key());

        let output = self.executor.execute(&command.text).await.map_err(|failure| {
            ExportError::new(
                request,
                command.scope_id.clone(),
                ErrorKind::ExecutionFailed {
                    reason: failure.reason,
                    output: String::from_utf8_lossy(&failure.output).into_owned(),
                },
            )
        })?;

        normalize(&output, command.def.shape, self.options).map_err(|e| ExportError::new(request, command.scope_id, e))
    }
}

/// The scope identifier a request names, for error context, even if the request is invalid.
fn requested_scope_id(request: &MetricRequest) -> Option<String> {
    lookup(request.key())
        .filter(|def| def.template.takes_scope_id())
        .and_then(|_| request.params().first())
        .filter(|scope_id| !scope_id.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecutionFailure;
    use crate::query::{BuildError, NormalizeError};
    use bytes::Bytes;
    use std::sync::Mutex;

    /// Executor that answers from a closure and records every command it is given.
    struct FakeExecutor<F> {
        respond: F,
        calls: Mutex<Vec<String>>,
    }

    impl<F> FakeExecutor<F>
    where
        F: Fn(&str) -> Result<Bytes, ExecutionFailure> + Send + Sync,
    {
        fn new(respond: F) -> Self {
            Self {
                respond,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl<F> Executor for FakeExecutor<F>
    where
        F: Fn(&str) -> Result<Bytes, ExecutionFailure> + Send + Sync,
    {
        async fn execute(&self, command: &str) -> Result<Bytes, ExecutionFailure> {
            self.calls.lock().unwrap().push(command.to_string());
            (self.respond)(command)
        }
    }

    fn replying(output: &'static [u8]) -> Exporter<FakeExecutor<impl Fn(&str) -> Result<Bytes, ExecutionFailure> + Send + Sync>> {
        Exporter::new(FakeExecutor::new(move |_: &str| Ok(Bytes::from_static(output))), NormalizeOptions::default())
    }

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_unknown_key_never_executes() {
        let exporter = replying(b"1");
        let err = exporter.export("scope_reserved", &params(&["10.0.0.0"])).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Build(BuildError::UnknownKey));
        assert_eq!(err.key, "scope_reserved");
        assert!(exporter.executor().calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_scope_id_never_executes() {
        for key in ["scope_free", "scope_in_use", "windows_dhcp.scope_free"] {
            let exporter = replying(b"1");
            let err = exporter.export(key, &[]).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Build(BuildError::MissingParameter { name: "scope_id" }));
            assert_eq!(err.scope_id, None);
            assert!(exporter.executor().calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_invalid_scope_id_never_executes_and_is_reported() {
        let exporter = replying(b"1");
        let err = exporter.export("scope_free", &params(&["10.0.0.0;Stop-Computer"])).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Build(BuildError::InvalidParameter { .. })));
        assert_eq!(err.scope_id.as_deref(), Some("10.0.0.0;Stop-Computer"));
        assert!(exporter.executor().calls().is_empty());
    }

    #[tokio::test]
    async fn test_scope_ids_empty_output_is_empty_list() {
        let exporter = replying(b"");
        assert_eq!(exporter.export("scope_ids", &[]).await, Ok(NormalizedValue::EmptyList));
        assert_eq!(exporter.executor().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_scope_ids_collapsed_single_value() {
        let exporter = replying(b"\"10.0.0.0\"\r\n");
        assert_eq!(
            exporter.export("windows_dhcp.scope_ids", &[]).await,
            Ok(NormalizedValue::List(vec!["10.0.0.0".into()]))
        );
    }

    #[tokio::test]
    async fn test_scope_free_runs_quoted_command() {
        let exporter = replying(b"250\r\n");
        let value = exporter.export("scope_free", &params(&["10.0.0.0"])).await;
        assert_eq!(value, Ok(NormalizedValue::Scalar(250)));

        let calls = exporter.executor().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("-ScopeId '10.0.0.0'"));
        assert!(calls[0].contains("ExpandProperty Free"));
    }

    #[tokio::test]
    async fn test_scope_get_single_record_is_wrapped() {
        let exporter = replying(br#"{"ScopeId":"10.0.0.0","Free":5,"InUse":3}"#);
        assert_eq!(
            exporter.export("scope.get", &[]).await,
            Ok(NormalizedValue::Document(r#"[{"ScopeId":"10.0.0.0","Free":5,"InUse":3}]"#.into()))
        );
    }

    #[tokio::test]
    async fn test_empty_scalar_is_wrapped_with_context() {
        let exporter = replying(b"");
        let err = exporter.export("scope_in_use", &params(&["10.1.0.0"])).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Normalize(NormalizeError::EmptyResult));
        assert_eq!(err.key, "scope_in_use");
        assert_eq!(err.scope_id.as_deref(), Some("10.1.0.0"));
    }

    #[tokio::test]
    async fn test_execution_failure_is_wrapped_with_context() {
        let exporter = Exporter::new(
            FakeExecutor::new(|_: &str| Err(ExecutionFailure::new("'powershell.exe' exited with exit status: 1", Bytes::from_static(b"Access denied")))),
            NormalizeOptions::default(),
        );

        let err = exporter.export("scope_free", &params(&["10.0.0.0"])).await.unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::ExecutionFailed {
                reason: "'powershell.exe' exited with exit status: 1".into(),
                output: "Access denied".into(),
            }
        );
        assert_eq!(err.scope_id.as_deref(), Some("10.0.0.0"));
        assert_eq!(exporter.executor().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_eager_record_validation() {
        let exporter = Exporter::new(
            FakeExecutor::new(|_: &str| Ok(Bytes::from_static(b"[{\"ScopeId\":"))),
            NormalizeOptions { validate_records: true },
        );
        let err = exporter.export("scope.get", &[]).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Normalize(NormalizeError::MalformedDocument { .. })));
    }

    #[tokio::test]
    async fn test_export_many_preserves_order() {
        let exporter = Exporter::new(
            FakeExecutor::new(|command: &str| {
                let output: &'static [u8] = if command.contains("ExpandProperty Free") {
                    b"12"
                } else if command.contains("ExpandProperty InUse") {
                    b"30"
                } else {
                    br#"["10.0.0.0","10.1.0.0"]"#
                };
                Ok(Bytes::from_static(output))
            }),
            NormalizeOptions::default(),
        );

        let requests = [
            MetricRequest::new("scope_in_use", params(&["10.0.0.0"])),
            MetricRequest::new("scope_bogus", Vec::new()),
            MetricRequest::new("scope_ids", Vec::new()),
            MetricRequest::new("scope_free", params(&["10.0.0.0"])),
        ];

        let results = exporter.export_many(&requests).await;
        assert_eq!(results.len(), 4);
        assert_eq!(results[0], Ok(NormalizedValue::Scalar(30)));
        assert!(results[1].is_err());
        assert_eq!(results[2], Ok(NormalizedValue::List(vec!["10.0.0.0".into(), "10.1.0.0".into()])));
        assert_eq!(results[3], Ok(NormalizedValue::Scalar(12)));
        assert_eq!(exporter.executor().calls().len(), 3);
    }
}
