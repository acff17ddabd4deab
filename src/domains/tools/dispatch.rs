//! Invocation path shared by every transport.
//!
//! Lookup, argument validation, execution under a timeout, panic capture,
//! envelope normalization and secret redaction all happen here, so a call
//! produces the same result whether it came over stdio, TCP or HTTP.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::{Instrument, debug, info_span, warn};

use super::ToolError;
use super::envelope;
use super::handlers::ToolContext;
use super::registry::ToolRegistry;
use crate::core::config::DEFAULT_TOOL_TIMEOUT_SECS;

/// Routes calls to registered tools.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
    timeout: Duration,
    secrets: Vec<String>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        let secrets = context.config().credentials.secrets();
        let timeout = match context.config().tools.timeout() {
            t if t.is_zero() => Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
            t => t,
        };
        Self {
            registry: Arc::new(registry),
            context,
            timeout,
            secrets,
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invoke the tool called `name`.
    ///
    /// Only an unknown name is returned as `Err`. Every other failure
    /// (invalid arguments, handler error, remote error, panic, timeout) is an
    /// error result with `is_error` set.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let descriptor = self.registry.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;

        let span = info_span!("tool_call", tool = %name);
        let arguments = arguments.unwrap_or_default();

        let result = async {
            debug!("Validating arguments");
            let started = std::panic::catch_unwind(AssertUnwindSafe(|| {
                descriptor.prepare(self.context.clone(), arguments)
            }));

            let future = match started {
                Ok(Ok(future)) => future,
                Ok(Err(e)) => {
                    debug!("Rejected arguments: {}", e);
                    return envelope::error(&e);
                }
                Err(panic) => return panicked(panic),
            };

            let guarded = AssertUnwindSafe(future).catch_unwind();
            match tokio::time::timeout(self.timeout, guarded).await {
                Ok(Ok(Ok(result))) => envelope::ensure_content(result),
                Ok(Ok(Err(e))) => {
                    warn!("Tool failed: {}", e);
                    envelope::error(&e)
                }
                Ok(Err(panic)) => panicked(panic),
                Err(_) => {
                    warn!("Tool timed out after {:?}", self.timeout);
                    envelope::error(ToolError::Timeout(self.timeout))
                }
            }
        }
        .instrument(span)
        .await;

        Ok(envelope::redact_result(result, &self.secrets))
    }
}

fn panicked(panic: Box<dyn Any + Send>) -> CallToolResult {
    let message = panic_message(panic.as_ref());
    warn!("Tool panicked: {}", message);
    envelope::error(ToolError::internal(format!("tool panicked: {}", message)))
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use rmcp::model::Content;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::core::config::Config;
    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::ToolResult;
    use crate::domains::tools::descriptor::{ToolDescriptor, ToolParams};

    #[derive(Debug, Deserialize, JsonSchema)]
    struct EchoParams {
        msg: String,
    }

    impl ToolParams for EchoParams {}

    #[derive(Debug, Deserialize, JsonSchema)]
    struct SizeParams {
        width: Option<f64>,
        height: Option<f64>,
    }

    impl ToolParams for SizeParams {
        fn validate(&self) -> Result<(), String> {
            if self.width.is_some() == self.height.is_some() {
                return Err("exactly one of width or height must be provided".into());
            }
            Ok(())
        }
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct PageParams {
        #[serde(default = "default_limit")]
        limit: u32,
    }

    fn default_limit() -> u32 {
        50
    }

    impl ToolParams for PageParams {}

    #[derive(Debug, Deserialize, JsonSchema)]
    struct NoParams {}

    impl ToolParams for NoParams {}

    fn panics_before_future(_ctx: ToolContext, _p: NoParams) -> std::future::Ready<ToolResult> {
        panic!("handler exploded before starting")
    }

    fn context(config: Config) -> ToolContext {
        ToolContext::new(Arc::new(MockApi::new()), Arc::new(config))
    }

    fn dispatcher_with(config: Config) -> Dispatcher {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                ToolDescriptor::new("echo", "Echo the message", |_ctx, p: EchoParams| async move {
                    Ok(envelope::success_text(p.msg))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("size", "Accepts one dimension", |_ctx, p: SizeParams| async move {
                    Ok(envelope::success_json(&json!({ "width": p.width, "height": p.height })))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("page", "Reports its limit", |_ctx, p: PageParams| async move {
                    Ok(envelope::success_text(p.limit.to_string()))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("fails", "Always fails", |_ctx, _p: NoParams| async move {
                    Err(ToolError::execution_failed("boom"))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("panics", "Always panics", |_ctx, _p: NoParams| async move {
                    let explode = true;
                    if explode {
                        panic!("handler exploded");
                    }
                    Ok(envelope::success_text("unreachable"))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("panics-early", "Panics before returning a future", panics_before_future)
                    .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("slow", "Never finishes in time", |_ctx, _p: NoParams| async move {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(envelope::success_text("late"))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("empty", "Returns no content", |_ctx, _p: NoParams| async move {
                    Ok(CallToolResult::success(Vec::<Content>::new()))
                })
                .unwrap(),
            )
            .unwrap()
            .register(
                ToolDescriptor::new("leaks", "Leaks the token", |ctx, _p: NoParams| async move {
                    let token = ctx.config().credentials.miro_access_token.clone().unwrap_or_default();
                    Err(ToolError::execution_failed(format!("request with {} failed", token)))
                })
                .unwrap(),
            )
            .unwrap();
        Dispatcher::new(registry, context(config))
    }

    fn dispatcher() -> Dispatcher {
        dispatcher_with(Config::default())
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn test_echo_round_trip() {
        let result = dispatcher()
            .invoke("echo", args(json!({ "msg": "hi" })))
            .await
            .unwrap();
        assert!(!envelope::is_error(&result));
        assert_eq!(result.content.len(), 1);
        assert_eq!(envelope::first_text(&result), Some("hi"));
    }

    #[tokio::test]
    async fn test_missing_required_field_never_reaches_handler() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();
        let mut registry = ToolRegistry::new();
        registry
            .register(
                ToolDescriptor::new("echo", "Echo the message", move |_ctx, p: EchoParams| {
                    flag.store(true, Ordering::SeqCst);
                    async move { Ok(envelope::success_text(p.msg)) }
                })
                .unwrap(),
            )
            .unwrap();
        let d = Dispatcher::new(registry, context(Config::default()));

        let result = d.invoke("echo", args(json!({}))).await.unwrap();
        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("msg"));
        assert!(!called.load(Ordering::SeqCst));

        let result = d.invoke("echo", args(json!({ "msg": "ok" }))).await.unwrap();
        assert!(!envelope::is_error(&result));
        assert!(called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_absent_arguments_treated_as_empty_object() {
        let result = dispatcher().invoke("page", None).await.unwrap();
        assert_eq!(envelope::first_text(&result), Some("50"));
    }

    #[tokio::test]
    async fn test_default_filled_before_handler() {
        let result = dispatcher().invoke("page", args(json!({}))).await.unwrap();
        assert_eq!(envelope::first_text(&result), Some("50"));

        let result = dispatcher()
            .invoke("page", args(json!({ "limit": 10 })))
            .await
            .unwrap();
        assert_eq!(envelope::first_text(&result), Some("10"));
    }

    #[tokio::test]
    async fn test_exactly_one_of_refinement() {
        let d = dispatcher();

        let both = d
            .invoke("size", args(json!({ "width": 5, "height": 5 })))
            .await
            .unwrap();
        assert!(envelope::is_error(&both));

        let neither = d.invoke("size", args(json!({}))).await.unwrap();
        assert!(envelope::is_error(&neither));

        let width = d.invoke("size", args(json!({ "width": 5 }))).await.unwrap();
        assert!(!envelope::is_error(&width));
    }

    #[tokio::test]
    async fn test_handler_error_becomes_error_result() {
        let result = dispatcher().invoke("fails", None).await.unwrap();
        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let result = dispatcher().invoke("panics", None).await.unwrap();
        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("handler exploded"));
    }

    #[tokio::test]
    async fn test_panic_before_future_is_contained() {
        let result = dispatcher().invoke("panics-early", None).await.unwrap();
        assert!(envelope::is_error(&result));
        assert_eq!(
            envelope::first_text(&result),
            Some("Internal error: tool panicked: handler exploded before starting")
        );
    }

    #[tokio::test]
    async fn test_timeout_becomes_error_result() {
        let d = dispatcher().with_timeout(Duration::from_millis(20));
        let result = d.invoke("slow", None).await.unwrap();
        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let err = dispatcher().invoke("nope", None).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_content_never_empty() {
        let result = dispatcher().invoke("empty", None).await.unwrap();
        assert_eq!(result.content.len(), 1);
        assert!(!envelope::is_error(&result));
    }

    #[tokio::test]
    async fn test_error_results_are_redacted() {
        let mut config = Config::default();
        config.credentials.miro_access_token = Some("tok-123".to_string());

        let result = dispatcher_with(config).invoke("leaks", None).await.unwrap();
        let text = envelope::first_text(&result).unwrap();
        assert!(!text.contains("tok-123"));
        assert!(text.contains("[REDACTED]"));
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let mut config = Config::default();
        config.tools.timeout_secs = 0;
        let d = dispatcher_with(config);
        assert_eq!(d.timeout(), Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS));
    }

    #[test]
    fn test_panic_message_variants() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(s.as_ref()), "static");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
