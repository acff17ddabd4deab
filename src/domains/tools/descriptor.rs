//! Tool descriptors and input contracts.
//!
//! A [`ToolDescriptor`] bundles everything needed to list and run one tool:
//! its name, description, JSON Schema (generated from the parameter type) and
//! a type-erased handler. Argument validation is part of the descriptor: raw
//! JSON is deserialized into the parameter type and refined by
//! [`ToolParams::validate`] before the handler is ever called.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ToolError;
use super::handlers::{ToolContext, ToolHandler, ToolResult};

/// Input contract of a tool.
///
/// Serde covers required/optional fields, defaults, enum allow-lists and
/// nested shapes. `validate` covers refinements that need every field at
/// once (mutually exclusive fields, "at least one of", date formats).
pub trait ToolParams: DeserializeOwned + JsonSchema + Send + 'static {
    /// Check cross-field constraints. The message names the violated rule.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Deserialize and refine raw arguments into `P`.
pub fn parse_arguments<P: ToolParams>(arguments: JsonObject) -> Result<P, ToolError> {
    let params: P = serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
    params.validate().map_err(ToolError::invalid_arguments)?;
    Ok(params)
}

type ErasedHandler = Arc<
    dyn Fn(ToolContext, JsonObject) -> Result<BoxFuture<'static, ToolResult>, ToolError>
        + Send
        + Sync,
>;

/// Immutable description of one invocable tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    input_schema: Arc<JsonObject>,
    handler: ErasedHandler,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    /// Descriptor for a [`ToolHandler`] implementation.
    pub fn of<T: ToolHandler>() -> Result<Self, ToolError> {
        Self::new(T::NAME, T::DESCRIPTION, |ctx, params: T::Params| {
            T::execute(ctx, params)
        })
    }

    /// Descriptor from a name, description and async handler function.
    ///
    /// Fails when the name or description is blank, or when `P` does not
    /// produce an object schema.
    pub fn new<P, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<Self, ToolError>
    where
        P: ToolParams,
        F: Fn(ToolContext, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        let name = name.into();
        let description = description.into();

        if name.trim().is_empty() {
            return Err(ToolError::invalid_descriptor(
                "<unnamed>",
                "name must not be empty",
            ));
        }
        if description.trim().is_empty() {
            return Err(ToolError::invalid_descriptor(
                name,
                "description must not be empty",
            ));
        }

        let input_schema = Arc::new(schema_for_type::<P>());
        if input_schema.get("type").and_then(Value::as_str) != Some("object") {
            return Err(ToolError::invalid_descriptor(
                name,
                "input schema must describe an object",
            ));
        }

        let handler: ErasedHandler = Arc::new(move |ctx, arguments| {
            let params = parse_arguments::<P>(arguments)?;
            Ok(handler(ctx, params).boxed())
        });

        Ok(Self {
            name,
            description,
            input_schema,
            handler,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    /// rmcp metadata model for listing.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Validate `arguments` and, only if they pass, start the handler.
    pub(crate) fn prepare(
        &self,
        ctx: ToolContext,
        arguments: JsonObject,
    ) -> Result<BoxFuture<'static, ToolResult>, ToolError> {
        (self.handler)(ctx, arguments)
    }
}
