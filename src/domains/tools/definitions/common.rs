//! Common utilities shared across Miro tools.
//!
//! This module provides shared parameter shapes (positions, geometry,
//! pagination), identifier checks, request path helpers and the two
//! response shapes every handler ends with.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::{ToolContext, ToolError, ToolResult, envelope};

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: u32 = 50;

/// Deserialize `null` the same way as an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Shared parameter shapes
// ============================================================================

/// Page size, defaulting to 50 when absent or null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PageLimit(pub u32);

impl Default for PageLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl std::fmt::Display for PageLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Anchor point of an item's coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Origin(pub String);

impl Default for Origin {
    fn default() -> Self {
        Self("center".to_string())
    }
}

/// Reference frame of an item's coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RelativeTo(pub String);

impl Default for RelativeTo {
    fn default() -> Self {
        Self("canvas_center".to_string())
    }
}

/// Plain canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// X coordinate on the board.
    pub x: f64,
    /// Y coordinate on the board.
    pub y: f64,
}

/// Coordinates with an explicit anchor, filled with `center` /
/// `canvas_center` when not given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnchoredPosition {
    /// X coordinate on the board.
    pub x: f64,
    /// Y coordinate on the board.
    pub y: f64,
    /// Origin of the coordinates (default: center).
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: Origin,
    /// Reference point (default: canvas_center).
    #[serde(default, deserialize_with = "null_as_default")]
    pub relative_to: RelativeTo,
}

/// Coordinates where either axis may be left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartialPosition {
    /// Updated X coordinate.
    pub x: Option<f64>,
    /// Updated Y coordinate.
    pub y: Option<f64>,
    /// Origin of the coordinates.
    pub origin: Option<String>,
    /// Reference point of the coordinates.
    pub relative_to: Option<String>,
}

impl PartialPosition {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Width and height, both optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Geometry {
    /// Width in board units.
    pub width: Option<f64>,
    /// Height in board units.
    pub height: Option<f64>,
}

impl Geometry {
    /// Items with a fixed aspect ratio accept exactly one dimension.
    pub fn exactly_one_dimension(&self) -> Result<(), String> {
        match (self.width, self.height) {
            (Some(_), Some(_)) => Err(
                "only one of width or height should be provided for items with fixed aspect ratio"
                    .to_string(),
            ),
            (None, None) => Err("either width or height must be provided".to_string()),
            _ => Ok(()),
        }
    }
}

/// Width, height and rotation, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RotatedGeometry {
    /// Width in board units.
    pub width: Option<f64>,
    /// Height in board units.
    pub height: Option<f64>,
    /// Rotation angle in degrees.
    pub rotation: Option<f64>,
}

/// Reference to another board item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemRef {
    /// ID of the referenced item.
    pub id: String,
}

/// Board sharing access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SharingAccess {
    Private,
    View,
    Comment,
    Edit,
}

impl SharingAccess {
    pub fn policy(self) -> Value {
        json!({ "access": self })
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Fail with "<label> is required" for the first blank identifier.
pub fn require_ids(ids: &[(&str, &str)]) -> Result<(), rmcp::model::CallToolResult> {
    match ids.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((label, _)) => Err(envelope::error(format!("{} is required", label))),
        None => Ok(()),
    }
}

/// Require at least one of several optional changes.
pub fn require_any(present: &[bool], fields: &str) -> Result<(), String> {
    if present.iter().any(|p| *p) {
        Ok(())
    } else {
        Err(format!("at least one of {} must be provided", fields))
    }
}

/// Keep `value` when it is allowed, otherwise log and use `default`.
pub fn choose_or_default(field: &str, value: &str, allowed: &[&str], default: &str) -> String {
    if allowed.contains(&value) {
        value.to_string()
    } else {
        warn!("Invalid {}: {}. Using default: {}", field, value, default);
        default.to_string()
    }
}

/// Accept RFC 3339 timestamps and plain `YYYY-MM-DD` dates.
pub fn check_date(field: &str, value: &str) -> Result<(), String> {
    let valid = chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(format!("{} must be an ISO 8601 date, got '{}'", field, value))
    }
}

/// Decode base64 content, accepting an optional `data:<media>;base64,`
/// prefix as pasted from a chat or browser.
pub fn decode_base64(field: &str, input: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;

    let trimmed = input.trim();
    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((_, data)) => data,
            None => return Err(format!("{} is a data URL without base64 content", field)),
        },
        None => trimmed,
    };
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| format!("Error decoding base64 {}: {}", field, e))
}

// ============================================================================
// Request helpers
// ============================================================================

/// `v2/boards/{board_id}/<rest...>`
pub fn board_path(board_id: &str, rest: &[&str]) -> Vec<String> {
    let mut segments = vec!["v2".to_string(), "boards".to_string(), board_id.to_string()];
    segments.extend(rest.iter().map(|s| s.to_string()));
    segments
}

/// `v2/orgs/{org_id}/<rest...>`
pub fn org_path(org_id: &str, rest: &[&str]) -> Vec<String> {
    let mut segments = vec!["v2".to_string(), "orgs".to_string(), org_id.to_string()];
    segments.extend(rest.iter().map(|s| s.to_string()));
    segments
}

/// Serialize a request body, dropping null fields at every level.
pub fn body<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    Ok(prune_nulls(serde_json::to_value(value)?))
}

/// Remove `null` members from objects, recursively. Empty objects left
/// behind are removed too.
pub fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_nulls(v)))
                .filter(|(_, v)| !matches!(v, Value::Object(m) if m.is_empty()))
                .collect();
            Value::Object(pruned)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(prune_nulls).collect()),
        other => other,
    }
}

/// Send `request` and return the response as pretty JSON.
pub async fn fetch(ctx: &ToolContext, request: ApiRequest) -> ToolResult {
    let value = ctx.call(request).await?;
    Ok(envelope::success_json(&value))
}

/// Send `request`, discard the response and confirm with `message`.
pub async fn confirm(ctx: &ToolContext, request: ApiRequest, message: String) -> ToolResult {
    ctx.call(request).await?;
    Ok(envelope::success_json(&json!({
        "success": true,
        "message": message,
    })))
}

// ============================================================================
// Per-type get / delete tools
// ============================================================================

/// Parameters addressing one item on a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardItemParams {
    /// Unique identifier (ID) of the board that contains the item.
    pub board_id: String,
    /// Unique identifier (ID) of the item.
    pub item_id: String,
}

impl crate::domains::tools::ToolParams for BoardItemParams {}

/// Declare `get-*` and `delete-*` tools for one item type endpoint.
macro_rules! item_get_delete_tools {
    (
        $get:ident => $get_name:literal, $get_desc:literal;
        $delete:ident => $delete_name:literal, $delete_desc:literal;
        segment: $segment:literal, label: $label:literal
    ) => {
        #[derive(Debug, Clone)]
        pub struct $get;

        #[async_trait::async_trait]
        impl $crate::domains::tools::ToolHandler for $get {
            const NAME: &'static str = $get_name;
            const DESCRIPTION: &'static str = $get_desc;
            type Params = $crate::domains::tools::definitions::common::BoardItemParams;

            async fn execute(
                ctx: $crate::domains::tools::ToolContext,
                params: Self::Params,
            ) -> $crate::domains::tools::ToolResult {
                use $crate::domains::tools::definitions::common::{board_path, fetch, require_ids};
                if let Err(missing) =
                    require_ids(&[("Board ID", params.board_id.as_str()), ("Item ID", params.item_id.as_str())])
                {
                    return Ok(missing);
                }
                let request = $crate::domains::miro::ApiRequest::get(board_path(
                    &params.board_id,
                    &[$segment, params.item_id.as_str()],
                ));
                fetch(&ctx, request).await
            }
        }

        #[derive(Debug, Clone)]
        pub struct $delete;

        #[async_trait::async_trait]
        impl $crate::domains::tools::ToolHandler for $delete {
            const NAME: &'static str = $delete_name;
            const DESCRIPTION: &'static str = $delete_desc;
            type Params = $crate::domains::tools::definitions::common::BoardItemParams;

            async fn execute(
                ctx: $crate::domains::tools::ToolContext,
                params: Self::Params,
            ) -> $crate::domains::tools::ToolResult {
                use $crate::domains::tools::definitions::common::{board_path, confirm, require_ids};
                if let Err(missing) =
                    require_ids(&[("Board ID", params.board_id.as_str()), ("Item ID", params.item_id.as_str())])
                {
                    return Ok(missing);
                }
                let request = $crate::domains::miro::ApiRequest::delete(board_path(
                    &params.board_id,
                    &[$segment, params.item_id.as_str()],
                ));
                let message = format!(
                    "{} {} successfully deleted from board {}",
                    $label, params.item_id, params.board_id
                );
                confirm(&ctx, request, message).await
            }
        }
    };
}

pub(crate) use item_get_delete_tools;

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for exercising tools against a recording API.

    use std::sync::Arc;

    use rmcp::model::{CallToolResult, JsonObject};
    use serde_json::Value;

    use crate::core::config::Config;
    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::build_tool_registry;
    use crate::domains::tools::{Dispatcher, ToolContext};

    pub fn dispatcher(api: Arc<MockApi>) -> Dispatcher {
        dispatcher_with(api, Config::default())
    }

    pub fn dispatcher_with(api: Arc<MockApi>, config: Config) -> Dispatcher {
        let context = ToolContext::new(api, Arc::new(config));
        Dispatcher::new(build_tool_registry().unwrap(), context)
    }

    /// Invoke `name` through the full dispatch path.
    pub async fn call(api: &Arc<MockApi>, name: &str, args: Value) -> CallToolResult {
        let arguments: Option<JsonObject> = args.as_object().cloned();
        dispatcher(api.clone()).invoke(name, arguments).await.unwrap()
    }

    /// Parse the text of the first block as JSON.
    pub fn json_of(result: &CallToolResult) -> Value {
        let text = crate::domains::tools::envelope::first_text(result).unwrap();
        serde_json::from_str(text).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_ids_reports_first_blank() {
        assert!(require_ids(&[("Board ID", "b1"), ("Item ID", "i1")]).is_ok());

        let missing = require_ids(&[("Board ID", "b1"), ("Item ID", "  ")]).unwrap_err();
        assert!(envelope::is_error(&missing));
        assert_eq!(envelope::first_text(&missing), Some("Item ID is required"));
    }

    #[test]
    fn test_choose_or_default() {
        let allowed = ["left", "center", "right"];
        assert_eq!(choose_or_default("textAlign", "left", &allowed, "center"), "left");
        assert_eq!(choose_or_default("textAlign", "middle", &allowed, "center"), "center");
    }

    #[test]
    fn test_prune_nulls_nested() {
        let pruned = prune_nulls(json!({
            "a": 1,
            "b": null,
            "c": { "d": null },
            "e": [{ "f": null, "g": 2 }]
        }));
        assert_eq!(pruned, json!({ "a": 1, "e": [{ "g": 2 }] }));
    }

    #[test]
    fn test_anchored_position_defaults() {
        let position: AnchoredPosition =
            serde_json::from_value(json!({ "x": 1.0, "y": 2.0, "origin": null })).unwrap();
        assert_eq!(position.origin.0, "center");
        assert_eq!(position.relative_to.0, "canvas_center");

        let body = body(&position).unwrap();
        assert_eq!(body["relativeTo"], "canvas_center");
    }

    #[test]
    fn test_page_limit_null_and_absent() {
        #[derive(Deserialize)]
        struct Page {
            #[serde(default, deserialize_with = "null_as_default")]
            limit: PageLimit,
        }

        let absent: Page = serde_json::from_value(json!({})).unwrap();
        let null: Page = serde_json::from_value(json!({ "limit": null })).unwrap();
        let given: Page = serde_json::from_value(json!({ "limit": 5 })).unwrap();
        assert_eq!(absent.limit, PageLimit(50));
        assert_eq!(null.limit, PageLimit(50));
        assert_eq!(given.limit.to_string(), "5");
    }

    #[test]
    fn test_geometry_exactly_one_dimension() {
        let both = Geometry { width: Some(1.0), height: Some(1.0) };
        let none = Geometry::default();
        let width = Geometry { width: Some(1.0), height: None };
        assert!(both.exactly_one_dimension().is_err());
        assert!(none.exactly_one_dimension().is_err());
        assert!(width.exactly_one_dimension().is_ok());
    }

    #[test]
    fn test_check_date() {
        assert!(check_date("dueDate", "2025-03-01").is_ok());
        assert!(check_date("dueDate", "2025-03-01T10:00:00Z").is_ok());
        assert!(check_date("dueDate", "next tuesday").is_err());
    }

    #[test]
    fn test_decode_base64_with_and_without_prefix() {
        assert_eq!(decode_base64("imageData", "aGk=").unwrap(), b"hi");
        assert_eq!(
            decode_base64("imageData", "data:image/png;base64,aGk=").unwrap(),
            b"hi"
        );
        assert!(decode_base64("imageData", "data:image/png,aGk=").is_err());
        assert!(decode_base64("imageData", "not base64!").unwrap_err().contains("imageData"));
    }

    #[test]
    fn test_sharing_policy_shape() {
        assert_eq!(SharingAccess::Comment.policy(), json!({ "access": "comment" }));
    }

    #[test]
    fn test_paths() {
        assert_eq!(board_path("b=1", &["items", "42"]), vec!["v2", "boards", "b=1", "items", "42"]);
        assert_eq!(org_path("o1", &["cases"]), vec!["v2", "orgs", "o1", "cases"]);
    }
}
