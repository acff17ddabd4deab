//! Image tools: images linked from a URL or uploaded as files.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::security::validate_path;
use crate::domains::miro::{ApiRequest, FileUpload};
use crate::domains::tools::definitions::common::{
    AnchoredPosition, Geometry, PartialPosition, board_path, body, decode_base64, fetch,
    item_get_delete_tools, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolError, ToolHandler, ToolParams, ToolResult, envelope};

/// Pick a file name whose extension matches the image's magic bytes.
fn image_file_name(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image.png",
        [0xFF, 0xD8, 0xFF, ..] => "image.jpg",
        [b'G', b'I', b'F', b'8', ..] => "image.gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image.webp",
        _ => "image",
    }
}

/// Metadata part of an image upload.
#[derive(Debug, Serialize)]
struct UploadMetadata {
    title: Option<String>,
    position: Option<PartialPosition>,
}

// ============================================================================
// create-image-item-using-url
// ============================================================================

/// Source of a new image.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageUrlData {
    /// URL of the image to be added to the board.
    pub url: String,
    /// Title of the image.
    pub title: Option<String>,
}

/// Title change of an image.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageDataChanges {
    /// Updated title of the image.
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageBody<D, P> {
    data: Option<D>,
    position: Option<P>,
    geometry: Option<Geometry>,
}

/// Parameters for creating an image from a URL.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageFromUrlParams {
    /// Unique identifier (ID) of the board where the image will be created.
    pub board_id: String,
    /// The content and configuration of the image.
    pub data: ImageUrlData,
    /// Position of the image on the board.
    pub position: AnchoredPosition,
    /// Dimensions of the image.
    pub geometry: Option<Geometry>,
}

impl ToolParams for CreateImageFromUrlParams {}

#[derive(Debug, Clone)]
pub struct CreateImageFromUrlTool;

#[async_trait]
impl ToolHandler for CreateImageFromUrlTool {
    const NAME: &'static str = "create-image-item-using-url";
    const DESCRIPTION: &'static str = "Create a new image item on a Miro board using a URL";
    type Params = CreateImageFromUrlParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Image URL", params.data.url.as_str()),
        ]) {
            return Ok(missing);
        }
        let image = ImageBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: params.geometry,
        };
        let request =
            ApiRequest::post(board_path(&params.board_id, &["images"])).json(body(&image)?);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// create-image-item-using-file
// ============================================================================

/// Parameters for uploading an image passed inline as base64.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageFromFileParams {
    /// Unique identifier (ID) of the board where the image will be created.
    pub board_id: String,
    /// Base64 encoded image data, optionally as a `data:image/...;base64,` URL.
    pub image_data: String,
    /// Position of the image on the board.
    pub position: Option<AnchoredPosition>,
    /// Title of the image.
    pub title: Option<String>,
}

impl ToolParams for CreateImageFromFileParams {}

#[derive(Debug, Clone)]
pub struct CreateImageFromFileTool;

#[async_trait]
impl ToolHandler for CreateImageFromFileTool {
    const NAME: &'static str = "create-image-item-using-file";
    const DESCRIPTION: &'static str =
        "Create a new image item on a Miro board using file from device or from chat";
    type Params = CreateImageFromFileParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Image data", params.image_data.as_str()),
        ]) {
            return Ok(missing);
        }
        let bytes = match decode_base64("image data", &params.image_data) {
            Ok(bytes) => bytes,
            Err(reason) => return Ok(envelope::error(reason)),
        };
        debug!("Uploading {} byte image", bytes.len());

        let metadata = UploadMetadata {
            title: params.title,
            position: params.position.map(|p| PartialPosition {
                x: Some(p.x),
                y: Some(p.y),
                origin: Some(p.origin.0),
                relative_to: Some(p.relative_to.0),
            }),
        };
        let upload = FileUpload {
            file_name: image_file_name(&bytes).to_string(),
            bytes,
            data: body(&metadata)?,
        };
        let request = ApiRequest::post(board_path(&params.board_id, &["images"])).upload(upload);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// update-image-item
// ============================================================================

/// Parameters for updating an image's title, position or size.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageParams {
    /// Unique identifier (ID) of the board that contains the image.
    pub board_id: String,
    /// Unique identifier (ID) of the image that you want to update.
    pub item_id: String,
    /// The updated content of the image.
    pub data: Option<ImageDataChanges>,
    /// Updated position of the image on the board.
    pub position: Option<PartialPosition>,
    /// Updated dimensions of the image.
    pub geometry: Option<Geometry>,
}

impl ToolParams for UpdateImageParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[self.data.is_some(), self.position.is_some(), self.geometry.is_some()],
            "data, position or geometry",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateImageTool;

#[async_trait]
impl ToolHandler for UpdateImageTool {
    const NAME: &'static str = "update-image-item";
    const DESCRIPTION: &'static str = "Update an existing image item on a Miro board";
    type Params = UpdateImageParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let image = ImageBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["images", params.item_id.as_str()],
        ))
        .json(body(&image)?);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// update-image-item-using-file
// ============================================================================

/// Parameters for replacing an image with a local file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageFromFileParams {
    /// Unique identifier (ID) of the board that contains the image.
    pub board_id: String,
    /// Unique identifier (ID) of the image that you want to update.
    pub item_id: String,
    /// Path to the new image file on the server's file system.
    pub file_path: String,
    /// Updated title of the image.
    pub title: Option<String>,
    /// Updated position of the image on the board.
    pub position: Option<PartialPosition>,
}

impl ToolParams for UpdateImageFromFileParams {}

#[derive(Debug, Clone)]
pub struct UpdateImageFromFileTool;

#[async_trait]
impl ToolHandler for UpdateImageFromFileTool {
    const NAME: &'static str = "update-image-item-using-file";
    const DESCRIPTION: &'static str =
        "Update an existing image item on a Miro board using a file from the server's file system";
    type Params = UpdateImageFromFileParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
            ("File path", params.file_path.as_str()),
        ]) {
            return Ok(missing);
        }
        let path = match validate_path(&params.file_path, ctx.config()) {
            Ok(path) => path,
            Err(e) => return Ok(envelope::error(e.to_string())),
        };
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            ToolError::execution_failed(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| image_file_name(&bytes).to_string());
        let metadata = UploadMetadata {
            title: params.title,
            position: params.position.filter(|p| !p.is_empty()),
        };
        let data = body(&metadata)?;
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["images", params.item_id.as_str()],
        ))
        .upload(FileUpload {
            file_name,
            bytes,
            data,
        });
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetImageTool => "get-image-item",
        "Retrieve information about a specific image item on a Miro board";
    DeleteImageTool => "delete-image-item",
        "Delete an image item from a Miro board";
    segment: "images", label: "Image"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;
    use tempfile::TempDir;

    use super::image_file_name;
    use crate::core::config::Config;
    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::{call, dispatcher_with};
    use crate::domains::tools::envelope;

    #[test]
    fn test_image_file_name_sniffing() {
        assert_eq!(image_file_name(&[0x89, b'P', b'N', b'G', 0x0D]), "image.png");
        assert_eq!(image_file_name(&[0xFF, 0xD8, 0xFF, 0xE0]), "image.jpg");
        assert_eq!(image_file_name(b"plain"), "image");
    }

    #[tokio::test]
    async fn test_create_from_url_anchors_position() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "create-image-item-using-url",
            json!({
                "boardId": "b1",
                "data": { "url": "https://example.com/a.png" },
                "position": { "x": 1, "y": 2, "origin": null }
            }),
        )
        .await;

        let body = api.last_request().body.unwrap();
        assert_eq!(
            body["position"],
            json!({ "x": 1.0, "y": 2.0, "origin": "center", "relativeTo": "canvas_center" })
        );
    }

    #[tokio::test]
    async fn test_create_from_file_decodes_data_url() {
        let api = Arc::new(MockApi::new());
        // "\x89PNG" in base64
        let result = call(
            &api,
            "create-image-item-using-file",
            json!({
                "boardId": "b1",
                "imageData": "data:image/png;base64,iVBORw==",
                "title": "Logo",
                "position": { "x": 0, "y": 0 }
            }),
        )
        .await;

        assert!(!envelope::is_error(&result));
        let request = api.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/v2/boards/b1/images");
        let upload = request.upload.unwrap();
        assert_eq!(upload.file_name, "image.png");
        assert_eq!(upload.bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(upload.data["title"], "Logo");
        assert_eq!(upload.data["position"]["relativeTo"], "canvas_center");
    }

    #[tokio::test]
    async fn test_create_from_file_rejects_bad_base64() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "create-image-item-using-file",
            json!({ "boardId": "b1", "imageData": "%%%" }),
        )
        .await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("Error decoding base64"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_from_file_uploads_contents() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("diagram.png");
        std::fs::write(&file, b"png-bytes").unwrap();

        let mut config = Config::default();
        config.security.root_path = Some(root.path().to_path_buf());

        let api = Arc::new(MockApi::new());
        let args = json!({
            "boardId": "b1",
            "itemId": "img1",
            "filePath": file.to_str().unwrap(),
            "title": "Diagram"
        });
        let result = dispatcher_with(api.clone(), config)
            .invoke("update-image-item-using-file", args.as_object().cloned())
            .await
            .unwrap();

        assert!(!envelope::is_error(&result));
        let request = api.last_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path(), "/v2/boards/b1/images/img1");
        let upload = request.upload.unwrap();
        assert_eq!(upload.file_name, "diagram.png");
        assert_eq!(upload.bytes, b"png-bytes".to_vec());
        assert_eq!(upload.data, json!({ "title": "Diagram" }));
    }

    #[tokio::test]
    async fn test_update_from_file_outside_root() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let file = outside.path().join("secret.png");
        std::fs::write(&file, b"x").unwrap();

        let mut config = Config::default();
        config.security.root_path = Some(root.path().to_path_buf());

        let api = Arc::new(MockApi::new());
        let args = json!({ "boardId": "b1", "itemId": "img1", "filePath": file.to_str().unwrap() });
        let result = dispatcher_with(api.clone(), config)
            .invoke("update-image-item-using-file", args.as_object().cloned())
            .await
            .unwrap();

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("outside"));
        assert_eq!(api.request_count(), 0);
    }
}
