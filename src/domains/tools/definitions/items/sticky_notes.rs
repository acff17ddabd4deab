//! Sticky note tools.
//!
//! Style values outside the documented palette are replaced with the
//! default and logged, instead of being forwarded for the remote to reject.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    AnchoredPosition, Geometry, PartialPosition, board_path, body, choose_or_default, fetch,
    item_get_delete_tools, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

pub const STICKY_NOTE_COLORS: &[&str] = &[
    "light_yellow",
    "yellow",
    "orange",
    "light_green",
    "green",
    "light_blue",
    "blue",
    "light_pink",
    "pink",
    "light_purple",
    "purple",
    "black",
    "gray",
    "light_gray",
    "white",
];
pub const STICKY_NOTE_SHAPES: &[&str] = &["square", "rectangle", "circle", "triangle", "rhombus"];
pub const TEXT_ALIGNS: &[&str] = &["left", "center", "right"];

const DEFAULT_COLOR: &str = "light_yellow";
pub(crate) const DEFAULT_SHAPE: &str = "square";
const DEFAULT_ALIGN: &str = "center";

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct StickyNoteBody {
    data: Option<StickyNoteContent>,
    position: Option<PartialPosition>,
    geometry: Option<Geometry>,
    style: Option<StickyNoteStyle>,
}

#[derive(Debug, Serialize)]
struct StickyNoteContent {
    content: Option<String>,
    shape: Option<String>,
}

/// Style of a sticky note.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StickyNoteStyle {
    /// Fill color (light_yellow, yellow, orange, light_green, green,
    /// light_blue, blue, light_pink, pink, light_purple, purple, black,
    /// gray, light_gray, white).
    pub fill_color: Option<String>,

    /// Alignment of the text (left, center, right).
    pub text_align: Option<String>,

    /// Color of the text.
    pub text_color: Option<String>,
}

impl StickyNoteStyle {
    /// Replace out-of-palette values, leaving absent ones absent.
    pub(crate) fn checked(self) -> Self {
        Self {
            fill_color: self
                .fill_color
                .map(|c| choose_or_default("fillColor", &c, STICKY_NOTE_COLORS, DEFAULT_COLOR)),
            text_align: self
                .text_align
                .map(|a| choose_or_default("textAlign", &a, TEXT_ALIGNS, DEFAULT_ALIGN)),
            text_color: self.text_color,
        }
    }

    /// Like [`checked`](Self::checked), with defaults for absent values.
    fn with_defaults(self) -> Self {
        let checked = self.checked();
        Self {
            fill_color: Some(checked.fill_color.unwrap_or_else(|| DEFAULT_COLOR.to_string())),
            text_align: Some(checked.text_align.unwrap_or_else(|| DEFAULT_ALIGN.to_string())),
            text_color: checked.text_color,
        }
    }
}

pub(crate) fn checked_shape(shape: &str) -> String {
    choose_or_default("shape", shape, STICKY_NOTE_SHAPES, DEFAULT_SHAPE)
}

fn sticky_geometry(geometry: &Option<Geometry>) -> Result<(), String> {
    match geometry {
        Some(g) if g.width.is_some() || g.height.is_some() => g.exactly_one_dimension(),
        _ => Ok(()),
    }
}

// ============================================================================
// create-sticky-note-item
// ============================================================================

/// Content of a new sticky note.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StickyNoteData {
    /// Text content of the sticky note.
    pub content: String,

    /// Shape of the sticky note (square, rectangle, circle, triangle, rhombus).
    pub shape: Option<String>,
}

/// Parameters for creating a sticky note.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStickyNoteParams {
    /// Unique identifier (ID) of the board where the sticky note will be created.
    pub board_id: String,

    /// The content and configuration of the sticky note.
    pub data: StickyNoteData,

    /// Position of the sticky note on the board.
    pub position: AnchoredPosition,

    /// Dimensions of the sticky note. Give either width or height, not both.
    pub geometry: Option<Geometry>,

    /// Style configuration of the sticky note.
    pub style: Option<StickyNoteStyle>,
}

impl ToolParams for CreateStickyNoteParams {
    fn validate(&self) -> Result<(), String> {
        sticky_geometry(&self.geometry)
    }
}

#[derive(Debug, Clone)]
pub struct CreateStickyNoteTool;

#[async_trait]
impl ToolHandler for CreateStickyNoteTool {
    const NAME: &'static str = "create-sticky-note-item";
    const DESCRIPTION: &'static str = "Create a sticky note on a Miro board. By default, sticky \
        notes are 199x228 and available in these colors: light_yellow, yellow, orange, \
        light_green, green, light_blue, blue, light_pink, pink, light_purple, purple, black, \
        gray, light_gray, white.";
    type Params = CreateStickyNoteParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let position = params.position;
        let note = StickyNoteBody {
            data: Some(StickyNoteContent {
                content: Some(params.data.content),
                shape: Some(
                    params
                        .data
                        .shape
                        .as_deref()
                        .map(checked_shape)
                        .unwrap_or_else(|| DEFAULT_SHAPE.to_string()),
                ),
            }),
            position: Some(PartialPosition {
                x: Some(position.x),
                y: Some(position.y),
                origin: Some(position.origin.0),
                relative_to: Some(position.relative_to.0),
            }),
            geometry: params.geometry,
            style: Some(params.style.unwrap_or_default().with_defaults()),
        };
        let request = ApiRequest::post(board_path(&params.board_id, &["sticky_notes"]))
            .json(body(&note)?);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// update-sticky-note-item
// ============================================================================

/// Changes to a sticky note's content.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct StickyNoteDataChanges {
    /// Updated text content.
    pub content: Option<String>,

    /// Updated shape (square, rectangle, circle, triangle, rhombus).
    pub shape: Option<String>,
}

/// Parameters for updating a sticky note.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStickyNoteParams {
    /// Unique identifier (ID) of the board that contains the sticky note.
    pub board_id: String,

    /// Unique identifier (ID) of the sticky note that you want to update.
    pub item_id: String,

    /// Updated content and configuration of the sticky note.
    pub data: Option<StickyNoteDataChanges>,

    /// Updated position of the sticky note on the board.
    pub position: Option<PartialPosition>,

    /// Updated dimensions. Give either width or height, not both.
    pub geometry: Option<Geometry>,

    /// Updated style configuration of the sticky note.
    pub style: Option<StickyNoteStyle>,
}

impl ToolParams for UpdateStickyNoteParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[
                self.data.is_some(),
                self.position.is_some(),
                self.geometry.is_some(),
                self.style.is_some(),
            ],
            "data, position, geometry or style",
        )?;
        sticky_geometry(&self.geometry)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateStickyNoteTool;

#[async_trait]
impl ToolHandler for UpdateStickyNoteTool {
    const NAME: &'static str = "update-sticky-note-item";
    const DESCRIPTION: &'static str = "Update an existing sticky note item on a Miro board";
    type Params = UpdateStickyNoteParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let position = params.position.filter(|p| !p.is_empty()).map(|p| PartialPosition {
            origin: p.origin.or_else(|| Some("center".to_string())),
            relative_to: p.relative_to.or_else(|| Some("canvas_center".to_string())),
            ..p
        });
        let note = StickyNoteBody {
            data: params.data.map(|d| StickyNoteContent {
                content: d.content,
                shape: d.shape.as_deref().map(checked_shape),
            }),
            position,
            geometry: params.geometry,
            style: params.style.map(StickyNoteStyle::checked),
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["sticky_notes", params.item_id.as_str()],
        ))
        .json(body(&note)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetStickyNoteTool => "get-sticky-note-item",
        "Retrieve information about a specific sticky note item on a Miro board";
    DeleteStickyNoteTool => "delete-sticky-note-item",
        "Delete a sticky note item from a Miro board";
    segment: "sticky_notes", label: "Sticky note"
}
