//! Tool definitions module.
//!
//! One file per tool family. Simple tools implement [`SimpleTool`] and map
//! their arguments to a single Canvas API request; `create_okr_structure`
//! runs a multi-step workflow of its own.

pub mod auth;
pub mod canvas;
pub mod common;
pub mod node;
pub mod okr;
pub mod task;

pub use auth::WhoamiTool;
pub use canvas::{CreateCanvasTool, GetCanvasTool, ListCanvasesTool};
pub use common::{ResourceId, SimpleTool, ToolDefinition, compact, run_simple};
pub use node::{
    ConnectNodesTool, CreateNodeTool, DeleteConnectionTool, DeleteNodeTool, ListNodesTool,
    UpdateNodeTool,
};
pub use okr::{CreateOkrStructureTool, OkrStructure};
pub use task::{CreateTaskTool, GetTaskStatsTool, ListTasksTool, UpdateTaskTool};
