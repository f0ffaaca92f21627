//! Tool Registry - the closed set of tools and their static catalogue.
//!
//! [`ToolName`] enumerates every tool the server exposes. The catalogue is
//! built once from the tool definitions and returned unchanged on every
//! discovery request.

use std::sync::LazyLock;

use rmcp::model::Tool;

use super::definitions::{
    ConnectNodesTool, CreateCanvasTool, CreateNodeTool, CreateOkrStructureTool, CreateTaskTool,
    DeleteConnectionTool, DeleteNodeTool, GetCanvasTool, GetTaskStatsTool, ListCanvasesTool,
    ListNodesTool, ListTasksTool, ToolDefinition, UpdateNodeTool, UpdateTaskTool, WhoamiTool,
};

/// Every tool the server knows, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListCanvases,
    GetCanvas,
    CreateCanvas,
    ListNodes,
    CreateNode,
    UpdateNode,
    DeleteNode,
    ConnectNodes,
    DeleteConnection,
    CreateOkrStructure,
    ListTasks,
    CreateTask,
    UpdateTask,
    GetTaskStats,
    Whoami,
}

impl ToolName {
    pub const ALL: [ToolName; 15] = [
        Self::ListCanvases,
        Self::GetCanvas,
        Self::CreateCanvas,
        Self::ListNodes,
        Self::CreateNode,
        Self::UpdateNode,
        Self::DeleteNode,
        Self::ConnectNodes,
        Self::DeleteConnection,
        Self::CreateOkrStructure,
        Self::ListTasks,
        Self::CreateTask,
        Self::UpdateTask,
        Self::GetTaskStats,
        Self::Whoami,
    ];

    /// Wire name of the tool.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListCanvases => ListCanvasesTool::NAME,
            Self::GetCanvas => GetCanvasTool::NAME,
            Self::CreateCanvas => CreateCanvasTool::NAME,
            Self::ListNodes => ListNodesTool::NAME,
            Self::CreateNode => CreateNodeTool::NAME,
            Self::UpdateNode => UpdateNodeTool::NAME,
            Self::DeleteNode => DeleteNodeTool::NAME,
            Self::ConnectNodes => ConnectNodesTool::NAME,
            Self::DeleteConnection => DeleteConnectionTool::NAME,
            Self::CreateOkrStructure => CreateOkrStructureTool::NAME,
            Self::ListTasks => ListTasksTool::NAME,
            Self::CreateTask => CreateTaskTool::NAME,
            Self::UpdateTask => UpdateTaskTool::NAME,
            Self::GetTaskStats => GetTaskStatsTool::NAME,
            Self::Whoami => WhoamiTool::NAME,
        }
    }

    /// Look a tool up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    /// Catalogue entry for this tool.
    pub fn descriptor(self) -> Tool {
        match self {
            Self::ListCanvases => ListCanvasesTool::to_tool(),
            Self::GetCanvas => GetCanvasTool::to_tool(),
            Self::CreateCanvas => CreateCanvasTool::to_tool(),
            Self::ListNodes => ListNodesTool::to_tool(),
            Self::CreateNode => CreateNodeTool::to_tool(),
            Self::UpdateNode => UpdateNodeTool::to_tool(),
            Self::DeleteNode => DeleteNodeTool::to_tool(),
            Self::ConnectNodes => ConnectNodesTool::to_tool(),
            Self::DeleteConnection => DeleteConnectionTool::to_tool(),
            Self::CreateOkrStructure => CreateOkrStructureTool::to_tool(),
            Self::ListTasks => ListTasksTool::to_tool(),
            Self::CreateTask => CreateTaskTool::to_tool(),
            Self::UpdateTask => UpdateTaskTool::to_tool(),
            Self::GetTaskStats => GetTaskStatsTool::to_tool(),
            Self::Whoami => WhoamiTool::to_tool(),
        }
    }
}

static CATALOGUE: LazyLock<Vec<Tool>> =
    LazyLock::new(|| ToolName::ALL.into_iter().map(ToolName::descriptor).collect());

/// Tool registry - the static tool catalogue.
pub struct ToolRegistry;

impl ToolRegistry {
    /// All tool descriptors, in catalogue order.
    ///
    /// This is the single source of truth for tool metadata; both STDIO and
    /// HTTP transports serve it.
    pub fn list() -> &'static [Tool] {
        &CATALOGUE
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        ToolName::ALL.into_iter().map(ToolName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 15);
        for expected in [
            "list_canvases",
            "get_canvas",
            "create_canvas",
            "list_nodes",
            "create_node",
            "update_node",
            "delete_node",
            "connect_nodes",
            "delete_connection",
            "create_okr_structure",
            "list_tasks",
            "create_task",
            "update_task",
            "get_task_stats",
            "whoami",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_names_are_unique_and_round_trip() {
        let unique: HashSet<_> = ToolRegistry::tool_names().into_iter().collect();
        assert_eq!(unique.len(), ToolName::ALL.len());

        for tool in ToolName::ALL {
            assert_eq!(ToolName::from_name(tool.as_str()), Some(tool));
        }
        assert_eq!(ToolName::from_name("drop_database"), None);
    }

    #[test]
    fn test_catalogue_matches_names_and_is_stable() {
        let first = ToolRegistry::list();
        let second = ToolRegistry::list();
        assert!(std::ptr::eq(first, second));

        let listed: Vec<_> = first.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(listed, ToolRegistry::tool_names());
    }

    #[test]
    fn test_required_fields_in_schema() {
        let create_task = ToolName::CreateTask.descriptor();
        let required = create_task.input_schema["required"].as_array().unwrap();
        assert_eq!(required, &vec![serde_json::json!("title")]);

        let okr = ToolName::CreateOkrStructure.descriptor();
        let required: HashSet<_> = okr.input_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            required,
            HashSet::from(["canvas_id", "problem", "objective", "key_results"])
        );
    }

    #[test]
    fn test_priority_enum_in_schema() {
        let tool = ToolName::CreateTask.descriptor();
        let priority = &tool.input_schema["properties"]["priority"];
        assert_eq!(
            priority["enum"],
            serde_json::json!(["low", "medium", "high", "urgent"])
        );
    }

    #[test]
    fn test_every_tool_has_description() {
        for tool in ToolRegistry::list() {
            assert!(tool.description.as_deref().is_some_and(|d| !d.is_empty()));
        }
    }
}
