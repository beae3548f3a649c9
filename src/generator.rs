#![forbid(unsafe_code)]

//! Xcode workspace generation
//!
//! Produces `<name>.xcworkspace/contents.xcworkspacedata` for a project
//! manifest. The workspace references the project's `.xcodeproj` bundle and
//! the manifest itself so it shows up in Xcode's navigator.

use crate::manifest::{MANIFEST_FILE_NAME, Project};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

const WORKSPACE_DATA_FILE: &str = "contents.xcworkspacedata";

/// Outcome of a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWorkspace {
    /// Path of the `.xcworkspace` bundle
    pub path: PathBuf,
}

/// Generates Xcode workspaces from project manifests
pub struct WorkspaceGenerator;

impl WorkspaceGenerator {
    pub fn new() -> Self {
        WorkspaceGenerator
    }

    /// Workspace bundle path for `project` inside `dir`
    pub fn workspace_path(dir: &Path, project: &Project) -> PathBuf {
        dir.join(format!("{}.xcworkspace", project.name))
    }

    /// File references the workspace lists, relative to the project directory
    pub fn file_refs(&self, project: &Project) -> Vec<String> {
        vec![
            format!("{}.xcodeproj", project.name),
            MANIFEST_FILE_NAME.to_string(),
        ]
    }

    /// Renders the `contents.xcworkspacedata` XML
    pub fn render(&self, project: &Project) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        output.push_str("<Workspace\n   version = \"1.0\">\n");

        for file_ref in self.file_refs(project) {
            let _ = write!(
                output,
                "   <FileRef\n      location = \"group:{}\">\n   </FileRef>\n",
                escape_xml(&file_ref)
            );
        }

        output.push_str("</Workspace>\n");
        output
    }

    /// Writes the workspace for `project` into `dir`, replacing an existing one
    pub fn generate(&self, dir: &Path, project: &Project) -> io::Result<GeneratedWorkspace> {
        let path = Self::workspace_path(dir, project);
        std::fs::create_dir_all(&path)?;

        let data_path = path.join(WORKSPACE_DATA_FILE);
        std::fs::write(&data_path, self.render(project))?;
        log::info!("wrote {}", data_path.display());

        Ok(GeneratedWorkspace { path })
    }
}

impl Default for WorkspaceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
