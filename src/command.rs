use crate::serialize::CopyMode;

/// User actions that trigger a copy.
///
/// Accepts both the keyboard shortcut names and the context menu ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyCommand {
    Copy,
    CopyFlipped,
}

impl CopyCommand {
    pub const ALL: [CopyCommand; 2] = [CopyCommand::Copy, CopyCommand::CopyFlipped];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "copy-table-data" | "copyTableData" => Some(CopyCommand::Copy),
            "copy-table-data-flipped" | "copyTableDataFlipped" => Some(CopyCommand::CopyFlipped),
            _ => None,
        }
    }

    pub fn mode(&self) -> CopyMode {
        match self {
            CopyCommand::Copy => CopyMode::Normal,
            CopyCommand::CopyFlipped => CopyMode::Transposed,
        }
    }

    /// Menu title shown for the command
    pub fn title(&self) -> &'static str {
        match self {
            CopyCommand::Copy => "Copy Table Data",
            CopyCommand::CopyFlipped => "Copy Table Data Flipped",
        }
    }

    /// Shortcut name, as accepted by `parse`
    pub fn name(&self) -> &'static str {
        match self {
            CopyCommand::Copy => "copy-table-data",
            CopyCommand::CopyFlipped => "copy-table-data-flipped",
        }
    }

    pub fn default_shortcut(&self) -> &'static str {
        match self {
            CopyCommand::Copy => "Ctrl+Shift+C",
            CopyCommand::CopyFlipped => "Ctrl+Shift+F",
        }
    }

    /// One line of the command listing in `--help`
    pub fn help_line(&self) -> String {
        format!("{:<28} {:<24} ({})", self.name(), self.title(), self.default_shortcut())
    }
}
