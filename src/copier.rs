use tracing::{error, info};

use crate::clipboard::ClipboardSink;
use crate::config::SettingsSource;
use crate::error::Result;
use crate::grid::reconstruct;
use crate::selection::{SelectedCell, SelectionState};
use crate::serialize::{serialize, CopyMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Empty selection; nothing was read or written
    NothingSelected,
    Copied { rows: usize, cols: usize, text: String },
}

impl CopyOutcome {
    pub fn message(&self) -> String {
        match self {
            CopyOutcome::NothingSelected => "Nothing selected".to_string(),
            CopyOutcome::Copied { rows, cols, .. } => format!("Copied {}x{}", rows, cols),
        }
    }
}

/// Serialize `cells` with freshly loaded settings and write the result.
///
/// The text is fully built before the sink is touched. Sink failures are
/// logged and returned, never retried.
pub fn copy_selection<S, C>(
    cells: &[SelectedCell],
    settings: &S,
    sink: &mut C,
    mode: CopyMode,
) -> Result<CopyOutcome>
where
    S: SettingsSource + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let Some(grid) = reconstruct(cells) else {
        return Ok(CopyOutcome::NothingSelected);
    };

    let config = settings.load().format_config();
    let text = serialize(&grid, &config, mode);

    let (rows, cols) = match mode {
        CopyMode::Normal => (grid.row_count(), grid.max_cols()),
        CopyMode::Transposed => (grid.max_cols(), grid.row_count()),
    };

    if let Err(e) = sink.write_text(&text) {
        error!(error = %e, "Failed to copy");
        return Err(e);
    }

    info!(
        rows,
        cols,
        delimiter = config.delimiter.name(),
        quoted = config.quote_strings,
        ?mode,
        "selection copied"
    );

    Ok(CopyOutcome::Copied { rows, cols, text })
}

/// Copy the current selection and clear it once the write succeeded.
pub fn copy_and_clear<S, C>(
    state: &mut SelectionState,
    settings: &S,
    sink: &mut C,
    mode: CopyMode,
) -> Result<CopyOutcome>
where
    S: SettingsSource + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let outcome = copy_selection(state.cells(), settings, sink, mode)?;
    if let CopyOutcome::Copied { .. } = outcome {
        state.clear();
    }
    Ok(outcome)
}
