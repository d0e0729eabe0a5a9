//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → Frame → stdout
//! ```

use std::io::Write;

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let output = render_to_string(state, rows, cols);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        tracing::warn!(error = %e, "failed to write frame");
    }
}

/// Renders the plugin UI into an ANSI string without touching stdout.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    render_viewmodel(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}

fn render_viewmodel(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(detail) = &vm.detail {
        components::render_detail_mode(frame, vm, detail, theme, cols, rows);
    } else {
        components::render_list_mode(frame, vm, theme, cols, rows);
    }
}
