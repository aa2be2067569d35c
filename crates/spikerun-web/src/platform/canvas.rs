use spikerun_engine::core::StartupError;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Resolves `canvas_id` to its 2d rendering context.
///
/// The canvas configuration is left untouched; the simulation owns what is
/// drawn and how.
pub fn acquire_context(
    document: &Document,
    canvas_id: &str,
) -> Result<CanvasRenderingContext2d, StartupError> {
    let not_found = || StartupError::SurfaceNotFound { id: canvas_id.to_owned() };
    let unavailable = || StartupError::SurfaceUnavailable { id: canvas_id.to_owned() };

    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(not_found)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| not_found())?;

    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or_else(unavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| unavailable())
}
