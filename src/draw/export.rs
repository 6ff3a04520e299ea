//! Raster snapshot export.
//!
//! Content is fitted into the target size with a uniform scale and centered,
//! then rendered over an opaque white background and encoded as PNG.

use super::color::WHITE;
use super::render::{render_background, render_shapes};
use super::scene::content_bounds;
use super::shape::Shape;
use crate::error::EditorError;
use crate::util::Rect;
use std::fs;
use std::path::Path;

/// Uniform scale followed by a translation, mapping scene space to image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

/// Computes the transform that fits `content` into a `target_w` x `target_h` image.
///
/// When the scene has no bounds the canvas size stands in for the content and
/// the canvas origin is used. A content box with a non-positive side falls back
/// to the canvas dimension (at least 1) on that axis.
pub fn fit_transform(
    content: Option<Rect>,
    canvas_width: f64,
    canvas_height: f64,
    target_w: f64,
    target_h: f64,
) -> ExportTransform {
    let canvas_w = canvas_width.max(1.0);
    let canvas_h = canvas_height.max(1.0);
    let (origin_x, origin_y, content_w, content_h) = match content {
        Some(r) => (
            r.x,
            r.y,
            if r.width > 0.0 { r.width } else { canvas_w },
            if r.height > 0.0 { r.height } else { canvas_h },
        ),
        None => (0.0, 0.0, canvas_w, canvas_h),
    };

    let scale = (target_w / content_w).min(target_h / content_h);
    ExportTransform {
        scale,
        tx: -origin_x * scale + (target_w - content_w * scale) / 2.0,
        ty: -origin_y * scale + (target_h - content_h * scale) / 2.0,
    }
}

/// Renders `shapes` into a `width` x `height` PNG.
///
/// `canvas_size` is the fallback content size for an empty scene.
pub fn render_to_png(
    shapes: &[Shape],
    canvas_size: (f64, f64),
    width: i32,
    height: i32,
) -> Result<Vec<u8>, EditorError> {
    if width <= 0 || height <= 0 {
        return Err(EditorError::InvalidSize { width, height });
    }

    let transform = fit_transform(
        content_bounds(shapes),
        canvas_size.0,
        canvas_size.1,
        width as f64,
        height as f64,
    );
    log::debug!(
        "Exporting {} shapes at {}x{} (scale {:.3}, offset {:.1},{:.1})",
        shapes.len(),
        width,
        height,
        transform.scale,
        transform.tx,
        transform.ty
    );

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .map_err(|e| EditorError::Render(format!("failed to create image surface: {e}")))?;
    {
        let ctx = cairo::Context::new(&surface)
            .map_err(|e| EditorError::Render(format!("failed to create cairo context: {e}")))?;
        render_background(&ctx, WHITE);
        ctx.translate(transform.tx, transform.ty);
        ctx.scale(transform.scale, transform.scale);
        render_shapes(&ctx, shapes);
    }
    surface.flush();

    let mut bytes = Vec::new();
    surface
        .write_to_png(&mut bytes)
        .map_err(|e| EditorError::Render(format!("failed to encode PNG: {e}")))?;
    Ok(bytes)
}

/// Writes encoded image bytes to `path`, creating parent directories.
pub fn write_png_file(path: &Path, bytes: &[u8]) -> Result<(), EditorError> {
    let persistence = |e: std::io::Error| EditorError::Persistence {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(persistence)?;
    }
    fs::write(path, bytes).map_err(persistence)?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
