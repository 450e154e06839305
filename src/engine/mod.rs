//! The annotation session: one image, its canvas, and the tool state editing it.
//!
//! [`AnnotationEngine`] owns everything an editing session needs: the decoded
//! source image, the fit-to-container canvas geometry and surface, and the
//! [`InputState`] that turns pointer and key events into annotations. Hosts
//! drive it through the action methods and read results back through
//! [`AnnotationEngine::save`], [`AnnotationEngine::download`] and
//! [`AnnotationEngine::canvas`].

pub mod loader;

#[cfg(test)]
mod tests;

pub use loader::{FileImageLoader, ImageError, ImageLoader, ImageState};

use crate::config::Config;
use crate::draw::{Annotation, AnnotationId, Color, RenderStyle, SourceImage, render_scene};
use crate::export::{self, Download, ExportError};
use crate::geometry::{CanvasSize, Point, compute_canvas_size};
use crate::input::{InputState, Key, PointerEvent, PointerEventKind, TextEntry, Tool};
use log::{debug, info, warn};

/// Called with the committed annotations and the flattened PNG on save.
pub type SaveCallback = Box<dyn FnMut(&[Annotation], &[u8])>;
/// Called once if the source image cannot be loaded.
pub type ImageErrorCallback = Box<dyn FnMut(&ImageError)>;

/// Host-supplied construction options.
#[derive(Default)]
pub struct EngineOptions {
    /// Location of the source image (path or URL understood by the loader)
    pub image_url: String,
    /// Annotations to start with, in paint order
    pub initial_annotations: Vec<Annotation>,
    pub on_save: Option<SaveCallback>,
    pub on_image_error: Option<ImageErrorCallback>,
    /// Display-only session: drawing, undo and clear are disabled
    pub read_only: bool,
    /// Initial container size, so the canvas is sized as soon as the image decodes
    pub container: Option<(f64, f64)>,
}

/// One editing session over a single image.
pub struct AnnotationEngine {
    image_url: String,
    image: ImageState,
    container: (f64, f64),
    canvas_size: CanvasSize,
    canvas: Option<cairo::ImageSurface>,
    canvas_origin: Point,
    input: InputState,
    style: RenderStyle,
    filename_template: String,
    on_save: Option<SaveCallback>,
    on_image_error: Option<ImageErrorCallback>,
}

impl AnnotationEngine {
    /// Creates a session waiting for its image to decode.
    pub fn new(options: EngineOptions, config: &Config) -> Self {
        let EngineOptions {
            image_url,
            initial_annotations,
            on_save,
            on_image_error,
            read_only,
            container,
        } = options;

        info!(
            "Starting annotation session for {} ({} initial annotations{})",
            image_url,
            initial_annotations.len(),
            if read_only { ", read-only" } else { "" }
        );

        let input = InputState::with_defaults(
            config.drawing.default_color.to_color(),
            config.drawing.default_line_width,
            config.drawing.max_line_width,
            config.performance.max_annotations,
            read_only,
            initial_annotations,
        );

        Self {
            image_url,
            image: ImageState::Loading,
            container: container.unwrap_or((0.0, 0.0)),
            canvas_size: CanvasSize::ZERO,
            canvas: None,
            canvas_origin: Point::default(),
            input,
            style: RenderStyle::from_config(config),
            filename_template: config.export.filename_template.clone(),
            on_save,
            on_image_error,
        }
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Loads and decodes the source image with `loader`, then resolves the
    /// readiness gate.
    pub fn load_image(&mut self, loader: &dyn ImageLoader) {
        let result = loader
            .load(&self.image_url)
            .and_then(|rgba| SourceImage::from_rgba(&rgba).map_err(ImageError::from));
        self.on_image_decoded(result);
    }

    /// Resolves the image state. Only the first call has any effect.
    pub fn on_image_decoded(&mut self, result: Result<SourceImage, ImageError>) {
        if !matches!(self.image, ImageState::Loading) {
            debug!("Ignoring repeated image decode result");
            return;
        }

        match result {
            Ok(image) => {
                info!(
                    "Image ready: {}x{} from {}",
                    image.width(),
                    image.height(),
                    self.image_url
                );
                self.image = ImageState::Ready(image);
                self.recompute_geometry();
            }
            Err(err) => {
                warn!("Failed to load image {}: {}", self.image_url, err);
                if let Some(callback) = self.on_image_error.as_mut() {
                    callback(&err);
                }
                self.image = ImageState::Failed(err);
            }
        }
    }

    pub fn image_state(&self) -> &ImageState {
        &self.image
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.image, ImageState::Ready(_))
    }

    /// Natural dimensions of the decoded image.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image
            .source()
            .map(|image| (image.width(), image.height()))
    }

    /// Records new container dimensions and refits the canvas.
    pub fn resize_container(&mut self, width: f64, height: f64) {
        self.container = (width, height);
        if self.is_ready() {
            self.recompute_geometry();
        }
    }

    /// Sets where the canvas sits in client coordinates.
    pub fn set_canvas_origin(&mut self, x: f64, y: f64) {
        self.canvas_origin = Point::new(x, y);
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// The on-screen canvas, including any in-progress gesture.
    pub fn canvas(&self) -> Option<&cairo::ImageSurface> {
        self.canvas.as_ref()
    }

    fn recompute_geometry(&mut self) {
        let Some((natural_w, natural_h)) = self.natural_size() else {
            return;
        };

        let size = compute_canvas_size(natural_w, natural_h, self.container.0, self.container.1);
        debug!(
            "Canvas geometry: {}x{} at scale {:.3} (container {:.0}x{:.0})",
            size.width, size.height, size.scale, self.container.0, self.container.1
        );

        if size != self.canvas_size || (self.canvas.is_none() && !size.is_empty()) {
            self.canvas = if size.is_empty() {
                None
            } else {
                match cairo::ImageSurface::create(
                    cairo::Format::ARgb32,
                    size.width as i32,
                    size.height as i32,
                ) {
                    Ok(surface) => Some(surface),
                    Err(err) => {
                        warn!("Failed to create {}x{} canvas: {}", size.width, size.height, err);
                        None
                    }
                }
            };
            self.canvas_size = size;
        }

        self.input.needs_redraw = true;
        self.refresh();
    }

    /// Forwards a pointer event in client coordinates to the tool state machine.
    ///
    /// `Leave` is handled exactly like `Up`. Ignored until the image is ready.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.is_ready() {
            debug!("Ignoring pointer event before image is ready");
            return;
        }

        let x = event.client_x - self.canvas_origin.x;
        let y = event.client_y - self.canvas_origin.y;

        match event.kind {
            PointerEventKind::Down => self.input.on_mouse_press(event.button, x, y),
            PointerEventKind::Move => self.input.on_mouse_motion(x, y),
            PointerEventKind::Up => self.input.on_mouse_release(event.button),
            PointerEventKind::Leave => self.input.on_mouse_leave(),
        }
        self.refresh();
    }

    /// Forwards a key press to the text overlay.
    pub fn handle_key(&mut self, key: Key) {
        if !self.is_ready() {
            return;
        }
        self.input.on_key_press(key);
        self.refresh();
    }

    pub fn set_text(&mut self, text: &str) {
        self.input.set_text(text);
        self.refresh();
    }

    /// Commits the pending text entry; returns the new annotation's id.
    pub fn confirm_text(&mut self) -> Option<AnnotationId> {
        let id = self.input.confirm_text();
        self.refresh();
        id
    }

    pub fn cancel_text(&mut self) {
        self.input.cancel_text();
        self.refresh();
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.input.select_tool(tool);
        self.refresh();
    }

    pub fn set_color(&mut self, color: Color) {
        self.input.set_color(color);
    }

    pub fn set_line_width(&mut self, line_width: u32) {
        self.input.set_line_width(line_width);
    }

    pub fn undo(&mut self) -> Option<Annotation> {
        let removed = self.input.undo();
        self.refresh();
        removed
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.refresh();
    }

    pub fn current_tool(&self) -> Tool {
        self.input.current_tool
    }

    pub fn current_color(&self) -> Color {
        self.input.current_color
    }

    pub fn current_line_width(&self) -> u32 {
        self.input.current_line_width
    }

    pub fn is_read_only(&self) -> bool {
        self.input.read_only
    }

    /// Committed annotations in paint order.
    pub fn annotations(&self) -> &[Annotation] {
        self.input.annotations.as_slice()
    }

    /// The annotation currently being dragged out, if any.
    pub fn in_progress(&self) -> Option<&Annotation> {
        self.input.in_progress()
    }

    pub fn text_entry(&self) -> Option<&TextEntry> {
        self.input.text_entry()
    }

    /// Repaints the canvas from scratch.
    pub fn render(&mut self) {
        let (Some(canvas), Some(image)) = (self.canvas.as_ref(), self.image.source()) else {
            return;
        };

        match cairo::Context::new(canvas) {
            Ok(ctx) => {
                render_scene(
                    &ctx,
                    Some(image),
                    self.canvas_size,
                    self.input.annotations.as_slice(),
                    self.input.in_progress(),
                    &self.style,
                );
                drop(ctx);
                canvas.flush();
            }
            Err(err) => warn!("Failed to create drawing context: {}", err),
        }
        self.input.needs_redraw = false;
    }

    fn refresh(&mut self) {
        if self.input.needs_redraw {
            self.render();
        }
    }

    /// Flattens the image and committed annotations into PNG bytes.
    pub fn to_raster_buffer(&self) -> Result<Vec<u8>, ExportError> {
        let image = self.image.source().ok_or(ExportError::NotReady)?;
        let surface = export::flatten(
            image,
            self.canvas_size,
            self.input.annotations.as_slice(),
            &self.style,
        )?;
        export::encode_png(&surface)
    }

    /// Hands the annotations and flattened raster to the `on_save` callback.
    pub fn save(&mut self) -> Result<(), ExportError> {
        let bytes = self.to_raster_buffer()?;
        let annotations = self.input.annotations.as_slice();

        match self.on_save.as_mut() {
            Some(callback) => {
                info!(
                    "Saving {} annotation(s) with {} byte raster",
                    annotations.len(),
                    bytes.len()
                );
                callback(annotations, &bytes);
            }
            None => debug!("Save requested without a save callback"),
        }
        Ok(())
    }

    /// Produces a PNG download. Blank names get a timestamped default.
    pub fn download(&self, filename: &str) -> Result<Download, ExportError> {
        let bytes = self.to_raster_buffer()?;
        let filename = export::file::normalize_filename(filename, &self.filename_template);
        info!("Prepared download {} ({} bytes)", filename, bytes.len());
        Ok(Download { filename, bytes })
    }
}
