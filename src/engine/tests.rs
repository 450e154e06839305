use super::*;
use crate::draw::{AnnotationKind, Shape};
use crate::input::MouseButton;
use ::image::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::rc::Rc;

const RED_PIXEL: u32 = 0xffff0000;
const WHITE_PIXEL: u32 = 0xffffffff;

struct SolidLoader {
    width: u32,
    height: u32,
}

impl ImageLoader for SolidLoader {
    fn load(&self, _location: &str) -> Result<RgbaImage, ImageError> {
        Ok(RgbaImage::from_pixel(
            self.width,
            self.height,
            Rgba([255, 255, 255, 255]),
        ))
    }
}

struct FailingLoader;

impl ImageLoader for FailingLoader {
    fn load(&self, location: &str) -> Result<RgbaImage, ImageError> {
        Err(ImageError::InvalidLocation(location.to_string()))
    }
}

fn create_engine(options: EngineOptions) -> AnnotationEngine {
    AnnotationEngine::new(options, &Config::default())
}

/// A ready engine over a 100x50 white image shown at natural size.
fn ready_engine() -> AnnotationEngine {
    let mut engine = create_engine(EngineOptions {
        image_url: "scan.png".to_string(),
        ..Default::default()
    });
    engine.resize_container(100.0, 50.0);
    engine.load_image(&SolidLoader {
        width: 100,
        height: 50,
    });
    engine
}

fn pointer(engine: &mut AnnotationEngine, kind: PointerEventKind, x: f64, y: f64) {
    engine.handle_pointer(PointerEvent::new(kind, x, y));
}

fn drag(engine: &mut AnnotationEngine, from: (f64, f64), to: (f64, f64)) {
    pointer(engine, PointerEventKind::Down, from.0, from.1);
    pointer(engine, PointerEventKind::Move, to.0, to.1);
    pointer(engine, PointerEventKind::Up, to.0, to.1);
}

fn canvas_pixel(engine: &AnnotationEngine, x: usize, y: usize) -> u32 {
    let canvas = engine.canvas().expect("canvas exists");
    let stride = canvas.stride() as usize;
    let mut word = 0;
    canvas
        .with_data(|data| {
            let offset = y * stride + x * 4;
            word = u32::from_ne_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
        })
        .unwrap();
    word
}

#[test]
fn input_is_ignored_until_image_ready() {
    let mut engine = create_engine(EngineOptions::default());
    engine.resize_container(100.0, 100.0);
    drag(&mut engine, (10.0, 10.0), (20.0, 20.0));

    assert!(!engine.is_ready());
    assert!(engine.annotations().is_empty());
    assert!(engine.canvas().is_none());
    assert!(matches!(
        engine.to_raster_buffer(),
        Err(ExportError::NotReady)
    ));
}

#[test]
fn canvas_fits_container_without_upscaling() {
    let mut engine = create_engine(EngineOptions::default());
    engine.resize_container(40.0, 40.0);
    engine.load_image(&SolidLoader {
        width: 100,
        height: 50,
    });
    assert_eq!(engine.canvas_size().width, 40);
    assert_eq!(engine.canvas_size().height, 20);

    engine.resize_container(1000.0, 1000.0);
    assert_eq!(engine.canvas_size().width, 100);
    assert_eq!(engine.canvas_size().height, 50);
    assert_eq!(engine.canvas().unwrap().width(), 100);
}

#[test]
fn container_option_sizes_canvas_on_decode() {
    let mut engine = create_engine(EngineOptions {
        image_url: "scan.png".to_string(),
        container: Some((50.0, 50.0)),
        ..Default::default()
    });
    engine.load_image(&SolidLoader {
        width: 100,
        height: 50,
    });

    assert_eq!(engine.image_url(), "scan.png");
    assert_eq!(engine.canvas_size().width, 50);
    assert_eq!(engine.canvas_size().height, 25);
    let download = engine.download("scan").unwrap();
    let decoded = ::image::load_from_memory(&download.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 25));
}

#[test]
fn zero_container_drops_canvas() {
    let mut engine = ready_engine();
    engine.resize_container(0.0, 0.0);
    assert!(engine.canvas().is_none());
    assert!(engine.canvas_size().is_empty());
    assert!(matches!(
        engine.to_raster_buffer(),
        Err(ExportError::EmptyCanvas)
    ));
}

#[test]
fn resize_does_not_rescale_annotations() {
    let mut engine = ready_engine();
    engine.select_tool(Tool::Rectangle);
    drag(&mut engine, (10.0, 10.0), (30.0, 30.0));
    let before = engine.annotations().to_vec();

    engine.resize_container(50.0, 25.0);
    assert_eq!(engine.annotations(), before.as_slice());
}

#[test]
fn image_error_is_reported_once() {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let mut engine = create_engine(EngineOptions {
        image_url: "missing.png".to_string(),
        on_image_error: Some(Box::new(move |err: &ImageError| {
            sink.borrow_mut().push(err.to_string());
        })),
        ..Default::default()
    });

    engine.load_image(&FailingLoader);
    engine.load_image(&FailingLoader);

    assert_eq!(errors.borrow().len(), 1);
    assert!(errors.borrow()[0].contains("missing.png"));
    assert!(matches!(engine.image_state(), ImageState::Failed(_)));

    drag(&mut engine, (1.0, 1.0), (5.0, 5.0));
    assert!(engine.annotations().is_empty());
}

#[test]
fn pointer_coordinates_are_canvas_local() {
    let mut engine = ready_engine();
    engine.set_canvas_origin(100.0, 200.0);
    engine.select_tool(Tool::Arrow);
    drag(&mut engine, (110.0, 210.0), (150.0, 240.0));

    assert_eq!(
        engine.annotations()[0].shape,
        Shape::Arrow {
            start: Point::new(10.0, 10.0),
            end: Point::new(50.0, 40.0),
        }
    );
}

#[test]
fn arrow_scenario_then_undo() {
    let mut engine = ready_engine();
    engine.select_tool(Tool::Arrow);
    engine.set_color("blue".parse().unwrap());
    engine.set_line_width(4);
    drag(&mut engine, (10.0, 10.0), (50.0, 40.0));

    assert_eq!(engine.annotations().len(), 1);
    let arrow = &engine.annotations()[0];
    assert_eq!(arrow.kind(), AnnotationKind::Arrow);
    assert_eq!(arrow.color, crate::draw::BLUE);
    assert_eq!(arrow.line_width, 4);

    engine.undo();
    assert!(engine.annotations().is_empty());
}

#[test]
fn leave_commits_like_up() {
    let mut engine = ready_engine();
    engine.select_tool(Tool::Rectangle);
    pointer(&mut engine, PointerEventKind::Down, 5.0, 5.0);
    pointer(&mut engine, PointerEventKind::Move, 25.0, 15.0);
    pointer(&mut engine, PointerEventKind::Leave, 200.0, 200.0);

    assert!(engine.in_progress().is_none());
    assert_eq!(
        engine.annotations()[0].shape,
        Shape::Rectangle {
            start: Point::new(5.0, 5.0),
            end: Point::new(25.0, 15.0),
        }
    );
}

#[test]
fn right_button_cancels_drag() {
    let mut engine = ready_engine();
    pointer(&mut engine, PointerEventKind::Down, 5.0, 5.0);
    pointer(&mut engine, PointerEventKind::Move, 25.0, 15.0);
    engine.handle_pointer(PointerEvent {
        kind: PointerEventKind::Down,
        button: MouseButton::Right,
        client_x: 25.0,
        client_y: 15.0,
    });
    pointer(&mut engine, PointerEventKind::Up, 25.0, 15.0);

    assert!(engine.annotations().is_empty());
}

#[test]
fn canvas_shows_committed_and_in_progress_annotations() {
    let mut engine = ready_engine();
    assert_eq!(canvas_pixel(&engine, 10, 20), WHITE_PIXEL);

    engine.select_tool(Tool::Rectangle);
    engine.set_line_width(4);
    pointer(&mut engine, PointerEventKind::Down, 10.0, 10.0);
    pointer(&mut engine, PointerEventKind::Move, 30.0, 30.0);
    assert_eq!(canvas_pixel(&engine, 10, 20), RED_PIXEL);

    pointer(&mut engine, PointerEventKind::Up, 30.0, 30.0);
    assert_eq!(canvas_pixel(&engine, 10, 20), RED_PIXEL);

    engine.undo();
    assert_eq!(canvas_pixel(&engine, 10, 20), WHITE_PIXEL);
}

#[test]
fn raster_excludes_in_progress_gesture() {
    let mut engine = ready_engine();
    let empty = engine.to_raster_buffer().unwrap();

    engine.select_tool(Tool::Rectangle);
    pointer(&mut engine, PointerEventKind::Down, 10.0, 10.0);
    pointer(&mut engine, PointerEventKind::Move, 30.0, 30.0);
    assert!(engine.in_progress().is_some());

    assert_eq!(engine.to_raster_buffer().unwrap(), empty);
}

#[test]
fn raster_contains_committed_annotations() {
    let mut engine = ready_engine();
    engine.select_tool(Tool::Rectangle);
    engine.set_line_width(4);
    drag(&mut engine, (10.0, 10.0), (30.0, 30.0));

    let png = engine.to_raster_buffer().unwrap();
    let decoded = ::image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (100, 50));
    assert_eq!(decoded.get_pixel(10, 20), &Rgba([255, 0, 0, 255]));
    assert_eq!(decoded.get_pixel(20, 20), &Rgba([255, 255, 255, 255]));
}

#[test]
fn save_hands_annotations_and_png_to_callback() {
    let saved: Rc<RefCell<Option<(usize, Vec<u8>)>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&saved);
    let mut engine = create_engine(EngineOptions {
        image_url: "scan.png".to_string(),
        on_save: Some(Box::new(move |annotations: &[Annotation], png: &[u8]| {
            *sink.borrow_mut() = Some((annotations.len(), png.to_vec()));
        })),
        ..Default::default()
    });
    engine.resize_container(100.0, 50.0);
    engine.load_image(&SolidLoader {
        width: 100,
        height: 50,
    });
    drag(&mut engine, (10.0, 10.0), (40.0, 40.0));

    engine.save().unwrap();

    let saved = saved.borrow();
    let (count, png) = saved.as_ref().expect("callback invoked");
    assert_eq!(*count, 1);
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn save_without_callback_is_ok() {
    let mut engine = ready_engine();
    assert!(engine.save().is_ok());
}

#[test]
fn download_names_png_files() {
    let engine = ready_engine();

    let named = engine.download("knee-scan").unwrap();
    assert_eq!(named.filename, "knee-scan.png");
    assert_eq!(&named.bytes[1..4], b"PNG");

    let unnamed = engine.download("").unwrap();
    assert!(unnamed.filename.starts_with("annotated_"));
    assert!(unnamed.filename.ends_with(".png"));
}

#[test]
fn text_flow_through_engine() {
    let mut engine = ready_engine();
    engine.select_tool(Tool::Text);
    pointer(&mut engine, PointerEventKind::Down, 20.0, 30.0);
    assert!(engine.text_entry().is_some());

    for c in "ACL".chars() {
        engine.handle_key(Key::Char(c));
    }
    engine.handle_key(Key::Return);

    assert!(engine.text_entry().is_none());
    assert_eq!(engine.annotations()[0].text(), Some("ACL"));
}

#[test]
fn set_text_and_confirm() {
    let mut engine = ready_engine();
    engine.select_tool(Tool::Text);
    pointer(&mut engine, PointerEventKind::Down, 20.0, 30.0);
    engine.set_text("   ");
    assert!(engine.confirm_text().is_none());
    assert!(engine.annotations().is_empty());

    pointer(&mut engine, PointerEventKind::Down, 20.0, 30.0);
    engine.set_text("graft");
    engine.cancel_text();
    assert!(engine.annotations().is_empty());

    pointer(&mut engine, PointerEventKind::Down, 20.0, 30.0);
    engine.set_text("graft");
    let id = engine.confirm_text();
    assert_eq!(engine.annotations()[0].id, id.unwrap());
}

#[test]
fn read_only_session_displays_but_does_not_edit() {
    let seeded = Annotation::new(
        7,
        Shape::Circle {
            center: Point::new(50.0, 25.0),
            edge: Point::new(60.0, 25.0),
        },
        crate::draw::GREEN,
        2,
    );
    let mut engine = create_engine(EngineOptions {
        image_url: "scan.png".to_string(),
        initial_annotations: vec![seeded.clone()],
        read_only: true,
        ..Default::default()
    });
    engine.resize_container(100.0, 50.0);
    engine.load_image(&SolidLoader {
        width: 100,
        height: 50,
    });

    drag(&mut engine, (1.0, 1.0), (9.0, 9.0));
    engine.undo();
    engine.clear();

    assert!(engine.is_read_only());
    assert_eq!(engine.annotations(), &[seeded]);
    assert!(engine.download("view").is_ok());
}

#[test]
fn config_defaults_seed_the_tool_session() {
    let engine = ready_engine();
    assert_eq!(engine.current_tool(), Tool::Freehand);
    assert_eq!(engine.current_color(), Color::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(engine.current_line_width(), 3);
}
