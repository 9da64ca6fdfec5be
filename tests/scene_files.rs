use std::path::PathBuf;

use figure_poser::{BackgroundMode, Editor, EditorError, ExportFormat, FigureField};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("figure_poser_{}_{name}", std::process::id()))
}

#[test]
fn test_save_and_load_scene() {
    let path = temp_path("roundtrip.json");
    let mut editor = Editor::new();
    let id = editor.selected_id().unwrap();
    editor.set_figure_field(id, FigureField::Scale(1.5)).unwrap();
    editor.set_figure_field(id, FigureField::GlobalOutline(true)).unwrap();
    editor.set_background(BackgroundMode::Transparent);
    editor.set_canvas_size(1024, 600).unwrap();
    editor.add_figure().unwrap();
    editor.save_scene(&path).unwrap();

    let mut loaded = Editor::new();
    loaded.load_scene(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let scene = loaded.scene();
    assert_eq!((scene.canvas_width(), scene.canvas_height()), (1024, 600));
    assert_eq!(scene.background, BackgroundMode::Transparent);
    assert_eq!(scene.figures().len(), 2);
    let first = &scene.figures()[0];
    assert!((first.scale() - 1.5).abs() < 0.001);
    assert!(first.global_outline);
    // Loading starts a fresh history
    assert_eq!(loaded.history().len(), 1);
}

#[test]
fn test_save_writes_last_committed_state() {
    let path = temp_path("committed.json");
    let mut editor = Editor::new();
    let id = editor.selected_id().unwrap();
    editor.set_figure_field(id, FigureField::Rotation(90.0)).unwrap();
    editor.save_scene(&path).unwrap();

    let mut loaded = Editor::new();
    loaded.load_scene(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.selected_figure().unwrap().rotation, 0.0);
}

#[test]
fn test_failed_load_keeps_scene() {
    let path = temp_path("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut editor = Editor::new();
    editor.add_figure().unwrap();
    let before = editor.scene().figures().to_vec();

    assert!(matches!(editor.load_scene(&path), Err(EditorError::Load(_))));
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(
        editor.load_scene(temp_path("missing.json")),
        Err(EditorError::Load(_))
    ));

    assert_eq!(editor.scene().figures(), &before[..]);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_load_snake_case_scene_file() {
    let json = r##"{
        "canvas_width": 640,
        "canvas_height": 480,
        "background_mode": "white",
        "characters": [{
            "x": 320, "y": 240, "scale": 1.0, "rotation": 10,
            "color": "#FF0000", "outline_width": 6,
            "joints": {
                "limb_0_mid": [-68, 40], "limb_0_end": [-68, 75],
                "limb_1_mid": [67, 40], "limb_1_end": [67, 75],
                "limb_2_mid": [-20, 70], "limb_2_end": [-20, 115],
                "limb_3_mid": [20, 70], "limb_3_end": [20, 115]
            }
        }]
    }"##;
    let mut editor = Editor::new();
    editor.load_scene_json(json).unwrap();

    let figure = editor.selected_figure().unwrap();
    assert_eq!(figure.color, egui::Color32::from_rgb(255, 0, 0));
    assert!((figure.limb_width() - 28.0).abs() < 0.001);
    assert!((figure.left_arm.width - 28.0).abs() < 0.001);
    assert!((figure.left_arm.mid_length - 35.0).abs() < 0.001);
    assert_eq!(editor.scene().canvas_width(), 640);
}

#[test]
fn test_export_after_load() {
    let scene_path = temp_path("to_export.json");
    let image_path = temp_path("export.png");
    let mut source = Editor::new();
    source.set_canvas_size(640, 480).unwrap();
    source.set_background(BackgroundMode::Transparent);
    source.save_scene(&scene_path).unwrap();

    let mut editor = Editor::new();
    editor.load_scene(&scene_path).unwrap();
    figure_poser::export::export_scene(editor.scene(), &image_path, ExportFormat::Png).unwrap();
    let image = image::open(&image_path).unwrap().to_rgba8();
    std::fs::remove_file(&scene_path).unwrap();
    std::fs::remove_file(&image_path).unwrap();

    assert_eq!(image.dimensions(), (640, 480));
    assert_eq!(image.get_pixel(0, 0).0[3], 0);
    // The figure is painted onto the loaded canvas
    let figure = &editor.scene().figures()[0];
    let head = figure.head_center();
    assert_eq!(image.get_pixel(head.x as u32, head.y as u32).0[3], 255);
}
