use std::path::Path;

use egui::{Color32, Pos2, Rect};
use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;
use tiny_skia::{
    Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::constants::EXPORT_OUTLINE_WIDTH;
use crate::figure::Figure;
use crate::scene::{BackgroundMode, Scene};

/// Errors that can occur while exporting a scene image
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot allocate a {width}x{height} image")]
    Canvas { width: u32, height: u32 },

    #[error("Failed to encode or write image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }

    /// Only PNG keeps an alpha channel.
    pub fn supports_transparency(self) -> bool {
        self == ExportFormat::Png
    }
}

/// Rasterises the scene at canvas size.
pub fn render_scene(scene: &Scene, format: ExportFormat) -> Result<RgbaImage, ExportError> {
    let (width, height) = (scene.canvas_width(), scene.canvas_height());
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;

    let transparent =
        format.supports_transparency() && scene.background == BackgroundMode::Transparent;
    pixmap.fill(if transparent { Color::TRANSPARENT } else { Color::WHITE });

    for figure in scene.figures() {
        draw_figure(&mut pixmap, figure);
    }
    to_image(&pixmap).ok_or(ExportError::Canvas { width, height })
}

/// Renders the scene and writes it to `path` in the requested format.
pub fn export_scene(
    scene: &Scene,
    path: impl AsRef<Path>,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let rendered = render_scene(scene, format)?;
    match format {
        ExportFormat::Png => rendered.save_with_format(path, format.image_format())?,
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(rendered)
            .to_rgb8()
            .save_with_format(path, format.image_format())?,
    }
    log::info!(
        "Exported {}x{} {} to {}",
        scene.canvas_width(),
        scene.canvas_height(),
        format.extension(),
        path.display()
    );
    Ok(())
}

/// Pixmaps hold premultiplied colour, image buffers straight alpha.
fn to_image(pixmap: &Pixmap) -> Option<RgbaImage> {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Fills a shape and, with an outline, strokes its inner rim. `shape` builds
/// the path inset by the given amount.
fn draw_shape(
    pixmap: &mut Pixmap,
    fill: &Paint<'_>,
    outline: Option<&Paint<'_>>,
    shape: impl Fn(&mut PathBuilder, f32),
) {
    let mut builder = PathBuilder::new();
    shape(&mut builder, 0.0);
    if let Some(path) = builder.finish() {
        pixmap.fill_path(&path, fill, FillRule::Winding, Transform::identity(), None);
    }

    let Some(outline) = outline else {
        return;
    };
    let mut builder = PathBuilder::new();
    shape(&mut builder, EXPORT_OUTLINE_WIDTH / 2.0);
    if let Some(path) = builder.finish() {
        let stroke = Stroke {
            width: EXPORT_OUTLINE_WIDTH,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, outline, &stroke, Transform::identity(), None);
    }
}

fn draw_figure(pixmap: &mut Pixmap, figure: &Figure) {
    let fill = paint_for(figure.color);
    let black = paint_for(Color32::BLACK);
    let outline = figure.global_outline.then_some(&black);
    let scale = figure.scale();

    for (_, limb) in figure.limbs() {
        let start = figure.to_world(limb.start);
        let mid = figure.to_world(limb.mid);
        let end = figure.to_world(limb.end);
        let width = (limb.width * scale).floor();
        let radius = (width / 2.0).floor();

        let mut bones = PathBuilder::new();
        for (a, b) in [(start, mid), (mid, end)] {
            bones.move_to(a.x, a.y);
            bones.line_to(b.x, b.y);
        }
        if let Some(path) = bones.finish() {
            let stroke = Stroke {
                width,
                line_cap: LineCap::Butt,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &fill, &stroke, Transform::identity(), None);
        }

        for center in [start, mid, end] {
            draw_shape(pixmap, &fill, outline, |builder, inset| {
                push_disc(builder, center, radius - inset);
            });
        }
    }

    let body = figure.body_rect();
    let corner = figure
        .body_corner_radius()
        .floor()
        .min(body.width() / 2.0)
        .min(body.height() / 2.0);
    draw_shape(pixmap, &fill, outline, |builder, inset| {
        push_rounded_rect(builder, body.shrink(inset), (corner - inset).max(0.0));
    });

    let head_center = figure.head_center();
    let head_radius = figure.head_radius() * scale;
    draw_shape(pixmap, &fill, outline, |builder, inset| {
        push_disc(builder, head_center, head_radius - inset);
    });
}

fn push_disc(builder: &mut PathBuilder, center: Pos2, radius: f32) {
    if radius > 0.0 {
        builder.push_circle(center.x, center.y, radius);
    }
}

/// Closed rectangle with circular corners, drawn clockwise from the top edge.
fn push_rounded_rect(builder: &mut PathBuilder, rect: Rect, radius: f32) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    // Bezier handle length for a quarter circle
    const KAPPA: f32 = 0.552_284_8;
    let (left, top, right, bottom) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);
    let k = radius * KAPPA;

    builder.move_to(left + radius, top);
    builder.line_to(right - radius, top);
    builder.cubic_to(right - radius + k, top, right, top + radius - k, right, top + radius);
    builder.line_to(right, bottom - radius);
    builder.cubic_to(right, bottom - radius + k, right - radius + k, bottom, right - radius, bottom);
    builder.line_to(left + radius, bottom);
    builder.cubic_to(left + radius - k, bottom, left, bottom - radius + k, left, bottom - radius);
    builder.line_to(left, top + radius);
    builder.cubic_to(left, top + radius - k, left + radius - k, top, left + radius, top);
    builder.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureField;
    use egui::{pos2, vec2};
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn scene_with_figure() -> Scene {
        let mut scene = Scene::new(800, 600).unwrap();
        scene.add_figure(Figure::default()).unwrap();
        scene
    }

    fn rgba(color: Color32) -> Rgba<u8> {
        Rgba(color.to_srgba_unmultiplied())
    }

    #[test]
    fn test_canvas_size_and_background() {
        let mut scene = scene_with_figure();
        let image = render_scene(&scene, ExportFormat::Png).unwrap();
        assert_eq!(image.dimensions(), (800, 600));
        assert_eq!(*image.get_pixel(0, 0), WHITE);

        scene.background = BackgroundMode::Transparent;
        let png = render_scene(&scene, ExportFormat::Png).unwrap();
        assert_eq!(*png.get_pixel(0, 0), CLEAR);
        // JPEG has no alpha channel, the background stays white
        let jpeg = render_scene(&scene, ExportFormat::Jpeg).unwrap();
        assert_eq!(*jpeg.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_figure_is_painted() {
        let scene = scene_with_figure();
        let figure = &scene.figures()[0];
        let image = render_scene(&scene, ExportFormat::Png).unwrap();

        let head = figure.head_center();
        assert_eq!(*image.get_pixel(head.x as u32, head.y as u32), rgba(figure.color));

        let knee = figure.to_world(figure.left_leg.mid);
        assert_eq!(*image.get_pixel(knee.x as u32, knee.y as u32), rgba(figure.color));

        // Halfway down the thigh, away from any joint disc
        let hip = figure.to_world(figure.left_leg.start);
        let thigh = hip + (knee - hip) / 2.0;
        assert_eq!(*image.get_pixel(thigh.x as u32, thigh.y as u32), rgba(figure.color));
    }

    #[test]
    fn test_global_outline() {
        let mut scene = scene_with_figure();
        let head_top = {
            let figure = &scene.figures()[0];
            figure.head_center() - vec2(0.0, figure.head_radius() - 2.0)
        };
        let (x, y) = (head_top.x as u32, head_top.y as u32);
        let plain = render_scene(&scene, ExportFormat::Png).unwrap();
        assert_eq!(*plain.get_pixel(x, y), rgba(scene.figures()[0].color));

        let id = scene.figures()[0].id();
        scene
            .figure_mut(id)
            .unwrap()
            .set_field(FigureField::GlobalOutline(true))
            .unwrap();
        let outlined = render_scene(&scene, ExportFormat::Png).unwrap();
        assert_eq!(*outlined.get_pixel(x, y), BLACK);
        // The centre keeps the fill colour
        let head = scene.figures()[0].head_center();
        assert_eq!(
            *outlined.get_pixel(head.x as u32, head.y as u32),
            rgba(scene.figures()[0].color)
        );
    }

    #[test]
    fn test_export_writes_files() {
        let scene = scene_with_figure();
        let dir = std::env::temp_dir();
        for format in [ExportFormat::Png, ExportFormat::Jpeg] {
            let path = dir.join(format!(
                "figure_poser_export_{}.{}",
                std::process::id(),
                format.extension()
            ));
            export_scene(&scene, &path, format).unwrap();

            let decoded = image::open(&path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (800, 600));
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_rounded_rect_path_bounds() {
        let mut builder = PathBuilder::new();
        let rect = Rect::from_min_max(pos2(10.0, 20.0), pos2(74.0, 130.0));
        push_rounded_rect(&mut builder, rect, 4.0);
        let bounds = builder.finish().unwrap().bounds();

        assert!((bounds.left() - 10.0).abs() < 0.001);
        assert!((bounds.top() - 20.0).abs() < 0.001);
        assert!((bounds.right() - 74.0).abs() < 0.001);
        assert!((bounds.bottom() - 130.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_shapes_are_skipped() {
        let mut builder = PathBuilder::new();
        push_disc(&mut builder, pos2(5.0, 5.0), 0.0);
        push_rounded_rect(&mut builder, Rect::from_min_max(pos2(0.0, 0.0), pos2(0.0, 10.0)), 2.0);
        assert!(builder.finish().is_none());
    }
}
