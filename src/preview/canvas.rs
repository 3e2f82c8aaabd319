//! Wireframe frame composition
//!
//! `draw_frame` only talks to the `Canvas` trait; `MacroquadCanvas` is the
//! on-screen implementation.

use macroquad::prelude as mq;
use crate::format::ParsedModel;
use crate::projection::{centroid, project, rotate, CameraState, Vec2, Vec3};
use super::interaction::OrientationState;

/// Drawing surface used by the preview
pub trait Canvas {
    /// Current size in pixels
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn line(&mut self, from: Vec2, to: Vec2);
    /// Text with its top-left corner at (x, y)
    fn text(&mut self, text: &str, x: f32, y: f32);
}

/// Vertex table and faces prepared for display
#[derive(Debug, Clone, Default)]
pub struct PreviewModel {
    /// Centered on the vertex mean and scaled for display
    pub positions: Vec<Vec3>,
    pub faces: Vec<[u32; 4]>,
}

impl PreviewModel {
    pub fn from_parsed(parsed: &ParsedModel, display_scale: f32) -> Self {
        let raw: Vec<Vec3> = parsed
            .vertices
            .iter()
            .map(|p| Vec3::new(p[0].to_f32(), p[1].to_f32(), p[2].to_f32()))
            .collect();
        let center = centroid(&raw);
        Self {
            positions: raw.iter().map(|&p| (p - center) * display_scale).collect(),
            faces: parsed.vertex_indices.clone(),
        }
    }
}

/// Rotate, project and draw one frame
pub fn draw_frame(
    canvas: &mut dyn Canvas,
    model: &PreviewModel,
    orientation: &OrientationState,
    camera: &CameraState,
    captions: &[String],
) {
    let (width, height) = canvas.size();
    let rotated = rotate(&model.positions, orientation.yaw_radians(), orientation.pitch_radians());

    canvas.clear();

    for face in &model.faces {
        // Corners that are out of range or fail projection are left out of
        // this face only
        let corners: Vec<Vec3> = face
            .iter()
            .filter_map(|&i| rotated.get(i as usize).copied())
            .collect();
        let points = project(&corners, width, height, camera);

        if points.len() > 1 {
            for (i, &start) in points.iter().enumerate() {
                let end = points[(i + 1) % points.len()];
                canvas.line(start, end);
            }
        }
    }

    for (i, caption) in captions.iter().enumerate() {
        canvas.text(caption, 10.0, 10.0 + i as f32 * 20.0);
    }
}

/// Draws straight to the macroquad window
pub struct MacroquadCanvas {
    pub background: mq::Color,
    pub line_color: mq::Color,
    pub text_color: mq::Color,
    pub font_size: f32,
}

impl Canvas for MacroquadCanvas {
    fn size(&self) -> (f32, f32) {
        (mq::screen_width(), mq::screen_height())
    }

    fn clear(&mut self) {
        mq::clear_background(self.background);
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        mq::draw_line(from.x, from.y, to.x, to.y, 1.0, self.line_color);
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        // macroquad positions text by its baseline
        mq::draw_text(text, x, y + self.font_size * 0.75, self.font_size, self.text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Fixed2;
    use crate::preview::interaction::DragMode;

    #[derive(Default)]
    struct RecordingCanvas {
        clears: usize,
        lines: Vec<(Vec2, Vec2)>,
        texts: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (f32, f32) {
            (800.0, 600.0)
        }
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn line(&mut self, from: Vec2, to: Vec2) {
            self.lines.push((from, to));
        }
        fn text(&mut self, text: &str, _x: f32, _y: f32) {
            self.texts.push(text.to_string());
        }
    }

    fn level() -> OrientationState {
        OrientationState {
            yaw: 0.0,
            pitch: 0.0,
            velocity: Default::default(),
            mode: DragMode::Idle,
        }
    }

    fn square() -> PreviewModel {
        PreviewModel {
            positions: vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            faces: vec![[0, 1, 2, 3]],
        }
    }

    #[test]
    fn test_quad_draws_closed_outline() {
        let mut canvas = RecordingCanvas::default();
        let captions = vec!["one".to_string(), "two".to_string()];
        let camera = CameraState::new(Vec3::ZERO, 10.0);
        draw_frame(&mut canvas, &square(), &level(), &camera, &captions);

        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.lines.len(), 4);
        // Closing edge returns to the first corner
        assert_eq!(canvas.lines[3].1, canvas.lines[0].0);
        assert_eq!(canvas.texts, captions);
    }

    #[test]
    fn test_dropped_corner_shortens_outline() {
        let mut model = square();
        for p in &mut model.positions {
            p.z = 5.0;
        }
        // Camera at z=10 with view distance 10: z == 0 gives divisor 0
        model.positions[2].z = 0.0;
        let mut canvas = RecordingCanvas::default();
        let camera = CameraState::new(Vec3::new(0.0, 0.0, 10.0), 10.0);
        draw_frame(&mut canvas, &model, &level(), &camera, &[]);
        assert_eq!(canvas.lines.len(), 3);
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let mut model = square();
        model.faces = vec![[0, 1, 9, 9], [7, 8, 9, 3]];
        let mut canvas = RecordingCanvas::default();
        draw_frame(&mut canvas, &model, &level(), &CameraState::new(Vec3::ZERO, 10.0), &[]);
        // First face keeps two corners (one segment each way), second keeps one
        assert_eq!(canvas.lines.len(), 2);
    }

    #[test]
    fn test_preview_model_is_centered_and_scaled() {
        let parsed = ParsedModel {
            vertices: vec![
                [Fixed2(100), Fixed2(0), Fixed2(0)],
                [Fixed2(300), Fixed2(200), Fixed2(0)],
            ],
            vertex_indices: vec![[0, 1, 1, 0]],
            ..ParsedModel::default()
        };
        let model = PreviewModel::from_parsed(&parsed, 10.0);
        assert_eq!(model.positions[0], Vec3::new(-10.0, -10.0, 0.0));
        assert_eq!(model.positions[1], Vec3::new(10.0, 10.0, 0.0));
        assert_eq!(model.faces, parsed.vertex_indices);
    }
}
