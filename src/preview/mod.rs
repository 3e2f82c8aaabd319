//! Interactive wireframe preview
//!
//! Loads a model file, then runs a single-threaded poll/update/draw loop
//! capped at a fixed frame rate until the window is closed.

mod canvas;
mod input;
mod interaction;

use canvas::{draw_frame, MacroquadCanvas, PreviewModel};
use input::{InputEvent, InputSnapshot, InputTracker};
use interaction::{InteractionController, InteractionTuning};
use macroquad::prelude::*;
use serde::{Serialize, Deserialize};
use crate::format::{MODEL_DIR, ParsedModel};
use crate::projection::CameraState;

/// Preview window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub window_width: i32,
    pub window_height: i32,
    pub target_fps: u32,
    /// Model files are looked up in `<base>/<model_dir>/<model>.c`
    pub model_dir: String,
    /// Multiplier applied to the centered vertex table before rotation
    pub display_scale: f32,
    pub camera: CameraState,
    pub interaction: InteractionTuning,
    pub background: [u8; 3],
    pub line_color: [u8; 3],
    pub text_color: [u8; 3],
    pub font_size: f32,
    pub captions: Vec<String>,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            target_fps: 60,
            model_dir: MODEL_DIR.to_string(),
            display_scale: 10.0,
            camera: CameraState::default(),
            interaction: InteractionTuning::default(),
            background: [0, 0, 0],
            line_color: [0, 255, 0],
            text_color: [0, 240, 0],
            font_size: 24.0,
            captions: vec![
                "Joynters  Modeling  Machine".to_string(),
                " -  For  PSX  Development  -".to_string(),
            ],
        }
    }
}

impl PreviewSettings {
    /// Seconds per frame for the limiter, if one is set
    pub fn frame_time(&self) -> Option<f64> {
        (self.target_fps > 0).then(|| 1.0 / self.target_fps as f64)
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

/// Window configuration for the preview
pub fn window_conf(model_id: &str, settings: &PreviewSettings) -> Conf {
    Conf {
        window_title: format!("{} - Wireframe", model_id),
        window_width: settings.window_width,
        window_height: settings.window_height,
        window_resizable: true,
        ..Default::default()
    }
}

/// Run the preview until the window is closed
pub async fn run(parsed: ParsedModel, settings: PreviewSettings) {
    let model = PreviewModel::from_parsed(&parsed, settings.display_scale);
    let bad_faces = parsed.out_of_range_faces();
    if bad_faces > 0 {
        tracing::warn!("{} faces reference vertices past the vertex table", bad_faces);
    }
    match parsed.normals_per_face() {
        Some(n) => tracing::debug!("{} normal indices per face", n),
        None => tracing::debug!("Normal index count doesn't match the face list"),
    }

    let mut controller = InteractionController::new(settings.interaction);
    let mut tracker = InputTracker::new();
    let mut canvas = MacroquadCanvas {
        background: rgb(settings.background),
        line_color: rgb(settings.line_color),
        text_color: rgb(settings.text_color),
        font_size: settings.font_size,
    };

    // Handle the close button ourselves so the loop can end cleanly
    prevent_quit();

    tracing::info!(
        "Previewing {} verts, {} faces",
        model.positions.len(),
        model.faces.len()
    );

    'frames: loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();
        let dt = get_frame_time();

        for event in tracker.events(&InputSnapshot::sample()) {
            match event {
                InputEvent::Quit => break 'frames,
                InputEvent::ButtonDown { x, y } => controller.press(x, y),
                InputEvent::ButtonUp => controller.release(),
                InputEvent::Motion { x, y } => controller.motion(x, y),
                InputEvent::Resize { width, height } => {
                    tracing::debug!("Window resized to {}x{}", width, height);
                }
            }
        }

        controller.update(dt);
        draw_frame(
            &mut canvas,
            &model,
            controller.state(),
            &settings.camera,
            &settings.captions,
        );

        // FPS limiting: sleep for bulk, then spin-wait for precision
        if let Some(target_frame_time) = settings.frame_time() {
            let spin_margin = 0.002; // 2ms
            while get_time() - frame_start + spin_margin < target_frame_time {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }

        next_frame().await;
    }

    tracing::info!("Preview closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time() {
        let settings = PreviewSettings::default();
        assert_eq!(settings.frame_time(), Some(1.0 / 60.0));
        let unlimited = PreviewSettings {
            target_fps: 0,
            ..PreviewSettings::default()
        };
        assert_eq!(unlimited.frame_time(), None);
    }
}
