use egui::Context as EguiContext;
use vislab_assets::TextureData;
use vislab_common::SceneId;
use vislab_render::ShadingModel;
use vislab_scenes::{
    ActiveScene, BinaryClockScene, CubeScene, CurveMeshScene, LightingScene, PrimitivesPart,
    PrimitivesScene, Scene, clock::NUM_DIGITS,
};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Scene,
    Camera,
    Debug,
}

/// Control panel state: window toggles and the details image.
pub struct Panel {
    pub visible: bool,
    pub tab: SettingsTab,
    pub show_inspection: bool,
    pub show_style_editor: bool,
    pub show_about: bool,
    pub show_egui_settings: bool,
    details_image: Option<TextureData>,
    details_texture: Option<egui::TextureHandle>,
}

impl Panel {
    pub fn new(details_image: Option<TextureData>) -> Self {
        Self {
            visible: true,
            tab: SettingsTab::default(),
            show_inspection: false,
            show_style_editor: false,
            show_about: false,
            show_egui_settings: false,
            details_image,
            details_texture: None,
        }
    }

    pub fn has_details_image(&self) -> bool {
        self.details_image.is_some()
    }

    /// Upload the details image to egui on first use.
    fn details_texture(&mut self, ctx: &EguiContext) -> Option<(egui::TextureId, &TextureData)> {
        let image = self.details_image.as_ref()?;
        let texture = self.details_texture.get_or_insert_with(|| {
            let pixels = egui::ColorImage::from_rgba_unmultiplied(
                [image.width as usize, image.height as usize],
                &image.rgba,
            );
            ctx.load_texture(image.name.clone(), pixels, egui::TextureOptions::LINEAR)
        });
        Some((texture.id(), image))
    }
}

/// One block of the details window, laid out top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsBlock {
    Heading(String),
    Text(&'static str),
    Link {
        label: &'static str,
        url: &'static str,
    },
    /// The details picture, scaled to the window width.
    Image,
}

/// Details window text for the scene on screen.
pub fn details_text(scene: &ActiveScene) -> &'static str {
    match scene {
        ActiveScene::Primitives(s) if s.part == PrimitivesPart::Triangle => {
            "The simplest draw: one triangle from three vertices, each with its own \
             colour. The rasterizer interpolates red, green and blue across the face."
        }
        other => other.id().description(),
    }
}

fn further_reading(scene: &ActiveScene) -> (&'static str, &'static str) {
    match scene.id() {
        SceneId::Primitives => (
            "Hello Triangle",
            "https://learnopengl.com/Getting-started/Hello-Triangle",
        ),
        SceneId::BinaryClock => ("Binary clock", "https://en.wikipedia.org/wiki/Binary_clock"),
        SceneId::Cube => (
            "Coordinate systems",
            "https://learnopengl.com/Getting-started/Coordinate-Systems",
        ),
        SceneId::CurveMesh => (
            "Bezier curves",
            "https://en.wikipedia.org/wiki/B%C3%A9zier_curve",
        ),
        SceneId::Lighting => (
            "Basic lighting",
            "https://learnopengl.com/Lighting/Basic-Lighting",
        ),
    }
}

/// The details window for `scene`: a heading, the description, the picture
/// when one was loaded and a link for further reading.
pub fn details_document(scene: &ActiveScene, with_image: bool) -> Vec<DetailsBlock> {
    let mut heading = scene.id().to_string();
    if let ActiveScene::Primitives(s) = scene {
        heading.push_str(&format!(" Part {}", s.part.number()));
    }
    let (label, url) = further_reading(scene);
    let mut blocks = vec![
        DetailsBlock::Heading(heading),
        DetailsBlock::Text(details_text(scene)),
    ];
    if with_image {
        blocks.push(DetailsBlock::Image);
    }
    blocks.push(DetailsBlock::Link { label, url });
    blocks
}

pub fn draw_ui(ctx: &EguiContext, state: &mut AppState) {
    tool_windows(ctx, state);
    if !state.panel.visible {
        return;
    }
    details_window(ctx, state);
    settings_window(ctx, state);
}

fn tool_windows(ctx: &EguiContext, state: &mut AppState) {
    let panel = &mut state.panel;
    egui::Window::new("Inspection")
        .open(&mut panel.show_inspection)
        .vscroll(true)
        .show(ctx, |ui| ctx.inspection_ui(ui));
    egui::Window::new("Style Editor")
        .open(&mut panel.show_style_editor)
        .vscroll(true)
        .show(ctx, |ui| ctx.style_ui(ui, egui::Theme::Dark));
    egui::Window::new("egui Settings")
        .open(&mut panel.show_egui_settings)
        .vscroll(true)
        .show(ctx, |ui| ctx.settings_ui(ui));
    egui::Window::new("About")
        .open(&mut panel.show_about)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("vislab {}", env!("CARGO_PKG_VERSION")));
            ui.label("Scene viewer built on winit, wgpu and egui.");
            ui.separator();
            ui.small("F1: Toggle panel | 1-5: Scenes | RMB: Look | WASD: Move");
        });
}

fn details_window(ctx: &EguiContext, state: &mut AppState) {
    let document = details_document(state.host.scene(), state.panel.has_details_image());
    egui::Window::new("Details")
        .default_pos([680.0, 60.0])
        .default_size([500.0, 300.0])
        .vscroll(true)
        .show(ctx, |ui| {
            for block in document {
                match block {
                    DetailsBlock::Heading(text) => {
                        ui.heading(text);
                    }
                    DetailsBlock::Text(text) => {
                        ui.label(text);
                    }
                    DetailsBlock::Link { label, url } => {
                        ui.hyperlink_to(label, url);
                    }
                    DetailsBlock::Image => {
                        if let Some((id, image)) = state.panel.details_texture(ctx) {
                            let size = image.fit_width(ui.available_width());
                            let sized = egui::load::SizedTexture::new(id, size);
                            ui.add(egui::Image::from_texture(sized));
                        }
                    }
                }
            }
        });
}

fn settings_window(ctx: &EguiContext, state: &mut AppState) {
    egui::Window::new("Settings").auto_sized().show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Tools", |ui| {
                ui.checkbox(&mut state.panel.show_inspection, "Inspection");
                ui.checkbox(&mut state.panel.show_style_editor, "Style Editor");
                ui.checkbox(&mut state.panel.show_about, "About");
            });
        });

        ui.horizontal(|ui| {
            ui.selectable_value(&mut state.panel.tab, SettingsTab::Scene, "Scene");
            ui.selectable_value(&mut state.panel.tab, SettingsTab::Camera, "Camera");
            ui.selectable_value(&mut state.panel.tab, SettingsTab::Debug, "Debug");
        });
        ui.separator();

        match state.panel.tab {
            SettingsTab::Scene => scene_tab(ui, state),
            SettingsTab::Camera => camera_tab(ui, state),
            SettingsTab::Debug => debug_tab(ui, state),
        }
    });
}

fn scene_tab(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui| {
        for id in SceneId::ALL {
            let button = ui
                .button(format!("Scene {}", id.number()))
                .on_hover_text(id.label());
            if button.clicked() {
                state.select_scene(id);
            }
        }
    });
    ui.separator();

    match state.host.scene_mut() {
        ActiveScene::Primitives(s) => primitives_controls(ui, s),
        ActiveScene::BinaryClock(s) => clock_controls(ui, s),
        ActiveScene::Cube(s) => cube_controls(ui, s),
        ActiveScene::CurveMesh(s) => curve_controls(ui, s),
        ActiveScene::Lighting(s) => lighting_controls(ui, s),
    }
}

fn primitives_controls(ui: &mut egui::Ui, scene: &mut PrimitivesScene) {
    ui.horizontal(|ui| {
        ui.radio_value(&mut scene.part, PrimitivesPart::Triangle, "Part 1: Triangle");
        ui.radio_value(&mut scene.part, PrimitivesPart::Shapes, "Part 2: Shapes");
    });
    if scene.part == PrimitivesPart::Shapes {
        let mut segments = scene.segments();
        let slider = egui::Slider::new(
            &mut segments,
            PrimitivesScene::MIN_SEGMENTS..=PrimitivesScene::MAX_SEGMENTS,
        )
        .text("Circle segments");
        if ui.add(slider).changed() {
            scene.set_segments(segments);
        }
    }
}

fn clock_controls(ui: &mut egui::Ui, scene: &mut BinaryClockScene) {
    ui.label(format!("Elapsed: {} s", scene.seconds()));
    ui.monospace(format!(
        "Shown: {:0width$b}",
        scene.displayed(),
        width = NUM_DIGITS
    ));
    ui.horizontal(|ui| {
        let label = if scene.paused { "Run" } else { "Pause" };
        if ui.button(label).clicked() {
            scene.paused = !scene.paused;
        }
        if ui.button("Reset").clicked() {
            scene.reset();
        }
    });
}

fn cube_controls(ui: &mut egui::Ui, scene: &mut CubeScene) {
    ui.label("Rotation (degrees):");
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut scene.rotation.x).prefix("X: ").speed(1.0));
        ui.add(egui::DragValue::new(&mut scene.rotation.y).prefix("Y: ").speed(1.0));
        ui.add(egui::DragValue::new(&mut scene.rotation.z).prefix("Z: ").speed(1.0));
    });
    ui.checkbox(&mut scene.spin, "Spin");
    ui.add_enabled(
        scene.spin,
        egui::Slider::new(&mut scene.spin_speed, -360.0..=360.0).text("Spin speed (deg/s)"),
    );
    ui.checkbox(&mut scene.show_edges, "Show edges");
    ui.checkbox(&mut scene.show_axes, "Show axes");
}

fn curve_controls(ui: &mut egui::Ui, scene: &mut CurveMeshScene) {
    ui.label(format!("Mesh: {} on {}", scene.mesh_name(), scene.ground_name()));
    ui.checkbox(&mut scene.animate, "Animate");
    ui.add(egui::Slider::new(&mut scene.speed, 0.0..=2.0).text("Speed"));

    let mut t = scene.motion.t();
    if ui
        .add(egui::Slider::new(&mut t, 0.0..=1.0).text("t"))
        .changed()
    {
        scene.motion.set_t(t);
    }
    let direction = if scene.motion.is_returning() {
        "returning"
    } else {
        "outbound"
    };
    ui.label(format!("Direction: {direction}"));

    let mut samples = scene.samples();
    if ui
        .add(
            egui::Slider::new(
                &mut samples,
                CurveMeshScene::MIN_SAMPLES..=CurveMeshScene::MAX_SAMPLES,
            )
            .text("Curve samples"),
        )
        .changed()
    {
        scene.set_samples(samples);
    }

    ui.separator();
    ui.label("Control points:");
    let mut curve = *scene.curve();
    let mut changed = false;
    for (name, point) in ["a", "b", "c", "d"].into_iter().zip(curve.control_points_mut()) {
        ui.horizontal(|ui| {
            ui.label(name);
            changed |= ui.add(egui::DragValue::new(&mut point.x).speed(0.05)).changed();
            changed |= ui.add(egui::DragValue::new(&mut point.y).speed(0.05)).changed();
            changed |= ui.add(egui::DragValue::new(&mut point.z).speed(0.05)).changed();
        });
    }
    if changed {
        scene.set_curve(curve);
    }
}

fn lighting_controls(ui: &mut egui::Ui, scene: &mut LightingScene) {
    ui.horizontal(|ui| {
        ui.label("Object colour");
        ui.color_edit_button_rgb(&mut scene.object_color);
    });
    ui.horizontal(|ui| {
        ui.label("Light colour");
        ui.color_edit_button_rgb(&mut scene.light.light_color);
    });

    let light = &mut scene.light;
    ui.label("Light position:");
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut light.light_pos.x).prefix("X: ").speed(0.05));
        ui.add(egui::DragValue::new(&mut light.light_pos.y).prefix("Y: ").speed(0.05));
        ui.add(egui::DragValue::new(&mut light.light_pos.z).prefix("Z: ").speed(0.05));
    });
    ui.checkbox(&mut scene.orbit, "Orbit");
    ui.add_enabled(
        scene.orbit,
        egui::Slider::new(&mut scene.orbit_speed, -3.0..=3.0).text("Orbit speed (rad/s)"),
    );
    ui.separator();

    let light = &mut scene.light;
    ui.horizontal(|ui| {
        ui.radio_value(&mut light.model, ShadingModel::Phong, "Phong");
        ui.radio_value(&mut light.model, ShadingModel::Gouraud, "Gouraud");
    });
    ui.add(egui::Slider::new(&mut light.ambient, 0.0..=1.0).text("Ambient"));
    ui.add(egui::Slider::new(&mut light.diffuse, 0.0..=1.0).text("Diffuse"));
    ui.add(egui::Slider::new(&mut light.phong_specular, 0.0..=1.0).text("Phong specular"));
    ui.add(egui::Slider::new(&mut light.gouraud_specular, 0.0..=1.0).text("Gouraud specular"));
    ui.add(
        egui::Slider::new(&mut light.shininess, 1.0..=256.0)
            .logarithmic(true)
            .text("Shininess"),
    );
}

fn camera_tab(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(state.stats.to_string());
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Clear colour");
        ui.color_edit_button_rgb(&mut state.settings.clear_color);
    });
    ui.separator();

    ui.checkbox(&mut state.settings.perspective, "Perspective projection");
    ui.checkbox(&mut state.settings.backface_culling, "Backface culling");
    ui.separator();

    ui.label("Frustum");
    let settings = &mut state.settings;
    ui.add(
        egui::Slider::new(&mut settings.near, 0.01..=10.0)
            .logarithmic(true)
            .text("Near plane"),
    );
    ui.add(
        egui::Slider::new(&mut settings.far, 1.0..=500.0)
            .logarithmic(true)
            .text("Far plane"),
    );
    if settings.far <= settings.near {
        ui.colored_label(egui::Color32::YELLOW, "Far plane is clamped past the near plane");
    }
    ui.separator();

    let camera = &mut state.fly_camera;
    ui.label(format!(
        "Camera: ({:.1}, {:.1}, {:.1})",
        camera.position.x, camera.position.y, camera.position.z
    ));
    ui.add(egui::Slider::new(&mut camera.speed, 0.5..=20.0).text("Move speed"));
    ui.add(egui::Slider::new(&mut state.ortho_camera.zoom, 0.25..=4.0).text("2D zoom"));
    ui.horizontal(|ui| {
        if ui.button("Reset camera").clicked() {
            state.reset_camera();
        }
        if ui.button("Save settings").clicked() {
            state.save_settings();
        }
    });
}

fn debug_tab(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(state.stats.to_string());
    let g = state.geometry;
    ui.label(format!(
        "{} vertices, {} indices ({} triangles)",
        g.vertices, g.indices, g.triangles
    ));
    ui.separator();

    ui.label(format!("Current scene: {}", state.host.current().number()));
    ui.label(format!("Loaded assets: {}", state.host.resources().assets().len()));
    ui.label(format!("Elapsed frames: {}", state.stats.frames()));
    ui.label(format!("Elapsed updates: {}", state.stats.updates()));
    ui.label(format!(
        "Draw calls: {} ({} skipped)",
        state.last_render.draw_calls, state.last_render.skipped
    ));
    ui.separator();

    ui.checkbox(&mut state.panel.show_egui_settings, "Show egui settings");
}

#[cfg(test)]
mod tests {
    use super::*;
    use vislab_scenes::{SceneResources, create_scene};

    #[test]
    fn triangle_part_has_its_own_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = SceneResources::new(dir.path());
        let mut scene = create_scene(SceneId::Primitives, &mut resources);
        let part1 = details_text(&scene);
        assert_ne!(part1, SceneId::Primitives.description());

        if let ActiveScene::Primitives(s) = &mut scene {
            s.part = PrimitivesPart::Shapes;
        }
        assert_eq!(details_text(&scene), SceneId::Primitives.description());
    }

    #[test]
    fn every_scene_has_details() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = SceneResources::new(dir.path());
        for id in SceneId::ALL {
            let scene = create_scene(id, &mut resources);
            assert!(!details_text(&scene).is_empty());
        }
    }

    #[test]
    fn details_document_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = SceneResources::new(dir.path());
        for id in SceneId::ALL {
            let scene = create_scene(id, &mut resources);
            let doc = details_document(&scene, true);
            assert!(matches!(&doc[0], DetailsBlock::Heading(h) if h.starts_with(&id.to_string())));
            assert_eq!(doc[1], DetailsBlock::Text(details_text(&scene)));
            assert_eq!(doc[2], DetailsBlock::Image);
            let DetailsBlock::Link { url, .. } = doc[3] else {
                panic!("{id} has no link");
            };
            assert!(url.starts_with("https://"));
        }
    }

    #[test]
    fn details_document_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = SceneResources::new(dir.path());
        let scene = create_scene(SceneId::Primitives, &mut resources);
        let doc = details_document(&scene, false);
        assert!(!doc.contains(&DetailsBlock::Image));
        assert_eq!(doc[0], DetailsBlock::Heading("Scene 1 (Primitives) Part 1".into()));
        assert_eq!(doc.len(), 3);
    }
}
