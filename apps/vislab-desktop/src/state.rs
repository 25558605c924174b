use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use vislab_common::{CameraKind, RenderSettings, SceneId};
use vislab_input::{Action, HeldActions};
use vislab_render::{DrawList, Geometry, MeshKey, RenderView};
use vislab_render_wgpu::{FlyCamera, OrthoCamera, RenderStats};
use vislab_scenes::{Scene, SceneHost, SceneResources};
use vislab_tools::{FrameStats, GeometryInspector, GeometrySummary};
use winit::keyboard::KeyCode;

use crate::config::AppConfig;
use crate::ui::Panel;

/// Fixed update step in seconds.
pub const TICK_RATE: f64 = 1.0 / 60.0;
/// Longest frame time fed to the simulation, so a stall does not replay
/// hundreds of updates.
const MAX_FRAME_DT: f32 = 0.1;

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::KeyW => Action::MoveForward,
        KeyCode::KeyS => Action::MoveBackward,
        KeyCode::KeyA => Action::MoveLeft,
        KeyCode::KeyD => Action::MoveRight,
        KeyCode::Space => Action::MoveUp,
        KeyCode::ControlLeft => Action::MoveDown,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Action::Boost,
        KeyCode::Digit1 => Action::SelectScene(SceneId::Primitives),
        KeyCode::Digit2 => Action::SelectScene(SceneId::BinaryClock),
        KeyCode::Digit3 => Action::SelectScene(SceneId::Cube),
        KeyCode::Digit4 => Action::SelectScene(SceneId::CurveMesh),
        KeyCode::Digit5 => Action::SelectScene(SceneId::Lighting),
        KeyCode::Tab => Action::NextScene,
        KeyCode::F1 => Action::TogglePanel,
        KeyCode::Escape => Action::ReleaseMouse,
        _ => return None,
    };
    Some(action)
}

/// Whether an input event reaches the app after egui has seen it. Presses
/// the UI consumed stay with the UI; releases always pass through so held
/// keys and mouse capture cannot get stuck.
fn forward_to_app(pressed: bool, consumed_by_ui: bool) -> bool {
    !pressed || !consumed_by_ui
}

/// Geometry the backend must upload before the next frame.
#[derive(Debug)]
pub enum MeshUpload {
    /// A new scene: drop every mesh and upload these.
    Replace(Vec<(MeshKey, Geometry)>),
    /// The same scene with edited geometry: re-upload only these.
    Update(Vec<(MeshKey, Geometry)>),
}

impl MeshUpload {
    pub fn meshes(&self) -> &[(MeshKey, Geometry)] {
        match self {
            MeshUpload::Replace(meshes) | MeshUpload::Update(meshes) => meshes,
        }
    }
}

/// Application state.
pub struct AppState {
    pub host: SceneHost,
    pub settings: RenderSettings,
    pub fly_camera: FlyCamera,
    pub ortho_camera: OrthoCamera,
    pub stats: FrameStats,
    pub panel: Panel,
    /// Counts from the last rendered frame.
    pub last_render: RenderStats,
    /// Geometry of the current scene as last uploaded.
    pub geometry: GeometrySummary,
    mesh_summaries: BTreeMap<MeshKey, GeometrySummary>,
    held: HeldActions,
    mouse_captured: bool,
    draw_list: DrawList,
    uploaded_revision: Option<u64>,
    config: AppConfig,
    config_path: PathBuf,
    last_frame: Instant,
    tick_accumulator: f64,
}

impl AppState {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        let mut resources = SceneResources::new(config.data_dir.clone());
        let panel = Panel::new(resources.details_image());
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;

        Self {
            host: SceneHost::new(config.start_scene, resources),
            settings: config.render.sanitized(),
            fly_camera: FlyCamera {
                aspect,
                ..FlyCamera::default()
            },
            ortho_camera: OrthoCamera {
                aspect,
                ..OrthoCamera::default()
            },
            stats: FrameStats::new(),
            panel,
            last_render: RenderStats::default(),
            geometry: GeometrySummary::default(),
            mesh_summaries: BTreeMap::new(),
            held: HeldActions::new(),
            mouse_captured: false,
            draw_list: DrawList::new(),
            uploaded_revision: None,
            config,
            config_path,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
        }
    }

    pub fn mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    /// Mouse look is only meaningful for the free camera.
    pub fn set_mouse_captured(&mut self, captured: bool) {
        self.mouse_captured =
            captured && self.host.current().camera_kind() == CameraKind::Free;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let aspect = width as f32 / height.max(1) as f32;
        self.fly_camera.aspect = aspect;
        self.ortho_camera.aspect = aspect;
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(action) = action_for_key(key) else {
            return;
        };
        if !self.held.set(action, pressed) {
            return;
        }
        match action {
            Action::SelectScene(id) => self.select_scene(id),
            Action::NextScene => self.select_scene(self.host.current().next()),
            Action::TogglePanel => self.panel.visible = !self.panel.visible,
            Action::ReleaseMouse => self.mouse_captured = false,
            _ => {}
        }
    }

    /// A key event after egui has seen it.
    pub fn key_input(&mut self, key: KeyCode, pressed: bool, consumed_by_ui: bool) {
        if forward_to_app(pressed, consumed_by_ui) {
            self.handle_key(key, pressed);
        }
    }

    /// A right mouse button event after egui has seen it. Holding the
    /// button captures the mouse for looking around.
    pub fn right_button(&mut self, pressed: bool, consumed_by_ui: bool) {
        if forward_to_app(pressed, consumed_by_ui) {
            self.set_mouse_captured(pressed);
        }
    }

    /// Drop held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.mouse_captured = false;
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        if self.mouse_captured {
            self.fly_camera.rotate(dx, dy);
        }
    }

    /// Switch to `id`. Selecting the current scene restarts it.
    pub fn select_scene(&mut self, id: SceneId) {
        self.host.select(id);
        self.mouse_captured = false;
    }

    /// Seconds since the previous call, capped.
    pub fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;
        dt
    }

    /// Advance by one rendered frame of `dt` seconds: camera motion every
    /// frame, scene updates at [`TICK_RATE`].
    pub fn update(&mut self, dt: f32) {
        self.stats.record_frame(dt);

        if self.host.current().camera_kind() == CameraKind::Free {
            let movement = self.held.movement();
            if movement != glam::Vec3::ZERO {
                self.fly_camera
                    .translate(movement, dt * self.held.speed_multiplier());
            }
        }

        self.tick_accumulator += f64::from(dt);
        while self.tick_accumulator >= TICK_RATE {
            self.tick_accumulator -= TICK_RATE;
            self.host.scene_mut().update(TICK_RATE as f32);
            self.stats.record_update();
        }
    }

    /// Geometry to upload: every mesh when the scene was recreated, only
    /// the changed ones when its revision moved since the last upload.
    pub fn pending_upload(&mut self) -> Option<MeshUpload> {
        let recreated = self.host.sync() || self.uploaded_revision.is_none();
        let revision = self.host.scene().revision();
        if !recreated && self.uploaded_revision == Some(revision) {
            return None;
        }
        self.uploaded_revision = Some(revision);
        let upload = if recreated {
            self.tick_accumulator = 0.0;
            self.mesh_summaries.clear();
            MeshUpload::Replace(self.host.scene().meshes())
        } else {
            MeshUpload::Update(self.host.scene().changed_meshes())
        };
        for (key, geometry) in upload.meshes() {
            self.mesh_summaries
                .insert(*key, GeometryInspector::mesh(geometry));
        }
        self.geometry = self.mesh_summaries.values().copied().sum();
        tracing::debug!("{}: {}", self.host.current(), self.geometry);
        Some(upload)
    }

    /// Rebuild the draw list and return the view to render it from.
    pub fn prepare_frame(&mut self) -> RenderView {
        self.draw_list.clear();
        self.host.scene().draw(&mut self.draw_list);
        match self.host.current().camera_kind() {
            CameraKind::Ortho2D => self.ortho_camera.render_view(),
            CameraKind::Free => self.fly_camera.render_view(&self.settings),
        }
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn reset_camera(&mut self) {
        self.fly_camera = FlyCamera {
            aspect: self.fly_camera.aspect,
            ..FlyCamera::default()
        };
        self.ortho_camera.zoom = 1.0;
    }

    /// Persist the current render settings and scene as the new defaults.
    pub fn save_settings(&mut self) {
        self.settings = self.settings.sanitized();
        self.config.render = self.settings;
        self.config.start_scene = self.host.current();
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::error!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vislab_scenes::{ActiveScene, curve_mesh};

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        AppState::new(config, dir.path().join("vislab.json"))
    }

    fn press(state: &mut AppState, key: KeyCode) {
        state.handle_key(key, true);
        state.handle_key(key, false);
    }

    #[test]
    fn number_keys_select_scenes() {
        assert_eq!(
            action_for_key(KeyCode::Digit3),
            Some(Action::SelectScene(SceneId::Cube))
        );
        assert_eq!(action_for_key(KeyCode::F1), Some(Action::TogglePanel));
        assert_eq!(action_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn first_frame_uploads_start_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let Some(MeshUpload::Replace(meshes)) = state.pending_upload() else {
            panic!("first upload must replace every mesh");
        };
        assert!(!meshes.is_empty());
        assert_eq!(state.geometry.meshes, meshes.len());
        assert!(state.pending_upload().is_none());
    }

    #[test]
    fn switching_scene_triggers_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.pending_upload();

        press(&mut state, KeyCode::Digit3);
        assert_eq!(state.host.current(), SceneId::Cube);
        assert!(matches!(state.pending_upload(), Some(MeshUpload::Replace(_))));
        assert!(matches!(state.host.scene(), ActiveScene::Cube(_)));

        // Reselecting restarts the scene.
        state.select_scene(SceneId::Cube);
        assert!(matches!(state.pending_upload(), Some(MeshUpload::Replace(_))));
    }

    #[test]
    fn geometry_change_triggers_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.pending_upload();
        let before = state.geometry;
        if let ActiveScene::Primitives(scene) = state.host.scene_mut() {
            scene.set_segments(10);
        }
        assert!(matches!(state.pending_upload(), Some(MeshUpload::Update(_))));
        assert!(state.pending_upload().is_none());
        assert_eq!(state.geometry.meshes, before.meshes);
        assert!(state.geometry.vertices < before.vertices);
    }

    #[test]
    fn curve_edit_uploads_only_the_curve() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.select_scene(SceneId::CurveMesh);
        state.pending_upload();
        let total = state.geometry;

        let ActiveScene::CurveMesh(scene) = state.host.scene_mut() else {
            panic!("expected the curve scene");
        };
        let mut curve = *scene.curve();
        curve.b.y += 1.0;
        scene.set_curve(curve);

        let Some(MeshUpload::Update(meshes)) = state.pending_upload() else {
            panic!("a curve edit must not replace every mesh");
        };
        let keys: Vec<_> = meshes.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![curve_mesh::CURVE, curve_mesh::CONTROL_POINTS]);
        assert_eq!(state.geometry, total);
    }

    #[test]
    fn updates_run_at_fixed_rate() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.update((TICK_RATE * 2.5) as f32);
        assert_eq!(state.stats.updates(), 2);
        state.update((TICK_RATE * 0.6) as f32);
        assert_eq!(state.stats.updates(), 3);
        assert_eq!(state.stats.frames(), 2);
    }

    #[test]
    fn f1_toggles_panel() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        assert!(state.panel.visible);
        press(&mut state, KeyCode::F1);
        assert!(!state.panel.visible);
        press(&mut state, KeyCode::F1);
        assert!(state.panel.visible);
    }

    #[test]
    fn held_keys_move_free_camera_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        let start = state.fly_camera.position;
        state.handle_key(KeyCode::KeyW, true);
        state.update(0.05);
        // Scene 1 uses the fixed 2D camera.
        assert_eq!(state.fly_camera.position, start);

        state.select_scene(SceneId::Cube);
        state.pending_upload();
        state.update(0.05);
        assert_ne!(state.fly_camera.position, start);
    }

    #[test]
    fn releases_reach_the_app_even_when_the_ui_consumes_them() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.select_scene(SceneId::Cube);
        state.pending_upload();

        state.key_input(KeyCode::KeyW, true, false);
        state.right_button(true, false);
        assert_ne!(state.held.movement(), glam::Vec3::ZERO);
        assert!(state.mouse_captured());

        // The pointer moved over the panel before the buttons came up.
        state.key_input(KeyCode::KeyW, false, true);
        state.right_button(false, true);
        assert_eq!(state.held.movement(), glam::Vec3::ZERO);
        assert!(!state.mouse_captured());
    }

    #[test]
    fn presses_consumed_by_the_ui_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.key_input(KeyCode::Digit3, true, true);
        assert_eq!(state.host.current(), SceneId::Primitives);
        state.key_input(KeyCode::Digit3, true, false);
        assert_eq!(state.host.current(), SceneId::Cube);

        state.pending_upload();
        state.right_button(true, true);
        assert!(!state.mouse_captured());
    }

    #[test]
    fn details_image_comes_from_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!state_in(&dir).panel.has_details_image());

        image::RgbImage::from_pixel(8, 4, image::Rgb([120, 60, 30]))
            .save(dir.path().join(vislab_scenes::DETAILS_IMAGE_FILE))
            .unwrap();
        let state = state_in(&dir);
        assert!(state.panel.has_details_image());
        assert_eq!(state.host.resources().assets().len(), 1);
    }

    #[test]
    fn mouse_capture_needs_free_camera() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.set_mouse_captured(true);
        assert!(!state.mouse_captured());

        state.select_scene(SceneId::Lighting);
        state.pending_upload();
        state.set_mouse_captured(true);
        assert!(state.mouse_captured());
        press(&mut state, KeyCode::Escape);
        assert!(!state.mouse_captured());
    }

    #[test]
    fn flat_scene_uses_ortho_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.pending_upload();
        let view = state.prepare_frame();
        assert_eq!(view.eye, glam::Vec3::new(0.0, 0.0, 1.0));
        assert!(!state.draw_list().is_empty());
    }

    #[test]
    fn save_settings_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(&dir);
        state.settings.backface_culling = true;
        state.select_scene(SceneId::BinaryClock);
        state.pending_upload();
        state.save_settings();

        let saved = AppConfig::load(&dir.path().join("vislab.json")).unwrap();
        assert!(saved.render.backface_culling);
        assert_eq!(saved.start_scene, SceneId::BinaryClock);
    }
}
