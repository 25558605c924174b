use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear RGBA color.
pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Identifies one of the demo scenes.
///
/// The numeric form (1-based) is what the control panel buttons, the number
/// keys, the CLI and saved settings use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum SceneId {
    #[default]
    Primitives,
    BinaryClock,
    Cube,
    CurveMesh,
    Lighting,
}

/// Which camera a scene is viewed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    /// Fixed orthographic view of the z = 0 plane.
    Ortho2D,
    /// Free-flying 3D camera.
    Free,
}

impl SceneId {
    pub const ALL: [SceneId; 5] = [
        SceneId::Primitives,
        SceneId::BinaryClock,
        SceneId::Cube,
        SceneId::CurveMesh,
        SceneId::Lighting,
    ];

    pub fn number(self) -> u8 {
        match self {
            SceneId::Primitives => 1,
            SceneId::BinaryClock => 2,
            SceneId::Cube => 3,
            SceneId::CurveMesh => 4,
            SceneId::Lighting => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.number() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneId::Primitives => "Primitives",
            SceneId::BinaryClock => "Binary Clock",
            SceneId::Cube => "Cube",
            SceneId::CurveMesh => "Curve Mesh",
            SceneId::Lighting => "Lighting",
        }
    }

    /// Text for the details window.
    pub fn description(self) -> &'static str {
        match self {
            SceneId::Primitives => {
                "Basic primitives drawn from small vertex buffers: a filled polygon \
                 built as a triangle fan, a circle outline drawn as a line strip, a \
                 quad made of two indexed triangles and a row of points."
            }
            SceneId::BinaryClock => {
                "A clock counting elapsed seconds in binary. Each digit reuses one of \
                 two meshes uploaded once: an elliptical ring for zero and a bar for \
                 one. The clock wraps after the last digit overflows."
            }
            SceneId::Cube => {
                "A cube with one colour per vertex, interpolated across its faces. \
                 Its edges are drawn again as black lines, and the world axes are \
                 shown in red, green and blue."
            }
            SceneId::CurveMesh => {
                "A loaded mesh travels back and forth along a cubic Bezier curve. The \
                 curve and its control points are drawn as lines and points above a \
                 lit ground plane."
            }
            SceneId::Lighting => {
                "A cube lit by a single point light, shown as a small white cube. \
                 Ambient, diffuse and specular terms are editable, and lighting can \
                 be evaluated per fragment (Phong) or per vertex (Gouraud)."
            }
        }
    }

    pub fn camera_kind(self) -> CameraKind {
        match self {
            SceneId::Primitives | SceneId::BinaryClock => CameraKind::Ortho2D,
            SceneId::Cube | SceneId::CurveMesh | SceneId::Lighting => CameraKind::Free,
        }
    }

    pub fn next(self) -> Self {
        let n = self.number() % Self::ALL.len() as u8 + 1;
        Self::from_number(n).unwrap_or(self)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scene {} ({})", self.number(), self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene {0:?}: expected a number between 1 and 5")]
pub struct ParseSceneIdError(pub String);

impl TryFrom<u8> for SceneId {
    type Error = ParseSceneIdError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| ParseSceneIdError(n.to_string()))
    }
}

impl From<SceneId> for u8 {
    fn from(id: SceneId) -> u8 {
        id.number()
    }
}

impl FromStr for SceneId {
    type Err = ParseSceneIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| ParseSceneIdError(s.to_string()))
    }
}

/// Global render parameters edited from the Camera tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub clear_color: [f32; 3],
    pub perspective: bool,
    pub backface_culling: bool,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.45, 0.55, 0.60],
            perspective: true,
            backface_culling: false,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl RenderSettings {
    pub const MIN_NEAR: f32 = 0.01;
    pub const MIN_DEPTH_RANGE: f32 = 0.01;

    /// Returns a copy whose frustum planes are usable: `near` is positive
    /// and `far` lies strictly beyond it.
    pub fn sanitized(&self) -> Self {
        let near = if self.near.is_finite() {
            self.near.max(Self::MIN_NEAR)
        } else {
            Self::default().near
        };
        let far = if self.far.is_finite() {
            self.far.max(near + Self::MIN_DEPTH_RANGE)
        } else {
            Self::default().far.max(near + Self::MIN_DEPTH_RANGE)
        };
        Self { near, far, ..*self }
    }

    pub fn clear_rgba(&self) -> Rgba {
        let [r, g, b] = self.clear_color;
        [r, g, b, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_numbers_round_trip() {
        for id in SceneId::ALL {
            assert_eq!(SceneId::from_number(id.number()), Some(id));
        }
        assert_eq!(SceneId::from_number(0), None);
        assert_eq!(SceneId::from_number(6), None);
    }

    #[test]
    fn scene_parse_from_str() {
        assert_eq!("4".parse::<SceneId>(), Ok(SceneId::CurveMesh));
        assert_eq!(" 2 ".parse::<SceneId>(), Ok(SceneId::BinaryClock));
        assert!("seven".parse::<SceneId>().is_err());
        assert!("9".parse::<SceneId>().is_err());
    }

    #[test]
    fn scenes_have_distinct_descriptions() {
        let mut texts: Vec<_> = SceneId::ALL.iter().map(|id| id.description()).collect();
        texts.dedup();
        assert_eq!(texts.len(), SceneId::ALL.len());
        assert!(texts.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn scene_serializes_as_its_number() {
        assert_eq!(serde_json::to_string(&SceneId::Cube).unwrap(), "3");
        let id: SceneId = serde_json::from_str("5").unwrap();
        assert_eq!(id, SceneId::Lighting);
        assert!(serde_json::from_str::<SceneId>("6").is_err());
        assert!(serde_json::from_str::<SceneId>("\"Cube\"").is_err());
    }

    #[test]
    fn next_scene_wraps() {
        assert_eq!(SceneId::Primitives.next(), SceneId::BinaryClock);
        assert_eq!(SceneId::Lighting.next(), SceneId::Primitives);
    }

    #[test]
    fn flat_scenes_use_ortho_camera() {
        assert_eq!(SceneId::BinaryClock.camera_kind(), CameraKind::Ortho2D);
        assert_eq!(SceneId::Lighting.camera_kind(), CameraKind::Free);
    }

    #[test]
    fn sanitize_fixes_inverted_planes() {
        let s = RenderSettings {
            near: -5.0,
            far: -10.0,
            ..RenderSettings::default()
        }
        .sanitized();
        assert_eq!(s.near, RenderSettings::MIN_NEAR);
        assert!(s.far > s.near);
    }

    #[test]
    fn sanitize_keeps_valid_planes() {
        let s = RenderSettings::default();
        assert_eq!(s.sanitized(), s);
    }

    #[test]
    fn settings_deserialize_with_missing_fields() {
        let s: RenderSettings = serde_json::from_str(r#"{"perspective": false}"#).unwrap();
        assert!(!s.perspective);
        assert_eq!(s.far, RenderSettings::default().far);
    }
}
