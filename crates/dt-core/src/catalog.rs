//! The static die catalog.
//!
//! Each die kind is described by a [`DieSpec`]: its id, display label, face
//! count, and a face table mapping every reachable value to the orientation
//! that shows that face on top. The tables are fixed geometry, built at
//! compile time; nothing here is computed while a roll is running.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::orientation::Orientation;

/// A die kind from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die (1-10).
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile tens die: ten faces valued 00, 10, ..., 90.
    D100,
}

impl DieKind {
    /// All kinds in catalog order.
    pub const ALL: [DieKind; 7] = [
        DieKind::D4,
        DieKind::D6,
        DieKind::D8,
        DieKind::D10,
        DieKind::D12,
        DieKind::D20,
        DieKind::D100,
    ];

    /// Resolve a die id such as `"d20"` (case-insensitive; `"d%"` is d100).
    pub fn from_id(id: &str) -> DiceResult<Self> {
        match id.trim().to_lowercase().as_str() {
            "d4" => Ok(Self::D4),
            "d6" => Ok(Self::D6),
            "d8" => Ok(Self::D8),
            "d10" => Ok(Self::D10),
            "d12" => Ok(Self::D12),
            "d20" => Ok(Self::D20),
            "d100" | "d%" => Ok(Self::D100),
            _ => Err(DiceError::InvalidDie(id.to_string())),
        }
    }

    /// The full catalog entry for this kind.
    pub fn spec(self) -> &'static DieSpec {
        // CATALOG is laid out in declaration order.
        &CATALOG[self as usize]
    }

    /// Canonical id, e.g. `"d20"`.
    pub fn id(self) -> &'static str {
        self.spec().id
    }

    /// Display label, e.g. `"D20"` or `"D%"`.
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// Number of physical faces.
    pub fn sides(self) -> u32 {
        self.spec().sides
    }

    /// Smallest value this die can show.
    pub fn min_value(self) -> u32 {
        self.spec().faces.iter().map(|f| f.value).min().unwrap_or(0)
    }

    /// Largest value this die can show.
    pub fn max_value(self) -> u32 {
        self.spec().faces.iter().map(|f| f.value).max().unwrap_or(0)
    }

    /// Render a rolled value for display. The d100's zero face reads "00".
    pub fn format_value(self, value: u32) -> String {
        match self {
            Self::D100 => format!("{value:02}"),
            _ => value.to_string(),
        }
    }
}

impl std::fmt::Display for DieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One face of a die: the value it shows and the pose that puts it on top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Face {
    /// The value printed on this face.
    pub value: u32,
    /// Orientation at which this face is up.
    pub orientation: Orientation,
}

impl Face {
    const BLANK: Self = Self::new(0, Orientation::IDENTITY);

    /// Create a face with an explicit terminal orientation.
    pub const fn new(value: u32, orientation: Orientation) -> Self {
        Self { value, orientation }
    }

    /// A face described by the rotation that brings it to the front; the
    /// face-up pose is the inverse of that rotation.
    const fn facing(value: u32, x: f32, y: f32, z: f32) -> Self {
        Self::new(value, Orientation::new(x, y, z).negated())
    }
}

/// Immutable catalog entry for one die kind.
#[derive(Debug, Serialize)]
pub struct DieSpec {
    /// The kind this entry describes.
    pub kind: DieKind,
    /// Canonical id.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Number of physical faces.
    pub sides: u32,
    /// Face table in face order. Each reachable value appears exactly once.
    pub faces: &'static [Face],
}

impl DieSpec {
    /// Terminal orientation for `value`, if the die has such a face.
    pub fn face(&self, value: u32) -> Option<Orientation> {
        self.faces
            .iter()
            .find(|f| f.value == value)
            .map(|f| f.orientation)
    }

    /// Terminal orientation for `value`, failing with `UnknownFace`.
    pub fn orientation_for(&self, value: u32) -> DiceResult<Orientation> {
        self.face(value).ok_or(DiceError::UnknownFace {
            die: self.kind,
            face: value,
        })
    }

    /// Every value this die can show, in face order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.faces.iter().map(|f| f.value)
    }
}

/// Summary row for building a selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieKindInfo {
    /// Canonical id.
    pub id: String,
    /// Display label.
    pub display_label: String,
    /// Number of physical faces.
    pub sides: u32,
}

/// Look up a catalog entry by id.
pub fn lookup(id: &str) -> DiceResult<&'static DieSpec> {
    DieKind::from_id(id).map(DieKind::spec)
}

/// All catalog entries in catalog order.
pub fn entries() -> &'static [DieSpec] {
    &CATALOG
}

/// Summary rows for every die kind, in catalog order.
pub fn list_kinds() -> Vec<DieKindInfo> {
    CATALOG
        .iter()
        .map(|spec| DieKindInfo {
            id: spec.id.to_string(),
            display_label: spec.label.to_string(),
            sides: spec.sides,
        })
        .collect()
}

static CATALOG: [DieSpec; 7] = [
    DieSpec {
        kind: DieKind::D4,
        id: "d4",
        label: "D4",
        sides: 4,
        faces: &D4_FACES,
    },
    DieSpec {
        kind: DieKind::D6,
        id: "d6",
        label: "D6",
        sides: 6,
        faces: &D6_FACES,
    },
    DieSpec {
        kind: DieKind::D8,
        id: "d8",
        label: "D8",
        sides: 8,
        faces: &D8_FACES,
    },
    DieSpec {
        kind: DieKind::D10,
        id: "d10",
        label: "D10",
        sides: 10,
        faces: &D10_FACES,
    },
    DieSpec {
        kind: DieKind::D12,
        id: "d12",
        label: "D12",
        sides: 12,
        faces: &D12_FACES,
    },
    DieSpec {
        kind: DieKind::D20,
        id: "d20",
        label: "D20",
        sides: 20,
        faces: &D20_FACES,
    },
    DieSpec {
        kind: DieKind::D100,
        id: "d100",
        label: "D%",
        sides: 10,
        faces: &D100_FACES,
    },
];

static D4_FACES: [Face; 4] = [
    Face::facing(1, 0.0, 0.0, 0.0),
    Face::facing(2, 0.0, 2.1, 0.0),
    Face::facing(3, 0.0, -2.1, 0.0),
    Face::facing(4, PI, 0.0, 0.0),
];

// The cube's poses are authored directly rather than inverted.
static D6_FACES: [Face; 6] = [
    Face::new(1, Orientation::new(FRAC_PI_2, 0.0, 0.0)),
    Face::new(2, Orientation::new(0.0, 0.0, 0.0)),
    Face::new(3, Orientation::new(0.0, 0.0, -FRAC_PI_2)),
    Face::new(4, Orientation::new(0.0, 0.0, FRAC_PI_2)),
    Face::new(5, Orientation::new(PI, 0.0, 0.0)),
    Face::new(6, Orientation::new(-FRAC_PI_2, 0.0, 0.0)),
];

static D8_FACES: [Face; 8] = octahedron();
static D10_FACES: [Face; 10] = pentagonal_trapezohedron(1, 1);
static D100_FACES: [Face; 10] = pentagonal_trapezohedron(10, 0);
static D12_FACES: [Face; 12] = dodecahedron();

static D20_FACES: [Face; 20] = [
    Face::facing(1, 0.0, 0.0, 0.0),
    Face::facing(2, 0.6, 0.8, 0.0),
    Face::facing(3, -0.6, 0.8, 0.0),
    Face::facing(4, -1.2, 0.0, 0.0),
    Face::facing(5, -0.6, -0.8, 0.0),
    Face::facing(6, 0.6, -0.8, 0.0),
    Face::facing(7, 1.2, 0.0, 0.0),
    Face::facing(8, 2.5, 0.8, 0.0),
    Face::facing(9, -2.5, 0.8, 0.0),
    Face::facing(10, -1.9, 0.0, 0.0),
    Face::facing(11, -2.5, -0.8, 0.0),
    Face::facing(12, 2.5, -0.8, 0.0),
    Face::facing(13, 1.9, 0.0, 0.0),
    Face::facing(14, PI, 0.0, 0.0),
    Face::facing(15, 0.8, 0.6, 0.0),
    Face::facing(16, 0.8, -0.6, 0.0),
    Face::facing(17, 0.0, -FRAC_PI_2, 0.0),
    Face::facing(18, -0.8, -0.6, 0.0),
    Face::facing(19, -0.8, 0.6, 0.0),
    Face::facing(20, 0.0, FRAC_PI_2, 0.0),
];

/// Alternating upper/lower faces around the Y axis, 45 degrees apart.
const fn octahedron() -> [Face; 8] {
    let mut faces = [Face::BLANK; 8];
    let mut i = 0;
    while i < 8 {
        let tilt = if i % 2 == 1 { PI / 3.0 } else { -PI / 3.0 };
        faces[i] = Face::facing(i as u32 + 1, tilt, i as f32 * PI / 4.0, 0.0);
        i += 1;
    }
    faces
}

/// Ten kite faces around the Y axis, 36 degrees apart. Face `i` shows
/// `i * step + offset`.
const fn pentagonal_trapezohedron(step: u32, offset: u32) -> [Face; 10] {
    let mut faces = [Face::BLANK; 10];
    let mut i = 0;
    while i < 10 {
        let tilt = if i % 2 == 1 { PI / 6.0 } else { -PI / 6.0 };
        let value = i as u32 * step + offset;
        faces[i] = Face::facing(value, tilt, i as f32 * PI / 5.0, 0.0);
        i += 1;
    }
    faces
}

/// Twelve faces in three tilt bands, 30 degrees apart around the Y axis.
const fn dodecahedron() -> [Face; 12] {
    let mut faces = [Face::BLANK; 12];
    let mut i = 0;
    while i < 12 {
        let band = (i % 3) as f32 - 1.0;
        faces[i] = Face::facing(i as u32 + 1, band * PI / 4.0, i as f32 * PI / 6.0, 0.0);
        i += 1;
    }
    faces
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn kinds_in_catalog_order() {
        let ids: Vec<String> = list_kinds().into_iter().map(|k| k.id).collect();
        assert_eq!(ids, ["d4", "d6", "d8", "d10", "d12", "d20", "d100"]);
    }

    #[test]
    fn spec_matches_kind() {
        for kind in DieKind::ALL {
            assert_eq!(kind.spec().kind, kind);
            assert_eq!(kind.spec().faces.len() as u32, kind.sides());
        }
    }

    #[test]
    fn every_entry_is_reached_by_its_own_kind() {
        for (index, spec) in entries().iter().enumerate() {
            assert!(std::ptr::eq(spec.kind.spec(), spec), "{}", spec.id);
            assert_eq!(DieKind::ALL[index], spec.kind);
            assert_eq!(DieKind::from_id(spec.id).unwrap().spec().id, spec.id);
        }
    }

    #[test]
    fn from_id_accepts_case_and_percent() {
        assert_eq!(DieKind::from_id("D20"), Ok(DieKind::D20));
        assert_eq!(DieKind::from_id(" d6 "), Ok(DieKind::D6));
        assert_eq!(DieKind::from_id("d%"), Ok(DieKind::D100));
    }

    #[test]
    fn lookup_unknown_die_fails() {
        assert_eq!(
            lookup("d7").unwrap_err(),
            DiceError::InvalidDie("d7".to_string())
        );
        assert!(lookup("").is_err());
    }

    #[test]
    fn every_face_value_appears_once() {
        for spec in entries() {
            let values: HashSet<u32> = spec.values().collect();
            assert_eq!(values.len(), spec.faces.len(), "{} repeats a face", spec.id);
        }
    }

    #[test]
    fn standard_dice_cover_one_to_sides() {
        for kind in DieKind::ALL.into_iter().filter(|k| *k != DieKind::D100) {
            let mut values: Vec<u32> = kind.spec().values().collect();
            values.sort_unstable();
            let expected: Vec<u32> = (1..=kind.sides()).collect();
            assert_eq!(values, expected, "{kind}");
        }
    }

    #[test]
    fn d100_faces_are_tens() {
        let values: Vec<u32> = DieKind::D100.spec().values().collect();
        assert_eq!(values, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert_eq!(DieKind::D100.min_value(), 0);
        assert_eq!(DieKind::D100.max_value(), 90);
    }

    #[test]
    fn face_orientations_are_distinct_per_die() {
        for spec in entries() {
            for (i, a) in spec.faces.iter().enumerate() {
                for b in &spec.faces[i + 1..] {
                    assert!(
                        a.orientation.distance_to(b.orientation) > 1e-3,
                        "{} faces {} and {} share a pose",
                        spec.id,
                        a.value,
                        b.value
                    );
                }
            }
        }
    }

    #[test]
    fn d20_face_up_is_inverse_rotation() {
        let o = DieKind::D20.spec().face(2).unwrap();
        assert_eq!(o, Orientation::new(-0.6, -0.8, -0.0));
        let o = DieKind::D20.spec().face(20).unwrap();
        assert!((o.y + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn d6_poses_are_authored() {
        let spec = DieKind::D6.spec();
        assert_eq!(spec.face(2), Some(Orientation::IDENTITY));
        assert_eq!(spec.face(5), Some(Orientation::new(PI, 0.0, 0.0)));
    }

    #[test]
    fn orientation_for_missing_face() {
        let err = DieKind::D6.spec().orientation_for(7).unwrap_err();
        assert_eq!(
            err,
            DiceError::UnknownFace {
                die: DieKind::D6,
                face: 7
            }
        );
        assert!(DieKind::D100.spec().orientation_for(5).is_err());
    }

    #[test]
    fn format_value_pads_percentile_zero() {
        assert_eq!(DieKind::D100.format_value(0), "00");
        assert_eq!(DieKind::D100.format_value(70), "70");
        assert_eq!(DieKind::D10.format_value(7), "7");
    }

    #[test]
    fn labels() {
        assert_eq!(DieKind::D100.label(), "D%");
        assert_eq!(DieKind::D12.label(), "D12");
        assert_eq!(DieKind::D8.to_string(), "d8");
    }

    #[test]
    fn serde_uses_ids() {
        let json = serde_json::to_string(&DieKind::D100).unwrap();
        assert_eq!(json, "\"d100\"");
        let kind: DieKind = serde_json::from_str("\"d12\"").unwrap();
        assert_eq!(kind, DieKind::D12);
    }
}
