//! The fixed brick palette and nearest-colour lookup.
//!
//! Physical bricks come in a small fixed set of colours; every pipeline
//! output is drawn from this set. Entries are looked up only by nearest
//! distance and never constructed dynamically.

use std::sync::OnceLock;

use serde::Serialize;

use super::space::{rgb_to_lab, Lab};
use super::Colour;

/// One colour a physical brick is available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BrickColour {
    /// Stable part-catalogue id.
    pub id: u16,
    /// Kebab-case colour name.
    pub name: &'static str,
    /// The colour value (always opaque).
    pub colour: Colour,
}

const fn entry(id: u16, name: &'static str, r: u8, g: u8, b: u8) -> BrickColour {
    BrickColour {
        id,
        name,
        colour: Colour::rgb(r, g, b),
    }
}

/// The standard 32-colour brick palette.
const STANDARD: [BrickColour; 32] = [
    entry(1, "white", 242, 243, 242),
    entry(2, "light-gray", 160, 165, 169),
    entry(3, "dark-gray", 99, 95, 97),
    entry(4, "black", 27, 42, 52),
    entry(5, "red", 196, 40, 27),
    entry(6, "dark-red", 123, 46, 47),
    entry(7, "reddish-orange", 226, 78, 27),
    entry(8, "orange", 218, 133, 64),
    entry(9, "bright-yellow", 245, 205, 47),
    entry(10, "cool-yellow", 253, 234, 140),
    entry(11, "lime", 164, 189, 70),
    entry(12, "bright-green", 75, 151, 74),
    entry(13, "green", 40, 127, 70),
    entry(14, "dark-green", 39, 70, 44),
    entry(15, "teal", 0, 143, 155),
    entry(16, "azure", 53, 146, 195),
    entry(17, "light-blue", 180, 210, 227),
    entry(18, "medium-blue", 110, 153, 201),
    entry(19, "blue", 13, 105, 171),
    entry(20, "dark-blue", 32, 58, 86),
    entry(21, "sand-blue", 116, 134, 156),
    entry(22, "purple", 123, 93, 163),
    entry(23, "lavender", 188, 166, 208),
    entry(24, "magenta", 146, 57, 120),
    entry(25, "pink", 230, 178, 206),
    entry(26, "salmon", 238, 148, 121),
    entry(27, "tan", 215, 197, 153),
    entry(28, "nougat", 204, 142, 104),
    entry(29, "brown", 105, 64, 39),
    entry(30, "dark-brown", 72, 43, 28),
    entry(31, "olive", 124, 114, 64),
    entry(32, "sand-green", 120, 144, 129),
];

/// The fixed set of buildable colours, with a precomputed Lab table for
/// perceptual lookups.
#[derive(Debug, Clone)]
pub struct BrickPalette {
    entries: Vec<BrickColour>,
    lab: Vec<Lab>,
}

impl BrickPalette {
    /// Build a palette from a fixed entry list.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty; nearest-colour lookup must always have
    /// a member to return.
    pub fn new(entries: &[BrickColour]) -> Self {
        assert!(!entries.is_empty(), "palette requires at least one entry");
        let lab = entries
            .iter()
            .map(|e| rgb_to_lab(e.colour.r, e.colour.g, e.colour.b))
            .collect();
        Self {
            entries: entries.to_vec(),
            lab,
        }
    }

    /// The standard brick palette.
    pub fn standard() -> &'static BrickPalette {
        static PALETTE: OnceLock<BrickPalette> = OnceLock::new();
        PALETTE.get_or_init(|| BrickPalette::new(&STANDARD))
    }

    /// The palette entry nearest to a colour, by Euclidean RGB distance.
    ///
    /// Total and deterministic: every input maps to some entry, and ties
    /// keep the earliest declared entry.
    pub fn nearest(&self, colour: Colour) -> BrickColour {
        let mut best = self.entries[0];
        let mut best_dist = u32::MAX;

        for e in &self.entries {
            let dist = colour.distance_sq(e.colour);
            if dist < best_dist {
                best_dist = dist;
                best = *e;
            }
        }

        best
    }

    /// The palette entry nearest to a colour, by Euclidean Lab distance.
    ///
    /// Used by the perceptual filters; same totality and tie-break rules
    /// as [`nearest`](Self::nearest).
    pub fn nearest_lab(&self, colour: Colour) -> BrickColour {
        let target = rgb_to_lab(colour.r, colour.g, colour.b);

        let mut best = self.entries[0];
        let mut best_dist = f32::MAX;

        for (e, lab) in self.entries.iter().zip(&self.lab) {
            let dist = target.distance_sq(*lab);
            if dist < best_dist {
                best_dist = dist;
                best = *e;
            }
        }

        best
    }

    /// Look up an entry by name.
    pub fn by_name(&self, name: &str) -> Option<BrickColour> {
        self.entries.iter().find(|e| e.name == name).copied()
    }

    /// Look up an entry by part-catalogue id.
    pub fn by_id(&self, id: u16) -> Option<BrickColour> {
        self.entries.iter().find(|e| e.id == id).copied()
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[BrickColour] {
        &self.entries
    }

    /// All entry names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// The neutral entries (greys), brightest first.
    ///
    /// Used by the grayscale and sketch filters as a tone ramp.
    pub fn neutral_ramp(&self) -> Vec<BrickColour> {
        let mut ramp: Vec<BrickColour> = self
            .entries
            .iter()
            .filter(|e| {
                let c = e.colour;
                let (_, s, l) = super::space::rgb_to_hsl(c.r, c.g, c.b);
                s < 0.08 || l < 0.16
            })
            .copied()
            .collect();
        ramp.sort_by(|a, b| {
            b.colour
                .luminance()
                .partial_cmp(&a.colour.luminance())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ramp
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
