//! Static workout type attributes used to color the calendar.

use phf::phf_ordered_map;
use serde::{Serialize, Serializer};
use std::fmt;

/// An sRGB color, formatted as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Display attributes of a workout type. Lower `priority` ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeAttributes {
    pub color: Rgb,
    pub priority: u32,
}

pub const FALLBACK: TypeAttributes = TypeAttributes {
    color: Rgb(0x75, 0x75, 0x75),
    priority: u32::MAX,
};

// Declared in priority order; the legend relies on it.
static WORKOUT_TYPES: phf::OrderedMap<&'static str, TypeAttributes> = phf_ordered_map! {
    "Yoga" => TypeAttributes { color: Rgb(0x7b, 0x68, 0xa6), priority: 1 },
    "Kettlebell Training" => TypeAttributes { color: Rgb(0xb8, 0x65, 0x8b), priority: 2 },
    "Powerlifting" => TypeAttributes { color: Rgb(0xb8, 0x54, 0x50), priority: 3 },
    "Golf" => TypeAttributes { color: Rgb(0x6b, 0x9a, 0x6e), priority: 4 },
    "Running" => TypeAttributes { color: Rgb(0x5b, 0x8f, 0xa3), priority: 5 },
    "Hiking" => TypeAttributes { color: Rgb(0xc4, 0xa3, 0x5a), priority: 6 },
};

/// Look up the attributes for a workout type.
///
/// Never fails: names missing from the table (matching is exact and
/// case-sensitive) get [`FALLBACK`], which ranks below every known type.
pub fn lookup(workout_type: &str) -> TypeAttributes {
    WORKOUT_TYPES.get(workout_type).copied().unwrap_or(FALLBACK)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub workout_type: &'static str,
    pub color: Rgb,
    pub priority: u32,
}

/// Known workout types in priority order.
pub fn legend() -> Vec<LegendEntry> {
    WORKOUT_TYPES
        .entries()
        .map(|(name, attrs)| LegendEntry {
            workout_type: *name,
            color: attrs.color,
            priority: attrs.priority,
        })
        .collect()
}
