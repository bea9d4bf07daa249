use harfrust::{Direction as HbDirection, Script as HbScript, Tag as HbTag};
use unicode_script::Script;

/// Horizontal writing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::RightToLeft)
    }
}

impl From<Direction> for HbDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::LeftToRight => HbDirection::LeftToRight,
            Direction::RightToLeft => HbDirection::RightToLeft,
        }
    }
}

/// Scripts written right-to-left, by ISO 15924 code.
const RTL_SCRIPTS: &[&str] = &[
    "Adlm", "Arab", "Armi", "Avst", "Chrs", "Cprt", "Elym", "Hatr", "Hebr", "Hung", "Khar",
    "Lydi", "Mand", "Mani", "Mend", "Merc", "Mero", "Narb", "Nbat", "Nkoo", "Orkh", "Ougr",
    "Palm", "Phli", "Phlp", "Phnx", "Prti", "Rohg", "Samr", "Sarb", "Sogd", "Sogo", "Syrc",
    "Thaa", "Yezi",
];

/// Scripts historically written in either direction; they carry no default.
const UNDIRECTED_SCRIPTS: &[&str] = &["Ital", "Runr", "Tfng"];

/// Default horizontal direction of a script.
///
/// This is a property of the script alone and only configures the shaping
/// engine's glyph ordering; paint order comes from the bidi levels.
/// Returns `None` for scripts without a fixed direction.
pub fn horizontal_direction(script: Script) -> Option<Direction> {
    let code = script.short_name();
    if RTL_SCRIPTS.contains(&code) {
        Some(Direction::RightToLeft)
    } else if UNDIRECTED_SCRIPTS.contains(&code) {
        None
    } else {
        Some(Direction::LeftToRight)
    }
}

/// Shaping-engine script for a Unicode script.
pub fn shaping_script(script: Script) -> Option<HbScript> {
    let code: [u8; 4] = script.short_name().as_bytes().try_into().ok()?;
    HbScript::from_iso15924_tag(HbTag::new(&code))
}
