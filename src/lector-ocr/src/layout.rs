use serde::{de, Deserialize, Deserializer, Serialize};

/// Page segmentation mode used by the engine's layout analysis
///
/// The discriminants are the engine's own values and are forwarded verbatim.
/// Profiles may name a mode (`"single_line"`) or give its number (`7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSegMode {
    /// Orientation and script detection only
    OsdOnly = 0,
    /// Automatic page segmentation with orientation and script detection
    AutoOsd = 1,
    /// Automatic page segmentation, no OSD or OCR
    AutoOnly = 2,
    /// Fully automatic page segmentation, no OSD (engine default)
    Auto = 3,
    SingleColumn = 4,
    SingleBlockVertText = 5,
    SingleBlock = 6,
    SingleLine = 7,
    SingleWord = 8,
    CircleWord = 9,
    SingleChar = 10,
    /// Find as much text as possible in no particular order
    SparseText = 11,
    SparseTextOsd = 12,
    /// Treat the image as a single text line, bypassing engine-specific hacks
    RawLine = 13,
}

impl PageSegMode {
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        let mode = match raw {
            0 => PageSegMode::OsdOnly,
            1 => PageSegMode::AutoOsd,
            2 => PageSegMode::AutoOnly,
            3 => PageSegMode::Auto,
            4 => PageSegMode::SingleColumn,
            5 => PageSegMode::SingleBlockVertText,
            6 => PageSegMode::SingleBlock,
            7 => PageSegMode::SingleLine,
            8 => PageSegMode::SingleWord,
            9 => PageSegMode::CircleWord,
            10 => PageSegMode::SingleChar,
            11 => PageSegMode::SparseText,
            12 => PageSegMode::SparseTextOsd,
            13 => PageSegMode::RawLine,
            _ => return None,
        };
        Some(mode)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let mode = match name {
            "osd_only" => PageSegMode::OsdOnly,
            "auto_osd" => PageSegMode::AutoOsd,
            "auto_only" => PageSegMode::AutoOnly,
            "auto" => PageSegMode::Auto,
            "single_column" => PageSegMode::SingleColumn,
            "single_block_vert_text" => PageSegMode::SingleBlockVertText,
            "single_block" => PageSegMode::SingleBlock,
            "single_line" => PageSegMode::SingleLine,
            "single_word" => PageSegMode::SingleWord,
            "circle_word" => PageSegMode::CircleWord,
            "single_char" => PageSegMode::SingleChar,
            "sparse_text" => PageSegMode::SparseText,
            "sparse_text_osd" => PageSegMode::SparseTextOsd,
            "raw_line" => PageSegMode::RawLine,
            _ => return None,
        };
        Some(mode)
    }
}

impl<'de> Deserialize<'de> for PageSegMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Raw(i64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Raw(raw) => i32::try_from(raw)
                .ok()
                .and_then(PageSegMode::from_raw)
                .ok_or_else(|| de::Error::custom(format!("unknown page segmentation mode {}", raw))),
            Repr::Name(name) => PageSegMode::from_name(&name)
                .ok_or_else(|| de::Error::custom(format!("unknown page segmentation mode '{}'", name))),
        }
    }
}
