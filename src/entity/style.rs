// src/entity/style.rs
use serde::{Deserialize, Serialize};

/// The fixed palette a note can be filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Yellow,
    Pink,
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Gray,
}

impl NoteColor {
    pub const ALL: [NoteColor; 8] = [
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Purple,
        NoteColor::Orange,
        NoteColor::Red,
        NoteColor::Gray,
    ];

    /// Background fill as a CSS hex string.
    pub fn hex(&self) -> &'static str {
        match self {
            NoteColor::Yellow => "#fef08a",
            NoteColor::Pink => "#fbcfe8",
            NoteColor::Blue => "#bfdbfe",
            NoteColor::Green => "#bbf7d0",
            NoteColor::Purple => "#e9d5ff",
            NoteColor::Orange => "#fed7aa",
            NoteColor::Red => "#fecaca",
            NoteColor::Gray => "#e5e7eb",
        }
    }
}

impl std::fmt::Display for NoteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteColor::Yellow => write!(f, "yellow"),
            NoteColor::Pink => write!(f, "pink"),
            NoteColor::Blue => write!(f, "blue"),
            NoteColor::Green => write!(f, "green"),
            NoteColor::Purple => write!(f, "purple"),
            NoteColor::Orange => write!(f, "orange"),
            NoteColor::Red => write!(f, "red"),
            NoteColor::Gray => write!(f, "gray"),
        }
    }
}

impl std::str::FromStr for NoteColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yellow" => Ok(NoteColor::Yellow),
            "pink" => Ok(NoteColor::Pink),
            "blue" => Ok(NoteColor::Blue),
            "green" => Ok(NoteColor::Green),
            "purple" => Ok(NoteColor::Purple),
            "orange" => Ok(NoteColor::Orange),
            "red" => Ok(NoteColor::Red),
            "gray" | "grey" => Ok(NoteColor::Gray),
            _ => Err(format!("Invalid note color: {}", s)),
        }
    }
}

/// Font size in pixels. Only the sizes offered by the note toolbar are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum FontSize {
    Px12,
    #[default]
    Px14,
    Px16,
    Px18,
    Px20,
}

impl FontSize {
    pub const ALL: [FontSize; 5] = [
        FontSize::Px12,
        FontSize::Px14,
        FontSize::Px16,
        FontSize::Px18,
        FontSize::Px20,
    ];

    pub fn px(&self) -> u8 {
        match self {
            FontSize::Px12 => 12,
            FontSize::Px14 => 14,
            FontSize::Px16 => 16,
            FontSize::Px18 => 18,
            FontSize::Px20 => 20,
        }
    }
}

impl TryFrom<u8> for FontSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FontSize::ALL
            .into_iter()
            .find(|size| size.px() == value)
            .ok_or_else(|| {
                let allowed: Vec<String> =
                    FontSize::ALL.iter().map(|s| s.px().to_string()).collect();
                format!(
                    "Invalid font size: {} (expected one of {})",
                    value,
                    allowed.join(", ")
                )
            })
    }
}

impl From<FontSize> for u8 {
    fn from(size: FontSize) -> u8 {
        size.px()
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.px())
    }
}

impl std::str::FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches("px");
        let value: u8 = digits
            .parse()
            .map_err(|_| format!("Invalid font size: {}", s))?;
        FontSize::try_from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
    Handwriting,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Sans,
        FontFamily::Serif,
        FontFamily::Mono,
        FontFamily::Handwriting,
    ];

    /// CSS font stack used when rendering the note body.
    pub fn stack(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Inter, system-ui, sans-serif",
            FontFamily::Serif => "Georgia, 'Times New Roman', serif",
            FontFamily::Mono => "'JetBrains Mono', Menlo, monospace",
            FontFamily::Handwriting => "'Comic Sans MS', 'Marker Felt', cursive",
        }
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontFamily::Sans => write!(f, "sans"),
            FontFamily::Serif => write!(f, "serif"),
            FontFamily::Mono => write!(f, "mono"),
            FontFamily::Handwriting => write!(f, "handwriting"),
        }
    }
}

impl std::str::FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sans" | "sans-serif" => Ok(FontFamily::Sans),
            "serif" => Ok(FontFamily::Serif),
            "mono" | "monospace" => Ok(FontFamily::Mono),
            "handwriting" | "cursive" => Ok(FontFamily::Handwriting),
            _ => Err(format!("Invalid font family: {}", s)),
        }
    }
}
