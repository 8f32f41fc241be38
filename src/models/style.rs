use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtStyle {
    #[serde(rename = "디지털아트")]
    DigitalArt,
    #[serde(rename = "수채화")]
    Watercolor,
    #[serde(rename = "유화")]
    OilPainting,
    #[serde(rename = "펜화")]
    PenAndInk,
    #[serde(rename = "연필화")]
    PencilSketch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTone {
    #[serde(rename = "밝은")]
    Bright,
    #[serde(rename = "어두운")]
    Dark,
    #[serde(rename = "파스텔")]
    Pastel,
    #[serde(rename = "흑백")]
    Monochrome,
    #[serde(rename = "컬러풀")]
    Colorful,
}

impl ArtStyle {
    pub const ALL: [ArtStyle; 5] = [
        ArtStyle::DigitalArt,
        ArtStyle::Watercolor,
        ArtStyle::OilPainting,
        ArtStyle::PenAndInk,
        ArtStyle::PencilSketch,
    ];

    /// Wire label, as shown in the style picker.
    pub fn label(&self) -> &'static str {
        match self {
            ArtStyle::DigitalArt => "디지털아트",
            ArtStyle::Watercolor => "수채화",
            ArtStyle::OilPainting => "유화",
            ArtStyle::PenAndInk => "펜화",
            ArtStyle::PencilSketch => "연필화",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.label() == label)
    }
}

impl ColorTone {
    pub const ALL: [ColorTone; 5] = [
        ColorTone::Bright,
        ColorTone::Dark,
        ColorTone::Pastel,
        ColorTone::Monochrome,
        ColorTone::Colorful,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColorTone::Bright => "밝은",
            ColorTone::Dark => "어두운",
            ColorTone::Pastel => "파스텔",
            ColorTone::Monochrome => "흑백",
            ColorTone::Colorful => "컬러풀",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tone| tone.label() == label)
    }
}

impl fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ColorTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    pub art_style: ArtStyle,
    pub color_tone: ColorTone,
}

impl StyleOptions {
    pub fn new(art_style: ArtStyle, color_tone: ColorTone) -> Self {
        Self {
            art_style,
            color_tone,
        }
    }
}
