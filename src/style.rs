use crate::models::{ArtStyle, ColorTone, StyleOptions};

pub const QUALITY_SUFFIX: &str = "high quality, masterpiece";

pub const NEGATIVE_PROMPT: &str =
    "blurry, low quality, distorted, deformed, nsfw, inappropriate content, violence, hate, discrimination";

pub fn art_style_phrase(style: ArtStyle) -> &'static str {
    match style {
        ArtStyle::DigitalArt => "digital art, highly detailed, professional quality",
        ArtStyle::Watercolor => "watercolor painting, soft brushstrokes, artistic",
        ArtStyle::OilPainting => "oil painting, textured brushstrokes, canvas",
        ArtStyle::PenAndInk => "pen and ink drawing, line art, detailed linework",
        ArtStyle::PencilSketch => "pencil sketch, detailed shading, graphite drawing",
    }
}

pub fn color_tone_phrase(tone: ColorTone) -> &'static str {
    match tone {
        ColorTone::Bright => "bright colors, vibrant, high key lighting",
        ColorTone::Dark => "dark tones, moody, low key lighting",
        ColorTone::Pastel => "pastel colors, soft tones, gentle hues",
        ColorTone::Monochrome => "black and white, monochrome, grayscale",
        ColorTone::Colorful => "colorful, saturated colors, rainbow palette",
    }
}

pub fn compose(options: &StyleOptions) -> String {
    format!(
        "{}, {}",
        art_style_phrase(options.art_style),
        color_tone_phrase(options.color_tone)
    )
}

/// Same as [`compose`] but over raw labels; an unknown label is used as-is.
pub fn compose_labels(art_style: &str, color_tone: &str) -> String {
    let art = ArtStyle::from_label(art_style).map_or(art_style, |style| art_style_phrase(style));
    let tone = ColorTone::from_label(color_tone).map_or(color_tone, |tone| color_tone_phrase(tone));
    format!("{}, {}", art, tone)
}

/// Final prompt sent downstream. `prompt` must already be sanitized.
pub fn enhance_prompt(prompt: &str, options: &StyleOptions) -> String {
    format!("{}, {}, {}", prompt, compose(options), QUALITY_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_digital_bright() {
        let options = StyleOptions::new(ArtStyle::DigitalArt, ColorTone::Bright);
        assert_eq!(
            compose(&options),
            "digital art, highly detailed, professional quality, bright colors, vibrant, high key lighting"
        );
    }

    #[test]
    fn test_compose_is_deterministic_over_all_options() {
        for art in ArtStyle::ALL {
            for tone in ColorTone::ALL {
                let options = StyleOptions::new(art, tone);
                let first = compose(&options);
                assert_eq!(first, compose(&options));
                assert_eq!(first, compose_labels(art.label(), tone.label()));
            }
        }
    }

    #[test]
    fn test_compose_labels_falls_back_to_raw_value() {
        assert_eq!(
            compose_labels("cubism", "밝은"),
            "cubism, bright colors, vibrant, high key lighting"
        );
        assert_eq!(compose_labels("", "sepia"), ", sepia");
    }

    #[test]
    fn test_enhance_prompt() {
        let options = StyleOptions::new(ArtStyle::DigitalArt, ColorTone::Bright);
        let enhanced = enhance_prompt("a cat in space", &options);
        assert!(enhanced.starts_with("a cat in space, digital art"));
        assert!(enhanced.ends_with(", high quality, masterpiece"));
    }
}
