//! Visual style presets.

use strum::IntoEnumIterator;

/// Style used when none is given.
pub const DEFAULT_STYLE: &str = "Cinematic Realism";

/// Built-in visual styles offered to the user. Any free-text style is also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum StylePreset {
    /// Photorealistic film look
    CinematicRealism,
    /// Studio Ghibli inspired anime
    JapaneseAnime,
    /// Neon, high tech low life
    Cyberpunk,
    /// Soft painterly watercolor
    Watercolor,
    /// Black and white pencil noir
    NoirSketch,
    /// Pixar-style 3D render
    Animation3d,
    /// Halftone retro comic
    VintageComic,
    /// Impressionist brushwork
    OilPainting,
    /// 8-bit game art
    PixelArt,
    /// Stop-motion plasticine
    Claymation,
    /// Chinese ink wash painting
    InkWash,
    /// Geometric low-poly 3D
    LowPoly,
}

impl StylePreset {
    /// Style tag sent to the models.
    pub fn id(&self) -> &'static str {
        match self {
            StylePreset::CinematicRealism => DEFAULT_STYLE,
            StylePreset::JapaneseAnime => "Japanese Anime",
            StylePreset::Cyberpunk => "Cyberpunk",
            StylePreset::Watercolor => "Watercolor",
            StylePreset::NoirSketch => "Noir Sketch",
            StylePreset::Animation3d => "3D Animation",
            StylePreset::VintageComic => "Vintage Comic",
            StylePreset::OilPainting => "Oil Painting",
            StylePreset::PixelArt => "Pixel Art",
            StylePreset::Claymation => "Claymation",
            StylePreset::InkWash => "Ink Wash",
            StylePreset::LowPoly => "Low Poly",
        }
    }

    /// Short description of the look.
    pub fn description(&self) -> &'static str {
        match self {
            StylePreset::CinematicRealism => "Cinematic lighting, photorealistic, 4k",
            StylePreset::JapaneseAnime => "Anime style, Studio Ghibli inspired, vibrant",
            StylePreset::Cyberpunk => "Neon lights, high tech low life, futuristic",
            StylePreset::Watercolor => "Soft watercolor, artistic, painterly",
            StylePreset::NoirSketch => "Black and white, pencil sketch, noir comic",
            StylePreset::Animation3d => "Pixar style, 3D render, cute, clean",
            StylePreset::VintageComic => "Bold lines, halftone patterns, retro comic book",
            StylePreset::OilPainting => "Thick brushstrokes, impressionist style, artistic",
            StylePreset::PixelArt => "8-bit retro game style, pixelated",
            StylePreset::Claymation => "Stop motion, plasticine texture, playful",
            StylePreset::InkWash => "Chinese ink wash painting, calligraphy style",
            StylePreset::LowPoly => "Geometric, abstract 3D, minimal",
        }
    }

    /// Look up a preset by its id, ignoring case.
    pub fn find(id: &str) -> Option<Self> {
        Self::iter().find(|preset| preset.id().eq_ignore_ascii_case(id.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_presets_with_unique_ids() {
        let ids: std::collections::HashSet<_> = StylePreset::iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(StylePreset::find("pixel art"), Some(StylePreset::PixelArt));
        assert_eq!(StylePreset::find("Vaporwave"), None);
    }
}
