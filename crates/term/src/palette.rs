//! Named color themes for the terminal view.
//!
//! A theme only recolors the chrome (frame, panels, text). Piece colors come
//! from the core's color tags and are the same in every theme.

use crate::fb::Rgb;
use crate::types::ColorTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub background: Rgb,
    pub board: Rgb,
    pub grid: Rgb,
    pub border: Rgb,
    pub label: Rgb,
    pub counter: Rgb,
    pub overlay: Rgb,
}

const fn theme(
    name: &'static str,
    background: Rgb,
    board: Rgb,
    border: Rgb,
    label: Rgb,
    counter: Rgb,
) -> Palette {
    Palette {
        name,
        background,
        board,
        grid: Rgb::new(
            board.r.saturating_add(50),
            board.g.saturating_add(50),
            board.b.saturating_add(50),
        ),
        border,
        label,
        counter,
        overlay: Rgb::new(255, 255, 255),
    }
}

pub const THEMES: [Palette; 10] = [
    theme(
        "Lights_City",
        Rgb::new(10, 10, 24),
        Rgb::new(24, 24, 44),
        Rgb::new(250, 200, 90),
        Rgb::new(240, 240, 255),
        Rgb::new(250, 200, 90),
    ),
    theme(
        "Cyan",
        Rgb::new(0, 20, 26),
        Rgb::new(6, 40, 48),
        Rgb::new(80, 220, 230),
        Rgb::new(210, 250, 255),
        Rgb::new(80, 220, 230),
    ),
    theme(
        "Pink",
        Rgb::new(26, 6, 20),
        Rgb::new(46, 16, 38),
        Rgb::new(240, 120, 200),
        Rgb::new(255, 225, 245),
        Rgb::new(240, 120, 200),
    ),
    theme(
        "Yellow",
        Rgb::new(24, 22, 4),
        Rgb::new(42, 40, 14),
        Rgb::new(240, 220, 80),
        Rgb::new(255, 250, 220),
        Rgb::new(240, 220, 80),
    ),
    theme(
        "Green",
        Rgb::new(4, 22, 8),
        Rgb::new(14, 40, 20),
        Rgb::new(110, 230, 130),
        Rgb::new(225, 255, 230),
        Rgb::new(110, 230, 130),
    ),
    theme(
        "Cyber_Punk",
        Rgb::new(14, 0, 26),
        Rgb::new(30, 8, 48),
        Rgb::new(255, 0, 160),
        Rgb::new(0, 255, 240),
        Rgb::new(255, 230, 0),
    ),
    theme(
        "Neon_Dance",
        Rgb::new(6, 6, 20),
        Rgb::new(16, 16, 40),
        Rgb::new(120, 80, 255),
        Rgb::new(255, 255, 255),
        Rgb::new(60, 255, 120),
    ),
    theme(
        "Cyber_Tropics",
        Rgb::new(0, 24, 22),
        Rgb::new(8, 44, 40),
        Rgb::new(255, 140, 60),
        Rgb::new(230, 255, 250),
        Rgb::new(255, 200, 60),
    ),
    theme(
        "Cosmos_Melody",
        Rgb::new(8, 4, 24),
        Rgb::new(20, 14, 46),
        Rgb::new(160, 140, 255),
        Rgb::new(235, 230, 255),
        Rgb::new(255, 160, 220),
    ),
    theme(
        "Cyber_Shine",
        Rgb::new(16, 16, 16),
        Rgb::new(32, 32, 32),
        Rgb::new(200, 200, 210),
        Rgb::new(255, 255, 255),
        Rgb::new(0, 200, 255),
    ),
];

impl Palette {
    /// Look up a theme by name; unknown names get the default theme.
    pub fn from_name(name: &str) -> Self {
        THEMES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
            .unwrap_or_default()
    }

    /// Screen color for a piece color tag.
    pub fn piece(&self, tag: ColorTag) -> Rgb {
        match tag {
            ColorTag::Cyan => Rgb::new(80, 220, 230),
            ColorTag::Yellow => Rgb::new(240, 220, 80),
            ColorTag::Red => Rgb::new(230, 80, 80),
            ColorTag::Green => Rgb::new(100, 220, 120),
            ColorTag::Orange => Rgb::new(255, 165, 0),
            ColorTag::Pink => Rgb::new(240, 120, 200),
            ColorTag::Purple => Rgb::new(170, 110, 230),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        THEMES[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert_eq!(Palette::from_name("Cyber_Punk").name, "Cyber_Punk");
        assert_eq!(Palette::from_name("cyan").name, "Cyan");
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(Palette::from_name("Sepia"), Palette::default());
        assert_eq!(Palette::default().name, "Lights_City");
    }

    #[test]
    fn piece_colors_are_distinct() {
        let p = Palette::default();
        let tags = [
            ColorTag::Cyan,
            ColorTag::Yellow,
            ColorTag::Red,
            ColorTag::Green,
            ColorTag::Orange,
            ColorTag::Pink,
            ColorTag::Purple,
        ];
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                assert_ne!(p.piece(*a), p.piece(*b));
            }
        }
    }
}
