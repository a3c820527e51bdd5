//! Theme tables and the light → dark → high-contrast cycle.
//!
//! Each table maps semantic UI roles to colors. Exactly three tables
//! exist; the active one is selected by `ThemeKind` and replaced as a
//! whole on toggle.

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
    HighContrast,
}

impl ThemeKind {
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::HighContrast,
            ThemeKind::HighContrast => ThemeKind::Light,
        }
    }

    pub fn table(self) -> &'static ThemeTable {
        match self {
            ThemeKind::Light => &LIGHT_THEME,
            ThemeKind::Dark => &DARK_THEME,
            ThemeKind::HighContrast => &HIGH_CONTRAST_THEME,
        }
    }

    pub fn label(self) -> &'static str {
        self.table().name
    }
}

/// Fixed role → color mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTable {
    pub name: &'static str,
    pub bg: Rgb,
    pub header: Rgb,
    pub card: Rgb,
    pub card_border: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub button_primary: Rgb,
    pub button_secondary: Rgb,
    pub status_bar: Rgb,
    pub status_text: Rgb,
    pub image_bg: Rgb,
    pub positive: Rgb,
    pub negative: Rgb,
    pub no_tumor_box: Rgb,
    pub accent: Rgb,
    pub warning: Rgb,
}

pub static LIGHT_THEME: ThemeTable = ThemeTable {
    name: "Light",
    bg: Rgb::new(0xf8, 0xf9, 0xfa),
    header: Rgb::new(0x2c, 0x3e, 0x50),
    card: Rgb::new(0xff, 0xff, 0xff),
    card_border: Rgb::new(0xe0, 0xe0, 0xe0),
    text_primary: Rgb::new(0x2c, 0x3e, 0x50),
    text_secondary: Rgb::new(0x7f, 0x8c, 0x8d),
    button_primary: Rgb::new(0x34, 0x98, 0xdb),
    button_secondary: Rgb::new(0x2e, 0xcc, 0x71),
    status_bar: Rgb::new(0x2c, 0x3e, 0x50),
    status_text: Rgb::new(0xbd, 0xc3, 0xc7),
    image_bg: Rgb::new(0xf1, 0xf3, 0xf5),
    positive: Rgb::new(0xe7, 0x4c, 0x3c),
    negative: Rgb::new(0x27, 0xae, 0x60),
    no_tumor_box: Rgb::new(0xff, 0xff, 0xff),
    accent: Rgb::new(0x9b, 0x59, 0xb6),
    warning: Rgb::new(0xf3, 0x9c, 0x12),
};

pub static DARK_THEME: ThemeTable = ThemeTable {
    name: "Dark",
    bg: Rgb::new(0x12, 0x12, 0x12),
    header: Rgb::new(0x1a, 0x1a, 0x1a),
    card: Rgb::new(0x1e, 0x1e, 0x1e),
    card_border: Rgb::new(0x33, 0x33, 0x33),
    text_primary: Rgb::new(0xff, 0xff, 0xff),
    text_secondary: Rgb::new(0xb3, 0xb3, 0xb3),
    button_primary: Rgb::new(0x19, 0x76, 0xd2),
    button_secondary: Rgb::new(0x38, 0x8e, 0x3c),
    status_bar: Rgb::new(0x1a, 0x1a, 0x1a),
    status_text: Rgb::new(0x75, 0x75, 0x75),
    image_bg: Rgb::new(0x2d, 0x2d, 0x2d),
    positive: Rgb::new(0xe7, 0x4c, 0x3c),
    negative: Rgb::new(0x2e, 0xcc, 0x71),
    no_tumor_box: Rgb::new(0xff, 0xff, 0xff),
    accent: Rgb::new(0x8e, 0x44, 0xad),
    warning: Rgb::new(0xd3, 0x54, 0x00),
};

pub static HIGH_CONTRAST_THEME: ThemeTable = ThemeTable {
    name: "High Contrast",
    bg: Rgb::new(0x00, 0x00, 0x00),
    header: Rgb::new(0x00, 0x00, 0x00),
    card: Rgb::new(0x00, 0x00, 0x00),
    card_border: Rgb::new(0xff, 0xff, 0xff),
    text_primary: Rgb::new(0xff, 0xff, 0xff),
    text_secondary: Rgb::new(0xcc, 0xcc, 0xcc),
    button_primary: Rgb::new(0xff, 0x00, 0x00),
    button_secondary: Rgb::new(0x00, 0xff, 0x00),
    status_bar: Rgb::new(0x00, 0x00, 0x00),
    status_text: Rgb::new(0xff, 0xff, 0xff),
    image_bg: Rgb::new(0x00, 0x00, 0x00),
    positive: Rgb::new(0xff, 0x00, 0x00),
    negative: Rgb::new(0x00, 0xff, 0x00),
    no_tumor_box: Rgb::new(0xff, 0xff, 0xff),
    accent: Rgb::new(0xff, 0xff, 0x00),
    warning: Rgb::new(0xff, 0xa5, 0x00),
};
