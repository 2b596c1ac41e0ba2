use serde::{Deserialize, Deserializer, Serialize};

/// Editor colour theme. Serialized under the lexer's theme names so settings
/// files written by older editors keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "Default")]
    Light,
    #[serde(rename = "Dark")]
    Dark,
}

impl Theme {
    /// Name understood by the syntax lexer and stored in settings.
    pub fn lexer_name(&self) -> &'static str {
        match self {
            Self::Light => "Default",
            Self::Dark => "Dark",
        }
    }

    /// Parse a lexer theme name. Anything but `"Dark"` is the light theme.
    pub fn from_lexer_name(name: &str) -> Self {
        if name == "Dark" { Self::Dark } else { Self::Light }
    }

    /// Serde reader that maps unknown or null names to the light theme
    /// instead of failing the surrounding document.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map_or_else(Self::default, Self::from_lexer_name))
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn caret_color(&self) -> Rgb {
        match self {
            Self::Light => Rgb::new(0, 0, 0),
            Self::Dark => Rgb::new(167, 167, 167),
        }
    }

    /// Selection background. `None` means the platform highlight colour.
    pub fn selection_color(&self) -> Option<Rgba> {
        match self {
            Self::Light => None,
            Self::Dark => Some(Rgba::new(221, 240, 255, 45)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A colour with alpha, flattened onto a background by widgets that cannot
/// draw translucent selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: u8) -> Self {
        Self { rgb: Rgb::new(r, g, b), alpha }
    }

    pub fn over(&self, background: Rgb) -> Rgb {
        let a = self.alpha as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
        Rgb::new(
            mix(self.rgb.r, background.r),
            mix(self.rgb.g, background.g),
            mix(self.rgb.b, background.b),
        )
    }
}

/// Colours of an inline error annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationStyle {
    pub foreground: Rgb,
    pub background: Rgb,
}

const DARK_ERROR_STYLE: AnnotationStyle = AnnotationStyle {
    foreground: Rgb::new(255, 220, 220),
    background: Rgb::new(184, 50, 50),
};

const LIGHT_ERROR_STYLE: AnnotationStyle = AnnotationStyle {
    foreground: Rgb::new(0, 0, 0),
    background: Rgb::new(230, 150, 150),
};

/// Error annotation style for a theme.
pub fn style_for(theme: Theme) -> AnnotationStyle {
    match theme {
        Theme::Light => LIGHT_ERROR_STYLE,
        Theme::Dark => DARK_ERROR_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_names() {
        assert_eq!(Theme::Light.lexer_name(), "Default");
        assert_eq!(Theme::Dark.lexer_name(), "Dark");
        assert_eq!(Theme::from_lexer_name("Dark"), Theme::Dark);
        assert_eq!(Theme::from_lexer_name("Default"), Theme::Light);
        assert_eq!(Theme::from_lexer_name("Twilight"), Theme::Light);
    }

    #[test]
    fn test_serialized_as_lexer_name() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"Default\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"Dark\"");
        let theme: Theme = serde_json::from_str("\"Dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn test_style_for_each_theme() {
        assert_eq!(style_for(Theme::Dark).background, Rgb::new(184, 50, 50));
        assert_eq!(style_for(Theme::Light).foreground, Rgb::new(0, 0, 0));
        assert_ne!(style_for(Theme::Dark), style_for(Theme::Light));
    }

    #[test]
    fn test_chrome_colors() {
        assert_eq!(Theme::Dark.caret_color(), Rgb::new(167, 167, 167));
        assert_eq!(Theme::Light.caret_color(), Rgb::new(0, 0, 0));
        assert!(Theme::Light.selection_color().is_none());
        assert_eq!(Theme::Dark.selection_color().unwrap().alpha, 45);
    }

    #[test]
    fn test_alpha_blend() {
        let opaque = Rgba::new(10, 20, 30, 255);
        assert_eq!(opaque.over(Rgb::new(200, 200, 200)), Rgb::new(10, 20, 30));
        let clear = Rgba::new(10, 20, 30, 0);
        assert_eq!(clear.over(Rgb::new(200, 200, 200)), Rgb::new(200, 200, 200));
        let half = Rgba::new(255, 255, 255, 128);
        let blended = half.over(Rgb::new(0, 0, 0));
        assert_eq!(blended, Rgb::new(128, 128, 128));
    }
}
