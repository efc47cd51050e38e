//! Colour presets.
//!
//! A preset maps every token class to a colour. The same mapping feeds
//! the generated stylesheet and, through [`ansi_color`], the terminal
//! preview.

use codeglow_syntax::TokenClass;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

/// Hex colour without the leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(&'static str);

impl Color {
    pub const fn hex(value: &'static str) -> Self {
        Self(value)
    }

    pub fn as_hex(&self) -> &'static str {
        self.0
    }
}

/// Colours for one preset.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub class_name: Color,
    pub method: Color,
    pub property: Color,
    pub variable: Color,
    pub keyword: Color,
    pub number: Color,
    pub comment: Color,
    pub string: Color,
}

impl Palette {
    /// Colour for `class`; `None` for classes that stay unstyled.
    pub fn color(&self, class: TokenClass) -> Option<Color> {
        match class {
            TokenClass::ClassName => Some(self.class_name),
            TokenClass::Method => Some(self.method),
            TokenClass::Property => Some(self.property),
            TokenClass::Variable => Some(self.variable),
            TokenClass::Keyword => Some(self.keyword),
            TokenClass::Number => Some(self.number),
            TokenClass::Comment => Some(self.comment),
            TokenClass::String => Some(self.string),
            TokenClass::Blank => None,
        }
    }
}

const RIDER: Palette = Palette {
    background: Color::hex("262626"),
    class_name: Color::hex("c19fff"),
    method: Color::hex("39cc9b"),
    property: Color::hex("66c3cc"),
    variable: Color::hex("ffffff"),
    keyword: Color::hex("6c95eb"),
    number: Color::hex("ed94c0"),
    comment: Color::hex("85c46c"),
    string: Color::hex("c9a26d"),
};

const VISUAL_STUDIO: Palette = Palette {
    background: Color::hex("1e1e1e"),
    class_name: Color::hex("4ec9b0"),
    method: Color::hex("dcdcaa"),
    property: Color::hex("dcdcdc"),
    variable: Color::hex("9cdcfe"),
    keyword: Color::hex("569cd6"),
    number: Color::hex("b5cea8"),
    comment: Color::hex("57a64a"),
    string: Color::hex("d69d85"),
};

/// Available presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyntaxPreset {
    /// JetBrains Rider
    #[default]
    Rider,
    /// Visual Studio dark
    VisualStudio,
}

impl SyntaxPreset {
    pub const ALL: [SyntaxPreset; 2] = [SyntaxPreset::Rider, SyntaxPreset::VisualStudio];

    pub fn name(&self) -> &'static str {
        match self {
            SyntaxPreset::Rider => "RIDER",
            SyntaxPreset::VisualStudio => "VISUAL_STUDIO",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            SyntaxPreset::Rider => &RIDER,
            SyntaxPreset::VisualStudio => &VISUAL_STUDIO,
        }
    }

    /// Stylesheet for the snippet container and every styled class.
    pub fn css(&self) -> String {
        let palette = self.palette();
        let background = palette.background.as_hex();

        let mut css = format!(
            r#"
.code-container {{
    background-color: #{background};
    padding: 12px;
    box-shadow: 0 4px 8px rgba(0, 0, 0, 0.2);
    width: fit-content;
    margin: 0 auto;
}}

.code-header {{
    background-color: #{background};
    padding: 0.5rem 1rem 0.5rem 9px;
    display: flex;
    align-items: center;
}}

pre {{
    letter-spacing: 0.25px;
    font-family: 'Hack', monospace;
    padding: 5px;
    background-color: #{background};
    color: white;
    overflow: auto;
    margin: 0;
}}
"#
        );

        for class in TokenClass::ALL {
            if let Some(color) = palette.color(class) {
                let _ = write!(
                    css,
                    "\n.{} {{\n    color: #{};\n}}\n",
                    class.css_class(),
                    color.as_hex()
                );
            }
        }

        css
    }
}

impl FromStr for SyntaxPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyntaxPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// 256-colour terminal code for `class`.
pub fn ansi_color(class: Option<TokenClass>) -> u8 {
    match class {
        Some(TokenClass::ClassName) => 141,
        Some(TokenClass::Method) => 79,
        Some(TokenClass::Property) => 110,
        Some(TokenClass::Variable) => 231,
        Some(TokenClass::Keyword) => 104,
        Some(TokenClass::Number) => 218,
        Some(TokenClass::Comment) => 108,
        Some(TokenClass::String) => 143,
        Some(TokenClass::Blank) | None => 231,
    }
}
