use anyhow::{Context, Result, bail};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Deserialize)]
struct UserStyle {
    fg: Option<String>,
    bg: Option<String>,
    modifiers: Option<String>,
}

impl TryFrom<&UserStyle> for Style {
    type Error = anyhow::Error;

    fn try_from(user_style: &UserStyle) -> Result<Self> {
        let mut style = Style::default();

        if let Some(fg) = &user_style.fg {
            style = style.fg(parse_color(fg)?);
        }

        if let Some(bg) = &user_style.bg {
            style = style.bg(parse_color(bg)?);
        }

        if let Some(modifiers) = &user_style.modifiers {
            style.add_modifier = parse_modifiers(modifiers)?;
        }

        Ok(style)
    }
}

const COLOR_NAMES: [(&str, Color); 17] = [
    ("Black", Color::Black),
    ("Red", Color::Red),
    ("Green", Color::Green),
    ("Yellow", Color::Yellow),
    ("Blue", Color::Blue),
    ("Magenta", Color::Magenta),
    ("Cyan", Color::Cyan),
    ("Gray", Color::Gray),
    ("DarkGray", Color::DarkGray),
    ("LightRed", Color::LightRed),
    ("LightGreen", Color::LightGreen),
    ("LightYellow", Color::LightYellow),
    ("LightBlue", Color::LightBlue),
    ("LightMagenta", Color::LightMagenta),
    ("LightCyan", Color::LightCyan),
    ("White", Color::White),
    ("Reset", Color::Reset),
];

fn parse_color(color: &str) -> Result<Color> {
    if let Some((_, named)) = COLOR_NAMES.iter().find(|(name, _)| *name == color) {
        return Ok(*named);
    }

    let primaries: Vec<u8> = if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("\"{color}\" is an invalid hex color. It must be of the form \"#rrggbb\".");
        }

        (0..6)
            .step_by(2)
            .map(|idx| u8::from_str_radix(&hex[idx..idx + 2], 16))
            .collect::<Result<Vec<u8>, _>>()
            .with_context(|| format!("\"{color}\" contains a non-hexadecimal digit."))?
    } else if color.contains(',') {
        color
            .split(',')
            .map(|primary| primary.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .with_context(|| {
                format!("\"{color}\" is an invalid RGB color. Primaries range from 0 to 255.")
            })?
    } else {
        bail!(
            "\"{color}\" is not a valid color. Use a hex string, an \"r, g, b\" triple or one of: {}.",
            COLOR_NAMES.map(|(name, _)| name).join(", ")
        )
    };

    match primaries[..] {
        [red, green, blue] => Ok(Color::Rgb(red, green, blue)),
        _ => bail!("\"{color}\" must consist of exactly three primaries."),
    }
}

fn parse_modifiers(modifiers: &str) -> Result<Modifier> {
    modifiers
        .split_whitespace()
        .try_fold(Modifier::empty(), |acc, modifier| {
            let modifier = match modifier {
                "bold" => Modifier::BOLD,
                "dim" => Modifier::DIM,
                "italic" => Modifier::ITALIC,
                "underlined" => Modifier::UNDERLINED,
                "reversed" => Modifier::REVERSED,
                "crossed_out" => Modifier::CROSSED_OUT,
                _ => bail!(
                    "\"{modifier}\" is not a valid modifier. \
                    Valid modifiers are bold, dim, italic, underlined, reversed and crossed_out."
                ),
            };

            Ok(acc | modifier)
        })
}

#[derive(Deserialize)]
pub struct UserTheme {
    title: Option<UserStyle>,
    author: Option<UserStyle>,
    own_author: Option<UserStyle>,
    timestamp: Option<UserStyle>,
    body: Option<UserStyle>,
    search_match: Option<UserStyle>,
    following: Option<UserStyle>,
    error: Option<UserStyle>,
    warning: Option<UserStyle>,
    help: Option<UserStyle>,
}

pub struct Theme {
    pub title: Style,
    pub author: Style,
    pub own_author: Style,
    pub timestamp: Style,
    pub body: Style,
    pub search_match: Style,
    pub following: Style,
    pub error: Style,
    pub warning: Style,
    pub help: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            author: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            own_author: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            timestamp: Style::default().fg(Color::DarkGray),
            body: Style::default(),
            search_match: Style::default().fg(Color::Yellow),
            following: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red),
            warning: Style::default().fg(Color::Yellow),
            help: Style::default().fg(Color::Green),
        }
    }
}

impl TryFrom<UserTheme> for Theme {
    type Error = anyhow::Error;

    fn try_from(user_theme: UserTheme) -> Result<Self, Self::Error> {
        let mut theme = Theme::default();

        macro_rules! set_theme_field {
            ($($name: ident),*) => {
                $(
                    if let Some(style) = &user_theme.$name {
                        theme.$name = Style::try_from(style).with_context(|| {
                            format!("Error: couldn't set a field of \"{}\"", stringify!($name))
                        })?;
                    }
                )*
            };
        }

        set_theme_field!(
            title,
            author,
            own_author,
            timestamp,
            body,
            search_match,
            following,
            error,
            warning,
            help
        );

        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_color, parse_modifiers};
    use ratatui::style::{Color, Modifier};

    #[test]
    fn colors() {
        assert_eq!(parse_color("LightCyan").unwrap(), Color::LightCyan);
        assert_eq!(parse_color("#1e90ff").unwrap(), Color::Rgb(30, 144, 255));
        assert_eq!(parse_color("30, 144,255").unwrap(), Color::Rgb(30, 144, 255));

        assert!(parse_color("#1e90f").is_err());
        assert!(parse_color("#1e90fg").is_err());
        assert!(parse_color("30, 144").is_err());
        assert!(parse_color("30, 144, 256").is_err());
        assert!(parse_color("teal").is_err());
    }

    #[test]
    fn modifiers() {
        assert_eq!(
            parse_modifiers("bold  italic").unwrap(),
            Modifier::BOLD | Modifier::ITALIC
        );
        assert_eq!(parse_modifiers("").unwrap(), Modifier::empty());
        assert!(parse_modifiers("bold blinking").is_err());
    }
}
