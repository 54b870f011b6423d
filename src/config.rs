use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use cross_xdg::BaseDirs;
use nu_ansi_term::Color;

use crate::interpreter::{DEFAULT_CODE_LIMIT, DEFAULT_MEMORY_SIZE};
use crate::theme::catppuccin::Mocha;

/// Highlighter colors, one per instruction role.
#[derive(Debug, Clone)]
pub struct Colors {
    pub op_right: Color,        // '>'
    pub op_left: Color,         // '<'
    pub op_inc: Color,          // '+'
    pub op_dec: Color,          // '-'
    pub op_output: Color,       // '.'
    pub op_input: Color,        // ','
    pub op_bracket: Color,      // '[' and ']'
    pub non_instruction: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            op_right: Mocha::SKY,
            op_left: Mocha::TEAL,
            op_inc: Mocha::GREEN,
            op_dec: Mocha::RED,
            op_output: Mocha::YELLOW,
            op_input: Mocha::PEACH,
            op_bracket: Mocha::MAUVE,
            non_instruction: Mocha::SURFACE2,
        }
    }
}

/// Session settings read from `bfi.toml` in the XDG config directory.
#[derive(Debug, Clone)]
pub struct Settings {
    pub memory_size: usize,
    pub code_limit: usize,
    pub colors: Colors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            code_limit: DEFAULT_CODE_LIMIT,
            colors: Colors::default(),
        }
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| load_from_toml().unwrap_or_default())
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        // Byte slicing below is only safe on ASCII digits
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        return None;
    }

    // Named colors matching nu_ansi_term::Color variants
    let name = s.to_ascii_lowercase();
    Some(match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "purple" | "magenta" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "lightgray" | "light_gray" => Color::LightGray,
        "darkgray" | "dark_gray" | "darkgrey" | "dark_grey" => Color::DarkGray,
        "lightred" | "light_red" => Color::LightRed,
        "lightgreen" | "light_green" => Color::LightGreen,
        "lightyellow" | "light_yellow" => Color::LightYellow,
        "lightblue" | "light_blue" => Color::LightBlue,
        "lightpurple" | "light_purple" | "lightmagenta" | "light_magenta" => Color::LightPurple,
        "lightcyan" | "light_cyan" => Color::LightCyan,
        "default" => Color::Default,
        _ => return None,
    })
}

fn load_from_toml() -> Option<Settings> {
    let base_dirs = BaseDirs::new().unwrap();

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let config_home = base_dirs.config_home();

    let mut path = PathBuf::from(config_home);
    path.push("bfi.toml");

    let content = fs::read_to_string(path).ok()?;
    parse_settings(&content)
}

/// Very small hand-rolled parser: `[section]` headers, `key = value` pairs,
/// `#` comment lines, values optionally double-quoted. Anything it cannot
/// make sense of falls back to the defaults.
fn parse_settings(content: &str) -> Option<Settings> {
    let mut section = String::new();
    let mut interpreter: HashMap<String, String> = HashMap::new();
    let mut colors: HashMap<String, String> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            // Section headers may carry a trailing comment
            let header = line.split('#').next().unwrap_or("").trim();
            if header.ends_with(']') {
                section = header[1..header.len() - 1].to_string();
            }
            continue;
        }
        let Some(eq) = line.find('=') else { continue };
        let key = line[..eq].trim().to_string();
        let val_raw = line[eq + 1..].trim();
        // Accept quoted or unquoted; comments are stripped only outside quotes
        // so hex colors like "#cba6f7" survive.
        let val = if let Some(inner) = val_raw.strip_prefix('"') {
            match inner.find('"') {
                Some(end) => inner[..end].to_string(),
                None => inner.to_string(),
            }
        } else {
            val_raw.split('#').next().unwrap_or("").trim().to_string()
        };
        match section.as_str() {
            "interpreter" => {
                interpreter.insert(key, val);
            }
            "colors" => {
                colors.insert(key, val);
            }
            _ => {}
        }
    }

    let mut cfg = Settings::default();

    if let Some(n) = interpreter.get("memory_size").and_then(|s| s.parse::<usize>().ok()) {
        cfg.memory_size = n;
    }
    if let Some(n) = interpreter.get("code_limit").and_then(|s| s.parse::<usize>().ok()) {
        cfg.code_limit = n;
    }

    macro_rules! set {
        ($field:ident, $key:literal) => {
            if let Some(v) = colors.get($key).and_then(|s| parse_color(s)) {
                cfg.colors.$field = v;
            }
        };
    }

    set!(op_right, "op_right");
    set!(op_left, "op_left");
    set!(op_inc, "op_inc");
    set!(op_dec, "op_dec");
    set!(op_output, "op_output");
    set!(op_input, "op_input");
    set!(op_bracket, "op_bracket");
    set!(non_instruction, "non_instruction");

    Some(cfg)
}
