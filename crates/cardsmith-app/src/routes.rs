//! Screens and their paths.

use std::fmt;

/// Where the app currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Editor,
    /// A saved card, keyed by its exact name
    View(String),
    Gallery,
}

impl Screen {
    /// Path for this screen; view names are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Screen::Landing => "/".to_string(),
            Screen::Editor => "/editor".to_string(),
            Screen::View(name) => format!("/view/{}", urlencoding::encode(name)),
            Screen::Gallery => "/gallery".to_string(),
        }
    }

    /// Inverse of [`path`](Self::path). Unknown paths and view segments that
    /// do not decode to UTF-8 give `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Screen::Landing),
            "/editor" => Some(Screen::Editor),
            "/gallery" => Some(Screen::Gallery),
            _ => {
                let encoded = path.strip_prefix("/view/")?;
                if encoded.is_empty() || encoded.contains('/') {
                    return None;
                }
                let name = urlencoding::decode(encoded).ok()?;
                Some(Screen::View(name.into_owned()))
            }
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
