//! Lane colors and titles.
//!
//! The board never matches on a status to pick a color; it asks the injected
//! [`Theme`]. Defaults live in [`DEFAULT_LANES`], and a JSON file can override
//! any of them:
//!
//! ```json
//! { "colors": { "TODO": "#4a90d9", "BACKLOG": "gray" }, "titles": { "BACKLOG": "Icebox" } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ThemeError;
use crate::fields::Status;

/// Used for in-progress work
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for completed work
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for the backlog
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);

/// Default accent per status, in display order.
pub const DEFAULT_LANES: [(Status, Color); 4] = [
    (Status::Todo, Color::Blue),
    (Status::InProgress, GOLD),
    (Status::Completed, DARK_GREEN),
    (Status::Backlog, DARK_PURPLE),
];

/// Presentation attributes of one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneStyle {
    pub accent: Color,
    pub title: String,
}

/// Status to presentation mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    lanes: [LaneStyle; 4],
}

#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    colors: BTreeMap<String, String>,
    #[serde(default)]
    titles: BTreeMap<String, String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            lanes: DEFAULT_LANES.map(|(status, accent)| LaneStyle {
                accent,
                title: status.label().to_string(),
            }),
        }
    }
}

impl Theme {
    /// Style for a status.
    pub fn style(&self, status: Status) -> &LaneStyle {
        &self.lanes[status.index()]
    }

    /// Readable foreground on top of a lane's accent.
    pub fn text_on(&self, status: Status) -> Color {
        match self.style(status).accent {
            GOLD | Color::Yellow | Color::LightYellow | Color::White => Color::Rgb(20, 20, 20),
            _ => Color::White,
        }
    }

    /// Load defaults plus the overrides in a JSON theme file.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let raw = fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ThemeFile = serde_json::from_str(&raw).map_err(|source| ThemeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Theme::default().with_overrides(&file.colors, &file.titles)
    }

    fn with_overrides(
        mut self,
        colors: &BTreeMap<String, String>,
        titles: &BTreeMap<String, String>,
    ) -> Result<Self, ThemeError> {
        for (key, value) in colors {
            let status = Status::from_str(key)?;
            let accent = Color::from_str(value).map_err(|_| ThemeError::InvalidColor {
                status: status.to_string(),
                color: value.clone(),
            })?;
            self.lanes[status.index()].accent = accent;
        }
        for (key, value) in titles {
            let status = Status::from_str(key)?;
            self.lanes[status.index()].title = value.clone();
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_theme(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn default_covers_every_status() {
        let theme = Theme::default();
        for status in Status::ALL {
            assert_eq!(theme.style(status).title, status.label());
        }
        assert_eq!(theme.style(Status::InProgress).accent, GOLD);
    }

    #[test]
    fn overrides_colors_and_titles() {
        let (_dir, path) =
            write_theme(r##"{"colors": {"todo": "#102030"}, "titles": {"BACKLOG": "Icebox"}}"##);
        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.style(Status::Todo).accent, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(theme.style(Status::Backlog).title, "Icebox");
        assert_eq!(theme.style(Status::Completed).accent, DARK_GREEN);
    }

    #[test]
    fn rejects_unknown_status_key() {
        let (_dir, path) = write_theme(r#"{"colors": {"DONE": "red"}}"#);
        assert!(matches!(Theme::load(&path), Err(ThemeError::Status(_))));
    }

    #[test]
    fn rejects_bad_color() {
        let (_dir, path) = write_theme(r#"{"colors": {"TODO": "not-a-color"}}"#);
        assert!(matches!(Theme::load(&path), Err(ThemeError::InvalidColor { .. })));
    }

    #[test]
    fn dark_text_on_gold() {
        let theme = Theme::default();
        assert_eq!(theme.text_on(Status::InProgress), Color::Rgb(20, 20, 20));
        assert_eq!(theme.text_on(Status::Todo), Color::White);
    }
}
