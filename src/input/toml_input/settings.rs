use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Paths {
    input: Option<PathBuf>,
    current: Option<PathBuf>,
    previous: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Paths {
    #[must_use]
    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn previous(&self) -> Option<&Path> {
        self.previous.as_deref()
    }

    #[must_use]
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Report {
    column_widths: Option<Vec<u32>>,
    header_color: Option<String>,
    /// Replaces the built-in status colors when present.
    colors: Option<HashMap<String, String>>,
}

impl Report {
    #[must_use]
    pub fn column_widths(&self) -> Option<&[u32]> {
        self.column_widths.as_deref()
    }

    #[must_use]
    pub fn header_color(&self) -> Option<&str> {
        self.header_color.as_deref()
    }

    #[must_use]
    pub fn colors(&self) -> Option<&HashMap<String, String>> {
        self.colors.as_ref()
    }
}

/// The optional settings file of the `changes` and `seed` commands.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    paths: Paths,
    #[serde(default)]
    report: Report,
}

impl Settings {
    #[must_use]
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_settings() {
        let settings: Settings = toml::from_str("").expect("toml should be valid");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_settings() {
        let settings: Settings = toml::from_str(concat!(
            //
            "[paths]\n",
            "current = \"summary/current.csv\"\n",
            "\n",
            "[report]\n",
            "column_widths = [40, 150, 35, 33, 33, 40]\n",
            "\n",
            "[report.colors]\n",
            "\"In Review\" = \"LightBlue1\"\n",
        ))
        .expect("toml should be valid");

        assert_eq!(
            settings.paths().current(),
            Some(Path::new("summary/current.csv"))
        );
        assert_eq!(settings.paths().input(), None);
        assert_eq!(
            settings.report().column_widths(),
            Some([40, 150, 35, 33, 33, 40].as_slice())
        );
        assert_eq!(
            settings
                .report()
                .colors()
                .and_then(|colors| colors.get("In Review"))
                .map(String::as_str),
            Some("LightBlue1")
        );
    }
}
