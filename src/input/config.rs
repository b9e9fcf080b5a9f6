use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::input::toml_input::Settings;
use crate::latex_generator::{ReportStyle, StatusColors, DEFAULT_COLUMN_WIDTHS};
use crate::project::ROW_WIDTH;
use crate::time::RunDate;
use crate::utils;

const DEFAULT_INPUT: &str = "tmp/project-data.json";
const DEFAULT_CURRENT: &str = "appendix/project-summary/current-project.csv";
const DEFAULT_PREVIOUS: &str = "tmp/previous-project.csv";
const DEFAULT_OUTPUT: &str = "appendix/project-summary/project-changes.tex";

/// Everything a run of the project changes report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    input: PathBuf,
    current: PathBuf,
    previous: PathBuf,
    output: PathBuf,
    style: ReportStyle,
    date: Option<RunDate>,
}

pub struct ConfigBuilder {
    settings: Settings,
    input: Option<PathBuf>,
    current: Option<PathBuf>,
    previous: Option<PathBuf>,
    output: Option<PathBuf>,
    date: Option<RunDate>,
}

impl ConfigBuilder {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            input: None,
            current: None,
            previous: None,
            output: None,
            date: None,
        }
    }

    pub fn input(&mut self, input: impl Into<PathBuf>) -> &mut Self {
        self.input = Some(input.into());
        self
    }

    pub fn current(&mut self, current: impl Into<PathBuf>) -> &mut Self {
        self.current = Some(current.into());
        self
    }

    pub fn previous(&mut self, previous: impl Into<PathBuf>) -> &mut Self {
        self.previous = Some(previous.into());
        self
    }

    pub fn output(&mut self, output: impl Into<PathBuf>) -> &mut Self {
        self.output = Some(output.into());
        self
    }

    /// Heads the report with `date` instead of today.
    pub fn date(&mut self, date: RunDate) -> &mut Self {
        self.date = Some(date);
        self
    }

    fn style(&self) -> anyhow::Result<ReportStyle> {
        let report = self.settings.report();

        let column_widths: [u32; ROW_WIDTH] = match report.column_widths() {
            Some(widths) => widths.try_into().map_err(|_| {
                anyhow::anyhow!(
                    "expected {} column widths, found {}",
                    ROW_WIDTH,
                    widths.len()
                )
            })?,
            None => DEFAULT_COLUMN_WIDTHS,
        };

        let mut colors = match report.colors() {
            Some(colors) => StatusColors::new(colors.clone(), "white"),
            None => StatusColors::default(),
        };

        if let Some(header) = report.header_color() {
            colors.set_header(header);
        }

        Ok(ReportStyle::new(column_widths, colors))
    }

    pub fn build(self) -> anyhow::Result<Config> {
        let style = self.style()?;
        let paths = self.settings.paths();

        let pick = |flag: Option<PathBuf>, setting: Option<&Path>, default: &str| {
            flag.or_else(|| setting.map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Ok(Config {
            input: pick(self.input, paths.input(), DEFAULT_INPUT),
            current: pick(self.current, paths.current(), DEFAULT_CURRENT),
            previous: pick(self.previous, paths.previous(), DEFAULT_PREVIOUS),
            output: pick(self.output, paths.output(), DEFAULT_OUTPUT),
            style,
            date: self.date,
        })
    }
}

impl Config {
    /// Starts from the built-in defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new(Settings::default())
    }

    #[must_use]
    pub fn from_settings(settings: Settings) -> ConfigBuilder {
        ConfigBuilder::new(settings)
    }

    pub fn try_from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<ConfigBuilder> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        let settings: Settings = utils::toml_from_reader(file)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        Ok(Self::from_settings(settings))
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn style(&self) -> &ReportStyle {
        &self.style
    }

    /// The date the report section is headed with, today unless overridden.
    pub fn date(&self) -> RunDate {
        self.date.unwrap_or_else(RunDate::today)
    }
}
