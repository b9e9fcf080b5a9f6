use std::convert::Infallible;
use std::ops::Deref;
use std::str::FromStr;

use derive_more::Display;

/// Text that is safe to place inside a LaTeX document.
#[derive(Debug, Clone, Display, PartialEq, Eq)]
#[display("{}", _0)]
pub struct LatexString(String);

impl LatexString {
    #[must_use]
    pub fn escape(value: &str) -> Self {
        LatexString(v_latexescape::escape(value).to_string())
    }

    /// Wraps text that is already valid LaTeX without escaping it.
    #[must_use]
    pub fn verbatim(value: impl Into<String>) -> Self {
        LatexString(value.into())
    }
}

impl FromStr for LatexString {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::escape(value))
    }
}

impl Deref for LatexString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
