//! UERANSIM UE configuration rendering.
//!
//! Each seeded subscriber needs a matching UE configuration file. The UE
//! template is plain YAML text; only its `supi:` line is rewritten, so
//! comments and layout survive untouched.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Dir;

use crate::atomic_io::write_atomic;
use crate::error::UeConfigError;
use crate::imsi::{Imsi, ImsiRange};

const SUPI_KEY: &str = "supi:";

/// Formats the SUPI UERANSIM expects for an IMSI.
///
/// # Example
///
/// ```
/// use subscriber_data::{Imsi, supi_for};
///
/// let imsi = Imsi::parse("208930000000001").expect("valid IMSI");
/// assert_eq!(supi_for(imsi), "imsi-208930000000001");
/// ```
#[must_use]
pub fn supi_for(imsi: Imsi) -> String {
    format!("imsi-{imsi}")
}

/// A UE configuration template with a substitutable `supi:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeConfigTemplate {
    text: String,
    supi_line: usize,
}

impl UeConfigTemplate {
    /// Parses template text, locating the first `supi:` line.
    ///
    /// # Errors
    ///
    /// Returns [`UeConfigError::MissingSupi`] when no line starts with
    /// `supi:`.
    ///
    /// # Example
    ///
    /// ```
    /// use subscriber_data::{Imsi, UeConfigTemplate};
    ///
    /// let template = UeConfigTemplate::parse("supi: \"imsi-208930000000001\"\nmcc: '208'\n")
    ///     .expect("template has a supi line");
    /// let imsi = Imsi::parse("208930000000007").expect("valid IMSI");
    ///
    /// assert_eq!(
    ///     template.render(imsi),
    ///     "supi: \"imsi-208930000000007\"\nmcc: '208'\n"
    /// );
    /// ```
    pub fn parse(text: impl Into<String>) -> Result<Self, UeConfigError> {
        let text = text.into();
        let supi_line = text
            .split_inclusive('\n')
            .position(|line| line.trim_start().starts_with(SUPI_KEY))
            .ok_or(UeConfigError::MissingSupi)?;
        Ok(Self { text, supi_line })
    }

    /// Loads template text from a file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`UeConfigError`] if the file cannot be read or has no
    /// `supi:` line.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, UeConfigError> {
        let text = dir
            .read_to_string(path)
            .map_err(|e| UeConfigError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::parse(text)
    }

    /// Renders the template with the SUPI for `imsi`.
    #[must_use]
    pub fn render(&self, imsi: Imsi) -> String {
        let mut rendered = String::with_capacity(self.text.len());
        for (index, line) in self.text.split_inclusive('\n').enumerate() {
            if index != self.supi_line {
                rendered.push_str(line);
                continue;
            }
            let content = line.trim_start();
            rendered.push_str(line.strip_suffix(content).unwrap_or_default());
            rendered.push_str(&format!("{SUPI_KEY} \"{}\"", supi_for(imsi)));
            rendered.push_str(line_ending(line));
        }
        rendered
    }
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Writes one rendered configuration per identifier in `range` into `dir`.
///
/// Files are named `<prefix>-<n>.yaml`, with `n` counting from 1 in range
/// order. Existing files with the same names are replaced atomically.
///
/// # Errors
///
/// Returns [`UeConfigError::InvalidPrefix`] when `prefix` is empty or holds a
/// path separator, or [`UeConfigError::WriteError`] when a file cannot be
/// written. Files written before the failure are left in place.
pub fn write_ue_configs(
    dir: &Dir,
    template: &UeConfigTemplate,
    range: ImsiRange,
    prefix: &str,
) -> Result<Vec<Utf8PathBuf>, UeConfigError> {
    if prefix.is_empty()
        || prefix.starts_with('.')
        || prefix.contains(['/', '\\'])
    {
        return Err(UeConfigError::InvalidPrefix {
            prefix: prefix.to_owned(),
        });
    }

    let mut written = Vec::new();
    for (ordinal, imsi) in (1_u64..).zip(range.iter()) {
        let file_name = Utf8PathBuf::from(format!("{prefix}-{ordinal}.yaml"));
        write_atomic(dir, &file_name, &template.render(imsi))?;
        written.push(file_name);
    }
    Ok(written)
}
