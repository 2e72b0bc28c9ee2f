//! Output file naming and the publish hint.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Prefix of generated output files.
pub const OUTPUT_PREFIX: &str = "morele_transformed";

/// `morele_transformed_YYYYMMDD_HHMMSS.csv` for the given local time.
pub fn output_file_name(at: DateTime<Local>) -> String {
    format!("{OUTPUT_PREFIX}_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Timestamped output path inside `dir`.
pub fn output_path_in(dir: &Path, at: DateTime<Local>) -> PathBuf {
    dir.join(output_file_name(at))
}

/// Shell command that commits and pushes a written file.
///
/// Printed for the user to run; never executed here. The path is quoted
/// whenever it holds characters the shell would interpret.
pub fn publish_hint(file: &str) -> String {
    let message = format!("Add transformed CSV {file}");
    let message = if file.contains(['"', '$', '`', '\\', '!']) {
        shell_quote(&message)
    } else {
        format!("\"{message}\"")
    };
    format!("git add {} && git commit -m {message} && git push", shell_quote(file))
}

/// Single-quotes `value` for a POSIX shell unless it is made only of
/// characters that need no quoting.
pub fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value.chars().all(|ch| {
            ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | '+' | ':' | '@' | ',')
        });
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}
