//! Per-widget asset bundle: templated stylesheet plus the client script.
//!
//! The stylesheet ships as a fixed template with a known set of
//! placeholders, one per derived state color; filling it in is a plain
//! key-value substitution, not a templating engine. The client script is a
//! separately authored, fixed-behavior collaborator and is copied out
//! byte-for-byte.
//!
//! Each invocation gets its own freshly created temp directory so that
//! concurrent builds in the same process cannot clobber each other's
//! stylesheet variant. The directory's lifetime is tied to the host
//! process; no cleanup contract is offered.

use crate::error::CountdownError;
use crate::style::Palette;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// The stylesheet template shipped with the crate.
pub(crate) const STYLESHEET_TEMPLATE: &str = include_str!("../assets/countdown.css");

/// The fixed client script shipped with the crate.
pub const CLIENT_SCRIPT: &str = include_str!("../assets/countdown.js");

const STYLESHEET_NAME: &str = "countdown.css";
const SCRIPT_NAME: &str = "countdown.js";

/// Locations of one widget's written assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundle {
    /// The private directory holding this widget's assets.
    pub dir: PathBuf,
    /// The stylesheet with this widget's colors substituted in.
    pub stylesheet: PathBuf,
    /// The unmodified client script.
    pub script: PathBuf,
}

/// Fill the stylesheet template with a resolved palette.
pub(crate) fn render_stylesheet(palette: &Palette) -> String {
    let substitutions = [
        ("{{running_background}}", &palette.running.background),
        ("{{running_border}}", &palette.running.border),
        ("{{running_text}}", &palette.running.text),
        ("{{finished_background}}", &palette.finished.background),
        ("{{finished_border}}", &palette.finished.border),
        ("{{finished_text}}", &palette.finished.text),
        ("{{warning_background}}", &palette.warning.background),
        ("{{warning_border}}", &palette.warning.border),
        ("{{warning_text}}", &palette.warning.text),
    ];
    let mut sheet = STYLESHEET_TEMPLATE.to_string();
    for (placeholder, value) in substitutions {
        sheet = sheet.replace(placeholder, value);
    }
    sheet
}

/// Write one widget's asset bundle into a fresh private directory.
pub(crate) fn write(palette: &Palette) -> Result<AssetBundle, CountdownError> {
    let dir = tempfile::Builder::new()
        .prefix("countdown-")
        .tempdir()?
        .keep();

    let stylesheet = dir.join(STYLESHEET_NAME);
    fs::write(&stylesheet, render_stylesheet(palette))?;

    let script = dir.join(SCRIPT_NAME);
    fs::write(&script, CLIENT_SCRIPT)?;

    debug!(dir = %dir.display(), "wrote countdown widget assets");

    Ok(AssetBundle {
        dir,
        stylesheet,
        script,
    })
}
