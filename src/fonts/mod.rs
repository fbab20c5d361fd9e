//! Font discovery and loading for the genpdf engine.

use std::env;
use std::path::{Path, PathBuf};

use genpdf::fonts::{self, FontData, FontFamily};
use log::warn;

use crate::error::{Error, Result};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable overriding the bundled font directory.
pub const FONTS_DIR_ENV: &str = "PDF_FACADE_FONTS_DIR";

const FONT_FILE_SUFFIXES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

const WINDOWS_FALLBACK_FAMILY_NAME: &str = "Arial";

struct WindowsFontFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const WINDOWS_FONT_FILES: WindowsFontFiles = WindowsFontFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

/// File names genpdf expects for the family `name`.
pub fn family_file_names(name: &str) -> Vec<String> {
    FONT_FILE_SUFFIXES
        .iter()
        .map(|suffix| format!("{name}-{suffix}.ttf"))
        .collect()
}

fn missing_font_files(directory: &Path, name: &str) -> Vec<String> {
    family_file_names(name)
        .into_iter()
        .filter(|file| !directory.join(file).is_file())
        .collect()
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn font_directory_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = configured {
        push(path.to_path_buf());
    }

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));

    candidates
}

/// Finds the first directory holding the complete bundled family.
///
/// `configured` is checked before the environment and the default locations.
pub fn resolve_font_directory(configured: Option<&Path>) -> Result<PathBuf> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(configured) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate, DEFAULT_FONT_FAMILY_NAME);
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(Error::Font(format!(
        "Unable to locate bundled font directory. Checked: {}. See assets/fonts/README.md or set {}.",
        attempts.join(", "),
        FONTS_DIR_ENV
    )))
}

/// Loads the family `name` from `directory` using genpdf's file naming.
pub fn load_family(directory: &Path, name: &str) -> Result<FontFamily<FontData>> {
    let missing = missing_font_files(directory, name);
    if !missing.is_empty() {
        return Err(Error::Font(format!(
            "Font family '{}' is incomplete in {}: missing [{}]",
            name,
            directory.display(),
            missing.join(", ")
        )));
    }

    fonts::from_files(directory, name, None).map_err(|err| {
        Error::Font(format!(
            "Failed to load font family '{}' from {}: {}",
            name,
            directory.display(),
            err
        ))
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path("PDF_FACADE_WINDOWS_FONTS_DIR") {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn load_windows_font(directory: &Path, file: &str, style: &str) -> Result<FontData> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        Error::Font(format!(
            "Failed to load Windows fallback {} font at {}: {}",
            style,
            path.display(),
            err
        ))
    })
}

fn windows_fallback_font_family() -> Result<FontFamily<FontData>> {
    let directory = windows_font_directory()
        .ok_or_else(|| Error::Font("Windows font directory not found for fallback".to_owned()))?;

    Ok(FontFamily {
        regular: load_windows_font(&directory, WINDOWS_FONT_FILES.regular, "regular")?,
        bold: load_windows_font(&directory, WINDOWS_FONT_FILES.bold, "bold")?,
        italic: load_windows_font(&directory, WINDOWS_FONT_FILES.italic, "italic")?,
        bold_italic: load_windows_font(&directory, WINDOWS_FONT_FILES.bold_italic, "bold italic")?,
    })
}

/// Returns the bundled Roboto family, falling back to Windows Arial when it is missing.
pub fn default_font_family(configured: Option<&Path>) -> Result<FontFamily<FontData>> {
    let bundled =
        resolve_font_directory(configured).and_then(|dir| load_family(&dir, DEFAULT_FONT_FAMILY_NAME));

    match bundled {
        Ok(family) => Ok(family),
        Err(err) => match windows_fallback_font_family() {
            Ok(fallback) => {
                warn!(
                    "Bundled fonts unavailable ({}); falling back to Windows '{}' family.",
                    err, WINDOWS_FALLBACK_FAMILY_NAME
                );
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Bundled fonts unavailable ({}); Windows fallback failed: {}",
                    err, fallback_err
                );
                Err(err)
            }
        },
    }
}

/// Indicates whether the bundled family can be found without any configuration.
pub fn default_fonts_available() -> bool {
    resolve_font_directory(None).is_ok()
}
