/*
 * config.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of mailheaderclean, a set of email header tools.
 *
 * mailheaderclean is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * mailheaderclean is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with mailheaderclean.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Removal policy configuration: an explicit [`PolicyConfig`] assembled by the caller from an
//! optional XML file and the MAILHEADERCLEAN* environment variables. Nothing in the policy
//! builder reads the environment itself.
//!
//! The file lives in ~/.mailheaderclean/config.xml unless a path is given. Each element holds a
//! comma-separated pattern list, the same syntax as the environment variables:
//!
//! ```xml
//! <mailheaderclean>
//!   <remove>X-MS-*, List-*</remove>
//!   <preserve>List-Id</preserve>
//!   <extra>X-Custom</extra>
//! </mailheaderclean>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, warn};

use crate::error::{MailError, Result};
use crate::header::parse_pattern_list;

/// Replaces the built-in removal list.
pub const ENV_BASE: &str = "MAILHEADERCLEAN";
/// Patterns taken out of the base list.
pub const ENV_PRESERVE: &str = "MAILHEADERCLEAN_PRESERVE";
/// Patterns added to the final list.
pub const ENV_EXTRA: &str = "MAILHEADERCLEAN_EXTRA";

const ROOT_ELEMENT: &[u8] = b"mailheaderclean";

/// The three policy sources. None means "not configured": the built-in list for `base`,
/// nothing for `preserve` and `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub base: Option<Vec<String>>,
    pub preserve: Option<Vec<String>>,
    pub extra: Option<Vec<String>>,
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sources from comma-separated strings. Empty or whitespace-only strings leave the
    /// field unset.
    pub fn with_sources(base: Option<&str>, preserve: Option<&str>, extra: Option<&str>) -> Self {
        Self {
            base: base.and_then(parse_pattern_list),
            preserve: preserve.and_then(parse_pattern_list),
            extra: extra.and_then(parse_pattern_list),
        }
    }

    /// Read MAILHEADERCLEAN, MAILHEADERCLEAN_PRESERVE and MAILHEADERCLEAN_EXTRA. Bytes that are not
    /// UTF-8 become U+FFFD; the rest of the value is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup(ENV_BASE);
        let preserve = lookup(ENV_PRESERVE);
        let extra = lookup(ENV_EXTRA);
        Self::with_sources(base.as_deref(), preserve.as_deref(), extra.as_deref())
    }

    /// Field-wise override: every field set in `other` replaces the one in `self`.
    pub fn merge(self, other: PolicyConfig) -> PolicyConfig {
        PolicyConfig {
            base: other.base.or(self.base),
            preserve: other.preserve.or(self.preserve),
            extra: other.extra.or(self.extra),
        }
    }

    /// Load a configuration file. A missing file is an error here; see [`load_default`](Self::load_default).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| MailError::Config(format!("{}: {}", path.display(), e)))?;
        let config = parse_config_xml(&content)
            .map_err(|e| MailError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("[config] loaded {}", path.display());
        Ok(config)
    }

    /// Load ~/.mailheaderclean/config.xml if it exists, else return an empty configuration.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// File (explicit path, or the default one if present) overridden by the environment.
    /// Only an explicit file can fail; a broken default file is skipped with a warning.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Self::load(p)?,
            None => Self::load_default().unwrap_or_else(|e| {
                warn!("[config] {}; using environment only", e);
                Self::default()
            }),
        };
        Ok(file.merge(Self::from_env()))
    }
}

/// Default config directory: ~/.mailheaderclean.
pub fn default_config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from).map(|h| h.join(".mailheaderclean"))
}

/// Default configuration file: ~/.mailheaderclean/config.xml.
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|d| d.join("config.xml"))
}

#[derive(Clone, Copy)]
enum Field {
    Remove,
    Preserve,
    Extra,
}

/// Parse the XML form using quick_xml. Unknown elements are ignored; an empty element counts as
/// not configured.
fn parse_config_xml(content: &str) -> std::result::Result<PolicyConfig, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut config = PolicyConfig::default();
    let mut seen_root = false;
    let mut depth = 0usize;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(format!("XML parse error: {}", e)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if depth == 0 {
                    if name != ROOT_ELEMENT {
                        return Err(format!(
                            "expected <mailheaderclean> root element, found <{}>",
                            String::from_utf8_lossy(name)
                        ));
                    }
                    seen_root = true;
                } else if depth == 1 {
                    field = match name {
                        b"remove" => Some(Field::Remove),
                        b"preserve" => Some(Field::Preserve),
                        b"extra" => Some(Field::Extra),
                        _ => None,
                    };
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    if e.name().as_ref() != ROOT_ELEMENT {
                        return Err("expected <mailheaderclean> root element".to_string());
                    }
                    seen_root = true;
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(f) = field {
                    let text = e.unescape().map_err(|e| e.to_string())?;
                    let patterns = parse_pattern_list(&text);
                    match f {
                        Field::Remove => config.base = patterns,
                        Field::Preserve => config.preserve = patterns,
                        Field::Extra => config.extra = patterns,
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                field = None;
            }
            _ => {}
        }
        buf.clear();
    }
    if !seen_root {
        return Err("empty configuration document".to_string());
    }
    Ok(config)
}
