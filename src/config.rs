use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::controller::KeyMap;
use crate::editor::CommandTemplate;

/// Flags that can come from the command line or a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub debug_view: bool,
    pub marker: Option<String>,
    pub debug_log: Option<PathBuf>,
    pub key_left: Option<u32>,
    pub key_right: Option<u32>,
    pub key_backspace: Option<u32>,
    pub bindings: BTreeMap<u32, CommandTemplate>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins wherever both set an option.
    pub fn union(&self, other: &Self) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.extend(
            other
                .bindings
                .iter()
                .map(|(code, template)| (*code, template.clone())),
        );
        Self {
            debug_view: self.debug_view || other.debug_view,
            marker: other.marker.clone().or_else(|| self.marker.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            key_left: other.key_left.or(self.key_left),
            key_right: other.key_right.or(self.key_right),
            key_backspace: other.key_backspace.or(self.key_backspace),
            bindings,
        }
    }

    /// The default key map with these flags applied on top.
    pub fn key_map(&self) -> KeyMap {
        let mut keymap = KeyMap::default();
        if let Some(code) = self.key_left {
            keymap.left = code;
        }
        if let Some(code) = self.key_right {
            keymap.right = code;
        }
        if let Some(code) = self.key_backspace {
            keymap.backspace = code;
        }
        for (code, template) in &self.bindings {
            keymap.bind(*code, template.clone());
        }
        keymap
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mathline").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mathline")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mathline").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("mathline")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mathlinerc")
}

/// Read flags from a config file. A missing file yields defaults.
///
/// # Errors
///
/// Fails if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.trim_end().is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// One flag per line: the flag, then everything after the first run of
/// whitespace as its value, so values may contain spaces. A `--flag=value`
/// line stays one token.
fn line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, _)) if flag.contains('=') => vec![line.to_owned()],
        Some((flag, value)) if !value.trim().is_empty() => {
            vec![flag.to_owned(), value.trim_start().to_owned()]
        }
        Some((flag, _)) => vec![flag.to_owned()],
        None => vec![line.to_owned()],
    }
}

/// Write flags as a config file, creating parent directories.
///
/// # Errors
///
/// Fails if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# mathline defaults (saved with --save)".to_string()];
    if flags.debug_view {
        lines.push("--debug-view".to_string());
    }
    if let Some(marker) = &flags.marker {
        lines.push(format!("--marker {marker}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(code) = flags.key_left {
        lines.push(format!("--key-left {code}"));
    }
    if let Some(code) = flags.key_right {
        lines.push(format!("--key-right {code}"));
    }
    if let Some(code) = flags.key_backspace {
        lines.push(format!("--key-backspace {code}"));
    }
    for (code, template) in &flags.bindings {
        lines.push(format!("--bind {code}={template}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file if present.
///
/// # Errors
///
/// Fails if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
///
/// Both `--flag value` and `--flag=value` forms are accepted. Malformed
/// values are logged and skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--debug-view" {
            flags.debug_view = true;
            i += 1;
            continue;
        }

        let (name, value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--marker" | "--debug-log" | "--key-left" | "--key-right" | "--key-backspace" | "--bind"
        );
        if !takes_value {
            i += 1;
            continue;
        }
        let value = match value {
            Some(value) => value,
            None => {
                i += 1;
                match tokens.get(i) {
                    Some(next) => next.clone(),
                    None => break,
                }
            }
        };

        match name {
            "--marker" => flags.marker = Some(value),
            "--debug-log" => flags.debug_log = Some(PathBuf::from(value.trim())),
            "--key-left" => flags.key_left = parse_code(name, &value),
            "--key-right" => flags.key_right = parse_code(name, &value),
            "--key-backspace" => flags.key_backspace = parse_code(name, &value),
            "--bind" => {
                if let Some((code, template)) = parse_binding(&value) {
                    flags.bindings.insert(code, template);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_code(flag: &str, value: &str) -> Option<u32> {
    match value.trim().parse() {
        Ok(code) => Some(code),
        Err(err) => {
            warn!(flag, value, %err, "ignoring invalid key code");
            None
        }
    }
}

/// Parse `CODE=NAME/BLOCKS`.
fn parse_binding(value: &str) -> Option<(u32, CommandTemplate)> {
    let Some((code, template)) = value.split_once('=') else {
        warn!(value, "ignoring binding without `=`");
        return None;
    };
    let code = parse_code("--bind", code)?;
    match template.trim().parse() {
        Ok(template) => Some((code, template)),
        Err(err) => {
            warn!(value, %err, "ignoring invalid binding");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "mathline",
            "--debug-view",
            "--marker",
            "@",
            "--key-left=100",
            "--key-right",
            "102",
            "--bind",
            "66=binom/2",
            "--debug-log=edit.log",
        ]);
        let flags = parse_flag_tokens(&args);
        assert!(flags.debug_view);
        assert_eq!(flags.marker.as_deref(), Some("@"));
        assert_eq!(flags.key_left, Some(100));
        assert_eq!(flags.key_right, Some(102));
        assert_eq!(flags.key_backspace, None);
        assert_eq!(flags.debug_log, Some(PathBuf::from("edit.log")));
        assert_eq!(
            flags.bindings.get(&66),
            Some(&CommandTemplate::new("\\binom", 2).unwrap())
        );
    }

    #[test]
    fn test_parse_flag_tokens_skips_invalid_values() {
        let args = tokens(&["--key-left", "left", "--bind", "x=sqrt/1", "--bind=70=frac/0"]);
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.key_left, None);
        assert!(flags.bindings.is_empty());
    }

    #[test]
    fn test_trailing_flag_without_value_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--marker"]));
        assert_eq!(flags.marker, None);
    }

    #[test]
    fn test_config_union_prefers_other_for_options() {
        let file = ConfigFlags {
            debug_view: true,
            marker: Some("@".to_string()),
            key_left: Some(1),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            marker: Some("#".to_string()),
            key_right: Some(2),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.debug_view);
        assert_eq!(merged.marker.as_deref(), Some("#"));
        assert_eq!(merged.key_left, Some(1));
        assert_eq!(merged.key_right, Some(2));
    }

    #[test]
    fn test_config_union_overrides_bindings_per_code() {
        let mut file = ConfigFlags::default();
        file.bindings
            .insert(1, CommandTemplate::new("sqrt", 1).unwrap());
        file.bindings
            .insert(2, CommandTemplate::new("frac", 2).unwrap());
        let mut cli = ConfigFlags::default();
        cli.bindings
            .insert(2, CommandTemplate::new("binom", 2).unwrap());
        let merged = file.union(&cli);
        assert_eq!(merged.bindings.len(), 2);
        assert_eq!(merged.bindings[&2].name(), "\\binom");
    }

    #[test]
    fn test_key_map_applies_overrides() {
        let mut flags = ConfigFlags {
            key_backspace: Some(127),
            ..ConfigFlags::default()
        };
        flags
            .bindings
            .insert(82, CommandTemplate::new("overline", 1).unwrap());
        let keymap = flags.key_map();
        assert_eq!(keymap.left, crate::controller::KEY_LEFT);
        assert_eq!(keymap.backspace, 127);
        assert_eq!(keymap.commands[&82].name(), "\\overline");
        assert_eq!(keymap.commands[&70].name(), "\\frac");
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".mathlinerc");
        let mut flags = ConfigFlags {
            debug_view: true,
            marker: Some("@".to_string()),
            debug_log: Some(PathBuf::from("edit.log")),
            key_left: Some(1),
            key_right: Some(2),
            key_backspace: Some(3),
            ..ConfigFlags::default()
        };
        flags
            .bindings
            .insert(66, CommandTemplate::new("binom", 2).unwrap());

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_marker_with_spaces_survives_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mathlinerc");
        let flags = ConfigFlags {
            marker: Some("[ here ]".to_string()),
            key_left: Some(100),
            ..ConfigFlags::default()
        };
        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_config_values_tolerate_trailing_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mathlinerc");
        fs::write(
            &path,
            "  --key-left 100  \n--bind 66=binom/2 \n--debug-view \n--marker=< >\n",
        )
        .unwrap();
        let flags = load_config_flags(&path).unwrap();
        assert_eq!(flags.key_left, Some(100));
        assert_eq!(flags.marker.as_deref(), Some("< >"));
        assert_eq!(flags.bindings[&66].name(), "\\binom");
        assert!(flags.debug_view);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
