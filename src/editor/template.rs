use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::EditError;

/// A command to insert as a unit: `\name` followed by empty blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandTemplate {
    name: String,
    blocks: NonZeroUsize,
}

impl CommandTemplate {
    /// Build a template, adding the leading `\` to `name` if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyTemplate`] when `blocks` is zero.
    pub fn new(name: &str, blocks: usize) -> Result<Self, EditError> {
        let name = if name.starts_with('\\') {
            name.to_string()
        } else {
            format!("\\{name}")
        };
        let blocks = NonZeroUsize::new(blocks).ok_or_else(|| EditError::EmptyTemplate {
            name: name.clone(),
        })?;
        Ok(Self { name, blocks })
    }

    /// Command name including the backslash.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn blocks(&self) -> usize {
        self.blocks.get()
    }

    /// Text inserted before the cursor: the name and the first `{`.
    pub fn head(&self) -> String {
        format!("{}{{", self.name)
    }

    /// Text left after the cursor: `}` plus one `{}` per extra block.
    pub fn tail(&self) -> String {
        let mut tail = String::from("}");
        tail.push_str(&"{}".repeat(self.blocks() - 1));
        tail
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.blocks)
    }
}

/// Parses `NAME/BLOCKS`, e.g. `\frac/2` or `sqrt/1`. `NAME` alone means one block.
impl FromStr for CommandTemplate {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, blocks) = match s.rsplit_once('/') {
            Some((name, blocks)) => {
                let blocks = blocks
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| EditError::InvalidTemplate(s.to_string()))?;
                (name.trim(), blocks)
            }
            None => (s, 1),
        };
        if name.trim_start_matches('\\').is_empty() {
            return Err(EditError::InvalidTemplate(s.to_string()));
        }
        Self::new(name, blocks)
    }
}
