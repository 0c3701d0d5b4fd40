use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    lines: Vec<String>,
}

impl TodoList {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_owned).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("unable to read todo file {}", path.display()))?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReloadOutcome {
    Replaced { count: usize },
    KeptPrevious { count: usize },
}

pub struct TodoStore {
    path: PathBuf,
    list: TodoList,
}

impl TodoStore {
    /// First load. An unreadable file leaves the list empty.
    pub fn open(path: PathBuf) -> Self {
        let list = match TodoList::load(&path) {
            Ok(list) => {
                info!(path = %path.display(), count = list.len(), "todo list loaded");
                list
            }
            Err(err) => {
                warn!(error = format!("{err:#}"), "starting with an empty todo list");
                TodoList::default()
            }
        };
        Self { path, list }
    }

    /// Replaces the list wholesale from disk. On failure the previous list
    /// stays in place.
    pub fn reload(&mut self) -> ReloadOutcome {
        match TodoList::load(&self.path) {
            Ok(list) => {
                let count = list.len();
                info!(path = %self.path.display(), count, "todo list reloaded");
                self.list = list;
                ReloadOutcome::Replaced { count }
            }
            Err(err) => {
                warn!(error = format!("{err:#}"), "keeping previous todo list");
                ReloadOutcome::KeptPrevious {
                    count: self.list.len(),
                }
            }
        }
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }
}
