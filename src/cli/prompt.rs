//! Line input for the interactive session.

use std::collections::VecDeque;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::CliError;

/// Source of user input lines.
///
/// `Ok(None)` means the input is exhausted (end of file or interrupt).
pub trait Prompter {
    /// Shows `prompt` and reads one line without its trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
}

/// Terminal input backed by a rustyline editor with in-memory history.
pub struct LineEditor {
    editor: DefaultEditor,
}

impl LineEditor {
    /// Opens the terminal editor.
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    // Failing to record history does not affect the line just read.
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Replays a fixed list of lines. Useful for scripted sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
}

impl ScriptedPrompter {
    /// Creates a prompter that answers with `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, CliError> {
        Ok(self.lines.pop_front())
    }
}
