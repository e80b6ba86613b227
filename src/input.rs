//! Line sources the menu reads commands and prompt answers from.
//!
//! The menu writes everything it prints through a single output sink and asks a
//! [`LineSource`] for one line at a time. Two sources are provided:
//! [`BufferedInput`] reads from any [`BufRead`] (standard input by default) and
//! [`EditorInput`] uses [`rustyline`] for history, hints and key completion.

use std::io::{self, BufRead, Write};

use rustyline::{self, error::ReadlineError};
use thiserror;

use crate::completion::KeyCompletion;

/// Failure while talking to the terminal.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Reading input or writing output failed.
    #[error("terminal i/o failed")]
    Io(#[from] io::Error),
    /// The line editor reported an error other than end of input or Ctrl-C.
    #[error("line editor failed")]
    Editor(#[from] ReadlineError),
}

/// Result of reading a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Line contents without the trailing line terminator.
    Text(String),
    /// No more input.
    Eof,
    /// The user pressed Ctrl-C.
    Interrupted,
}

/// Source of input lines.
pub trait LineSource {
    /// Show `prompt` and read one line. Sources that do not draw their own
    /// prompt write it to `out`.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Line, TerminalError>;

    /// Called with all registered keys, in ascending order, whenever they change.
    fn set_keys(&mut self, _keys: &[&str]) {}
}

/// Plain line-buffered reader.
pub struct BufferedInput<R> {
    reader: R,
}

impl<R: BufRead> BufferedInput<R> {
    pub fn new(reader: R) -> Self {
        BufferedInput { reader }
    }
}

impl BufferedInput<io::StdinLock<'static>> {
    /// Reader over the process's standard input. The stream is never closed.
    ///
    /// The lock is reentrant, so host code on the same thread can still read
    /// standard input and shares its buffer.
    pub fn stdin() -> Self {
        BufferedInput::new(io::stdin().lock())
    }
}

impl<R: BufRead> LineSource for BufferedInput<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Line, TerminalError> {
        write!(out, "{}", prompt)?;
        out.flush()?;
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            tracing::trace!("input exhausted");
            return Ok(Line::Eof);
        }
        strip_terminator(&mut buf);
        // invalid bytes become replacement characters, which no key matches
        Ok(Line::Text(String::from_utf8_lossy(&buf).into_owned()))
    }
}

fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
}

/// Interactive line editor with history and completion of option keys.
///
/// The editor always draws on standard output, regardless of the menu's
/// output sink.
pub struct EditorInput {
    editor: rustyline::Editor<KeyCompletion>,
}

impl Default for EditorInput {
    fn default() -> Self {
        let config = rustyline::config::Config::builder()
            .output_stream(rustyline::OutputStreamType::Stdout)
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut editor = rustyline::Editor::with_config(config);
        editor.set_helper(Some(KeyCompletion::default()));
        EditorInput { editor }
    }
}

impl EditorInput {
    pub fn new() -> Self {
        EditorInput::default()
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Line, TerminalError> {
        // rustyline redraws a single line, everything up to the last newline is printed first
        let (head, tail) = split_prompt(prompt);
        if !head.is_empty() {
            out.write_all(head.as_bytes())?;
            out.flush()?;
        }
        match self.editor.readline(tail) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.trim());
                }
                Ok(Line::Text(line))
            }
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(err) => Err(err.into()),
        }
    }

    fn set_keys(&mut self, keys: &[&str]) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_keys(keys);
        }
    }
}

fn split_prompt(prompt: &str) -> (&str, &str) {
    match prompt.rfind('\n') {
        Some(pos) => prompt.split_at(pos + 1),
        None => ("", prompt),
    }
}

/// Input source and output sink of a menu, shared with its handles.
pub(crate) struct Terminal {
    pub(crate) source: Box<dyn LineSource>,
    pub(crate) out: Box<dyn Write>,
}

impl Terminal {
    pub(crate) fn read_line(&mut self, prompt: &str) -> Result<Line, TerminalError> {
        self.source.read_line(prompt, &mut *self.out)
    }
}
