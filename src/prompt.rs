//! Reading follow-up values, typically from inside option actions.

use std::{
    cell::{Cell, RefCell},
    num::{ParseFloatError, ParseIntError},
    rc::Rc,
};

use thiserror;

use crate::input::{Line, Terminal, TerminalError};

/// Error returned by the prompt helpers.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),
    /// The user pressed Ctrl-C instead of answering.
    #[error("input interrupted")]
    Interrupted,
    #[error("'{0}' is not a valid integer")]
    InvalidInteger(String, #[source] ParseIntError),
    #[error("'{0}' is not a valid number")]
    InvalidFloat(String, #[source] ParseFloatError),
}

/// Shared access to a menu's terminal and active flag.
///
/// Obtained from [`Menu::handle`](crate::Menu::handle). Option actions are
/// plain closures, so a handle moved into a closure is how an action asks for
/// more input or ends the session:
///
/// ```
/// use std::cell::Cell;
/// use keymenu::Menu;
///
/// let last = Cell::new(0);
/// let mut menu = Menu::builder().reader(&b"n\n 42 \nx\n"[..]).build().unwrap();
/// let handle = menu.handle();
/// menu.add_option("n", "enter a number", {
///     let last = &last;
///     move || {
///         if let Ok(n) = handle.get_int("number: ") {
///             last.set(n);
///         }
///     }
/// }).unwrap();
/// menu.start().unwrap();
/// assert_eq!(last.get(), 42);
/// ```
#[derive(Clone)]
pub struct MenuHandle {
    pub(crate) terminal: Rc<RefCell<Terminal>>,
    pub(crate) active: Rc<Cell<bool>>,
}

impl MenuHandle {
    pub(crate) fn new(terminal: Terminal) -> Self {
        MenuHandle {
            terminal: Rc::new(RefCell::new(terminal)),
            active: Rc::new(Cell::new(false)),
        }
    }

    /// Print `prompt`, read one line and trim surrounding spaces.
    ///
    /// Returns an empty string when the input has ended and
    /// [`PromptError::Interrupted`] on Ctrl-C.
    pub fn get_string(&self, prompt: &str) -> Result<String, PromptError> {
        let line = self.terminal.borrow_mut().read_line(prompt)?;
        match line {
            Line::Text(text) => Ok(text.trim_matches(' ').into()),
            Line::Eof => Ok(String::new()),
            Line::Interrupted => Err(PromptError::Interrupted),
        }
    }

    /// Like [`MenuHandle::get_string`], parsed as a base-10 signed integer.
    pub fn get_int(&self, prompt: &str) -> Result<i64, PromptError> {
        let text = self.get_string(prompt)?;
        match text.parse() {
            Ok(value) => Ok(value),
            Err(err) => Err(PromptError::InvalidInteger(text, err)),
        }
    }

    /// Like [`MenuHandle::get_string`], parsed as a 64-bit float.
    pub fn get_float(&self, prompt: &str) -> Result<f64, PromptError> {
        let text = self.get_string(prompt)?;
        match text.parse() {
            Ok(value) => Ok(value),
            Err(err) => Err(PromptError::InvalidFloat(text, err)),
        }
    }

    /// End the running session after the current action returns.
    pub fn close(&self) {
        self.active.set(false);
    }

    /// Whether a session is running and has not been asked to close.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}
