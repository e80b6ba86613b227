//! Main menu logic.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    io::{self, BufRead, Write},
};

use textwrap;

use crate::input::{BufferedInput, EditorInput, Line, LineSource, Terminal, TerminalError};
use crate::option::{Action, MenuOption, OptionError, CLOSE_KEY, SHOW_OPTIONS_KEY};
use crate::prompt::{MenuHandle, PromptError};

/// Single-key command menu.
///
/// Every line read during a session is trimmed of surrounding spaces,
/// lowercased and looked up among the registered keys; a match runs the
/// option's action, anything else is ignored. Two options are always present:
/// `?` lists all options and `x` closes the menu.
///
/// Options are kept ordered by key, so [`Menu::show_options`] always prints them
/// in ascending order.
pub struct Menu<'a> {
    prompt: String,
    text_width: Option<usize>,
    options: BTreeMap<String, MenuOption<'a>>,
    handle: MenuHandle,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEnd {
    /// The `x` option ran or [`MenuHandle::close`] was called.
    Closed,
    /// The input source has no more lines.
    EndOfInput,
    /// Ctrl-C in the line editor.
    Interrupted,
}

/// State of the menu after handling one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopStatus {
    /// Menu should keep reading lines.
    Continue,
    /// Session is over, for the given reason.
    Break(SessionEnd),
}

/// Builder pattern implementation for [`Menu`].
///
/// ```rust
/// # use keymenu::Menu;
/// let menu = Menu::builder()
///     .prompt("main")
///     .text_width(60)
///     .add("h", "say hello", || println!("hello"))
///     .build()
///     .expect("Failed to build menu");
/// ```
pub struct MenuBuilder<'a> {
    prompt: String,
    text_width: Option<usize>,
    input: Box<dyn LineSource>,
    out: Box<dyn Write>,
    options: Vec<(String, String, Box<dyn 'a + FnMut()>)>,
}

impl<'a> Default for MenuBuilder<'a> {
    fn default() -> Self {
        MenuBuilder {
            prompt: "menu".into(),
            text_width: None,
            input: Box::new(BufferedInput::stdin()),
            out: Box::new(io::stdout()),
            options: Default::default(),
        }
    }
}

impl<'a> MenuBuilder<'a> {
    /// Label shown in the prompt as `[label] >> `. Defaults to `"menu"`.
    pub fn prompt<T: Into<String>>(mut self, prompt: T) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Wrap option descriptions at `width`, indenting continuation lines past
    /// the key. Not set by default, each option stays on one line.
    pub fn text_width(mut self, width: usize) -> Self {
        self.text_width = Some(width);
        self
    }

    /// Where to read lines from. Defaults to buffered standard input.
    pub fn input<S: LineSource + 'static>(mut self, source: S) -> Self {
        self.input = Box::new(source);
        self
    }

    /// Read lines from `reader`.
    pub fn reader<R: BufRead + 'static>(self, reader: R) -> Self {
        self.input(BufferedInput::new(reader))
    }

    /// Read lines with an interactive [`rustyline`] editor.
    pub fn line_editor(self) -> Self {
        self.input(EditorInput::new())
    }

    /// Where to print prompts and option listings. Defaults to [`std::io::Stdout`].
    pub fn out<W: Write + 'static>(mut self, out: W) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Add an option. Duplicate keys are reported by [`MenuBuilder::build`].
    pub fn add<F>(mut self, key: impl Into<String>, description: impl Into<String>, action: F) -> Self
    where
        F: 'a + FnMut(),
    {
        let action: Box<dyn 'a + FnMut()> = Box::new(action);
        self.options.push((key.into(), description.into(), action));
        self
    }

    /// Finalize the configuration and return the menu or the first duplicate key.
    pub fn build(self) -> Result<Menu<'a>, OptionError> {
        let terminal = Terminal {
            source: self.input,
            out: self.out,
        };
        let mut menu = Menu::seeded(self.prompt, self.text_width, terminal);
        for (key, description, action) in self.options.into_iter() {
            menu.insert(key, description, Action::Run(action))?;
        }
        Ok(menu)
    }
}

impl<'a> Menu<'a> {
    /// Menu reading standard input and printing to standard output.
    pub fn new(prompt: impl Into<String>) -> Self {
        let builder = Menu::builder().prompt(prompt);
        let terminal = Terminal {
            source: builder.input,
            out: builder.out,
        };
        Menu::seeded(builder.prompt, builder.text_width, terminal)
    }

    /// Start [`MenuBuilder`] with default values.
    pub fn builder() -> MenuBuilder<'a> {
        MenuBuilder::default()
    }

    fn seeded(prompt: String, text_width: Option<usize>, terminal: Terminal) -> Self {
        let mut options = BTreeMap::new();
        options.insert(
            SHOW_OPTIONS_KEY.to_string(),
            MenuOption::new("show options", Action::ShowOptions),
        );
        options.insert(
            CLOSE_KEY.to_string(),
            MenuOption::new("close menu", Action::Close),
        );
        let menu = Menu {
            prompt,
            text_width,
            options,
            handle: MenuHandle::new(terminal),
        };
        menu.sync_keys();
        menu
    }

    /// Prompt label.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Keys and descriptions in ascending key order.
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.options
            .iter()
            .map(|(key, option)| (key.as_str(), option.description.as_str()))
            .collect()
    }

    /// Handle sharing this menu's terminal and active flag, to be moved into actions.
    pub fn handle(&self) -> MenuHandle {
        self.handle.clone()
    }

    /// Register an option. Fails, leaving the menu unchanged, if `key` is taken.
    ///
    /// Input is lowercased before matching, so keys with uppercase letters or
    /// surrounding spaces can be registered but never selected.
    pub fn add_option<F>(
        &mut self,
        key: impl Into<String>,
        description: impl Into<String>,
        action: F,
    ) -> Result<(), OptionError>
    where
        F: 'a + FnMut(),
    {
        self.insert(key.into(), description.into(), Action::Run(Box::new(action)))
    }

    fn insert(&mut self, key: String, description: String, action: Action<'a>) -> Result<(), OptionError> {
        match self.options.entry(key) {
            Entry::Occupied(entry) => Err(OptionError::DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                tracing::trace!(key = %entry.key(), "option registered");
                entry.insert(MenuOption::new(description, action));
                self.sync_keys();
                Ok(())
            }
        }
    }

    fn sync_keys(&self) {
        let keys: Vec<_> = self.options.keys().map(String::as_str).collect();
        self.handle.terminal.borrow_mut().source.set_keys(&keys);
    }

    fn format_option(&self, key: &str, description: &str) -> String {
        let line = format!("{}: {}", key, description);
        match self.text_width {
            Some(width) => {
                let indent = " ".repeat(key.len() + 2);
                let opts = textwrap::Options::new(width)
                    .initial_indent("")
                    .subsequent_indent(&indent);
                textwrap::fill(&line, &opts)
            }
            None => line,
        }
    }

    /// Print every option as `key: description`, in ascending key order.
    pub fn show_options(&self) -> Result<(), TerminalError> {
        let listing: Vec<_> = self
            .options()
            .into_iter()
            .map(|(key, description)| self.format_option(key, description))
            .collect();
        let mut terminal = self.handle.terminal.borrow_mut();
        for entry in listing {
            writeln!(terminal.out, "{}", entry)?;
        }
        terminal.out.flush()?;
        Ok(())
    }

    /// Run the session until the menu is closed or the input ends.
    ///
    /// Blocks the calling thread. Read and write failures end the session and
    /// are returned as errors. Calling `start` again begins a new session.
    pub fn start(&mut self) -> Result<SessionEnd, TerminalError> {
        self.handle.active.set(true);
        tracing::debug!(prompt = %self.prompt, "menu session started");
        let result = self.run();
        self.handle.active.set(false);
        match &result {
            Ok(end) => tracing::debug!(prompt = %self.prompt, reason = ?end, "menu session ended"),
            Err(err) => tracing::debug!(prompt = %self.prompt, error = %err, "menu session failed"),
        }
        result
    }

    fn run(&mut self) -> Result<SessionEnd, TerminalError> {
        {
            let mut terminal = self.handle.terminal.borrow_mut();
            writeln!(terminal.out, "Press {} to show options", SHOW_OPTIONS_KEY)?;
        }
        loop {
            if let LoopStatus::Break(end) = self.next()? {
                return Ok(end);
            }
        }
    }

    /// Run a single menu iteration: prompt, read one line and run the matching action.
    ///
    /// Lets the host get back control between steps instead of blocking in
    /// [`Menu::start`]. Each step activates the menu; it is inactive again once
    /// a step returns [`LoopStatus::Break`]. Unlike `start`, no hint is printed.
    pub fn next(&mut self) -> Result<LoopStatus, TerminalError> {
        self.handle.active.set(true);
        let status = self.step();
        if !matches!(status, Ok(LoopStatus::Continue)) {
            self.handle.active.set(false);
        }
        status
    }

    fn step(&mut self) -> Result<LoopStatus, TerminalError> {
        let prompt = format!("\n[{}] >> ", self.prompt);
        let line = self.handle.terminal.borrow_mut().read_line(&prompt)?;
        match line {
            Line::Text(line) => self.handle_line(&line),
            Line::Eof => Ok(LoopStatus::Break(SessionEnd::EndOfInput)),
            Line::Interrupted => Ok(LoopStatus::Break(SessionEnd::Interrupted)),
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<LoopStatus, TerminalError> {
        let key = line.trim_matches(' ').to_lowercase();
        match self.options.get_mut(&key) {
            Some(option) => {
                tracing::debug!(key = %key, "option selected");
                match &mut option.action {
                    Action::Run(run) => run(),
                    Action::Close => self.handle.close(),
                    Action::ShowOptions => self.show_options()?,
                }
            }
            None => tracing::trace!(input = %line, "no option matches input"),
        }
        if self.handle.is_active() {
            Ok(LoopStatus::Continue)
        } else {
            Ok(LoopStatus::Break(SessionEnd::Closed))
        }
    }

    /// See [`MenuHandle::get_string`].
    pub fn get_string(&self, prompt: &str) -> Result<String, PromptError> {
        self.handle.get_string(prompt)
    }

    /// See [`MenuHandle::get_int`].
    pub fn get_int(&self, prompt: &str) -> Result<i64, PromptError> {
        self.handle.get_int(prompt)
    }

    /// See [`MenuHandle::get_float`].
    pub fn get_float(&self, prompt: &str) -> Result<f64, PromptError> {
        self.handle.get_float(prompt)
    }
}
