use thiserror;

/// Key of the built-in option listing all options.
pub const SHOW_OPTIONS_KEY: &str = "?";
/// Key of the built-in option closing the menu.
pub const CLOSE_KEY: &str = "x";

/// What happens when an option is selected.
pub(crate) enum Action<'a> {
    ShowOptions,
    Close,
    Run(Box<dyn 'a + FnMut()>),
}

/// A registered command: description and the action it runs.
pub(crate) struct MenuOption<'a> {
    pub(crate) description: String,
    pub(crate) action: Action<'a>,
}

/// Error when registering an option.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    /// An option with the same key is already registered.
    #[error("option with key '{0}' already exists")]
    DuplicateKey(String),
}

impl<'a> MenuOption<'a> {
    pub(crate) fn new(description: impl Into<String>, action: Action<'a>) -> Self {
        MenuOption {
            description: description.into(),
            action,
        }
    }
}

impl<'a> std::fmt::Debug for MenuOption<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self.action {
            Action::ShowOptions => "show options",
            Action::Close => "close",
            Action::Run(_) => "custom",
        };
        f.debug_struct("MenuOption")
            .field("description", &self.description)
            .field("action", &action)
            .finish()
    }
}
