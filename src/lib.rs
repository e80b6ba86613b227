//! Single-key text menus for simple interactive command-line tools.
//!
//! A [`Menu`] maps short keys to actions. [`Menu::start`] reads lines until the
//! built-in `x` option closes the menu or the input ends, running the action of
//! every line that matches a key. `?` lists the registered options.
//!
//! ```
//! use std::cell::Cell;
//! use keymenu::{Menu, SessionEnd};
//!
//! let added = Cell::new(0);
//! let mut menu = Menu::builder()
//!     .prompt("main")
//!     .reader(&b"a\nA\nx\n"[..])
//!     .add("a", "add item", || added.set(added.get() + 1))
//!     .build()
//!     .expect("Failed to build menu");
//! assert_eq!(menu.start().expect("Menu session failed"), SessionEnd::Closed);
//! assert_eq!(added.get(), 2);
//! ```

pub mod input;
pub mod menu;
pub mod prompt;
mod completion;
mod option;
#[cfg(test)]
mod test_util;

pub use input::{BufferedInput, EditorInput, Line, LineSource, TerminalError};
pub use menu::{LoopStatus, Menu, MenuBuilder, SessionEnd};
pub use option::{OptionError, CLOSE_KEY, SHOW_OPTIONS_KEY};
pub use prompt::{MenuHandle, PromptError};
