use std::{cell::RefCell, collections::VecDeque, io, io::Write, rc::Rc};

use crate::input::{Line, LineSource, TerminalError};

/// Output sink that can be inspected after it was handed to a menu.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Input with each of `lines` followed by a newline.
pub(crate) fn script(lines: &[&str]) -> io::Cursor<Vec<u8>> {
    let text: String = lines.iter().map(|line| format!("{}\n", line)).collect();
    io::Cursor::new(text.into_bytes())
}

/// Line source replaying fixed results and recording every key set it is given.
pub(crate) struct ScriptedSource {
    lines: VecDeque<Line>,
    keys: Rc<RefCell<Vec<Vec<String>>>>,
}

impl ScriptedSource {
    pub(crate) fn new(lines: Vec<Line>) -> Self {
        ScriptedSource {
            lines: lines.into(),
            keys: Default::default(),
        }
    }

    /// Key sets received so far, shared with the source after it is moved into a menu.
    pub(crate) fn keys(&self) -> Rc<RefCell<Vec<Vec<String>>>> {
        self.keys.clone()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Line, TerminalError> {
        write!(out, "{}", prompt)?;
        Ok(self.lines.pop_front().unwrap_or(Line::Eof))
    }

    fn set_keys(&mut self, keys: &[&str]) {
        let keys = keys.iter().map(|key| key.to_string()).collect();
        self.keys.borrow_mut().push(keys);
    }
}
