use rustyline::{
    completion::{Completer, Pair},
    hint::Hinter,
};
use rustyline_derive::{Helper, Highlighter, Validator};
use trie_rs::{Trie, TrieBuilder};

/// Hints and tab completion for option keys.
///
/// Input is matched the same way the menu matches it: leading spaces are
/// skipped and the text is lowercased.
#[derive(Default, Helper, Validator, Highlighter)]
pub(crate) struct KeyCompletion {
    trie: Option<Trie<u8>>,
}

impl Hinter for KeyCompletion {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        self.hint_for(line, pos)
    }
}

impl Completer for KeyCompletion {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let start = spaces_before(line);
        if pos < start {
            return Ok((pos, Vec::with_capacity(0)));
        }
        let candidates = self
            .candidates(&line[start..pos].to_lowercase())
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl KeyCompletion {
    pub(crate) fn set_keys(&mut self, keys: &[&str]) {
        let mut builder: TrieBuilder<u8> = TrieBuilder::new();
        for key in keys {
            builder.push(key.as_bytes());
        }
        self.trie = Some(builder.build());
    }

    fn hint_for(&self, line: &str, pos: usize) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let prefix = line[spaces_before(line)..].to_lowercase();
        match self.candidates(&prefix).as_slice() {
            [only] if only.len() > prefix.len() => Some(only[prefix.len()..].into()),
            _ => None,
        }
    }

    fn candidates(&self, prefix: &str) -> Vec<String> {
        match &self.trie {
            Some(trie) if !prefix.is_empty() => trie
                .predictive_search(prefix)
                .into_iter()
                .filter_map(|bytes| String::from_utf8(bytes).ok())
                .collect(),
            _ => Vec::with_capacity(0),
        }
    }
}

fn spaces_before(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
