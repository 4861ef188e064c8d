//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
const COMMANDS: &[&str] = &[
    "load",
    "show",
    "display",
    "analyze",
    "run",
    "transfer",
    "bottlenecks",
    "crops",
    "penalty",
    "help",
    "quit",
    "exit",
];

/// WaterFlow CLI 补全器
///
/// 第一个单词补全命令，之后的单词补全已加载的地点名称。
#[derive(Default)]
pub struct CommandCompleter {
    place_names: Vec<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新可补全的地点名称
    pub fn set_place_names(&mut self, names: Vec<String>) {
        self.place_names = names;
    }

    fn candidates(&self, line_to_cursor: &str) -> (usize, Vec<Pair>) {
        let word_start = line_to_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let current = &line_to_cursor[word_start..];
        let is_first_word = line_to_cursor[..word_start].trim().is_empty();

        let pairs = if is_first_word {
            COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(&current.to_lowercase()))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect()
        } else {
            self.place_names
                .iter()
                .filter(|name| name.starts_with(current))
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: name.clone(),
                })
                .collect()
        };

        (word_start, pairs)
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|p| p.replacement.as_str()).collect()
    }

    #[test]
    fn test_complete_command() {
        let completer = CommandCompleter::new();
        let (start, pairs) = completer.candidates("an");
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["analyze"]);

        let (_, pairs) = completer.candidates("");
        assert_eq!(pairs.len(), COMMANDS.len());
    }

    #[test]
    fn test_complete_place_names() {
        let mut completer = CommandCompleter::new();
        completer.set_place_names(vec!["Greenfield".into(), "Garden".into(), "Dam".into()]);

        let (start, pairs) = completer.candidates("transfer Dam Gr");
        assert_eq!(start, 13);
        assert_eq!(replacements(&pairs), vec!["Greenfield"]);

        let (_, pairs) = completer.candidates("transfer G");
        assert_eq!(replacements(&pairs), vec!["Greenfield", "Garden"]);
    }
}
