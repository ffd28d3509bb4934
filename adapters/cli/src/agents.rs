//! Action sources that feed the tick loop.

use std::{collections::VecDeque, io::BufRead};

use tile_puzzle_core::{Action, Agent, Observation};
use tracing::warn;

/// Splits script text into actions.
///
/// Words are separated by any whitespace and everything after a `#` on a line
/// is ignored. Unrecognised words become [`Action::None`].
pub(crate) fn parse_script(text: &str) -> Vec<Action> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .flat_map(str::split_whitespace)
        .map(Action::parse)
        .collect()
}

/// Replays a fixed list of actions, then idles.
#[derive(Clone, Debug)]
pub(crate) struct ScriptedAgent {
    actions: Vec<Action>,
    cursor: usize,
}

impl ScriptedAgent {
    pub(crate) fn new(actions: Vec<Action>) -> Self {
        Self { actions, cursor: 0 }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }
}

impl Agent for ScriptedAgent {
    fn decide(&mut self, _observation: &Observation) -> Action {
        let action = self
            .actions
            .get(self.cursor)
            .copied()
            .unwrap_or(Action::None);
        self.cursor = self.cursor.saturating_add(1).min(self.actions.len());
        action
    }
}

/// Reads actions line by line from an input stream.
///
/// A line may hold several words; a blank line submits [`Action::None`].
#[derive(Debug)]
pub(crate) struct StdinAgent<R> {
    input: R,
    pending: VecDeque<Action>,
    closed: bool,
}

impl<R: BufRead> StdinAgent<R> {
    pub(crate) fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Next action, or `None` once the stream is exhausted.
    pub(crate) fn next_action(&mut self) -> Option<Action> {
        loop {
            if let Some(action) = self.pending.pop_front() {
                return Some(action);
            }
            if self.closed {
                return None;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => self.closed = true,
                Ok(_) => {
                    let actions = parse_script(&line);
                    if actions.is_empty() {
                        return Some(Action::None);
                    }
                    self.pending.extend(actions);
                }
                Err(error) => {
                    warn!(%error, "failed to read from input, stopping");
                    self.closed = true;
                }
            }
        }
    }
}

impl<R: BufRead> Agent for StdinAgent<R> {
    fn decide(&mut self, _observation: &Observation) -> Action {
        self.next_action().unwrap_or(Action::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tile_puzzle_world::{query, Session};

    #[test]
    fn script_comments_and_blank_lines_are_skipped() {
        let actions = parse_script("up up # climb\n\n  left\n# whole line\nwait right\n");
        assert_eq!(
            actions,
            vec![
                Action::Up,
                Action::Up,
                Action::Left,
                Action::None,
                Action::Right
            ]
        );
    }

    #[test]
    fn scripted_agent_idles_after_the_last_action() {
        let observation = query::observation(&Session::new());
        let mut agent = ScriptedAgent::new(vec![Action::Down]);

        assert!(!agent.is_finished());
        assert_eq!(agent.decide(&observation), Action::Down);
        assert!(agent.is_finished());
        assert_eq!(agent.decide(&observation), Action::None);
        assert!(agent.is_finished());
    }

    #[test]
    fn stdin_agent_reads_words_until_end_of_input() {
        let mut agent = StdinAgent::new(Cursor::new("left right\n\nup\n"));
        let mut read = Vec::new();
        while let Some(action) = agent.next_action() {
            read.push(action);
        }
        assert_eq!(
            read,
            vec![Action::Left, Action::Right, Action::None, Action::Up]
        );
        assert_eq!(agent.next_action(), None);
    }
}
