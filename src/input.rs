//! Line-based answers from the user, with Ctrl-C surfaced as an answer.

use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use log::debug;

use crate::data::model::title_case;
use crate::error::PromptError;

/// One event from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Line(String),
    /// Ctrl-C was pressed.
    Interrupted,
    /// No more input will arrive.
    Closed,
}

/// Anything that can hand out the user's answers one at a time.
pub trait AnswerSource {
    /// Block until the next answer is available.
    fn read_answer(&mut self) -> Answer;
}

// ---------------------------------------------------------------------------
// Terminal source
// ---------------------------------------------------------------------------

/// Reads stdin on a helper thread and merges its lines with Ctrl-C
/// notifications into a single ordered queue, so a blocked prompt can observe
/// an interrupt.
pub struct TerminalInput {
    events: Receiver<Answer>,
    closed: bool,
}

impl TerminalInput {
    /// Install the Ctrl-C handler and start the stdin reader.
    pub fn spawn() -> anyhow::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();

        let interrupts = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupts.send(Answer::Interrupted);
        })
        .context("installing Ctrl-C handler")?;

        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || forward_lines(io::stdin().lock(), &tx))
            .context("spawning stdin reader")?;

        Ok(TerminalInput {
            events: rx,
            closed: false,
        })
    }
}

/// Send each line of `reader` as an [`Answer::Line`], then [`Answer::Closed`].
///
/// Bytes that are not UTF-8 are replaced rather than ending the stream, so a
/// garbled answer is rejected by the prompt like any other.
fn forward_lines<R: BufRead>(mut reader: R, tx: &Sender<Answer>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if tx.send(Answer::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                debug!("reading stdin failed: {err}");
                break;
            }
        }
    }
    debug!("stdin closed");
    let _ = tx.send(Answer::Closed);
}

impl AnswerSource for TerminalInput {
    fn read_answer(&mut self) -> Answer {
        if self.closed {
            return Answer::Closed;
        }
        match self.events.recv() {
            Ok(Answer::Closed) | Err(_) => {
                self.closed = true;
                Answer::Closed
            }
            Ok(answer) => answer,
        }
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Outcome of a single closed-vocabulary prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'v> {
    Chosen(&'v str),
    Interrupted,
    Closed,
}

/// Lowercase, collapse runs of whitespace to one space, trim.
pub fn normalize(answer: &str) -> String {
    answer
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Ask `prompt` until the answer names one of `choices`.
///
/// The choices are listed after the prompt in title case. A rejected answer
/// is echoed back in its normalized form and the prompt repeats.
pub fn ask<'v, S, W>(
    input: &mut S,
    out: &mut W,
    prompt: &str,
    choices: &[&'v str],
) -> io::Result<Reply<'v>>
where
    S: AnswerSource + ?Sized,
    W: Write + ?Sized,
{
    let listed = choices
        .iter()
        .map(|c| title_case(c))
        .collect::<Vec<_>>()
        .join(", ");

    loop {
        write!(out, "{prompt} [{listed}]: ")?;
        out.flush()?;

        match input.read_answer() {
            Answer::Line(line) => {
                let answer = normalize(&line);
                if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(&answer)) {
                    return Ok(Reply::Chosen(*choice));
                }
                writeln!(out, "[{answer}] is not a valid choice, please try again")?;
            }
            Answer::Interrupted => {
                writeln!(out, "\nUser interrupted")?;
                return Ok(Reply::Interrupted);
            }
            Answer::Closed => {
                writeln!(out)?;
                return Ok(Reply::Closed);
            }
        }
    }
}

/// [`ask`] for a prompt that cannot be skipped: an interrupt or closed input
/// becomes an error.
pub fn ask_required<'v, S, W>(
    input: &mut S,
    out: &mut W,
    prompt: &str,
    choices: &[&'v str],
) -> Result<&'v str, PromptError>
where
    S: AnswerSource + ?Sized,
    W: Write + ?Sized,
{
    match ask(input, out, prompt, choices)? {
        Reply::Chosen(choice) => Ok(choice),
        Reply::Interrupted => Err(PromptError::Interrupted),
        Reply::Closed => Err(PromptError::InputClosed),
    }
}

/// Yes/no question; anything but "yes", including an interrupt, is a no.
pub fn confirm<S, W>(input: &mut S, out: &mut W, prompt: &str) -> io::Result<bool>
where
    S: AnswerSource + ?Sized,
    W: Write + ?Sized,
{
    Ok(ask(input, out, prompt, &["yes", "no"])? == Reply::Chosen("yes"))
}

// ---------------------------------------------------------------------------
// Scripted source for tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub mod scripted {
    use std::collections::VecDeque;

    use super::{Answer, AnswerSource};

    /// Replays a fixed list of answers, then reports closed input.
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        answers: VecDeque<Answer>,
        pub reads: usize,
    }

    impl ScriptedInput {
        pub fn lines(lines: &[&str]) -> Self {
            Self::new(lines.iter().map(|l| Answer::Line(l.to_string())))
        }

        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            ScriptedInput {
                answers: answers.into_iter().collect(),
                reads: 0,
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl AnswerSource for ScriptedInput {
        fn read_answer(&mut self) -> Answer {
            self.reads += 1;
            self.answers.pop_front().unwrap_or(Answer::Closed)
        }
    }
}
