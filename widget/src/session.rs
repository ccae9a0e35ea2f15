//! Interactive loop: reads commands, calls into the sync layer, re-renders.

use std::io::{self, BufRead, Write};

use todo_sync_core::{can_submit, Confirm, ConfirmAction, Removal, SyncError, TodoApp, TodoId, Transport};
use tracing::warn;

use crate::command::{Command, HELP};
use crate::render::render;

/// A mounted widget bound to an input and an output stream.
pub struct Session<T, R, W> {
    app: TodoApp<T>,
    input: R,
    output: W,
}

impl<T: Transport, R: BufRead, W: Write> Session<T, R, W> {
    pub fn new(app: TodoApp<T>, input: R, output: W) -> Self {
        Self { app, input, output }
    }

    pub fn app(&self) -> &TodoApp<T> {
        &self.app
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.show()?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                return Ok(());
            }
            let Ok(line) = String::from_utf8(raw) else {
                writeln!(self.output, "input is not valid UTF-8, line ignored")?;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => self.dispatch(command)?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> io::Result<()> {
        let outcome = match command {
            Command::Add(name) => {
                if !can_submit(&name) {
                    writeln!(self.output, "nothing to add")?;
                    return Ok(());
                }
                self.app.submit(&name).map(|_| ())
            }
            Command::Done(number) => match self.id_at(number)? {
                Some(id) => self.app.sync_mut().toggle_done(&id).map(|_| ()),
                None => return Ok(()),
            },
            Command::Remove(number) => match self.id_at(number)? {
                Some(id) => {
                    let mut prompt = Prompt {
                        input: &mut self.input,
                        output: &mut self.output,
                    };
                    match self.app.sync_mut().remove(&id, &mut prompt) {
                        Ok(Removal::Declined) => return Ok(()),
                        other => other.map(|_| ()),
                    }
                }
                None => return Ok(()),
            },
            Command::Refresh(number) => match self.id_at(number)? {
                Some(id) => self.app.sync_mut().refresh(&id).map(|_| ()),
                None => return Ok(()),
            },
            Command::List => self.app.sync_mut().list().map(|_| ()),
            Command::Help => {
                writeln!(self.output, "{HELP}")?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };

        if let Err(err) = outcome {
            report(&mut self.output, &err)?;
        }
        self.show()
    }

    fn id_at(&mut self, number: usize) -> io::Result<Option<TodoId>> {
        let id = self
            .app
            .sync()
            .entries()
            .get(number - 1)
            .map(|entry| entry.item.id.clone());
        if id.is_none() {
            writeln!(self.output, "no item {number}")?;
        }
        Ok(id)
    }

    fn show(&mut self) -> io::Result<()> {
        let text = render(self.app.title(), self.app.sync().entries());
        write!(self.output, "{text}")
    }
}

fn report<W: Write>(output: &mut W, err: &SyncError) -> io::Result<()> {
    warn!(error = %err, "operation failed");
    writeln!(output, "error: {err}")
}

/// Asks a yes/no question on the session's streams.
struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Confirm for Prompt<'_, R, W> {
    fn confirm(&mut self, action: &ConfirmAction) -> bool {
        let question = match action {
            ConfirmAction::Delete { name, .. } => format!("delete \"{name}\"? Are you sure? [y/N] "),
        };
        if write!(self.output, "{question}").and_then(|_| self.output.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
