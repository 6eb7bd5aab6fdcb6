//! The interactive loop and the batch runner.
//!
//! The line editor blocks, but the world keeps moving while the player
//! thinks. [`Repl::run`] therefore reads lines on a helper thread and waits
//! on a channel with a timeout, letting the [`RealtimeDriver`] fire ticks
//! and combat rounds between keystrokes.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

use delve_foundation::{Error, ErrorKind, Result};
use tracing::debug;

use crate::driver::RealtimeDriver;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::game::Game;

/// Rounds resolved per batch command before giving up on a fight.
const BATCH_ROUND_LIMIT: usize = 100;

enum Input {
    Line(String),
    Interrupted,
    Eof,
    Failed(Error),
}

fn is_quit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "quit" | "exit")
}

fn write_error(e: &io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!("failed to write output: {e}")))
}

/// The interactive REPL.
pub struct Repl<E: LineEditor + Send + 'static = RustylineEditor> {
    editor: E,
    out: Box<dyn Write>,
    show_banner: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        Ok(Self::with_editor(RustylineEditor::new()?))
    }
}

impl<E: LineEditor + Send + 'static> Repl<E> {
    /// Creates a REPL reading from `editor` and printing to stdout.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            out: Box::new(io::stdout()),
            show_banner: true,
        }
    }

    /// Sends output somewhere other than stdout.
    #[must_use]
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    /// Skips the welcome text.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Runs until the player quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(self, game: &mut Game) -> Result<()> {
        let Self {
            mut editor,
            mut out,
            show_banner,
        } = self;
        if show_banner {
            print(&mut out, &game.welcome())?;
        }

        editor.set_vocabulary(game.vocabulary());
        let (prompt_tx, prompt_rx) = mpsc::channel::<String>();
        let (line_tx, line_rx) = mpsc::channel::<Input>();
        let reader = thread::spawn(move || read_lines(editor, &prompt_rx, &line_tx));

        let result = event_loop(game, &mut out, &prompt_tx, &line_rx);
        drop(prompt_tx);
        if reader.join().is_err() {
            debug!("input thread panicked");
        }
        result?;
        print(&mut out, "Farewell!")
    }
}

fn print(out: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(out, "{text}").map_err(|e| write_error(&e))?;
    out.flush().map_err(|e| write_error(&e))
}

fn event_loop(game: &mut Game, out: &mut dyn Write, prompt_tx: &Sender<String>, line_rx: &Receiver<Input>) -> Result<()> {
    let mut driver = RealtimeDriver::new(game.state().config(), Instant::now());
    loop {
        if prompt_tx.send(prompt(game)).is_err() {
            return Ok(());
        }
        let input = loop {
            match line_rx.recv_timeout(driver.time_until_next(Instant::now())) {
                Ok(input) => break input,
                Err(RecvTimeoutError::Timeout) => {
                    for line in driver.pump(game, Instant::now()) {
                        print(out, &line)?;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        };

        match input {
            Input::Line(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if is_quit(line) {
                    return Ok(());
                }
                let reply = game.process_command(line);
                if !reply.is_empty() {
                    print(out, &reply)?;
                }
                for line in driver.pump(game, Instant::now()) {
                    print(out, &line)?;
                }
            }
            Input::Interrupted => print(out, "(Type 'quit' to leave.)")?,
            Input::Eof => return Ok(()),
            Input::Failed(e) => return Err(e),
        }
    }
}

fn prompt(game: &Game) -> String {
    let player = game.state().player();
    if player.is_alive() {
        format!("[{}/{} HP] > ", player.hit_points(), player.max_hit_points())
    } else {
        "[dead] > ".to_string()
    }
}

/// Reads one line per prompt received until the prompt channel closes.
fn read_lines<E: LineEditor>(mut editor: E, prompts: &Receiver<String>, lines: &Sender<Input>) {
    while let Ok(prompt) = prompts.recv() {
        let input = match editor.read_line(&prompt) {
            Ok(ReadResult::Line(line)) => {
                if !line.trim().is_empty() {
                    editor.add_history(&line);
                }
                Input::Line(line)
            }
            Ok(ReadResult::Interrupted) => Input::Interrupted,
            Ok(ReadResult::Eof) => Input::Eof,
            Err(e) => Input::Failed(e),
        };
        let done = matches!(input, Input::Eof | Input::Failed(_));
        if lines.send(input).is_err() || done {
            return;
        }
    }
}

/// Plays a script without a clock.
///
/// Each command is echoed and answered. Any fight it starts is resolved
/// round by round right away, then the world ticks once. Blank lines and
/// lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns an error if reading the script or writing output fails.
pub fn run_batch(game: &mut Game, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", game.welcome()).map_err(|e| write_error(&e))?;
    for line in input.lines() {
        let line = line.map_err(|e| Error::new(ErrorKind::IoError(format!("failed to read script: {e}"))))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if is_quit(line) {
            break;
        }
        writeln!(out, "\n> {line}").map_err(|e| write_error(&e))?;
        writeln!(out, "{}", game.process_command(line)).map_err(|e| write_error(&e))?;

        let mut rounds = 0;
        while let Some(ticket) = game.pending_round() {
            if rounds == BATCH_ROUND_LIMIT {
                debug!(rounds, "batch fight still running");
                break;
            }
            for text in game.run_round(ticket) {
                writeln!(out, "{text}").map_err(|e| write_error(&e))?;
            }
            rounds += 1;
        }
        for text in game.tick() {
            writeln!(out, "{text}").map_err(|e| write_error(&e))?;
        }
    }
    out.flush().map_err(|e| write_error(&e))
}
