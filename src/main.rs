//! tcalc - Terminal Calculator Front-End
//!
//! Captures keystrokes and keypad clicks into one expression buffer and
//! submits it to an external evaluator command.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = Command::new("tcalc")
        .version(tcalc::VERSION)
        .about("A terminal calculator front-end with keyboard and on-screen keypad input")
        .long_about(
            "tcalc renders a calculator keypad in the terminal and keeps a single \
             editable expression buffer. Submitting the buffer runs the configured \
             evaluator command with the expression on stdin; its stdout is shown as \
             the result, or in the error slot when it carries the error marker.",
        )
        .arg(
            Arg::new("evaluator")
                .help("Evaluator command to run for each submission")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("evaluator-args")
                .help("Additional arguments passed to the evaluator command")
                .action(ArgAction::Append)
                .num_args(0..)
                .index(2),
        )
        .get_matches();

    let program = matches
        .get_one::<String>("evaluator")
        .expect("evaluator argument is required")
        .clone();
    let args: Vec<OsString> = matches
        .get_many::<String>("evaluator-args")
        .map(|values| values.map(OsString::from).collect())
        .unwrap_or_default();

    use tcalc::render::ui::TerminalUI;
    use tcalc::{Application, CommandEvaluator};

    let evaluator = Arc::new(CommandEvaluator::new(program, args));
    let ui_renderer = Box::new(TerminalUI::new()?);
    let mut app = Application::new(evaluator, ui_renderer);

    app.run().await?;

    Ok(())
}
