use super::ValueApp;
use crate::domain::ports::KeyValueStore;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  models [query]   list catalog models, optionally filtered
  select <model>   choose the GPU model
  price <amount>   set the asking price
  add              add the selected GPU to the table
  remove <id>      delete a row by id or id prefix
  list             show the table
  help             show this message
  quit             leave the shell
";

/// Handles one event per input line until `quit` or end of input.
pub fn run_shell<S, R, W>(app: &mut ValueApp<S>, input: R, output: &mut W) -> anyhow::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{} models loaded. Type 'help' for commands.", app.catalog().len())?;
    write!(output, "{}", app.render_table())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        tracing::debug!("Shell event '{}'", command);

        match command {
            "models" => write!(output, "{}", app.render_models(argument))?,
            "select" => match app.on_model_selected(argument) {
                Ok(entry) => writeln!(output, "Selected {} (score {})", entry.model, entry.score)?,
                Err(e) => writeln!(output, "{}", e.user_friendly_message())?,
            },
            "price" => {
                app.on_price_changed(argument);
                let price = app.selection().price();
                if price.is_nan() {
                    writeln!(output, "'{}' is not a number", argument)?;
                } else {
                    writeln!(output, "Price set to {}", app.display().format_price(price))?;
                }
            }
            "add" => match app.on_add_clicked() {
                Ok(entry) => {
                    writeln!(output, "{}", app.render_entry(&entry))?;
                    write!(output, "{}", app.render_table())?;
                }
                Err(rejection) => writeln!(output, "Not added: {}", rejection)?,
            },
            "remove" | "rm" => match app.on_remove_clicked(argument) {
                Ok(Some(entry)) => {
                    writeln!(output, "Removed {}", entry.name)?;
                    write!(output, "{}", app.render_table())?;
                }
                Ok(None) => writeln!(output, "No GPU with id '{}'", argument)?,
                Err(e) => writeln!(output, "{}", e.user_friendly_message())?,
            },
            "list" | "ls" => write!(output, "{}", app.render_table())?,
            "help" | "?" => write!(output, "{}", HELP)?,
            "quit" | "exit" => break,
            other => writeln!(output, "Unknown command '{}'. Type 'help'.", other)?,
        }
        output.flush()?;
    }

    Ok(())
}
