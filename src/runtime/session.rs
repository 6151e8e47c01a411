use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::{
    core::{
        order::SortOrder,
        store::{CellarStore, Mutation, StoreError},
    },
    entry::EntryDraft,
    persist::{Backend, PersistError},
    types::{Count, parse_date},
};

use super::{
    command::{Command, MAIN_MENU, list_menu},
    render::write_table,
};

/// Failures that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the input or writing the output failed.
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
    /// Saving on quit failed.
    #[error("could not save inventory: {0}")]
    Persist(#[from] PersistError),
}

/// Session options.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// List entries close to expiry before the first prompt.
    pub expiry_warning: bool,
    /// Date used for the expiry check; the local date when unset.
    pub today: Option<NaiveDate>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_warning: true,
            today: None,
        }
    }
}

/// Prompt loop owning the store for one run.
///
/// Input and output are injected so the loop can be driven from a script.
/// End of input behaves like the quit command.
pub struct Session<R, W, B> {
    store: CellarStore,
    backend: B,
    input: R,
    output: W,
    config: SessionConfig,
}

impl<R: BufRead, W: Write, B: Backend> Session<R, W, B> {
    /// Session over `store`, saving through `backend` on quit.
    pub fn new(store: CellarStore, backend: B, input: R, output: W) -> Self {
        Self {
            store,
            backend,
            input,
            output,
            config: SessionConfig::default(),
        }
    }

    /// Replaces the default config.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs until quit or end of input, saves through the backend, and hands
    /// the store back.
    pub fn run(mut self) -> Result<CellarStore, SessionError> {
        if self.config.expiry_warning {
            self.warn_near_expiry()?;
        }

        loop {
            writeln!(self.output, "{MAIN_MENU}")?;
            let Some(choice) = self.read_number::<u8>("Enter command: ")? else {
                break;
            };

            let proceed = match Command::from_menu(choice) {
                Some(Command::Quit) => break,
                Some(Command::Add) => self.add_flow()?,
                Some(Command::Remove) => self.remove_flow()?,
                Some(Command::List) => self.list_flow()?,
                None => {
                    writeln!(self.output, "Illegal command! Try again.")?;
                    Some(())
                }
            };
            if proceed.is_none() {
                break;
            }
        }

        self.quit()
    }

    fn quit(mut self) -> Result<CellarStore, SessionError> {
        if let Err(err) = self.backend.save(&self.store) {
            tracing::error!(error = %err, "saving inventory failed");
            writeln!(self.output, "\nCould not save the beers: {err}")?;
            return Err(err.into());
        }
        writeln!(self.output, "\nQuitting! Goodbye!")?;
        Ok(self.store)
    }

    fn warn_near_expiry(&mut self) -> Result<(), SessionError> {
        let today = self.config.today.unwrap_or_else(|| Local::now().date_naive());
        if let Some(near) = self.store.list_near_expiry(today) {
            writeln!(self.output, "\nThese beers expire within a month:")?;
            write_table(&mut self.output, &near)?;
        }
        Ok(())
    }

    fn add_flow(&mut self) -> Result<Option<()>, SessionError> {
        writeln!(self.output)?;
        let Some(name) = self.read_text("Enter name of beer: ")? else {
            return Ok(None);
        };
        let Some(date) = self.read_date()? else {
            return Ok(None);
        };
        let Some(count) = self.read_count("Enter number of bottles: ")? else {
            return Ok(None);
        };

        if self.store.exists(&name, &date) {
            let outcome = self.store.add_bottles(&name, &date, count);
            return self.report(&name, outcome);
        }

        let Some(style) = self.read_text("Enter beer style: ")? else {
            return Ok(None);
        };
        let Some(country) = self.read_text("Enter country: ")? else {
            return Ok(None);
        };
        let Some(abv) = self.read_number::<f64>("Enter ABV: ")? else {
            return Ok(None);
        };
        let Some(volume) = self.read_number::<f64>("Enter volume of bottle/can (in cl): ")? else {
            return Ok(None);
        };

        let draft = EntryDraft {
            name,
            date,
            count,
            country,
            style,
            abv,
            volume,
        };
        match self.store.create(draft) {
            Ok(key) => writeln!(self.output, "Added {key} ({count} bottles).")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Some(()))
    }

    fn remove_flow(&mut self) -> Result<Option<()>, SessionError> {
        writeln!(self.output)?;
        let Some(name) = self.read_text("Enter name of beer: ")? else {
            return Ok(None);
        };
        let Some(date) = self.read_date()? else {
            return Ok(None);
        };
        let Some(count) = self.read_count("Enter number of bottles to remove: ")? else {
            return Ok(None);
        };

        let outcome = self.store.remove_bottles(&name, &date, count);
        self.report(&name, outcome)
    }

    fn list_flow(&mut self) -> Result<Option<()>, SessionError> {
        writeln!(self.output, "{}", list_menu())?;
        let order = loop {
            let Some(choice) = self.read_number::<u8>("Enter command: ")? else {
                return Ok(None);
            };
            match SortOrder::from_menu(choice) {
                Some(order) => break order,
                None => writeln!(self.output, "Illegal command!")?,
            }
        };

        writeln!(self.output)?;
        let entries = self.store.list(order);
        write_table(&mut self.output, &entries)?;
        Ok(Some(()))
    }

    fn report(
        &mut self,
        name: &str,
        outcome: Result<Mutation, StoreError>,
    ) -> Result<Option<()>, SessionError> {
        match outcome {
            Ok(Mutation::Remaining(left)) => writeln!(self.output, "{name}: {left} bottles on hand.")?,
            Ok(Mutation::Removed) => writeln!(self.output, "{name}: no bottles left, removed.")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Some(()))
    }

    /// Prompts once; `None` at end of input.
    fn read_text(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>, SessionError> {
        loop {
            let Some(text) = self.read_text(prompt)? else {
                return Ok(None);
            };
            match text.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    fn read_count(&mut self, prompt: &str) -> Result<Option<Count>, SessionError> {
        loop {
            let Some(count) = self.read_number::<Count>(prompt)? else {
                return Ok(None);
            };
            if count > 0 {
                return Ok(Some(count));
            }
            writeln!(self.output, "The number of bottles must be positive.")?;
        }
    }

    fn read_date(&mut self) -> Result<Option<String>, SessionError> {
        loop {
            let Some(date) = self.read_text("Enter expiration date (dd/mm/yyyy): ")? else {
                return Ok(None);
            };
            if parse_date(&date).is_some() {
                return Ok(Some(date));
            }
            writeln!(self.output, "Invalid date, use dd/mm/yyyy.")?;
        }
    }
}
