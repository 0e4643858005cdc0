//! Stdin prompts behind the engine's `InputProvider`.
//!
//! Answers given as command-line flags are used as is; anything else is
//! asked on the terminal.

use anyhow::{bail, Context, Result};
use data_loader::{Film, Year};
use engine::InputProvider;
use std::io::{BufRead, Write};

/// Reads answers line by line from `reader`, writing questions to `writer`
pub struct PromptInput<R, W> {
    reader: R,
    writer: W,
    release_year: Option<String>,
    choice: Option<usize>,
    year_offset: Option<Year>,
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            release_year: None,
            choice: None,
            year_offset: None,
        }
    }

    /// Preset answers; `None` means "ask when needed"
    pub fn with_presets(
        mut self,
        release_year: Option<String>,
        choice: Option<usize>,
        year_offset: Option<Year>,
    ) -> Self {
        self.release_year = release_year;
        self.choice = choice;
        self.year_offset = year_offset;
        self
    }

    /// Print `question` and read one trimmed line
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("Input closed before an answer was given");
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer parses as an integer
    pub fn ask_number<T: std::str::FromStr>(&mut self, question: &str) -> Result<T> {
        let mut answer = self.ask(question)?;
        loop {
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => answer = self.ask("Enter a whole number: ")?,
            }
        }
    }

    /// Print a line of text
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text).context("Failed to write to the terminal")
    }
}

impl<R: BufRead, W: Write> InputProvider for PromptInput<R, W> {
    fn release_year(&mut self, _title: &str, _candidates: &[&Film]) -> Result<String> {
        match &self.release_year {
            Some(year) => Ok(year.clone()),
            None => self.ask("Enter the release year of the film: "),
        }
    }

    fn choose_film(&mut self, candidates: &[&Film]) -> Result<usize> {
        if let Some(choice) = self.choice {
            return Ok(choice);
        }
        self.say("Choose the film by its genres:")?;
        for (position, film) in candidates.iter().enumerate() {
            let genres: Vec<&str> = film.genres.iter().map(String::as_str).collect();
            self.say(&format!("{}) {}", position + 1, genres.join(",")))?;
        }
        self.ask_number("Enter the number of the film: ")
    }

    fn year_offset(&mut self, _film: &Film) -> Result<Year> {
        match self.year_offset {
            Some(offset) => Ok(offset),
            None => self.ask_number(
                "What time difference between book creation and film release \
                 would be suitable for you (in years)?\n",
            ),
        }
    }
}
