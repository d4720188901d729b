//! Line-oriented input for the interactive wizard.

use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDate;
use finwise_core::budget::{CategoryType, PeriodType};
use finwise_shared::types::{Money, MoneyParseError};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Reads answers one line at a time.
pub struct Prompt<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    pub async fn ask(&mut self, label: &str) -> std::io::Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Asks until the answer parses. A blank answer yields `default`.
    pub async fn ask_parsed<T, E, F>(
        &mut self,
        label: &str,
        default: T,
        parse: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, E>,
        E: std::fmt::Display,
    {
        loop {
            let Some(answer) = self.ask(label).await? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => println!("  {e}"),
            }
        }
    }
}

/// A command typed on the category step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCommand {
    /// Allocate `amount` to a category picked by number, name, or ID.
    Add {
        /// Picker selection, if one was typed.
        category: Option<String>,
        /// Amount to allocate.
        amount: Money,
    },
    /// Remove the allocation at a 0-based index.
    Remove(usize),
    /// Create a category inline.
    NewCategory,
    /// Show the category picker.
    Categories,
    /// Show allocations and totals.
    Summary,
    /// Create the budget.
    Submit,
    /// Abandon the wizard.
    Cancel,
    /// Show the command list.
    Help,
}

/// Why a command line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Nothing was typed.
    #[error("empty command")]
    Empty,
    /// The command word is not known.
    #[error("Unknown command `{0}`. Type `help` for the list.")]
    Unknown(String),
    /// The command is missing arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),
    /// The amount did not parse.
    #[error(transparent)]
    Amount(#[from] MoneyParseError),
}

/// Help text for the category step.
pub const HELP: &str = "\
Commands:
  add <category> <amount>   allocate an amount (category by number or name)
  remove <n>                remove allocation number n
  new                       create a new category
  list                      show available categories
  summary                   show allocations and totals
  submit                    create the budget
  cancel                    discard the budget and leave";

impl FromStr for LoopCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" | "a" => parse_add(rest),
            "remove" | "rm" => rest
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Remove)
                .ok_or(CommandError::Usage("remove <n>")),
            "new" => Ok(Self::NewCategory),
            "list" | "categories" => Ok(Self::Categories),
            "summary" | "s" => Ok(Self::Summary),
            "submit" => Ok(Self::Submit),
            "cancel" | "quit" | "q" => Ok(Self::Cancel),
            "help" | "?" => Ok(Self::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// `add Food 400`, `add Eating Out 120.50`, or `add 400` with no category.
fn parse_add(rest: &str) -> Result<LoopCommand, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Usage("add <category> <amount>"));
    }
    let (category, amount) = match rest.rsplit_once(char::is_whitespace) {
        Some((category, amount)) => (Some(category.trim().to_string()), amount),
        None => (None, rest),
    };
    Ok(LoopCommand::Add {
        category,
        amount: Money::parse_non_negative(amount)?,
    })
}

/// Parses a period type answer.
pub fn parse_period(input: &str) -> Result<PeriodType, String> {
    PeriodType::parse(input).ok_or_else(|| "Choose monthly, weekly, or yearly".to_string())
}

/// Parses a category type answer.
pub fn parse_category_type(input: &str) -> Result<CategoryType, String> {
    CategoryType::parse(input).ok_or_else(|| "Choose expense or income".to_string())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date `{input}`, expected YYYY-MM-DD"))
}
