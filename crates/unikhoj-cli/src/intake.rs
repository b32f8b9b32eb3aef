//! Interactive intake: walks the user through the three form steps.
//!
//! The driver reads answers line by line and turns each one into a
//! [`FormAction`]; every rule (validation, step changes, submission state)
//! lives in [`IntakeForm`]. Input and output are generic so the whole flow
//! can be exercised with in-memory buffers.
//!
//! At any prompt, `back` returns to the previous step. Pressing Enter keeps
//! the value shown in brackets, and `-` clears an optional value.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

use unikhoj_core::error::FormSubmitError;
use unikhoj_core::form::{FieldEdit, FormAction, IntakeForm, LeadSubmitter, Stage};
use unikhoj_core::lead::{BudgetBracket, COUNTRY_SUGGESTIONS, Degree, LeadId, TestType};
use unikhoj_core::validation::{Field, Step};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

/// How an intake session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The lead was accepted by the API.
    Submitted(LeadId),
    /// Input ended before a successful submission.
    Abandoned,
}

/// One answer to a prompt.
enum Answer<T> {
    Set(T),
    Keep,
    Back,
    Eof,
}

/// Result of filling in one step.
enum Flow {
    Done,
    Back,
    Eof,
}

/// Line-oriented prompt driver.
pub struct Intake<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Intake<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect it in tests.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the form until it is submitted or input runs out.
    ///
    /// A failed submission keeps the draft and re-opens the contact step so
    /// the user can retry.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub async fn run<S>(&mut self, submitter: &S) -> Result<Outcome>
    where
        S: LeadSubmitter + ?Sized,
    {
        let mut form = IntakeForm::new();

        loop {
            let step = match form.stage() {
                Stage::Editing(step) => step,
                Stage::Submitted(id) => return Ok(Outcome::Submitted(id)),
            };

            self.step_header(step)?;
            match self.fill_step(&mut form, step)? {
                Flow::Done => {}
                Flow::Back => {
                    form.apply(FormAction::Back);
                    continue;
                }
                Flow::Eof => {
                    writeln!(self.output)?;
                    return Ok(Outcome::Abandoned);
                }
            }

            if step != Step::ContactInfo {
                form.apply(FormAction::Next);
                self.show_errors(&form)?;
                continue;
            }

            writeln!(self.output, "  {DIM}Submitting...{RESET}")?;
            match form.submit(submitter).await {
                Ok(id) => {
                    writeln!(self.output)?;
                    writeln!(
                        self.output,
                        "{GREEN}{BOLD}✓{RESET} Thank you! A counsellor will call you shortly."
                    )?;
                    writeln!(self.output, "  {DIM}Reference:{RESET} {id}")?;
                    return Ok(Outcome::Submitted(id));
                }
                Err(FormSubmitError::Blocked(_)) => self.show_errors(&form)?,
                Err(FormSubmitError::Failed(_)) => {
                    let message = form.submit_error().unwrap_or_default().to_owned();
                    writeln!(self.output, "{RED}{BOLD}✗{RESET} {RED}{message}{RESET}")?;
                }
            }
        }
    }

    // ── Steps ────────────────────────────────────────────────────────

    fn step_header(&mut self, step: Step) -> Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{BOLD}{CYAN}Step {} of {}: {}{RESET}",
            step.number(),
            Step::COUNT,
            step.title()
        )?;
        writeln!(self.output, "{DIM}─────────────────────────────────────────{RESET}")?;
        Ok(())
    }

    fn show_errors(&mut self, form: &IntakeForm) -> Result<()> {
        for (_, message) in form.errors().iter() {
            writeln!(self.output, "  {RED}✗ {message}{RESET}")?;
        }
        Ok(())
    }

    fn fill_step(&mut self, form: &mut IntakeForm, step: Step) -> Result<Flow> {
        for &field in step.fields() {
            if field == Field::TestScore && form.draft().test_type == Some(TestType::None) {
                continue;
            }

            let edit = match self.ask_field(form, field)? {
                Answer::Set(edit) => edit,
                Answer::Keep => continue,
                Answer::Back => return Ok(Flow::Back),
                Answer::Eof => return Ok(Flow::Eof),
            };
            form.apply(FormAction::Edit(edit));
        }
        Ok(Flow::Done)
    }

    fn ask_field(&mut self, form: &IntakeForm, field: Field) -> Result<Answer<FieldEdit>> {
        let draft = form.draft();
        let answer = match field {
            Field::Degree => self
                .choose("Degree", &Degree::ALL, Degree::label, draft.degree)?
                .map(FieldEdit::Degree),
            Field::Country => {
                let current = draft.country.clone().unwrap_or_default();
                self.country(&current)?.map(FieldEdit::Country)
            }
            Field::Budget => self
                .choose("Budget", &BudgetBracket::ALL, BudgetBracket::label, draft.budget)?
                .map(FieldEdit::Budget),
            Field::Gpa => {
                let current = draft.gpa.clone();
                self.text("GPA or percentage", &current, false)?.map(FieldEdit::Gpa)
            }
            Field::TestType => self
                .choose("English test", &TestType::ALL, TestType::label, draft.test_type)?
                .map(FieldEdit::TestType),
            Field::TestScore => {
                let current = draft.test_score.clone();
                self.text("Score", &current, false)?.map(FieldEdit::TestScore)
            }
            Field::FullName => {
                let current = draft.full_name.clone();
                self.text("Full name", &current, false)?.map(FieldEdit::FullName)
            }
            Field::Phone => {
                let current = draft.phone.clone();
                self.text("Phone (10 digits)", &current, false)?.map(FieldEdit::Phone)
            }
            Field::Email => {
                let current = draft.email.clone();
                self.text("Email (optional)", &current, true)?.map(FieldEdit::Email)
            }
        };
        Ok(answer)
    }

    // ── Prompts ──────────────────────────────────────────────────────

    /// Print a prompt and read one line. `None` on end of input.
    fn read(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        if current.is_empty() {
            write!(self.output, "  {label}: ")?;
        } else {
            write!(self.output, "  {label} {DIM}[{current}]{RESET}: ")?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn text(&mut self, label: &str, current: &str, clearable: bool) -> Result<Answer<String>> {
        let Some(line) = self.read(label, current)? else {
            return Ok(Answer::Eof);
        };
        Ok(match line.as_str() {
            "back" => Answer::Back,
            "" => Answer::Keep,
            "-" if clearable => Answer::Set(String::new()),
            _ => Answer::Set(line),
        })
    }

    fn choose<T>(
        &mut self,
        label: &str,
        options: &[T],
        label_of: fn(T) -> &'static str,
        current: Option<T>,
    ) -> Result<Answer<T>>
    where
        T: Copy + FromStr,
    {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "    {DIM}{}){RESET} {}", i + 1, label_of(*option))?;
        }
        let shown = current.map(label_of).unwrap_or_default();

        loop {
            let Some(line) = self.read(label, shown)? else {
                return Ok(Answer::Eof);
            };
            match line.as_str() {
                "back" => return Ok(Answer::Back),
                "" if current.is_some() => return Ok(Answer::Keep),
                "" => {}
                _ => {
                    if let Some(choice) = pick(options, &line) {
                        return Ok(Answer::Set(choice));
                    }
                }
            }
            writeln!(
                self.output,
                "  {RED}Choose a number from 1 to {}{RESET}",
                options.len()
            )?;
        }
    }

    fn country(&mut self, current: &str) -> Result<Answer<String>> {
        let suggestions = COUNTRY_SUGGESTIONS
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}) {c}", i + 1))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(self.output, "    {DIM}{suggestions}{RESET}")?;

        Ok(match self.text("Destination country", current, false)? {
            Answer::Set(line) => Answer::Set(
                line.parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| COUNTRY_SUGGESTIONS.get(i))
                    .map_or(line, |c| (*c).to_owned()),
            ),
            other => other,
        })
    }
}

impl<T> Answer<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        match self {
            Self::Set(value) => Answer::Set(f(value)),
            Self::Keep => Answer::Keep,
            Self::Back => Answer::Back,
            Self::Eof => Answer::Eof,
        }
    }
}

/// A 1-based menu number or a wire code.
fn pick<T: Copy + FromStr>(options: &[T], input: &str) -> Option<T> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    input.parse().ok()
}
