//! Interactive menu loop over a [`Repository`].
//!
//! The controller authenticates once, then reads one menu selection at a time
//! and dispatches it. Repository errors are printed and the loop continues;
//! only console I/O failures end the session early.

pub mod menu;
pub mod prompt;

pub use menu::{MenuChoice, SearchChoice};
pub use prompt::Console;

use crate::db::Repository;
use crate::domain::{parse_dob, RollNo, Student, StudentFields};
use crate::error::AppError;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// How a console session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator chose Exit.
    Exited,
    /// Credentials were rejected.
    LoginFailed,
    /// Input ended before Exit was chosen.
    InputClosed,
}

enum Step {
    Continue,
    Stop(SessionEnd),
}

/// Result of asking for a value that needs parsing.
enum Answer<T> {
    Given(T),
    /// The text was rejected and the reason already printed.
    Rejected,
    Closed,
}

/// Prompt labels for the seven non-key student fields.
struct FieldPrompts {
    name: &'static str,
    email: &'static str,
    gender: &'static str,
    contact: &'static str,
    dob: &'static str,
    address: &'static str,
    course: &'static str,
}

const ADD_PROMPTS: FieldPrompts = FieldPrompts {
    name: "Enter Name: ",
    email: "Enter Email: ",
    gender: "Enter Gender: ",
    contact: "Enter Contact: ",
    dob: "Enter Date of Birth (DD-MM-YYYY): ",
    address: "Enter Address: ",
    course: "Enter Course: ",
};

const UPDATE_PROMPTS: FieldPrompts = FieldPrompts {
    name: "Enter New Name: ",
    email: "Enter New Email: ",
    gender: "Enter New Gender: ",
    contact: "Enter New Contact: ",
    dob: "Enter New Date of Birth (DD-MM-YYYY): ",
    address: "Enter New Address: ",
    course: "Enter New Course: ",
};

const CLOSED: Step = Step::Stop(SessionEnd::InputClosed);

/// Reads prompts from a [`Console`] and drives the [`Repository`].
pub struct Controller<R, W> {
    console: Console<R, W>,
    repo: Repository,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(console: Console<R, W>, repo: Repository) -> Self {
        Controller { console, repo }
    }

    /// Log in, then serve menu selections until Exit or end of input.
    ///
    /// The repository's connection is closed on every return path. The output
    /// stream is handed back alongside the outcome.
    ///
    /// # Errors
    /// Returns `AppError::Io` if the console cannot be read or written.
    pub async fn run(self) -> Result<(SessionEnd, W), AppError> {
        let Controller { mut console, repo } = self;
        let result = Self::serve(&mut console, &repo).await;
        repo.close().await;
        result.map(|end| (end, console.into_output()))
    }

    async fn serve(console: &mut Console<R, W>, repo: &Repository) -> Result<SessionEnd, AppError> {
        let Some(username) = console.prompt("Enter username: ")? else {
            return Ok(SessionEnd::InputClosed);
        };
        let Some(password) = console.prompt_password("Enter Password : ")? else {
            return Ok(SessionEnd::InputClosed);
        };

        match repo.authenticate(username.trim(), &password).await {
            Ok(true) => {}
            Ok(false) => {
                console.say("Invalid username or password.")?;
                console.say("Login failed. Exiting...")?;
                return Ok(SessionEnd::LoginFailed);
            }
            Err(e) => {
                console.say(&format!("Error during login: {}", e))?;
                console.say("Login failed. Exiting...")?;
                return Ok(SessionEnd::LoginFailed);
            }
        }
        console.say(&format!("Login successful. Welcome, {}", username.trim()))?;

        loop {
            if let Step::Stop(end) = Self::step(console, repo).await? {
                return Ok(end);
            }
        }
    }

    async fn step(console: &mut Console<R, W>, repo: &Repository) -> Result<Step, AppError> {
        console.say(menu::MAIN_MENU)?;
        let Some(option) = console.prompt("Enter your choice (1-6): ")? else {
            return Ok(CLOSED);
        };

        let Some(choice) = MenuChoice::parse(&option) else {
            console.say("Invalid option. Please enter a number between 1 and 6.")?;
            return Ok(Step::Continue);
        };
        debug!(?choice, "menu selection");

        match choice {
            MenuChoice::Add => Self::add(console, repo).await,
            MenuChoice::Update => Self::update(console, repo).await,
            MenuChoice::Delete => Self::delete(console, repo).await,
            MenuChoice::Search => Self::search(console, repo).await,
            MenuChoice::Export => Self::export(console, repo).await,
            MenuChoice::Exit => {
                console.say("Exiting...")?;
                Ok(Step::Stop(SessionEnd::Exited))
            }
        }
    }

    fn read_rollno(console: &mut Console<R, W>, label: &str) -> Result<Answer<RollNo>, AppError> {
        let Some(text) = console.prompt(label)? else {
            return Ok(Answer::Closed);
        };
        match text.parse::<RollNo>() {
            Ok(rollno) => Ok(Answer::Given(rollno)),
            Err(e) => {
                console.say(&e.to_string())?;
                Ok(Answer::Rejected)
            }
        }
    }

    fn read_fields(
        console: &mut Console<R, W>,
        prompts: &FieldPrompts,
    ) -> Result<Answer<StudentFields>, AppError> {
        let Some(name) = console.prompt(prompts.name)? else {
            return Ok(Answer::Closed);
        };
        let Some(email) = console.prompt(prompts.email)? else {
            return Ok(Answer::Closed);
        };
        let Some(gender) = console.prompt(prompts.gender)? else {
            return Ok(Answer::Closed);
        };
        let Some(contact) = console.prompt(prompts.contact)? else {
            return Ok(Answer::Closed);
        };
        let Some(dob) = console.prompt(prompts.dob)? else {
            return Ok(Answer::Closed);
        };
        let Some(address) = console.prompt(prompts.address)? else {
            return Ok(Answer::Closed);
        };
        let Some(course) = console.prompt(prompts.course)? else {
            return Ok(Answer::Closed);
        };

        match parse_dob(&dob) {
            Ok(dob) => Ok(Answer::Given(StudentFields {
                name,
                email,
                gender,
                contact,
                dob,
                address,
                course,
            })),
            Err(e) => {
                console.say(&e.to_string())?;
                Ok(Answer::Rejected)
            }
        }
    }

    /// Roll number then fields, as the add and update prompts share that shape.
    fn read_student(
        console: &mut Console<R, W>,
        rollno_label: &str,
        prompts: &FieldPrompts,
    ) -> Result<Answer<(RollNo, StudentFields)>, AppError> {
        let rollno = match Self::read_rollno(console, rollno_label)? {
            Answer::Given(rollno) => rollno,
            Answer::Rejected => return Ok(Answer::Rejected),
            Answer::Closed => return Ok(Answer::Closed),
        };
        Ok(match Self::read_fields(console, prompts)? {
            Answer::Given(fields) => Answer::Given((rollno, fields)),
            Answer::Rejected => Answer::Rejected,
            Answer::Closed => Answer::Closed,
        })
    }

    async fn add(console: &mut Console<R, W>, repo: &Repository) -> Result<Step, AppError> {
        let (rollno, fields) = match Self::read_student(console, "Enter Roll No.: ", &ADD_PROMPTS)? {
            Answer::Given(input) => input,
            Answer::Rejected => return Ok(Step::Continue),
            Answer::Closed => return Ok(CLOSED),
        };

        match repo.add_student(&Student::new(rollno, fields)).await {
            Ok(()) => console.say("Student added successfully")?,
            Err(AppError::DuplicateKey(_)) => {
                console.say("Roll number already exists. Please enter a unique roll number.")?
            }
            Err(e) => report(console, "adding student", &e)?,
        }
        Ok(Step::Continue)
    }

    async fn update(console: &mut Console<R, W>, repo: &Repository) -> Result<Step, AppError> {
        let (rollno, fields) = match Self::read_student(
            console,
            "Enter Roll No. of student to update: ",
            &UPDATE_PROMPTS,
        )? {
            Answer::Given(input) => input,
            Answer::Rejected => return Ok(Step::Continue),
            Answer::Closed => return Ok(CLOSED),
        };

        match repo.update_student(rollno, &fields).await {
            Ok(()) => console.say("Student updated successfully")?,
            Err(AppError::NotFound(_)) => console.say("Roll number not present in database.")?,
            Err(e) => report(console, "updating student", &e)?,
        }
        Ok(Step::Continue)
    }

    async fn delete(console: &mut Console<R, W>, repo: &Repository) -> Result<Step, AppError> {
        let rollno = match Self::read_rollno(console, "Enter Roll No. of student to delete: ")? {
            Answer::Given(rollno) => rollno,
            Answer::Rejected => return Ok(Step::Continue),
            Answer::Closed => return Ok(CLOSED),
        };

        match repo.delete_student(rollno).await {
            Ok(()) => console.say("Student deleted successfully")?,
            Err(AppError::NotFound(_)) => console.say("Roll number not present in database.")?,
            Err(e) => report(console, "deleting student", &e)?,
        }
        Ok(Step::Continue)
    }

    async fn search(console: &mut Console<R, W>, repo: &Repository) -> Result<Step, AppError> {
        console.say(menu::SEARCH_MENU)?;
        let Some(option) = console.prompt("Enter your choice (1-2): ")? else {
            return Ok(CLOSED);
        };

        let (label, field) = match SearchChoice::parse(&option) {
            Some(SearchChoice::ByRollNo) => ("Enter Roll No. to search: ", "rollno"),
            Some(SearchChoice::ByEmail) => ("Enter Email ID to search: ", "email"),
            None => {
                console.say("Invalid search option. Please enter 1 or 2.")?;
                return Ok(Step::Continue);
            }
        };
        let Some(term) = console.prompt(label)? else {
            return Ok(CLOSED);
        };

        match repo.search_student(&term, field).await {
            Ok(student) => print_student(console, &student)?,
            Err(AppError::NotFound(_)) => console.say("Student not found.")?,
            Err(e) => report(console, "searching for student", &e)?,
        }
        Ok(Step::Continue)
    }

    async fn export(console: &mut Console<R, W>, repo: &Repository) -> Result<Step, AppError> {
        let Some(file_name) = console.prompt("Enter CSV file name: ")? else {
            return Ok(CLOSED);
        };

        match repo.export_to_csv(file_name.trim()).await {
            Ok(summary) => console.say(&format!(
                "Student data exported successfully to {} ({} records)",
                summary.path.display(),
                summary.rows
            ))?,
            Err(e) => report(console, "exporting student data", &e)?,
        }
        Ok(Step::Continue)
    }
}

fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    action: &str,
    err: &AppError,
) -> Result<(), AppError> {
    warn!(action, error = %err, "operation failed");
    console.say(&format!("Error {}: {}", action, err))?;
    Ok(())
}

fn print_student<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    student: &Student,
) -> Result<(), AppError> {
    console.say("Student found:")?;
    console.say(&format!("Roll No.: {}", student.rollno))?;
    console.say(&format!("Name: {}", student.name))?;
    console.say(&format!("Email: {}", student.email))?;
    console.say(&format!("Gender: {}", student.gender))?;
    console.say(&format!("Contact: {}", student.contact))?;
    console.say(&format!("Date of Birth: {}", student.dob))?;
    console.say(&format!("Address: {}", student.address))?;
    console.say(&format!("Course: {}", student.course))?;
    Ok(())
}
