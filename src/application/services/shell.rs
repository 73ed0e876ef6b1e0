//! Interactive menu shell
//!
//! Drives the catalog loader and the course index through a fixed numeric menu.
//! Input and output are plain `BufRead`/`Write` so sessions can be scripted.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::application::services::CatalogService;
use crate::config::Settings;
use crate::domain::{normalize_identifier, Course, CourseIndex};

/// Whether a catalog has been loaded in this session.
#[derive(Debug, Default)]
pub enum CatalogState {
    #[default]
    Empty,
    Loaded(CourseIndex),
}

impl CatalogState {
    pub fn index(&self) -> Option<&CourseIndex> {
        match self {
            CatalogState::Empty => None,
            CatalogState::Loaded(index) => Some(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Load,
    List,
    Show,
    Exit,
}

impl MenuChoice {
    fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Load),
            2 => Some(Self::List),
            3 => Some(Self::Show),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Leading integer of a menu answer: optional sign, then digits. Trailing text is ignored.
fn parse_choice(line: &str) -> Option<i32> {
    let s = line.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

const MENU: &str = "  1. Load Data Structure.\n  2. Print Course List.\n  3. Print Course.\n  9. Exit\n";
const NOT_LOADED: &str = "Please load the data structure first (option 1).";

/// Render a course with its prerequisites, as shown by "Print Course".
pub fn course_details(course: &Course) -> String {
    let prerequisites = if course.has_prerequisites() {
        course.prerequisites.join(", ")
    } else {
        "None".to_string()
    };
    format!("{}\nPrerequisites: {}", course, prerequisites)
}

/// Menu loop over a catalog.
pub struct Shell<'a, R, W> {
    catalog: &'a CatalogService,
    input: R,
    output: W,
    state: CatalogState,
    default_file: PathBuf,
    list_heading: String,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a CatalogService, settings: &Settings, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
            state: CatalogState::Empty,
            default_file: settings.default_file.clone(),
            list_heading: settings.list_heading.clone(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// File offered when the user just presses Enter at the load prompt.
    pub fn default_file(&self) -> &Path {
        &self.default_file
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the course planner.")?;
        writeln!(self.output)?;

        loop {
            write!(self.output, "{}\nWhat would you like to do? ", MENU)?;
            self.output.flush()?;

            // blank lines keep waiting at the same prompt
            let line = loop {
                match self.read_line()? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => break line,
                    None => {
                        debug!("input closed at menu prompt");
                        return Ok(());
                    }
                }
            };
            let Some(code) = parse_choice(&line) else {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                writeln!(self.output)?;
                continue;
            };
            writeln!(self.output)?;

            debug!("menu choice: {}", code);
            let keep_going = match MenuChoice::from_code(code) {
                Some(MenuChoice::Load) => self.load()?,
                Some(MenuChoice::List) => self.list()?,
                Some(MenuChoice::Show) => self.show()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Thank you for using the course planner!")?;
                    false
                }
                None => {
                    writeln!(self.output, "{} is not a valid option.", code)?;
                    writeln!(self.output)?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    /// Next input line without its line terminator; None at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(Some(buf))
    }

    fn load(&mut self) -> io::Result<bool> {
        write!(
            self.output,
            "Enter the file name (or press Enter for default: {}): ",
            self.default_file.display()
        )?;
        self.output.flush()?;

        let Some(answer) = self.read_line()? else {
            return Ok(false);
        };
        if !answer.is_empty() {
            self.default_file = PathBuf::from(answer);
        }
        let path = self.default_file.clone();

        let result = if let CatalogState::Loaded(index) = &mut self.state {
            self.catalog.load(&path, index)
        } else {
            match self.catalog.load_new(&path) {
                Ok((index, report)) => {
                    self.state = CatalogState::Loaded(index);
                    Ok(report)
                }
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(report) => {
                debug!("load report: {:?}", report);
                writeln!(self.output, "Data loaded from {}", path.display())?;
            }
            Err(e) => {
                warn!("{}", e);
                writeln!(self.output, "Could not open file: {}", path.display())?;
            }
        }
        writeln!(self.output)?;
        Ok(true)
    }

    fn list(&mut self) -> io::Result<bool> {
        let Some(index) = self.state.index() else {
            writeln!(self.output, "{}", NOT_LOADED)?;
            writeln!(self.output)?;
            return Ok(true);
        };

        writeln!(self.output, "{}", self.list_heading)?;
        writeln!(self.output)?;
        for course in index {
            writeln!(self.output, "{}", course)?;
        }
        writeln!(self.output)?;
        Ok(true)
    }

    fn show(&mut self) -> io::Result<bool> {
        if self.state.index().is_none() {
            writeln!(self.output, "{}", NOT_LOADED)?;
            writeln!(self.output)?;
            return Ok(true);
        }

        write!(self.output, "What course do you want to know about? ")?;
        self.output.flush()?;
        let Some(answer) = self.read_line()? else {
            return Ok(false);
        };
        let identifier = normalize_identifier(answer.trim());
        writeln!(self.output)?;

        match self.state.index().and_then(|index| index.find(&identifier)) {
            Some(course) => writeln!(self.output, "{}", course_details(course))?,
            None => writeln!(self.output, "{} not found.", identifier)?,
        }
        writeln!(self.output)?;
        Ok(true)
    }
}
