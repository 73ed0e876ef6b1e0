//! Scripted sessions against the interactive Shell

use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use courseplan::application::services::{CatalogService, CatalogState, Shell};
use courseplan::config::Settings;
use courseplan::infrastructure::traits::RealFileSystem;
use courseplan::util::testing;

const MENU: &str = "  1. Load Data Structure.\n  2. Print Course List.\n  3. Print Course.\n  9. Exit\n\nWhat would you like to do? ";

fn settings_with_default(file: &str) -> Settings {
    Settings {
        default_file: PathBuf::from(file),
        ..Settings::default()
    }
}

/// Run a session with `input` and return (transcript, loaded course count).
fn run_session(settings: &Settings, input: &str) -> (String, Option<usize>) {
    testing::init_test_setup();
    let catalog = CatalogService::new(Arc::new(RealFileSystem));
    let mut shell = Shell::new(&catalog, settings, input.as_bytes(), Vec::new());

    shell.run().expect("session runs");

    let loaded = match shell.state() {
        CatalogState::Empty => None,
        CatalogState::Loaded(index) => Some(index.len()),
    };
    let transcript = String::from_utf8(shell.into_output()).expect("utf8 output");
    (transcript, loaded)
}

#[test]
fn given_exit_choice_when_running_then_greets_and_says_goodbye() {
    let (out, loaded) = run_session(&Settings::default(), "9\n");

    assert_eq!(
        out,
        format!(
            "Welcome to the course planner.\n\n{MENU}\nThank you for using the course planner!\n"
        )
    );
    assert!(loaded.is_none());
}

#[rstest]
#[case("2\n9\n")]
#[case("3\n9\n")]
fn given_no_load_when_querying_then_asks_to_load_first(#[case] input: &str) {
    let (out, loaded) = run_session(&Settings::default(), input);

    assert!(out.contains("Please load the data structure first (option 1).\n\n"));
    assert!(!out.contains("What course do you want to know about?"));
    assert!(loaded.is_none());
}

#[test]
fn given_default_file_when_loading_with_enter_then_uses_default() {
    let settings = settings_with_default("tests/resources/catalog.csv");

    let (out, loaded) = run_session(&settings, "1\n\n9\n");

    assert!(out.contains(
        "Enter the file name (or press Enter for default: tests/resources/catalog.csv): "
    ));
    assert!(out.contains("Data loaded from tests/resources/catalog.csv\n\n"));
    assert_eq!(loaded, Some(8));
}

#[test]
fn given_loaded_catalog_when_listing_then_prints_sorted_schedule() {
    let (out, _) = run_session(&Settings::default(), "1\ntests/resources/messy.csv\n2\n9\n");

    let expected = "Here is a sample schedule:\n\n\
                    CSCI100, Intro to CS\n\
                    CSCI101, Intro to Programming\n\
                    CSCI200, Data Structures\n\n";
    assert!(out.contains(expected), "transcript:\n{out}");
}

#[test]
fn given_loaded_catalog_when_showing_lowercase_course_then_prints_details() {
    let input = "1\ntests/resources/catalog.csv\n3\n  csci300 \n9\n";

    let (out, _) = run_session(&Settings::default(), input);

    assert!(out.contains("What course do you want to know about? \n"));
    assert!(out.contains(
        "CSCI300, Introduction to Algorithms\nPrerequisites: CSCI200, MATH201\n\n"
    ));
}

#[test]
fn given_course_without_prerequisites_when_showing_then_prints_none() {
    let input = "1\ntests/resources/catalog.csv\n3\nMATH201\n9\n";

    let (out, _) = run_session(&Settings::default(), input);

    assert!(out.contains("MATH201, Discrete Mathematics\nPrerequisites: None\n\n"));
}

#[test]
fn given_unknown_course_when_showing_then_reports_not_found() {
    let input = "1\ntests/resources/catalog.csv\n3\ncsci999\n9\n";

    let (out, _) = run_session(&Settings::default(), input);

    assert!(out.contains("CSCI999 not found.\n\n"));
}

#[test]
fn given_non_numeric_choice_when_running_then_reprompts() {
    let (out, _) = run_session(&Settings::default(), "abc\n9\n");

    assert!(out.contains("Invalid input. Please enter a number.\n\n"));
    assert_eq!(out.matches(MENU).count(), 2);
}

#[test]
fn given_digits_followed_by_text_when_running_then_uses_leading_number() {
    let (out, _) = run_session(&Settings::default(), "1abc\n\n9\n");

    assert!(out.contains("Enter the file name (or press Enter for default: "));
    assert!(!out.contains("Invalid input"));
}

#[test]
fn given_blank_line_at_menu_when_running_then_keeps_waiting_without_menu() {
    let (out, _) = run_session(&Settings::default(), "\n   \n9\n");

    assert_eq!(out.matches(MENU).count(), 1);
    assert!(out.ends_with("Thank you for using the course planner!\n"));
}

#[rstest]
#[case("4\n9\n", "4 is not a valid option.\n\n")]
#[case("0\n9\n", "0 is not a valid option.\n\n")]
#[case("-7\n9\n", "-7 is not a valid option.\n\n")]
fn given_unknown_number_when_running_then_reports_invalid_option(
    #[case] input: &str,
    #[case] expected: &str,
) {
    let (out, _) = run_session(&Settings::default(), input);
    assert!(out.contains(expected), "transcript:\n{out}");
}

#[test]
fn given_missing_file_when_loading_then_reports_and_stays_empty() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.csv");
    let input = format!("1\n{}\n2\n9\n", missing.display());

    let (out, loaded) = run_session(&Settings::default(), &input);

    assert!(out.contains(&format!("Could not open file: {}\n\n", missing.display())));
    assert!(out.contains("Please load the data structure first (option 1)."));
    assert!(loaded.is_none());
}

#[test]
fn given_two_loads_when_running_then_second_load_adds_courses() {
    let temp = TempDir::new().unwrap();
    let extra = temp.path().join("extra.csv");
    std::fs::write(&extra, "BIOL100,Biology\n").unwrap();
    let input = format!(
        "1\ntests/resources/catalog.csv\n1\n{}\n9\n",
        extra.display()
    );

    let (_, loaded) = run_session(&Settings::default(), &input);

    assert_eq!(loaded, Some(9));
}

#[test]
fn given_entered_file_name_when_loading_again_then_it_becomes_the_default() {
    let input = "1\ntests/resources/crlf.csv\n1\n\n9\n";

    let (out, loaded) = run_session(&Settings::default(), input);

    assert!(out.contains("(or press Enter for default: tests/resources/crlf.csv): "));
    // same file loaded twice, duplicates are kept
    assert_eq!(loaded, Some(4));
}

#[rstest]
#[case("")]
#[case("1\n")]
#[case("1\ntests/resources/catalog.csv\n3\n")]
fn given_input_ends_early_when_running_then_session_ends_cleanly(#[case] input: &str) {
    let (out, _) = run_session(&Settings::default(), input);

    assert!(out.starts_with("Welcome to the course planner."));
    assert!(!out.contains("Thank you for using the course planner!"));
}

#[test]
fn given_custom_heading_when_listing_then_uses_configured_heading() {
    let settings = Settings {
        list_heading: "Course list:".to_string(),
        ..settings_with_default("tests/resources/crlf.csv")
    };

    let (out, _) = run_session(&settings, "1\n\n2\n9\n");

    assert!(out.contains("Course list:\n\nCSCI100, Intro to CS\nCSCI101, Data Structures\n\n"));
}
