use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every portal error (session, query, decode) carries an
/// ErrorLocation. If capture breaks, a failing scrape can no longer be traced
/// back to the stage that raised it.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - `Location::caller()` stops being propagated correctly
/// - File path extraction breaks
/// - Line/column capture fails
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: The current source line
    let expected_line = line!() + 3;

    // WHEN: Creating ErrorLocation from caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert_eq!(location.line, expected_line, "Should capture correct line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies that ErrorLocation Display formatting produces "[file:line:column]".
///
/// **WHY THIS MATTERS**: Error messages end up in the CLI envelope and log file.
/// If the format breaks, the location suffix becomes unreadable.
///
/// **BUG THIS CATCHES**: Would catch if the Display implementation drops the
/// brackets or one of the three components.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting as string
    let formatted = format!("{}", location);

    // THEN: Should produce "[file:line:column]" format
    assert!(formatted.starts_with('['), "Should start with '['");
    assert!(formatted.ends_with(']'), "Should end with ']'");
    assert!(
        formatted.contains("error_location.rs"),
        "Should include filename"
    );
    assert!(
        formatted.contains(&format!(":{}:{}]", location.line, location.column)),
        "Should include line and column"
    );
}

/// **VALUE**: Verifies that `#[track_caller]` propagation reports each call site.
///
/// **WHY THIS MATTERS**: The `From` conversions in portal-client are
/// `#[track_caller]`. If propagation breaks, every error would point at the
/// conversion impl instead of the `?` that raised it.
///
/// **BUG THIS CATCHES**: Would catch if someone removes `#[track_caller]`
/// from a helper that builds locations.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    // GIVEN: A helper function that captures location
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Capturing location from different call sites
    let first = capture_location();
    let second = capture_location();

    // THEN: Same file, sequential lines
    assert_eq!(first.file, second.file, "Should have same file");
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
}
