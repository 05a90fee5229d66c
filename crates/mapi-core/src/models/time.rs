use chrono::NaiveDateTime;

/// Converts a Windows FILETIME (100-ns ticks since 1601-01-01 UTC) to a
/// UTC timestamp. Integer arithmetic only; out-of-range values yield
/// `None`.
pub fn filetime_to_datetime(file_time: i64) -> Option<NaiveDateTime> {
    epochs::windows_file(file_time)
}
