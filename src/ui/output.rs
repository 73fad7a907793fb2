use crate::errors::AppResult;
use serde::Serialize;

/// Print a response body as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
