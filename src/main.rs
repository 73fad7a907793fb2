//! shiftlog main entrypoint.

use shiftlog::run;
use shiftlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(e.exit_code());
    }
}
