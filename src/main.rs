//! sessiongen main entrypoint.

use sessiongen::run;
use sessiongen::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
