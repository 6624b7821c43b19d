//! rclockmarks main entrypoint.

use rclockmarks::run;
use rclockmarks::ui::messages::{error, info};

fn main() {
    if let Err(e) = run() {
        error(&e);
        if e.is_auth_failure() {
            info("Run `rclockmarks login` to start a new session.");
        }
        std::process::exit(1);
    }
}
