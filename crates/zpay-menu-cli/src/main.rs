//! `zpay-menu` binary entry point.

use std::process;

fn main() {
    let exit_code = zpay_menu_cli::run();
    if exit_code != 0 {
        process::exit(exit_code);
    }
}
