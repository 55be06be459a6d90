use std::io::{self, IsTerminal};

const TITLE: &str = "\
┬ ┬┌─┐┌┐ ┌─┐┌─┐┌─┐┌─┐
│││├┤ ├┴┐├─┘├─┤│ ┬├┤
└┴┘└─┘└─┘┴  ┴ ┴└─┘└─┘
┌┬┐┌─┐  ┌─┐┌┬┐┌─┐
 │ │ │  ├─┘ ││├─
 ┴ └─┘  ┴  ─┴┘┴
┌─┐┌─┐┌┐┌┬  ┬┌─┐┬─┐┌┬┐┌─┐┬─┐
│  │ ││││└┐┌┘├┤ ├┬┘ │ ├┤ ├┬┘
└─┘└─┘┘└┘ └┘ └─┘┴└─ ┴ └─┘┴└─";

/// Clear the terminal and print the title. Color and clearing are skipped
/// when stdout is not a terminal.
pub fn print() {
    if io::stdout().is_terminal() {
        print!("\x1b[2J\x1b[1;1H");
        println!("\x1b[93m{TITLE}\x1b[0m\n");
    } else {
        println!("{TITLE}\n");
    }
}
