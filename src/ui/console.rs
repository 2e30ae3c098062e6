/// Console front-end: a line-based menu over the same navigator.
///
/// One iteration = print the menu, read one line, map the typed choice
/// onto `handle_selection`, print the outcome. Malformed input is
/// discarded and the prompt reissued; the loop ends on Quit or EOF.
///
/// The console has no persistent Gameplay/Settings screens: after
/// printing the placeholder the front-end selects the Back region, so
/// the navigator passes through Gameplay→Menu / Settings→Menu exactly
/// as the state machine defines them.

use std::io::{self, BufRead, Write};

use crate::nav::event::NavEvent;
use crate::nav::navigator::Navigator;
use crate::nav::screen::Screen;

pub fn run_console<R, W>(nav: &mut Navigator, input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();

    loop {
        print_menu(nav, out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF: leave quietly
            writeln!(out)?;
            return Ok(());
        }

        let choice: i64 = match line.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                writeln!(out, "Input error. Please enter numbers only.")?;
                continue;
            }
        };

        // Choices are 1-based; anything below 1 can't be a region index.
        let event = match choice.checked_sub(1).and_then(|i| usize::try_from(i).ok()) {
            Some(index) => nav.handle_selection(index),
            None => NavEvent::Rejected,
        };

        match event {
            NavEvent::Entered(Screen::Gameplay) => {
                writeln!(out, "Starting the game... (placeholder)")?;
                nav.back();
            }
            NavEvent::Entered(Screen::Settings) => {
                writeln!(out, "Opening settings... (placeholder)")?;
                nav.back();
            }
            NavEvent::Entered(Screen::Exit) => {
                writeln!(out, "Exiting. Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(out, "Invalid option. Please choose 1, 2, or 3.")?;
            }
        }
    }
}

fn print_menu<W: Write>(nav: &Navigator, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "==============================")?;
    writeln!(out, "        Tower Defense")?;
    writeln!(out, "==============================")?;
    for (i, region) in nav.regions().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, region.label)?;
    }
    write!(out, "Choose an option: ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run a scripted session and return everything written to stdout.
    fn session(script: &str) -> String {
        let mut nav = Navigator::new();
        let mut input = script.as_bytes();
        let mut out = Vec::new();
        run_console(&mut nav, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn menu_lists_all_options() {
        let out = session("3\n");
        assert!(out.contains("Tower Defense"));
        assert!(out.contains("1. Play"));
        assert!(out.contains("2. Settings"));
        assert!(out.contains("3. Quit"));
    }

    #[test]
    fn play_prints_placeholder_and_continues() {
        let out = session("1\n3\n");
        assert!(out.contains("Starting the game... (placeholder)"));
        // The loop continued: the quit choice was still consumed.
        assert!(out.contains("Exiting. Goodbye!"));
    }

    #[test]
    fn settings_prints_placeholder_and_continues() {
        let out = session("2\n3\n");
        assert!(out.contains("Opening settings... (placeholder)"));
        assert!(out.contains("Exiting. Goodbye!"));
    }

    #[test]
    fn quit_ends_the_loop() {
        let out = session("3\n1\n");
        assert!(out.contains("Exiting. Goodbye!"));
        // Nothing after quit was read.
        assert!(!out.contains("Starting the game"));
    }

    #[test]
    fn non_numeric_input_is_recovered() {
        let out = session("abc\n3\n");
        assert!(out.contains("Input error. Please enter numbers only."));
        assert!(out.contains("Exiting. Goodbye!"));
    }

    #[test]
    fn out_of_range_choice_is_reported() {
        let out = session("9\n3\n");
        assert!(out.contains("Invalid option. Please choose 1, 2, or 3."));
        assert!(out.contains("Exiting. Goodbye!"));
    }

    #[test]
    fn zero_and_negative_choices_are_invalid() {
        let out = session("0\n-2\n3\n");
        assert_eq!(out.matches("Invalid option").count(), 2);
    }

    #[test]
    fn menu_redisplays_after_bad_input() {
        let out = session("abc\n3\n");
        assert_eq!(out.matches("Choose an option:").count(), 2);
    }

    #[test]
    fn eof_ends_the_loop() {
        let out = session("");
        assert_eq!(out.matches("Choose an option:").count(), 1);
        assert!(!out.contains("Exiting. Goodbye!"));
    }

    #[test]
    fn navigator_is_back_on_menu_after_play() {
        let mut nav = Navigator::new();
        let mut input = "1\n".as_bytes();
        let mut out = Vec::new();
        run_console(&mut nav, &mut input, &mut out).unwrap();
        assert_eq!(nav.current(), Screen::Menu);
    }
}
