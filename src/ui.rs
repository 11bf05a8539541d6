use console::style;

/// Line-oriented sink for everything a command wants the user to see.
///
/// Commands never print directly; they talk to a `Ui` so the output can be
/// captured in tests.
pub trait Ui {
    /// Emit an informational line on standard output.
    fn info(&mut self, line: &str);

    /// Emit a non-fatal warning on standard error.
    fn warn(&mut self, line: &str);

    /// Emit an error diagnostic on standard error.
    fn error(&mut self, line: &str);
}

/// Default implementation of [`Ui`] writing to the process streams.
///
/// Warnings and errors are colorized with [`console::style`]; colors are
/// dropped automatically when the stream is not a terminal.
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn info(&mut self, line: &str) {
        println!("{}", line);
    }

    fn warn(&mut self, line: &str) {
        eprintln!("{}", style(line).yellow());
    }

    fn error(&mut self, line: &str) {
        eprintln!("{}", style(line).red().bold());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Ui;

    /// Records every line by severity, in emission order.
    #[derive(Default)]
    pub(crate) struct RecordingUi {
        pub info: Vec<String>,
        pub warn: Vec<String>,
        pub error: Vec<String>,
    }

    impl Ui for RecordingUi {
        fn info(&mut self, line: &str) {
            self.info.push(line.to_string());
        }

        fn warn(&mut self, line: &str) {
            self.warn.push(line.to_string());
        }

        fn error(&mut self, line: &str) {
            self.error.push(line.to_string());
        }
    }

    #[test]
    fn recording_ui_keeps_severities_apart() {
        let mut ui = RecordingUi::default();
        ui.info("a");
        ui.warn("b");
        ui.error("c");
        ui.info("d");

        assert_eq!(ui.info, vec!["a", "d"]);
        assert_eq!(ui.warn, vec!["b"]);
        assert_eq!(ui.error, vec!["c"]);
    }
}
