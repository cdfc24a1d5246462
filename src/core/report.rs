//! Progress lines and diagnostics emitted while a move runs.
//!
//! Every event is recorded in order. When echo is on, each event is printed
//! as it happens: progress on stdout, warnings on stderr (verbose only).

use serde::Serialize;

use crate::classname::CanonicalClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    MalformedSource,
    IdentityMismatch,
    BaseDirNotFound,
    /// The file imports the moved class but no import line was rewritten.
    ImportNotRewritten,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Moved {
        from: CanonicalClass,
        to: CanonicalClass,
        from_path: String,
        to_path: String,
    },
    ImportsUpdated {
        file: String,
        from: CanonicalClass,
        to: CanonicalClass,
        lines: usize,
    },
    Warning {
        kind: WarningKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        message: String,
    },
}

impl Event {
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::Warning { .. })
    }
}

#[derive(Debug)]
pub struct Reporter {
    verbose: bool,
    echo: bool,
    events: Vec<Event>,
}

impl Reporter {
    /// Reporter that prints each event as it is emitted.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            echo: true,
            events: Vec::new(),
        }
    }

    /// Reporter that only records.
    pub fn silent(verbose: bool) -> Self {
        Self {
            echo: false,
            ..Self::new(verbose)
        }
    }

    pub fn warn(&mut self, kind: WarningKind, file: Option<String>, message: impl Into<String>) {
        self.emit(Event::Warning {
            kind,
            file,
            message: message.into(),
        });
    }

    pub fn emit(&mut self, event: Event) {
        if self.echo {
            if let Some(line) = self.render(&event) {
                if event.is_warning() {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            }
        }
        self.events.push(event);
    }

    /// The line printed for `event`, or `None` when it is verbose-only and
    /// verbose output is off.
    pub fn render(&self, event: &Event) -> Option<String> {
        let line = match event {
            Event::Moved {
                from,
                to,
                from_path,
                to_path,
            } => {
                if self.verbose {
                    format!("moved {} -> {} ({} -> {})", from_path, to_path, from, to)
                } else {
                    format!("moved {} -> {}", from_path, to_path)
                }
            }
            Event::ImportsUpdated { file, from, to, .. } => {
                if self.verbose {
                    format!("updated imports in {} ({} -> {})", file, from, to)
                } else {
                    format!("updated imports in {}", file)
                }
            }
            Event::Warning { file, message, .. } => {
                if !self.verbose {
                    return None;
                }
                match file {
                    Some(file) => format!("warning: {}: {}", file, message),
                    None => format!("warning: {}", message),
                }
            }
        };
        Some(line)
    }

    /// Every line that was (or would have been) printed, in order.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().filter_map(|e| self.render(e)).collect()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn warning_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_warning()).count()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> CanonicalClass {
        CanonicalClass::parse(name).unwrap()
    }

    fn moved() -> Event {
        Event::Moved {
            from: class("a.b.Foo"),
            to: class("a.b.c.Bar"),
            from_path: "a/b/Foo.java".to_string(),
            to_path: "a/b/c/Bar.java".to_string(),
        }
    }

    #[test]
    fn plain_progress_line() {
        let reporter = Reporter::silent(false);
        assert_eq!(
            reporter.render(&moved()).unwrap(),
            "moved a/b/Foo.java -> a/b/c/Bar.java"
        );
    }

    #[test]
    fn verbose_progress_line_names_classes() {
        let reporter = Reporter::silent(true);
        assert_eq!(
            reporter.render(&moved()).unwrap(),
            "moved a/b/Foo.java -> a/b/c/Bar.java (a.b.Foo -> a.b.c.Bar)"
        );
    }

    #[test]
    fn warnings_are_verbose_only_but_always_recorded() {
        let mut quiet = Reporter::silent(false);
        quiet.warn(WarningKind::MalformedSource, Some("x/Y.java".into()), "package declaration");
        assert!(quiet.lines().is_empty());
        assert_eq!(quiet.warning_count(), 1);

        let mut loud = Reporter::silent(true);
        loud.warn(WarningKind::MalformedSource, Some("x/Y.java".into()), "package declaration");
        assert_eq!(loud.lines(), vec!["warning: x/Y.java: package declaration"]);
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(moved()).unwrap();
        assert_eq!(json["event"], "moved");
        assert_eq!(json["to"], "a.b.c.Bar");
    }
}
