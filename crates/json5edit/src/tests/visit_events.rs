use alloc::{format, string::String, vec, vec::Vec};

use crate::{ParseErrorCode, ParseOptions, ParseVisitor, Span, Value, visit};

/// Records every event as a compact line for order-sensitive assertions.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl ParseVisitor for Recorder {
    fn on_object_begin(&mut self, span: Span) {
        self.events.push(format!("{{ @{}", span.offset));
    }

    fn on_object_property(&mut self, name: &str, span: Span) {
        self.events.push(format!("prop {name:?} @{}", span.offset));
    }

    fn on_object_end(&mut self, span: Span) {
        self.events.push(format!("}} @{}", span.offset));
    }

    fn on_array_begin(&mut self, span: Span) {
        self.events.push(format!("[ @{}", span.offset));
    }

    fn on_array_end(&mut self, span: Span) {
        self.events.push(format!("] @{}", span.offset));
    }

    fn on_literal_value(&mut self, value: Value, span: Span) {
        self.events.push(format!("lit {value:?} @{}", span.offset));
    }

    fn on_separator(&mut self, separator: char, span: Span) {
        self.events.push(format!("sep {separator} @{}", span.offset));
    }

    fn on_comment(&mut self, span: Span) {
        self.events.push(format!("comment @{}", span.offset));
    }

    fn on_error(&mut self, code: ParseErrorCode, offset: usize, _length: usize) {
        self.events.push(format!("error {code:?} @{offset}"));
    }
}

fn record(text: &str, options: ParseOptions) -> Vec<String> {
    let mut recorder = Recorder::default();
    visit(text, &mut recorder, options);
    recorder.events
}

#[test]
fn events_in_document_order() {
    let events = record("{ a: [1, true], }", ParseOptions::default());
    assert_eq!(
        events,
        vec![
            "{ @0",
            "prop \"a\" @2",
            "sep : @3",
            "[ @5",
            "lit Number(1.0) @6",
            "sep , @7",
            "lit Boolean(true) @9",
            "] @13",
            "sep , @14",
            "} @16",
        ]
    );
}

#[test]
fn comments_are_delivered_between_structural_events() {
    let events = record("/* head */ 1 // tail", ParseOptions::default());
    assert_eq!(
        events,
        vec!["comment @0", "lit Number(1.0) @11", "comment @13"]
    );
}

#[test]
fn property_without_separator_gets_no_value_events() {
    let events = record(
        "{\"prop1\":\"foo\",\"prop3\":{\"prp1\":{\"\"}}}",
        ParseOptions::default(),
    );
    assert_eq!(
        events,
        vec![
            "{ @0",
            "prop \"prop1\" @1",
            "sep : @8",
            "lit String(\"foo\") @9",
            "sep , @14",
            "prop \"prop3\" @15",
            "sep : @22",
            "{ @23",
            "prop \"prp1\" @24",
            "sep : @30",
            "{ @31",
            "prop \"\" @32",
            "error ColonExpected @34",
            "} @34",
            "} @35",
            "} @36",
        ]
    );
}

#[test]
fn disallowed_comments_suppress_on_comment() {
    let options = ParseOptions {
        disallow_comments: true,
        ..Default::default()
    };
    let events = record("/* g */ 1", options);
    assert_eq!(
        events,
        vec!["error InvalidCommentToken @0", "lit Number(1.0) @8"]
    );
}

#[test]
fn synthesized_closes_at_end_of_input() {
    let events = record("[ { a: 1", ParseOptions::default());
    assert_eq!(
        events,
        vec![
            "[ @0",
            "{ @2",
            "prop \"a\" @4",
            "sep : @5",
            "lit Number(1.0) @7",
            "} @8",
            "error CloseBraceExpected @8",
            "] @8",
            "error CloseBracketExpected @8",
        ]
    );
}

#[test]
fn early_termination_stops_the_traversal() {
    struct StopAfterFirstProperty {
        seen: usize,
        later_events: usize,
    }

    impl ParseVisitor for StopAfterFirstProperty {
        fn on_object_property(&mut self, _name: &str, _span: Span) {
            self.seen += 1;
        }

        fn on_literal_value(&mut self, _value: Value, _span: Span) {
            self.later_events += 1;
        }

        fn should_continue(&self) -> bool {
            self.seen == 0
        }
    }

    let mut visitor = StopAfterFirstProperty {
        seen: 0,
        later_events: 0,
    };
    visit("{ a: 1, b: 2, c: 3 }", &mut visitor, ParseOptions::default());
    assert_eq!(visitor.seen, 1);
    assert_eq!(visitor.later_events, 0);
}
