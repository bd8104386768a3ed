mod scanner_errors;
mod values_and_segments;
mod visit_events;
