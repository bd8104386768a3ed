#![no_main]
use json5edit::{ParseOptions, Scanner, TokenKind, get_location, parse, parse_tree};
use libfuzzer_sys::fuzz_target;

const HEADER: usize = 1; // option flags

fn run(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let options = ParseOptions {
        disallow_comments: flags & 1 != 0,
        allow_empty_content: flags & 2 != 0,
    };

    // No entry point may fail on arbitrary input, and every reported span
    // must stay inside the text.
    let mut errors = Vec::new();
    let _ = parse(&text, &mut errors, options);
    for error in &errors {
        assert!(error.offset + error.length <= text.len());
    }

    errors.clear();
    let tree = parse_tree(&text, &mut errors, options);
    let root = tree.root();
    assert!(root.offset() + root.length() <= text.len());

    let mut scanner = Scanner::new(&text, flags & 4 != 0);
    loop {
        let kind = scanner.scan();
        assert!(scanner.token_offset() + scanner.token_length() <= text.len());
        assert!(scanner.token_start_character() <= scanner.token_offset());
        if kind == TokenKind::Eof {
            break;
        }
    }

    // probe a handful of cursor positions
    for offset in [0, text.len() / 2, text.len()] {
        if text.is_char_boundary(offset) {
            let _ = get_location(&text, offset);
        }
    }
}

fuzz_target!(|data: &[u8]| run(data));
