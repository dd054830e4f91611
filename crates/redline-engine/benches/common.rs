// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use redline_engine::Annotation;

#[allow(dead_code)]
pub fn generate_text(lines: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog near the riverbank.\n";
    base.repeat(lines)
}

/// Overlapping annotations of every kind, roughly `per_line` per line.
#[allow(dead_code)]
pub fn generate_annotations(text: &str, per_line: usize) -> Vec<Annotation> {
    let len = text.chars().count();
    let count = len / 64 * per_line;
    (0..count)
        .map(|i| {
            let start = (i * 37) % len;
            let end = (start + 5 + (i * 13) % 40).min(len);
            match i % 4 {
                0 => Annotation::highlight(start, end),
                1 => Annotation::redaction(start, end).with_extent(4),
                2 => Annotation::markup(start, end).with_tag("em"),
                _ => Annotation::markup(start, end).with_tag("div"),
            }
        })
        .collect()
}
