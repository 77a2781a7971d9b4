/// Collapse extracted text onto a single line before pattern matching.
///
/// Trims the ends, turns every `\n` into a space, then replaces each
/// non-overlapping pair of spaces with one space in a single left-to-right
/// pass. Runs of four spaces therefore become two, not one.
pub fn normalize_single_line(text: &str) -> String {
    text.trim().replace('\n', " ").replace("  ", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(
            normalize_single_line("A Study\nby Jane Doe\n2004"),
            "A Study by Jane Doe 2004"
        );
    }

    #[test]
    fn double_spaces_collapse_once() {
        assert_eq!(normalize_single_line("a  b"), "a b");
        assert_eq!(normalize_single_line("a   b"), "a  b");
        assert_eq!(normalize_single_line("a    b"), "a  b");
        // A line break next to a space yields a double space, which collapses.
        assert_eq!(normalize_single_line("end \nstart"), "end start");
    }

    #[test]
    fn ends_trimmed() {
        assert_eq!(normalize_single_line("\n\n  Title  \n"), "Title");
        assert_eq!(normalize_single_line(""), "");
        assert_eq!(normalize_single_line(" \n\t"), "");
    }

    #[test]
    fn no_newline_survives() {
        let out = normalize_single_line("one\ntwo\n\nthree\n");
        assert!(!out.contains('\n'));
    }
}
