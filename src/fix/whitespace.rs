// SPDX-License-Identifier: MIT

//! Whitespace cleanup: trailing whitespace stripping and blank-run
//! collapsing.

/// Apply the whitespace pass to a line sequence.
pub fn apply(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut blank_run = 0usize;

    for line in lines {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            blank_run += 1;
            // runs of two or more blanks collapse to exactly one
            if blank_run == 1 {
                out.push(String::new());
            }
        } else {
            blank_run = 0;
            out.push(trimmed.to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[&str]) -> Vec<String> {
        let lines: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        apply(&lines)
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let out = run(&["x = 1   ", "y = 2\t"]);
        assert_eq!(out, vec!["x = 1", "y = 2"]);
    }

    #[test]
    fn test_blank_runs_collapsed() {
        let out = run(&["a", "", "", "", "b"]);
        assert_eq!(out, vec!["a", "", "b"]);
    }

    #[test]
    fn test_single_blank_kept() {
        let input = &["a", "", "b"];
        let out = run(input);
        assert_eq!(out, input.to_vec());
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let out = run(&["a", "   ", "  ", "b"]);
        assert_eq!(out, vec!["a", "", "b"]);
    }

    #[test]
    fn test_idempotent() {
        let input: Vec<String> = ["a  ", "", "", "b"].iter().map(|s| s.to_string()).collect();
        let once = apply(&input);
        let twice = apply(&once);
        assert_eq!(once, twice);
    }
}
