// SPDX-License-Identifier: MIT

//! Indentation normalizer.
//!
//! Maintains a stack of expected indent levels. A line whose stripped form
//! ends in a block-opening token pushes its indent; the first non-blank
//! line after an opener that fails to indent past it is forced to
//! `top + 4`, unless it is a continuation clause. Any later dedent to or
//! below the top pops the stack.

/// Clauses legitimately written at the same indent as their opener.
const CONTINUATION_CLAUSES: &[&str] = &["except", "else:", "elif"];

/// Tokens whose presence at end of line opens a block.
const BLOCK_OPENERS: &[char] = &[':', '{', '('];

pub(crate) fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

fn is_continuation_clause(stripped: &str) -> bool {
    CONTINUATION_CLAUSES.iter().any(|k| stripped.starts_with(k))
}

fn opens_block(stripped: &str) -> bool {
    BLOCK_OPENERS.iter().any(|c| stripped.ends_with(*c))
}

/// Apply the indentation normalizer to a line sequence.
pub fn apply(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut stack: Vec<usize> = Vec::new();
    let mut pending_body = false;

    for line in lines {
        let stripped = line.trim_start();
        if stripped.is_empty() {
            out.push(line.clone());
            continue;
        }

        let mut indent = leading_spaces(line);
        let mut fixed = line.clone();

        if pending_body {
            pending_body = false;
            if let Some(&top) = stack.last() {
                if indent <= top && !is_continuation_clause(stripped) {
                    indent = top + 4;
                    fixed = format!("{}{}", " ".repeat(indent), stripped);
                }
            }
        } else {
            while stack.last().is_some_and(|&top| indent <= top) {
                stack.pop();
            }
        }

        if opens_block(stripped) {
            stack.push(indent);
            pending_body = true;
        }

        out.push(fixed);
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
    fn test_body_forced_past_opener() {
        let out = run(&["if x:", "print(y)"]);
        assert_eq!(out, vec!["if x:", "    print(y)"]);
    }

    #[test]
    fn test_properly_indented_body_untouched() {
        let input = &["if x:", "    print(y)", "print(z)"];
        let out = run(input);
        assert_eq!(out, input.to_vec());
    }

    #[test]
    fn test_continuation_clause_exempt() {
        let input = &["try:", "    risky()", "except ValueError:", "    handle()"];
        let out = run(input);
        assert_eq!(out, input.to_vec());
    }

    #[test]
    fn test_else_clause_exempt() {
        let input = &["if x:", "    a()", "else:", "    b()"];
        let out = run(input);
        assert_eq!(out, input.to_vec());
    }

    #[test]
    fn test_nested_openers() {
        let out = run(&["def f():", "    if x:", "    y()"]);
        assert_eq!(out, vec!["def f():", "    if x:", "        y()"]);
    }

    #[test]
    fn test_open_paren_counts_as_opener() {
        let out = run(&["result = call(", "arg,", ")"]);
        // first line after the opener is pulled in; the rest dedent freely
        assert_eq!(out[1], "    arg,");
    }

    #[test]
    fn test_blank_lines_preserved() {
        let input = &["if x:", "", "    y()"];
        let out = run(input);
        assert_eq!(out, input.to_vec());
    }

    #[test]
    fn test_idempotent() {
        let input = &[
            "def f():",
            "if x:",
            "y()",
            "",
            "try:",
            "    g()",
            "except:",
            "    pass",
        ];
        let lines: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        let once = apply(&lines);
        let twice = apply(&once);
        assert_eq!(once, twice);
    }
}
