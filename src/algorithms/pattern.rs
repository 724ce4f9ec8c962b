// String matching: naive scan and Knuth-Morris-Pratt

use super::{join, Inputs, Output};
use crate::engine::{StepContext, StepError};
use crate::visual::{Delta, Highlight};

fn show(text: &str, pattern: &str, lps: Option<Vec<usize>>) -> Delta {
    Delta::Pattern {
        text: text.to_string(),
        pattern: pattern.to_string(),
        lps,
    }
}

fn report(positions: &[usize], ctx: &mut dyn StepContext) -> Result<(), StepError> {
    if positions.is_empty() {
        ctx.log("Pattern not found in text")
    } else {
        ctx.log(&format!(
            "Pattern found at {} position(s): {}",
            positions.len(),
            join(positions, ", ")
        ))
    }
}

/// Try every alignment of the pattern against the text
pub fn naive_pattern(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let text: Vec<char> = inputs.text.chars().collect();
    let pattern: Vec<char> = inputs.pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());

    ctx.log(&format!(
        "Naive pattern matching: searching for \"{}\" in \"{}\"",
        inputs.pattern, inputs.text
    ))?;
    ctx.update(show(&inputs.text, &inputs.pattern, None))?;

    let mut results = Vec::new();
    if m > 0 && m <= n {
        for i in 0..=n - m {
            ctx.log(&format!("Trying position {i} in text"))?;
            ctx.highlight_match(i, m, Highlight::Comparing)?;

            let mut j = 0;
            while j < m && text[i + j] == pattern[j] {
                ctx.log(&format!(
                    "Match at position {}: '{}' == '{}'",
                    i + j,
                    text[i + j],
                    pattern[j]
                ))?;
                ctx.highlight_comparison(i + j, j, Highlight::Comparing)?;
                j += 1;
            }

            if j == m {
                ctx.log(&format!("Pattern found at index {i}!"))?;
                ctx.highlight_match(i, m, Highlight::Active)?;
                results.push(i);
            } else {
                ctx.log(&format!("No match at position {i}"))?;
            }
        }
    }

    report(&results, ctx)?;
    Ok(Output::Positions(results))
}

/// Longest proper prefix of `pattern[..=i]` that is also a suffix, for each `i`
pub fn compute_lps(pattern: &[char]) -> Vec<usize> {
    let m = pattern.len();
    let mut lps = vec![0; m];
    let mut len = 0;
    let mut i = 1;

    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }

    lps
}

/// KMP search; the LPS table is published through `update` before scanning
pub fn kmp_pattern(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let text: Vec<char> = inputs.text.chars().collect();
    let pattern: Vec<char> = inputs.pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());

    ctx.log(&format!(
        "KMP pattern matching: searching for \"{}\" in \"{}\"",
        inputs.pattern, inputs.text
    ))?;
    ctx.update(show(&inputs.text, &inputs.pattern, None))?;

    ctx.log("Building LPS (Longest Proper Prefix which is also Suffix) array...")?;
    let lps = compute_lps(&pattern);
    ctx.update(show(&inputs.text, &inputs.pattern, Some(lps.clone())))?;
    ctx.log(&format!("LPS array: [{}]", join(&lps, ", ")))?;

    let mut results = Vec::new();
    if m > 0 {
        let (mut i, mut j) = (0, 0);
        while i < n {
            ctx.log(&format!(
                "Comparing text[{i}]='{}' with pattern[{j}]='{}'",
                text[i], pattern[j]
            ))?;
            ctx.highlight_comparison(i, j, Highlight::Comparing)?;

            if pattern[j] == text[i] {
                i += 1;
                j += 1;
            }

            if j == m {
                let start = i - j;
                ctx.log(&format!("Pattern found at index {start}!"))?;
                ctx.highlight_match(start, m, Highlight::Active)?;
                results.push(start);
                j = lps[j - 1];
            } else if i < n && pattern[j] != text[i] {
                if j != 0 {
                    ctx.log(&format!(
                        "Mismatch. Using LPS: j = lps[{}] = {}",
                        j - 1,
                        lps[j - 1]
                    ))?;
                    j = lps[j - 1];
                } else {
                    ctx.log("Mismatch. Moving to next character in text")?;
                    i += 1;
                }
            }
        }
    }

    report(&results, ctx)?;
    Ok(Output::Positions(results))
}
