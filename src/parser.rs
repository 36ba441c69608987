//! Heuristic parser for the markdown recipes returned by the LLM.
//!
//! The model is free to answer in any markdown shape, so this never fails: when
//! no section can be recognised the lists come back empty and callers display
//! [`ParsedRecipe::raw`] instead.

use log::debug;

use crate::model::ParsedRecipe;

const INGREDIENT_KEYWORDS: &[&str] = &[
    "#### ingredients",
    "### ingredients",
    "## ingredients",
    "# ingredients",
    "ingredients",
    "shopping list",
];

const INSTRUCTION_KEYWORDS: &[&str] = &[
    "#### instructions",
    "#### directions",
    "### instructions",
    "### directions",
    "## instructions",
    "## directions",
    "# instructions",
    "# directions",
    "instructions",
    "directions",
    "steps",
    "method",
];

/// Split raw recipe markdown into title, ingredients and steps.
pub fn parse_recipe_text(text: &str) -> ParsedRecipe {
    if text.is_empty() {
        return ParsedRecipe::default();
    }

    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();

    let title = find_title(&lines);

    let mut ingredients = find_section(&lines, INGREDIENT_KEYWORDS)
        .map(|idx| section_body(&lines, idx))
        .unwrap_or_default();
    let mut steps = find_section(&lines, INSTRUCTION_KEYWORDS)
        .map(|idx| section_body(&lines, idx))
        .unwrap_or_default();

    if ingredients.is_empty() {
        if let Some(start) = lines
            .iter()
            .position(|l| l.starts_with("- ") || l.starts_with("* "))
        {
            debug!("No ingredients section, using bullet block at line {}", start);
            ingredients = collect_items(&lines[start..]);
        }
    }

    if steps.is_empty() && !ingredients.is_empty() {
        if let Some(blank) = lines
            .iter()
            .enumerate()
            .position(|(idx, l)| idx > 0 && l.is_empty())
        {
            debug!("No steps section, using text after blank line {}", blank);
            steps = collect_items(&lines[blank + 1..]);
        }
    }

    ParsedRecipe {
        title,
        ingredients,
        steps,
        raw: text.to_string(),
    }
}

/// First heading line, else first non-empty line, without heading markers.
fn find_title(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|l| l.starts_with('#'))
        .or_else(|| lines.iter().find(|l| !l.is_empty()))
        .map(|l| l.trim_start_matches('#').trim().to_string())
        .unwrap_or_default()
}

/// Index of the earliest line matching any keyword.
///
/// A line matches when it starts with the keyword, equals it, or carries it as
/// a `keyword:` label anywhere.
fn find_section(lines: &[&str], keywords: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let lower = line.to_lowercase();
        keywords.iter().any(|k| {
            lower.starts_with(k) || lower == *k || lower.contains(&format!("{}:", k))
        })
    })
}

/// Items between a section header and the next heading or rule.
fn section_body(lines: &[&str], header: usize) -> Vec<String> {
    let rest = &lines[header + 1..];
    let end = rest
        .iter()
        .position(|l| l.starts_with('#') || is_rule(l))
        .unwrap_or(rest.len());
    collect_items(&rest[..end])
}

fn collect_items(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|l| strip_bullet(l).trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop one leading `-` or `*` together with the whitespace after it.
fn strip_bullet(line: &str) -> &str {
    match line.strip_prefix(['-', '*']) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// A line made only of three or more `-` or `=` characters.
fn is_rule(line: &str) -> bool {
    line.chars().count() >= 3 && line.chars().all(|c| c == '-' || c == '=')
}
