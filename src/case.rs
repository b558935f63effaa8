//! Name conversion for admin labels and URL slugs: "is_done" -> "Is done", "TodoItem" -> "todo-items".

/// Convert a single identifier from camelCase/PascalCase to snake_case.
/// e.g. "TodoItem" -> "todo_item", "createdAt" -> "created_at"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Human label for a stored field name: first word capitalized, separators become spaces.
/// e.g. "is_done" -> "Is done", "created_at" -> "Created at"
pub fn headline(name: &str) -> String {
    let snake = to_snake_case(name);
    let mut out = String::with_capacity(snake.len());
    for (i, word) in snake.split(['_', '-']).filter(|w| !w.is_empty()).enumerate() {
        if i > 0 {
            out.push(' ');
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// English plural of a lowercase word, covering the regular suffix rules.
fn pluralize(word: &str) -> String {
    let consonant_y = word.len() > 1
        && word.ends_with('y')
        && !word[..word.len() - 1].ends_with(['a', 'e', 'i', 'o', 'u']);
    if consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if word.ends_with(['s', 'x', 'z']) || word.ends_with("ch") || word.ends_with("sh") {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

/// URL slug for a model: kebab-case with the last word pluralized.
/// e.g. "Todo" -> "todos", "TodoCategory" -> "todo-categories"
pub fn plural_slug(model: &str) -> String {
    let snake = to_snake_case(model);
    let mut words: Vec<String> = snake.split('_').filter(|w| !w.is_empty()).map(str::to_string).collect();
    if let Some(last) = words.pop() {
        words.push(pluralize(&last));
    }
    words.join("-")
}

/// Plural display label for a model. e.g. "Todo" -> "Todos", "TodoCategory" -> "Todo categories"
pub fn plural_label(model: &str) -> String {
    headline(&plural_slug(model))
}
