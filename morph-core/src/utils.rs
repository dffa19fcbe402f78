//! Case conversion helpers for identifiers.

/// Split an identifier into words.
///
/// Words are separated by any non-alphanumeric character, by a lowercase or
/// digit followed by an uppercase letter (`fooBar`), and by the last capital
/// of an acronym followed by a lowercase letter (`HTTPServer`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "street_name" -> "streetName")
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world")
pub fn to_snake_case(s: &str) -> String {
    join_words(s, "_", str::to_lowercase)
}

/// Convert a string to kebab-case (e.g., "HelloWorld" -> "hello-world")
pub fn to_kebab_case(s: &str) -> String {
    join_words(s, "-", str::to_lowercase)
}

/// Convert a string to CONSTANT_CASE (e.g., "helloWorld" -> "HELLO_WORLD")
pub fn to_constant_case(s: &str) -> String {
    join_words(s, "_", str::to_uppercase)
}

fn join_words(s: &str, separator: &str, transform: fn(&str) -> String) -> String {
    split_words(s)
        .iter()
        .map(|w| transform(w))
        .collect::<Vec<_>>()
        .join(separator)
}
