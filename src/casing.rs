//! Identifier case conversion shared by every naming step.
//!
//! Words are split the way JavaScript tooling splits them: an optional
//! uppercase letter followed by lowercase letters, a run of digits, or a run
//! of uppercase letters that is not followed by a lowercase letter
//! (`HTMLParser` -> `HTML`, `Parser`). Anything that is not a letter or digit
//! separates words.

/// Split an identifier-like string into words.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_uppercase() {
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if next_lower {
                i += 1;
                while i < chars.len() && chars[i].is_lowercase() {
                    i += 1;
                }
            } else {
                while i < chars.len() && chars[i].is_uppercase() {
                    i += 1;
                }
                // The last capital of a run belongs to the next word (`HTMLParser`).
                if i < chars.len() && chars[i].is_lowercase() && i - start > 1 {
                    i -= 1;
                }
            }
        } else if c.is_lowercase() {
            while i < chars.len() && chars[i].is_lowercase() {
                i += 1;
            }
        } else if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        } else if c.is_alphabetic() {
            while i < chars.len()
                && chars[i].is_alphabetic()
                && !chars[i].is_uppercase()
                && !chars[i].is_lowercase()
            {
                i += 1;
            }
        } else {
            i += 1;
            continue;
        }

        words.push(chars[start..i].iter().collect());
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `get_users_By_userId` -> `getUsersByUserId`
pub fn camel_case(input: &str) -> String {
    let words = words(input);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `getUsers_query_params` -> `GetUsersQueryParams`
pub fn pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}
