use crate::reference::{expand_abbreviation, is_location_code};

/// Cleans a raw statement string into the uppercase token form every
/// dictionary stage works on.
///
/// Standalone digit runs, punctuation and non-ASCII characters are dropped,
/// hyphens survive (`7-ELEVEN` keeps its `-ELEVEN` tail), location codes are
/// removed and known abbreviations are expanded. The result may be empty.
pub fn normalize(raw: &str) -> String {
    let upper = raw.to_ascii_uppercase();
    let without_numbers = strip_standalone_digit_runs(&upper);

    let filtered = without_numbers
        .chars()
        .map(|character| {
            if character.is_ascii_uppercase() || character.is_whitespace() || character == '-' {
                character
            } else {
                ' '
            }
        })
        .collect::<String>();

    let mut tokens: Vec<&str> = Vec::new();
    for token in filtered.split_whitespace() {
        if is_location_code(token) {
            continue;
        }
        tokens.push(expand_abbreviation(token).unwrap_or(token));
    }

    tokens.join(" ").trim().to_string()
}

/// Python-style `str.title()`: a letter is upper-cased when the previous
/// character is not a letter and lower-cased otherwise.
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for character in value.chars() {
        if character.is_alphabetic() {
            if previous_is_letter {
                output.extend(character.to_lowercase());
            } else {
                output.extend(character.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            output.push(character);
            previous_is_letter = false;
        }
    }
    output
}

fn strip_standalone_digit_runs(value: &str) -> String {
    let characters = value.chars().collect::<Vec<char>>();
    let mut output = String::with_capacity(value.len());
    let mut index = 0usize;

    while index < characters.len() {
        if !characters[index].is_ascii_digit() {
            output.push(characters[index]);
            index += 1;
            continue;
        }

        let start = index;
        while index < characters.len() && characters[index].is_ascii_digit() {
            index += 1;
        }

        let bounded_before = start == 0 || !is_word_character(characters[start - 1]);
        let bounded_after = index == characters.len() || !is_word_character(characters[index]);
        if bounded_before && bounded_after {
            output.push(' ');
        } else {
            output.extend(&characters[start..index]);
        }
    }

    output
}

fn is_word_character(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}
