//! Text normalization for header matching.

/// Lowercases, folds Polish diacritics to ASCII, and turns separators into
/// single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(fold_diacritic)
        .map(|ch| match ch {
            '_' | '-' | '.' | '/' | '\\' | ':' | '(' | ')' => ' ',
            other => other,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'ą' => 'a',
        'ć' => 'c',
        'ę' => 'e',
        'ł' => 'l',
        'ń' => 'n',
        'ó' => 'o',
        'ś' => 's',
        'ź' | 'ż' => 'z',
        other => other,
    }
}

/// Splits a camelCase field name into lowercase words.
pub fn field_words(field: &str) -> String {
    let mut words = String::with_capacity(field.len() + 4);
    for (idx, ch) in field.chars().enumerate() {
        if ch.is_uppercase() && idx > 0 {
            words.push(' ');
        }
        words.extend(ch.to_lowercase());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_polish_headers() {
        assert_eq!(normalize_text("  Ilość "), "ilosc");
        assert_eq!(normalize_text("ZDJĘCIA_Główne"), "zdjecia glowne");
        assert_eq!(normalize_text("Cena (PL)"), "cena pl");
    }

    #[test]
    fn splits_camel_case() {
        assert_eq!(field_words("vendorPartNumber"), "vendor part number");
        assert_eq!(field_words("vat"), "vat");
    }
}
