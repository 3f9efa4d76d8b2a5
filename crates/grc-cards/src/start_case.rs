//! Start-case conversion for category display names.
//!
//! `access-control` becomes `Access Control`, `SystemAndCommunicationsProtections`
//! becomes `System And Communications Protections`, and acronyms survive:
//! `NIST-CSF` becomes `NIST CSF`. Accented Latin letters fold to their ASCII
//! base first, so `sécurité-réseau` becomes `Securite Reseau`.

/// Convert a token to start case.
///
/// Words break at any non-alphanumeric character, at lower-to-upper camel
/// boundaries, before the last capital of an acronym run that is followed by
/// a lowercase letter (`XMLHttp` -> `XML Http`), and between letters and
/// digits. An ordinal such as `1st` or `22ND` stays one word. The first
/// character of each word is upper-cased; the rest is kept.
pub fn start_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|word| upper_first(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a token into words, after deburring and dropping apostrophes.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = deburr(input)
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect();

    let mut words = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            i += 1;
            continue;
        }

        if let Some(prev) = current.chars().last() {
            if let Some(len) = ordinal_suffix(&chars, i) {
                current.extend(&chars[i..i + len]);
                words.push(std::mem::take(&mut current));
                i += len;
                continue;
            }
            let next = chars.get(i + 1).copied();
            if is_boundary(prev, c, next) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        i += 1;
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Fold Latin-1 Supplement and Latin Extended-A letters to their ASCII
/// base and drop combining diacritical marks.
///
/// Letters without a single-letter base expand: `ß` -> `ss`, `Æ` -> `Ae`,
/// `Œ` -> `Oe`, `Þ` -> `Th`, `Ĳ` -> `IJ`. Everything else passes through.
pub fn deburr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if is_combining_mark(c) {
            continue;
        }
        match fold_latin(c) {
            Some(base) => out.push_str(base),
            None => out.push(c),
        }
    }
    out
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}' | '\u{fe20}'..='\u{fe2f}' | '\u{20d0}'..='\u{20ff}')
}

fn fold_latin(c: char) -> Option<&'static str> {
    let base = match c {
        // Latin-1 Supplement
        'À'..='Å' => "A",
        'à'..='å' => "a",
        'Ç' => "C",
        'ç' => "c",
        'Ð' => "D",
        'ð' => "d",
        'È'..='Ë' => "E",
        'è'..='ë' => "e",
        'Ì'..='Ï' => "I",
        'ì'..='ï' => "i",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò'..='Ö' | 'Ø' => "O",
        'ò'..='ö' | 'ø' => "o",
        'Ù'..='Ü' => "U",
        'ù'..='ü' => "u",
        'Ý' => "Y",
        'ý' | 'ÿ' => "y",
        'Æ' => "Ae",
        'æ' => "ae",
        'Þ' => "Th",
        'þ' => "th",
        'ß' => "ss",
        // Latin Extended-A
        'Ā' | 'Ă' | 'Ą' => "A",
        'ā' | 'ă' | 'ą' => "a",
        'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ď' | 'Đ' => "D",
        'ď' | 'đ' => "d",
        'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' | 'ĸ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ń' | 'Ņ' | 'Ň' | 'Ŋ' => "N",
        'ń' | 'ņ' | 'ň' | 'ŋ' => "n",
        'ŉ' => "'n",
        'Ō' | 'Ŏ' | 'Ő' => "O",
        'ō' | 'ŏ' | 'ő' => "o",
        'Œ' => "Oe",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ſ' => "s",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ŷ' | 'Ÿ' => "Y",
        'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(base)
}

/// Length of the ordinal suffix starting at `at`, if the digit run before it
/// ends an ordinal.
///
/// The suffix must agree with the last digit (`1st`, `2nd`, `3rd`, `4th`,
/// `10th`) and be all lowercase or all uppercase. A lowercase suffix may be
/// followed by a non-alphanumeric, an uppercase letter or the end. An
/// uppercase suffix may be followed by a non-alphanumeric, a lowercase
/// letter or the end.
fn ordinal_suffix(chars: &[char], at: usize) -> Option<usize> {
    let last_digit = *chars.get(at.checked_sub(1)?)?;
    if !last_digit.is_ascii_digit() {
        return None;
    }
    let expected = match last_digit {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        _ => "th",
    };
    let suffix: String = chars.get(at..at + 2)?.iter().collect();
    let after = chars.get(at + 2).copied();
    let ends = |ok: fn(char) -> bool| after.is_none_or(|c| !c.is_alphanumeric() || ok(c));

    let matched = if suffix == expected {
        ends(char::is_uppercase)
    } else if suffix == expected.to_ascii_uppercase() {
        ends(char::is_lowercase)
    } else {
        false
    };
    matched.then_some(2)
}

fn is_boundary(prev: char, c: char, next: Option<char>) -> bool {
    let camel = prev.is_lowercase() && c.is_uppercase();
    let acronym_end =
        prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase);
    let digit_edge = (prev.is_numeric() && c.is_alphabetic())
        || (prev.is_alphabetic() && c.is_numeric());
    camel || acronym_end || digit_edge
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
