// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::column::ColumnSet;
use crate::locale::Locale;
use crate::sort::{SortDescriptor, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum CharClass {
    Separator,
    Digit,
    NativeLetter,
    ForeignLetter,
}

/// Primary collation key: case, diacritics and letter variants are folded
/// away so that only base letters decide the order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey(Vec<(CharClass, char)>);

/// Case-insensitive string comparison for the active locale. Letters of the
/// locale's own script order before letters of other scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collator {
    locale: Locale,
}

impl Collator {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        self.sort_key(left).cmp(&self.sort_key(right))
    }

    pub fn sort_key(&self, value: &str) -> SortKey {
        let mut key = Vec::with_capacity(value.len());
        for ch in value.chars() {
            if is_ignorable(ch) {
                continue;
            }
            for folded in fold_variant(ch).to_lowercase() {
                if is_ignorable(folded) {
                    continue;
                }
                let folded = fold_latin_accent(folded);
                key.push((self.class_of(folded), folded));
            }
        }
        SortKey(key)
    }

    fn class_of(&self, ch: char) -> CharClass {
        if ch.is_numeric() {
            return CharClass::Digit;
        }
        if !ch.is_alphabetic() {
            return CharClass::Separator;
        }
        let native = match self.locale {
            Locale::En => is_latin(ch),
            Locale::Ar => is_arabic(ch),
        };
        if native {
            CharClass::NativeLetter
        } else {
            CharClass::ForeignLetter
        }
    }
}

/// Row positions in display order for `descriptor`. Unsorted descriptors and
/// descriptors naming an unknown column keep the input order. Rows whose value
/// is empty go last in either direction; ties keep their input order.
pub fn sort_order<T>(
    rows: &[T],
    columns: &ColumnSet<T>,
    descriptor: &SortDescriptor,
    locale: Locale,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some((column_id, direction)) = descriptor.active() else {
        return order;
    };
    let Some(column) = columns.get(column_id.as_str()) else {
        return order;
    };

    let collator = Collator::new(locale);
    let keys: Vec<Option<SortKey>> = rows
        .iter()
        .map(|row| {
            let value = column.value(row);
            (!value.is_empty()).then(|| collator.sort_key(&value.display()))
        })
        .collect();

    order.sort_by(|&left, &right| match (&keys[left], &keys[right]) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match direction {
            SortDirection::Asc => left.cmp(right),
            SortDirection::Desc => left.cmp(right).reverse(),
        },
    });
    order
}

/// Borrowed rows in display order for `descriptor`.
pub fn sorted_rows<'a, T>(
    rows: &'a [T],
    columns: &ColumnSet<T>,
    descriptor: &SortDescriptor,
    locale: Locale,
) -> Vec<&'a T> {
    sort_order(rows, columns, descriptor, locale)
        .into_iter()
        .map(|index| &rows[index])
        .collect()
}

fn is_ignorable(ch: char) -> bool {
    matches!(
        ch,
        // Arabic harakat, superscript alef and tatweel
        '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}'
        // combining diacritical marks
        | '\u{0300}'..='\u{036F}'
        // zero-width joiners and direction marks
        | '\u{200B}'..='\u{200F}'
    )
}

fn fold_variant(ch: char) -> char {
    match ch {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        'ة' => 'ه',
        'ى' | 'ئ' => 'ي',
        'ؤ' => 'و',
        '٠'..='٩' => digit_from(ch, '٠'),
        '۰'..='۹' => digit_from(ch, '۰'),
        other => other,
    }
}

fn digit_from(ch: char, zero: char) -> char {
    let offset = u32::from(ch) - u32::from(zero);
    char::from_digit(offset, 10).unwrap_or(ch)
}

fn fold_latin_accent(ch: char) -> char {
    match ch {
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        // Latin Extended-A, already lowercased
        '\u{0100}'..='\u{0105}' => 'a',
        '\u{0106}'..='\u{010D}' => 'c',
        '\u{010E}'..='\u{0111}' => 'd',
        '\u{0112}'..='\u{011B}' => 'e',
        '\u{011C}'..='\u{0123}' => 'g',
        '\u{0124}'..='\u{0127}' => 'h',
        '\u{0128}'..='\u{0131}' => 'i',
        '\u{0134}'..='\u{0135}' => 'j',
        '\u{0136}'..='\u{0138}' => 'k',
        '\u{0139}'..='\u{0142}' => 'l',
        '\u{0143}'..='\u{0149}' => 'n',
        '\u{014C}'..='\u{0151}' => 'o',
        '\u{0154}'..='\u{0159}' => 'r',
        '\u{015A}'..='\u{0161}' | '\u{017F}' => 's',
        '\u{0162}'..='\u{0167}' => 't',
        '\u{0168}'..='\u{0173}' => 'u',
        '\u{0174}'..='\u{0175}' => 'w',
        '\u{0176}'..='\u{0178}' => 'y',
        '\u{0179}'..='\u{017E}' => 'z',
        other => other,
    }
}

fn is_latin(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '\u{00C0}'..='\u{024F}')
}

fn is_arabic(ch: char) -> bool {
    matches!(
        ch,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}
