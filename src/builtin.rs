use std::collections::HashMap;

use crate::layout::{AltGrid, HandSplit, KeyGrid, KeyboardLayout};

/// Built-in `(language, code, layout)` entries.
pub fn layouts() -> Vec<(&'static str, &'static str, KeyboardLayout)> {
    vec![
        ("english", "en", english()),
        ("german", "de", german()),
        ("polish", "pl", polish()),
    ]
}

fn grid(rows: &[&str]) -> KeyGrid {
    KeyGrid::from_rows_unchecked(rows)
}

pub fn english() -> KeyboardLayout {
    KeyboardLayout::new(grid(&["qwertyuiop", "asdfghjkl", "zxcvbnm"]))
        .with_hands(HandSplit::new(
            "qwertasdfgzxcvb".chars(),
            "yuiophjklnm".chars(),
        ))
        .with_ignore_set(
            [
                "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
                "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
                "seventeen", "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty",
                "sixty", "seventy", "eighty", "ninety", "hundred", "thousand", "million",
                "billion",
            ]
            .into_iter()
            .chain(DIGITS),
        )
}

pub fn german() -> KeyboardLayout {
    KeyboardLayout::new(grid(&["qwertzuiopü", "asdfghjklöä", "yxcvbnm"]))
        .with_hands(HandSplit::new(
            "qwertasdfgyxcvb".chars(),
            "zuiopühjklöänm".chars(),
        ))
        .with_ignore_set(
            [
                "null", "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht",
                "neun", "zehn", "elf", "zwölf", "zwanzig", "dreißig", "vierzig", "fünfzig",
                "sechzig", "siebzig", "achtzig", "neunzig", "hundert", "tausend", "million",
                "milliarde",
            ]
            .into_iter()
            .chain(DIGITS),
        )
}

/// Polish programmers' QWERTY; diacritics sit on the AltGr layer.
pub fn polish() -> KeyboardLayout {
    let base: HashMap<char, char> = [
        ('ą', 'a'),
        ('ę', 'e'),
        ('ś', 's'),
        ('ć', 'c'),
        ('ż', 'z'),
        ('ź', 'x'),
        ('ł', 'l'),
        ('ó', 'o'),
        ('ń', 'n'),
    ]
    .into_iter()
    .collect();

    KeyboardLayout::new(grid(&["qwertyuiop", "asdfghjkl", "zxcvbnm"]))
        .with_alt_grid(AltGrid {
            grid: grid(&["qwęrtyuióp", "ąśdfghjkł", "żźćvbńm"]),
            base,
        })
        .with_hands(HandSplit::new(
            "qwertasdfgzxcvbęąśćżź".chars(),
            "yuiophjklnmółń".chars(),
        ))
        .with_ignore_set(
            [
                "zero", "jeden", "jedna", "jedno", "dwa", "dwie", "trzy", "cztery", "pięć",
                "sześć", "siedem", "osiem", "dziewięć", "dziesięć", "jedenaście", "dwanaście",
                "trzynaście", "czternaście", "piętnaście", "szesnaście", "siedemnaście",
                "osiemnaście", "dziewiętnaście", "dwadzieścia", "trzydzieści", "czterdzieści",
                "pięćdziesiąt", "sześćdziesiąt", "siedemdziesiąt", "osiemdziesiąt",
                "dziewięćdziesiąt", "sto", "dwieście", "tysiąc", "milion", "miliard",
            ]
            .into_iter()
            .chain(DIGITS),
        )
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
