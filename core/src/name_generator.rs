//! Deterministic horse name and silk colour generation.
//!
//! Names come from a curated list and are handed out in order, so a
//! roster never repeats a name. Rosters larger than the list reuse the
//! list with a generation suffix ("Thunder Bolt II").

use crate::rng::StreamRng;

pub struct NameGenerator;

impl NameGenerator {
    /// Name for the `index`-th competitor of a roster. Distinct for
    /// every distinct index.
    pub fn horse_name(index: usize) -> String {
        let names = Self::horse_names();
        let base = names[index % names.len()];
        match index / names.len() {
            0 => base.to_string(),
            generation => format!("{base} {}", roman(generation as u32 + 1)),
        }
    }

    /// Random `#RRGGBB` colour with uppercase hex digits.
    pub fn silk_color(rng: &mut StreamRng) -> String {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            color.push(DIGITS[rng.index_below(DIGITS.len())] as char);
        }
        color
    }

    /// True when `color` is `#` followed by exactly six hex digits.
    pub fn is_valid_color(color: &str) -> bool {
        color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    fn horse_names() -> &'static [&'static str] {
        &[
            "Thunder Bolt", "Silver Storm", "Midnight Star", "Golden Arrow",
            "Wild Spirit", "Royal Flash", "Swift Wind", "Dark Knight",
            "Lucky Charm", "Blazing Sun", "Mountain Echo", "Desert Rose",
            "Northern Light", "Ocean Breeze", "Victory Lane", "Shadow Runner",
            "Phoenix Fire", "Diamond Dust", "Storm Chaser", "Mystic Dream",
        ]
    }
}

fn roman(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"), (900, "CM"), (500, "D"), (400, "CD"),
        (100, "C"), (90, "XC"), (50, "L"), (40, "XL"),
        (10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I"),
    ];
    let mut out = String::new();
    for (value, glyph) in TABLE {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};
    use std::collections::HashSet;

    #[test]
    fn first_twenty_names_are_the_classic_roster() {
        assert_eq!(NameGenerator::horse_name(0), "Thunder Bolt");
        assert_eq!(NameGenerator::horse_name(19), "Mystic Dream");
    }

    #[test]
    fn names_stay_distinct_past_the_list() {
        let names: HashSet<String> = (0..200).map(NameGenerator::horse_name).collect();
        assert_eq!(names.len(), 200, "Every index should yield a unique name");
        assert_eq!(NameGenerator::horse_name(20), "Thunder Bolt II");
        assert_eq!(NameGenerator::horse_name(41), "Silver Storm III");
        assert_eq!(NameGenerator::horse_name(60 + 3), "Golden Arrow IV");
    }

    #[test]
    fn colors_are_valid_hex() {
        let mut rng = RngBank::new(12345).for_stream(StreamSlot::Roster);
        for _ in 0..100 {
            let color = NameGenerator::silk_color(&mut rng);
            assert!(NameGenerator::is_valid_color(&color), "Bad colour: {color}");
        }
        assert!(!NameGenerator::is_valid_color("#12345"));
        assert!(!NameGenerator::is_valid_color("123456A"));
        assert!(!NameGenerator::is_valid_color("#GG0000"));
    }

    #[test]
    fn color_generation_is_deterministic() {
        let mut a = RngBank::new(1).for_stream(StreamSlot::Roster);
        let mut b = RngBank::new(1).for_stream(StreamSlot::Roster);
        assert_eq!(
            NameGenerator::silk_color(&mut a),
            NameGenerator::silk_color(&mut b),
            "Same seed should produce same colour"
        );
    }
}
