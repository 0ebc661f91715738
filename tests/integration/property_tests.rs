/*!
 * Randomized tests over generated Toolbox documents.
 *
 * Documents mix tier lines, blank lines and free lines; words mix ASCII,
 * combining diacritics and wide characters. Every run is seeded so a
 * failure can be replayed.
 */

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use glossalign::gloss::{RecordScanner, Tokenizer, WidthTable};
use glossalign::{realign, Config};

const SEEDS: u64 = 64;
const BASES: &[char] = &['a', 'e', 'k', 'n', 'o', 's', 't', '-', '.', 'ŋ', 'ə'];
const MARKS: &[char] = &['\u{300}', '\u{301}', '\u{303}', '\u{308}', '\u{331}'];
const WIDE: &[char] = &['日', '本', '語', '한', '국'];

fn random_word(rng: &mut StdRng) -> String {
    let mut word = String::new();
    for _ in 0..rng.random_range(1..6) {
        if rng.random_bool(0.15) {
            word.push(WIDE[rng.random_range(0..WIDE.len())]);
            continue;
        }
        word.push(BASES[rng.random_range(0..BASES.len())]);
        for _ in 0..rng.random_range(0..3) {
            if rng.random_bool(0.4) {
                word.push(MARKS[rng.random_range(0..MARKS.len())]);
            }
        }
    }
    word
}

fn random_tier(rng: &mut StdRng, marker: &str, delimiter: &str) -> String {
    let mut line = marker.to_string();
    let words = rng.random_range(0..7);
    if words == 0 {
        return line;
    }
    line.push_str(delimiter);
    for i in 0..words {
        let min_gap = if i == 0 { 0 } else { 1 };
        line.push_str(&" ".repeat(rng.random_range(min_gap..4)));
        line.push_str(&random_word(rng));
    }
    line
}

fn random_document(rng: &mut StdRng, config: &Config) -> String {
    let markers = &config.tiers.markers;
    let mut lines = Vec::new();
    for record in 0..rng.random_range(1..6) {
        lines.push(format!("\\ref {:03}", record + 1));
        for marker in markers {
            if rng.random_bool(0.85) {
                lines.push(random_tier(rng, marker, &config.tiers.marker_delimiter));
            }
        }
        if rng.random_bool(0.5) {
            lines.push(format!("\\f  {}", random_word(rng)));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Default dialect plus dialects with a punctuation delimiter
fn dialects() -> Vec<Config> {
    let mut colon = Config::default();
    colon.tiers.marker_delimiter = ":".to_string();

    let mut colon_space = Config::default();
    colon_space.tiers.markers = ["\\tx", "\\m", "\\gloss"].iter().map(|m| m.to_string()).collect();
    colon_space.tiers.marker_delimiter = ": ".to_string();

    vec![Config::default(), colon, colon_space]
}

/// Display column at which each field of a tier line starts
fn field_starts(line: &str, marker: &str, delimiter: &str, widths: &WidthTable) -> Vec<usize> {
    let prefix = format!("{}{}", marker, delimiter);
    let Some(content) = line.strip_prefix(&prefix) else {
        return Vec::new();
    };

    let mut starts = Vec::new();
    let mut column = widths.str_width(&prefix);
    let mut in_word = false;
    for c in content.chars() {
        if c == ' ' || c == '\t' {
            in_word = false;
            column += 1;
            continue;
        }
        if !in_word {
            starts.push(column);
            in_word = true;
        }
        column += widths.width(c);
    }
    starts
}

fn without_padding(line: &str) -> String {
    line.chars().filter(|c| *c != ' ' && *c != '\t').collect()
}

#[test]
fn test_realign_withRandomDocuments_shouldBeIdempotent() -> Result<()> {
    for config in dialects() {
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let input = random_document(&mut rng, &config);

            let once = realign(&input, &config)?;
            let twice = realign(&once, &config)?;

            assert_eq!(once, twice, "seed {}, delimiter {:?}", seed, config.tiers.marker_delimiter);
        }
    }
    Ok(())
}

#[test]
fn test_realign_withRandomDocuments_shouldAlignEveryColumn() -> Result<()> {
    for config in dialects() {
        let widths = config.width_table();
        let delimiter = &config.tiers.marker_delimiter;
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let output = realign(&random_document(&mut rng, &config), &config)?;
            let document = RecordScanner::new(&config.tiers, &widths).scan(&output)?;

            for record in document.records() {
                let starts: Vec<Vec<usize>> = record
                    .tiers
                    .iter()
                    .map(|t| field_starts(&t.raw, &t.marker, delimiter, &widths))
                    .collect();
                for slot in 0..record.column_count() {
                    let mut columns = starts.iter().filter_map(|s| s.get(slot));
                    if let Some(first) = columns.next() {
                        assert!(
                            columns.all(|c| c == first),
                            "seed {}, delimiter {:?}, slot {}: {:?}",
                            seed, delimiter, slot, starts
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_realign_withRandomDocuments_shouldOnlyChangePadding() -> Result<()> {
    for config in dialects() {
        let widths = config.width_table();
        let tokenizer = Tokenizer::new(&config.tiers.markers, &config.tiers.marker_delimiter, &widths);
        for seed in 0..SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let input = random_document(&mut rng, &config);
            let output = realign(&input, &config)?;

            let input_lines: Vec<&str> = input.split('\n').collect();
            let output_lines: Vec<&str> = output.split('\n').collect();
            assert_eq!(input_lines.len(), output_lines.len(), "seed {}", seed);

            for (before, after) in input_lines.iter().zip(&output_lines) {
                if tokenizer.match_marker(before).is_some() {
                    assert_eq!(without_padding(before), without_padding(after), "seed {}", seed);
                    assert!(!after.ends_with(' '), "seed {}: trailing padding in {:?}", seed, after);
                } else {
                    assert_eq!(before, after, "seed {}", seed);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_realign_withStackedCombiningMarks_shouldCountBaseOnly() -> Result<()> {
    let config = Config::default();
    for marks in 0..8 {
        let word: String = std::iter::once('a').chain(std::iter::repeat_n('\u{301}', marks)).collect();
        let input = format!("\\t {} x\n\\gl b y", word);

        let output = realign(&input, &config)?;

        assert_eq!(output, format!("\\t  {} x\n\\gl b y", word), "{} marks", marks);
    }
    Ok(())
}
