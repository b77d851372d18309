//! Noun lemmatization.
//!
//! Mirrors the morphological rules of a dictionary lemmatizer running with the
//! noun part of speech, without shipping the dictionary: irregular plurals and
//! words that merely look plural are listed explicitly, everything else goes
//! through suffix detachment.
//!
//! The output is always a fixed point, i.e. `lemmatize(lemmatize(w)) == lemmatize(w)`.

use std::borrow::Cow;

use fxhash::{FxHashMap, FxHashSet};
use once_cell::sync::Lazy;

/// Detachment rules, tried in order. The first candidate that is long enough
/// wins.
const DETACH_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("s", ""),
];

/// Endings that are never plural markers.
const KEEP_SUFFIXES: &[&str] = &["ss", "us", "is"];

const IRREGULAR: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("wolves", "wolf"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("thieves", "thief"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("selves", "self"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("elves", "elf"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("policemen", "policeman"),
    ("firemen", "fireman"),
    ("fishermen", "fisherman"),
    ("gentlemen", "gentleman"),
    ("businessmen", "businessman"),
    ("henchmen", "henchman"),
    ("cavemen", "caveman"),
    ("spacemen", "spaceman"),
    ("snowmen", "snowman"),
    ("buses", "bus"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("geniuses", "genius"),
    ("octopuses", "octopus"),
    ("circuses", "circus"),
    ("statuses", "status"),
    ("crises", "crisis"),
    ("analyses", "analysis"),
    ("oases", "oasis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("movies", "movie"),
    ("zombies", "zombie"),
    ("cookies", "cookie"),
    ("rookies", "rookie"),
    ("hippies", "hippie"),
    ("calories", "calorie"),
    ("prairies", "prairie"),
    ("goalies", "goalie"),
    ("brownies", "brownie"),
    ("selfies", "selfie"),
    ("genies", "genie"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("niches", "niche"),
    ("avalanches", "avalanche"),
    ("moustaches", "moustache"),
    ("mustaches", "mustache"),
    ("caches", "cache"),
    ("psyches", "psyche"),
    ("cliches", "cliche"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("torpedoes", "torpedo"),
    ("volcanoes", "volcano"),
    ("mosquitoes", "mosquito"),
];

const INVARIANT: &[&str] = &[
    "series", "species", "news", "means", "lens", "chaos", "bias", "atlas", "canvas", "alias",
    "christmas", "texas", "vegas", "mars", "james", "charles", "jones", "thomas", "douglas",
    "nicholas", "lucas", "always", "perhaps", "goes", "sometimes", "whereas", "towards",
    "afterwards", "besides", "unless", "physics", "mathematics", "politics", "economics",
    "ethics", "athletics", "gymnastics", "pants", "scissors", "clothes", "headquarters",
];

static IRREGULAR_MAP: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR.iter().copied().collect());

static INVARIANT_SET: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| INVARIANT.iter().copied().collect());

// A detached form can itself be an irregular plural ("feets" -> "feet" -> "foot").
const MAX_PASSES: usize = 3;

/// Rule-based noun lemmatizer for lowercase ASCII words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lemmatizer {
    min_len: usize,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Lemmatizer {
    /// `min_len` bounds how short a detached form may become; shorter
    /// candidates are rejected and the word is kept.
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    /// Returns the base form of `word`, borrowing when nothing changes.
    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        let mut current: Cow<'a, str> = Cow::Borrowed(word);
        for _ in 0..MAX_PASSES {
            match self.step(&current) {
                Some(next) if next != current.as_ref() => current = Cow::Owned(next),
                _ => break,
            }
        }
        current
    }

    fn step(&self, word: &str) -> Option<String> {
        if INVARIANT_SET.contains(word) {
            return None;
        }
        if let Some(base) = IRREGULAR_MAP.get(word) {
            return Some((*base).to_string());
        }
        if KEEP_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
            return None;
        }

        DETACH_RULES.iter().find_map(|(suffix, replacement)| {
            let stem = word.strip_suffix(suffix)?;
            let candidate_len = stem.len() + replacement.len();
            (candidate_len >= self.min_len).then(|| format!("{stem}{replacement}"))
        })
    }
}
