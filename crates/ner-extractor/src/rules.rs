//! Rule-based NER for Spanish
//!
//! Used when the MITIE library is not compiled in. Two sources of
//! candidates:
//! - Dictionary: known places, organizations and their aliases
//! - Capitalization: runs of capitalized words, typed PERSON when the
//!   run starts with a known given name
//!
//! Dictionary hits are resolved first, longest span then highest score.
//! Capitalized runs only cover tokens no dictionary hit has claimed.

use std::collections::{HashMap, HashSet};

use ner_core::{EntityCategory, Result};

use crate::tokenizer::{tokenize, Token};
use crate::{EntityExtractor, RawDetection};

const DICTIONARY_SCORE: f64 = 0.95;
const ALIAS_SCORE: f64 = 0.9;
const GIVEN_NAME_SCORE: f64 = 0.75;
const CAPITALIZED_SCORE: f64 = 0.5;

/// Lowercase words allowed inside a capitalized run ("Banco de España")
const CONNECTORS: &[&str] = &["de", "del", "la", "las", "los", "y", "e"];

/// Capitalized only because they open a sentence
const FUNCTION_WORDS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "en", "de", "del", "y", "por", "para",
    "con", "sin", "a", "al", "que", "se", "su", "sus", "este", "esta", "ese", "esa", "mi", "yo",
    "tu", "nosotros", "ellos", "hoy", "ayer",
];

/// Tokens after which a new sentence begins
const SENTENCE_BREAKS: &[&str] = &[".", "!", "?", "¡", "¿", ":", ";", "\"", "«"];

const GIVEN_NAMES: &[&str] = &[
    "alejandro", "alberto", "ana", "andrés", "antonio", "beatriz", "carlos", "carmen", "cristina",
    "daniel", "david", "diego", "elena", "enrique", "fernando", "florentino", "francisco",
    "gabriel", "isabel", "javier", "jorge", "josé", "juan", "karim", "laura", "lucía", "luis",
    "manuel", "marta", "maría", "miguel", "pablo", "paula", "pedro", "rafael", "raquel", "rosa",
    "santiago", "sergio", "sofía", "teresa",
];

/// Dictionary entry for entity matching
#[derive(Debug, Clone)]
pub struct DictionaryEntry {
    pub term: String,
    pub category: EntityCategory,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone)]
struct Candidate {
    start: usize,
    end: usize,
    category: EntityCategory,
    score: f64,
}

impl Candidate {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Rule-based extractor over a Spanish gazetteer
pub struct RuleBasedExtractor {
    /// Known terms keyed by canonical form
    dictionary: HashMap<String, DictionaryEntry>,
    /// Lowercased, space-joined token sequence -> (canonical key, is alias)
    lookup: HashMap<String, (String, bool)>,
    /// Longest dictionary phrase, in tokens
    max_phrase_len: usize,
    given_names: HashSet<String>,
}

impl RuleBasedExtractor {
    /// Create an extractor with the built-in Spanish dictionary
    pub fn new() -> Self {
        let mut ner = Self::empty();
        ner.init_places();
        ner.init_organizations();
        ner
    }

    /// Create an extractor with no dictionary terms, only given names
    pub fn empty() -> Self {
        Self {
            dictionary: HashMap::new(),
            lookup: HashMap::new(),
            max_phrase_len: 0,
            given_names: GIVEN_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn init_places(&mut self) {
        use EntityCategory::Location;

        for place in [
            "Madrid", "Barcelona", "Sevilla", "Valencia", "Bilbao", "Málaga", "Zaragoza",
            "Granada", "Toledo", "Salamanca", "Murcia", "Cataluña", "Andalucía", "Galicia",
            "Europa", "Francia", "Portugal", "Argentina", "Colombia", "Chile", "Perú", "Bogotá",
            "Lima", "Buenos Aires", "Santiago Bernabéu", "Camp Nou",
        ] {
            self.add_term(place, Location, vec![]);
        }
        self.add_term("España", Location, vec!["Reino de España"]);
        self.add_term("México", Location, vec!["Méjico"]);
        self.add_term("Ciudad de México", Location, vec!["CDMX"]);
        self.add_term("Estados Unidos", Location, vec!["EEUU", "EE.UU"]);
    }

    fn init_organizations(&mut self) {
        use EntityCategory::Organization;

        for org in [
            "Telefónica", "Microsoft", "Microsoft España", "Google", "Apple", "Repsol",
            "Iberdrola", "Inditex", "Mercadona", "BBVA", "Banco Santander", "Banco de España",
            "Real Madrid", "Atlético de Madrid", "Renfe", "Iberia", "RTVE",
        ] {
            self.add_term(org, Organization, vec![]);
        }
        self.add_term("FC Barcelona", Organization, vec!["Barça"]);
        self.add_term(
            "Organización de las Naciones Unidas",
            Organization,
            vec!["Naciones Unidas", "ONU"],
        );
        self.add_term("Unión Europea", Organization, vec!["UE"]);
        self.add_term("Gobierno de España", Organization, vec![]);
    }

    /// Add a dictionary term with aliases
    pub fn add_term(&mut self, term: &str, category: EntityCategory, aliases: Vec<&str>) {
        let entry = DictionaryEntry {
            term: term.to_string(),
            category,
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        };

        self.index_phrase(term, term, false);
        for alias in &entry.aliases {
            self.index_phrase(alias, term, true);
        }

        self.dictionary.insert(term.to_string(), entry);
    }

    /// Register an additional given name
    pub fn add_given_name(&mut self, name: &str) {
        self.given_names.insert(name.to_lowercase());
    }

    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }

    fn index_phrase(&mut self, phrase: &str, key: &str, is_alias: bool) {
        let tokens = tokenize(phrase);
        if tokens.is_empty() {
            return;
        }
        self.max_phrase_len = self.max_phrase_len.max(tokens.len());
        self.lookup
            .insert(phrase_key(&tokens), (key.to_string(), is_alias));
    }

    /// Dictionary matches at every position and length
    fn extract_by_dictionary(&self, tokens: &[Token]) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for start in 0..tokens.len() {
            if !tokens[start].is_capitalized() {
                continue;
            }
            let longest = self.max_phrase_len.min(tokens.len() - start);
            for len in 1..=longest {
                let key = phrase_key(&tokens[start..start + len]);
                let Some((term, is_alias)) = self.lookup.get(&key) else {
                    continue;
                };
                if let Some(entry) = self.dictionary.get(term) {
                    candidates.push(Candidate {
                        start,
                        end: start + len,
                        category: entry.category,
                        score: if *is_alias { ALIAS_SCORE } else { DICTIONARY_SCORE },
                    });
                }
            }
        }

        candidates
    }

    /// Runs of capitalized words, joined by lowercase connectors.
    ///
    /// Tokens in `covered` end a run.
    fn extract_by_capitalization(
        &self,
        text: &str,
        tokens: &[Token],
        covered: &HashSet<usize>,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let free = |idx: usize| !covered.contains(&idx) && tokens[idx].is_capitalized();
        let mut i = 0;

        while i < tokens.len() {
            if !free(i) {
                i += 1;
                continue;
            }

            let mut start = i;
            let mut end = i + 1;
            loop {
                if end < tokens.len() && free(end) && !is_line_start(text, tokens, end) {
                    end += 1;
                } else if end + 1 < tokens.len()
                    && is_connector(&tokens[end])
                    && free(end + 1)
                    && !is_line_start(text, tokens, end)
                    && !is_line_start(text, tokens, end + 1)
                {
                    end += 2;
                } else {
                    break;
                }
            }
            i = end;

            let mut sentence_initial = is_sentence_start(text, tokens, start);
            if sentence_initial && is_function_word(&tokens[start]) {
                start += 1;
                sentence_initial = false;
                if start >= end {
                    continue;
                }
            }

            let first = tokens[start].text.to_lowercase();
            if self.given_names.contains(&first) {
                candidates.push(Candidate {
                    start,
                    end,
                    category: EntityCategory::Person,
                    score: GIVEN_NAME_SCORE,
                });
            } else if !sentence_initial {
                candidates.push(Candidate {
                    start,
                    end,
                    category: EntityCategory::Misc,
                    score: CAPITALIZED_SCORE,
                });
            }
        }

        candidates
    }

    /// Keep non-overlapping candidates, longest then highest score first
    fn resolve(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then(b.score.total_cmp(&a.score))
                .then(a.start.cmp(&b.start))
        });

        let mut result = Vec::new();
        let mut covered: HashSet<usize> = HashSet::new();

        for candidate in candidates {
            let overlaps = (candidate.start..candidate.end).any(|i| covered.contains(&i));

            if !overlaps {
                covered.extend(candidate.start..candidate.end);
                result.push(candidate);
            }
        }

        result.sort_by_key(|c| c.start);
        result
    }
}

impl Default for RuleBasedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor for RuleBasedExtractor {
    fn extract(&self, text: &str) -> Result<Vec<RawDetection>> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut accepted = self.resolve(self.extract_by_dictionary(&tokens));
        let covered: HashSet<usize> = accepted.iter().flat_map(|c| c.start..c.end).collect();
        accepted.extend(self.extract_by_capitalization(text, &tokens, &covered));
        accepted.sort_by_key(|c| c.start);

        let detections = accepted
            .into_iter()
            .map(|c| RawDetection {
                code: c.category.code(),
                tag_name: Some(c.category.as_str().to_string()),
                score: c.score,
                tokens: tokens[c.start..c.end]
                    .iter()
                    .map(|t| t.text.clone())
                    .collect(),
            })
            .collect();

        Ok(detections)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

fn phrase_key(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_connector(token: &Token) -> bool {
    CONNECTORS.contains(&token.text.as_str())
}

fn is_function_word(token: &Token) -> bool {
    FUNCTION_WORDS.contains(&token.text.to_lowercase().as_str())
}

fn is_sentence_start(text: &str, tokens: &[Token], idx: usize) -> bool {
    idx == 0
        || SENTENCE_BREAKS.contains(&tokens[idx - 1].text.as_str())
        || is_line_start(text, tokens, idx)
}

/// A line break separates the token from the one before it
fn is_line_start(text: &str, tokens: &[Token], idx: usize) -> bool {
    idx > 0
        && text
            .get(tokens[idx - 1].end..tokens[idx].start)
            .is_some_and(|gap| gap.contains('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SPANISH_TEST_TEXTS;

    fn extract(text: &str) -> Vec<(String, EntityCategory)> {
        RuleBasedExtractor::new()
            .extract(text)
            .unwrap()
            .into_iter()
            .map(|d| (d.label(), EntityCategory::from_code(d.code)))
            .collect()
    }

    #[test]
    fn test_person_and_location() {
        let entities = extract(SPANISH_TEST_TEXTS.person_location);
        assert_eq!(
            entities,
            vec![
                ("María García".to_string(), EntityCategory::Person),
                ("Madrid".to_string(), EntityCategory::Location),
            ]
        );
    }

    #[test]
    fn test_longest_dictionary_match_wins() {
        let entities = extract(SPANISH_TEST_TEXTS.organization);
        assert_eq!(
            entities,
            vec![("Microsoft España".to_string(), EntityCategory::Organization)]
        );
    }

    #[test]
    fn test_mixed_sentence() {
        let entities = extract(SPANISH_TEST_TEXTS.mixed);
        assert!(entities.contains(&("Pedro Sánchez".to_string(), EntityCategory::Person)));
        assert!(entities.contains(&("Barcelona".to_string(), EntityCategory::Location)));
        assert!(entities.contains(&("Telefónica".to_string(), EntityCategory::Organization)));
    }

    #[test]
    fn test_complex_sentence() {
        let entities = extract(SPANISH_TEST_TEXTS.complex);

        assert!(entities.contains(&("Real Madrid".to_string(), EntityCategory::Organization)));
        assert!(entities.contains(&("Florentino Pérez".to_string(), EntityCategory::Person)));
        assert!(entities.contains(&("Karim Benzema".to_string(), EntityCategory::Person)));
        assert!(entities.contains(&(
            "Santiago Bernabéu".to_string(),
            EntityCategory::Location
        )));
        assert!(!entities.iter().any(|(label, _)| label == "El"));
    }

    #[test]
    fn test_no_entities() {
        assert!(extract(SPANISH_TEST_TEXTS.no_entities).is_empty());
        assert!(extract(SPANISH_TEST_TEXTS.empty).is_empty());
    }

    #[test]
    fn test_connectors_inside_names() {
        let entities = extract("Trabaja para el Banco de España desde 2010");
        assert_eq!(
            entities,
            vec![("Banco de España".to_string(), EntityCategory::Organization)]
        );
    }

    #[test]
    fn test_alias_scores_lower() {
        let ner = RuleBasedExtractor::new();
        let detections = ner.extract("Habló ante la ONU").unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].score, ALIAS_SCORE);
        assert_eq!(detections[0].code, EntityCategory::Organization.code());
    }

    #[test]
    fn test_unknown_capitalized_run_is_misc() {
        let entities = extract("Vimos la película Mar Adentro ayer");
        assert_eq!(
            entities,
            vec![("Mar Adentro".to_string(), EntityCategory::Misc)]
        );
    }

    #[test]
    fn test_sentence_initial_unknown_word_skipped() {
        let entities = extract("Trabajo mucho. Mañana descanso");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_connector_does_not_merge_known_terms() {
        let entities = extract("Viajé a Madrid y Barcelona con Telefónica y Repsol");
        assert_eq!(
            entities,
            vec![
                ("Madrid".to_string(), EntityCategory::Location),
                ("Barcelona".to_string(), EntityCategory::Location),
                ("Telefónica".to_string(), EntityCategory::Organization),
                ("Repsol".to_string(), EntityCategory::Organization),
            ]
        );
    }

    #[test]
    fn test_dictionary_hit_splits_capitalized_run() {
        let entities = extract("Llegó con Mercadona Online ayer");
        assert_eq!(
            entities,
            vec![
                ("Mercadona".to_string(), EntityCategory::Organization),
                ("Online".to_string(), EntityCategory::Misc),
            ]
        );
    }

    #[test]
    fn test_line_break_starts_sentence() {
        assert!(extract("Resumen de noticias\nHoy llueve mucho").is_empty());
        assert!(extract("Resumen de noticias\r\nMañana sale el sol").is_empty());

        let entities = extract("Viaje a Galicia\nTeresa Gómez conduce");
        assert_eq!(
            entities,
            vec![
                ("Galicia".to_string(), EntityCategory::Location),
                ("Teresa Gómez".to_string(), EntityCategory::Person),
            ]
        );
    }

    #[test]
    fn test_custom_terms() {
        let mut ner = RuleBasedExtractor::empty();
        assert_eq!(ner.term_count(), 0);

        ner.add_term("Universidad de Salamanca", EntityCategory::Organization, vec!["USAL"]);
        ner.add_given_name("Ximena");

        let detections = ner
            .extract("Ximena Ruiz estudia en la Universidad de Salamanca")
            .unwrap();
        let labels: Vec<String> = detections.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["Ximena Ruiz", "Universidad de Salamanca"]);
        assert_eq!(detections[0].code, EntityCategory::Person.code());
        assert_eq!(detections[1].score, DICTIONARY_SCORE);
    }
}
