//! Mapping suggestions for unfamiliar vendor exports.
//!
//! Scores every (source column, target field) pair and assigns greedily,
//! one column per field and one field per column. Exact names win outright,
//! then known vendor header synonyms, then Jaro-Winkler similarity of the
//! normalized names.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use morele_model::{FieldMapping, ManualOverrides, MappingConfig, TARGET_SCHEMA};

use crate::utils::{field_words, normalize_text};

/// Default minimum confidence for a suggestion to be kept.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.80;

const EXACT_SCORE: f32 = 1.0;
const NORMALIZED_SCORE: f32 = 0.98;
const SYNONYM_SCORE: f32 = 0.95;
/// Fuzzy matches never outrank a synonym hit.
const FUZZY_CEILING: f32 = 0.90;

/// How a suggestion was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Fuzzy,
    Synonym,
    Normalized,
    Exact,
}

impl MatchKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "name",
            Self::Synonym => "synonym",
            Self::Fuzzy => "fuzzy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingSuggestion {
    pub target_field: &'static str,
    pub source_column: String,
    pub confidence: f32,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionResult {
    /// Accepted suggestions in schema order.
    pub suggestions: Vec<MappingSuggestion>,
    /// Source columns no field claimed.
    pub unmapped_columns: Vec<String>,
    /// Target fields without a suggestion, in schema order.
    pub unmatched_fields: Vec<&'static str>,
}

impl SuggestionResult {
    pub fn to_mapping(&self) -> FieldMapping {
        self.suggestions
            .iter()
            .map(|s| (s.target_field, s.source_column.as_str()))
            .collect()
    }

    /// An explicit configuration holding the suggested mapping.
    pub fn to_config(&self) -> MappingConfig {
        MappingConfig::explicit(self.to_mapping(), ManualOverrides::new())
    }

    pub fn suggestion_for(&self, field: &str) -> Option<&MappingSuggestion> {
        self.suggestions.iter().find(|s| s.target_field == field)
    }
}

/// Header spellings seen in Polish vendor exports.
fn default_synonyms() -> BTreeMap<&'static str, Vec<&'static str>> {
    BTreeMap::from([
        (
            "vendorPartNumber",
            vec!["id oferty", "sku", "kod produktu", "indeks", "symbol", "kod"],
        ),
        (
            "salePriceBrutto",
            vec!["cena pl", "cena brutto", "cena", "price", "cena sprzedazy"],
        ),
        ("currency", vec!["waluta"]),
        (
            "vendorProductName",
            vec!["nazwa", "nazwa produktu", "tytul oferty", "name"],
        ),
        ("barcodes", vec!["ean", "kod ean", "gtin", "kod kreskowy"]),
        ("availability", vec!["dostepnosc"]),
        ("quantity", vec!["ilosc", "stan", "stan magazynowy", "qty"]),
        ("vendorBrandName", vec!["marka", "producent", "brand"]),
        ("brandCode", vec!["kod marki", "kod producenta"]),
        ("vat", vec!["stawka vat", "podatek"]),
        ("images", vec!["zdjecia", "zdjecie", "obrazy", "image url"]),
        ("vendorDescription", vec!["opis", "opis produktu", "description"]),
        ("warranty", vec!["gwarancja", "okres gwarancji"]),
        ("vendorCharacteristic", vec!["parametry", "cechy", "specyfikacja"]),
        ("vendorCategoryName", vec!["kategoria", "category"]),
        ("deliveryDays", vec!["czas wysylki", "czas dostawy"]),
        ("deliveryPrice", vec!["koszt wysylki", "koszt dostawy"]),
        ("productPromotionActive", vec!["promocja"]),
        ("productPromotionCampaignName", vec!["nazwa promocji", "kampania"]),
        ("productPromotionPrice", vec!["cena promocyjna"]),
    ])
}

struct Candidate {
    column: String,
    field: &'static str,
    confidence: f32,
    kind: MatchKind,
}

pub struct MappingEngine {
    min_confidence: f32,
    synonyms: BTreeMap<&'static str, Vec<String>>,
}

impl Default for MappingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl MappingEngine {
    pub fn new(min_confidence: f32) -> Self {
        let synonyms = default_synonyms()
            .into_iter()
            .map(|(field, aliases)| {
                (
                    field,
                    aliases.into_iter().map(normalize_text).collect::<Vec<_>>(),
                )
            })
            .collect();
        Self {
            min_confidence,
            synonyms,
        }
    }

    /// Adds a header spelling for a target field. Unknown fields are ignored.
    #[must_use]
    pub fn with_synonym(mut self, field: &str, alias: &str) -> Self {
        if let Some(target) = TARGET_SCHEMA.iter().find(|f| **f == field) {
            self.synonyms
                .entry(*target)
                .or_default()
                .push(normalize_text(alias));
        }
        self
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Score for mapping `column` onto `field`, with how it was found.
    pub fn score(&self, column: &str, field: &str) -> (f32, MatchKind) {
        if column.trim() == field {
            return (EXACT_SCORE, MatchKind::Exact);
        }
        let normalized = normalize_text(column);
        let words = field_words(field);
        if normalized == words || normalized.replace(' ', "") == field.to_lowercase() {
            return (NORMALIZED_SCORE, MatchKind::Normalized);
        }
        let aliases = self.synonyms.get(field).map(Vec::as_slice).unwrap_or(&[]);
        if aliases.contains(&normalized) {
            return (SYNONYM_SCORE, MatchKind::Synonym);
        }
        let mut best = jaro_similarity(normalized.chars(), words.chars());
        for alias in aliases {
            best = best.max(jaro_similarity(normalized.chars(), alias.chars()));
        }
        ((best as f32) * FUZZY_CEILING, MatchKind::Fuzzy)
    }

    pub fn suggest(&self, columns: &[String]) -> SuggestionResult {
        let mut candidates = Vec::new();
        for column in columns {
            for field in TARGET_SCHEMA {
                let (confidence, kind) = self.score(column, field);
                if confidence >= self.min_confidence {
                    candidates.push(Candidate {
                        column: column.clone(),
                        field,
                        confidence,
                        kind,
                    });
                }
            }
        }

        // Highest confidence first; ties resolved by schema order, then column order.
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| schema_rank(a.field).cmp(&schema_rank(b.field)))
                .then_with(|| column_rank(columns, &a.column).cmp(&column_rank(columns, &b.column)))
        });

        let mut assigned_fields = BTreeSet::new();
        let mut assigned_columns = BTreeSet::new();
        let mut suggestions = Vec::new();
        for candidate in candidates {
            if assigned_fields.contains(candidate.field)
                || assigned_columns.contains(&candidate.column)
            {
                continue;
            }
            assigned_fields.insert(candidate.field);
            assigned_columns.insert(candidate.column.clone());
            suggestions.push(MappingSuggestion {
                target_field: candidate.field,
                source_column: candidate.column,
                confidence: candidate.confidence,
                kind: candidate.kind,
            });
        }
        suggestions.sort_by_key(|s| schema_rank(s.target_field));

        SuggestionResult {
            suggestions,
            unmapped_columns: columns
                .iter()
                .filter(|column| !assigned_columns.contains(*column))
                .cloned()
                .collect(),
            unmatched_fields: TARGET_SCHEMA
                .into_iter()
                .filter(|field| !assigned_fields.contains(field))
                .collect(),
        }
    }
}

fn schema_rank(field: &str) -> usize {
    TARGET_SCHEMA
        .iter()
        .position(|f| *f == field)
        .unwrap_or(TARGET_SCHEMA.len())
}

fn column_rank(columns: &[String], column: &str) -> usize {
    columns
        .iter()
        .position(|c| c == column)
        .unwrap_or(columns.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_name_scores_one() {
        let engine = MappingEngine::default();
        assert_eq!(engine.score("vat", "vat"), (1.0, MatchKind::Exact));
        assert_eq!(
            engine.score("vendor_part_number", "vendorPartNumber"),
            (NORMALIZED_SCORE, MatchKind::Normalized)
        );
        assert_eq!(
            engine.score("VENDORPARTNUMBER", "vendorPartNumber"),
            (NORMALIZED_SCORE, MatchKind::Normalized)
        );
    }

    #[test]
    fn polish_headers_hit_synonyms() {
        let engine = MappingEngine::default();
        assert_eq!(
            engine.score("ID oferty", "vendorPartNumber").1,
            MatchKind::Synonym
        );
        assert_eq!(engine.score("Ilość", "quantity").1, MatchKind::Synonym);
        assert_eq!(engine.score("Zdjęcia", "images").1, MatchKind::Synonym);
    }

    #[test]
    fn custom_synonyms_apply() {
        let engine = MappingEngine::default().with_synonym("warranty", "Gw. miesiące");
        assert_eq!(engine.score("gw. miesiące", "warranty").1, MatchKind::Synonym);
    }

    #[test]
    fn fuzzy_scores_stay_below_synonyms() {
        let engine = MappingEngine::default();
        let (score, kind) = engine.score("Cena PLN brutto", "salePriceBrutto");
        assert_eq!(kind, MatchKind::Fuzzy);
        assert!(score <= FUZZY_CEILING);
    }
}
