//! Relationship query descriptors.
//!
//! A [`RelationshipQuery`] is a predicate tree over `concept_relationship`
//! columns. Stores backed by a database translate it to SQL; in-memory stores
//! evaluate it directly with [`Predicate::matches`].
//!
//! Older callers describe filters as a flat list where every filter carries
//! the [`Combinator`] joining it to its predecessor.
//! [`RelationshipQuery::from_filters`] folds such a list into a tree.

use std::fmt;

use crate::{ConceptId, ConceptRelationship};

/// A filterable `concept_relationship` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationshipField {
    /// `concept_id_1`
    SourceConceptId,
    /// `concept_id_2`
    TargetConceptId,
    /// `relationship_id`
    RelationshipId,
}

impl RelationshipField {
    /// Returns the column name.
    pub fn column(&self) -> &'static str {
        match self {
            RelationshipField::SourceConceptId => "concept_id_1",
            RelationshipField::TargetConceptId => "concept_id_2",
            RelationshipField::RelationshipId => "relationship_id",
        }
    }
}

/// Comparison operator of a single filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// Exact equality.
    Equals,
    /// SQL `LIKE` (`%` any run, `_` any single character). Text fields only.
    Like,
}

/// Literal operand of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterValue {
    /// A concept id.
    Id(ConceptId),
    /// A text value or LIKE pattern.
    Text(String),
}

/// How a filter in a flat list joins the filters before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combinator {
    /// Conjunction with the preceding filter.
    #[default]
    And,
    /// Starts a new alternative.
    Or,
}

/// A single `field <op> value` test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filter {
    /// Column under test.
    pub field: RelationshipField,
    /// Operator.
    pub comparison: Comparison,
    /// Operand.
    pub value: FilterValue,
}

/// Column value borrowed from a row.
enum FieldValue<'a> {
    Id(ConceptId),
    Text(&'a str),
}

impl Filter {
    /// Creates a filter.
    pub fn new(field: RelationshipField, comparison: Comparison, value: FilterValue) -> Self {
        Self {
            field,
            comparison,
            value,
        }
    }

    /// Tests a row against this filter.
    ///
    /// A mismatch between the column type and the operand type never matches,
    /// and neither does `Like` against an id column.
    pub fn matches(&self, row: &ConceptRelationship) -> bool {
        let actual = match self.field {
            RelationshipField::SourceConceptId => FieldValue::Id(row.concept_id_1),
            RelationshipField::TargetConceptId => FieldValue::Id(row.concept_id_2),
            RelationshipField::RelationshipId => FieldValue::Text(&row.relationship_id),
        };

        match (actual, self.comparison, &self.value) {
            (FieldValue::Id(a), Comparison::Equals, FilterValue::Id(b)) => a == *b,
            (FieldValue::Text(a), Comparison::Equals, FilterValue::Text(b)) => a == b,
            (FieldValue::Text(a), Comparison::Like, FilterValue::Text(p)) => like_matches(a, p),
            _ => false,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.comparison {
            Comparison::Equals => "=",
            Comparison::Like => "LIKE",
        };
        match &self.value {
            FilterValue::Id(id) => write!(f, "{} {} {}", self.field.column(), op, id),
            FilterValue::Text(text) => write!(
                f,
                "{} {} '{}'",
                self.field.column(),
                op,
                text.replace('\'', "''")
            ),
        }
    }
}

/// Predicate tree over relationship rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    /// Leaf test.
    Filter(Filter),
    /// Every child must hold. Empty is true.
    All(Vec<Predicate>),
    /// At least one child must hold. Empty is false.
    Any(Vec<Predicate>),
}

impl Predicate {
    /// `concept_id_1 = id`
    pub fn source_concept(id: ConceptId) -> Self {
        Predicate::Filter(Filter::new(
            RelationshipField::SourceConceptId,
            Comparison::Equals,
            FilterValue::Id(id),
        ))
    }

    /// `concept_id_2 = id`
    pub fn target_concept(id: ConceptId) -> Self {
        Predicate::Filter(Filter::new(
            RelationshipField::TargetConceptId,
            Comparison::Equals,
            FilterValue::Id(id),
        ))
    }

    /// `relationship_id = value`
    pub fn relationship_equals(value: impl Into<String>) -> Self {
        Predicate::Filter(Filter::new(
            RelationshipField::RelationshipId,
            Comparison::Equals,
            FilterValue::Text(value.into()),
        ))
    }

    /// `relationship_id LIKE pattern`
    pub fn relationship_like(pattern: impl Into<String>) -> Self {
        Predicate::Filter(Filter::new(
            RelationshipField::RelationshipId,
            Comparison::Like,
            FilterValue::Text(pattern.into()),
        ))
    }

    /// Conjunction of `predicates`.
    pub fn all(predicates: Vec<Predicate>) -> Self {
        Predicate::All(predicates)
    }

    /// Disjunction of `predicates`.
    pub fn any(predicates: Vec<Predicate>) -> Self {
        Predicate::Any(predicates)
    }

    /// Evaluates the tree against a row.
    pub fn matches(&self, row: &ConceptRelationship) -> bool {
        match self {
            Predicate::Filter(filter) => filter.matches(row),
            Predicate::All(children) => children.iter().all(|p| p.matches(row)),
            Predicate::Any(children) => children.iter().any(|p| p.matches(row)),
        }
    }

    /// Iterates over every leaf filter, depth first.
    pub fn filters(&self) -> Vec<&Filter> {
        let mut out = Vec::new();
        self.collect_filters(&mut out);
        out
    }

    fn collect_filters<'a>(&'a self, out: &mut Vec<&'a Filter>) {
        match self {
            Predicate::Filter(filter) => out.push(filter),
            Predicate::All(children) | Predicate::Any(children) => {
                for child in children {
                    child.collect_filters(out);
                }
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Filter(filter) => write!(f, "{filter}"),
            Predicate::All(children) if children.is_empty() => write!(f, "TRUE"),
            Predicate::Any(children) if children.is_empty() => write!(f, "FALSE"),
            Predicate::All(children) | Predicate::Any(children) => {
                let joiner = if matches!(self, Predicate::All(_)) {
                    " AND "
                } else {
                    " OR "
                };
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{joiner}")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A query against the `concept_relationship` table.
///
/// # Example
///
/// ```rust
/// use omop_vocab::{Combinator, Filter, Predicate, RelationshipQuery};
///
/// let query = RelationshipQuery::new(Predicate::all(vec![
///     Predicate::source_concept(42),
///     Predicate::relationship_like("SNOMED - ICD10CM eq%"),
/// ]))
/// .with_limit(10);
///
/// assert_eq!(query.limit, Some(10));
/// assert_eq!(query.predicate.filters().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationshipQuery {
    /// Row predicate.
    pub predicate: Predicate,
    /// Maximum number of rows to return (None = unlimited).
    pub limit: Option<usize>,
}

impl RelationshipQuery {
    /// Creates an unlimited query.
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            limit: None,
        }
    }

    /// Caps the number of returned rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Folds a flat filter list into a predicate tree.
    ///
    /// Filters tagged [`Combinator::And`] extend the current conjunction;
    /// filters tagged [`Combinator::Or`] start a new alternative. The
    /// combinator on the first filter is ignored.
    ///
    /// ```rust
    /// use omop_vocab::{Combinator, Filter, Predicate, RelationshipQuery};
    ///
    /// let (a, b) = match (Predicate::source_concept(1), Predicate::source_concept(2)) {
    ///     (Predicate::Filter(a), Predicate::Filter(b)) => (a, b),
    ///     _ => unreachable!(),
    /// };
    ///
    /// let query = RelationshipQuery::from_filters(vec![
    ///     (a.clone(), Combinator::Or),
    ///     (b.clone(), Combinator::Or),
    /// ]);
    /// assert_eq!(
    ///     query.predicate,
    ///     Predicate::any(vec![Predicate::Filter(a), Predicate::Filter(b)])
    /// );
    /// ```
    pub fn from_filters(filters: Vec<(Filter, Combinator)>) -> Self {
        let mut groups: Vec<Vec<Predicate>> = Vec::new();

        for (filter, combinator) in filters {
            match groups.last_mut() {
                Some(group) if combinator == Combinator::And => {
                    group.push(Predicate::Filter(filter));
                }
                _ => groups.push(vec![Predicate::Filter(filter)]),
            }
        }

        let predicate = match groups.len() {
            0 => Predicate::All(Vec::new()),
            1 => conjunction(groups.remove(0)),
            _ => Predicate::Any(groups.into_iter().map(conjunction).collect()),
        };

        Self::new(predicate)
    }

    /// Evaluates the predicate against a row. The limit is not considered.
    pub fn matches(&self, row: &ConceptRelationship) -> bool {
        self.predicate.matches(row)
    }
}

impl fmt::Display for RelationshipQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate)?;
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}

fn conjunction(mut group: Vec<Predicate>) -> Predicate {
    if group.len() == 1 {
        group.remove(0)
    } else {
        Predicate::All(group)
    }
}

/// SQL `LIKE` matching, case-sensitive.
///
/// `%` matches any run of characters (including none) and `_` matches exactly
/// one character. There is no escape character.
///
/// ```rust
/// use omop_vocab::like_matches;
///
/// assert!(like_matches("SNOMED - ICD10CM eq", "SNOMED - ICD10CM eq%"));
/// assert!(like_matches("ICD9CM", "ICD_CM"));
/// assert!(!like_matches("snomed", "SNOMED%"));
/// ```
pub fn like_matches(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut vi, mut pi) = (0, 0);
    // Position after the last `%` seen, and the value index it is anchored at.
    let mut backtrack: Option<(usize, usize)> = None;

    while vi < value.len() {
        match pattern.get(pi) {
            Some('%') => {
                backtrack = Some((pi + 1, vi));
                pi += 1;
            }
            Some('_') => {
                vi += 1;
                pi += 1;
            }
            Some(c) if *c == value[vi] => {
                vi += 1;
                pi += 1;
            }
            _ => match backtrack {
                Some((after_wildcard, anchor)) => {
                    pi = after_wildcard;
                    vi = anchor + 1;
                    backtrack = Some((after_wildcard, anchor + 1));
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|c| *c == '%')
}
