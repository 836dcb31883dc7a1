use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How many items a list field must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Any number of items, including none.
    #[default]
    Optional,
    /// At least one item.
    RequireNonEmpty,
    /// Exactly this many items.
    ExactCount(usize),
    /// Inclusive bounds; a missing bound is unchecked.
    Range {
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl Cardinality {
    /// Builds a range, collapsing degenerate bounds into the simpler variants.
    pub fn range(min: Option<usize>, max: Option<usize>) -> Result<Self, String> {
        match (min, max) {
            (None, None) => Ok(Cardinality::Optional),
            (Some(min), Some(max)) if min > max => Err(format!(
                "minimum {} cannot exceed maximum {}",
                min, max
            )),
            (Some(min), Some(max)) if min == max => Ok(Cardinality::ExactCount(min)),
            (min, max) => Ok(Cardinality::Range { min, max }),
        }
    }

    /// Returns whether `count` items satisfy the constraint.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Cardinality::Optional => true,
            Cardinality::RequireNonEmpty => count >= 1,
            Cardinality::ExactCount(expected) => count == expected,
            Cardinality::Range { min, max } => {
                min.is_none_or(|min| count >= min) && max.is_none_or(|max| count <= max)
            }
        }
    }

    /// Lower and upper item bounds implied by the constraint.
    pub fn bounds(&self) -> (usize, Option<usize>) {
        match *self {
            Cardinality::Optional => (0, None),
            Cardinality::RequireNonEmpty => (1, None),
            Cardinality::ExactCount(count) => (count, Some(count)),
            Cardinality::Range { min, max } => (min.unwrap_or(0), max),
        }
    }
}

fn items(count: usize) -> &'static str {
    if count == 1 { "item" } else { "items" }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Cardinality::Optional
            | Cardinality::Range {
                min: None,
                max: None,
            } => write!(f, "any number of items"),
            Cardinality::RequireNonEmpty => write!(f, "at least 1 item"),
            Cardinality::ExactCount(count) => write!(f, "exactly {} {}", count, items(count)),
            Cardinality::Range {
                min: Some(min),
                max: Some(max),
            } => write!(f, "{} to {} {}", min, max, items(max)),
            Cardinality::Range {
                min: Some(min),
                max: None,
            } => write!(f, "at least {} {}", min, items(min)),
            Cardinality::Range {
                min: None,
                max: Some(max),
            } => write!(f, "up to {} {}", max, items(max)),
        }
    }
}

/// One side of a `[min, max]` pair in a form definition.
///
/// `false` means "no bound". `true` is only meaningful as the upper bound,
/// where it repeats the lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Bound {
    Flag(bool),
    Count(usize),
}

/// Cardinality as written in a form definition.
///
/// Accepted shapes: `false` (optional), `true` (at least one), `2` (exactly
/// two), `[2, 99]`, `[2, false]`, `[false, 99]`, `[2, true]` (exactly two),
/// and the explicit object `{ "min": 2, "max": 99 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CardinalityInput {
    Flag(bool),
    Count(usize),
    Bounds(Bound, Bound),
    Limits {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
}

impl Default for CardinalityInput {
    fn default() -> Self {
        CardinalityInput::Flag(false)
    }
}

impl CardinalityInput {
    /// Resolves the overloaded encoding into a [`Cardinality`].
    pub fn normalize(&self) -> Result<Cardinality, String> {
        match *self {
            CardinalityInput::Flag(false) => Ok(Cardinality::Optional),
            CardinalityInput::Flag(true) => Ok(Cardinality::RequireNonEmpty),
            CardinalityInput::Count(count) => Ok(Cardinality::ExactCount(count)),
            CardinalityInput::Bounds(min, max) => {
                let min = match min {
                    Bound::Flag(false) => None,
                    Bound::Flag(true) => {
                        return Err("lower bound must be a number or false".into());
                    }
                    Bound::Count(count) => Some(count),
                };
                let max = match max {
                    Bound::Flag(false) => None,
                    Bound::Flag(true) => min,
                    Bound::Count(count) => Some(count),
                };
                Cardinality::range(min, max)
            }
            CardinalityInput::Limits { min, max } => Cardinality::range(min, max),
        }
    }
}

impl From<Cardinality> for CardinalityInput {
    fn from(cardinality: Cardinality) -> Self {
        match cardinality {
            Cardinality::Optional => CardinalityInput::Flag(false),
            Cardinality::RequireNonEmpty => CardinalityInput::Flag(true),
            Cardinality::ExactCount(count) => CardinalityInput::Count(count),
            Cardinality::Range { min, max } => CardinalityInput::Limits { min, max },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Cardinality, String> {
        serde_json::from_value::<CardinalityInput>(value)
            .map_err(|err| err.to_string())?
            .normalize()
    }

    #[test]
    fn optional_accepts_everything() {
        for count in [0, 1, 7, 1000] {
            assert!(Cardinality::Optional.accepts(count));
        }
    }

    #[test]
    fn require_non_empty_rejects_zero() {
        assert!(!Cardinality::RequireNonEmpty.accepts(0));
        assert!(Cardinality::RequireNonEmpty.accepts(1));
        assert!(Cardinality::RequireNonEmpty.accepts(5));
    }

    #[test]
    fn exact_count_matches_only_its_value() {
        let exact = Cardinality::ExactCount(2);
        assert!(!exact.accepts(1));
        assert!(exact.accepts(2));
        assert!(!exact.accepts(3));
    }

    #[test]
    fn ranges_check_present_bounds_only() {
        let both = Cardinality::Range {
            min: Some(2),
            max: Some(4),
        };
        assert!(!both.accepts(1));
        assert!(both.accepts(2));
        assert!(both.accepts(4));
        assert!(!both.accepts(5));

        let floor = Cardinality::Range {
            min: Some(2),
            max: None,
        };
        assert!(!floor.accepts(1));
        assert!(floor.accepts(500));

        let ceiling = Cardinality::Range {
            min: None,
            max: Some(3),
        };
        assert!(ceiling.accepts(0));
        assert!(!ceiling.accepts(4));
    }

    #[test]
    fn verdict_is_stable_across_calls() {
        let range = Cardinality::Range {
            min: Some(1),
            max: Some(2),
        };
        for count in 0..4 {
            assert_eq!(range.accepts(count), range.accepts(count));
        }
    }

    #[test]
    fn raw_encodings_normalize() {
        assert_eq!(parse(json!(false)), Ok(Cardinality::Optional));
        assert_eq!(parse(json!(true)), Ok(Cardinality::RequireNonEmpty));
        assert_eq!(parse(json!(2)), Ok(Cardinality::ExactCount(2)));
        assert_eq!(parse(json!([3, 3])), Ok(Cardinality::ExactCount(3)));
        assert_eq!(parse(json!([3, true])), Ok(Cardinality::ExactCount(3)));
        assert_eq!(
            parse(json!([2, 99])),
            Ok(Cardinality::Range {
                min: Some(2),
                max: Some(99)
            })
        );
        assert_eq!(
            parse(json!([2, false])),
            Ok(Cardinality::Range {
                min: Some(2),
                max: None
            })
        );
        assert_eq!(
            parse(json!([false, 99])),
            Ok(Cardinality::Range {
                min: None,
                max: Some(99)
            })
        );
        assert_eq!(parse(json!([false, false])), Ok(Cardinality::Optional));
        assert_eq!(parse(json!([false, true])), Ok(Cardinality::Optional));
        assert_eq!(
            parse(json!({ "min": 1 })),
            Ok(Cardinality::Range {
                min: Some(1),
                max: None
            })
        );
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        assert!(parse(json!([5, 2])).is_err());
        assert!(parse(json!([true, 2])).is_err());
        assert!(parse(json!({ "min": 4, "max": 1 })).is_err());
    }

    #[test]
    fn descriptions_read_naturally() {
        assert_eq!(Cardinality::ExactCount(2).to_string(), "exactly 2 items");
        assert_eq!(
            Cardinality::Range {
                min: Some(2),
                max: None
            }
            .to_string(),
            "at least 2 items"
        );
        assert_eq!(Cardinality::RequireNonEmpty.to_string(), "at least 1 item");
    }

    #[test]
    fn single_item_bounds_are_singular() {
        assert_eq!(Cardinality::ExactCount(1).to_string(), "exactly 1 item");
        assert_eq!(
            Cardinality::Range {
                min: Some(1),
                max: None
            }
            .to_string(),
            "at least 1 item"
        );
        assert_eq!(
            Cardinality::Range {
                min: None,
                max: Some(1)
            }
            .to_string(),
            "up to 1 item"
        );
        assert_eq!(
            Cardinality::Range {
                min: Some(0),
                max: Some(3)
            }
            .to_string(),
            "0 to 3 items"
        );
    }
}
