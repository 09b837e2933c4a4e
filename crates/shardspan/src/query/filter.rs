use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};

///
/// Filter AST
///
/// Pure representation of scan predicates. No schema validation or
/// execution semantics live here; stores interpret predicates at scan
/// and probe time.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Lt = 0x02,
    Lte = 0x03,
    Gt = 0x04,
    Gte = 0x05,
}

///
/// FilterPredicate
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub property: String,
    pub op: CompareOp,
    pub value: PropertyValue,
}

impl FilterPredicate {
    #[must_use]
    pub fn new(
        property: impl Into<String>,
        op: CompareOp,
        value: impl Into<PropertyValue>,
    ) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }
}

///
/// Filter
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Compare(FilterPredicate),
    And(Vec<Self>),
}

impl Filter {
    /// Conjoin `other` onto `self`, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut children = match self {
            Self::And(children) => children,
            leaf => vec![leaf],
        };
        match other {
            Self::And(mut more) => children.append(&mut more),
            leaf => children.push(leaf),
        }

        Self::And(children)
    }

    /// Flatten into the predicate leaves, in filter order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&FilterPredicate> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FilterPredicate>) {
        match self {
            Self::Compare(predicate) => out.push(predicate),
            Self::And(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Rebuild a conjunction from predicate leaves; `None` when empty.
    #[must_use]
    pub fn from_leaves(leaves: Vec<FilterPredicate>) -> Option<Self> {
        let mut filters: Vec<Self> = leaves.into_iter().map(Self::Compare).collect();
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Self::And(filters)),
        }
    }
}

// Free builders mirror the comparison operators for terse call sites.

#[must_use]
pub fn eq(property: impl Into<String>, value: impl Into<PropertyValue>) -> Filter {
    Filter::Compare(FilterPredicate::new(property, CompareOp::Eq, value))
}

#[must_use]
pub fn lt(property: impl Into<String>, value: impl Into<PropertyValue>) -> Filter {
    Filter::Compare(FilterPredicate::new(property, CompareOp::Lt, value))
}

#[must_use]
pub fn lte(property: impl Into<String>, value: impl Into<PropertyValue>) -> Filter {
    Filter::Compare(FilterPredicate::new(property, CompareOp::Lte, value))
}

#[must_use]
pub fn gt(property: impl Into<String>, value: impl Into<PropertyValue>) -> Filter {
    Filter::Compare(FilterPredicate::new(property, CompareOp::Gt, value))
}

#[must_use]
pub fn gte(property: impl Into<String>, value: impl Into<PropertyValue>) -> Filter {
    Filter::Compare(FilterPredicate::new(property, CompareOp::Gte, value))
}

///
/// TESTS
///
