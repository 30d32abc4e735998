//! Axis labels: [Label] and the ordered, unique [Index] that backs every axis.
//!
//! ```rust
//! # use panelnd_core::index::*;
//! let idx = Index::new(["a", "b", "c"]).unwrap();
//! assert_eq!(idx.get_loc(&"b".into()), Some(1));
//! assert_eq!(Index::range(3).to_string(), "Index([0, 1, 2])");
//! ```

use crate::error::Error;
use std::collections::HashMap;
use std::sync::Arc;

/// A single label along an axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<&Label> for Label {
    fn from(l: &Label) -> Self {
        l.clone()
    }
}

macro_rules! int_label {
    ($($t:ty),*) => {
        $(impl From<$t> for Label {
            fn from(i: $t) -> Self {
                Self::Int(i as i64)
            }
        })*
    };
}

int_label!(i8, i16, i32, i64, u8, u16, u32, usize);

/// Ordered sequence of unique labels.
///
/// Cloning is cheap: the labels and the lookup table are shared.
#[derive(Debug, Clone)]
pub struct Index {
    labels: Arc<Vec<Label>>,
    positions: Arc<HashMap<Label, usize>>,
}

impl Index {
    /// Builds an index from anything that converts into [Label]s.
    /// Returns [Error::DuplicateLabel] if a label repeats.
    pub fn new<I, L>(labels: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        Self::from_labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn from_labels(labels: Vec<Label>) -> Result<Self, Error> {
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if positions.insert(label.clone(), i).is_some() {
                return Err(Error::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self {
            labels: Arc::new(labels),
            positions: Arc::new(positions),
        })
    }

    /// The default `0..n` integer index.
    pub fn range(n: usize) -> Self {
        let labels: Vec<Label> = (0..n).map(Label::from).collect();
        let positions = labels.iter().cloned().zip(0..).collect();
        Self {
            labels: Arc::new(labels),
            positions: Arc::new(positions),
        }
    }

    pub fn empty() -> Self {
        Self::range(0)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Label> {
        self.labels.get(i)
    }

    pub fn get_loc(&self, label: &Label) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.positions.contains_key(label)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn first(&self) -> Option<&Label> {
        self.labels.first()
    }

    pub fn last(&self) -> Option<&Label> {
        self.labels.last()
    }

    /// Same labels in the same order.
    pub fn equals(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.labels, &other.labels) || self.labels == other.labels
    }

    /// Labels of `self` followed by the labels of `other` not already present.
    pub fn union(&self, other: &Self) -> Self {
        if self.equals(other) {
            return self.clone();
        }
        let mut labels = self.labels.as_ref().clone();
        let mut positions = self.positions.as_ref().clone();
        for label in other.iter() {
            if !positions.contains_key(label) {
                positions.insert(label.clone(), labels.len());
                labels.push(label.clone());
            }
        }
        Self {
            labels: Arc::new(labels),
            positions: Arc::new(positions),
        }
    }

    /// Labels of `self` that also appear in `other`, in `self`'s order.
    pub fn intersection(&self, other: &Self) -> Self {
        let labels: Vec<Label> = self.iter().filter(|l| other.contains(l)).cloned().collect();
        let positions = labels.iter().cloned().zip(0..).collect();
        Self {
            labels: Arc::new(labels),
            positions: Arc::new(positions),
        }
    }

    /// For each label of `target`, its position in `self`, or `None` if absent.
    pub fn get_indexer(&self, target: &Self) -> Vec<Option<usize>> {
        target.iter().map(|l| self.get_loc(l)).collect()
    }

    /// Appends a label not already present.
    pub(crate) fn push(&mut self, label: Label) -> Result<usize, Error> {
        if self.contains(&label) {
            return Err(Error::DuplicateLabel(label));
        }
        let i = self.labels.len();
        Arc::make_mut(&mut self.positions).insert(label.clone(), i);
        Arc::make_mut(&mut self.labels).push(label);
        Ok(i)
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Index {}

impl Default for Index {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;
    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Index([")?;
        for (i, l) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{l}")?;
        }
        f.write_str("])")
    }
}
