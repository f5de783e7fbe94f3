//! Dense bitset representation of a label collection.
//!
//! Used where subset operations (union, intersection, symmetric
//! difference) dominate, as an alternative to the ordered [`LabelVec`]
//! form. Backed by a small inline word array so tensors touching only a
//! handful of indices never allocate.
//!
//! [`LabelVec`]: crate::index::LabelVec

use core::fmt;

use smallvec::SmallVec;

use crate::index::{Label, LabelVec};

const BITS: u32 = u64::BITS;

/// A bitset over the label universe `0..M`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LabelBitset {
    words: SmallVec<[u64; 2]>,
}

impl fmt::Debug for LabelBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl LabelBitset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels(labels: &LabelVec) -> Self {
        let mut set = Self::new();
        for &l in labels {
            set.insert(l);
        }
        set
    }

    fn ensure_word(&mut self, idx: usize) {
        if self.words.len() <= idx {
            self.words.resize(idx + 1, 0);
        }
    }

    pub fn insert(&mut self, label: Label) {
        let idx = (label / BITS) as usize;
        let bit = label % BITS;
        self.ensure_word(idx);
        self.words[idx] |= 1u64 << bit;
    }

    pub fn contains(&self, label: Label) -> bool {
        let idx = (label / BITS) as usize;
        let bit = label % BITS;
        self.words
            .get(idx)
            .map(|w| (w >> bit) & 1 == 1)
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Labels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &w)| {
            (0..BITS).filter_map(move |bit| {
                if (w >> bit) & 1 == 1 {
                    Some(wi as Label * BITS + bit)
                } else {
                    None
                }
            })
        })
    }

    pub fn to_label_vec(&self) -> LabelVec {
        self.iter().collect()
    }

    fn zip_words<'a>(a: &'a Self, b: &'a Self) -> impl Iterator<Item = (u64, u64)> + 'a {
        let len = a.words.len().max(b.words.len());
        (0..len).map(move |i| {
            (
                a.words.get(i).copied().unwrap_or(0),
                b.words.get(i).copied().unwrap_or(0),
            )
        })
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            words: Self::zip_words(self, other).map(|(x, y)| x | y).collect(),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            words: Self::zip_words(self, other).map(|(x, y)| x & y).collect(),
        }
    }

    /// `(self | other) - (self & other)`.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self {
            words: Self::zip_words(self, other).map(|(x, y)| x ^ y).collect(),
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        Self::zip_words(self, other).any(|(x, y)| x & y != 0)
    }
}
