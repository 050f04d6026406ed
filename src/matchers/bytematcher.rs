// src/matchers/bytematcher.rs

//! Substring search using a precomputed failure function
//! (Knuth-Morris-Pratt). Never backtracks in the haystack.

use crate::common::FileOffset;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Result of a search: offset of the match in the haystack and whether
/// there was a match. Unmatched searches return offset `0`.
pub type Found = (FileOffset, bool);

/// A needle with its failure function, reusable across haystacks.
#[derive(Clone, Debug)]
pub struct ByteMatcher<'a> {
    needle: &'a [u8],
    /// `failure[i]` is the length of the longest proper prefix of
    /// `needle[..=i]` that is also a suffix of it.
    failure: Vec<usize>,
}

impl<'a> ByteMatcher<'a> {
    pub fn new(needle: &'a [u8]) -> ByteMatcher<'a> {
        let mut failure: Vec<usize> = vec![0; needle.len()];
        let mut k: usize = 0;
        for i in 1..needle.len() {
            while k > 0 && needle[k] != needle[i] {
                k = failure[k - 1];
            }
            if needle[k] == needle[i] {
                k += 1;
            }
            failure[i] = k;
        }

        ByteMatcher { needle, failure }
    }

    pub fn needle(&self) -> &[u8] {
        self.needle
    }

    /// Find the first occurrence of the needle in `haystack`.
    ///
    /// An empty needle matches at offset `0`. A needle longer than the
    /// haystack never matches.
    pub fn find(&self, haystack: &[u8]) -> Found {
        let nsize = self.needle.len();
        if nsize == 0 {
            return (0, true);
        }
        if nsize > haystack.len() {
            return (0, false);
        }
        let mut q: usize = 0;
        for (i, byte) in haystack.iter().enumerate() {
            while q > 0 && self.needle[q] != *byte {
                q = self.failure[q - 1];
            }
            if self.needle[q] == *byte {
                q += 1;
            }
            if q == nsize {
                return (i + 1 - nsize, true);
            }
        }

        (0, false)
    }

    /// Does `haystack` contain the needle?
    #[inline(always)]
    pub fn is_in(&self, haystack: &[u8]) -> bool {
        self.find(haystack).1
    }
}

/// Find `needle` in `haystack`; the failure function is computed per call.
pub fn find(needle: &[u8], haystack: &[u8]) -> Found {
    ByteMatcher::new(needle).find(haystack)
}
