//! Ordered token containment matching over candidate strings.
//!
//! A needle is split on single space characters into tokens. Every token must
//! occur case-insensitively in the haystack, in left-to-right order, with
//! arbitrary haystack content allowed between tokens; each token's own
//! characters must be contiguous. This is deliberately neither a substring
//! search nor a fuzzy scorer: it is the containment rule the picker filters
//! with.

/// Match `needle` against `haystack` with no consumption bound.
///
/// Returns the char offset of the first overall match. An empty needle
/// matches at offset 0.
#[must_use]
pub fn match_tokens(haystack: &str, needle: &str) -> Option<usize> {
	match_tokens_bounded(haystack, needle, haystack.chars().count())
}

/// Match `needle` against `haystack`, consuming at most `max_len` haystack
/// characters per attempt.
///
/// The bound exists so a selected query suffix can be excluded from matching:
/// characters beyond the budget do not participate, and exhausting the budget
/// mid-token counts as a match.
///
/// Worst case is exponential in the number of needle tokens (every space
/// recurses over the remaining haystack). The needle is typed query text, so
/// its length is bounded by the user rather than by the data set; no attempt
/// is made to be clever here.
#[must_use]
pub fn match_tokens_bounded(haystack: &str, needle: &str, max_len: usize) -> Option<usize> {
	let hay: Vec<char> = haystack.chars().collect();
	let needle: Vec<char> = needle.chars().collect();
	match_from(&hay, &needle, max_len)
}

fn match_from(hay: &[char], needle: &[char], max_len: usize) -> Option<usize> {
	if needle.is_empty() {
		return Some(0);
	}
	for start in 0..hay.len() {
		let mut consumed = 0;
		let mut at = 0;
		while start + consumed < hay.len() && at < needle.len() && consumed < max_len {
			if needle[at] == ' ' {
				// The remaining tokens may match anywhere after the current
				// offset, not just contiguously.
				let rest = &hay[start + consumed..];
				if match_from(rest, &needle[at + 1..], max_len - consumed).is_some() {
					return Some(start);
				}
				break;
			}
			if !eq_ignore_case(hay[start + consumed], needle[at]) {
				break;
			}
			consumed += 1;
			at += 1;
		}
		if at == needle.len() || consumed == max_len {
			return Some(start);
		}
	}
	None
}

pub(crate) fn eq_ignore_case(a: char, b: char) -> bool {
	a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_needle_matches_at_origin() {
		assert_eq!(match_tokens("abc", ""), Some(0));
		assert_eq!(match_tokens("", ""), Some(0));
	}

	#[test]
	fn empty_haystack_rejects_needle() {
		assert_eq!(match_tokens("", "a"), None);
	}

	#[test]
	fn plain_substring() {
		assert_eq!(match_tokens("open source project", "source"), Some(5));
		assert_eq!(match_tokens("abc", "xyz"), None);
	}

	#[test]
	fn case_insensitive() {
		assert_eq!(match_tokens("ABC", "abc"), Some(0));
		assert_eq!(match_tokens("straße", "STRASSE"), None); // char-wise, not locale folding
	}

	#[test]
	fn tokens_match_in_order_with_gaps() {
		assert_eq!(match_tokens("open source project", "sour proj"), Some(5));
		assert_eq!(match_tokens("open source project", "open proj"), Some(0));
		assert_eq!(match_tokens("open source project", "proj sour"), None);
	}

	#[test]
	fn token_characters_stay_contiguous() {
		assert_eq!(match_tokens("open source project", "osp"), None);
	}

	#[test]
	fn budget_exhaustion_counts_as_match() {
		assert_eq!(match_tokens_bounded("abcdef", "abcxyz", 3), Some(0));
		assert_eq!(match_tokens("abcdef", "abcxyz"), None);
	}

	#[test]
	fn budget_is_carried_into_token_recursion() {
		// "b" must be found within the 3-char budget left after consuming "a".
		assert_eq!(match_tokens_bounded("axxxb", "a b", 4), Some(0));
	}

	#[test]
	fn repeated_prefixes_backtrack() {
		assert_eq!(match_tokens("aab", "ab"), Some(1));
		assert_eq!(match_tokens("aaab aaac", "aab aac"), Some(1));
	}
}
