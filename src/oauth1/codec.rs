//! RFC 3986 percent-encoding and canonical parameter ordering.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// https://tools.ietf.org/html/rfc5849#section-3.6
// ALPHA, DIGIT, '-', '.', '_', '~' stay literal; every other byte becomes uppercase `%XX`.
const UNRESERVED_EXEMPT: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `value` using the OAuth 1.0a unreserved set.
pub fn encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED_EXEMPT).to_string()
}

/// Returns the pairs sorted by raw key bytes, breaking ties by value.
pub fn normalize<I, K, V>(pairs: I) -> Vec<(String, String)>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	let mut pairs =
		pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect::<Vec<(String, String)>>();

	pairs.sort_by(|(ka, va), (kb, vb)| {
		ka.as_bytes().cmp(kb.as_bytes()).then_with(|| va.as_bytes().cmp(vb.as_bytes()))
	});

	pairs
}

/// Encodes each pair as `key=value` and joins them with `&`, preserving the given order.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	pairs
		.into_iter()
		.map(|(k, v)| format!("{}={}", encode(k), encode(v)))
		.collect::<Vec<_>>()
		.join("&")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unreserved_characters_pass_through() {
		let unreserved = "AZaz09-._~";

		assert_eq!(encode(unreserved), unreserved);
		assert_eq!(encode(&encode(unreserved)), unreserved);
	}

	#[test]
	fn reserved_and_multibyte_characters_escape_uppercase() {
		assert_eq!(encode("a b+c/~"), "a%20b%2Bc%2F~");
		assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
		assert_eq!(encode("*!'()"), "%2A%21%27%28%29");
		assert_eq!(encode("ü"), "%C3%BC");
		assert_eq!(encode("%3d"), "%253d");
		assert_eq!(encode(""), "");
	}

	#[test]
	fn normalize_sorts_by_key_then_value() {
		let sorted = normalize([("b", "1"), ("a", "2"), ("a", "1"), ("B", "0")]);

		assert_eq!(
			sorted,
			vec![
				("B".to_owned(), "0".to_owned()),
				("a".to_owned(), "1".to_owned()),
				("a".to_owned(), "2".to_owned()),
				("b".to_owned(), "1".to_owned()),
			]
		);
	}

	#[test]
	fn encode_pairs_joins_without_trailing_separator() {
		let joined = encode_pairs([("screen_name", "bolt"), ("q", "a&b")]);

		assert_eq!(joined, "screen_name=bolt&q=a%26b");
		assert_eq!(encode_pairs([("only", "one")]), "only=one");
		assert_eq!(encode_pairs(std::iter::empty()), "");
	}
}
