// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion between language tags and locale identifiers.
//!
//! Browsers and URLs speak in language tags (`en-us`), while gettext catalogs
//! are laid out by POSIX-style locale identifiers (`en_US`). Both functions in
//! this crate are total: malformed input is passed through lower-cased.
//!
//! # Example
//!
//! ```
//! use lingua_locale::{locale_to_tag, tag_to_locale};
//!
//! assert_eq!(tag_to_locale("en-us", false), "en_US");
//! assert_eq!(tag_to_locale("sr-latn", false), "sr_Latn");
//! assert_eq!(locale_to_tag("en_US"), "en-us");
//! ```
//!
//! Only two-letter regions round-trip. Script suffixes such as `Latn` come back
//! lower-cased from [`locale_to_tag`] and are re-capitalized by
//! [`tag_to_locale`], so `sr_Latn` survives but `es_419` does not.

/// Separator between language and region in a language tag.
pub const TAG_SEPARATOR: char = '-';

/// Separator between language and region in a locale identifier.
pub const LOCALE_SEPARATOR: char = '_';

/// Turn a language tag (`en-us`) into a locale identifier (`en_US`).
///
/// With `lower_last` set, the region is lower-cased instead (`en_us`).
/// Otherwise regions longer than two characters are treated as script
/// subtags and only their first letter is capitalized (`sr-latn` becomes
/// `sr_Latn`).
pub fn tag_to_locale(tag: &str, lower_last: bool) -> String {
	let Some((language, region)) = tag.split_once(TAG_SEPARATOR) else {
		return tag.to_lowercase();
	};

	let region = if lower_last {
		region.to_lowercase()
	} else if region.chars().count() > 2 {
		capitalize(region)
	} else {
		region.to_uppercase()
	};

	format!("{}{LOCALE_SEPARATOR}{region}", language.to_lowercase())
}

/// Turn a locale identifier (`en_US`) into a language tag (`en-us`).
pub fn locale_to_tag(locale: &str) -> String {
	match locale.split_once(LOCALE_SEPARATOR) {
		Some((language, region)) => format!(
			"{}{TAG_SEPARATOR}{}",
			language.to_lowercase(),
			region.to_lowercase()
		),
		None => locale.to_lowercase(),
	}
}

fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}
