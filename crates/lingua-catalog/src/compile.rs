// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Minimal `.mo` writer so tests can build catalogs inline.

const MO_MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: u32 = 28;
const DEFAULT_METADATA: &str = "Content-Type: text/plain; charset=UTF-8\n";

/// Compile `(msgid, msgstr)` pairs into a little-endian GNU `.mo` image.
///
/// A UTF-8 metadata entry is added unless one is supplied. Contexts are
/// joined to the msgid with `\u{4}` (`"menu\u{4}Open"`).
pub(crate) fn compile_catalog(entries: &[(&str, &str)]) -> Vec<u8> {
	let mut messages: Vec<(&str, &str)> = entries.to_vec();
	if !messages.iter().any(|(id, _)| id.is_empty()) {
		messages.push(("", DEFAULT_METADATA));
	}
	messages.sort_by(|a, b| a.0.cmp(b.0));
	messages.dedup_by(|a, b| a.0 == b.0);

	let count = messages.len() as u32;
	let originals_offset = HEADER_LEN;
	let translations_offset = originals_offset + count * 8;
	let strings_offset = translations_offset + count * 8;

	let mut originals = Vec::with_capacity(messages.len());
	let mut translations = Vec::with_capacity(messages.len());
	let mut strings = Vec::new();

	for (id, _) in &messages {
		originals.push((id.len() as u32, strings_offset + strings.len() as u32));
		strings.extend_from_slice(id.as_bytes());
		strings.push(0);
	}
	for (_, translated) in &messages {
		translations.push((
			translated.len() as u32,
			strings_offset + strings.len() as u32,
		));
		strings.extend_from_slice(translated.as_bytes());
		strings.push(0);
	}

	let mut out = Vec::with_capacity(strings_offset as usize + strings.len());
	for word in [
		MO_MAGIC,
		0,
		count,
		originals_offset,
		translations_offset,
		0,
		strings_offset,
	] {
		out.extend_from_slice(&word.to_le_bytes());
	}
	for (len, offset) in originals.into_iter().chain(translations) {
		out.extend_from_slice(&len.to_le_bytes());
		out.extend_from_slice(&offset.to_le_bytes());
	}
	out.extend_from_slice(&strings);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compiled_catalog_parses() {
		let data = compile_catalog(&[("Hello world!", "你好世界！"), ("Bye", "再见")]);
		let catalog = gettext::Catalog::parse(&data[..]).unwrap();
		assert_eq!(catalog.gettext("Hello world!"), "你好世界！");
		assert_eq!(catalog.gettext("Bye"), "再见");
		assert_eq!(catalog.gettext("Missing"), "Missing");
	}

	#[test]
	fn test_compiled_catalog_with_context() {
		let data = compile_catalog(&[("menu\u{4}Open", "Öffnen"), ("Open", "Offen")]);
		let catalog = gettext::Catalog::parse(&data[..]).unwrap();
		assert_eq!(catalog.pgettext("menu", "Open"), "Öffnen");
		assert_eq!(catalog.gettext("Open"), "Offen");
	}

	#[test]
	fn test_header_layout() {
		let data = compile_catalog(&[("a", "b")]);
		assert_eq!(&data[0..4], &MO_MAGIC.to_le_bytes());
		assert_eq!(u32::from_le_bytes([data[8], data[9], data[10], data[11]]), 2);
	}
}
