// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiles the demo catalogs in `locales/` to `.mo` files with msgfmt.
//!
//! Without msgfmt the checked-in `.mo` next to each `.po` is used instead.

use std::path::Path;
use std::process::Command;

const DOMAIN: &str = "example";

fn main() {
	println!("cargo:rerun-if-changed=locales/");

	let locales = ["zh_CN", "zh_TW", "de", "fr", "es"];
	let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");

	for locale in locales {
		let po_path = format!("locales/{locale}/{DOMAIN}.po");
		let precompiled_mo_path = format!("locales/{locale}/{DOMAIN}.mo");
		let out_locale_dir = format!("{out_dir}/locales/{locale}");
		let out_mo_path = format!("{out_locale_dir}/{DOMAIN}.mo");

		println!("cargo:rerun-if-changed={po_path}");
		println!("cargo:rerun-if-changed={precompiled_mo_path}");

		std::fs::create_dir_all(&out_locale_dir).expect("Failed to create catalog output directory");

		if let Ok(status) = Command::new("msgfmt")
			.args(["--check", "-o", &out_mo_path, &po_path])
			.status()
		{
			if status.success() {
				continue;
			}
		}

		if Path::new(&precompiled_mo_path).exists() {
			std::fs::copy(&precompiled_mo_path, &out_mo_path)
				.expect("Failed to copy pre-compiled .mo file");
		} else {
			panic!(
				"msgfmt not available and no pre-compiled .mo file for locale: {locale}. \
				 Install gettext or run: msgfmt -o {precompiled_mo_path} {po_path}"
			);
		}
	}
}
