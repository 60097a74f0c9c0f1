// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Locale used when a code normalizes to nothing.
pub const DEFAULT_LOCALE: &str = "en";

/// Reduces a locale code to its lowercase language subtag.
///
/// Bundles are fetched and cached per language, so `en-US`, `en_GB` and
/// `EN` all resolve to `en`.
///
/// ```
/// use loom_ui_messages_core::normalize_locale;
///
/// assert_eq!(normalize_locale("fr-CA"), "fr");
/// assert_eq!(normalize_locale("zh_Hant_TW"), "zh");
/// assert_eq!(normalize_locale(""), "en");
/// ```
pub fn normalize_locale(code: &str) -> String {
	let language = code
		.trim()
		.split(['-', '_'])
		.next()
		.unwrap_or_default()
		.to_ascii_lowercase();

	if language.is_empty() {
		DEFAULT_LOCALE.to_string()
	} else {
		language
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn strips_region_subtag() {
		assert_eq!(normalize_locale("en-US"), "en");
		assert_eq!(normalize_locale("pt_BR"), "pt");
	}

	#[test]
	fn lowercases_language() {
		assert_eq!(normalize_locale("DE"), "de");
		assert_eq!(normalize_locale(" Es-mx "), "es");
	}

	#[test]
	fn empty_codes_use_default() {
		assert_eq!(normalize_locale(""), DEFAULT_LOCALE);
		assert_eq!(normalize_locale("   "), DEFAULT_LOCALE);
		assert_eq!(normalize_locale("-US"), DEFAULT_LOCALE);
	}

	proptest! {
		#[test]
		fn region_subtag_is_always_dropped(
			lang in "[a-z]{2,3}",
			region in "[A-Z]{2}",
			sep in prop::sample::select(vec!['-', '_']),
		) {
			let code = format!("{lang}{sep}{region}");
			prop_assert_eq!(normalize_locale(&code), lang);
		}

		#[test]
		fn normalization_is_idempotent(code in "[A-Za-z]{0,3}([-_][A-Za-z0-9]{1,8}){0,2}") {
			let once = normalize_locale(&code);
			prop_assert_eq!(normalize_locale(&once), once.clone());
		}
	}
}
