// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Substitutes `{name}` placeholders in `template` with values from `args`.
///
/// Placeholders without a matching argument are left untouched, as is an
/// unterminated `{`.
///
/// ```
/// use loom_ui_messages_core::format_message;
///
/// let text = format_message("Published by {user} on {date}", &[("user", "Ada")]);
/// assert_eq!(text, "Published by Ada on {date}");
/// ```
pub fn format_message(template: &str, args: &[(&str, &str)]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(open) = rest.find('{') {
		out.push_str(&rest[..open]);
		let after = &rest[open + 1..];
		let Some(close) = after.find('}') else {
			out.push_str(&rest[open..]);
			return out;
		};

		let name = &after[..close];
		match args.iter().find(|(k, _)| *k == name) {
			Some((_, value)) => out.push_str(value),
			None => {
				out.push('{');
				out.push_str(name);
				out.push('}');
			}
		}
		rest = &after[close + 1..];
	}

	out.push_str(rest);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn substitutes_known_placeholders() {
		let text = format_message("{count} pages scheduled for {date}", &[
			("count", "3"),
			("date", "Monday"),
		]);
		assert_eq!(text, "3 pages scheduled for Monday");
	}

	#[test]
	fn keeps_unknown_placeholders() {
		assert_eq!(format_message("Hello {name}", &[]), "Hello {name}");
	}

	#[test]
	fn keeps_unterminated_brace() {
		assert_eq!(format_message("a {b", &[("b", "x")]), "a {b");
	}

	#[test]
	fn template_without_placeholders_is_unchanged() {
		assert_eq!(format_message("Save", &[("x", "y")]), "Save");
	}
}
