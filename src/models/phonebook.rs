// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The device-facing phonebook schema (`tbook` XML dialect).
//!
//! This is the bit-exact contract with the phones: a `<tbook e="2"
//! version="2.0">` root containing `<contact>` elements. The `fav`, `vip`
//! and `blocked` attributes are emitted as literal `"false"` — the phones
//! require them but we do not model them yet.

use std::fmt::Write as _;

/// Closed set of phone-number categories understood by the phones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Mobile,
    Office,
    Home,
    Other,
}

impl NumberKind {
    /// Wire name used in the `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            NumberKind::Mobile => "mobile",
            NumberKind::Office => "office",
            NumberKind::Home => "home",
            NumberKind::Other => "other",
        }
    }
}

/// One number on a phonebook entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookNumber {
    /// Normalized number (whitespace stripped, never empty).
    pub number: String,
    pub kind: NumberKind,
}

/// One contact in the target schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookEntry {
    /// May be empty, but the subelement is always emitted.
    pub first_name: String,
    /// May be empty, but the subelement is always emitted.
    pub last_name: String,
    /// At least one entry; contacts without numbers are filtered upstream.
    pub numbers: Vec<PhonebookNumber>,
}

/// Fixed document served whenever the live pipeline cannot produce data.
/// Phones always get a valid phonebook, even with the Google integration
/// broken or not yet configured.
pub const FALLBACK_TBOOK: &str = r#"<tbook e="2" version="2.0">
  <contact fav="false" vip="false" blocked="false">
    <first_name>Theo</first_name>
    <last_name>Maier</last_name>
    <numbers>
      <number no="25234984723" type="mobile" outgoing_id="0"/>
    </numbers>
  </contact>
</tbook>
"#;

/// Render the complete phonebook document.
///
/// Entry order is preserved; the phones display the list as-is.
pub fn render_tbook(entries: &[PhonebookEntry]) -> String {
    let mut out = String::from("<tbook e=\"2\" version=\"2.0\">\n");

    for entry in entries {
        out.push_str("  <contact fav=\"false\" vip=\"false\" blocked=\"false\">\n");
        let _ = writeln!(
            out,
            "    <first_name>{}</first_name>",
            escape_xml(&entry.first_name)
        );
        let _ = writeln!(
            out,
            "    <last_name>{}</last_name>",
            escape_xml(&entry.last_name)
        );
        out.push_str("    <numbers>\n");
        for number in &entry.numbers {
            let _ = writeln!(
                out,
                "      <number no=\"{}\" type=\"{}\" outgoing_id=\"0\"/>",
                escape_xml(&number.number),
                number.kind.as_str()
            );
        }
        out.push_str("    </numbers>\n");
        out.push_str("  </contact>\n");
    }

    out.push_str("</tbook>\n");
    out
}

/// Escape text for use in XML content and attribute values.
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
