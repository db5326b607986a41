use super::domain::PositionToken;
use super::merge::RenderContext;
use std::fmt;

const PREFIX: &str = "cover_letter";
const INITIATIVE_TAG: &str = "init";

/// Applied left to right. No replacement produces a character that appears
/// on the left-hand side, which keeps `sanitize` idempotent.
const REPLACEMENTS: [(char, &str); 10] = [
    ('-', "_"),
    (',', "_"),
    ('.', "_"),
    (':', "_"),
    (' ', "_"),
    ('/', "_"),
    ('&', "_"),
    ('*', "_"),
    ('(', ""),
    (')', ""),
];

/// Lowercases free text and replaces characters that are unsafe or
/// ambiguous in a file name.
pub fn sanitize(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_lowercase(), |acc, (from, to)| acc.replace(*from, to))
}

/// File name stem shared by the rendered `.tex` and the compiled `.pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputName {
    stem: String,
}

impl OutputName {
    #[cfg(test)]
    pub(crate) fn from_stem(stem: &str) -> Self {
        Self {
            stem: stem.to_string(),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn tex_file_name(&self) -> String {
        format!("{}.tex", self.stem)
    }

    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.stem)
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem)
    }
}

pub fn derive_name(context: &RenderContext) -> OutputName {
    let identity = context.identity();

    let initial = identity.first_name.chars().next().map(String::from).unwrap_or_default();
    let sender_tag = format!("{initial}{}", identity.last_name).to_lowercase();
    let company_tag = sanitize(&identity.company_short);
    let position_tag = match &identity.position {
        PositionToken::Initiative => INITIATIVE_TAG.to_string(),
        PositionToken::Named(name) => sanitize(name),
    };
    let language_tag = identity.language.code();

    OutputName {
        stem: format!("{PREFIX}-{company_tag}-{position_tag}-{sender_tag}-{language_tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::domain::{PositionContext, SenderContext, TextContext};
    use crate::letter::merge::merge;
    use chrono::NaiveDate;

    fn context(position_yaml: &str, language: &str) -> RenderContext {
        let sender: SenderContext = serde_yaml::from_str(
            "sender:\n  first_name: Ada\n  last_name: Lovelace\nstart_date_iso: 2026-01-01\n",
        )
        .expect("sender parses");
        let position: PositionContext = serde_yaml::from_str(position_yaml).expect("position parses");
        let text: TextContext =
            serde_yaml::from_str(&format!("language: {language}\n")).expect("text parses");
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        merge(&sender, &position, &text, today).expect("merge succeeds")
    }

    #[test]
    fn sanitize_replaces_and_strips() {
        assert_eq!(sanitize("Acme Corp."), "acme_corp_");
        assert_eq!(sanitize("R&D / Ops: (EMEA)"), "r_d___ops__emea");
        assert_eq!(sanitize("Full-Stack*Dev, Remote"), "full_stack_dev__remote");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let samples = [
            "Acme Corp.",
            "Müller & Söhne GmbH (Berlin)",
            "Senior Engineer - Platform/Infra",
            "a.b,c:d e/f&g*h(i)j-k",
            "___",
            "ÄÖÜ",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "sanitize not idempotent for {sample:?}");
        }
    }

    #[test]
    fn derives_name_for_advertised_position() {
        let context = context(
            "recipient:\n  company: Acme Corporation\n  company_short: Acme Corp.\nposition: Backend Engineer\ninitiative: false\n",
            "de",
        );
        let name = derive_name(&context);

        assert_eq!(name.stem(), "cover_letter-acme_corp_-backend_engineer-alovelace-de");
        assert_eq!(
            name.tex_file_name(),
            "cover_letter-acme_corp_-backend_engineer-alovelace-de.tex"
        );
        assert_eq!(
            name.pdf_file_name(),
            "cover_letter-acme_corp_-backend_engineer-alovelace-de.pdf"
        );
    }

    #[test]
    fn initiative_application_uses_fixed_position_tag() {
        let with_position = context(
            "recipient:\n  company: Acme Corporation\n  company_short: Acme Corp.\nposition: Backend Engineer\ninitiative: true\n",
            "de",
        );
        let without_position = context(
            "recipient:\n  company: Acme Corporation\n  company_short: Acme Corp.\ninitiative: true\n",
            "de",
        );
        let empty_position = context(
            "recipient:\n  company: Acme Corporation\n  company_short: Acme Corp.\nposition: \"\"\ninitiative: true\n",
            "de",
        );

        for context in [with_position, without_position, empty_position] {
            assert_eq!(
                derive_name(&context).stem(),
                "cover_letter-acme_corp_-init-alovelace-de"
            );
        }
    }

    #[test]
    fn language_tag_is_lowercase() {
        let context = context(
            "recipient:\n  company: Acme\n  company_short: Acme\nposition: QA\n",
            "EN",
        );
        assert_eq!(derive_name(&context).stem(), "cover_letter-acme-qa-alovelace-en");
    }
}
