//! Company values lookup

/// One row of the values table: any keyword match selects the phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyValues {
    pub keywords: &'static [&'static str],
    pub phrase: &'static str,
}

impl CompanyValues {
    /// `company` must already be lower-cased
    fn matches(&self, company: &str) -> bool {
        self.keywords.iter().any(|k| company.contains(k))
    }
}

/// Ordered lookup table. Evaluation order is the tie-break.
pub const COMPANY_VALUES: &[CompanyValues] = &[
    CompanyValues {
        keywords: &["amazon"],
        phrase: "Amazon’s Leadership Principles such as Customer Obsession, Ownership, and Bias for Action",
    },
    CompanyValues {
        keywords: &["google"],
        phrase: "Google’s focus on innovation, scalability, and data-driven engineering",
    },
    CompanyValues {
        keywords: &["meta", "facebook"],
        phrase: "Meta's emphasis on impact, move fast, and be bold culture",
    },
    CompanyValues {
        keywords: &["netflix"],
        phrase: "Netflix’s culture of freedom, responsibility, and high performance",
    },
    CompanyValues {
        keywords: &["apple"],
        phrase: "Apple’s attention to detail, cross-functional collaboration, and product excellence",
    },
];

/// Phrase used when no keyword matches
pub const GENERIC_VALUES: &str = "industry best practices from top-tier engineering organizations";

/// Values phrase for a company, matched by case-insensitive substring.
pub fn company_values(company: &str) -> &'static str {
    let company = company.trim().to_lowercase();
    COMPANY_VALUES
        .iter()
        .find(|row| row.matches(&company))
        .map(|row| row.phrase)
        .unwrap_or(GENERIC_VALUES)
}

/// Title-case a name: the first letter of every alphabetic run is
/// upper-cased and the rest lower-cased ("o'neil labs" -> "O'Neil Labs").
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;

    for ch in name.trim().chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_companies_match() {
        assert!(company_values("Amazon").contains("Leadership Principles"));
        assert!(company_values("Google").contains("innovation"));
        assert!(company_values("Netflix").contains("freedom"));
        assert!(company_values("Apple").contains("attention to detail"));
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert!(company_values("AMAZON WEB SERVICES").contains("Leadership Principles"));
        assert!(company_values("  google cloud ").contains("innovation"));
    }

    #[test]
    fn meta_and_facebook_share_a_phrase() {
        assert_eq!(company_values("Meta"), company_values("Facebook"));
        assert!(company_values("facebook").contains("be bold"));
    }

    #[test]
    fn unknown_company_uses_generic_phrase() {
        assert_eq!(company_values("Gryffindor Inc"), GENERIC_VALUES);
        assert_eq!(company_values(""), GENERIC_VALUES);
    }

    #[test]
    fn table_order_breaks_ties() {
        // Both "google" and "apple" appear; google is earlier in the table
        assert!(company_values("Apple vs Google").contains("innovation"));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("amazon"), "Amazon");
        assert_eq!(title_case("AMAZON WEB SERVICES"), "Amazon Web Services");
        assert_eq!(title_case("o'neil labs"), "O'Neil Labs");
        assert_eq!(title_case("  meta  "), "Meta");
        assert_eq!(title_case("x9labs"), "X9Labs");
    }
}
