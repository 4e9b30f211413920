use crate::config::InquiryConfig;
use crate::models::Listing;

/// Title-case a name word by word: "jane doe" becomes "Jane Doe".
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render the inquiry message for a listing from the configured template.
///
/// Recognized placeholders: `{agentname}`, `{title}`, `{phone}`, `{email}`,
/// `{fullname}`.
pub fn render(template: &str, listing: &Listing, inquiry: &InquiryConfig) -> String {
    template
        .replace("{agentname}", &title_case(&listing.agent_name))
        .replace("{title}", &listing.title)
        .replace("{phone}", &inquiry.phone)
        .replace("{email}", &inquiry.email)
        .replace("{fullname}", &inquiry.fullname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_word_by_word() {
        assert_eq!(title_case("jane doe"), "Jane Doe");
        assert_eq!(title_case("SEAMUS O'MALLEY"), "Seamus O'malley");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn renders_every_placeholder() {
        let listing = Listing {
            id: "5471901".to_string(),
            title: "Apartment 12, The Mills".to_string(),
            agent_name: "jane doe".to_string(),
            url: "https://www.daft.ie/for-rent/5471901".to_string(),
            published_at: None,
        };
        let inquiry = InquiryConfig {
            template: String::new(),
            phone: "0851234567".to_string(),
            email: "seeker@example.com".to_string(),
            fullname: "Pat Murphy".to_string(),
        };

        let rendered = render(
            "Hi {agentname}, is {title} available? {fullname}, {phone}, {email}",
            &listing,
            &inquiry,
        );

        assert_eq!(
            rendered,
            "Hi Jane Doe, is Apartment 12, The Mills available? Pat Murphy, 0851234567, seeker@example.com"
        );
    }
}
