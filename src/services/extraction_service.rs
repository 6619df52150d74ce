use std::fmt;

use crate::models::itinerary::ItineraryDocument;

/// The model response carried no parseable itinerary. Recoverable only by
/// regenerating, not by repairing the text.
#[derive(Debug)]
pub struct MalformedResponse(String);

impl MalformedResponse {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for MalformedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed model response: {}", self.0)
    }
}

impl std::error::Error for MalformedResponse {}

/// Pulls the itinerary JSON out of free-form model text.
///
/// Models wrap the object in prose or markdown fences often enough that the
/// raw text cannot be fed to the parser directly. The scan below takes the
/// first balanced top-level `{...}` span, tracking string and escape state
/// so braces inside string values do not end the span early. Extraction is
/// still best-effort: no validation happens beyond a successful parse.
pub fn extract(raw_text: &str) -> Result<ItineraryDocument, MalformedResponse> {
    let span = balanced_object_span(raw_text)
        .ok_or_else(|| MalformedResponse::new("no balanced JSON object in response"))?;

    serde_json::from_str(span)
        .map_err(|err| MalformedResponse::new(format!("located span failed to parse: {}", err)))
}

fn balanced_object_span(raw_text: &str) -> Option<&str> {
    let bytes = raw_text.as_bytes();
    let mut search_from = 0;

    // An opening brace whose object never closes (truncated output) should
    // not hide a later complete object, so retry from each candidate start.
    while let Some(offset) = raw_text[search_from..].find('{') {
        let start = search_from + offset;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (index, &byte) in bytes.iter().enumerate().skip(start) {
            if in_string {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                }
                continue;
            }

            match byte {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&raw_text[start..=index]);
                    }
                }
                _ => {}
            }
        }

        search_from = start + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PURE_JSON: &str = r#"{"Name":"Weekend in Paris","description":"Two days","budget":"1000","data":[{"day":1,"day_description":"Historical Exploration","places":[{"name":"Louvre","description":"Museum","time":"20 minutes","budget":"17"}]}]}"#;

    #[test]
    fn extraction_matches_direct_parse_on_pure_json() {
        let extracted = extract(PURE_JSON).unwrap();
        let parsed: ItineraryDocument = serde_json::from_str(PURE_JSON).unwrap();
        assert_eq!(extracted, parsed);
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let wrapped = format!(
            "Here is your itinerary!\n{}\nLet me know if you want changes.",
            PURE_JSON
        );
        let extracted = extract(&wrapped).unwrap();
        assert_eq!(extracted.name, "Weekend in Paris");
    }

    #[test]
    fn tolerates_markdown_fences() {
        let fenced = format!("```json\n{}\n```", PURE_JSON);
        let extracted = extract(&fenced).unwrap();
        assert_eq!(extracted.data.len(), 1);
    }

    #[test]
    fn braces_inside_string_values_do_not_end_the_span() {
        let tricky = r#"{"Name":"Trip {with} braces","description":"a \"quoted\" note}","budget":"1","data":[]}"#;
        let extracted = extract(tricky).unwrap();
        assert_eq!(extracted.name, "Trip {with} braces");
    }

    #[test]
    fn fails_when_no_braces_present() {
        let err = extract("Sorry, I cannot help.").unwrap_err();
        assert!(err.to_string().contains("no balanced JSON object"));
    }

    #[test]
    fn fails_on_truncated_json() {
        let truncated = &PURE_JSON[..PURE_JSON.len() - 10];
        assert!(extract(truncated).is_err());
    }

    #[test]
    fn fails_when_span_is_not_an_itinerary() {
        // Balanced, valid JSON, but not an object the document can be built
        // from (missing the required Name field).
        assert!(extract(r#"{"answer": 42}"#).is_err());
    }

    #[test]
    fn skips_unclosed_object_in_favor_of_later_complete_one() {
        let text = format!("opening {{ stray prose then {}", PURE_JSON);
        let extracted = extract(&text).unwrap();
        assert_eq!(extracted.name, "Weekend in Paris");
    }
}
