use crate::error::{PathwayError, Result};
use pathway_catalog::Venue;
use pathway_intake::Jurisdiction;

const ALLOWED_PLACEHOLDERS: &str = "venue, jurisdiction, keywords";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Venue,
    Jurisdiction,
    Keywords,
}

impl Placeholder {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "venue" => Ok(Self::Venue),
            "jurisdiction" => Ok(Self::Jurisdiction),
            "keywords" => Ok(Self::Keywords),
            other => Err(PathwayError::template(format!(
                "Unsupported template placeholder '{{{other}}}'. Allowed: {ALLOWED_PLACEHOLDERS}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Values a reasoning template can reference
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub venue: Venue,
    pub jurisdiction: Jurisdiction,
    pub keywords: &'a [String],
}

/// A reasoning sentence with `{venue}`, `{jurisdiction}` and `{keywords}` slots.
///
/// Parsed once when the rule table is built, so rendering cannot fail.
/// `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl ReasoningTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    if matches!(chars.peek(), Some('{')) {
                        let _ = chars.next();
                        literal.push('{');
                        continue;
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => {
                                return Err(PathwayError::template(
                                    "nested '{' inside placeholder",
                                ));
                            }
                            Some(c) => name.push(c),
                            None => {
                                return Err(PathwayError::template(
                                    "unterminated '{...}' placeholder",
                                ));
                            }
                        }
                    }
                    if name.trim().is_empty() {
                        return Err(PathwayError::template("empty placeholder '{}'"));
                    }
                    let placeholder = Placeholder::parse(name.trim())?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' => {
                    if matches!(chars.peek(), Some('}')) {
                        let _ = chars.next();
                        literal.push('}');
                        continue;
                    }
                    return Err(PathwayError::template("stray '}'"));
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn render(&self, ctx: &TemplateContext<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(Placeholder::Venue) => out.push_str(ctx.venue.label()),
                Segment::Placeholder(Placeholder::Jurisdiction) => {
                    out.push_str(ctx.jurisdiction.name());
                }
                Segment::Placeholder(Placeholder::Keywords) => {
                    out.push_str(&ctx.keywords.join(", "));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(keywords: &[String]) -> TemplateContext<'_> {
        TemplateContext {
            venue: Venue::LandlordTenant,
            jurisdiction: Jurisdiction::Ontario,
            keywords,
        }
    }

    #[test]
    fn renders_all_placeholders() {
        let template =
            ReasoningTemplate::parse("Mentions {keywords}: a {venue} matter in {jurisdiction}.")
                .unwrap();
        let keywords = vec!["landlord".to_string(), "rent".to_string()];
        assert_eq!(
            template.render(&ctx(&keywords)),
            "Mentions landlord, rent: a landlord and tenant matter in Ontario."
        );
    }

    #[test]
    fn escaped_braces_are_literal() {
        let template = ReasoningTemplate::parse("{{literal}} {venue}").unwrap();
        assert_eq!(template.render(&ctx(&[])), "{literal} landlord and tenant");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        let err = ReasoningTemplate::parse("Hello {name}").unwrap_err();
        assert!(err.to_string().contains("'{name}'"), "{err}");
        assert!(err.to_string().contains(ALLOWED_PLACEHOLDERS), "{err}");
    }

    #[test]
    fn rejects_malformed_templates() {
        for bad in ["{venue", "{ven{ue}", "{}", "{ }", "oops }"] {
            assert!(
                matches!(ReasoningTemplate::parse(bad), Err(PathwayError::Template(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn placeholder_names_are_trimmed() {
        let template = ReasoningTemplate::parse("{ jurisdiction }").unwrap();
        assert_eq!(template.render(&ctx(&[])), "Ontario");
        assert_eq!(template.as_str(), "{ jurisdiction }");
    }
}
