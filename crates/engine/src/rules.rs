use crate::error::{PathwayError, Result};
use crate::template::ReasoningTemplate;
use pathway_catalog::Venue;
use pathway_intake::NormalizedText;
use std::collections::{BTreeSet, HashSet};

/// Keyword predicate over normalized text.
///
/// Terms follow [`NormalizedText::contains_term`]: whole words by default,
/// phrases must be consecutive, a trailing `*` matches a word prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// At least one term occurs
    AnyOf(Vec<String>),
    /// Every group has at least one term that occurs
    AllOf(Vec<Vec<String>>),
}

impl Matcher {
    /// Matched terms in rule order, or `None` when the matcher does not fire
    #[must_use]
    pub fn matched_terms(&self, text: &NormalizedText) -> Option<Vec<String>> {
        let mut matched = Vec::new();
        match self {
            Self::AnyOf(terms) => extend_matches(&mut matched, text, terms),
            Self::AllOf(groups) => {
                for group in groups {
                    if !text.contains_any(group) {
                        return None;
                    }
                    extend_matches(&mut matched, text, group);
                }
            }
        }
        (!matched.is_empty()).then_some(matched)
    }

    #[must_use]
    pub fn matches(&self, text: &NormalizedText) -> bool {
        match self {
            Self::AnyOf(terms) => text.contains_any(terms),
            Self::AllOf(groups) => {
                !groups.is_empty() && groups.iter().all(|group| text.contains_any(group))
            }
        }
    }

    fn term_count(&self) -> usize {
        match self {
            Self::AnyOf(terms) => terms.len(),
            Self::AllOf(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    fn validate(&self, rule: &str) -> Result<()> {
        let groups: Vec<&[String]> = match self {
            Self::AnyOf(terms) => vec![terms.as_slice()],
            Self::AllOf(groups) => groups.iter().map(Vec::as_slice).collect(),
        };
        if groups.is_empty() {
            return Err(PathwayError::configuration(format!(
                "rule '{rule}' has no keyword groups"
            )));
        }
        for group in groups {
            if group.is_empty() {
                return Err(PathwayError::configuration(format!(
                    "rule '{rule}' has an empty keyword group"
                )));
            }
            if let Some(blank) = group
                .iter()
                .find(|t| t.trim().trim_end_matches('*').trim().is_empty())
            {
                return Err(PathwayError::configuration(format!(
                    "rule '{rule}' has a blank keyword {blank:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Appends the words each matching term found in the text, deduplicated
fn extend_matches(matched: &mut Vec<String>, text: &NormalizedText, terms: &[String]) {
    for found in terms.iter().filter_map(|term| text.find_term(term)) {
        if !matched.contains(&found) {
            matched.push(found);
        }
    }
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_string()).collect()
}

/// One ordered entry of the rule table
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    name: String,
    matcher: Matcher,
    venue: Venue,
    confidence: u8,
    reasoning: ReasoningTemplate,
}

impl ClassificationRule {
    pub fn new(
        name: impl Into<String>,
        matcher: Matcher,
        venue: Venue,
        confidence: u8,
        reasoning: &str,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PathwayError::configuration("rule name must not be empty"));
        }
        validate_confidence(&name, confidence)?;
        matcher.validate(&name)?;
        let reasoning = ReasoningTemplate::parse(reasoning)?;
        Ok(Self {
            name,
            matcher,
            venue,
            confidence,
            reasoning,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[must_use]
    pub const fn venue(&self) -> Venue {
        self.venue
    }

    #[must_use]
    pub const fn confidence(&self) -> u8 {
        self.confidence
    }

    #[must_use]
    pub const fn reasoning(&self) -> &ReasoningTemplate {
        &self.reasoning
    }
}

/// Outcome when no rule matches
#[derive(Debug, Clone)]
pub struct FallbackRule {
    venue: Venue,
    confidence: u8,
    reasoning: ReasoningTemplate,
}

impl FallbackRule {
    pub fn new(venue: Venue, confidence: u8, reasoning: &str) -> Result<Self> {
        validate_confidence("fallback", confidence)?;
        Ok(Self {
            venue,
            confidence,
            reasoning: ReasoningTemplate::parse(reasoning)?,
        })
    }

    #[must_use]
    pub const fn venue(&self) -> Venue {
        self.venue
    }

    #[must_use]
    pub const fn confidence(&self) -> u8 {
        self.confidence
    }

    #[must_use]
    pub const fn reasoning(&self) -> &ReasoningTemplate {
        &self.reasoning
    }
}

fn validate_confidence(rule: &str, confidence: u8) -> Result<()> {
    if confidence > 100 {
        return Err(PathwayError::configuration(format!(
            "rule '{rule}' confidence must be in [0, 100] (got {confidence})"
        )));
    }
    Ok(())
}

/// Ordered classification rules; the first match wins.
///
/// The table is also the single source of keyword sets: the merit scorer asks
/// it which venue categories a text touches, independently of which rule won.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<ClassificationRule>,
    fallback: FallbackRule,
}

impl RuleTable {
    pub fn new(rules: Vec<ClassificationRule>, fallback: FallbackRule) -> Result<Self> {
        let mut names = HashSet::new();
        for rule in &rules {
            if !names.insert(rule.name.as_str()) {
                return Err(PathwayError::configuration(format!(
                    "duplicate rule name '{}'",
                    rule.name
                )));
            }
        }
        Ok(Self { rules, fallback })
    }

    #[must_use]
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    #[must_use]
    pub const fn fallback(&self) -> &FallbackRule {
        &self.fallback
    }

    /// Every venue this table can produce, fallback included
    #[must_use]
    pub fn venues(&self) -> BTreeSet<Venue> {
        self.rules
            .iter()
            .map(ClassificationRule::venue)
            .chain(std::iter::once(self.fallback.venue))
            .collect()
    }

    /// First matching rule and the keywords that fired it
    #[must_use]
    pub fn first_match(&self, text: &NormalizedText) -> Option<(&ClassificationRule, Vec<String>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matcher.matched_terms(text).map(|terms| (rule, terms)))
    }

    /// Venues of every rule whose keywords occur, not just the first
    #[must_use]
    pub fn categories(&self, text: &NormalizedText) -> BTreeSet<Venue> {
        self.rules
            .iter()
            .filter(|rule| rule.matcher.matches(text))
            .map(ClassificationRule::venue)
            .collect()
    }

    /// Total keyword count across all rules
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.rules.iter().map(|r| r.matcher.term_count()).sum()
    }

    /// The bundled rule table.
    ///
    /// Order is priority, most specific first:
    /// - child protection and police conduct come before family and criminal,
    ///   whose vocabulary ("child", "charged", "arrest") they share;
    /// - housing comes before human rights and money disputes, so "landlord
    ///   harassment" and "landlord kept my deposit" stay at the tenancy board;
    /// - workplace human rights needs both a protected-ground term and a
    ///   workplace term, and sits before general human rights and labour;
    /// - small claims is the last keyword rule, ahead of the fallback only.
    pub fn builtin() -> Result<Self> {
        let human_rights_terms = terms(&[
            "discriminat*",
            "harass*",
            "human rights",
            "racism",
            "racist",
            "racial*",
            "sexism",
            "sexist",
            "homophob*",
            "transphob*",
            "accessibility",
            "protected ground*",
        ]);
        let workplace_terms = terms(&[
            "work*",
            "job*",
            "employ*",
            "boss*",
            "manager*",
            "supervisor*",
            "coworker*",
            "co worker*",
            "colleague*",
        ]);

        let rules = vec![
            ClassificationRule::new(
                "child-protection",
                Matcher::AnyOf(terms(&[
                    "children's aid",
                    "cas",
                    "child protection",
                    "apprehend*",
                    "took my child*",
                    "removed my child*",
                    "foster care",
                    "kinship care",
                ])),
                Venue::ChildProtection,
                85,
                "Children's aid involvement ({keywords}) is decided in {venue} proceedings in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "police-conduct",
                Matcher::AllOf(vec![
                    terms(&["police*", "officer*", "constable*", "cop", "cops"]),
                    terms(&[
                        "complain*",
                        "misconduct",
                        "brutal*",
                        "excessive force",
                        "abus*",
                        "profil*",
                        "carding",
                        "mistreat*",
                        "assault*",
                        "rude",
                        "beat*",
                        "injur*",
                    ]),
                ]),
                Venue::PoliceAccountability,
                85,
                "A complaint about police conduct ({keywords}) goes to {venue} oversight in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "police-oversight-body",
                Matcher::AnyOf(terms(&[
                    "siu",
                    "special investigations unit",
                    "police complaint*",
                    "law enforcement complaints",
                ])),
                Venue::PoliceAccountability,
                85,
                "You referenced police oversight ({keywords}); this is a {venue} matter in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "landlord-tenant",
                Matcher::AnyOf(terms(&[
                    "landlord*",
                    "tenant*",
                    "tenancy",
                    "rent*",
                    "evict*",
                    "lease",
                    "leases",
                    "leased",
                    "leasing",
                    "leasehold*",
                    "sublet*",
                    "ltb",
                    "superintendent",
                ])),
                Venue::LandlordTenant,
                90,
                "Your description mentions {keywords}, which points to a {venue} dispute handled by the residential tenancy tribunal in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "human-rights-workplace",
                Matcher::AllOf(vec![human_rights_terms.clone(), workplace_terms]),
                Venue::HumanRightsWorkplace,
                85,
                "Discrimination or harassment connected to employment ({keywords}) is a {venue} matter for the human rights tribunal in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "human-rights",
                Matcher::AnyOf(human_rights_terms),
                Venue::HumanRights,
                85,
                "Treatment based on a protected ground ({keywords}) can be brought as a {venue} application in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "family",
                Matcher::AnyOf(terms(&[
                    "custody",
                    "child support",
                    "spousal support",
                    "divorc*",
                    "separation",
                    "separated",
                    "parenting time",
                    "family court",
                    "family",
                    "ex husband",
                    "ex wife",
                    "ex partner",
                    "matrimonial",
                ])),
                Venue::Family,
                80,
                "Issues involving {keywords} are {venue} matters heard by the family court in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "criminal",
                Matcher::AnyOf(terms(&[
                    "criminal",
                    "charged with",
                    "arrest*",
                    "bail",
                    "crown attorney",
                    "crown prosecutor",
                    "accused of",
                    "theft",
                    "shoplift*",
                    "impaired driving",
                    "dui",
                    "probation",
                    "first appearance",
                ])),
                Venue::Criminal,
                80,
                "References to {keywords} indicate a {venue} proceeding in {jurisdiction}; get legal advice quickly.",
            )?,
            ClassificationRule::new(
                "immigration",
                Matcher::AnyOf(terms(&[
                    "immigration",
                    "refugee*",
                    "deport*",
                    "removal order",
                    "visa",
                    "work permit",
                    "study permit",
                    "permanent resident*",
                    "citizenship",
                    "asylum",
                    "irb",
                    "sponsorship",
                ])),
                Venue::Immigration,
                80,
                "Mentions of {keywords} point to an {venue} matter before the federal board, whatever the province ({jurisdiction}).",
            )?,
            ClassificationRule::new(
                "labour",
                Matcher::AnyOf(terms(&[
                    "unpaid wage*",
                    "wages",
                    "overtime",
                    "vacation pay",
                    "severance",
                    "termination pay",
                    "wrongful dismissal",
                    "wrongfully dismissed",
                    "fired",
                    "laid off",
                    "employment standards",
                    "union",
                    "grievance",
                    "paycheque",
                    "paycheck",
                    "workplace",
                    "employer*",
                ])),
                Venue::Labour,
                80,
                "Workplace issues such as {keywords} are {venue} claims under the employment standards regime in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "accountability",
                Matcher::AnyOf(terms(&[
                    "ombudsman",
                    "government",
                    "ministry",
                    "public agency",
                    "public servant*",
                    "city council",
                    "municipality",
                    "freedom of information",
                    "privacy commissioner",
                    "oversight body",
                ])),
                Venue::Accountability,
                75,
                "Complaints about public bodies ({keywords}) go to the {venue} oversight offices in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "superior-court",
                Matcher::AnyOf(terms(&[
                    "superior court",
                    "statement of claim",
                    "negligence",
                    "personal injury",
                    "malpractice",
                    "defamation",
                    "libel",
                    "slander",
                    "estate",
                    "class action",
                    "injunction",
                ])),
                Venue::SuperiorCourt,
                75,
                "Claims involving {keywords} usually proceed as {venue} actions in {jurisdiction}.",
            )?,
            ClassificationRule::new(
                "small-claims",
                Matcher::AnyOf(terms(&[
                    "owe",
                    "owes",
                    "owed",
                    "owing",
                    "debt*",
                    "invoice*",
                    "refund*",
                    "contractor*",
                    "deposit",
                    "damages",
                    "small claims",
                    "sue",
                    "suing",
                    "breach of contract",
                    "money",
                ])),
                Venue::SmallClaims,
                70,
                "A money dispute ({keywords}) under the monetary limit belongs in {venue} court in {jurisdiction}.",
            )?,
        ];

        let fallback = FallbackRule::new(
            Venue::SmallClaims,
            60,
            "No specific venue keywords were found; {venue} court in {jurisdiction} is the general starting point for civil disputes.",
        )?;

        Self::new(rules, fallback)
    }
}
