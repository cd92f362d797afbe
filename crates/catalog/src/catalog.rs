use crate::config::{object_at, parse_document, UnknownKeys};
use crate::error::{CatalogError, Result};
use crate::step::{is_kebab_case, Priority, ProcedureStep};
use crate::venue::Venue;
use pathway_intake::Jurisdiction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};

const BUILTIN_CATALOG: &str = include_str!("../../../catalog/procedures.json");

/// Placeholder substituted with the jurisdiction's name in default law lists
/// and display fields
const JURISDICTION_PLACEHOLDER: &str = "{jurisdiction}";

fn render(text: &str, jurisdiction: Jurisdiction) -> String {
    text.replace(JURISDICTION_PLACEHOLDER, jurisdiction.name())
}

/// Link shown next to a venue's procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpfulLink {
    pub title: String,
    pub url: String,
}

/// Statutes governing a venue, with per-jurisdiction overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LawTable {
    default: Vec<String>,
    by_jurisdiction: BTreeMap<Jurisdiction, Vec<String>>,
}

impl LawTable {
    /// Laws for `jurisdiction`: the override list if one exists, otherwise the
    /// default list with `{jurisdiction}` replaced by the region name
    #[must_use]
    pub fn for_jurisdiction(&self, jurisdiction: Jurisdiction) -> Vec<String> {
        if let Some(laws) = self.by_jurisdiction.get(&jurisdiction) {
            return laws.clone();
        }
        self.default
            .iter()
            .map(|law| render(law, jurisdiction))
            .collect()
    }
}

/// Display fields one jurisdiction replaces for a venue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RegionalText {
    name: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    time_limit: Option<String>,
}

/// Everything the catalog knows about one venue.
///
/// The plain getters return the jurisdiction-neutral text; the `*_for`
/// variants apply the entry's `by_jurisdiction` overrides and render
/// `{jurisdiction}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    venue: Venue,
    name: String,
    title: String,
    subtitle: String,
    time_limit: String,
    helpful_links: Vec<HelpfulLink>,
    laws: LawTable,
    regional: BTreeMap<Jurisdiction, RegionalText>,
    steps: Vec<ProcedureStep>,
}

impl CatalogEntry {
    #[must_use]
    pub const fn venue(&self) -> Venue {
        self.venue
    }

    /// Display name of the forum ("Landlord and Tenant Board")
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn name_for(&self, jurisdiction: Jurisdiction) -> String {
        self.localized(jurisdiction, |r| r.name.as_deref(), &self.name)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn title_for(&self, jurisdiction: Jurisdiction) -> String {
        self.localized(jurisdiction, |r| r.title.as_deref(), &self.title)
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn subtitle_for(&self, jurisdiction: Jurisdiction) -> String {
        self.localized(jurisdiction, |r| r.subtitle.as_deref(), &self.subtitle)
    }

    /// General filing window for the venue
    #[must_use]
    pub fn time_limit(&self) -> &str {
        &self.time_limit
    }

    #[must_use]
    pub fn time_limit_for(&self, jurisdiction: Jurisdiction) -> String {
        self.localized(jurisdiction, |r| r.time_limit.as_deref(), &self.time_limit)
    }

    #[must_use]
    pub fn helpful_links(&self) -> &[HelpfulLink] {
        &self.helpful_links
    }

    #[must_use]
    pub const fn laws(&self) -> &LawTable {
        &self.laws
    }

    #[must_use]
    pub fn steps(&self) -> &[ProcedureStep] {
        &self.steps
    }

    /// Jurisdictions with their own display text for this venue
    pub fn regions(&self) -> impl Iterator<Item = Jurisdiction> + '_ {
        self.regional.keys().copied()
    }

    fn localized(
        &self,
        jurisdiction: Jurisdiction,
        pick: impl Fn(&RegionalText) -> Option<&str>,
        default: &str,
    ) -> String {
        let text = self
            .regional
            .get(&jurisdiction)
            .and_then(pick)
            .unwrap_or(default);
        render(text, jurisdiction)
    }
}

/// Immutable registry of venue procedures.
///
/// Built once at startup and shared behind an [`Arc`]; nothing mutates it
/// after [`ProcedureCatalog::from_bytes`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureCatalog {
    entries: BTreeMap<Venue, CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    schema_version: Option<u32>,
    #[serde(default)]
    venues: BTreeMap<String, RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    time_limit: Option<String>,
    #[serde(default)]
    helpful_links: Vec<HelpfulLink>,
    #[serde(default)]
    laws: RawLaws,
    #[serde(default)]
    by_jurisdiction: BTreeMap<String, RawRegionalText>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRegionalText {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    time_limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLaws {
    #[serde(default)]
    default: Vec<String>,
    #[serde(default)]
    by_jurisdiction: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    time_estimate: String,
    priority: Priority,
    #[serde(default)]
    deadline_flag: bool,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    deadline_days: Option<u32>,
    #[serde(default)]
    action_ref: String,
}

/// How much of the venue set a catalog document must cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    Full,
    Partial,
}

impl ProcedureCatalog {
    /// The bundled catalog, parsed on first use and shared afterwards
    pub fn builtin() -> Result<Arc<Self>> {
        static BUILTIN: OnceLock<Arc<ProcedureCatalog>> = OnceLock::new();
        if let Some(catalog) = BUILTIN.get() {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(Self::from_bytes(BUILTIN_CATALOG.as_bytes())?);
        Ok(Arc::clone(BUILTIN.get_or_init(|| catalog)))
    }

    /// Load a catalog file (JSON or TOML) that must cover every venue
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded procedure catalog from {} ({} venues)",
            path.display(),
            catalog.entries.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog document that must cover every [`Venue`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(bytes, Coverage::Full)
    }

    /// Parse a regional catalog that may cover only some venues.
    ///
    /// Entries that are present get the same validation as a full catalog.
    pub fn from_bytes_partial(bytes: &[u8]) -> Result<Self> {
        Self::parse(bytes, Coverage::Partial)
    }

    fn parse(bytes: &[u8], coverage: Coverage) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        if let Some(schema_version) = raw.schema_version {
            if schema_version != 1 {
                return Err(CatalogError::UnsupportedSchema(schema_version));
            }
        }

        let mut entries = BTreeMap::new();
        for (slug, raw_entry) in raw.venues {
            let venue = Venue::from_slug(&slug).ok_or_else(|| CatalogError::unknown_venue(&slug))?;
            entries.insert(venue, build_entry(venue, raw_entry)?);
        }

        if coverage == Coverage::Full {
            if let Some(missing) = Venue::ALL.into_iter().find(|v| !entries.contains_key(v)) {
                return Err(CatalogError::MissingVenue(missing));
            }
        }

        log::debug!(
            "Procedure catalog validated: {} venues, {} steps",
            entries.len(),
            entries.values().map(|e| e.steps.len()).sum::<usize>()
        );
        Ok(Self { entries })
    }

    /// Ordered steps for `venue`; empty when the catalog does not cover it
    #[must_use]
    pub fn lookup(&self, venue: Venue) -> &[ProcedureStep] {
        self.entries
            .get(&venue)
            .map_or(&[], |entry| entry.steps.as_slice())
    }

    #[must_use]
    pub fn step(&self, venue: Venue, step_id: &str) -> Option<&ProcedureStep> {
        self.lookup(venue).iter().find(|step| step.id == step_id)
    }

    #[must_use]
    pub fn entry(&self, venue: Venue) -> Option<&CatalogEntry> {
        self.entries.get(&venue)
    }

    #[must_use]
    pub fn contains(&self, venue: Venue) -> bool {
        self.entries.contains_key(&venue)
    }

    /// Venues covered by this catalog, in declaration order of [`Venue`]
    pub fn venues(&self) -> impl Iterator<Item = Venue> + '_ {
        self.entries.keys().copied()
    }

    /// Steps carrying a hard deadline, in catalog order
    pub fn deadline_steps(&self, venue: Venue) -> impl Iterator<Item = &ProcedureStep> + '_ {
        self.lookup(venue).iter().filter(|step| step.deadline_flag)
    }

    #[must_use]
    pub fn laws_for(&self, venue: Venue, jurisdiction: Jurisdiction) -> Vec<String> {
        self.entries
            .get(&venue)
            .map(|entry| entry.laws.for_jurisdiction(jurisdiction))
            .unwrap_or_default()
    }
}

fn build_entry(venue: Venue, raw: RawEntry) -> Result<CatalogEntry> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::invalid_entry(venue, "name must not be empty"));
    }
    if raw.steps.is_empty() {
        return Err(CatalogError::EmptyProcedure(venue));
    }

    let mut by_jurisdiction = BTreeMap::new();
    for (code, laws) in raw.laws.by_jurisdiction {
        let jurisdiction = Jurisdiction::parse(&code).map_err(|err| {
            CatalogError::invalid_entry(venue, format!("laws.by_jurisdiction: {err}"))
        })?;
        by_jurisdiction.insert(jurisdiction, laws);
    }

    let mut regional = BTreeMap::new();
    for (code, raw_text) in raw.by_jurisdiction {
        let jurisdiction = Jurisdiction::parse(&code).map_err(|err| {
            CatalogError::invalid_entry(venue, format!("by_jurisdiction: {err}"))
        })?;
        let text = build_regional(raw_text);
        if text.name.as_deref() == Some("") {
            return Err(CatalogError::invalid_entry(
                venue,
                format!("by_jurisdiction.{}.name must not be empty", jurisdiction.code()),
            ));
        }
        regional.insert(jurisdiction, text);
    }

    let mut seen = HashSet::new();
    let mut steps = Vec::with_capacity(raw.steps.len());
    for (index, raw_step) in raw.steps.into_iter().enumerate() {
        let step = build_step(venue, index, raw_step)?;
        if !seen.insert(step.id.clone()) {
            return Err(CatalogError::DuplicateStep {
                venue,
                step_id: step.id,
            });
        }
        steps.push(step);
    }

    Ok(CatalogEntry {
        venue,
        title: raw.title.unwrap_or_else(|| name.clone()),
        name,
        subtitle: raw.subtitle.unwrap_or_default(),
        time_limit: raw.time_limit.unwrap_or_default(),
        helpful_links: raw.helpful_links,
        laws: LawTable {
            default: raw.laws.default,
            by_jurisdiction,
        },
        regional,
        steps,
    })
}

fn build_regional(raw: RawRegionalText) -> RegionalText {
    let trim = |text: Option<String>| text.map(|t| t.trim().to_string());
    RegionalText {
        name: trim(raw.name),
        title: trim(raw.title),
        subtitle: trim(raw.subtitle),
        time_limit: trim(raw.time_limit),
    }
}

fn build_step(venue: Venue, index: usize, raw: RawStep) -> Result<ProcedureStep> {
    let id = raw.id.trim().to_string();
    if !is_kebab_case(&id) {
        return Err(CatalogError::invalid_step(
            venue,
            index,
            format!("id {id:?} must be non-empty kebab-case"),
        ));
    }
    if raw.title.trim().is_empty() {
        return Err(CatalogError::invalid_step(venue, index, "title must not be empty"));
    }
    if raw.action_ref.trim().is_empty() {
        return Err(CatalogError::invalid_step(
            venue,
            index,
            "action_ref must not be empty",
        ));
    }
    if let Some(days) = raw.deadline_days {
        if !raw.deadline_flag {
            return Err(CatalogError::invalid_step(
                venue,
                index,
                "deadline_days requires deadline_flag",
            ));
        }
        if days == 0 {
            return Err(CatalogError::invalid_step(
                venue,
                index,
                "deadline_days must be at least 1",
            ));
        }
    }

    Ok(ProcedureStep {
        id,
        title: raw.title.trim().to_string(),
        description: raw.description.trim().to_string(),
        time_estimate: raw.time_estimate.trim().to_string(),
        priority: raw.priority,
        deadline_flag: raw.deadline_flag,
        deadline: raw
            .deadline
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        deadline_days: raw.deadline_days,
        action_ref: raw.action_ref.trim().to_string(),
    })
}

fn parse_raw(bytes: &[u8]) -> Result<RawCatalog> {
    let value = parse_document(bytes, "catalog").map_err(CatalogError::Parse)?;
    validate_catalog_value(&value)?;
    serde_json::from_value(value).map_err(|err| CatalogError::parse(err.to_string()))
}

fn validate_catalog_value(value: &serde_json::Value) -> Result<()> {
    let Some(root) = object_at(value) else {
        return Err(CatalogError::parse("catalog must be a JSON object"));
    };

    let mut unknown = UnknownKeys::new();
    unknown.check_object(root, "", &["schema_version", "venues"]);

    if let Some(venues) = root.get("venues").and_then(object_at) {
        for (slug, entry) in venues {
            let Some(entry) = object_at(entry) else {
                continue;
            };
            let base = format!("venues.{slug}");
            unknown.check_object(
                entry,
                &base,
                &[
                    "name",
                    "title",
                    "subtitle",
                    "time_limit",
                    "helpful_links",
                    "laws",
                    "by_jurisdiction",
                    "steps",
                ],
            );
            unknown.check_array_items(
                entry.get("helpful_links"),
                &format!("{base}.helpful_links"),
                &["title", "url"],
            );
            unknown.check_section(
                entry.get("laws"),
                &format!("{base}.laws"),
                &["default", "by_jurisdiction"],
            );
            unknown.check_map_values(
                entry.get("by_jurisdiction"),
                &format!("{base}.by_jurisdiction"),
                &["name", "title", "subtitle", "time_limit"],
            );
            unknown.check_array_items(
                entry.get("steps"),
                &format!("{base}.steps"),
                &[
                    "id",
                    "title",
                    "description",
                    "time_estimate",
                    "priority",
                    "deadline_flag",
                    "deadline",
                    "deadline_days",
                    "action_ref",
                ],
            );
        }
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::UnknownFields(unknown.into_paths()))
    }
}
