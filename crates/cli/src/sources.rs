use anyhow::{Context, Result};
use pathway_catalog::ProcedureCatalog;
use pathway_engine::{PathwayEngine, RuleTable, ScoringProfile};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub const CATALOG_ENV: &str = "PATHWAY_CATALOG";
pub const PROFILE_ENV: &str = "PATHWAY_PROFILE";

/// Where the catalog and scoring profile come from: a flag, then the
/// environment, then the bundled defaults
#[derive(Debug, Default, Clone)]
pub struct Sources {
    pub catalog: Option<PathBuf>,
    pub profile: Option<PathBuf>,
}

impl Sources {
    pub fn resolve(catalog: Option<PathBuf>, profile: Option<PathBuf>) -> Self {
        Self {
            catalog: catalog.or_else(|| env_path(CATALOG_ENV)),
            profile: profile.or_else(|| env_path(PROFILE_ENV)),
        }
    }

    pub fn catalog(&self) -> Result<Arc<ProcedureCatalog>> {
        match &self.catalog {
            Some(path) => {
                let catalog = ProcedureCatalog::from_file(path)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))?;
                Ok(Arc::new(catalog))
            }
            None => ProcedureCatalog::builtin().context("Bundled catalog is invalid"),
        }
    }

    pub fn profile(&self) -> Result<ScoringProfile> {
        match &self.profile {
            Some(path) => ScoringProfile::from_file(path),
            None => ScoringProfile::builtin(),
        }
    }

    pub fn engine(&self) -> Result<PathwayEngine> {
        let catalog = self.catalog()?;
        let profile = self.profile()?;
        let rules = RuleTable::builtin().context("Bundled rule table is invalid")?;
        PathwayEngine::new(catalog, rules, profile).context("Failed to start pathway engine")
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
