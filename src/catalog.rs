//! @ai:module:intent Resolve referenced categories against the canonical standards catalog
//! @ai:module:layer infrastructure
//! @ai:module:public_api Catalog, CatalogEntry, CatalogSource, Category, CategoryChecklist, HttpCatalog, DirCatalog, StaticCatalog, order_categories, source_from_config
//! @ai:module:depends_on config, annotation, error
//! @ai:module:stateless true

use crate::annotation::category_code;
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Category codes and the checklist names they are published under.
const KNOWN_CATEGORIES: &[(&str, &str)] = &[
    ("G", "general"),
    ("BS", "bayesian"),
    ("EA", "eda"),
    ("ML", "ml"),
    ("PD", "distributions"),
    ("RE", "regression"),
    ("SP", "spatial"),
    ("TS", "time-series"),
    ("UL", "unsupervised"),
];

/// @ai:intent A group of standards sharing an identifier prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub code: String,
    pub name: String,
}

impl Category {
    /// @ai:intent Look up a category by its identifier prefix
    /// @ai:effects pure
    pub fn from_code(code: &str) -> Option<Self> {
        KNOWN_CATEGORIES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(c, name)| Self {
                code: c.to_string(),
                name: name.to_string(),
            })
    }

    /// @ai:intent Heading form of the category name
    /// @ai:example ("time-series") -> "Time Series"
    /// @ai:effects pure
    pub fn title(&self) -> String {
        self.name
            .split(['-', '_', ' '])
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// @ai:intent Order requested category codes: `G` first, then by code; unknown codes dropped
/// @ai:effects pure
pub fn order_categories<'a>(codes: impl IntoIterator<Item = &'a str>) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for code in codes {
        if !seen.insert(code.to_string()) {
            continue;
        }
        match Category::from_code(code) {
            Some(category) => categories.push(category),
            None => tracing::warn!("Unknown standards category '{}' ignored", code),
        }
    }

    categories.sort_by(|a, b| {
        (b.code == "G")
            .cmp(&(a.code == "G"))
            .then_with(|| a.code.cmp(&b.code))
    });
    categories
}

/// @ai:intent Collaborator that supplies checklist lines `- [ ] **<id>** <description>`
pub trait CatalogSource {
    /// @ai:intent Fetch checklist lines for every given category
    fn checklist(&self, categories: &[Category]) -> Result<Vec<String>>;
}

/// @ai:intent One canonical standard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub description: String,
}

/// @ai:intent Ordered identifiers of one category as published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChecklist {
    pub category: Category,
    pub ids: Vec<String>,
}

/// @ai:intent Snapshot of the catalog for one report run
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
    checklists: Vec<CategoryChecklist>,
}

impl Catalog {
    /// @ai:intent Fetch and parse the checklists for the given category codes
    /// @ai:post an empty code set yields an empty catalog without calling the source
    /// @ai:effects network (via source)
    pub fn resolve<'a>(
        source: &dyn CatalogSource,
        codes: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let categories = order_categories(codes);
        if categories.is_empty() {
            return Ok(Self::default());
        }

        tracing::info!(
            "Fetching standards for categories: {}",
            categories
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let lines = source.checklist(&categories)?;
        let catalog = Self::from_lines(categories, &lines);
        tracing::info!("Catalog holds {} standards", catalog.len());
        Ok(catalog)
    }

    /// @ai:intent Build a catalog from checklist lines; entries outside `categories` are dropped
    /// @ai:effects pure
    pub fn from_lines(categories: Vec<Category>, lines: &[String]) -> Self {
        let re = Regex::new(r"^-\s*\[\s\]\s*\*\*([A-Z]+[0-9]+\.[0-9][0-9]?[a-z]?)\*\*\s*(.*)$")
            .expect("Invalid regex");

        let mut entries = HashMap::new();
        let mut checklists: Vec<CategoryChecklist> = categories
            .into_iter()
            .map(|category| CategoryChecklist {
                category,
                ids: Vec::new(),
            })
            .collect();

        for line in lines {
            let Some(caps) = re.captures(line.trim()) else {
                continue;
            };
            let id = caps[1].to_string();
            let code = category_code(&id);

            let Some(checklist) = checklists.iter_mut().find(|c| c.category.code == code) else {
                tracing::debug!("Skipping {} outside requested categories", id);
                continue;
            };

            if entries.contains_key(&id) {
                tracing::warn!("Duplicate catalog entry {} ignored", id);
                continue;
            }

            checklist.ids.push(id.clone());
            entries.insert(
                id.clone(),
                CatalogEntry {
                    description: clean_description(&caps[2]),
                    id,
                },
            );
        }

        Self {
            entries,
            checklists,
        }
    }

    pub fn description(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|e| e.description.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Per-category id lists in catalog order.
    pub fn checklists(&self) -> &[CategoryChecklist] {
        &self.checklists
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Descriptions are often italicised in the published checklists.
fn clean_description(raw: &str) -> String {
    raw.trim().trim_matches('*').trim().to_string()
}

/// @ai:intent Keep checklist entry lines, upgrading plain `- **id**` bullets to checkboxes
/// @ai:effects pure
fn checklist_lines(document: &str) -> Vec<String> {
    document
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            if line.starts_with("- [ ] **") {
                Some(line.to_string())
            } else {
                line.strip_prefix("- **")
                    .map(|rest| format!("- [ ] **{}", rest))
            }
        })
        .collect()
}

/// @ai:intent Fetches published checklists over HTTP, one document per category
pub struct HttpCatalog {
    client: reqwest::blocking::Client,
    base_url: String,
    extension: String,
}

impl HttpCatalog {
    /// @ai:intent Create an HTTP catalog client
    /// @ai:effects pure
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("srr-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::CatalogFetch {
                url: config.base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            extension: config.extension.clone(),
        })
    }

    fn url_for(&self, category: &Category) -> String {
        format!("{}/{}.{}", self.base_url, category.name, self.extension)
    }

    /// @ai:effects network
    fn fetch(&self, url: &str) -> Result<String> {
        let to_error = |e| Error::CatalogFetch {
            url: url.to_string(),
            source: e,
        };

        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(to_error)
    }
}

impl CatalogSource for HttpCatalog {
    /// @ai:effects network
    fn checklist(&self, categories: &[Category]) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for category in categories {
            let url = self.url_for(category);
            tracing::debug!("GET {}", url);
            lines.extend(checklist_lines(&self.fetch(&url)?));
        }
        Ok(lines)
    }
}

/// @ai:intent Reads checklists from `<dir>/<category-name>.<extension>`
pub struct DirCatalog {
    dir: PathBuf,
    extension: String,
}

impl DirCatalog {
    pub fn new(dir: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            dir,
            extension: extension.into(),
        }
    }
}

impl CatalogSource for DirCatalog {
    /// @ai:effects fs:read
    fn checklist(&self, categories: &[Category]) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for category in categories {
            let path = self
                .dir
                .join(format!("{}.{}", category.name, self.extension));
            if !path.is_file() {
                return Err(Error::ChecklistMissing {
                    category: category.name.clone(),
                    path,
                });
            }
            let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                path: path.clone(),
                source: e,
            })?;
            lines.extend(checklist_lines(&content));
        }
        Ok(lines)
    }
}

/// @ai:intent In-memory checklist, filtered to the requested categories
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    lines: Vec<String>,
}

impl StaticCatalog {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn checklist(&self, categories: &[Category]) -> Result<Vec<String>> {
        Ok(self
            .lines
            .iter()
            .filter(|line| {
                let id = line.split("**").nth(1).unwrap_or("");
                categories.iter().any(|c| c.code == category_code(id))
            })
            .cloned()
            .collect())
    }
}

/// @ai:intent Pick the catalog source a configuration asks for
/// @ai:effects pure
pub fn source_from_config(config: &CatalogConfig) -> Result<Box<dyn CatalogSource>> {
    match &config.local_dir {
        Some(dir) => Ok(Box::new(DirCatalog::new(dir.clone(), config.extension.clone()))),
        None => Ok(Box::new(HttpCatalog::new(config)?)),
    }
}
