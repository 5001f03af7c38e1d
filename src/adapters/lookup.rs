use crate::config::toml_config::CatalogConfig;
use crate::domain::model::CategoryId;
use crate::domain::ports::CategoryLookup;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed name → category table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookup {
    categories: HashMap<String, CategoryId>,
}

impl InMemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, CategoryId)>,
        S: Into<String>,
    {
        Self {
            categories: pairs.into_iter().map(|(name, id)| (name.into(), id)).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, category: CategoryId) {
        self.categories.insert(name.into(), category);
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl CategoryLookup for InMemoryLookup {
    fn category_of(&self, name: &str) -> Option<CategoryId> {
        self.categories.get(name).copied()
    }
}

/// Memoizes another lookup by name. Misses are cached too.
pub struct CachedLookup<L: CategoryLookup> {
    inner: L,
    cache: Mutex<HashMap<String, Option<CategoryId>>>,
}

impl<L: CategoryLookup> CachedLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_names(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl<L: CategoryLookup> CategoryLookup for CachedLookup<L> {
    fn category_of(&self, name: &str) -> Option<CategoryId> {
        let Ok(mut cache) = self.cache.lock() else {
            return self.inner.category_of(name);
        };
        if let Some(hit) = cache.get(name) {
            return *hit;
        }
        let resolved = self.inner.category_of(name);
        cache.insert(name.to_string(), resolved);
        resolved
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteLookup;

#[cfg(feature = "sqlite")]
mod sqlite {
    use crate::domain::model::CategoryId;
    use crate::domain::ports::CategoryLookup;
    use crate::utils::error::Result;
    use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
    use std::path::Path;
    use std::sync::Mutex;

    const CATEGORY_QUERY: &str = "SELECT categoryID FROM typeInfo WHERE typeName = ?1";

    /// Looks categories up in an SDE-lite SQLite catalog (`typeInfo` table).
    pub struct SqliteLookup {
        conn: Mutex<Connection>,
    }

    impl SqliteLookup {
        /// Opens the catalog read-only and checks that it can be queried.
        pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            let conn = Connection::open_with_flags(
                path.as_ref(),
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            Self::from_connection(conn)
        }

        pub fn from_connection(conn: Connection) -> Result<Self> {
            conn.prepare(CATEGORY_QUERY)?;
            Ok(Self {
                conn: Mutex::new(conn),
            })
        }
    }

    impl CategoryLookup for SqliteLookup {
        fn category_of(&self, name: &str) -> Option<CategoryId> {
            let conn = match self.conn.lock() {
                Ok(conn) => conn,
                Err(poisoned) => poisoned.into_inner(),
            };

            let found = conn
                .prepare_cached(CATEGORY_QUERY)
                .and_then(|mut stmt| {
                    stmt.query_row(params![name], |row| row.get::<_, u32>(0))
                        .optional()
                });

            match found {
                Ok(code) => code.map(CategoryId),
                Err(e) => {
                    tracing::warn!(name, error = %e, "catalog query failed, treating as unknown");
                    None
                }
            }
        }
    }
}

/// Builds the lookup the configuration asks for: the SQLite catalog when a
/// path is set, the inline table otherwise, memoized when `cache` is on.
pub fn build_lookup(catalog: &CatalogConfig) -> Result<Box<dyn CategoryLookup>> {
    let base: Box<dyn CategoryLookup> = match &catalog.sqlite_path {
        Some(path) => open_sqlite(path)?,
        None => {
            let table = InMemoryLookup::from_pairs(
                catalog
                    .categories
                    .iter()
                    .flatten()
                    .map(|(name, id)| (name.clone(), CategoryId(*id))),
            );
            tracing::debug!(entries = table.len(), "using inline category table");
            Box::new(table)
        }
    };

    if catalog.cache_enabled() {
        Ok(Box::new(CachedLookup::new(base)))
    } else {
        Ok(base)
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &str) -> Result<Box<dyn CategoryLookup>> {
    tracing::debug!(path, "opening SQLite catalog");
    Ok(Box::new(SqliteLookup::open(path)?))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(path: &str) -> Result<Box<dyn CategoryLookup>> {
    Err(crate::utils::error::FitError::ConfigError {
        message: format!(
            "catalog.sqlite_path is set to {:?} but this build has no SQLite support",
            path
        ),
    })
}
